use std::env;

use url::Url;

use crate::errors::ConfigError;

pub const UPLOAD_URL_PATH: &str = "/get-upload-url";
pub const DEFAULT_IDENTIFY_PATH: &str = "/identify";

/// Deployment stage of the identification API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    /// Storage runs behind a local dev proxy; presigned URLs are rebased
    /// onto the API origin before uploading.
    Local,
    #[default]
    Deployed,
}

impl Stage {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("local") {
            Stage::Local
        } else {
            Stage::Deployed
        }
    }
}

/// Endpoint configuration for [`crate::clients::IdentifyClient`].
///
/// - `base_url`: origin (and optional prefix) of the API; the upload-target
///   request always goes to `{base_url}/get-upload-url`.
/// - `identify_path_override`: replaces `/identify` under `base_url`.
/// - `explicit_identify_endpoint`: full identify URL; wins over the path
///   override when both are set.
/// - `stage`: see [`Stage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub identify_path_override: Option<String>,
    pub explicit_identify_endpoint: Option<String>,
    pub stage: Stage,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            identify_path_override: None,
            explicit_identify_endpoint: None,
            stage: Stage::Deployed,
        }
    }

    /// Reads `PLANT_API_URL`, `PLANT_IDENTIFY_PATH`, `PLANT_IDENTIFY_ENDPOINT`
    /// and `PLANT_STAGE` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `PLANT_API_URL` is missing or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `PLANT_API_URL` is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let base_url = var("PLANT_API_URL").ok_or(ConfigError::Missing("PLANT_API_URL"))?;

        Ok(Self {
            base_url,
            identify_path_override: var("PLANT_IDENTIFY_PATH"),
            explicit_identify_endpoint: var("PLANT_IDENTIFY_ENDPOINT"),
            stage: var("PLANT_STAGE")
                .map(|s| Stage::parse(&s))
                .unwrap_or_default(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn upload_url_endpoint(&self) -> Result<Url, ConfigError> {
        join_path(&self.base_url, UPLOAD_URL_PATH)
    }

    /// # Errors
    ///
    /// Returns an error if the resolved identify endpoint is not an absolute URL.
    pub fn identify_endpoint(&self) -> Result<Url, ConfigError> {
        if let Some(explicit) = &self.explicit_identify_endpoint {
            return Ok(Url::parse(explicit)?);
        }

        let path = self
            .identify_path_override
            .as_deref()
            .unwrap_or(DEFAULT_IDENTIFY_PATH);
        join_path(&self.base_url, path)
    }

    /// Rewrites a presigned upload URL for the configured stage.
    ///
    /// In [`Stage::Local`] the storage host is swapped for the API origin so the
    /// request goes through the dev proxy; path and query are kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL cannot be parsed.
    pub fn resolve_upload_url(&self, presigned: &str) -> Result<Url, ConfigError> {
        let target = Url::parse(presigned)?;
        match self.stage {
            Stage::Deployed => Ok(target),
            Stage::Local => {
                let base = Url::parse(&self.base_url)?;
                let mut rebased = base.join("/")?;
                rebased.set_path(target.path());
                rebased.set_query(target.query());
                Ok(rebased)
            }
        }
    }
}

fn join_path(base: &str, path: &str) -> Result<Url, ConfigError> {
    let trimmed_base = base.trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{trimmed_base}/{trimmed_path}"))?)
}
