#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plant_identify::clients::IdentifyClient;
use plant_identify::clients::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use plant_identify::core::config::ClientConfig;
use plant_identify::core::models::{Identification, Photo};
use serde_json::{Value, json};

pub const BASE_URL: &str = "https://api.example.com";

/// Transport that answers from a script and records every request it sees.
/// Running out of script is reported as a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, status: u16, body: Value) -> Arc<Self> {
        self.reply_raw(status, body.to_string().into_bytes())
    }

    pub fn reply_raw(self: &Arc<Self>, status: u16, body: Vec<u8>) -> Arc<Self> {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body }));
        Arc::clone(self)
    }

    pub fn fail(self: &Arc<Self>, reason: &str) -> Arc<Self> {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError(reason.to_string())));
        Arc::clone(self)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

pub fn client_with(config: ClientConfig, transport: &Arc<ScriptedTransport>) -> IdentifyClient {
    let transport: Arc<dyn HttpTransport> = transport.clone();
    IdentifyClient::with_transport(config, transport)
}

pub fn client(transport: &Arc<ScriptedTransport>) -> IdentifyClient {
    client_with(ClientConfig::new(BASE_URL), transport)
}

pub fn jpeg(name: &str, size: usize) -> Photo {
    Photo::new(name, "image/jpeg", vec![0xAB; size])
}

pub fn monstera_json() -> Value {
    json!({
        "name": "Monstera",
        "scientific_name": "Monstera deliciosa",
        "sunlight_preference": "Bright indirect",
        "watering_frequency_days": 7,
        "current_condition": "Healthy",
        "care_notes": "Wipe leaves weekly."
    })
}

pub fn monstera() -> Identification {
    Identification {
        name: "Monstera".into(),
        scientific_name: "Monstera deliciosa".into(),
        sunlight_preference: "Bright indirect".into(),
        watering_frequency_days: 7,
        current_condition: "Healthy".into(),
        care_notes: "Wipe leaves weekly.".into(),
    }
}

/// Script for a fully successful identify run.
pub fn happy_path() -> Arc<ScriptedTransport> {
    ScriptedTransport::new()
        .reply(200, json!({ "url": "https://store/x", "key": "k1" }))
        .reply_raw(200, Vec::new())
        .reply(200, json!({ "result": { "plant": monstera_json() } }))
}
