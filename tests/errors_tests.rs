use std::error::Error;

use plant_identify::errors::{ClientError, ConfigError, ControllerError, ValidationError};

#[test]
fn test_errors_implement_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    assert_error(&ValidationError::InvalidFileType);
    assert_error(&ClientError::NoPlantFound);
    assert_error(&ControllerError::Busy);
    assert_error(&ConfigError::Missing("PLANT_API_URL"));
}

#[test]
fn test_client_error_display_is_the_message() {
    let error = ClientError::PresignFailed("Bucket offline".to_string());
    assert_eq!(format!("{error}"), "Bucket offline");

    let error = ClientError::IdentifyFailed("Image is too blurry".to_string());
    assert_eq!(format!("{error}"), "Image is too blurry");

    assert_eq!(
        format!("{}", ClientError::NoPlantFound),
        "No plant identified in the response."
    );
}

#[test]
fn test_user_message_falls_back_when_empty() {
    assert_eq!(
        ClientError::UploadFailed("  ".to_string()).user_message(),
        "We were unable to identify your plant. Try again."
    );
    assert_eq!(
        ClientError::UploadFailed("Upload rejected".to_string()).user_message(),
        "Upload rejected"
    );
}

#[test]
fn test_error_from_conversions() {
    let err: ControllerError = ValidationError::InvalidFileType.into();
    assert_eq!(err, ControllerError::Invalid(ValidationError::InvalidFileType));
    assert_eq!(err.to_string(), "Please choose a JPG image file.");

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let client_err: ClientError = json_err.into();
    assert!(matches!(client_err, ClientError::Unknown(_)));

    let config_err: ConfigError = url::Url::parse("nope").unwrap_err().into();
    assert!(matches!(config_err, ConfigError::InvalidUrl(_)));
    let client_err: ClientError = config_err.into();
    assert!(matches!(client_err, ClientError::Unknown(_)));

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> ClientError {
        ClientError::from(err)
    }
}
