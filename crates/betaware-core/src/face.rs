//! Client for the face-recognition service.
//!
//! The service is separate from the REST API and has no offline fallback.

use std::time::Duration;

use reqwest::{multipart, Client, Request};
use serde::Deserialize;
use thiserror::Error;

use crate::util::normalize_base_url;

/// Base URL used when nothing is configured
pub const DEFAULT_FACE_API_BASE_URL: &str = "http://localhost:5000/api";

const DEFAULT_FILE_NAME: &str = "face.jpg";
const DEFAULT_MIME_TYPE: &str = "image/jpeg";
const AUTH_FAILED: &str = "Face authentication failed";

#[derive(Debug, Error)]
pub enum FaceAuthError {
    #[error("Could not connect to the face service")]
    Unreachable(#[source] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid face service configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid face image: {0}")]
    InvalidImage(String),
    #[error("Unexpected face service response: {0}")]
    InvalidResponse(String),
}

pub type FaceAuthResult<T> = Result<T, FaceAuthError>;

/// Captured picture to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl FaceImage {
    /// A JPEG named `face.jpg`
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: DEFAULT_FILE_NAME.to_string(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }

    /// Guess the MIME type from the file extension, defaulting to JPEG when
    /// the extension is unknown or not an image type.
    pub fn from_file_name(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .map_or_else(
                || DEFAULT_MIME_TYPE.to_string(),
                |mime| mime.essence_str().to_string(),
            );
        Self {
            bytes,
            file_name,
            mime_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FaceAuthResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FaceAuthClient {
    base_url: String,
    client: Client,
}

impl FaceAuthClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> FaceAuthResult<Self> {
        let base_url =
            normalize_base_url(base_url.as_ref()).map_err(FaceAuthError::InvalidConfiguration)?;
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            FaceAuthError::InvalidConfiguration(format!("Failed to construct HTTP client: {error}"))
        })?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Enroll a face for `username`. Returns the username on success.
    pub async fn register_face(&self, username: &str, image: FaceImage) -> FaceAuthResult<String> {
        let request = self.build_request("/register-face", Some(username), image)?;
        let response = self.execute(request).await?;
        if response.success {
            tracing::info!("Registered face for {}", username);
            Ok(username.to_string())
        } else {
            Err(rejected(response.message))
        }
    }

    /// Identify the user in `image`. Returns the recognized username.
    pub async fn face_login(
        &self,
        username: Option<&str>,
        image: FaceImage,
    ) -> FaceAuthResult<String> {
        let request = self.build_request("/face-login", username, image)?;
        let response = self.execute(request).await?;
        match response {
            FaceAuthResponse {
                success: true,
                user_name: Some(user_name),
                ..
            } => Ok(user_name),
            FaceAuthResponse { success: true, .. } => Err(FaceAuthError::InvalidResponse(
                "missing user_name".to_string(),
            )),
            FaceAuthResponse { message, .. } => Err(rejected(message)),
        }
    }

    fn build_request(
        &self,
        route: &str,
        username: Option<&str>,
        image: FaceImage,
    ) -> FaceAuthResult<Request> {
        if image.bytes.is_empty() {
            return Err(FaceAuthError::InvalidImage("image is empty".to_string()));
        }

        let file_part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|error| FaceAuthError::InvalidImage(error.to_string()))?;

        let mut form = multipart::Form::new().part("file", file_part);
        if let Some(username) = username.map(str::trim).filter(|name| !name.is_empty()) {
            form = form.text("username", username.to_string());
        }

        self.client
            .post(format!("{}{}", self.base_url, route))
            .multipart(form)
            .build()
            .map_err(|error| FaceAuthError::InvalidConfiguration(error.to_string()))
    }

    async fn execute(&self, request: Request) -> FaceAuthResult<FaceAuthResponse> {
        tracing::debug!("Face service request: {} {}", request.method(), request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(FaceAuthError::Unreachable)?;
        let body = response.text().await.map_err(FaceAuthError::Unreachable)?;
        serde_json::from_str(&body).map_err(|error| FaceAuthError::InvalidResponse(error.to_string()))
    }
}

fn rejected(message: Option<String>) -> FaceAuthError {
    FaceAuthError::Rejected(
        crate::util::normalize_text_option(message).unwrap_or_else(|| AUTH_FAILED.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FaceAuthClient {
        FaceAuthClient::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap()
    }

    fn content_type(request: &Request) -> String {
        request
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn register_request_is_multipart_post() {
        let request = client()
            .build_request("/register-face", Some("maria"), FaceImage::jpeg(vec![1, 2, 3]))
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/api/register-face"
        );
        assert!(content_type(&request).starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn empty_image_is_rejected_before_sending() {
        let error = client()
            .build_request("/face-login", None, FaceImage::jpeg(Vec::new()))
            .unwrap_err();
        assert!(matches!(error, FaceAuthError::InvalidImage(_)));
    }

    #[test]
    fn invalid_base_url_is_configuration_error() {
        let error = FaceAuthClient::new("localhost:5000", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(error, FaceAuthError::InvalidConfiguration(_)));
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(FaceImage::from_file_name(vec![1], "me.PNG").mime_type, "image/png");
        assert_eq!(FaceImage::from_file_name(vec![1], "me.jpeg").mime_type, "image/jpeg");
        assert_eq!(FaceImage::from_file_name(vec![1], "me.gif").mime_type, "image/gif");
        assert_eq!(FaceImage::from_file_name(vec![1], "me.bmp").mime_type, "image/bmp");
        assert_eq!(FaceImage::from_file_name(vec![1], "capture").mime_type, "image/jpeg");
        // Known but non-image extensions still upload as JPEG
        assert_eq!(FaceImage::from_file_name(vec![1], "notes.txt").mime_type, "image/jpeg");
    }

    #[test]
    fn rejection_uses_server_message_or_default() {
        assert_eq!(
            rejected(Some("Face not recognized".to_string())).to_string(),
            "Face not recognized"
        );
        assert_eq!(rejected(None).to_string(), AUTH_FAILED);
        assert_eq!(rejected(Some("  ".to_string())).to_string(), AUTH_FAILED);
    }

    #[test]
    fn response_parses_with_optional_fields() {
        let response: FaceAuthResponse =
            serde_json::from_str(r#"{"success": true, "user_name": "maria"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.user_name.as_deref(), Some("maria"));
        assert_eq!(response.message, None);
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_unreachable() {
        let client = FaceAuthClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let error = client
            .face_login(None, FaceImage::jpeg(vec![0xFF, 0xD8]))
            .await
            .unwrap_err();
        assert!(matches!(error, FaceAuthError::Unreachable(_)));
        assert_eq!(error.to_string(), "Could not connect to the face service");
    }
}
