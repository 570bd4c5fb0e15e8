//! `reqwest` implementation of [`PlantCareClient`].

use async_trait::async_trait;
use plantcare_core::analysis::AnalysisResult;
use plantcare_core::client::{ChatReply, ChatTurn, ClientError, ImageUpload, PlantCareClient};
use plantcare_core::config::ClientConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

const CHAT_PATH: &str = "api/chat";
const ANALYZE_PATH: &str = "api/analyze-plant";
const HEALTH_PATH: &str = "api/health";
const CAPABILITIES_PATH: &str = "api/capabilities";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatTurn],
}

/// HTTP client for the plant-care backend.
///
/// One attempt per call; the configured timeout covers the whole request.
#[derive(Debug, Clone)]
pub struct HttpPlantCareClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpPlantCareClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(self.config.endpoint(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode_body(check_status(response).await?).await
    }
}

#[async_trait]
impl PlantCareClient for HttpPlantCareClient {
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply, ClientError> {
        let url = self.config.endpoint(CHAT_PATH);
        tracing::debug!(url = %url, history = history.len(), "POST chat");

        let response = self
            .http
            .post(url)
            .json(&ChatRequest { message, history })
            .send()
            .await
            .map_err(transport_error)?;
        decode_body(check_status(response).await?).await
    }

    async fn analyze_plant(
        &self,
        image: &ImageUpload,
        user_actions: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let path = local_path(&image.uri);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ClientError::Image(format!("{}: {}", path.display(), e)))?;

        let part = Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::Image(format!("Invalid MIME type '{}': {}", image.mime_type, e)))?;
        let form = Form::new()
            .part("image", part)
            .text("user_actions", user_actions.to_string());

        let url = self.config.endpoint(ANALYZE_PATH);
        tracing::debug!(url = %url, image = %path.display(), "POST analyze-plant");

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        decode_body(check_status(response).await?).await
    }

    async fn health(&self) -> Result<Value, ClientError> {
        self.get_json(HEALTH_PATH).await
    }

    async fn capabilities(&self) -> Result<Value, ClientError> {
        self.get_json(CAPABILITIES_PATH).await
    }
}

/// Accepts `file:///abs/path` URIs as well as plain paths.
fn local_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

/// Passes 2xx responses through; maps 503 and other statuses to errors.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let payload = response.json::<Value>().await.unwrap_or(Value::Null);
    let message = error_message(status, &payload);
    tracing::debug!(status = status.as_u16(), "Service returned error: {}", message);

    if status == StatusCode::SERVICE_UNAVAILABLE {
        Err(ClientError::Unavailable(message))
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn error_message(status: StatusCode, payload: &Value) -> String {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_path_strips_file_scheme() {
        assert_eq!(local_path("file:///tmp/img1.jpg"), PathBuf::from("/tmp/img1.jpg"));
        assert_eq!(local_path("photos/img1.jpg"), PathBuf::from("photos/img1.jpg"));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let payload = json!({"detail": "Servicio en mantenimiento", "error": "x"});
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, &payload),
            "Servicio en mantenimiento"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, &Value::Null),
            "Request failed with status 502"
        );
    }
}
