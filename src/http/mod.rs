pub mod error;
pub mod transport;

use std::sync::Arc;

use reqwest::{Method, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    auth::CredentialResolver,
    http::{
        error::ApiError,
        transport::{HttpRequest, Transport},
    },
    player::commands::PlayerOperation,
};

pub struct PlayerClient {
    resolver: CredentialResolver,
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl PlayerClient {
    pub fn new(
        resolver: CredentialResolver,
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    pub async fn request(
        &self,
        operation: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let credential = self.resolver.resolve().await?;
        let url = self.build_url(operation, credential.device_id.as_deref())?;

        debug!("{} {}", method, url.path());

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                bearer: credential.access_token,
                body: body.map(|b| b.to_string().into_bytes()),
            })
            .await?;

        if response.status == StatusCode::NO_CONTENT {
            return Ok(empty_object());
        }

        let value = match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => value,
            Err(e) => {
                debug!("Undecodable body ({}): {e}", response.status);
                empty_object()
            }
        };

        if !response.status.is_success() {
            if let Some(message) = error_message(&value) {
                warn!("Spotify API error ({}): {}", response.status, message);
                return Err(ApiError::Remote {
                    status: response.status.as_u16(),
                    message,
                });
            }
        }

        Ok(value)
    }

    pub async fn perform(&self, operation: PlayerOperation) -> Result<Value, ApiError> {
        self.request(operation.path(), operation.method(), None).await
    }

    pub async fn current_state(&self) -> Result<Value, ApiError> {
        self.perform(PlayerOperation::State).await
    }

    fn build_url(&self, operation: &str, device_id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, operation))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        if let Some(device_id) = device_id {
            if !url.query_pairs().any(|(key, _)| key == "device_id") {
                url.query_pairs_mut().append_pair("device_id", device_id);
            }
        }

        Ok(url)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Extracts the message of Spotify's `{"error": ...}` envelope, which comes
/// either as `{status, message}` or as an OAuth style string.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Object(error) => Some(
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        ),
        Value::String(code) => Some(
            body.get("error_description")
                .and_then(Value::as_str)
                .unwrap_or(code)
                .to_string(),
        ),
        _ => None,
    }
}
