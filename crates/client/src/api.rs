use async_trait::async_trait;
use marquee_catalog::{FieldErrors, Movie, MovieDraft};
use thiserror::Error;

/// The five catalog operations as seen from a client.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Movie>, ClientError>;

    async fn get(&self, id: &str) -> Result<Movie, ClientError>;

    async fn create(&self, draft: &MovieDraft) -> Result<Movie, ClientError>;

    async fn update(&self, id: &str, draft: &MovieDraft) -> Result<Movie, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// Failures a client call can end with.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("movie not found")]
    NotFound,

    /// The service refused the request; `fields` holds any per-field reasons.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        fields: FieldErrors,
    },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid API base URL: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a non-success response from its status and JSON error body.
    pub fn from_response(status: u16, body: &serde_json::Value) -> Self {
        let message = ["error", "message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|value| value.as_str()))
            .unwrap_or("no error message")
            .to_string();

        match status {
            404 => ClientError::NotFound,
            400..=499 => {
                let fields = body
                    .get("details")
                    .and_then(|details| details.as_array())
                    .map(|details| FieldErrors::from_details(details))
                    .unwrap_or_default();
                ClientError::Rejected {
                    status,
                    message,
                    fields,
                }
            }
            _ => ClientError::Server { status, message },
        }
    }
}
