//! reqwest-backed [`MovieApi`] implementation.

use async_trait::async_trait;
use marquee_catalog::{Movie, MovieDraft};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::api::{ClientError, MovieApi};
use crate::config::ClientConfig;

/// HTTP client for the catalog service.
#[derive(Clone)]
pub struct MovieClient {
    http: reqwest::Client,
    base: Url,
}

impl MovieClient {
    /// Build a client for `config.base_url`. No request is sent.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|err| ClientError::Config(format!("{}: {}", config.base_url, err)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/movies` or `{base}/movies/{id}`, with the id percent-encoded.
    fn endpoint(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config(self.base.to_string()))?;
            segments.pop_if_empty().push("movies");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, id: Option<&str>) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.endpoint(id)?))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ClientError::Decode(err.to_string()));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        tracing::debug!(status = status.as_u16(), %body, "catalog request failed");
        Err(ClientError::from_response(status.as_u16(), &body))
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn list(&self) -> Result<Vec<Movie>, ClientError> {
        self.send(self.request(Method::GET, None)?).await
    }

    async fn get(&self, id: &str) -> Result<Movie, ClientError> {
        self.send(self.request(Method::GET, Some(id))?).await
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie, ClientError> {
        self.send(self.request(Method::POST, None)?.json(draft)).await
    }

    async fn update(&self, id: &str, draft: &MovieDraft) -> Result<Movie, ClientError> {
        self.send(self.request(Method::PUT, Some(id))?.json(draft))
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self.send(self.request(Method::DELETE, Some(id))?).await?;
        Ok(())
    }
}
