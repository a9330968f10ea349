//! Transport to the record service

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Deserialize};

use crate::app::foods::model::{Food, FoodId, FoodPatch, NewFood};
use crate::core::error::NOT_CONFIGURED_ERROR;

/// Failure body returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("server responded {status}: {}", body.error)]
    Api { status: u16, body: ApiErrorBody },
}

impl ClientError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ClientError::Api { body, .. } if body.error == NOT_CONFIGURED_ERROR)
    }
}

#[async_trait]
pub trait FoodsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Food>, ClientError>;

    async fn create(&self, food: &NewFood) -> Result<Food, ClientError>;

    async fn update(&self, id: FoodId, patch: &FoodPatch) -> Result<(), ClientError>;

    async fn delete(&self, id: FoodId) -> Result<(), ClientError>;
}

/// `FoodsApi` over HTTP, against the `/api/foods` routes.
#[derive(Clone)]
pub struct HttpFoodsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFoodsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/foods", self.base_url)
    }

    fn item_url(&self, id: FoodId) -> String {
        format!("{}/api/foods/{}", self.base_url, id)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Connection(e.to_string()));
        }

        let body = response
            .json::<ApiErrorBody>()
            .await
            .unwrap_or_else(|_| ApiErrorBody {
                error: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                message: None,
                details: None,
            });
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl FoodsApi for HttpFoodsClient {
    async fn list(&self) -> Result<Vec<Food>, ClientError> {
        Self::send(self.http.get(self.collection_url())).await
    }

    async fn create(&self, food: &NewFood) -> Result<Food, ClientError> {
        Self::send(self.http.post(self.collection_url()).json(food)).await
    }

    async fn update(&self, id: FoodId, patch: &FoodPatch) -> Result<(), ClientError> {
        Self::send::<serde_json::Value>(self.http.put(self.item_url(id)).json(patch))
            .await
            .map(|_| ())
    }

    async fn delete(&self, id: FoodId) -> Result<(), ClientError> {
        Self::send::<serde_json::Value>(self.http.delete(self.item_url(id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(error: &str) -> ClientError {
        ClientError::Api {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            body: ApiErrorBody {
                error: error.to_string(),
                message: None,
                details: None,
            },
        }
    }

    #[test]
    fn recognises_not_configured() {
        assert!(api_error(NOT_CONFIGURED_ERROR).is_not_configured());
        assert!(!api_error("Failed to fetch foods").is_not_configured());
        assert!(!ClientError::Connection("refused".into()).is_not_configured());
    }

    #[test]
    fn urls_drop_trailing_slash() {
        let client = HttpFoodsClient::new("http://localhost:3000/");
        let id = FoodId::new();
        assert_eq!(client.collection_url(), "http://localhost:3000/api/foods");
        assert_eq!(client.item_url(id), format!("http://localhost:3000/api/foods/{}", id));
    }
}
