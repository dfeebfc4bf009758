// m3-client/src/store/rest.rs
// HTTP document store

use super::DocumentStore;
use crate::ClientConfig;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::document::DocumentData;
use shared::{ApiResponse, Document, FieldFilter};

#[derive(Serialize)]
struct QueryBody<'a> {
    filters: &'a [FieldFilter],
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// Document store reached over the hosted REST API
///
/// Routes:
/// - `GET    /collections/{collection}/{id}`
/// - `POST   /collections/{collection}/query`
/// - `PUT    /collections/{collection}/{id}?merge=bool`
/// - `POST   /collections/{collection}`
/// - `PATCH  /collections/{collection}/{id}`
/// - `DELETE /collections/{collection}/{id}`
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestStore {
    pub fn new(config: &ClientConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, collection: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/collections/{}/{}", self.base_url, collection, id),
            None => format!("{}/collections/{}", self.base_url, collection),
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> StoreResult<Option<T>> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let response = req.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied(text),
                StatusCode::NOT_FOUND => StoreError::NotFound(text),
                _ => StoreError::Unreachable(format!("{status}: {text}")),
            });
        }

        let body: ApiResponse<T> = response.json().await.map_err(transport_error)?;
        body.into_result().map_err(StoreError::Unreachable)
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_connect() || err.is_timeout() {
        StoreError::Unreachable(err.to_string())
    } else {
        StoreError::Http(err)
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let req = self.client.get(self.url(collection, Some(id)));
        match self.send::<Document>(req).await {
            Err(StoreError::NotFound(_)) => Ok(None),
            other => other,
        }
    }

    async fn query(&self, collection: &str, filters: &[FieldFilter]) -> StoreResult<Vec<Document>> {
        let url = format!("{}/query", self.url(collection, None));
        let req = self.client.post(url).json(&QueryBody { filters });
        Ok(self.send::<Vec<Document>>(req).await?.unwrap_or_default())
    }

    async fn set(&self, collection: &str, id: &str, data: DocumentData, merge: bool) -> StoreResult<()> {
        let req = self
            .client
            .put(self.url(collection, Some(id)))
            .query(&[("merge", merge)])
            .json(&data);
        self.send::<serde_json::Value>(req).await?;
        Ok(())
    }

    async fn add(&self, collection: &str, data: DocumentData) -> StoreResult<String> {
        let req = self.client.post(self.url(collection, None)).json(&data);
        self.send::<Created>(req)
            .await?
            .map(|c| c.id)
            .ok_or_else(|| StoreError::Unreachable("missing id in create response".into()))
    }

    async fn update(&self, collection: &str, id: &str, data: DocumentData) -> StoreResult<()> {
        let req = self.client.patch(self.url(collection, Some(id))).json(&data);
        self.send::<serde_json::Value>(req).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let req = self.client.delete(self.url(collection, Some(id)));
        match self.send::<serde_json::Value>(req).await {
            Ok(_) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let store = RestStore::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8080");
        assert_eq!(
            store.url("carts/u1/items", Some("p1")),
            "http://localhost:8080/collections/carts/u1/items/p1"
        );
        assert_eq!(store.url("orders", None), "http://localhost:8080/collections/orders");
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Nothing listens on port 9 (discard) in the test environment
        let store = RestStore::new(&ClientConfig::new("http://127.0.0.1:9").with_timeout(2)).unwrap();
        let err = store.query("products", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Unreachable(_)));
    }
}
