use crate::app_config::GatewayConfig;
use atrio_core::{GatewayError, GatewayResult, ListParams};
use atrio_shared::ErrorBody;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

/// Thin HTTP wrapper around the back-office REST surface. Owns no state
/// beyond the connection pool; every call is a single request/response
/// with no retry (a timed-out create may therefore duplicate on manual
/// retry, there is no idempotency key on the wire).
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, entity: &str) -> String {
        format!("{}/api/{}", self.base_url, entity)
    }

    fn item_url(&self, entity: &str, id: Uuid) -> String {
        format!("{}/api/{}/{}", self.base_url, entity, id)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        entity: &str,
        params: &ListParams,
    ) -> GatewayResult<Vec<T>> {
        let mut query = params.query_pairs();
        // Cache-busting marker carried over from the legacy clients;
        // the service ignores it
        query.push(("_t", Utc::now().timestamp_millis().to_string()));
        let response = self
            .http
            .get(self.collection_url(entity))
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        entity: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        let response = self
            .http
            .get(self.collection_url(entity))
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, entity: &str, id: Uuid) -> GatewayResult<T> {
        let response = self
            .http
            .get(self.item_url(entity, id))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub async fn create<T, P>(&self, entity: &str, payload: &P) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.collection_url(entity))
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    /// Updates go out as `POST /api/{entity}/{id}` with a `_method=PUT`
    /// marker in the body, the spoofing convention the legacy backend
    /// established. The service also accepts a plain PUT.
    pub async fn update<T, P>(&self, entity: &str, id: Uuid, payload: &P) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = spoof_put(payload)?;
        let response = self
            .http
            .post(self.item_url(entity, id))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub async fn remove(&self, entity: &str, id: Uuid) -> GatewayResult<()> {
        let response = self
            .http
            .delete(self.item_url(entity, id))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = response.bytes().await.map_err(transport)?;
        Err(map_failure(status.as_u16(), &bytes))
    }

    pub async fn set_status<T: DeserializeOwned>(
        &self,
        entity: &str,
        id: Uuid,
        status: &str,
    ) -> GatewayResult<T> {
        let response = self
            .http
            .post(format!("{}/status", self.item_url(entity, id)))
            .json(&json!({ "status": status }))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;
    if status.is_success() {
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    } else {
        Err(map_failure(status.as_u16(), &bytes))
    }
}

/// Inject the `_method=PUT` marker into a serialized update payload.
pub(crate) fn spoof_put<P: Serialize + ?Sized>(payload: &P) -> GatewayResult<Value> {
    let mut value =
        serde_json::to_value(payload).map_err(|e| GatewayError::Decode(e.to_string()))?;
    match value.as_object_mut() {
        Some(map) => {
            map.insert("_method".to_string(), Value::String("PUT".to_string()));
            Ok(value)
        }
        None => Err(GatewayError::Decode(
            "update payload must serialize to a JSON object".to_string(),
        )),
    }
}

/// Translate a non-2xx response into the gateway error taxonomy.
pub(crate) fn map_failure(code: u16, body: &[u8]) -> GatewayError {
    tracing::debug!(code, "gateway call failed");
    if code == 404 {
        return GatewayError::NotFound;
    }
    let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.error.clone())
        .unwrap_or_else(|| "request failed".to_string());
    if code == 422 {
        return GatewayError::Validation {
            message,
            field_errors: parsed.and_then(|b| b.errors).unwrap_or_default(),
        };
    }
    GatewayError::Status { code, message }
}
