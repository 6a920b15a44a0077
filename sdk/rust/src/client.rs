use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /v1/update`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub path: String,
    pub value: Value,
}

/// Status and decoded JSON body of any API call.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `error` message of a failed call.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

pub struct ConfigStoreClient {
    client: Client,
    base_url: String,
}

impl ConfigStoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create or replace a config document.
    pub async fn create_config(&self, name: &str, document: &Value) -> Result<ApiResponse, reqwest::Error> {
        let resp = self.client
            .post(format!("{}/v1/config-create/{}", self.base_url, name))
            .json(document)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Read the value at `document/param1/param2`.
    pub async fn read(&self, path: &str) -> Result<ApiResponse, reqwest::Error> {
        let resp = self.client
            .get(format!("{}/v1/read/{}", self.base_url, path))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn update(&self, path: &str, value: Value) -> Result<ApiResponse, reqwest::Error> {
        let resp = self.client
            .post(format!("{}/v1/update", self.base_url))
            .json(&UpdateRequest { path: path.to_string(), value })
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Create a validator mapping parameter names to regex patterns.
    pub async fn create_validator(&self, name: &str, rules: &Value) -> Result<ApiResponse, reqwest::Error> {
        let resp = self.client
            .post(format!("{}/v1/create-validate/{}", self.base_url, name))
            .json(rules)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode(resp: reqwest::Response) -> Result<ApiResponse, reqwest::Error> {
        let status = resp.status();
        let text = resp.text().await?;
        // Non-JSON bodies (e.g. 413 from the body limit) are kept as a string.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiResponse { status, body })
    }
}
