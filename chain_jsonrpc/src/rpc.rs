//! Minimal JSON-RPC 2.0 client over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Bytes, U64};
use async_trait::async_trait;
use ballot_chain::{ChainError, ContractCall, ContractReader, RawLog};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    fn into_result(self) -> Result<T, ChainError> {
        if let Some(error) = self.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| ChainError::Decode("response has neither result nor error".into()))
    }
}

/// JSON-RPC client for one node endpoint.
pub struct JsonRpcClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and decode its `result`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(id, method, "json-rpc request");

        let response = self
            .http_client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(ChainError::Transport(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let envelope: RpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ChainError::Decode(format!("failed to parse {method} response: {e}")))?;
        envelope.into_result()
    }

    /// `eth_call` against the latest block.
    pub async fn eth_call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        self.request("eth_call", call_params(call)).await
    }

    /// `eth_getLogs` with a prebuilt filter object.
    pub async fn eth_get_logs(&self, filter: Value) -> Result<Vec<RawLog>, ChainError> {
        self.request("eth_getLogs", json!([filter])).await
    }

    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }
}

#[async_trait]
impl ContractReader for JsonRpcClient {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        self.eth_call(call).await
    }
}

fn call_params(call: &ContractCall) -> Value {
    json!([{ "to": call.target, "data": call.calldata }, "latest"])
}

fn transport_error(e: reqwest::Error) -> ChainError {
    if e.is_timeout() {
        ChainError::Timeout
    } else if e.is_connect() {
        ChainError::Transport(format!("connection failed: {e}"))
    } else {
        ChainError::Transport(e.to_string())
    }
}
