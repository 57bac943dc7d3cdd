//! HTTP JSON-RPC client for the Mopidy API.
//!
//! Each call POSTs one JSON-RPC 2.0 request to the configured endpoint
//! (normally `http://<host>:6680/mopidy/rpc`) and returns the `result` member
//! of the response.
//!
//! # Session handling
//!
//! The underlying `reqwest::Client` keeps a connection pool.  It is created on
//! the first call and reused afterwards.  When a call fails in a way that
//! suggests the connection itself is broken (refused, timed out, reset) the
//! client is discarded and the next call starts a fresh one.
//!
//! # Error reporting
//!
//! Every failure is logged here at `warn`.  Callers only need to decide
//! whether to continue.

use std::time::Duration;

use async_trait::async_trait;
use ir_mopidy_core::{JsonRpcRequest, JsonRpcResponse, RequestIdCounter};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::application::rpc::{RpcError, RpcTransport};

/// JSON-RPC client bound to one Mopidy endpoint.
pub struct MopidyRpcClient {
    url: String,
    timeout: Duration,
    ids: RequestIdCounter,
    session: Mutex<Option<reqwest::Client>>,
}

impl MopidyRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            ids: RequestIdCounter::new(),
            session: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` while a pooled HTTP session is open.
    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Drops the pooled session.  The next call opens a new one.
    pub async fn close(&self) {
        if self.session.lock().await.take().is_some() {
            debug!("closed HTTP session to {}", self.url);
        }
    }

    async fn client(&self) -> Result<reqwest::Client, RpcError> {
        let mut session = self.session.lock().await;
        if let Some(client) = session.as_ref() {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        debug!("opened HTTP session to {}", self.url);
        *session = Some(client.clone());
        Ok(client)
    }

    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, RpcError> {
        let client = self.client().await?;

        let response = client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }

        response
            .json::<JsonRpcResponse>()
            .await
            .map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> RpcError {
        if error.is_timeout() {
            RpcError::Timeout(self.timeout)
        } else if error.is_connect() {
            RpcError::Connect {
                url: self.url.clone(),
                reason: error.to_string(),
            }
        } else if error.is_decode() {
            RpcError::Malformed(error.to_string())
        } else {
            RpcError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl RpcTransport for MopidyRpcClient {
    async fn call(&self, method: &str, params: Option<Value>) -> Result<Option<Value>, RpcError> {
        let request = JsonRpcRequest::new(self.ids.next(), method, params);
        trace!("-> {} #{}", request.method, request.id);

        let response = match self.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{method} failed: {e}");
                if e.invalidates_session() {
                    self.close().await;
                }
                return Err(e);
            }
        };

        match response.into_result() {
            Ok(result) => {
                trace!("<- #{} {result:?}", request.id);
                Ok(result)
            }
            Err(error) => {
                warn!(
                    "{method} returned JSON-RPC error {}: {}",
                    error.code, error.message
                );
                Ok(None)
            }
        }
    }
}
