//! The JSON-RPC seam between actions and the Mopidy server.
//!
//! Actions never see HTTP.  They call [`RpcTransport::call`] with a Mopidy
//! method name and optional params; the infrastructure layer provides the
//! HTTP implementation and tests provide recording doubles.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure of a single JSON-RPC call.
///
/// None of these are fatal: the calling action logs and gives up, and the
/// translator goes on reading key events.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The server could not be reached (refused, unreachable, DNS, ...).
    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// No complete response arrived within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx HTTP status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The response body was not a JSON-RPC response object.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RpcError {
    /// Returns `true` when the pooled HTTP session should be rebuilt before
    /// the next call.
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self,
            RpcError::Connect { .. } | RpcError::Timeout(_) | RpcError::Transport(_)
        )
    }
}

/// Sends one JSON-RPC request and returns its `result`.
///
/// `Ok(None)` means the call went through but produced no usable value
/// (`null` result, missing result, or a JSON-RPC error object).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Option<Value>) -> Result<Option<Value>, RpcError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_invalidate_session() {
        let err = RpcError::Connect {
            url: "http://localhost:6680/mopidy/rpc".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.invalidates_session());
        assert!(RpcError::Timeout(Duration::from_secs(5)).invalidates_session());
    }

    #[test]
    fn test_protocol_failures_keep_session() {
        assert!(!RpcError::Status(500).invalidates_session());
        assert!(!RpcError::Malformed("expected value".to_string()).invalidates_session());
    }

    #[test]
    fn test_error_messages_are_readable() {
        assert_eq!(RpcError::Status(502).to_string(), "server returned HTTP 502");
        assert_eq!(
            RpcError::Timeout(Duration::from_millis(250)).to_string(),
            "request timed out after 250ms"
        );
    }
}
