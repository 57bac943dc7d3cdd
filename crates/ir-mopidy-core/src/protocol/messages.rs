//! JSON-RPC 2.0 envelopes for the Mopidy HTTP API.
//!
//! Mopidy exposes its core API at `POST /mopidy/rpc`.  Every call is a
//! JSON-RPC 2.0 request:
//!
//! ```json
//! {"jsonrpc":"2.0","id":7,"method":"core.mixer.set_volume","params":{"volume":55}}
//! ```
//!
//! and every answer carries either a `result` or an `error` object:
//!
//! ```json
//! {"jsonrpc":"2.0","id":7,"result":null}
//! {"jsonrpc":"2.0","id":8,"error":{"code":-32601,"message":"Method not found"}}
//! ```
//!
//! A missing `result` and `"result": null` are both read as "no usable value"
//! – many Mopidy methods (`core.playback.next`, ...) return `null` on success.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only protocol version this crate speaks.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request.
///
/// `params` is omitted from the serialized form when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Builds a `"2.0"` request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ir_mopidy_core::JsonRpcRequest;
    ///
    /// let req = JsonRpcRequest::new(1, "core.playback.next", None);
    /// let text = serde_json::to_string(&req).unwrap();
    /// assert_eq!(text, r#"{"jsonrpc":"2.0","id":1,"method":"core.playback.next"}"#);
    /// ```
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// The `error` member of a failed JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC response.
///
/// All members are optional on the way in so that a sloppy server does not
/// turn into a parse failure; only the body being non-JSON (or not an object)
/// is treated as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

impl JsonRpcResponse {
    /// Builds a successful response.
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(Value::from(id)),
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    pub fn failure(id: u64, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(Value::from(id)),
            result: None,
            error: Some(error),
        }
    }

    /// Splits the response into its usable value or its error object.
    ///
    /// `Ok(None)` means the call succeeded (or at least did not report an
    /// error) but produced no value.
    pub fn into_result(self) -> Result<Option<Value>, JsonRpcError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error),
            (result, None) => Ok(result.filter(|v| !v.is_null())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_params_omits_the_member() {
        let req = JsonRpcRequest::new(3, "core.playback.get_state", None);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 3, "method": "core.playback.get_state"})
        );
    }

    #[test]
    fn test_request_with_params_serializes_object() {
        let req = JsonRpcRequest::new(4, "core.mixer.set_volume", Some(json!({"volume": 55})));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["params"], json!({"volume": 55}));
    }

    #[test]
    fn test_response_with_result_yields_value() {
        let resp: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"playing"}"#).unwrap();
        assert_eq!(resp.into_result(), Ok(Some(json!("playing"))));
    }

    #[test]
    fn test_response_with_null_result_yields_none() {
        let resp: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(resp.into_result(), Ok(None));
    }

    #[test]
    fn test_response_without_result_yields_none() {
        let resp: JsonRpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert_eq!(resp.into_result(), Ok(None));
    }

    #[test]
    fn test_response_with_error_yields_error_object() {
        // Arrange
        let body = r#"{"jsonrpc":"2.0","id":9,"error":{"code":-32601,"message":"Method not found"}}"#;

        // Act
        let resp: JsonRpcResponse = serde_json::from_str(body).unwrap();

        // Assert
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");
    }

    #[test]
    fn test_response_body_that_is_not_an_object_is_rejected() {
        let result: Result<JsonRpcResponse, _> = serde_json::from_str(r#""not an object""#);
        assert!(result.is_err());
    }
}
