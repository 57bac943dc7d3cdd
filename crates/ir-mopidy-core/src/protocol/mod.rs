//! Protocol module containing the JSON-RPC envelopes and the request-id counter.

pub mod messages;
pub mod request_id;

pub use messages::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
pub use request_id::RequestIdCounter;
