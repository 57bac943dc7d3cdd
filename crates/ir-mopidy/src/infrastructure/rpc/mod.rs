//! JSON-RPC transport to the Mopidy HTTP API.
//!
//! [`http_client::MopidyRpcClient`] implements
//! [`crate::application::rpc::RpcTransport`] on top of `reqwest`, reusing one
//! pooled HTTP session across calls.

pub mod http_client;

pub use http_client::MopidyRpcClient;
