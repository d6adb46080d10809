//! Read-only chain access
//!
//! The engine consumes exactly one capability from its environment:
//! executing a read-only call against deployed contract code. [`EthCall`]
//! is that seam; [`Web3EthClient`] is the production implementation and
//! tests substitute canned transports. No write access, signing, or
//! transaction submission lives anywhere in this crate.

use std::time::Duration;

use async_trait::async_trait;
use web3::transports::Http;
use web3::types::{Address, Bytes, CallRequest};
use web3::Web3;

use crate::error::ChainError;

/// Read-only contract invocation against the latest block.
#[async_trait]
pub trait EthCall: Send + Sync {
    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError>;
}

/// JSON-RPC implementation over an HTTP transport with connection reuse.
pub struct Web3EthClient {
    web3: Web3<Http>,
    timeout: Duration,
}

impl Web3EthClient {
    /// Build a client for `rpc_url` with keep-alive connection pooling and
    /// a per-call timeout.
    pub fn new(rpc_url: &str, rpc_timeout_ms: u64) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_millis(rpc_timeout_ms))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ChainError::Rpc(format!("failed to build http client: {e}")))?;

        let url = rpc_url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid rpc url: {e}")))?;
        let transport = Http::with_client(client, url);

        Ok(Self {
            web3: Web3::new(transport),
            timeout: Duration::from_millis(rpc_timeout_ms),
        })
    }
}

#[async_trait]
impl EthCall for Web3EthClient {
    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        let request = CallRequest {
            to: Some(to),
            data: Some(Bytes(data)),
            ..Default::default()
        };

        match tokio::time::timeout(self.timeout, self.web3.eth().call(request, None)).await {
            Ok(Ok(bytes)) => Ok(bytes.0),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}
