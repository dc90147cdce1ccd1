//! On-chain collaborators the SDK talks to through traits, so signing and
//! dispatch can run against mocks in tests and a real provider in production.

pub mod rpc;

use alloy::{
    primitives::{Address, B256, TxHash, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::error::SdkResult;

pub use rpc::RpcChain;

/// Read-only token calls needed to build a permit.
#[async_trait]
pub trait TokenReader: Send + Sync {
    async fn name(&self, token: Address) -> SdkResult<String>;

    /// EIP-2612 `nonces(owner)`.
    async fn nonces(&self, token: Address, owner: Address) -> SdkResult<U256>;

    /// `_nonces(owner)`, exposed by some older permit tokens.
    async fn legacy_nonces(&self, token: Address, owner: Address) -> SdkResult<U256>;

    async fn version(&self, token: Address) -> SdkResult<String>;

    async fn domain_separator(&self, token: Address) -> SdkResult<B256>;
}

#[async_trait]
pub trait BlockClock: Send + Sync {
    /// Timestamp of the latest block, in seconds.
    async fn latest_block_timestamp(&self) -> SdkResult<u64>;
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(&self, tx: TransactionRequest) -> SdkResult<TxHash>;
}
