use alloy::{
    primitives::{Address, B256, TxHash, U256},
    providers::Provider,
    rpc::types::{BlockNumberOrTag, TransactionRequest},
    sol,
};
use async_trait::async_trait;
use error_stack::{ResultExt, report};
use tracing::debug;

use super::{BlockClock, TokenReader, TransactionSubmitter};
use crate::error::{Error, SdkResult};

sol! {
    #[sol(rpc)]
    interface IERC2612 {
        function name() external view returns (string);
        function nonces(address owner) external view returns (uint256);
        function version() external view returns (string);
        function DOMAIN_SEPARATOR() external view returns (bytes32);
    }

    #[sol(rpc)]
    interface ILegacyPermitToken {
        function _nonces(address owner) external view returns (uint256);
    }
}

/// Every chain collaborator backed by one alloy provider.
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    provider: P,
}

impl<P: Provider> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

fn rpc_error(call: &str, token: Address) -> Error {
    Error::RpcError(format!("{call} failed for token {token}"))
}

#[async_trait]
impl<P: Provider + Send + Sync> TokenReader for RpcChain<P> {
    async fn name(&self, token: Address) -> SdkResult<String> {
        IERC2612::new(token, &self.provider)
            .name()
            .call()
            .await
            .map_err(|e| report!(rpc_error("name()", token)).attach_printable(e.to_string()))
    }

    async fn nonces(&self, token: Address, owner: Address) -> SdkResult<U256> {
        IERC2612::new(token, &self.provider)
            .nonces(owner)
            .call()
            .await
            .map_err(|e| report!(rpc_error("nonces()", token)).attach_printable(e.to_string()))
    }

    async fn legacy_nonces(&self, token: Address, owner: Address) -> SdkResult<U256> {
        ILegacyPermitToken::new(token, &self.provider)
            ._nonces(owner)
            .call()
            .await
            .map_err(|e| report!(rpc_error("_nonces()", token)).attach_printable(e.to_string()))
    }

    async fn version(&self, token: Address) -> SdkResult<String> {
        IERC2612::new(token, &self.provider)
            .version()
            .call()
            .await
            .map_err(|e| report!(rpc_error("version()", token)).attach_printable(e.to_string()))
    }

    async fn domain_separator(&self, token: Address) -> SdkResult<B256> {
        IERC2612::new(token, &self.provider)
            .DOMAIN_SEPARATOR()
            .call()
            .await
            .map_err(|e| {
                report!(rpc_error("DOMAIN_SEPARATOR()", token)).attach_printable(e.to_string())
            })
    }
}

#[async_trait]
impl<P: Provider + Send + Sync> BlockClock for RpcChain<P> {
    async fn latest_block_timestamp(&self) -> SdkResult<u64> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .change_context(Error::RpcError("Failed to fetch latest block".to_string()))?
            .ok_or_else(|| report!(Error::RpcError("Latest block not found".to_string())))?;
        Ok(block.header.timestamp)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync> TransactionSubmitter for RpcChain<P> {
    async fn submit(&self, tx: TransactionRequest) -> SdkResult<TxHash> {
        debug!("Submitting transaction to {:?}", tx.to);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| report!(Error::SubmissionError(e.to_string())))?;
        Ok(*pending.tx_hash())
    }
}
