//! Turns a quote into a router call, signing a permit first when asked to.

pub mod referrer;
pub mod router;

use alloy::{
    hex,
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
    signers::Signer,
    sol_types::SolCall,
};
use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use strum_macros::{AsRefStr, Display};
use swap_models::{
    constants::{
        addresses::AddressRegistry,
        chains::{ChainId, is_native_asset_address},
        tokens::PERMIT_EXPIRATION_SECS,
    },
    models::quote::{CrosschainQuote, Quote},
};
use tracing::{debug, info};

use crate::{
    chain::{BlockClock, TokenReader, TransactionSubmitter},
    error::{Error, SdkResult},
    permit::{PermitRequest, sign_permit},
    sanity::{check_address, check_swap_type},
};
use referrer::append_referrer;
use router::{IRainbowRouter, RouterPermit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum RouterMethod {
    FillQuoteEthToToken,
    FillQuoteTokenToEth,
    FillQuoteTokenToEthWithPermit,
    FillQuoteTokenToToken,
    FillQuoteTokenToTokenWithPermit,
    /// Bridge call sent straight to the quote's target.
    CrosschainSwap,
    Deposit,
    Withdraw,
    WithdrawToken,
    WithdrawEth,
    UpdateSwapTargets,
    TransferOwnership,
}

/// Caller-provided overrides, left to the wallet when unset.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOptions {
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub nonce: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    pub method: RouterMethod,
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl PreparedCall {
    pub fn into_transaction_request(self, options: &TransactionOptions) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_input(self.data)
            .with_value(self.value);
        if let Some(gas_limit) = options.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }
        if let Some(max_fee) = options.max_fee_per_gas {
            tx = tx.with_max_fee_per_gas(max_fee);
        }
        if let Some(priority_fee) = options.max_priority_fee_per_gas {
            tx = tx.with_max_priority_fee_per_gas(priority_fee);
        }
        if let Some(nonce) = options.nonce {
            tx = tx.with_nonce(nonce);
        }
        tx
    }
}

pub(crate) fn parse_address(address: &str, field: &str) -> SdkResult<Address> {
    address
        .trim()
        .parse()
        .map_err(|_| report!(Error::InvalidAddress(format!("{field}: {address}"))))
}

fn decode_calldata(data: Option<&str>) -> SdkResult<Vec<u8>> {
    match data {
        None => Ok(Vec::new()),
        Some(data) => hex::decode(data)
            .change_context(Error::InvalidRequest("quote data is not hex".to_string())),
    }
}

/// Sanity check plus the parts every outgoing call shares.
fn checked_target(quote: &Quote, is_cross_chain: bool) -> SdkResult<(Address, Address)> {
    check_address(quote.to.as_deref()).map_err(|e| report!(Error::from(e)))?;
    check_swap_type(quote.swap_type, is_cross_chain)?;

    let target = parse_address(quote.to.as_deref().unwrap_or_default(), "to")?;
    let from = parse_address(&quote.from, "from")?;
    Ok((from, target))
}

/// The quote's own target, data and value, for bridge executions.
pub fn prepare_crosschain_call(
    quote: &CrosschainQuote,
    referrer: Option<&str>,
) -> SdkResult<PreparedCall> {
    let quote = &quote.quote;
    let (from, target) = checked_target(quote, true)?;
    let data = decode_calldata(quote.data.as_deref())?;

    Ok(PreparedCall {
        method: RouterMethod::CrosschainSwap,
        from,
        to: target,
        data: append_referrer(data, referrer),
        value: quote.value.unwrap_or(U256::ZERO),
    })
}

pub struct FillDispatcher<C> {
    chain: C,
    registry: &'static AddressRegistry,
}

impl<C> FillDispatcher<C> {
    pub fn new(chain: C) -> Self {
        Self::with_registry(chain, AddressRegistry::global())
    }

    pub fn with_registry(chain: C, registry: &'static AddressRegistry) -> Self {
        Self { chain, registry }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }
}

impl<C: TokenReader + BlockClock> FillDispatcher<C> {
    /// Picks the router method from the quote's shape. Passing a signer
    /// asks for a permit on token sells.
    pub async fn prepare_fill<S>(
        &self,
        quote: &Quote,
        chain_id: ChainId,
        permit_signer: Option<&S>,
        referrer: Option<&str>,
    ) -> SdkResult<PreparedCall>
    where
        S: Signer + Send + Sync + ?Sized,
    {
        let (from, target) = checked_target(quote, false)?;
        let swap_call_data = Bytes::from(decode_calldata(quote.data.as_deref())?);
        let value = quote.value.unwrap_or(U256::ZERO);
        let router = self.registry.router_address(chain_id);

        let (method, calldata) = if is_native_asset_address(&quote.sell_token_address) {
            let call = IRainbowRouter::fillQuoteEthToTokenCall {
                buyTokenAddress: parse_address(&quote.buy_token_address, "buyTokenAddress")?,
                target,
                swapCallData: swap_call_data,
                feeAmount: quote.fee,
            };
            (RouterMethod::FillQuoteEthToToken, call.abi_encode())
        } else {
            let sell_token = parse_address(&quote.sell_token_address, "sellTokenAddress")?;
            let permit = match permit_signer {
                Some(signer) => Some(
                    self.router_permit(sell_token, from, router, chain_id, signer)
                        .await?,
                ),
                None => None,
            };

            if is_native_asset_address(&quote.buy_token_address) {
                let fee_bps = U256::from(quote.fee_percentage_basis_points);
                match permit {
                    Some(permit) => (
                        RouterMethod::FillQuoteTokenToEthWithPermit,
                        IRainbowRouter::fillQuoteTokenToEthWithPermitCall {
                            sellTokenAddress: sell_token,
                            target,
                            swapCallData: swap_call_data,
                            sellAmount: quote.sell_amount,
                            feePercentageBasisPoints: fee_bps,
                            permit,
                        }
                        .abi_encode(),
                    ),
                    None => (
                        RouterMethod::FillQuoteTokenToEth,
                        IRainbowRouter::fillQuoteTokenToEthCall {
                            sellTokenAddress: sell_token,
                            target,
                            swapCallData: swap_call_data,
                            sellAmount: quote.sell_amount,
                            feePercentageBasisPoints: fee_bps,
                        }
                        .abi_encode(),
                    ),
                }
            } else {
                let buy_token = parse_address(&quote.buy_token_address, "buyTokenAddress")?;
                match permit {
                    Some(permit) => (
                        RouterMethod::FillQuoteTokenToTokenWithPermit,
                        IRainbowRouter::fillQuoteTokenToTokenWithPermitCall {
                            sellTokenAddress: sell_token,
                            buyTokenAddress: buy_token,
                            target,
                            swapCallData: swap_call_data,
                            sellAmount: quote.sell_amount,
                            feeAmount: quote.fee,
                            permit,
                        }
                        .abi_encode(),
                    ),
                    None => (
                        RouterMethod::FillQuoteTokenToToken,
                        IRainbowRouter::fillQuoteTokenToTokenCall {
                            sellTokenAddress: sell_token,
                            buyTokenAddress: buy_token,
                            target,
                            swapCallData: swap_call_data,
                            sellAmount: quote.sell_amount,
                            feeAmount: quote.fee,
                        }
                        .abi_encode(),
                    ),
                }
            }
        };

        debug!("Prepared {} on {} via router {}", method, chain_id, router);
        Ok(PreparedCall {
            method,
            from,
            to: router,
            data: append_referrer(calldata, referrer),
            value,
        })
    }

    async fn router_permit<S>(
        &self,
        token: Address,
        owner: Address,
        router: Address,
        chain: ChainId,
        signer: &S,
    ) -> SdkResult<RouterPermit>
    where
        S: Signer + Send + Sync + ?Sized,
    {
        let timestamp = self.chain.latest_block_timestamp().await?;
        let request = PermitRequest {
            token,
            owner,
            spender: router,
            value: U256::MAX,
            deadline: U256::from(timestamp.saturating_add(PERMIT_EXPIRATION_SECS)),
            chain,
        };
        Ok(sign_permit(&self.chain, signer, request).await?.into())
    }
}

impl<C: TokenReader + BlockClock + TransactionSubmitter> FillDispatcher<C> {
    pub async fn fill_quote<S>(
        &self,
        quote: &Quote,
        chain_id: ChainId,
        permit_signer: Option<&S>,
        referrer: Option<&str>,
        options: &TransactionOptions,
    ) -> SdkResult<TxHash>
    where
        S: Signer + Send + Sync + ?Sized,
    {
        let call = self
            .prepare_fill(quote, chain_id, permit_signer, referrer)
            .await?;
        self.submit(call, options).await
    }
}

impl<C: TransactionSubmitter> FillDispatcher<C> {
    pub async fn fill_crosschain_quote(
        &self,
        quote: &CrosschainQuote,
        referrer: Option<&str>,
        options: &TransactionOptions,
    ) -> SdkResult<TxHash> {
        let call = prepare_crosschain_call(quote, referrer)?;
        self.submit(call, options).await
    }

    pub async fn submit(
        &self,
        call: PreparedCall,
        options: &TransactionOptions,
    ) -> SdkResult<TxHash> {
        let method = call.method;
        let tx_hash = self
            .chain
            .submit(call.into_transaction_request(options))
            .await
            .attach_printable_lazy(|| format!("method: {method}"))?;
        info!("Submitted {} in {}", method, tx_hash);
        Ok(tx_hash)
    }
}
