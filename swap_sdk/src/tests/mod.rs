use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use alloy::{
    primitives::{Address, B256, TxHash, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use error_stack::report;
use reqwest::Url;
use serde_json::Value;
use swap_models::models::{
    quote::{CrosschainQuote, Quote, SwapType},
    source::Source,
};

use crate::{
    chain::{BlockClock, TokenReader, TransactionSubmitter},
    error::{Error, SdkResult},
    quotes::transport::QuoteTransport,
};

pub fn init_tracing_in_tests() {
    swap_models::log::init_tracing(false);
}

/// Replays canned JSON responses and records every requested URL.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<Url>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteTransport for RecordingTransport {
    async fn get_json(&self, url: Url) -> SdkResult<Value> {
        self.calls.lock().unwrap().push(url);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| report!(Error::ReqwestError("no canned response left".to_string())))
    }
}

/// Never answers; used to exercise cancellation.
pub struct PendingTransport;

#[async_trait]
impl QuoteTransport for PendingTransport {
    async fn get_json(&self, _url: Url) -> SdkResult<Value> {
        futures::future::pending().await
    }
}

/// Token, clock and submitter in one; unset token calls revert.
#[derive(Default)]
pub struct MockChain {
    name: Option<String>,
    nonces: Option<U256>,
    legacy_nonces: Option<U256>,
    version: Option<String>,
    domain_separator: Option<B256>,
    domain_separator_calls: AtomicUsize,
    timestamp: u64,
    submitted: Mutex<Vec<TransactionRequest>>,
}

impl MockChain {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_nonces(mut self, nonce: u64) -> Self {
        self.nonces = Some(U256::from(nonce));
        self
    }

    pub fn with_legacy_nonces(mut self, nonce: u64) -> Self {
        self.legacy_nonces = Some(U256::from(nonce));
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_domain_separator(mut self, separator: B256) -> Self {
        self.domain_separator = Some(separator);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn domain_separator_calls(&self) -> usize {
        self.domain_separator_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<TransactionRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

fn reverted<T>(call: &str) -> SdkResult<T> {
    Err(report!(Error::RpcError(format!("{call} reverted"))))
}

#[async_trait]
impl TokenReader for MockChain {
    async fn name(&self, _token: Address) -> SdkResult<String> {
        self.name.clone().map_or_else(|| reverted("name()"), Ok)
    }

    async fn nonces(&self, _token: Address, _owner: Address) -> SdkResult<U256> {
        self.nonces.map_or_else(|| reverted("nonces()"), Ok)
    }

    async fn legacy_nonces(&self, _token: Address, _owner: Address) -> SdkResult<U256> {
        self.legacy_nonces.map_or_else(|| reverted("_nonces()"), Ok)
    }

    async fn version(&self, _token: Address) -> SdkResult<String> {
        self.version.clone().map_or_else(|| reverted("version()"), Ok)
    }

    async fn domain_separator(&self, _token: Address) -> SdkResult<B256> {
        self.domain_separator_calls.fetch_add(1, Ordering::SeqCst);
        self.domain_separator
            .map_or_else(|| reverted("DOMAIN_SEPARATOR()"), Ok)
    }
}

#[async_trait]
impl BlockClock for MockChain {
    async fn latest_block_timestamp(&self) -> SdkResult<u64> {
        Ok(self.timestamp)
    }
}

#[async_trait]
impl TransactionSubmitter for MockChain {
    async fn submit(&self, tx: TransactionRequest) -> SdkResult<TxHash> {
        self.submitted.lock().unwrap().push(tx);
        Ok(TxHash::repeat_byte(0xab))
    }
}

pub fn sample_quote(source: Option<Source>, to: Option<&str>) -> Quote {
    Quote {
        source,
        from: "0x7a3d05c70581bd345fe117c06e45f9669205384f".to_string(),
        to: to.map(str::to_string),
        data: Some("0xabcdef".to_string()),
        value: Some(U256::ZERO),
        sell_amount: U256::from(1_000_000u64),
        sell_amount_display: None,
        sell_amount_in_eth: None,
        sell_amount_minus_fees: Some(U256::from(990_000u64)),
        sell_token_address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
        sell_token_asset: None,
        buy_token_address: "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
        buy_token_asset: None,
        buy_amount: U256::from(999_000_000_000_000_000u64),
        buy_amount_display: None,
        buy_amount_display_minimum: None,
        buy_amount_in_eth: None,
        buy_amount_minus_fees: None,
        fee: U256::from(10_000u64),
        fee_token_asset: None,
        fee_in_eth: None,
        fee_percentage_basis_points: 85,
        protocols: None,
        input_token_decimals: Some(6),
        output_token_decimals: Some(18),
        default_gas_limit: Some("350000".to_string()),
        swap_type: SwapType::Normal,
        trade_amount_usd: 1.0,
        trade_fee_amount_usd: 0.0085,
        rewards: None,
        chain_id: 1,
        allowance_target: to.map(str::to_string),
        allowance_needed: true,
        fallback: None,
    }
}

pub fn crosschain_quote(source: Source, to: &str) -> CrosschainQuote {
    let mut quote = sample_quote(Some(source), Some(to));
    quote.swap_type = SwapType::CrossChain;
    CrosschainQuote {
        quote,
        routes: Vec::new(),
        refuel: None,
        from_chain_id: Some(1),
        to_chain_id: Some(137),
    }
}
