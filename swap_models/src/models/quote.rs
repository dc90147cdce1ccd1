use std::collections::HashMap;

use alloy::primitives::U256;
use error_stack::ResultExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as, skip_serializing_none};

use crate::{
    error::{Error, ModelResult},
    models::source::Source,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwapType {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "cross-chain")]
    CrossChain,
    #[serde(rename = "wrap")]
    Wrap,
    #[serde(rename = "unwrap")]
    Unwrap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolShare {
    pub name: String,
    pub part: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub value: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAddress {
    pub address: String,
    pub decimals: u8,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAsset {
    pub asset_code: String,
    pub decimals: u8,
    pub icon_url: Option<String>,
    pub name: String,
    pub network: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub networks: HashMap<String, NetworkAddress>,
    pub chain_id: Option<u64>,
    pub price: Option<TokenPrice>,
    pub total_price: Option<TokenPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardToken {
    pub asset_code: String,
    pub decimals: u8,
    pub icon_url: Option<String>,
    pub name: String,
    pub network: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub networks: HashMap<String, NetworkAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub amount: f64,
    pub token: RewardToken,
}

/// Same-chain quote as returned by `GET /v1/quote`.
///
/// Amounts arrive as decimal strings, hex strings or plain JSON integers
/// depending on the upstream aggregator; all of them decode into `U256` and
/// serialize back as decimal strings.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub source: Option<Source>,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub value: Option<U256>,

    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub sell_amount: U256,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub sell_amount_display: Option<U256>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub sell_amount_in_eth: Option<U256>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub sell_amount_minus_fees: Option<U256>,
    pub sell_token_address: String,
    #[serde(default)]
    pub sell_token_asset: Option<TokenAsset>,

    pub buy_token_address: String,
    #[serde(default)]
    pub buy_token_asset: Option<TokenAsset>,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub buy_amount: U256,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub buy_amount_display: Option<U256>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub buy_amount_display_minimum: Option<U256>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub buy_amount_in_eth: Option<U256>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub buy_amount_minus_fees: Option<U256>,

    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub fee: U256,
    #[serde(default)]
    pub fee_token_asset: Option<TokenAsset>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub fee_in_eth: Option<U256>,
    #[serde(default)]
    pub fee_percentage_basis_points: u64,

    #[serde(default)]
    pub protocols: Option<Vec<ProtocolShare>>,
    #[serde(default)]
    pub input_token_decimals: Option<u8>,
    #[serde(default)]
    pub output_token_decimals: Option<u8>,
    #[serde(default)]
    pub default_gas_limit: Option<String>,
    #[serde(default)]
    pub swap_type: SwapType,
    #[serde(rename = "tradeAmountUSD", default)]
    pub trade_amount_usd: f64,
    #[serde(rename = "tradeFeeAmountUSD", default)]
    pub trade_fee_amount_usd: f64,
    #[serde(default)]
    pub rewards: Option<Vec<Reward>>,
    #[serde(default)]
    pub chain_id: u64,
    #[serde(default)]
    pub allowance_target: Option<String>,
    #[serde(default)]
    pub allowance_needed: bool,
    #[serde(default)]
    pub fallback: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketAsset {
    pub address: String,
    #[serde(default)]
    pub chain_agnostic_id: Option<Value>,
    pub chain_id: u64,
    pub decimals: u8,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub name: String,
    pub symbol: String,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketGasFees {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub gas_amount: U256,
    pub gas_limit: Option<String>,
    pub asset: SocketAsset,
    pub fees_in_usd: f64,
}

/// One bridge leg of a cross-chain quote. User transactions are kept as raw
/// JSON since their shape differs per bridge.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketRoute {
    pub route_id: String,
    #[serde(default)]
    pub is_only_swap_route: bool,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub from_amount: U256,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub to_amount: U256,
    #[serde(default)]
    pub used_bridge_names: Vec<String>,
    #[serde(default)]
    pub total_user_tx: u32,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    #[serde(default)]
    pub user_txs: Vec<Value>,
    pub service_time: Option<u64>,
    pub max_service_time: Option<u64>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketRefuelData {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub from_amount: U256,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub to_amount: U256,
    pub gas_fees: SocketGasFees,
    pub recipient: String,
    pub service_time: u64,
    pub from_asset: SocketAsset,
    pub to_asset: SocketAsset,
    pub from_chain_id: u64,
    pub to_chain_id: u64,
}

/// Quote for a bridge or bridge+swap: the same-chain fields plus the legs.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosschainQuote {
    #[serde(flatten)]
    pub quote: Quote,
    #[serde(default)]
    pub routes: Vec<SocketRoute>,
    #[serde(default)]
    pub refuel: Option<SocketRefuelData>,
    #[serde(default)]
    pub from_chain_id: Option<u64>,
    #[serde(default)]
    pub to_chain_id: Option<u64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteError {
    pub error: bool,
    #[serde(default)]
    pub error_code: Option<i64>,
    pub message: String,
}

impl QuoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_code: None,
            message: message.into(),
        }
    }
}

/// True when a payload carries a truthy `error` flag.
pub fn has_error_flag(value: &Value) -> bool {
    value
        .get("error")
        .is_some_and(|error| !matches!(error, Value::Null | Value::Bool(false)))
}

/// Either a quote or the backend's structured refusal.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteResponse<Q> {
    Quote(Q),
    Error(QuoteError),
}

impl<Q> QuoteResponse<Q> {
    pub fn quote(&self) -> Option<&Q> {
        match self {
            QuoteResponse::Quote(quote) => Some(quote),
            QuoteResponse::Error(_) => None,
        }
    }

    pub fn into_quote(self) -> Option<Q> {
        match self {
            QuoteResponse::Quote(quote) => Some(quote),
            QuoteResponse::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&QuoteError> {
        match self {
            QuoteResponse::Quote(_) => None,
            QuoteResponse::Error(error) => Some(error),
        }
    }

    pub fn map<R>(self, f: impl FnOnce(Q) -> R) -> QuoteResponse<R> {
        match self {
            QuoteResponse::Quote(quote) => QuoteResponse::Quote(f(quote)),
            QuoteResponse::Error(error) => QuoteResponse::Error(error),
        }
    }
}

impl<Q: serde::de::DeserializeOwned> QuoteResponse<Q> {
    pub fn from_value(value: Value) -> ModelResult<Self> {
        if has_error_flag(&value) {
            let error: QuoteError = serde_json::from_value(value).change_context(
                Error::SerdeDeserialize("Failed to deserialize quote error".to_string()),
            )?;
            Ok(QuoteResponse::Error(error))
        } else {
            let quote: Q = serde_json::from_value(value).change_context(
                Error::SerdeDeserialize("Failed to deserialize quote".to_string()),
            )?;
            Ok(QuoteResponse::Quote(quote))
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketChainLimit {
    pub chain_id: u64,
    pub is_enabled: bool,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub min_amount: U256,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub max_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketChain {
    pub chain_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_sending_enabled: bool,
    #[serde(default)]
    pub is_receiving_enabled: bool,
    #[serde(default)]
    pub limits: Vec<SocketChainLimit>,
}

/// `GET /v1/chains` payload used for refuel limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketChainsData {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Vec<SocketChain>,
}

impl SocketChainsData {
    pub fn min_refuel_amount(&self, from_chain: u64, to_chain: u64) -> Option<U256> {
        self.result
            .iter()
            .find(|chain| chain.chain_id == from_chain)?
            .limits
            .iter()
            .find(|limit| limit.chain_id == to_chain)
            .map(|limit| limit.min_amount)
    }
}
