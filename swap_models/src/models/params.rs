use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{constants::chains::ChainId, models::source::Source};

/// The side of the trade the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAmount {
    Sell(U256),
    Buy(U256),
}

impl TradeAmount {
    pub fn amount(&self) -> U256 {
        match self {
            TradeAmount::Sell(amount) | TradeAmount::Buy(amount) => *amount,
        }
    }

    pub fn query_key(&self) -> &'static str {
        match self {
            TradeAmount::Sell(_) => "sellAmount",
            TradeAmount::Buy(_) => "buyAmount",
        }
    }

    /// Sell amount wins when both are numeric.
    pub fn resolve(sell_amount: Option<&str>, buy_amount: Option<&str>) -> Option<Self> {
        parse_amount(sell_amount)
            .map(TradeAmount::Sell)
            .or_else(|| parse_amount(buy_amount).map(TradeAmount::Buy))
    }
}

/// Decimal or `0x` hex. Empty and non-numeric input is not an amount.
pub fn parse_amount(raw: Option<&str>) -> Option<U256> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    U256::from_str(raw).ok()
}

/// Slippage percentage as sent on the wire: `2.0` renders as `2`, `0.5` as `0.5`.
pub fn format_slippage(slippage: f64) -> String {
    slippage.to_string()
}

/// Caller input for every quote endpoint. Amounts stay untrusted strings
/// until a builder parses them.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub source: Option<Source>,
    pub chain_id: ChainId,
    pub from_address: String,
    pub sell_token_address: String,
    pub buy_token_address: String,
    pub sell_amount: Option<String>,
    pub buy_amount: Option<String>,
    pub slippage: f64,
    pub refuel: Option<bool>,
    pub fee_percentage_basis_points: Option<u32>,
    pub to_chain_id: Option<ChainId>,
    pub currency: String,
}

impl QuoteParams {
    pub fn trade_amount(&self) -> Option<TradeAmount> {
        TradeAmount::resolve(self.sell_amount.as_deref(), self.buy_amount.as_deref())
    }

    /// Cross-chain endpoints only accept a fixed sell side.
    pub fn sell_amount(&self) -> Option<U256> {
        parse_amount(self.sell_amount.as_deref())
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlippageParams {
    pub chain_id: ChainId,
    pub to_chain_id: Option<ChainId>,
    pub sell_token_address: String,
    pub buy_token_address: String,
    pub sell_amount: Option<String>,
    pub buy_amount: Option<String>,
}

impl SlippageParams {
    pub fn trade_amount(&self) -> Option<TradeAmount> {
        TradeAmount::resolve(self.sell_amount.as_deref(), self.buy_amount.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slippage {
    pub slippage_percent: f64,
}
