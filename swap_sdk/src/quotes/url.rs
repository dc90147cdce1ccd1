use alloy::primitives::Address;
use error_stack::{ResultExt, report};
use reqwest::Url;
use serde_json::{Value, json};
use swap_models::{
    constants::{addresses::AddressRegistry, chains::is_native_asset_address},
    models::params::{QuoteParams, SlippageParams, format_slippage},
    network::http::sorted_query_pairs,
};

use crate::error::{Error, SdkResult};

pub const BRIDGE_VERSION: &str = "4";

/// Lowercase `0x` form used on the wire.
pub fn address_to_wire(address: &Address) -> String {
    alloy::hex::encode_prefixed(address)
}

fn endpoint(base: &Url, segments: &[&str]) -> SdkResult<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| {
            report!(Error::InvalidRequest("API base URL cannot be a base".to_string()))
                .attach_printable(format!("base: {base}"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn sorted_url(base: &Url, segments: &[&str], core: &Value) -> SdkResult<Url> {
    let pairs = sorted_query_pairs(core)
        .change_context(Error::ModelsError)
        .attach_printable("Failed to sort quote query parameters")?;
    let mut url = endpoint(base, segments)?;
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url)
}

/// `GET /v1/quote` for a same-chain swap.
///
/// Sorted core parameters come first, then `source`, the fixed amount side,
/// `destReceiver` when buying the native asset, and the fee.
pub fn build_quote_url(
    base: &Url,
    params: &QuoteParams,
    registry: &AddressRegistry,
) -> SdkResult<Option<Url>> {
    let Some(amount) = params.trade_amount() else {
        return Ok(None);
    };

    let core = json!({
        "buyToken": params.buy_token_address,
        "chainId": params.chain_id.id(),
        "currency": params.currency,
        "enableZoraSwaps": true,
        "fromAddress": params.from_address,
        "sellToken": params.sell_token_address,
        "slippage": format_slippage(params.slippage),
    });
    let mut url = sorted_url(base, &["v1", "quote"], &core)?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(source) = params.source {
            query.append_pair("source", source.as_ref());
        }
        query.append_pair(amount.query_key(), &amount.amount().to_string());
        // Native proceeds go back to the router so it can take its fee
        if is_native_asset_address(&params.buy_token_address) {
            query.append_pair(
                "destReceiver",
                &address_to_wire(&registry.router_address(params.chain_id)),
            );
        }
        if let Some(fee) = params.fee_percentage_basis_points {
            query.append_pair("feePercentageBasisPoints", &fee.to_string());
        }
    }

    Ok(Some(url))
}

fn crosschain_core(params: &QuoteParams) -> Option<Value> {
    let sell_amount = params.sell_amount()?;
    let to_chain_id = params.to_chain_id?;

    Some(json!({
        "bridgeVersion": BRIDGE_VERSION,
        "buyToken": params.buy_token_address,
        "chainId": params.chain_id.id(),
        "currency": params.currency,
        "fromAddress": params.from_address,
        "refuel": params.refuel.unwrap_or(false),
        "sellAmount": sell_amount.to_string(),
        "sellToken": params.sell_token_address,
        "slippage": format_slippage(params.slippage),
        "source": params.source.map(|source| source.as_ref().to_string()),
        "toChainId": to_chain_id.id(),
    }))
}

/// `GET /v1/quote` for a bridge. Needs a numeric sell amount and a
/// destination chain.
pub fn build_crosschain_quote_url(base: &Url, params: &QuoteParams) -> SdkResult<Option<Url>> {
    let Some(core) = crosschain_core(params) else {
        return Ok(None);
    };
    let mut url = sorted_url(base, &["v1", "quote"], &core)?;
    if let Some(fee) = params.fee_percentage_basis_points {
        url.query_pairs_mut()
            .append_pair("feePercentageBasisPoints", &fee.to_string());
    }
    Ok(Some(url))
}

/// Claim of bridged funds: always relay, always fee-free.
pub fn build_claim_bridge_quote_url(base: &Url, params: &QuoteParams) -> SdkResult<Option<Url>> {
    let Some(mut core) = crosschain_core(params) else {
        return Ok(None);
    };
    if let Value::Object(map) = &mut core {
        map.insert("claim".to_string(), json!(true));
        map.insert("feePercentageBasisPoints".to_string(), json!(0));
        map.insert("source".to_string(), json!("relay"));
    }
    sorted_url(base, &["v1", "quote"], &core).map(Some)
}

/// `GET /v1/slippage`. `toChainId` is left out for same-chain lookups.
pub fn build_slippage_url(base: &Url, params: &SlippageParams) -> SdkResult<Option<Url>> {
    let Some(amount) = params.trade_amount() else {
        return Ok(None);
    };

    let mut url = endpoint(base, &["v1", "slippage"])?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("buyToken", &params.buy_token_address);
        query.append_pair("chainId", &params.chain_id.id().to_string());
        query.append_pair("sellToken", &params.sell_token_address);
        if let Some(to_chain_id) = params.to_chain_id {
            query.append_pair("toChainId", &to_chain_id.id().to_string());
        }
        query.append_pair(amount.query_key(), &amount.amount().to_string());
    }
    Ok(Some(url))
}

pub fn build_chains_url(base: &Url) -> SdkResult<Url> {
    endpoint(base, &["v1", "chains"])
}
