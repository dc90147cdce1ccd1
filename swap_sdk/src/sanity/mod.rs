//! Checks applied to quote addresses before anything value-bearing is built.

use error_stack::{ResultExt, report};
use swap_models::{
    constants::{
        addresses::AddressRegistry,
        chains::{ChainId, is_native_asset_address, is_null_address},
    },
    models::{
        quote::{CrosschainQuote, Quote, SwapType},
        source::Source,
    },
};
use tracing::warn;

use crate::{
    error::{AddressError, Error, SdkResult, from_models_error},
    quotes::url::address_to_wire,
};

const ERC20_TRANSFER_SELECTOR: &str = "0xa9059cbb";
/// Selector plus `0x`.
const SELECTOR_LEN: usize = 10;
/// Recipient word plus amount word, in hex chars.
const TRANSFER_PARAMS_LEN: usize = 128;
const WORD_PADDING_LEN: usize = 24;

/// Rejects a missing or all-zero destination.
pub fn check_address(asserted: Option<&str>) -> Result<(), AddressError> {
    match asserted.map(str::trim) {
        None | Some("") => Err(AddressError::Missing),
        Some(address) if is_null_address(address) => Err(AddressError::NullAddress),
        Some(_) => Ok(()),
    }
}

/// Recipient of an ERC-20 `transfer(address,uint256)` call, lowercased.
///
/// Bytes past the amount word (a referrer tag, say) are ignored.
pub fn decode_erc20_transfer_to(data: &str) -> Option<String> {
    if !data.is_ascii()
        || data.len() < SELECTOR_LEN + TRANSFER_PARAMS_LEN
        || !data[..SELECTOR_LEN].eq_ignore_ascii_case(ERC20_TRANSFER_SELECTOR)
    {
        return None;
    }

    let params = &data[SELECTOR_LEN..SELECTOR_LEN + TRANSFER_PARAMS_LEN];
    if !params.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let (padding, rest) = params.split_at(WORD_PADDING_LEN);
    if padding.chars().any(|c| c != '0') {
        return None;
    }
    Some(format!("0x{}", rest[..40].to_ascii_lowercase()))
}

/// Where the quote actually sends the user's funds, per source.
pub fn extract_destination_address(quote: &Quote) -> Option<String> {
    match quote.source? {
        Source::Relay => {
            if is_native_asset_address(&quote.sell_token_address) {
                quote.to.clone()
            } else {
                decode_erc20_transfer_to(quote.data.as_deref()?)
            }
        }
        Source::Socket | Source::ZeroX | Source::OneInch | Source::Rainbow => quote.to.clone(),
        Source::Other => None,
    }
}

/// Matches a cross-chain quote against the trusted table.
///
/// Consumes the quote; for sources whose allowance target we pin, the
/// returned quote carries the trusted target instead of the upstream one.
pub fn verify_crosschain_quote(
    registry: &AddressRegistry,
    quote: CrosschainQuote,
) -> SdkResult<CrosschainQuote> {
    let source = quote.quote.source.ok_or_else(|| {
        report!(Error::UnknownRoute("quote has no source".to_string()))
    })?;
    if !source.is_crosschain() {
        return Err(report!(Error::UnknownRoute(format!(
            "{source} is not a bridge source"
        ))));
    }
    let chain = ChainId::try_from(quote.quote.chain_id)
        .change_context(Error::ChainError(format!(
            "unsupported chain {}",
            quote.quote.chain_id
        )))?;

    let entry = registry.entry(source, chain).map_err(|report| {
        let context = from_models_error(report.current_context());
        report.change_context(context)
    })?;

    let actual = extract_destination_address(&quote.quote)
        .ok_or_else(|| report!(Error::from(AddressError::Missing)))
        .attach_printable_lazy(|| format!("source {source} on {chain}"))?;
    check_address(Some(&actual)).map_err(|e| report!(Error::from(e)))?;

    let expected = address_to_wire(&entry.destination);
    if !actual.eq_ignore_ascii_case(&expected) {
        warn!(
            "Cross-chain destination mismatch for {} on {}: {} != {}",
            source, chain, actual, expected
        );
        return Err(report!(Error::from(AddressError::Mismatch {
            expected,
            actual
        })));
    }

    if !entry.override_allowance {
        return Ok(quote);
    }

    let allowance_target = entry
        .allowance_target
        .map(|target| address_to_wire(&target))
        .ok_or_else(|| {
            report!(Error::UnknownRoute(format!(
                "no trusted allowance target for {source} on {chain}"
            )))
        })?;

    let CrosschainQuote {
        quote,
        routes,
        refuel,
        from_chain_id,
        to_chain_id,
    } = quote;
    Ok(CrosschainQuote {
        quote: Quote {
            allowance_target: Some(allowance_target),
            ..quote
        },
        routes,
        refuel,
        from_chain_id,
        to_chain_id,
    })
}

/// Cross-chain executions need a `cross-chain` quote, router fills a `normal` one.
pub fn check_swap_type(swap_type: SwapType, is_cross_chain: bool) -> SdkResult<()> {
    if is_cross_chain && swap_type != SwapType::CrossChain {
        return Err(report!(Error::SwapType(
            "Normal quote provided for cross-chain swap".to_string()
        )));
    }
    if !is_cross_chain && swap_type != SwapType::Normal {
        return Err(report!(Error::SwapType(
            "Crosschain quote provided for normal swap".to_string()
        )));
    }
    Ok(())
}
