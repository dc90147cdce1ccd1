use alloy::primitives::U256;
use swap_models::{
    constants::chains::is_native_asset_address,
    models::{
        params::{QuoteParams, TradeAmount},
        quote::{Quote, SwapType},
    },
};

pub const WRAP_GAS_LIMIT: &str = "30000";
pub const UNWRAP_GAS_LIMIT: &str = "40000";
const WRAPPED_ASSET_DECIMALS: u8 = 18;

/// Native asset to the chain's wrapped asset, or back.
pub fn wrap_direction(params: &QuoteParams) -> Option<SwapType> {
    let chain = params.chain_id;
    if is_native_asset_address(&params.sell_token_address)
        && chain.is_wrapped_asset(&params.buy_token_address)
    {
        Some(SwapType::Wrap)
    } else if chain.is_wrapped_asset(&params.sell_token_address)
        && is_native_asset_address(&params.buy_token_address)
    {
        Some(SwapType::Unwrap)
    } else {
        None
    }
}

/// Wrapping is always 1:1, so the quote is built locally.
pub fn wrap_quote(params: &QuoteParams, amount: TradeAmount) -> Option<Quote> {
    let swap_type = wrap_direction(params)?;
    let amount = amount.amount();
    let gas_limit = match swap_type {
        SwapType::Wrap => WRAP_GAS_LIMIT,
        _ => UNWRAP_GAS_LIMIT,
    };

    Some(Quote {
        source: None,
        from: params.from_address.clone(),
        to: None,
        data: None,
        value: None,
        sell_amount: amount,
        sell_amount_display: None,
        sell_amount_in_eth: None,
        sell_amount_minus_fees: Some(amount),
        sell_token_address: params.sell_token_address.clone(),
        sell_token_asset: None,
        buy_token_address: params.buy_token_address.clone(),
        buy_token_asset: None,
        buy_amount: amount,
        buy_amount_display: None,
        buy_amount_display_minimum: None,
        buy_amount_in_eth: None,
        buy_amount_minus_fees: Some(amount),
        fee: U256::ZERO,
        fee_token_asset: None,
        fee_in_eth: None,
        fee_percentage_basis_points: 0,
        protocols: None,
        input_token_decimals: Some(WRAPPED_ASSET_DECIMALS),
        output_token_decimals: Some(WRAPPED_ASSET_DECIMALS),
        default_gas_limit: Some(gas_limit.to_string()),
        swap_type,
        trade_amount_usd: 0.0,
        trade_fee_amount_usd: 0.0,
        rewards: None,
        chain_id: params.chain_id.id(),
        allowance_target: None,
        allowance_needed: false,
        fallback: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use swap_models::constants::chains::{ChainId, NATIVE_ASSET_ADDRESS};

    fn params(sell: &str, buy: &str) -> QuoteParams {
        QuoteParams {
            source: None,
            chain_id: ChainId::Base,
            from_address: "0x789".to_string(),
            sell_token_address: sell.to_string(),
            buy_token_address: buy.to_string(),
            sell_amount: Some("1000".to_string()),
            buy_amount: None,
            slippage: 1.0,
            refuel: None,
            fee_percentage_basis_points: None,
            to_chain_id: None,
            currency: "usd".to_string(),
        }
    }

    const BASE_WETH: &str = "0x4200000000000000000000000000000000000006";

    #[test]
    fn test_wrap_direction() {
        assert_eq!(
            wrap_direction(&params(NATIVE_ASSET_ADDRESS, BASE_WETH)),
            Some(SwapType::Wrap)
        );
        assert_eq!(
            wrap_direction(&params(
                BASE_WETH,
                "0xEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEE"
            )),
            Some(SwapType::Unwrap)
        );
        assert_eq!(wrap_direction(&params(NATIVE_ASSET_ADDRESS, "0x123")), None);
        // mainnet WETH is not the wrapped asset on Base
        assert_eq!(
            wrap_direction(&params(
                NATIVE_ASSET_ADDRESS,
                "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            )),
            None
        );
    }

    #[test]
    fn test_wrap_quote_is_one_to_one() {
        let p = params(NATIVE_ASSET_ADDRESS, BASE_WETH);
        let quote = wrap_quote(&p, p.trade_amount().unwrap()).unwrap();
        assert_eq!(quote.sell_amount, U256::from(1000));
        assert_eq!(quote.buy_amount, U256::from(1000));
        assert_eq!(quote.fee, U256::ZERO);
        assert_eq!(quote.fee_percentage_basis_points, 0);
        assert_eq!(quote.default_gas_limit.as_deref(), Some(WRAP_GAS_LIMIT));
        assert_eq!(quote.input_token_decimals, Some(18));
        assert_eq!(quote.swap_type, SwapType::Wrap);
        assert_eq!(quote.chain_id, 8453);
    }

    #[test]
    fn test_unwrap_quote_gas_hint() {
        let mut p = params(BASE_WETH, NATIVE_ASSET_ADDRESS);
        p.sell_amount = None;
        p.buy_amount = Some("77".to_string());
        let quote = wrap_quote(&p, p.trade_amount().unwrap()).unwrap();
        assert_eq!(quote.default_gas_limit.as_deref(), Some(UNWRAP_GAS_LIMIT));
        assert_eq!(quote.sell_amount, U256::from(77));
        assert_eq!(quote.swap_type, SwapType::Unwrap);
    }
}
