//! Direct calls to the chain's wrapped native asset contract.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};
use error_stack::report;
use swap_models::constants::chains::ChainId;

use crate::{
    error::{Error, SdkResult},
    fill::{PreparedCall, RouterMethod, parse_address},
};

sol! {
    interface IWrappedNative {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }
}

fn wrapped_asset(chain: ChainId) -> SdkResult<Address> {
    let address = chain.wrapped_asset_address().ok_or_else(|| {
        report!(Error::InvalidRequest(format!(
            "no wrapped asset on {chain}"
        )))
    })?;
    parse_address(address, "wrapped asset")
}

/// `deposit()` carrying `amount` as value.
pub fn prepare_wrap(amount: U256, chain: ChainId, from: Address) -> SdkResult<PreparedCall> {
    Ok(PreparedCall {
        method: RouterMethod::Deposit,
        from,
        to: wrapped_asset(chain)?,
        data: Bytes::from(IWrappedNative::depositCall {}.abi_encode()),
        value: amount,
    })
}

pub fn prepare_unwrap(amount: U256, chain: ChainId, from: Address) -> SdkResult<PreparedCall> {
    Ok(PreparedCall {
        method: RouterMethod::Withdraw,
        from,
        to: wrapped_asset(chain)?,
        data: Bytes::from(IWrappedNative::withdrawCall { wad: amount }.abi_encode()),
        value: U256::ZERO,
    })
}
