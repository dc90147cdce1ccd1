//! Router ABI, admin call builders and revert decoding.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::{Revert, SolCall, SolError},
};
use swap_models::constants::{addresses::AddressRegistry, chains::ChainId};

use super::{PreparedCall, RouterMethod};
use crate::permit::PermitSignature;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct RouterPermit {
        uint256 value;
        uint256 nonce;
        uint256 deadline;
        bool isDaiStylePermit;
        uint8 v;
        bytes32 r;
        bytes32 s;
    }

    interface IRainbowRouter {
        event TokenWithdrawn(address indexed token, address indexed target, uint256 amount);
        event EthWithdrawn(address indexed target, uint256 amount);
        event SwapTargetAdded(address indexed target);
        event SwapTargetRemoved(address indexed target);
        event OwnerChanged(address indexed newOwner, address indexed oldOwner);

        function fillQuoteEthToToken(
            address buyTokenAddress,
            address target,
            bytes swapCallData,
            uint256 feeAmount
        ) external payable;

        function fillQuoteTokenToEth(
            address sellTokenAddress,
            address target,
            bytes swapCallData,
            uint256 sellAmount,
            uint256 feePercentageBasisPoints
        ) external payable;

        function fillQuoteTokenToEthWithPermit(
            address sellTokenAddress,
            address target,
            bytes swapCallData,
            uint256 sellAmount,
            uint256 feePercentageBasisPoints,
            RouterPermit permit
        ) external payable;

        function fillQuoteTokenToToken(
            address sellTokenAddress,
            address buyTokenAddress,
            address target,
            bytes swapCallData,
            uint256 sellAmount,
            uint256 feeAmount
        ) external payable;

        function fillQuoteTokenToTokenWithPermit(
            address sellTokenAddress,
            address buyTokenAddress,
            address target,
            bytes swapCallData,
            uint256 sellAmount,
            uint256 feeAmount,
            RouterPermit permit
        ) external payable;

        function withdrawToken(address token, address to, uint256 amount) external;
        function withdrawEth(address to, uint256 amount) external;
        function updateSwapTargets(address target, bool add) external;
        function transferOwnership(address newOwner) external;
    }
}

impl From<PermitSignature> for RouterPermit {
    fn from(permit: PermitSignature) -> Self {
        Self {
            value: permit.value,
            nonce: permit.nonce,
            deadline: permit.deadline,
            isDaiStylePermit: permit.is_dai_style_permit,
            v: permit.v,
            r: permit.r,
            s: permit.s,
        }
    }
}

fn admin_call(
    registry: &AddressRegistry,
    chain: ChainId,
    owner: Address,
    method: RouterMethod,
    data: Vec<u8>,
) -> PreparedCall {
    PreparedCall {
        method,
        from: owner,
        to: registry.router_address(chain),
        data: Bytes::from(data),
        value: U256::ZERO,
    }
}

pub fn prepare_withdraw_token(
    registry: &AddressRegistry,
    chain: ChainId,
    owner: Address,
    token: Address,
    to: Address,
    amount: U256,
) -> PreparedCall {
    let data = IRainbowRouter::withdrawTokenCall { token, to, amount }.abi_encode();
    admin_call(registry, chain, owner, RouterMethod::WithdrawToken, data)
}

pub fn prepare_withdraw_eth(
    registry: &AddressRegistry,
    chain: ChainId,
    owner: Address,
    to: Address,
    amount: U256,
) -> PreparedCall {
    let data = IRainbowRouter::withdrawEthCall { to, amount }.abi_encode();
    admin_call(registry, chain, owner, RouterMethod::WithdrawEth, data)
}

/// `add = false` removes the target.
pub fn prepare_update_swap_targets(
    registry: &AddressRegistry,
    chain: ChainId,
    owner: Address,
    target: Address,
    add: bool,
) -> PreparedCall {
    let data = IRainbowRouter::updateSwapTargetsCall { target, add }.abi_encode();
    admin_call(registry, chain, owner, RouterMethod::UpdateSwapTargets, data)
}

pub fn prepare_transfer_ownership(
    registry: &AddressRegistry,
    chain: ChainId,
    owner: Address,
    new_owner: Address,
) -> PreparedCall {
    let data = IRainbowRouter::transferOwnershipCall {
        newOwner: new_owner,
    }
    .abi_encode();
    admin_call(registry, chain, owner, RouterMethod::TransferOwnership, data)
}

/// Reasons the router reverts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterRevert {
    OnlyOwner,
    TargetNotAuthorized,
    NoReceive,
    ZeroAddress,
    Other(String),
}

impl RouterRevert {
    /// Decodes an `Error(string)` payload; `None` for anything else.
    pub fn decode(revert_data: &[u8]) -> Option<Self> {
        let reason = Revert::abi_decode(revert_data).ok()?.reason;
        Some(match reason.as_str() {
            "ONLY_OWNER" => RouterRevert::OnlyOwner,
            "TARGET_NOT_AUTH" => RouterRevert::TargetNotAuthorized,
            "NO_RECEIVE" => RouterRevert::NoReceive,
            "ZERO_ADDRESS" => RouterRevert::ZeroAddress,
            _ => RouterRevert::Other(reason),
        })
    }
}
