use alloy::primitives::{B256, U256};
use serde::{Deserialize, Serialize};

/// EIP-2612 `Permit(owner,spender,value,nonce,deadline)`.
pub mod eip2612 {
    alloy::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct Permit {
            address owner;
            address spender;
            uint256 value;
            uint256 nonce;
            uint256 deadline;
        }
    }
}

/// DAI's `Permit(holder,spender,nonce,expiry,allowed)`.
pub mod dai {
    alloy::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct Permit {
            address holder;
            address spender;
            uint256 nonce;
            uint256 expiry;
            bool allowed;
        }
    }
}

/// Signed permit, laid out like the router's permit tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitSignature {
    /// Always zero for DAI-style permits.
    pub value: U256,
    pub nonce: U256,
    pub deadline: U256,
    pub is_dai_style_permit: bool,
    pub v: u8,
    pub r: B256,
    pub s: B256,
}
