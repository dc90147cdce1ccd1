use error_stack::{Report, report};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::Error;

/// Sentinel the backend and the router use for the chain's native asset.
pub const NATIVE_ASSET_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
pub const EVM_NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const DAI_MAINNET_ADDRESS: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

pub fn is_native_asset_address(address: &str) -> bool {
    address.eq_ignore_ascii_case(NATIVE_ASSET_ADDRESS)
}

pub fn is_null_address(address: &str) -> bool {
    address.eq_ignore_ascii_case(EVM_NULL_ADDRESS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, EnumIter, Hash)]
#[repr(u64)]
pub enum ChainId {
    Mainnet = 1,
    Ropsten = 3,
    Rinkeby = 4,
    Goerli = 5,
    Optimism = 10,
    Kovan = 42,
    Bsc = 56,
    Unichain = 130,
    Polygon = 137,
    Gravity = 1625,
    Sanko = 1996,
    Base = 8453,
    Apechain = 33139,
    Arbitrum = 42161,
    Avalanche = 43114,
    Ink = 57073,
    Berachain = 80094,
    Blast = 81457,
    Zora = 7777777,
    Degen = 666666666,
}

impl ChainId {
    pub fn supported_chains() -> Vec<ChainId> {
        ChainId::iter().collect()
    }

    pub fn id(self) -> u64 {
        self as u64
    }

    /// Every supported chain uses the same sentinel for its native asset.
    pub fn native_asset_address(self) -> &'static str {
        NATIVE_ASSET_ADDRESS
    }

    pub fn wrapped_asset_address(self) -> Option<&'static str> {
        match self {
            ChainId::Mainnet => Some("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            ChainId::Optimism | ChainId::Zora | ChainId::Base => {
                Some("0x4200000000000000000000000000000000000006")
            }
            ChainId::Polygon => Some("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
            ChainId::Arbitrum => Some("0x82af49447d8a07e3bd95bd0d56f35241523fbab1"),
            ChainId::Bsc => Some("0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
            ChainId::Avalanche => Some("0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7"),
            _ => None,
        }
    }

    /// DAI deployment using the non-standard `permit(holder,spender,nonce,expiry,allowed,...)`.
    pub fn dai_address(self) -> Option<&'static str> {
        match self {
            ChainId::Mainnet => Some(DAI_MAINNET_ADDRESS),
            _ => None,
        }
    }

    pub fn is_wrapped_asset(self, address: &str) -> bool {
        self.wrapped_asset_address()
            .is_some_and(|wrapped| wrapped.eq_ignore_ascii_case(address))
    }

    pub fn is_dai(self, address: &str) -> bool {
        self.dai_address()
            .is_some_and(|dai| dai.eq_ignore_ascii_case(address))
    }
}

impl TryFrom<u64> for ChainId {
    type Error = Report<Error>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        ChainId::iter()
            .find(|chain| chain.id() == value)
            .ok_or_else(|| report!(Error::ChainError(format!("Unsupported chain ID: {value}"))))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "Ethereum"),
            Self::Ropsten => write!(f, "Ropsten"),
            Self::Rinkeby => write!(f, "Rinkeby"),
            Self::Goerli => write!(f, "Goerli"),
            Self::Optimism => write!(f, "Optimism"),
            Self::Kovan => write!(f, "Kovan"),
            Self::Bsc => write!(f, "BSC"),
            Self::Unichain => write!(f, "Unichain"),
            Self::Polygon => write!(f, "Polygon"),
            Self::Gravity => write!(f, "Gravity"),
            Self::Sanko => write!(f, "Sanko"),
            Self::Base => write!(f, "Base"),
            Self::Apechain => write!(f, "ApeChain"),
            Self::Arbitrum => write!(f, "Arbitrum One"),
            Self::Avalanche => write!(f, "Avalanche"),
            Self::Ink => write!(f, "Ink"),
            Self::Berachain => write!(f, "Berachain"),
            Self::Blast => write!(f, "Blast"),
            Self::Zora => write!(f, "Zora"),
            Self::Degen => write!(f, "Degen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId::Mainnet.to_string(), "Ethereum");
        assert_eq!(ChainId::Bsc.to_string(), "BSC");
        assert_eq!(ChainId::Arbitrum.to_string(), "Arbitrum One");
        assert_eq!(ChainId::Zora.to_string(), "Zora");
    }

    #[test]
    fn test_is_native_asset_address() {
        assert!(is_native_asset_address(
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        ));
        assert!(is_native_asset_address(
            "0xEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEE"
        ));
        assert!(is_native_asset_address(NATIVE_ASSET_ADDRESS));

        assert!(!is_native_asset_address(EVM_NULL_ADDRESS));
        assert!(!is_native_asset_address(
            "0x1111111111111111111111111111111111111111"
        ));
        assert!(!is_native_asset_address(""));
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(ChainId::try_from(1).expect("Should work"), ChainId::Mainnet);
        assert_eq!(
            ChainId::try_from(137).expect("Should work"),
            ChainId::Polygon
        );
        assert_eq!(
            ChainId::try_from(666666666).expect("Should work"),
            ChainId::Degen
        );
        assert!(ChainId::try_from(9999).is_err());
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&ChainId::Base).unwrap();
        assert_eq!(json, "8453");
        let chain: ChainId = serde_json::from_str("7777777").unwrap();
        assert_eq!(chain, ChainId::Zora);
    }

    #[test]
    fn test_wrapped_asset_lookup() {
        assert!(ChainId::Mainnet.is_wrapped_asset("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
        assert!(ChainId::Base.is_wrapped_asset("0x4200000000000000000000000000000000000006"));
        assert!(!ChainId::Mainnet.is_wrapped_asset(NATIVE_ASSET_ADDRESS));
        assert_eq!(ChainId::Blast.wrapped_asset_address(), None);
    }

    #[test]
    fn test_dai_only_on_mainnet() {
        assert!(ChainId::Mainnet.is_dai("0x6B175474E89094C44Da98b954EedeAC495271d0F"));
        assert!(!ChainId::Polygon.is_dai(DAI_MAINNET_ADDRESS));
    }

    #[test]
    fn test_supported_chains() {
        let chains = ChainId::supported_chains();
        assert_eq!(chains.len(), 20);
        assert!(chains.contains(&ChainId::Mainnet));
        assert!(chains.contains(&ChainId::Degen));
    }
}
