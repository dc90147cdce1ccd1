use std::collections::HashMap;

use alloy::primitives::{Address, address};
use error_stack::report;
use lazy_static::lazy_static;

use crate::{
    constants::chains::ChainId,
    error::{Error, ModelResult},
    models::source::Source,
};

pub const DEFAULT_ROUTER_ADDRESS: Address = address!("00000000009726632680fb29d3f7a9734e3010e2");
pub const ZORA_ROUTER_ADDRESS: Address = address!("a61550e9ddd2797e16489db09343162be98d9483");
pub const SOCKET_GATEWAY_ADDRESS: Address = address!("3a23F943181408EAC424116Af7b7790c94Cb97a5");
pub const RELAY_RECEIVER_ADDRESS: Address = address!("f70da97812CB96acDF810712Aa562db8dfA3dbEF");

/// Chains where both bridges are deployed.
const BRIDGE_CHAINS: [ChainId; 8] = [
    ChainId::Mainnet,
    ChainId::Optimism,
    ChainId::Polygon,
    ChainId::Arbitrum,
    ChainId::Bsc,
    ChainId::Zora,
    ChainId::Base,
    ChainId::Avalanche,
];

/// What a quote from `(source, chain)` is allowed to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedAddressEntry {
    pub destination: Address,
    pub allowance_target: Option<Address>,
    /// When set, the quote's allowance target is replaced by ours.
    pub override_allowance: bool,
}

#[derive(Debug, Clone)]
pub struct AddressRegistry {
    default_router: Address,
    routers: HashMap<ChainId, Address>,
    entries: HashMap<(Source, ChainId), TrustedAddressEntry>,
}

lazy_static! {
    static ref ADDRESS_REGISTRY: AddressRegistry = AddressRegistry::builtin();
}

impl AddressRegistry {
    /// Process-wide table, built on first use and never mutated.
    pub fn global() -> &'static AddressRegistry {
        &ADDRESS_REGISTRY
    }

    fn builtin() -> Self {
        let routers = HashMap::from([(ChainId::Zora, ZORA_ROUTER_ADDRESS)]);

        let mut entries = HashMap::new();
        for chain in BRIDGE_CHAINS {
            entries.insert(
                (Source::Socket, chain),
                TrustedAddressEntry {
                    destination: SOCKET_GATEWAY_ADDRESS,
                    allowance_target: Some(SOCKET_GATEWAY_ADDRESS),
                    override_allowance: true,
                },
            );
            entries.insert(
                (Source::Relay, chain),
                TrustedAddressEntry {
                    destination: RELAY_RECEIVER_ADDRESS,
                    allowance_target: None,
                    override_allowance: false,
                },
            );
        }

        Self {
            default_router: DEFAULT_ROUTER_ADDRESS,
            routers,
            entries,
        }
    }

    pub fn router_address(&self, chain: ChainId) -> Address {
        self.routers
            .get(&chain)
            .copied()
            .unwrap_or(self.default_router)
    }

    pub fn entry(&self, source: Source, chain: ChainId) -> ModelResult<&TrustedAddressEntry> {
        self.entries.get(&(source, chain)).ok_or_else(|| {
            report!(Error::UnknownRoute(format!(
                "no trusted address for source {source} on {chain}"
            )))
        })
    }

    pub fn expected_destination(&self, source: Source, chain: ChainId) -> ModelResult<Address> {
        Ok(self.entry(source, chain)?.destination)
    }

    pub fn expected_allowance_target(
        &self,
        source: Source,
        chain: ChainId,
    ) -> ModelResult<Address> {
        self.entry(source, chain)?.allowance_target.ok_or_else(|| {
            report!(Error::UnknownRoute(format!(
                "no trusted allowance target for source {source} on {chain}"
            )))
        })
    }
}
