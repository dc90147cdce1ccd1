//! Token introspection through ordered probe lists.

use std::borrow::Cow;

use alloy::{
    primitives::{Address, B256, U256},
    sol_types::Eip712Domain,
};
use swap_models::constants::{chains::ChainId, tokens::is_known_version_one_token};
use tracing::warn;

use crate::{chain::TokenReader, quotes::url::address_to_wire};

const FALLBACK_VERSION: &str = "1";

/// What the token tells us about its EIP-712 domain version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionEvidence {
    Declared(String),
    Separator(B256),
    Unavailable,
}

/// `nonces(owner)`, then `_nonces(owner)`, then zero.
pub async fn probe_nonce<R: TokenReader + ?Sized>(
    reader: &R,
    token: Address,
    owner: Address,
) -> U256 {
    match reader.nonces(token, owner).await {
        Ok(nonce) => return nonce,
        Err(e) => warn!("nonces() unavailable on {}: {:?}", token, e.current_context()),
    }
    match reader.legacy_nonces(token, owner).await {
        Ok(nonce) => nonce,
        Err(e) => {
            warn!(
                "_nonces() unavailable on {}, assuming nonce 0: {:?}",
                token,
                e.current_context()
            );
            U256::ZERO
        }
    }
}

/// `version()`, and only when that fails, `DOMAIN_SEPARATOR()`.
pub async fn probe_version_evidence<R: TokenReader + ?Sized>(
    reader: &R,
    token: Address,
) -> VersionEvidence {
    match reader.version(token).await {
        Ok(version) => return VersionEvidence::Declared(version),
        Err(e) => warn!("version() unavailable on {}: {:?}", token, e.current_context()),
    }
    match reader.domain_separator(token).await {
        Ok(separator) => VersionEvidence::Separator(separator),
        Err(e) => {
            warn!(
                "DOMAIN_SEPARATOR() unavailable on {}: {:?}",
                token,
                e.current_context()
            );
            VersionEvidence::Unavailable
        }
    }
}

/// `None` means the domain is signed without a `version` field.
pub fn resolve_version(
    evidence: VersionEvidence,
    name: &str,
    chain: ChainId,
    token: Address,
) -> Option<String> {
    match evidence {
        VersionEvidence::Declared(version) => Some(version),
        VersionEvidence::Separator(separator) => {
            let candidate = permit_domain(name, Some(FALLBACK_VERSION), chain, token);
            (candidate.separator() == separator).then(|| FALLBACK_VERSION.to_string())
        }
        VersionEvidence::Unavailable => is_known_version_one_token(chain, &address_to_wire(&token))
            .then(|| FALLBACK_VERSION.to_string()),
    }
}

pub fn permit_domain(
    name: &str,
    version: Option<&str>,
    chain: ChainId,
    token: Address,
) -> Eip712Domain {
    Eip712Domain {
        name: Some(Cow::Owned(name.to_string())),
        version: version.map(|v| Cow::Owned(v.to_string())),
        chain_id: Some(U256::from(chain.id())),
        verifying_contract: Some(token),
        salt: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MockChain;
    use alloy::primitives::address;
    use swap_models::constants::tokens::TORN_ADDRESS;

    const TOKEN: Address = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");
    const OWNER: Address = address!("7a3d05c70581bd345fe117c06e45f9669205384f");

    #[tokio::test]
    async fn test_nonce_probe_order() {
        let token = MockChain::default().with_nonces(5).with_legacy_nonces(9);
        assert_eq!(probe_nonce(&token, TOKEN, OWNER).await, U256::from(5));

        let token = MockChain::default().with_legacy_nonces(9);
        assert_eq!(probe_nonce(&token, TOKEN, OWNER).await, U256::from(9));

        let token = MockChain::default();
        assert_eq!(probe_nonce(&token, TOKEN, OWNER).await, U256::ZERO);
    }

    #[tokio::test]
    async fn test_version_evidence_prefers_declared() {
        let token = MockChain::default()
            .with_version("2")
            .with_domain_separator(B256::ZERO);
        assert_eq!(
            probe_version_evidence(&token, TOKEN).await,
            VersionEvidence::Declared("2".to_string())
        );
        assert_eq!(token.domain_separator_calls(), 0);
    }

    #[tokio::test]
    async fn test_version_evidence_falls_back_to_separator() {
        let token = MockChain::default().with_domain_separator(B256::repeat_byte(1));
        assert_eq!(
            probe_version_evidence(&token, TOKEN).await,
            VersionEvidence::Separator(B256::repeat_byte(1))
        );
        assert_eq!(token.domain_separator_calls(), 1);
    }

    #[test]
    fn test_resolve_version_from_matching_separator() {
        let separator = permit_domain("Uniswap", Some("1"), ChainId::Mainnet, TOKEN).separator();
        assert_eq!(
            resolve_version(
                VersionEvidence::Separator(separator),
                "Uniswap",
                ChainId::Mainnet,
                TOKEN
            ),
            Some("1".to_string())
        );
        assert_eq!(
            resolve_version(
                VersionEvidence::Separator(B256::repeat_byte(7)),
                "Uniswap",
                ChainId::Mainnet,
                TOKEN
            ),
            None
        );
    }

    #[test]
    fn test_resolve_version_known_tokens() {
        let torn: Address = TORN_ADDRESS.parse().unwrap();
        assert_eq!(
            resolve_version(VersionEvidence::Unavailable, "TORN", ChainId::Mainnet, torn),
            Some("1".to_string())
        );
        assert_eq!(
            resolve_version(VersionEvidence::Unavailable, "TORN", ChainId::Polygon, torn),
            None
        );
        assert_eq!(
            resolve_version(VersionEvidence::Unavailable, "UNI", ChainId::Mainnet, TOKEN),
            None
        );
    }

    #[test]
    fn test_domain_without_version_differs() {
        let with = permit_domain("Uniswap", Some("1"), ChainId::Mainnet, TOKEN);
        let without = permit_domain("Uniswap", None, ChainId::Mainnet, TOKEN);
        assert_ne!(with.separator(), without.separator());
    }
}
