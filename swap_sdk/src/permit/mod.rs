//! EIP-2612 and DAI-style permit signatures for the router.

pub mod probes;
pub mod types;

use alloy::{
    primitives::{Address, B256, U256},
    signers::Signer,
    sol_types::SolStruct,
};
use error_stack::{ResultExt, report};
use swap_models::constants::chains::ChainId;
use tracing::debug;

use crate::{
    chain::TokenReader,
    error::{Error, PermitError, SdkResult},
    quotes::url::address_to_wire,
};
use probes::{permit_domain, probe_nonce, probe_version_evidence, resolve_version};
pub use types::{PermitSignature, dai, eip2612};

const SIGNATURE_V_OFFSET: u8 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitRequest {
    pub token: Address,
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub deadline: U256,
    pub chain: ChainId,
}

impl PermitRequest {
    /// DAI signs `allowed` instead of a value.
    pub fn is_dai_style(&self) -> bool {
        self.chain.is_dai(&address_to_wire(&self.token))
    }
}

pub async fn sign_permit<R, S>(
    reader: &R,
    signer: &S,
    request: PermitRequest,
) -> SdkResult<PermitSignature>
where
    R: TokenReader + ?Sized,
    S: Signer + Send + Sync + ?Sized,
{
    let PermitRequest {
        token,
        owner,
        spender,
        value,
        deadline,
        chain,
    } = request;
    let is_dai_style_permit = request.is_dai_style();

    let (name, nonce, evidence) = tokio::join!(
        reader.name(token),
        probe_nonce(reader, token, owner),
        probe_version_evidence(reader, token)
    );
    let name = name.change_context(Error::from(PermitError::TokenQueryFailed(format!(
        "name() on {token}"
    ))))?;

    let version = resolve_version(evidence, &name, chain, token);
    let domain = permit_domain(&name, version.as_deref(), chain, token);
    debug!(
        "Signing permit for {} on {} (dai style: {}, version: {:?}, nonce: {})",
        token, chain, is_dai_style_permit, version, nonce
    );

    let (hash, value) = if is_dai_style_permit {
        let message = dai::Permit {
            holder: owner,
            spender,
            nonce,
            expiry: deadline,
            allowed: true,
        };
        (message.eip712_signing_hash(&domain), U256::ZERO)
    } else {
        let message = eip2612::Permit {
            owner,
            spender,
            value,
            nonce,
            deadline,
        };
        (message.eip712_signing_hash(&domain), value)
    };

    let signature = signer
        .sign_hash(&hash)
        .await
        .map_err(|e| report!(Error::from(PermitError::SigningFailed(e.to_string()))))
        .attach_printable_lazy(|| format!("token: {token}"))?;

    Ok(PermitSignature {
        value,
        nonce,
        deadline,
        is_dai_style_permit,
        v: SIGNATURE_V_OFFSET + u8::from(signature.v()),
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MockChain;
    use alloy::{
        primitives::{Signature, address},
        signers::local::PrivateKeySigner,
    };
    use swap_models::constants::chains::DAI_MAINNET_ADDRESS;

    const UNI: Address = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");
    const ROUTER: Address = address!("00000000009726632680fb29d3f7a9734e3010e2");

    fn signer() -> PrivateKeySigner {
        "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
            .parse()
            .unwrap()
    }

    fn request(token: Address, owner: Address) -> PermitRequest {
        PermitRequest {
            token,
            owner,
            spender: ROUTER,
            value: U256::MAX,
            deadline: U256::from(1_700_003_600u64),
            chain: ChainId::Mainnet,
        }
    }

    fn recover(permit: &PermitSignature, hash: B256) -> Address {
        assert!(permit.v == 27 || permit.v == 28);
        Signature::new(
            U256::from_be_bytes(permit.r.0),
            U256::from_be_bytes(permit.s.0),
            permit.v == 28,
        )
        .recover_address_from_prehash(&hash)
        .unwrap()
    }

    #[tokio::test]
    async fn test_eip2612_permit_recovers_to_signer() {
        let signer = signer();
        let owner = signer.address();
        let token = MockChain::default()
            .with_name("Uniswap")
            .with_version("1")
            .with_nonces(3);

        let permit = sign_permit(&token, &signer, request(UNI, owner))
            .await
            .unwrap();
        assert!(!permit.is_dai_style_permit);
        assert_eq!(permit.value, U256::MAX);
        assert_eq!(permit.nonce, U256::from(3));

        let hash = eip2612::Permit {
            owner,
            spender: ROUTER,
            value: U256::MAX,
            nonce: U256::from(3),
            deadline: permit.deadline,
        }
        .eip712_signing_hash(&permit_domain("Uniswap", Some("1"), ChainId::Mainnet, UNI));
        assert_eq!(recover(&permit, hash), owner);
    }

    #[tokio::test]
    async fn test_dai_permit_signs_allowed_with_zero_value() {
        let signer = signer();
        let owner = signer.address();
        let dai_token: Address = DAI_MAINNET_ADDRESS.parse().unwrap();
        let token = MockChain::default()
            .with_name("Dai Stablecoin")
            .with_version("1")
            .with_nonces(0);

        let permit = sign_permit(&token, &signer, request(dai_token, owner))
            .await
            .unwrap();
        assert!(permit.is_dai_style_permit);
        assert_eq!(permit.value, U256::ZERO);

        let hash = dai::Permit {
            holder: owner,
            spender: ROUTER,
            nonce: U256::ZERO,
            expiry: permit.deadline,
            allowed: true,
        }
        .eip712_signing_hash(&permit_domain(
            "Dai Stablecoin",
            Some("1"),
            ChainId::Mainnet,
            dai_token,
        ));
        assert_eq!(recover(&permit, hash), owner);
    }

    #[tokio::test]
    async fn test_permit_without_version_uses_three_field_domain() {
        let signer = signer();
        let owner = signer.address();
        let token = MockChain::default().with_name("Uniswap").with_legacy_nonces(7);

        let permit = sign_permit(&token, &signer, request(UNI, owner))
            .await
            .unwrap();
        assert_eq!(permit.nonce, U256::from(7));

        let hash = eip2612::Permit {
            owner,
            spender: ROUTER,
            value: U256::MAX,
            nonce: U256::from(7),
            deadline: permit.deadline,
        }
        .eip712_signing_hash(&permit_domain("Uniswap", None, ChainId::Mainnet, UNI));
        assert_eq!(recover(&permit, hash), owner);
    }

    #[tokio::test]
    async fn test_name_failure_is_token_query_error() {
        let signer = signer();
        let token = MockChain::default().with_version("1").with_nonces(1);

        let err = sign_permit(&token, &signer, request(UNI, signer.address()))
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::Permit(PermitError::TokenQueryFailed(_))
        ));
    }
}
