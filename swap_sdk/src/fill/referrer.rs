use alloy::primitives::{Bytes, keccak256};

pub const REFERRER_CODE_LEN: usize = 4;

/// First four bytes of `keccak256(referrer)`.
pub fn referrer_code(referrer: &str) -> [u8; REFERRER_CODE_LEN] {
    let hash = keccak256(referrer.as_bytes());
    let mut code = [0u8; REFERRER_CODE_LEN];
    code.copy_from_slice(&hash[..REFERRER_CODE_LEN]);
    code
}

/// Appends the referrer tag after the ABI-encoded call.
pub fn append_referrer(mut calldata: Vec<u8>, referrer: Option<&str>) -> Bytes {
    if let Some(referrer) = referrer {
        calldata.extend_from_slice(&referrer_code(referrer));
    }
    Bytes::from(calldata)
}
