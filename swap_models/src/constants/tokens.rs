use crate::constants::chains::ChainId;

/// Permit deadline offset from the latest block timestamp.
pub const PERMIT_EXPIRATION_SECS: u64 = 3600;

pub const TORN_ADDRESS: &str = "0x77777feddddffc19ff86db637967013e6c6a116c";
pub const WNXM_ADDRESS: &str = "0x0d438f3b5175bebc262bf23753c1e53d03432bde";
pub const VSP_ADDRESS: &str = "0x1b40183efb4dd766f11bda7a7c3ad8982e998421";

/// Mainnet tokens signing permits under domain version "1" without
/// exposing `version()` or `DOMAIN_SEPARATOR()`.
const VERSION_ONE_TOKENS: [&str; 3] = [TORN_ADDRESS, WNXM_ADDRESS, VSP_ADDRESS];

/// Mainnet tokens known to implement `permit`.
const PERMIT_TOKENS: [&str; 15] = [
    WNXM_ADDRESS,
    "0x111111111117dc0aa78b770fa6a738034120c302", // INCH
    VSP_ADDRESS,
    "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984", // UNI
    "0x31c8eacbffdd875c74b94b077895bd78cf1e64a3", // RAD
    "0x6b175474e89094c44da98b954eedeac495271d0f", // DAI
    "0x6dea81c8171d0ba574754ef6f8b412f2ed88c54d", // LQTY
    TORN_ADDRESS,
    "0x888888435fde8e7d4c54cab67f206e4199454c60", // DFX
    "0x888888888889c00c67689029d7856aac1065ec11", // OPIUM
    "0x88acdd2a6425c3faae4bc9650fd7e27e0bebb7ab", // MIST
    "0x956f47f50a910163d8bf957cf5846d573e7f87ca", // FEI
    "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", // USDC
    "0xba100000625a3754423978a60c9317c58a424e3d", // BAL
    "0xc7283b66eb1eb5fb86327f08e1b5816b0720212b", // TRIBE
];

pub fn is_known_version_one_token(chain: ChainId, token: &str) -> bool {
    chain == ChainId::Mainnet
        && VERSION_ONE_TOKENS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(token))
}

pub fn allows_permit(chain: ChainId, token: &str) -> bool {
    chain == ChainId::Mainnet
        && PERMIT_TOKENS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(token))
}
