use std::num::NonZeroU32;

use error_stack::{ResultExt, report};
use reqwest::Url;
use swap_models::network::RateLimitWindow;

use crate::error::{Error, SdkResult};

pub const DEFAULT_API_BASE_URL: &str = "https://swap.p.rainbow.me";

pub const ENV_API_BASE_URL: &str = "SWAP_API_BASE_URL";
pub const ENV_ADDRESS_TRUST: &str = "SWAP_ADDRESS_TRUST";
pub const ENV_RATE_LIMIT: &str = "SWAP_API_RATE_LIMIT";
pub const ENV_RATE_LIMIT_BURST: &str = "SWAP_API_RATE_LIMIT_BURST";

/// Which destination check runs on cross-chain quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressTrustMode {
    /// The quote's own `to` must be present and non-zero.
    #[default]
    NonNull,
    /// The destination must match the trusted table; override sources get
    /// the trusted allowance target.
    Registry,
}

impl AddressTrustMode {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "non-null" | "nonnull" => Some(AddressTrustMode::NonNull),
            "registry" => Some(AddressTrustMode::Registry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SdkConfig {
    pub api_base_url: Url,
    pub address_trust: AddressTrustMode,
    pub rate_limit: Option<RateLimitWindow>,
    pub rate_limit_burst: Option<NonZeroU32>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            address_trust: AddressTrustMode::default(),
            rate_limit: None,
            rate_limit_burst: None,
        }
    }
}

fn default_api_base_url() -> Url {
    // Constant input, checked by `test_default_config`.
    match Url::parse(DEFAULT_API_BASE_URL) {
        Ok(url) => url,
        Err(_) => unreachable!("default API base URL is valid"),
    }
}

impl SdkConfig {
    pub fn with_base_url(api_base_url: &str) -> SdkResult<Self> {
        let api_base_url = Url::parse(api_base_url)
            .change_context(Error::InvalidRequest("Invalid API base URL".to_string()))
            .attach_printable_lazy(|| format!("url: {api_base_url}"))?;
        Ok(Self {
            api_base_url,
            ..Self::default()
        })
    }

    /// Loads `.env` if present, then reads the `SWAP_*` variables.
    pub fn from_env() -> SdkResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SdkResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            config.api_base_url = Url::parse(url.trim())
                .change_context(Error::InvalidRequest(format!("Invalid {ENV_API_BASE_URL}")))
                .attach_printable_lazy(|| format!("value: {url}"))?;
        }

        if let Some(mode) = lookup(ENV_ADDRESS_TRUST) {
            config.address_trust = AddressTrustMode::from_string(&mode).ok_or_else(|| {
                report!(Error::InvalidRequest(format!("Invalid {ENV_ADDRESS_TRUST}")))
                    .attach_printable(format!("expected `non-null` or `registry`, got `{mode}`"))
            })?;
        }

        if let Some(limit) = lookup(ENV_RATE_LIMIT) {
            config.rate_limit = Some(RateLimitWindow::from_string(&limit).ok_or_else(|| {
                report!(Error::InvalidRequest(format!("Invalid {ENV_RATE_LIMIT}")))
                    .attach_printable(format!("expected `<n>s|m|h|d`, got `{limit}`"))
            })?);
        }

        if let Some(burst) = lookup(ENV_RATE_LIMIT_BURST) {
            let burst = burst
                .trim()
                .parse::<NonZeroU32>()
                .change_context(Error::InvalidRequest(format!(
                    "Invalid {ENV_RATE_LIMIT_BURST}"
                )))
                .attach_printable_lazy(|| format!("value: {burst}"))?;
            config.rate_limit_burst = Some(burst);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.api_base_url.as_str(), "https://swap.p.rainbow.me/");
        assert_eq!(config.address_trust, AddressTrustMode::NonNull);
        assert!(config.rate_limit.is_none());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = SdkConfig::from_lookup(lookup(&[
            (ENV_API_BASE_URL, "http://localhost:8080"),
            (ENV_ADDRESS_TRUST, "registry"),
            (ENV_RATE_LIMIT, "10s"),
            (ENV_RATE_LIMIT_BURST, "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.address_trust, AddressTrustMode::Registry);
        assert_eq!(
            config.rate_limit,
            Some(RateLimitWindow::PerSecond(NonZeroU32::new(10).unwrap()))
        );
        assert_eq!(config.rate_limit_burst, NonZeroU32::new(3));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = SdkConfig::from_lookup(lookup(&[(ENV_ADDRESS_TRUST, "yolo")])).unwrap_err();
        assert!(matches!(err.current_context(), Error::InvalidRequest(_)));

        for bad in [
            (ENV_RATE_LIMIT, "10x"),
            (ENV_RATE_LIMIT_BURST, "0"),
            (ENV_API_BASE_URL, "not a url"),
        ] {
            assert!(SdkConfig::from_lookup(lookup(&[bad])).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_with_base_url() {
        let config = SdkConfig::with_base_url("http://127.0.0.1:3000").unwrap();
        assert_eq!(config.api_base_url.port(), Some(3000));
        assert!(SdkConfig::with_base_url("::").is_err());
    }
}
