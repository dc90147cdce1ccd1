use alloy::primitives::U256;
use error_stack::{ResultExt, report};
use futures::future::{AbortRegistration, Abortable};
use reqwest::Url;
use serde_json::Value;
use swap_models::{
    constants::{addresses::AddressRegistry, chains::ChainId},
    models::{
        params::{QuoteParams, Slippage, SlippageParams},
        quote::{
            CrosschainQuote, Quote, QuoteError, QuoteResponse, SocketChainsData, has_error_flag,
        },
    },
};
use tracing::{debug, warn};

use crate::{
    config::{AddressTrustMode, SdkConfig},
    error::{Error, SdkResult, from_models_error},
    quotes::{
        transport::{HttpTransport, QuoteTransport},
        url::{
            build_chains_url, build_claim_bridge_quote_url, build_crosschain_quote_url,
            build_quote_url, build_slippage_url,
        },
        wrap::wrap_quote,
    },
    sanity::{check_address, verify_crosschain_quote},
};

/// Fetches quotes from the swap API and applies the configured address checks.
pub struct QuoteClient<T: QuoteTransport = HttpTransport> {
    config: SdkConfig,
    transport: T,
    registry: &'static AddressRegistry,
}

impl QuoteClient<HttpTransport> {
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let transport = HttpTransport::new(config.rate_limit, config.rate_limit_burst)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: QuoteTransport> QuoteClient<T> {
    pub fn with_transport(config: SdkConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            registry: AddressRegistry::global(),
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    async fn fetch_json(&self, url: Url, abort: Option<AbortRegistration>) -> SdkResult<Value> {
        debug!("GET {}", url);
        let request = self.transport.get_json(url);
        match abort {
            Some(registration) => Abortable::new(request, registration)
                .await
                .map_err(|_| report!(Error::Cancelled))?,
            None => request.await,
        }
    }

    /// Same-chain quote. `None` when neither amount is numeric.
    ///
    /// Wrapping and unwrapping the native asset never hits the network.
    pub async fn get_quote(
        &self,
        params: &QuoteParams,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<Option<QuoteResponse<Quote>>> {
        let Some(amount) = params.trade_amount() else {
            return Ok(None);
        };
        if let Some(quote) = wrap_quote(params, amount) {
            return Ok(Some(QuoteResponse::Quote(quote)));
        }
        let Some(url) = build_quote_url(&self.config.api_base_url, params, self.registry)? else {
            return Ok(None);
        };

        let value = self.fetch_json(url, abort).await?;
        QuoteResponse::from_value(value)
            .map(Some)
            .map_err(|report| {
                let context = from_models_error(report.current_context());
                report.change_context(context)
            })
    }

    pub async fn get_crosschain_quote(
        &self,
        params: &QuoteParams,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<Option<QuoteResponse<CrosschainQuote>>> {
        let Some(url) = build_crosschain_quote_url(&self.config.api_base_url, params)? else {
            return Ok(None);
        };
        self.fetch_crosschain_quote(url, abort).await.map(Some)
    }

    pub async fn get_claim_bridge_quote(
        &self,
        params: &QuoteParams,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<Option<QuoteResponse<CrosschainQuote>>> {
        let Some(url) = build_claim_bridge_quote_url(&self.config.api_base_url, params)? else {
            return Ok(None);
        };
        self.fetch_crosschain_quote(url, abort).await.map(Some)
    }

    async fn fetch_crosschain_quote(
        &self,
        url: Url,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<QuoteResponse<CrosschainQuote>> {
        let value = self.fetch_json(url, abort).await?;
        let response = QuoteResponse::<CrosschainQuote>::from_value(value).map_err(|report| {
            let context = from_models_error(report.current_context());
            report.change_context(context)
        })?;

        let quote = match response {
            QuoteResponse::Quote(quote) => quote,
            QuoteResponse::Error(error) => return Ok(QuoteResponse::Error(error)),
        };
        match self.apply_address_trust(quote) {
            Ok(quote) => Ok(QuoteResponse::Quote(quote)),
            Err(report) => {
                warn!("Cross-chain quote failed address check: {:?}", report);
                let message = match report.current_context() {
                    Error::AddressTrust(error) => error.to_string(),
                    other => other.to_string(),
                };
                Ok(QuoteResponse::Error(QuoteError::new(message)))
            }
        }
    }

    fn apply_address_trust(&self, quote: CrosschainQuote) -> SdkResult<CrosschainQuote> {
        match self.config.address_trust {
            AddressTrustMode::NonNull => {
                check_address(quote.quote.to.as_deref()).map_err(|e| report!(Error::from(e)))?;
                Ok(quote)
            }
            AddressTrustMode::Registry => verify_crosschain_quote(self.registry, quote),
        }
    }

    /// Twice the bridge's minimum refuel amount from `chain` to `to_chain`.
    pub async fn get_min_refuel_amount(
        &self,
        chain: ChainId,
        to_chain: ChainId,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<Option<U256>> {
        let url = build_chains_url(&self.config.api_base_url)?;
        let value = self.fetch_json(url, abort).await?;
        let chains: SocketChainsData = serde_json::from_value(value)
            .change_context(Error::SerdeDeserialize(
                "Failed to deserialize chains data".to_string(),
            ))?;

        Ok(chains
            .min_refuel_amount(chain.id(), to_chain.id())
            .map(|min_amount| min_amount.saturating_mul(U256::from(2))))
    }

    pub async fn get_slippage(
        &self,
        params: &SlippageParams,
        abort: Option<AbortRegistration>,
    ) -> SdkResult<Option<QuoteResponse<Slippage>>> {
        let Some(url) = build_slippage_url(&self.config.api_base_url, params)? else {
            return Ok(None);
        };
        let mut value = self.fetch_json(url, abort).await?;

        if has_error_flag(&value) {
            let error: QuoteError = serde_json::from_value(value).change_context(
                Error::SerdeDeserialize("Failed to deserialize slippage error".to_string()),
            )?;
            return Ok(Some(QuoteResponse::Error(error)));
        }

        let payload = if value.get("data").is_some() {
            value["data"].take()
        } else {
            value
        };
        let slippage: Slippage = serde_json::from_value(payload).change_context(
            Error::SerdeDeserialize("Failed to deserialize slippage".to_string()),
        )?;
        Ok(Some(QuoteResponse::Quote(slippage)))
    }
}
