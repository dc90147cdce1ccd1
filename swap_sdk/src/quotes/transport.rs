use std::num::NonZeroU32;

use async_trait::async_trait;
use error_stack::ResultExt;
use reqwest::Url;
use serde_json::Value;
use swap_models::{
    models::quote::has_error_flag,
    network::{RateLimitWindow, client_rate_limit::Client, http::handle_reqwest_response},
};
use tracing::error;

use crate::error::{Error, SdkResult, from_models_error};

/// Fetches a JSON document from the quote API.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn get_json(&self, url: Url) -> SdkResult<Value>;
}

/// Production transport over reqwest, rate limited when configured.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(rate_limit: Option<RateLimitWindow>, burst: Option<NonZeroU32>) -> SdkResult<Self> {
        let client = Client::new(rate_limit, burst)
            .change_context(Error::InvalidRequest("Invalid rate limit".to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    async fn get_json(&self, url: Url) -> SdkResult<Value> {
        let request = self
            .client
            .inner_client()
            .get(url.clone())
            .build()
            .change_context(Error::ReqwestError("Failed to build request".to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .change_context(Error::ReqwestError("Failed to send request".to_string()))
            .attach_printable_lazy(|| format!("url: {url}"))?;

        match handle_reqwest_response::<Value>(response).await {
            Ok(value) => Ok(value),
            Err(report) => {
                // The API answers some refusals with a non-2xx status and an
                // `{error: true}` body; those are upstream errors, not transport ones.
                if let swap_models::error::Error::ReqwestError(body) = report.current_context() {
                    if let Ok(value) = serde_json::from_str::<Value>(body) {
                        if has_error_flag(&value) {
                            return Ok(value);
                        }
                    }
                }
                error!(%url, "Quote API request failed: {:?}", report);
                let context = from_models_error(report.current_context());
                Err(report
                    .change_context(context)
                    .attach_printable(format!("url: {url}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::init_tracing_in_tests;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_transport_returns_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/quote"))
            .and(query_param("chainId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sellAmount": "1"})))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(None, None).unwrap();
        let url = Url::parse(&format!("{}/v1/quote?chainId=1", server.uri())).unwrap();
        let value = transport.get_json(url).await.unwrap();
        assert_eq!(value, json!({"sellAmount": "1"}));
    }

    #[tokio::test]
    async fn test_http_transport_passes_upstream_errors_through() {
        init_tracing_in_tests();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/quote"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": true, "message": "insufficient liquidity"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(None, None).unwrap();
        let url = Url::parse(&format!("{}/v1/quote", server.uri())).unwrap();
        let value = transport.get_json(url).await.unwrap();
        assert_eq!(value["message"], "insufficient liquidity");
    }

    #[tokio::test]
    async fn test_http_transport_server_failure_is_reqwest_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(None, None).unwrap();
        let url = Url::parse(&format!("{}/v1/chains", server.uri())).unwrap();
        let err = transport.get_json(url).await.unwrap_err();
        assert_eq!(
            err.current_context(),
            &Error::ReqwestError("bad gateway".to_string())
        );
    }
}
