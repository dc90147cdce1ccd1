use error_stack::report;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter, clock::DefaultClock};
use reqwest::{Client as ReqwestClient, Error as ReqwestError, Request, Response};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::{Error, ModelResult};
use crate::network::RateLimitWindow;

/// HTTP client used for quote API calls, optionally throttled client-side.
#[derive(Debug, Clone)]
pub enum Client {
    RateLimited(RateLimitedClient),
    Unrestricted(ReqwestClient),
}

impl Client {
    pub fn new(limit: Option<RateLimitWindow>, burst: Option<NonZeroU32>) -> ModelResult<Self> {
        match limit {
            Some(limit) => Ok(Client::RateLimited(RateLimitedClient::new(limit, burst)?)),
            None => Ok(Client::Unrestricted(ReqwestClient::new())),
        }
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.execute(req).await,
            Client::Unrestricted(unrestricted_client) => unrestricted_client.execute(req).await,
        }
    }

    pub fn inner_client(&self) -> &ReqwestClient {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.inner_client(),
            Client::Unrestricted(unrestricted_client) => unrestricted_client,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitedClient {
    inner: ReqwestClient,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimitedClient {
    pub fn new(limit: RateLimitWindow, burst: Option<NonZeroU32>) -> ModelResult<Self> {
        let mut quota = match limit {
            RateLimitWindow::PerSecond(allowed) => Quota::per_second(allowed),
            RateLimitWindow::PerMinute(allowed) => Quota::per_minute(allowed),
            RateLimitWindow::Custom { period } => Quota::with_period(period).ok_or_else(|| {
                report!(Error::ParseError).attach_printable(format!(
                    "Rate limit period must be non-zero, got {period:?}"
                ))
            })?,
        };
        if let Some(burst) = burst {
            quota = quota.allow_burst(burst);
        }
        Ok(Self {
            inner: ReqwestClient::new(),
            limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    pub fn inner_client(&self) -> &ReqwestClient {
        &self.inner
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        self.limiter.until_ready().await;
        self.inner.execute(req).await
    }
}
