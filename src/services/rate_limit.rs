use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use std::{
    future::Future,
    net::SocketAddr,
    num::NonZeroU32,
    pin::Pin,
    sync::Arc,
    time::Duration,
};
use tower::{Layer, Service};

use crate::error::ErrorResponse;

pub type KeyedRateLimiter = Arc<RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>>;

#[derive(Debug, Clone, Copy)]
pub struct ThrottleSettings {
    pub ttl: Duration,
    pub limit: u32,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            limit: 10,
        }
    }
}

const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(60);

pub fn create_rate_limiter(settings: ThrottleSettings) -> KeyedRateLimiter {
    // `limit` requests per `ttl` window per client key: full burst up front,
    // one permit back every ttl/limit
    let limit = NonZeroU32::new(settings.limit.max(1)).unwrap();
    let period = (settings.ttl / limit.get()).max(Duration::from_nanos(1));
    let quota = Quota::with_period(period).unwrap().allow_burst(limit);
    Arc::new(RateLimiter::keyed(quota))
}

/// Evicts replenished per-client buckets on an interval. The key space is
/// client-controlled (forwarded addresses), so without eviction the state
/// map grows for the life of the process. The task holds only a weak handle
/// and stops once the limiter is dropped.
pub fn spawn_housekeeping(limiter: &KeyedRateLimiter) -> tokio::task::JoinHandle<()> {
    let limiter = Arc::downgrade(limiter);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HOUSEKEEPING_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let Some(limiter) = limiter.upgrade() else {
                break;
            };
            limiter.retain_recent();
        }
    })
}

/// Client key for throttling: first hop of `x-forwarded-for` when present,
/// otherwise the peer address.
fn client_key(request: &Request<Body>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            let ip = ip.trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: KeyedRateLimiter,
}

impl RateLimitLayer {
    pub fn new(limiter: KeyedRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: KeyedRateLimiter,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let limiter = self.limiter.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let key = client_key(&request);
            if limiter.check_key(&key).is_err() {
                return Ok((
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse::new("Too many requests")),
                )
                    .into_response());
            }
            inner.call(request).await
        })
    }
}
