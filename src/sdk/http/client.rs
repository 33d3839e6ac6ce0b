use super::cache::ResponseCache;
use super::error::FetchError;
use crate::sdk::util::rate_limit::ProviderGate;
use rand::Rng;
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MIN_REQUEST_DELAY: Duration = Duration::from_millis(100);
const MAX_REQUEST_DELAY: Duration = Duration::from_millis(400);

/// A response body, either fresh from the network or replayed from cache.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub body: String,
    pub from_cache: bool,
}

impl CachedResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP client that consults a shared [`ResponseCache`] before going to the
/// network. Clones share the same cache.
#[derive(Clone)]
pub struct CachedClient {
    http: Client,
    cache: Arc<Mutex<ResponseCache>>,
    min_delay: Duration,
    max_delay: Duration,
}

impl CachedClient {
    pub fn new(cache: ResponseCache) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("chargeway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, cache))
    }

    pub fn with_http(http: Client, cache: ResponseCache) -> Self {
        Self {
            http,
            cache: Arc::new(Mutex::new(cache)),
            min_delay: MIN_REQUEST_DELAY,
            max_delay: MAX_REQUEST_DELAY,
        }
    }

    /// Overrides the random pause taken before every uncached request.
    pub fn with_request_delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max.max(min);
        self
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    /// Sends `request` unless a fresh cached body exists under `cache_key`
    /// (or the request URL when no key is given).
    ///
    /// Only successful responses whose body parses as JSON are stored.
    /// Non-success responses are handed back untouched.
    pub async fn fetch_with_cache(
        &self,
        request: Request,
        cache_key: Option<&str>,
    ) -> Result<CachedResponse, FetchError> {
        let key = cache_key
            .map(str::to_owned)
            .unwrap_or_else(|| request.url().to_string());

        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        self.pause().await;
        log::debug!("[CACHE MISS] {} -> {} {}", key, request.method(), request.url().path());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<serde_json::Value>(&body)?;
            self.lock_cache().insert(key, body.clone());
        }

        Ok(CachedResponse {
            status,
            body,
            from_cache: false,
        })
    }

    /// Same as [`fetch_with_cache`](Self::fetch_with_cache), but a miss
    /// first waits for `gate`. Cache hits never touch the gate or its quota.
    pub async fn fetch_gated(
        &self,
        request: Request,
        cache_key: &str,
        gate: &ProviderGate,
    ) -> Result<CachedResponse, FetchError> {
        if let Some(hit) = self.cached(cache_key) {
            return Ok(hit);
        }
        let _turn = gate.enter().await;
        self.fetch_with_cache(request, Some(cache_key)).await
    }

    fn cached(&self, key: &str) -> Option<CachedResponse> {
        let body = self.lock_cache().get(key).map(str::to_owned)?;
        log::debug!("[CACHE HIT] {}", key);
        Some(CachedResponse {
            status: StatusCode::OK,
            body,
            from_cache: true,
        })
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn pause(&self) {
        if self.max_delay.is_zero() {
            return;
        }
        let delay = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.min_delay..=self.max_delay)
        };
        tokio::time::sleep(delay).await;
    }
}
