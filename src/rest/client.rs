//! Hypixel REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::ApiKey;
use crate::cache::{ResponseCache, cache_key};
use crate::error::HypixelError;
use crate::rate_limit::{
    AdmissionPermit, AdmissionQueue, DEFAULT_EVENT_CAPACITY, RateLimitData, RateLimitEvent,
    RateLimitEvents, RateLimitState, millis_to_datetime, now_millis,
};
use crate::rest::endpoints::{HYPIXEL_BASE_URL, requires_auth};
use crate::rest::options::RequestOptions;
use crate::rest::transport::{HttpRequest, HttpTransport, Transport, classify, dispatch};
use crate::types::Envelope;

/// Header carrying the API key on authenticated requests.
pub const API_KEY_HEADER: &str = "api-key";

/// Default number of retries after a transient failure.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default timeout of a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Retries after a transient failure. A call runs at most `retries + 1` times.
    pub retries: u32,
    /// Timeout of a single request.
    pub timeout: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Extra wait added to the server-reported reset time when throttling.
    pub rate_limit_reset_offset: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            rate_limit_reset_offset: Duration::ZERO,
        }
    }
}

fn default_user_agent() -> String {
    format!("hypixel-api-client/{}", env!("CARGO_PKG_VERSION"))
}

/// The Hypixel REST API client.
///
/// Cloning is cheap and every clone shares the rate limit state, the
/// admission queue, the event channel and the cache. Use one client per API
/// key.
///
/// # Example
///
/// ```rust,no_run
/// use hypixel_api_client::{HypixelClient, RequestOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HypixelClient::new("00000000-0000-0000-0000-000000000000")?;
///
///     let guild = client.guild_by_name("Mini Squid", &RequestOptions::default()).await?;
///     println!("Guild: {}", guild.result["name"]);
///
///     if let Some(ratelimit) = guild.meta.ratelimit() {
///         println!("{} of {} requests left", ratelimit.remaining, ratelimit.limit);
///     }
///     Ok(())
/// }
/// ```
pub struct HypixelClient<T: Transport = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
    base_url: Url,
    config: ClientConfig,
    api_key: HeaderValue,
    user_agent: HeaderValue,
    rate_limit: RateLimitState,
    queue: AdmissionQueue,
    events: RateLimitEvents,
    cache: Option<Arc<dyn ResponseCache>>,
}

/// One logical call, alive for the duration of its retry loop.
#[derive(Debug)]
struct ActionableCall {
    path: String,
    url: Url,
    requires_auth: bool,
    retries_used: u32,
    retry_budget: u32,
    cancel: CancellationToken,
}

impl HypixelClient {
    /// Create a client with default settings.
    pub fn new(key: impl Into<String>) -> Result<Self, HypixelError> {
        Self::builder(key).build()
    }

    /// Create a client with the key from `HYPIXEL_API_KEY`.
    pub fn from_env() -> Result<Self, HypixelError> {
        HypixelClientBuilder::with_api_key(ApiKey::from_env()?).build()
    }

    /// Create a new client builder.
    pub fn builder(key: impl Into<String>) -> HypixelClientBuilder {
        HypixelClientBuilder::new(key)
    }
}

impl<T: Transport> HypixelClient<T> {
    /// The resolved settings.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// A snapshot of the last reported rate limit.
    pub fn rate_limit(&self) -> RateLimitData {
        self.inner.rate_limit.read()
    }

    /// Subscribe to throttle notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RateLimitEvent> {
        self.inner.events.subscribe()
    }

    /// Subscribe to throttle notifications as a stream.
    pub fn events(&self) -> BroadcastStream<RateLimitEvent> {
        self.inner.events.stream()
    }

    /// Query any endpoint and get the raw envelope back.
    ///
    /// This is the method every endpoint wrapper goes through and can be used
    /// for endpoints this crate has no wrapper for.
    ///
    /// ```rust,no_run
    /// # use hypixel_api_client::{HypixelClient, RequestOptions};
    /// # async fn run(client: HypixelClient) -> Result<(), hypixel_api_client::HypixelError> {
    /// let response = client
    ///     .call("findGuild", &[("byName", "Mini Squid")], &RequestOptions::default())
    ///     .await?;
    /// println!("{:?}", response.get("guild"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(
        &self,
        path: &str,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<Envelope, HypixelError> {
        let cache = match &self.inner.cache {
            Some(cache) if !options.bypass_cache => cache,
            _ => return self.execute(self.actionable_call(path, params, options)?).await,
        };

        let key = cache_key(path, params);
        if let Some(mut envelope) = cache.get(&key).await? {
            tracing::debug!("Cache hit for {}", key);
            envelope.meta.cached = Some(true);
            return Ok(envelope);
        }

        tracing::debug!("Cache miss for {}", key);
        let envelope = self.execute(self.actionable_call(path, params, options)?).await?;
        if !options.no_store {
            cache.set(&key, &envelope).await?;
        }
        Ok(envelope)
    }

    fn actionable_call(
        &self,
        path: &str,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<ActionableCall, HypixelError> {
        let mut url = self.inner.base_url.join(path)?;
        if !params.is_empty() {
            let query = serde_urlencoded::to_string(params)
                .map_err(|e| HypixelError::Config(format!("Invalid query parameters: {}", e)))?;
            url.set_query(Some(&query));
        }

        Ok(ActionableCall {
            path: path.to_string(),
            url,
            requires_auth: requires_auth(path),
            retries_used: 0,
            retry_budget: self.inner.config.retries,
            cancel: options.cancellation(),
        })
    }

    /// Run a call until it succeeds, fails fatally or runs out of retries.
    async fn execute(&self, mut call: ActionableCall) -> Result<Envelope, HypixelError> {
        loop {
            match self.attempt(&call).await {
                Ok(envelope) => return Ok(envelope),
                Err(error) if error.is_fatal() || call.retries_used >= call.retry_budget => {
                    return Err(error);
                }
                Err(error) => {
                    call.retries_used += 1;
                    tracing::debug!(
                        "Retrying {} ({}/{}) after: {}",
                        call.path,
                        call.retries_used,
                        call.retry_budget,
                        error
                    );
                }
            }
        }
    }

    /// One pass through queue, throttle and transport.
    ///
    /// The admission permit is held until the attempt returns, whatever the
    /// outcome, and a retry queues up again behind later callers.
    async fn attempt(&self, call: &ActionableCall) -> Result<Envelope, HypixelError> {
        let inner = &*self.inner;

        let _permit: Option<AdmissionPermit<'_>> = if call.requires_auth {
            let permit = inner.queue.wait(&call.cancel).await?;
            self.throttle(&call.cancel).await?;
            Some(permit)
        } else {
            None
        };

        let request = self.request(call);
        let response = dispatch(&inner.transport, request, inner.config.timeout, &call.cancel).await?;

        if call.requires_auth {
            inner.rate_limit.report(&response.headers);
        }

        let mut envelope = classify(&call.url, response)?;
        if call.requires_auth {
            envelope.meta.ratelimit = Some(inner.rate_limit.read());
        }
        Ok(envelope)
    }

    /// Sleep out an exhausted window. Must run while holding the admission slot.
    async fn throttle(&self, cancel: &CancellationToken) -> Result<(), HypixelError> {
        let inner = &*self.inner;
        let snapshot = inner.rate_limit.read();
        if !snapshot.is_exhausted() {
            return Ok(());
        }

        let offset = i64::try_from(inner.config.rate_limit_reset_offset.as_millis()).unwrap_or(i64::MAX);
        let resume_at = snapshot.reset.saturating_add(offset);
        let wait_ms = resume_at.saturating_sub(now_millis()).max(0);
        let reset = millis_to_datetime(resume_at).unwrap_or_else(OffsetDateTime::now_utc);

        tracing::debug!("Rate limit exhausted, waiting {}ms", wait_ms);
        inner.events.emit(RateLimitEvent::Limited {
            limit: snapshot.limit,
            reset,
        });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HypixelError::Cancelled),
            _ = tokio::time::sleep(Duration::from_millis(wait_ms.unsigned_abs())) => {}
        }

        inner.events.emit(RateLimitEvent::Reset);
        Ok(())
    }

    fn request(&self, call: &ActionableCall) -> HttpRequest {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.inner.user_agent.clone());
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if call.requires_auth {
            headers.insert(HeaderName::from_static(API_KEY_HEADER), self.inner.api_key.clone());
        }
        HttpRequest {
            url: call.url.clone(),
            headers,
        }
    }
}

impl<T: Transport> Clone for HypixelClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for HypixelClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypixelClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .field("rate_limit", &self.inner.rate_limit.read())
            .field("has_cache", &self.inner.cache.is_some())
            .finish()
    }
}

/// Builder for [`HypixelClient`].
pub struct HypixelClientBuilder {
    api_key: Result<ApiKey, HypixelError>,
    base_url: String,
    config: ClientConfig,
    cache: Option<Arc<dyn ResponseCache>>,
    event_capacity: usize,
}

impl HypixelClientBuilder {
    /// Create a builder. An empty key is reported by [`build`](Self::build).
    pub fn new(key: impl Into<String>) -> Self {
        Self::from_key_result(ApiKey::new(key))
    }

    /// Create a builder from an already validated key.
    pub fn with_api_key(key: ApiKey) -> Self {
        Self::from_key_result(Ok(key))
    }

    fn from_key_result(api_key: Result<ApiKey, HypixelError>) -> Self {
        Self {
            api_key,
            base_url: HYPIXEL_BASE_URL.to_string(),
            config: ClientConfig::default(),
            cache: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set how many times a transient failure is retried.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set the timeout of a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Wait this much longer than the server-reported reset when throttling.
    pub fn rate_limit_reset_offset(mut self, offset: Duration) -> Self {
        self.config.rate_limit_reset_offset = offset;
        self
    }

    /// Cache responses in `cache`.
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set how many events a slow subscriber may fall behind.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Build the client on top of reqwest.
    pub fn build(self) -> Result<HypixelClient, HypixelError> {
        let transport = HttpTransport::new()?;
        self.build_with_transport(transport)
    }

    /// Build the client on top of a custom transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<HypixelClient<T>, HypixelError> {
        let api_key = self.api_key?.header_value()?;

        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| HypixelError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|_| HypixelError::Config("User agent is not a valid header value".into()))?;

        Ok(HypixelClient {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                config: self.config,
                api_key,
                user_agent,
                rate_limit: RateLimitState::new(),
                queue: AdmissionQueue::new(),
                events: RateLimitEvents::new(self.event_capacity),
                cache: self.cache,
            }),
        })
    }
}

impl std::fmt::Debug for HypixelClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypixelClientBuilder")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .field("has_cache", &self.cache.is_some())
            .finish()
    }
}
