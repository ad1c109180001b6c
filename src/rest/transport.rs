//! HTTP transport for the Hypixel REST API.
//!
//! The [`Transport`] trait is the single network seam of the client: it issues
//! one GET and hands back the status, headers and body. [`HttpTransport`] is
//! the reqwest implementation; tests plug in scripted transports.
//!
//! Timeouts, cancellation and status classification live here too, outside
//! the trait, so every transport gets the same behaviour.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::HypixelError;
use crate::types::{CloudflareCache, Envelope};

/// One GET request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Full request URL, query string included.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
}

/// A raw HTTP response with its body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Build a response, mostly useful for custom transports and tests.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// Sends HTTP GET requests.
///
/// Implementations must read the response body to completion so the
/// connection can be reused, whatever the status.
pub trait Transport: Send + Sync + 'static {
    /// Send one GET request.
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, HypixelError>> + Send;
}

/// The reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Create a transport with request tracing.
    pub fn new() -> Result<Self, HypixelError> {
        let reqwest_client = reqwest::Client::builder().build()?;
        Ok(Self::from_client(reqwest_client))
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        let client = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HypixelError> {
        let response = self
            .client
            .get(request.url)
            .headers(request.headers)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Send a request with a timeout and an external cancellation token.
///
/// Whichever of response, timeout or cancellation comes first wins; the
/// others are dropped, which aborts the in-flight request and disarms the
/// timer. An already-cancelled token fails without sending anything.
pub async fn dispatch<T: Transport>(
    transport: &T,
    request: HttpRequest,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<HttpResponse, HypixelError> {
    if cancel.is_cancelled() {
        return Err(HypixelError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(HypixelError::Cancelled),
        _ = tokio::time::sleep(timeout) => Err(HypixelError::Timeout),
        response = transport.send(request) => response,
    }
}

/// Turn a raw response into an [`Envelope`] or a classified error.
///
/// - `200`: JSON body, plus Cloudflare cache metadata when reported
/// - `429`: [`HypixelError::RateLimited`]
/// - `403`: [`HypixelError::InvalidKey`]
/// - anything else: [`HypixelError::GenericHttp`]
pub fn classify(url: &Url, response: HttpResponse) -> Result<Envelope, HypixelError> {
    match response.status {
        StatusCode::OK => {
            let mut envelope = Envelope::from_json(&response.body)?;
            envelope.meta.cloudflare_cache = CloudflareCache::from_headers(&response.headers);
            Ok(envelope)
        }
        StatusCode::TOO_MANY_REQUESTS => Err(HypixelError::RateLimited("Hit key throttle.".into())),
        StatusCode::FORBIDDEN => Err(HypixelError::InvalidKey("Invalid API Key".into())),
        status => Err(HypixelError::GenericHttp {
            url: url.to_string(),
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CacheStatus;
    use reqwest::header::HeaderValue;

    struct SlowTransport;

    impl Transport for SlowTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HypixelError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(HttpResponse::new(StatusCode::OK, HeaderMap::new(), "{}"))
        }
    }

    fn request() -> HttpRequest {
        HttpRequest {
            url: Url::parse("https://api.hypixel.net/player?uuid=abc").unwrap(),
            headers: HeaderMap::new(),
        }
    }

    #[test]
    fn test_classify_success_with_edge_cache() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-cache-status", HeaderValue::from_static("HIT"));
        let response = HttpResponse::new(StatusCode::OK, headers, r#"{"success":true}"#);

        let envelope = classify(&request().url, response).unwrap();
        assert!(envelope.success());
        let cache = envelope.meta.cloudflare_cache.unwrap();
        assert_eq!(cache.status, CacheStatus::Hit);
        assert_eq!(cache.age, Some(0));
    }

    #[test]
    fn test_classify_error_statuses() {
        let url = request().url;
        let err = classify(&url, HttpResponse::new(StatusCode::FORBIDDEN, HeaderMap::new(), "")).unwrap_err();
        assert!(matches!(err, HypixelError::InvalidKey(_)));

        let err = classify(&url, HttpResponse::new(StatusCode::TOO_MANY_REQUESTS, HeaderMap::new(), ""))
            .unwrap_err();
        assert!(matches!(err, HypixelError::RateLimited(_)));

        let err = classify(&url, HttpResponse::new(StatusCode::SERVICE_UNAVAILABLE, HeaderMap::new(), ""))
            .unwrap_err();
        match err {
            HypixelError::GenericHttp { url, status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
                assert!(url.starts_with("https://api.hypixel.net/player"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_times_out() {
        let token = CancellationToken::new();
        let result = dispatch(&SlowTransport, request(), Duration::from_millis(500), &token).await;
        assert!(matches!(result, Err(HypixelError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_cancelled_in_flight() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });
        let result = dispatch(&SlowTransport, request(), Duration::from_secs(10), &token).await;
        assert!(matches!(result, Err(HypixelError::Cancelled)));
    }

    #[tokio::test]
    async fn test_dispatch_precancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let result = dispatch(&SlowTransport, request(), Duration::from_secs(10), &token).await;
        assert!(matches!(result, Err(HypixelError::Cancelled)));
    }
}
