//! Scripted transport for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::HypixelError;
use crate::rest::transport::{HttpRequest, HttpResponse, Transport};

type Handler = dyn Fn(usize, &HttpRequest) -> Result<HttpResponse, HypixelError> + Send + Sync;

/// Answers every request with a handler and records what was sent.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    handler: Arc<Handler>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new<F>(handler: F) -> Self
    where
        F: Fn(usize, &HttpRequest) -> Result<HttpResponse, HypixelError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answer `200` with `body`.
    pub(crate) fn ok(body: &'static str) -> Self {
        Self::new(move |_, _| Ok(HttpResponse::new(StatusCode::OK, HeaderMap::new(), body)))
    }

    /// Always answer `200` with `body` and the given rate limit headers.
    pub(crate) fn ok_with_quota(body: &'static str, limit: &'static str, remaining: &'static str) -> Self {
        Self::new(move |_, _| {
            let mut headers = HeaderMap::new();
            headers.insert("ratelimit-limit", HeaderValue::from_static(limit));
            headers.insert("ratelimit-remaining", HeaderValue::from_static(remaining));
            headers.insert("ratelimit-reset", HeaderValue::from_static("10"));
            Ok(HttpResponse::new(StatusCode::OK, headers, body))
        })
    }

    /// Wait this long before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HypixelError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(index, &request)
    }
}
