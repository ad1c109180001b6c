//! Throttle notifications.
//!
//! The client announces when it starts sleeping out an exhausted window and
//! when it wakes up again. Delivery goes through a broadcast channel, so a slow
//! or absent subscriber never holds up a call.

use time::OffsetDateTime;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Default capacity of the event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// A rate limit notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitEvent {
    /// The client started throttling calls.
    Limited {
        /// The per-window limit last reported by the server.
        limit: i64,
        /// When the client will resume, reset offset included.
        reset: OffsetDateTime,
    },
    /// The throttle sleep finished.
    Reset,
}

/// Sender side of the rate limit notifications.
#[derive(Debug, Clone)]
pub struct RateLimitEvents {
    sender: broadcast::Sender<RateLimitEvent>,
}

impl RateLimitEvents {
    /// Create a channel buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event. Never blocks; dropped if nobody listens.
    pub fn emit(&self, event: RateLimitEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<RateLimitEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to future events as a [`Stream`](futures_util::Stream).
    ///
    /// Lagging subscribers see a `BroadcastStreamRecvError` item instead of
    /// the events they missed.
    pub fn stream(&self) -> BroadcastStream<RateLimitEvent> {
        BroadcastStream::new(self.subscribe())
    }
}

impl Default for RateLimitEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_emit_without_subscribers() {
        let events = RateLimitEvents::default();
        events.emit(RateLimitEvent::Reset);
    }

    #[tokio::test]
    async fn test_stream_receives_in_order() {
        let events = RateLimitEvents::default();
        let mut stream = events.stream();
        let reset = OffsetDateTime::UNIX_EPOCH;

        events.emit(RateLimitEvent::Limited { limit: 120, reset });
        events.emit(RateLimitEvent::Reset);

        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            RateLimitEvent::Limited { limit: 120, reset }
        );
        assert_eq!(stream.next().await.unwrap().unwrap(), RateLimitEvent::Reset);
    }
}
