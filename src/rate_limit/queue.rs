//! Single-slot FIFO admission queue.
//!
//! Authenticated calls pass through this gate before they look at the rate
//! limit state, so the "are we limited, then sleep" sequence never runs for two
//! calls at once. Waiters are admitted strictly in arrival order.
//!
//! # Example
//!
//! ```rust
//! use hypixel_api_client::rate_limit::AdmissionQueue;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), hypixel_api_client::HypixelError> {
//! let queue = AdmissionQueue::new();
//! let token = CancellationToken::new();
//!
//! let permit = queue.wait(&token).await?;
//! assert!(!queue.is_idle());
//! permit.release();
//! assert!(queue.is_idle());
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_util::sync::CancellationToken;

use crate::error::HypixelError;

/// A strict FIFO gate with a single slot.
///
/// Backed by a fair one-permit semaphore. A cancelled waiter is dropped from
/// the semaphore's wait list without disturbing the others.
#[derive(Debug)]
pub struct AdmissionQueue {
    slot: Semaphore,
    waiting: AtomicUsize,
}

impl AdmissionQueue {
    /// Create an empty queue with its slot free.
    pub fn new() -> Self {
        Self {
            slot: Semaphore::new(1),
            waiting: AtomicUsize::new(0),
        }
    }

    /// Wait for the slot.
    ///
    /// Fails with [`HypixelError::Cancelled`] if `cancel` fires first, in
    /// which case the waiter is removed and will never be granted.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<AdmissionPermit<'_>, HypixelError> {
        if cancel.is_cancelled() {
            return Err(HypixelError::Cancelled);
        }

        self.waiting.fetch_add(1, Ordering::SeqCst);
        let _waiting = WaitingGuard(&self.waiting);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HypixelError::Cancelled),
            permit = self.slot.acquire() => permit
                .map(|permit| AdmissionPermit { _permit: permit })
                .map_err(|_| HypixelError::Cancelled),
        }
    }

    /// Whether no grant is outstanding.
    pub fn is_idle(&self) -> bool {
        self.slot.available_permits() == 1
    }

    /// Number of callers currently waiting for the slot.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }
}

impl Default for AdmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The outstanding grant of an [`AdmissionQueue`].
///
/// Dropping the permit releases the slot to the next waiter, so every exit
/// path of the holder releases it.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct AdmissionPermit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl AdmissionPermit<'_> {
    /// Release the slot explicitly.
    pub fn release(self) {}
}

struct WaitingGuard<'a>(&'a AtomicUsize);

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_single_grant_outstanding() {
        let queue = AdmissionQueue::new();
        let token = CancellationToken::new();

        let first = queue.wait(&token).await.unwrap();
        let second = tokio::time::timeout(Duration::from_millis(20), queue.wait(&token)).await;
        assert!(second.is_err(), "second waiter must block while the first holds the slot");

        first.release();
        let second = queue.wait(&token).await.unwrap();
        drop(second);
        assert!(queue.is_idle());
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = Arc::new(AdmissionQueue::new());
        let order = Arc::new(Mutex::new(Vec::new()));
        let token = CancellationToken::new();

        let gate = queue.wait(&token).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let task_queue = queue.clone();
            let order = order.clone();
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                let _permit = task_queue.wait(&token).await.unwrap();
                order.lock().await.push(i);
            }));
            // Let the task enqueue before spawning the next one.
            while queue.waiting() < i + 1 {
                tokio::task::yield_now().await;
            }
        }

        gate.release();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().await, (0..8).collect::<Vec<_>>());
        assert!(queue.is_idle());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_removed() {
        let queue = Arc::new(AdmissionQueue::new());
        let root = CancellationToken::new();
        let doomed = CancellationToken::new();

        let gate = queue.wait(&root).await.unwrap();

        let cancelled = {
            let queue = queue.clone();
            let doomed = doomed.clone();
            tokio::spawn(async move { queue.wait(&doomed).await.map(drop) })
        };
        while queue.waiting() < 1 {
            tokio::task::yield_now().await;
        }
        let survivor = {
            let queue = queue.clone();
            let root = root.clone();
            tokio::spawn(async move { queue.wait(&root).await.map(drop) })
        };
        while queue.waiting() < 2 {
            tokio::task::yield_now().await;
        }

        doomed.cancel();
        assert!(matches!(cancelled.await.unwrap(), Err(HypixelError::Cancelled)));
        assert_eq!(queue.waiting(), 1);

        gate.release();
        survivor.await.unwrap().unwrap();
        assert!(queue.is_idle());
        assert_eq!(queue.waiting(), 0);
    }

    #[tokio::test]
    async fn test_already_cancelled_fails_fast() {
        let queue = AdmissionQueue::new();
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(queue.wait(&token).await, Err(HypixelError::Cancelled)));
        assert!(queue.is_idle());
    }
}
