//! Cancellation token shared between the controller and its workers.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// A one-way cancellation flag.
///
/// Clones share the same flag. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    flag: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    /// Mark the token cancelled and wake everything waiting on it.
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.flag.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `fut` to completion unless the token is cancelled first.
    ///
    /// Returns `None` on cancellation; `fut` is dropped without being
    /// polled again.
    pub async fn run_until_cancelled<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
