//! Cooperative cancellation for in-flight fetches.

use crate::error::SdkError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation flag shared between a fetch and its owner.
///
/// Once cancelled it stays cancelled; create a new token per navigation.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`Self::cancel`] has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so `wait_for` cannot fail while we wait.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Run `fut` unless `token` fires first.
pub(crate) async fn cancellable<T, F>(token: Option<&CancelToken>, fut: F) -> Result<T, SdkError>
where
    F: Future<Output = Result<T, SdkError>>,
{
    let Some(token) = token else {
        return fut.await;
    };
    if token.is_cancelled() {
        return Err(SdkError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SdkError::Cancelled),
        result = fut => result,
    }
}
