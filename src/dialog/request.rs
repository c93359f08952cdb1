//! Settlement pair for a single dialog request

use super::types::{DialogError, DialogResult};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

/// Create a connected settler/future pair
pub(crate) fn channel() -> (Settler, PendingDialog) {
    let (sender, receiver) = oneshot::channel();
    (Settler { sender }, PendingDialog { receiver })
}

/// Completion handle kept by the controller while a request is outstanding
///
/// Dropping it without settling makes the paired [`PendingDialog`] resolve to
/// [`DialogError::Abandoned`].
pub(crate) struct Settler {
    sender: oneshot::Sender<DialogResult<bool>>,
}

impl Settler {
    pub(crate) fn resolve(self, value: bool) {
        self.settle(Ok(value));
    }

    pub(crate) fn reject(self, error: DialogError) {
        self.settle(Err(error));
    }

    fn settle(self, result: DialogResult<bool>) {
        if self.sender.send(result).is_err() {
            debug!("Modal result dropped: caller no longer waiting");
        }
    }
}

/// Future returned by `open`, resolves once the user responds
#[must_use = "a dialog result is only observed by awaiting the PendingDialog"]
pub struct PendingDialog {
    receiver: oneshot::Receiver<DialogResult<bool>>,
}

impl PendingDialog {
    /// Non-blocking check for a settled result
    ///
    /// Returns `None` while the request is outstanding. A result is only handed
    /// out once; later calls report [`DialogError::Abandoned`].
    pub fn try_result(&mut self) -> Option<DialogResult<bool>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(DialogError::Abandoned)),
        }
    }
}

impl Future for PendingDialog {
    type Output = DialogResult<bool>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(DialogError::Abandoned)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_resolve() {
        let (settler, pending) = channel();
        settler.resolve(true);
        assert!(matches!(pending.await, Ok(true)));
    }

    #[tokio::test]
    async fn test_reject() {
        let (settler, pending) = channel();
        settler.reject(DialogError::EscapePressed);
        assert!(matches!(pending.await, Err(DialogError::EscapePressed)));
    }

    #[tokio::test]
    async fn test_dropped_settler_abandons() {
        let (settler, pending) = channel();
        drop(settler);
        assert!(matches!(pending.await, Err(DialogError::Abandoned)));
    }

    #[test]
    fn test_pending_until_settled() {
        let (settler, mut pending) = channel();
        assert!((&mut pending).now_or_never().is_none());
        assert!(pending.try_result().is_none());

        settler.resolve(false);
        assert!(matches!(pending.try_result(), Some(Ok(false))));
    }

    #[test]
    fn test_settle_after_caller_dropped() {
        let (settler, pending) = channel();
        drop(pending);
        settler.reject(DialogError::UserClosed);
    }
}
