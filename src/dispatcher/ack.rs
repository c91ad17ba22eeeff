// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-action acknowledgment.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Outcome of a control action as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ack {
    /// The device answered the command.
    Accepted,
    /// The control is unknown or the device could not be reached.
    Rejected,
}

impl Ack {
    /// Returns `true` for [`Ack::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Future resolving to the [`Ack`] of one action.
///
/// Resolves exactly once. If the task serving the action goes away without
/// answering (for example because the runtime shut down), it resolves to
/// [`Ack::Rejected`].
#[derive(Debug)]
#[must_use = "the acknowledgment is lost if the handle is dropped"]
pub struct AckHandle {
    rx: oneshot::Receiver<Ack>,
}

/// Sending half of an [`AckHandle`]. Consumed by [`resolve`](Self::resolve).
#[derive(Debug)]
pub(crate) struct AckSender {
    tx: oneshot::Sender<Ack>,
}

impl AckSender {
    pub(crate) fn resolve(self, ack: Ack) {
        if self.tx.send(ack).is_err() {
            tracing::debug!(%ack, "Acknowledgment dropped by caller");
        }
    }
}

impl AckHandle {
    pub(crate) fn channel() -> (AckSender, Self) {
        let (tx, rx) = oneshot::channel();
        (AckSender { tx }, Self { rx })
    }

    /// A handle that is already resolved.
    pub(crate) fn resolved(ack: Ack) -> Self {
        let (tx, handle) = Self::channel();
        tx.resolve(ack);
        handle
    }

    /// Calls `callback` with the acknowledgment once it is known.
    ///
    /// Returns immediately. Must be called from within a tokio runtime.
    pub fn on_complete<F>(self, callback: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Ack) + Send + 'static,
    {
        tokio::spawn(async move { callback(self.await) })
    }
}

impl Future for AckHandle {
    type Output = Ack;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(Ack::Rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolved_handle() {
        assert_eq!(AckHandle::resolved(Ack::Accepted).await, Ack::Accepted);
    }

    #[tokio::test]
    async fn dropped_sender_is_rejected() {
        let (tx, handle) = AckHandle::channel();
        drop(tx);
        assert_eq!(handle.await, Ack::Rejected);
    }

    #[tokio::test]
    async fn callback_receives_ack() {
        let (tx, handle) = AckHandle::channel();
        let (seen_tx, seen_rx) = oneshot::channel();

        let task = handle.on_complete(move |ack| {
            let _ = seen_tx.send(ack);
        });
        tx.resolve(Ack::Accepted);

        task.await.unwrap();
        assert_eq!(seen_rx.await.unwrap(), Ack::Accepted);
    }

    #[test]
    fn display() {
        assert_eq!(Ack::Accepted.to_string(), "accepted");
        assert!(!Ack::Rejected.is_accepted());
    }
}
