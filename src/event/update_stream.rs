// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscriber side of the [`UpdatePublisher`](super::UpdatePublisher).

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::Stream;

use crate::state::DeviceState;

/// Stream of device states for one subscriber.
///
/// Yields the replay history followed by live events. Ends once the
/// publisher is closed and the queue is drained. Dropping the stream only
/// unsubscribes; it does not cancel anything in flight.
#[derive(Debug)]
pub struct UpdateStream {
    rx: mpsc::UnboundedReceiver<DeviceState>,
}

impl UpdateStream {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<DeviceState>) -> Self {
        Self { rx }
    }

    /// Waits for the next state.
    ///
    /// Returns `None` once the publisher is closed and the queue is empty.
    pub async fn recv(&mut self) -> Option<DeviceState> {
        self.rx.recv().await
    }

    /// Returns the next state if one is queued, without waiting.
    pub fn try_recv(&mut self) -> Option<DeviceState> {
        self.rx.try_recv().ok()
    }
}

impl Stream for UpdateStream {
    type Item = DeviceState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use tokio_stream::StreamExt;

    use crate::event::UpdatePublisher;
    use crate::state::DeviceState;

    #[tokio::test]
    async fn works_with_stream_combinators() {
        let publisher = UpdatePublisher::new();
        publisher.publish(DeviceState::unreachable("a"));
        publisher.publish(DeviceState::unreachable("b"));
        publisher.close();

        let ids: Vec<String> = publisher
            .subscribe()
            .map(|s| s.id().to_string())
            .collect()
            .await;
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn try_recv_on_empty_stream() {
        let publisher = UpdatePublisher::new();
        let mut rx = publisher.subscribe();
        assert!(rx.try_recv().is_none());
    }
}
