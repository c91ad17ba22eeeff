// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Replaying multicast publisher for device states.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::state::DeviceState;

use super::UpdateStream;

/// Multicast publisher that replays its history to late subscribers.
///
/// Every subscriber first receives all events published since the publisher
/// was created (or the most recent ones, if a history limit is set), then
/// every later event. Each subscriber has its own unbounded queue, so
/// [`publish`](Self::publish) never waits for a slow reader.
///
/// Publishing and subscribing take the same lock, which makes each publish
/// atomic: a subscriber sees every event exactly once and in publish order,
/// whether it arrives through the replay or live.
///
/// Cloning is cheap and shares the same history and subscribers.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use tasmota_controls::event::UpdatePublisher;
/// use tasmota_controls::state::DeviceState;
///
/// let publisher = UpdatePublisher::new();
/// publisher.publish(DeviceState::unreachable("TASMOTA_LIGHT"));
///
/// // Joins late, still sees the first event.
/// let mut updates = publisher.subscribe();
/// assert_eq!(updates.recv().await.unwrap().id(), "TASMOTA_LIGHT");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UpdatePublisher {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    history: VecDeque<DeviceState>,
    history_limit: Option<usize>,
    subscribers: Vec<mpsc::UnboundedSender<DeviceState>>,
    closed: bool,
}

impl UpdatePublisher {
    /// Creates a publisher with an unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(None)
    }

    /// Creates a publisher that replays at most `limit` events.
    ///
    /// Older events are dropped from the replay buffer once the limit is
    /// reached. Live subscribers still receive every event.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self::with_history(Some(limit))
    }

    fn with_history(history_limit: Option<usize>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                history: VecDeque::new(),
                history_limit,
                subscribers: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Subscribes to device states.
    ///
    /// The returned stream starts with the replay history.
    #[must_use]
    pub fn subscribe(&self) -> UpdateStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();

        for state in &inner.history {
            // The receiver is alive, sending cannot fail.
            let _ = tx.send(state.clone());
        }

        // A closed publisher hands out the replay only; dropping `tx` ends it.
        if !inner.closed {
            inner.subscribers.retain(|tx| !tx.is_closed());
            inner.subscribers.push(tx);
        }

        UpdateStream::new(rx)
    }

    /// Publishes a state to all current and future subscribers.
    ///
    /// Publishing to a closed publisher is a no-op.
    pub fn publish(&self, state: DeviceState) {
        let _ = self.publish_counted(state);
    }

    /// Publishes a state and returns the number of live subscribers that
    /// received it.
    #[must_use]
    pub fn publish_counted(&self, state: DeviceState) -> usize {
        let mut inner = self.inner.lock();
        if inner.closed {
            tracing::debug!(device = %state.id(), "Dropping update for closed publisher");
            return 0;
        }

        match inner.history_limit {
            Some(0) => {}
            Some(limit) => {
                while inner.history.len() >= limit {
                    inner.history.pop_front();
                }
                inner.history.push_back(state.clone());
            }
            None => inner.history.push_back(state.clone()),
        }

        inner
            .subscribers
            .retain(|tx| tx.send(state.clone()).is_ok());
        inner.subscribers.len()
    }

    /// Closes the publisher.
    ///
    /// Existing streams end once they have drained their queue. Later
    /// subscribers still receive the replay history, then end.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.subscribers.clear();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Returns a copy of the replay history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<DeviceState> {
        self.inner.lock().history.iter().cloned().collect()
    }

    /// Returns the number of subscribers whose stream is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .subscribers
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }
}

impl Default for UpdatePublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Health, PowerState};

    fn state(id: &str, power: PowerState) -> DeviceState {
        DeviceState::new(id, power, Health::Ok)
    }

    #[test]
    fn new_publisher_has_no_subscribers() {
        let publisher = UpdatePublisher::new();
        assert_eq!(publisher.subscriber_count(), 0);
        assert!(publisher.history().is_empty());
    }

    #[test]
    fn subscribe_increments_count() {
        let publisher = UpdatePublisher::new();

        let _rx1 = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        let _rx2 = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let publisher = UpdatePublisher::new();

        let rx = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        drop(rx);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn subscribe_prunes_dropped_subscribers() {
        let publisher = UpdatePublisher::new();
        for _ in 0..4 {
            drop(publisher.subscribe());
        }
        let _rx = publisher.subscribe();

        assert_eq!(publisher.inner.lock().subscribers.len(), 1);
        assert_eq!(publisher.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn late_subscriber_gets_full_history_first() {
        let publisher = UpdatePublisher::new();
        publisher.publish(state("a", PowerState::On));
        publisher.publish(state("b", PowerState::Off));
        publisher.publish(state("a", PowerState::Off));

        let mut rx = publisher.subscribe();
        publisher.publish(state("b", PowerState::On));

        assert_eq!(rx.recv().await.unwrap(), state("a", PowerState::On));
        assert_eq!(rx.recv().await.unwrap(), state("b", PowerState::Off));
        assert_eq!(rx.recv().await.unwrap(), state("a", PowerState::Off));
        assert_eq!(rx.recv().await.unwrap(), state("b", PowerState::On));
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test]
    async fn replay_has_exactly_the_published_events() {
        let publisher = UpdatePublisher::new();
        publisher.publish(state("a", PowerState::On));
        publisher.publish(state("b", PowerState::On));

        let mut rx = publisher.subscribe();
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test]
    async fn subscribers_are_independent() {
        let publisher = UpdatePublisher::new();
        let mut early = publisher.subscribe();
        publisher.publish(state("a", PowerState::On));
        let mut late = publisher.subscribe();

        assert_eq!(early.recv().await.unwrap().id(), "a");
        assert_eq!(late.recv().await.unwrap().id(), "a");
        assert!(early.try_recv().is_none());
        assert!(late.try_recv().is_none());
    }

    #[test]
    fn publish_counted_returns_receiver_count() {
        let publisher = UpdatePublisher::new();
        let _rx1 = publisher.subscribe();
        let _rx2 = publisher.subscribe();

        assert_eq!(publisher.publish_counted(state("a", PowerState::On)), 2);
    }

    #[test]
    fn publish_counted_prunes_dropped_subscribers() {
        let publisher = UpdatePublisher::new();
        let rx = publisher.subscribe();
        drop(rx);

        assert_eq!(publisher.publish_counted(state("a", PowerState::On)), 0);
        assert_eq!(publisher.history().len(), 1);
    }

    #[test]
    fn history_limit_keeps_latest() {
        let publisher = UpdatePublisher::with_history_limit(2);
        publisher.publish(state("a", PowerState::On));
        publisher.publish(state("b", PowerState::On));
        publisher.publish(state("c", PowerState::On));

        let ids: Vec<_> = publisher
            .history()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn zero_history_limit_keeps_nothing() {
        let publisher = UpdatePublisher::with_history_limit(0);
        publisher.publish(state("a", PowerState::On));
        assert!(publisher.history().is_empty());
    }

    #[tokio::test]
    async fn close_ends_streams_after_drain() {
        let publisher = UpdatePublisher::new();
        let mut rx = publisher.subscribe();
        publisher.publish(state("a", PowerState::On));
        publisher.close();
        publisher.publish(state("b", PowerState::On));

        assert_eq!(rx.recv().await.unwrap().id(), "a");
        assert!(rx.recv().await.is_none());
        assert!(publisher.is_closed());
    }

    #[tokio::test]
    async fn subscribe_after_close_replays_then_ends() {
        let publisher = UpdatePublisher::new();
        publisher.publish(state("a", PowerState::Off));
        publisher.close();

        let mut rx = publisher.subscribe();
        assert_eq!(rx.recv().await.unwrap().id(), "a");
        assert!(rx.recv().await.is_none());
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let publisher = UpdatePublisher::new();
        let other = publisher.clone();

        let _rx = publisher.subscribe();
        other.publish(state("a", PowerState::On));

        assert_eq!(publisher.subscriber_count(), 1);
        assert_eq!(publisher.history().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_publishes_are_not_lost() {
        let publisher = UpdatePublisher::new();
        let mut rx = publisher.subscribe();

        let mut handles = Vec::new();
        for i in 0..16 {
            let p = publisher.clone();
            handles.push(tokio::spawn(async move {
                p.publish(state(&format!("d{i}"), PowerState::On));
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let mut received = 0;
        while rx.try_recv().is_some() {
            received += 1;
        }
        assert_eq!(received, 16);
        assert_eq!(publisher.history().len(), 16);
    }
}
