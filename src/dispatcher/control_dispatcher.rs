// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry points used by the host.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::command::ControlAction;
use crate::error::{Error, NetworkError};
use crate::event::{UpdatePublisher, UpdateStream};
use crate::protocol::{HttpConfig, TasmotaClient};
use crate::registry::{DeviceDescriptor, DeviceRegistry, RegistryConfig};
use crate::state::{DeviceState, reconcile};

use super::ack::{Ack, AckHandle};
use super::session::Session;

/// Resolves control ids, talks to devices and publishes their state.
///
/// None of the entry points wait for the network: requests run on spawned
/// tokio tasks, and their results arrive through the session's
/// [`UpdateStream`] and the per-action [`AckHandle`]. Failures never surface
/// as errors; they become [`DeviceState`] values or [`Ack::Rejected`].
///
/// `open_session` and `perform_action` spawn tasks and must be called from
/// within a tokio runtime.
///
/// Cloning is cheap; clones share the current session.
///
/// # Examples
///
/// ```no_run
/// use tasmota_controls::ControlDispatcher;
/// use tasmota_controls::command::ControlAction;
///
/// #[tokio::main]
/// async fn main() -> tasmota_controls::Result<()> {
///     let dispatcher = ControlDispatcher::new()?;
///
///     let ids: Vec<String> = dispatcher
///         .list_controls()
///         .iter()
///         .map(|d| d.id().to_string())
///         .collect();
///
///     let mut updates = dispatcher.open_session(ids);
///     let ack = dispatcher.perform_action("TASMOTA_LIGHT", ControlAction::Toggle).await;
///     println!("toggle {ack}");
///
///     while let Some(state) = updates.recv().await {
///         println!("{state}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ControlDispatcher {
    config: Arc<RegistryConfig>,
    client: TasmotaClient,
    history_limit: Option<usize>,
    session: Arc<RwLock<Option<Session>>>,
}

impl ControlDispatcher {
    /// Creates a dispatcher for the built-in devices with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, Error> {
        ControlDispatcherBuilder::new().build()
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ControlDispatcherBuilder {
        ControlDispatcherBuilder::new()
    }

    fn registry(&self) -> DeviceRegistry {
        DeviceRegistry::build(&self.config)
    }

    fn new_publisher(&self) -> UpdatePublisher {
        match self.history_limit {
            Some(limit) => UpdatePublisher::with_history_limit(limit),
            None => UpdatePublisher::new(),
        }
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Returns every registered control. No network access.
    #[must_use]
    pub fn list_controls(&self) -> Vec<DeviceDescriptor> {
        self.registry().into_iter().collect()
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Starts a fresh subscription session for the given control ids.
    ///
    /// The previous session, if any, is ended: its pending status queries are
    /// dropped and its streams finish. A status query is spawned for every
    /// distinct id; each result is published as it completes. Ids that are
    /// not registered are published as unreachable right away.
    ///
    /// Returns the new session's stream without waiting for any query.
    pub fn open_session<I, S>(&self, ids: I) -> UpdateStream
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = self.registry();
        let session = Session::new(self.new_publisher());
        let stream = session.publisher().subscribe();

        if let Some(previous) = self.session.write().replace(session.clone()) {
            tracing::debug!("Ending previous session");
            previous.end();
        }

        let mut seen = HashSet::new();
        for id in ids {
            let id = id.into();
            if !seen.insert(id.clone()) {
                continue;
            }

            match registry.lookup(&id) {
                Ok(descriptor) => self.spawn_status_query(&session, descriptor.clone()),
                Err(e) => {
                    tracing::warn!(device = %id, error = %e, "Unknown control in session");
                    session.publisher().publish(DeviceState::unreachable(id));
                }
            }
        }

        tracing::info!(devices = seen.len(), "Session opened");
        stream
    }

    /// Subscribes to the current session without starting new queries.
    ///
    /// The stream replays everything the session published so far. Returns
    /// `None` if no session is open.
    #[must_use]
    pub fn subscribe(&self) -> Option<UpdateStream> {
        self.session
            .read()
            .as_ref()
            .map(|s| s.publisher().subscribe())
    }

    /// Ends the current session, if any.
    ///
    /// Pending status queries are dropped and the session's streams finish.
    /// Actions already in flight still complete but have nowhere to publish.
    pub fn close_session(&self) {
        if let Some(session) = self.session.write().take() {
            tracing::info!("Session closed");
            session.end();
        }
    }

    fn spawn_status_query(&self, session: &Session, descriptor: DeviceDescriptor) {
        let client = self.client.clone();
        let publisher = session.publisher().clone();
        let cancel = session.token();

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!(device = %descriptor.id(), "Session ended, status query dropped");
                }
                outcome = client.send(&descriptor, ControlAction::QueryStatus) => {
                    if let Err(e) = &outcome {
                        tracing::warn!(device = %descriptor.id(), error = %e, "Status query failed");
                    }
                    publisher.publish(reconcile(&descriptor, &outcome));
                }
            }
        });
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Performs an action on a control.
    ///
    /// Unknown ids are rejected immediately and nothing is published.
    /// Otherwise the command is sent on a spawned task:
    ///
    /// - if the device answers, the state derived from its answer is
    ///   published to the session current at that moment, then the action is
    ///   accepted. An answer without the power key publishes `Unknown`.
    /// - if the device cannot be reached, the action is rejected and nothing
    ///   is published, so the last known state stays in place.
    pub fn perform_action(&self, id: &str, action: ControlAction) -> AckHandle {
        let registry = self.registry();
        let descriptor = match registry.lookup(id) {
            Ok(descriptor) => descriptor.clone(),
            Err(e) => {
                tracing::warn!(device = %id, %action, error = %e, "Rejecting action");
                return AckHandle::resolved(Ack::Rejected);
            }
        };

        let (ack, handle) = AckHandle::channel();
        let client = self.client.clone();
        let session = Arc::clone(&self.session);

        tokio::spawn(async move {
            tracing::debug!(device = %descriptor.id(), %action, "Performing action");
            let outcome = client.send(&descriptor, action).await;

            if let Err(NetworkError::Unreachable(reason)) = &outcome {
                tracing::warn!(device = %descriptor.id(), %action, %reason, "Action failed");
                ack.resolve(Ack::Rejected);
                return;
            }

            let state = reconcile(&descriptor, &outcome);
            let publisher = session.read().as_ref().map(|s| s.publisher().clone());
            match publisher {
                Some(publisher) => publisher.publish(state),
                None => tracing::debug!(device = %descriptor.id(), "No open session for update"),
            }
            ack.resolve(Ack::Accepted);
        });

        handle
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Queries the given controls one after another and returns their states.
    ///
    /// Publishes nothing. Results follow the order of `ids`; unknown ids
    /// come back as unreachable.
    pub async fn snapshot<I, S>(&self, ids: I) -> Vec<DeviceState>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = self.registry();
        let mut states = Vec::new();

        for id in ids {
            let id = id.as_ref();
            let state = match registry.lookup(id) {
                Ok(descriptor) => {
                    let outcome = self.client.send(descriptor, ControlAction::QueryStatus).await;
                    reconcile(descriptor, &outcome)
                }
                Err(_) => DeviceState::unreachable(id),
            };
            states.push(state);
        }

        states
    }
}

/// Builder for a [`ControlDispatcher`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tasmota_controls::ControlDispatcher;
/// use tasmota_controls::registry::RegistryConfig;
///
/// let dispatcher = ControlDispatcher::builder()
///     .with_registry_config(RegistryConfig::default())
///     .with_timeout(Duration::from_secs(2))
///     .with_history_limit(64)
///     .build()
///     .unwrap();
/// assert_eq!(dispatcher.list_controls().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlDispatcherBuilder {
    registry: RegistryConfig,
    http: HttpConfig,
    history_limit: Option<usize>,
}

impl ControlDispatcherBuilder {
    /// Creates a builder with the built-in devices and a 5 second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device configuration.
    #[must_use]
    pub fn with_registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry = config;
        self
    }

    /// Sets the HTTP configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http = config;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Bounds the replay history of each session.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Builds the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<ControlDispatcher, Error> {
        Ok(ControlDispatcher {
            config: Arc::new(self.registry),
            client: TasmotaClient::new(self.http)?,
            history_limit: self.history_limit,
            session: Arc::new(RwLock::new(None)),
        })
    }
}
