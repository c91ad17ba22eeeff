// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for Tasmota devices.

use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinHandle;

use crate::command::{Command, ControlAction, PowerCommand};
use crate::error::{Error, NetworkError};
use crate::protocol::RawPayload;
use crate::registry::DeviceDescriptor;

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use tasmota_controls::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new();
/// assert_eq!(config.timeout(), Duration::from_secs(5));
///
/// let config = HttpConfig::new().with_timeout(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a [`TasmotaClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<TasmotaClient, Error> {
        TasmotaClient::new(self)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TasmotaClient
// ============================================================================

/// Stateless HTTP client for the Tasmota web API.
///
/// Uses `GET {base_address}/cm?cmnd=<command>`. Every call issues exactly one
/// request and never retries. Cloning is cheap and shares the connection pool.
///
/// # Examples
///
/// ```no_run
/// use tasmota_controls::command::ControlAction;
/// use tasmota_controls::protocol::{HttpConfig, TasmotaClient};
/// use tasmota_controls::registry::{DeviceRegistry, RegistryConfig};
///
/// # async fn example() -> tasmota_controls::Result<()> {
/// let client = TasmotaClient::new(HttpConfig::new())?;
/// let registry = DeviceRegistry::build(&RegistryConfig::default());
/// let light = registry.lookup("TASMOTA_LIGHT")?;
///
/// let payload = client.send(light, ControlAction::QueryStatus).await?;
/// println!("{:?}", payload.get_str("POWER1"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TasmotaClient {
    client: Client,
    timeout: Duration,
}

impl TasmotaClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: HttpConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL for an action on a device.
    #[must_use]
    pub fn build_url(descriptor: &DeviceDescriptor, action: ControlAction) -> String {
        let command = PowerCommand::new(descriptor.command_key(), action);
        format!(
            "{}/cm?cmnd={}",
            descriptor.base_address(),
            urlencoding::encode(&command.to_http_command())
        )
    }

    /// Sends an action to a device and returns the parsed answer.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Unreachable`] on timeout, connection or DNS
    /// failure and on a non-success status, and [`NetworkError::BadPayload`]
    /// if the body is not a JSON object.
    pub async fn send(
        &self,
        descriptor: &DeviceDescriptor,
        action: ControlAction,
    ) -> Result<RawPayload, NetworkError> {
        let url = Self::build_url(descriptor, action);

        tracing::debug!(device = %descriptor.id(), url = %url, "Sending HTTP command");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unreachable(&e))?;

        if !response.status().is_success() {
            return Err(NetworkError::Unreachable(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.unreachable(&e))?;

        tracing::debug!(device = %descriptor.id(), body = %body, "Received HTTP response");

        RawPayload::from_body(&body)
    }

    /// Sends an action on the runtime's worker pool.
    ///
    /// Returns immediately; the handle resolves when the request completes.
    /// Must be called from within a tokio runtime.
    pub fn spawn_send(
        &self,
        descriptor: DeviceDescriptor,
        action: ControlAction,
    ) -> JoinHandle<Result<RawPayload, NetworkError>> {
        let client = self.clone();
        tokio::spawn(async move { client.send(&descriptor, action).await })
    }

    fn unreachable(&self, err: &reqwest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::Unreachable(format!(
                "request timed out after {} ms",
                self.timeout.as_millis()
            ))
        } else {
            NetworkError::Unreachable(err.to_string())
        }
    }
}
