// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the controls engine.
//!
//! Only construction-time failures (building an HTTP client, loading a
//! configuration) surface as [`Error`]. Everything that happens while talking
//! to devices is absorbed by the dispatcher and turned into a
//! [`DeviceState`](crate::state::DeviceState) or an [`Ack`](crate::Ack).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested control id is not part of the registry.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// A request to a device failed.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The registry configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single request to a device.
///
/// Both variants are expected at runtime. Neither is retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Timeout, connection refusal, DNS failure or a non-success HTTP status.
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device answered, but the body is not a JSON object.
    #[error("malformed payload: {0}")]
    BadPayload(String),
}

impl NetworkError {
    /// Returns `true` if the device did not answer at all.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadPayload(err.to_string())
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_not_found_display() {
        let err = Error::DeviceNotFound("TASMOTA_FAN".to_string());
        assert_eq!(err.to_string(), "device not found: TASMOTA_FAN");
    }

    #[test]
    fn error_from_network_error() {
        let err: Error = NetworkError::Unreachable("timed out".to_string()).into();
        assert!(matches!(err, Error::Network(NetworkError::Unreachable(_))));
    }

    #[test]
    fn json_error_is_bad_payload() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = NetworkError::from(json_err);
        assert!(matches!(err, NetworkError::BadPayload(_)));
        assert!(!err.is_unreachable());
    }

    #[test]
    fn unreachable_display() {
        let err = NetworkError::Unreachable("connection refused".to_string());
        assert_eq!(err.to_string(), "device unreachable: connection refused");
        assert!(err.is_unreachable());
    }
}
