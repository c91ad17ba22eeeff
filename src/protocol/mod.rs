// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol for talking to Tasmota devices.
//!
//! [`TasmotaClient`] sends one GET request per call to the device's
//! `/cm?cmnd=` endpoint and hands back the JSON object it answered with as a
//! [`RawPayload`]. Interpreting that payload is left to
//! [`reconcile`](crate::state::reconcile).

mod http;

pub use http::{HttpConfig, TasmotaClient};

use serde_json::{Map, Value};

use crate::error::NetworkError;

/// The JSON object a device answered with.
///
/// # Examples
///
/// ```
/// use tasmota_controls::protocol::RawPayload;
///
/// let payload = RawPayload::from_body(r#"{"POWER1":"ON","POWER2":"OFF"}"#).unwrap();
/// assert_eq!(payload.get_str("POWER1"), Some("ON"));
/// assert!(payload.get("POWER3").is_none());
///
/// assert!(RawPayload::from_body("<html>").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    fields: Map<String, Value>,
}

impl RawPayload {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::BadPayload`] if the body is not a JSON object.
    pub fn from_body(body: &str) -> Result<Self, NetworkError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(NetworkError::BadPayload(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Returns the raw value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the value of a key if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

impl From<Map<String, Value>> for RawPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object() {
        let payload = RawPayload::from_body(r#"{"POWER1":"OFF"}"#).unwrap();
        assert!(payload.contains_key("POWER1"));
        assert_eq!(payload.get_str("POWER1"), Some("OFF"));
    }

    #[test]
    fn non_string_value_has_no_str() {
        let payload = RawPayload::from_body(r#"{"POWER1":1}"#).unwrap();
        assert!(payload.contains_key("POWER1"));
        assert_eq!(payload.get_str("POWER1"), None);
    }

    #[test]
    fn array_is_bad_payload() {
        let err = RawPayload::from_body(r#"["ON"]"#).unwrap_err();
        assert!(matches!(err, NetworkError::BadPayload(_)));
    }

    #[test]
    fn empty_body_is_bad_payload() {
        let err = RawPayload::from_body("").unwrap_err();
        assert!(matches!(err, NetworkError::BadPayload(_)));
    }
}
