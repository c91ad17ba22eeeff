// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping from network outcomes to device states.

use crate::error::NetworkError;
use crate::protocol::RawPayload;
use crate::registry::DeviceDescriptor;
use crate::types::{Health, PowerState};

use super::DeviceState;

/// Turns the outcome of a request into a [`DeviceState`].
///
/// | Outcome | Power | Health |
/// |---------|-------|--------|
/// | payload with `command_key == "ON"` | `On` | `Ok` |
/// | payload with `command_key` set to anything else | `Off` | `Ok` |
/// | payload without `command_key` | `Unknown` | `Ok` |
/// | [`NetworkError::BadPayload`] | `Unknown` | `Ok` |
/// | [`NetworkError::Unreachable`] | `Unknown` | `Unreachable` |
///
/// A device that answered is reachable even when its answer says nothing
/// about its state.
///
/// # Examples
///
/// ```
/// use tasmota_controls::protocol::RawPayload;
/// use tasmota_controls::registry::{DeviceRegistry, RegistryConfig};
/// use tasmota_controls::state::reconcile;
/// use tasmota_controls::types::{Health, PowerState};
///
/// let registry = DeviceRegistry::build(&RegistryConfig::default());
/// let light = registry.lookup("TASMOTA_LIGHT").unwrap();
///
/// let payload = RawPayload::from_body(r#"{"POWER1":"ON"}"#).unwrap();
/// let state = reconcile(light, &Ok(payload));
/// assert_eq!(state.power(), PowerState::On);
/// assert_eq!(state.health(), Health::Ok);
/// ```
#[must_use]
pub fn reconcile(
    descriptor: &DeviceDescriptor,
    outcome: &Result<RawPayload, NetworkError>,
) -> DeviceState {
    let (power, health) = match outcome {
        Ok(payload) => (power_from_payload(payload, descriptor.command_key()), Health::Ok),
        Err(NetworkError::BadPayload(_)) => (PowerState::Unknown, Health::Ok),
        Err(NetworkError::Unreachable(_)) => (PowerState::Unknown, Health::Unreachable),
    };

    DeviceState::new(descriptor.id(), power, health)
}

fn power_from_payload(payload: &RawPayload, key: &str) -> PowerState {
    match payload.get(key) {
        None => PowerState::Unknown,
        Some(value) => PowerState::from(value.as_str() == Some(PowerState::ON_TOKEN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DeviceCategory, DeviceRegistry, RegistryConfig};

    fn payload(body: &str) -> Result<RawPayload, NetworkError> {
        RawPayload::from_body(body)
    }

    fn descriptors() -> Vec<DeviceDescriptor> {
        DeviceRegistry::build(&RegistryConfig::default())
            .into_iter()
            .collect()
    }

    #[test]
    fn on_token_is_on() {
        for d in descriptors() {
            let body = format!(r#"{{"{}":"ON"}}"#, d.command_key());
            let state = reconcile(&d, &payload(&body));
            assert_eq!(state.id(), d.id());
            assert_eq!(state.power(), PowerState::On);
            assert_eq!(state.health(), Health::Ok);
        }
    }

    #[test]
    fn off_token_is_off() {
        for d in descriptors() {
            let body = format!(r#"{{"{}":"OFF"}}"#, d.command_key());
            let state = reconcile(&d, &payload(&body));
            assert_eq!(state.power(), PowerState::Off);
            assert_eq!(state.health(), Health::Ok);
        }
    }

    #[test]
    fn other_value_is_off() {
        let d = &descriptors()[0];
        let state = reconcile(d, &payload(r#"{"POWER1":"on"}"#));
        assert_eq!(state.power(), PowerState::Off);

        let state = reconcile(d, &payload(r#"{"POWER1":1}"#));
        assert_eq!(state.power(), PowerState::Off);
    }

    #[test]
    fn only_own_key_counts() {
        let descriptors = descriptors();
        let body = payload(r#"{"POWER1":"ON","POWER2":"OFF"}"#);
        assert_eq!(reconcile(&descriptors[0], &body).power(), PowerState::On);
        assert_eq!(reconcile(&descriptors[1], &body).power(), PowerState::Off);
    }

    #[test]
    fn missing_key_is_unknown_but_reachable() {
        let d = &descriptors()[1];
        let state = reconcile(d, &payload(r#"{"POWER1":"ON"}"#));
        assert_eq!(state.power(), PowerState::Unknown);
        assert_eq!(state.health(), Health::Ok);
    }

    #[test]
    fn bad_payload_is_unknown_but_reachable() {
        let d = &descriptors()[0];
        let state = reconcile(d, &payload("not json"));
        assert_eq!(state.power(), PowerState::Unknown);
        assert_eq!(state.health(), Health::Ok);
    }

    #[test]
    fn unreachable_is_unknown_unreachable() {
        let mut all = descriptors();
        all.push(DeviceDescriptor::new(
            "other",
            "Other",
            DeviceCategory::Light,
            "10.0.0.1",
            "POWER7",
        ));
        for d in all {
            let err = Err(NetworkError::Unreachable("timed out".to_string()));
            assert_eq!(reconcile(&d, &err), DeviceState::unreachable(d.id()));
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let d = &descriptors()[0];
        let outcome = payload(r#"{"POWER1":"ON"}"#);
        assert_eq!(reconcile(d, &outcome), reconcile(d, &outcome));
    }
}
