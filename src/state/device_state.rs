// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized state of one device.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Health, PowerState};

/// Snapshot of a device's power state and reachability.
///
/// Values are never edited; a change is a new `DeviceState`.
///
/// # Examples
///
/// ```
/// use tasmota_controls::state::DeviceState;
/// use tasmota_controls::types::{Health, PowerState};
///
/// let state = DeviceState::new("TASMOTA_LIGHT", PowerState::On, Health::Ok);
/// assert!(state.power().is_on());
///
/// let gone = DeviceState::unreachable("TASMOTA_LIGHT");
/// assert_eq!(gone.power(), PowerState::Unknown);
/// assert_eq!(gone.health(), Health::Unreachable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceState {
    id: String,
    power: PowerState,
    health: Health,
}

impl DeviceState {
    /// Creates a state value.
    #[must_use]
    pub fn new(id: impl Into<String>, power: PowerState, health: Health) -> Self {
        Self {
            id: id.into(),
            power,
            health,
        }
    }

    /// State of a device that could not be reached or is not registered.
    #[must_use]
    pub fn unreachable(id: impl Into<String>) -> Self {
        Self::new(id, PowerState::Unknown, Health::Unreachable)
    }

    /// Returns the control id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the health indicator.
    #[must_use]
    pub fn health(&self) -> Health {
        self.health
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.id, self.power, self.health)
    }
}
