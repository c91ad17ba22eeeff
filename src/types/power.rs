// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power and health values reported for a device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized power state of a device.
///
/// Tasmota reports relay state as the strings `"ON"` and `"OFF"`. Anything
/// that cannot be determined is [`PowerState::Unknown`].
///
/// # Examples
///
/// ```
/// use tasmota_controls::types::PowerState;
///
/// assert_eq!(PowerState::from(true), PowerState::On);
/// assert_eq!(PowerState::Off.as_str(), "OFF");
/// assert_eq!(PowerState::Unknown.as_str(), "UNKNOWN");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    /// Power is on.
    On,
    /// Power is off.
    Off,
    /// State could not be determined.
    #[default]
    Unknown,
}

impl PowerState {
    /// The token Tasmota uses for a relay that is on.
    pub const ON_TOKEN: &'static str = "ON";

    /// Returns the string representation used in Tasmota payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => Self::ON_TOKEN,
            Self::Off => "OFF",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` if the device is known to be on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns `true` if the state is known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Whether the last request to a device got an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    /// The device answered.
    Ok,
    /// The request timed out or the connection failed.
    Unreachable,
}

impl Health {
    /// Returns `true` if the device answered.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}
