// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power commands addressed by a device's command key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// An action a host can request on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Invert the current power state.
    Toggle,
    /// Switch the device on.
    TurnOn,
    /// Switch the device off.
    TurnOff,
    /// Read the current power state without changing it.
    QueryStatus,
}

impl ControlAction {
    /// Returns the numeric payload Tasmota expects, or `None` for a query.
    #[must_use]
    pub const fn payload(&self) -> Option<u8> {
        match self {
            Self::TurnOff => Some(0),
            Self::TurnOn => Some(1),
            Self::Toggle => Some(2),
            Self::QueryStatus => None,
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Toggle => "toggle",
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::QueryStatus => "query_status",
        };
        f.write_str(name)
    }
}

/// Command to query or change the relay behind a command key.
///
/// # Examples
///
/// ```
/// use tasmota_controls::command::{Command, ControlAction, PowerCommand};
///
/// let cmd = PowerCommand::new("POWER1", ControlAction::TurnOff);
/// assert_eq!(cmd.name(), "POWER1");
/// assert_eq!(cmd.payload(), Some("0".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerCommand {
    key: String,
    action: ControlAction,
}

impl PowerCommand {
    /// Creates a command for the given key and action.
    #[must_use]
    pub fn new(key: impl Into<String>, action: ControlAction) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }
}

impl Command for PowerCommand {
    fn name(&self) -> String {
        self.key.clone()
    }

    fn payload(&self) -> Option<String> {
        self.action.payload().map(|p| p.to_string())
    }
}
