// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tasmota command definitions.
//!
//! A command is the `cmnd` query parameter of the Tasmota web API: a name such
//! as `POWER1`, optionally followed by a space and a payload (`POWER1 2`).
//!
//! # Examples
//!
//! ```
//! use tasmota_controls::command::{Command, ControlAction, PowerCommand};
//!
//! let toggle = PowerCommand::new("POWER1", ControlAction::Toggle);
//! assert_eq!(toggle.to_http_command(), "POWER1 2");
//!
//! let query = PowerCommand::new("POWER1", ControlAction::QueryStatus);
//! assert_eq!(query.to_http_command(), "POWER1");
//! ```

mod power;

pub use power::{ControlAction, PowerCommand};

/// A command that can be sent to a Tasmota device.
pub trait Command {
    /// Returns the command name, for example `"POWER1"`.
    fn name(&self) -> String;

    /// Returns the command payload, if any.
    ///
    /// Query commands have no payload.
    fn payload(&self) -> Option<String>;

    /// Returns the full command string for HTTP requests.
    ///
    /// Format: `<name> <payload>` or just `<name>` if no payload.
    fn to_http_command(&self) -> String {
        match self.payload() {
            Some(p) => format!("{} {}", self.name(), p),
            None => self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_http_format() {
        let cmd = PowerCommand::new("POWER2", ControlAction::TurnOn);
        assert_eq!(cmd.to_http_command(), "POWER2 1");
    }

    #[test]
    fn command_http_format_no_payload() {
        let cmd = PowerCommand::new("POWER2", ControlAction::QueryStatus);
        assert_eq!(cmd.to_http_command(), "POWER2");
    }
}
