// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static description of one controllable device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of control a device is presented as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// A light.
    Light,
    /// Any other appliance that is simply switched on or off.
    GenericOnOff,
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::GenericOnOff => f.write_str("generic_on_off"),
        }
    }
}

/// How to address and label one device.
///
/// Descriptors are immutable. They are produced by
/// [`DeviceRegistry::build`](super::DeviceRegistry::build) and compared
/// structurally, so two builds from the same configuration are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceDescriptor {
    id: String,
    display_name: String,
    category: DeviceCategory,
    base_address: String,
    command_key: String,
}

impl DeviceDescriptor {
    /// Creates a descriptor.
    ///
    /// A `base_address` without a scheme gets `http://` prepended, and
    /// trailing slashes are removed.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: DeviceCategory,
        base_address: impl AsRef<str>,
        command_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category,
            base_address: normalize_base_address(base_address.as_ref()),
            command_key: command_key.into(),
        }
    }

    /// Returns the stable control id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the device category.
    #[must_use]
    pub fn category(&self) -> DeviceCategory {
        self.category
    }

    /// Returns the base URL, e.g. `http://192.168.1.225`.
    #[must_use]
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Returns the Tasmota command key, e.g. `POWER1`.
    ///
    /// The same key names the power value in the device's JSON answers.
    #[must_use]
    pub fn command_key(&self) -> &str {
        &self.command_key
    }
}

fn normalize_base_address(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}
