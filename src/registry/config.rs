// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::DeviceCategory;

/// Configuration the registry is built from.
///
/// The default configuration holds the two built-in controls. A different
/// device set can be loaded from JSON:
///
/// ```
/// use tasmota_controls::registry::RegistryConfig;
///
/// let config = RegistryConfig::from_json(r#"{
///     "host": "192.168.1.40",
///     "devices": [
///         { "id": "desk", "display_name": "Desk Lamp", "category": "light", "command_key": "POWER1" }
///     ]
/// }"#).unwrap();
/// assert_eq!(config.devices.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base address shared by devices that do not set their own.
    pub host: String,
    /// The devices, in presentation order.
    pub devices: Vec<DeviceConfig>,
}

impl RegistryConfig {
    /// Address of the built-in Tasmota board.
    pub const DEFAULT_HOST: &'static str = "http://192.168.1.225";
    /// Control id of the built-in light.
    pub const LIGHT_ID: &'static str = "TASMOTA_LIGHT";
    /// Control id of the built-in speakers switch.
    pub const SPEAKER_ID: &'static str = "TASMOTA_SPEAKER";

    /// Creates an empty configuration for the given host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            devices: Vec::new(),
        }
    }

    /// Adds a device.
    #[must_use]
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON does not describe a configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
            .with_device(DeviceConfig::new(
                Self::LIGHT_ID,
                "Tasmota Light",
                DeviceCategory::Light,
                "POWER1",
            ))
            .with_device(DeviceConfig::new(
                Self::SPEAKER_ID,
                "Tasmota Speakers",
                DeviceCategory::GenericOnOff,
                "POWER2",
            ))
    }
}

/// Configuration of a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Stable control id.
    pub id: String,
    /// Human readable name.
    pub display_name: String,
    /// How the control is presented.
    pub category: DeviceCategory,
    /// Tasmota command key, e.g. `POWER1`.
    pub command_key: String,
    /// Overrides [`RegistryConfig::host`] for this device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
}

impl DeviceConfig {
    /// Creates a device configuration on the registry's shared host.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: DeviceCategory,
        command_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category,
            command_key: command_key.into(),
            base_address: None,
        }
    }

    /// Sets a device specific base address.
    #[must_use]
    pub fn with_base_address(mut self, address: impl Into<String>) -> Self {
        self.base_address = Some(address.into());
        self
    }
}
