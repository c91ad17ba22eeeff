// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable id to descriptor mapping.

use std::collections::HashMap;

use crate::error::Error;

use super::{DeviceDescriptor, RegistryConfig};

/// The set of controllable devices.
///
/// A registry is a plain value: build it whenever fresh descriptor data is
/// needed and drop it afterwards. Iteration follows configuration order.
///
/// # Examples
///
/// ```
/// use tasmota_controls::registry::{DeviceRegistry, RegistryConfig};
///
/// let registry = DeviceRegistry::build(&RegistryConfig::default());
/// let light = registry.lookup("TASMOTA_LIGHT").unwrap();
/// assert_eq!(light.command_key(), "POWER1");
/// assert!(registry.lookup("TASMOTA_FAN").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistry {
    descriptors: Vec<DeviceDescriptor>,
    index: HashMap<String, usize>,
}

impl DeviceRegistry {
    /// Builds the registry from a configuration.
    ///
    /// Cannot fail. If an id appears twice, the first entry is kept.
    #[must_use]
    pub fn build(config: &RegistryConfig) -> Self {
        let mut descriptors = Vec::with_capacity(config.devices.len());
        let mut index = HashMap::with_capacity(config.devices.len());

        for device in &config.devices {
            if index.contains_key(&device.id) {
                tracing::warn!(device = %device.id, "Duplicate device id in configuration, ignoring");
                continue;
            }

            let address = device.base_address.as_deref().unwrap_or(&config.host);
            index.insert(device.id.clone(), descriptors.len());
            descriptors.push(DeviceDescriptor::new(
                device.id.clone(),
                device.display_name.clone(),
                device.category,
                address,
                device.command_key.clone(),
            ));
        }

        Self { descriptors, index }
    }

    /// Looks up a descriptor by control id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the id is not registered.
    pub fn lookup(&self, id: &str) -> Result<&DeviceDescriptor, Error> {
        self.index
            .get(id)
            .map(|&i| &self.descriptors[i])
            .ok_or_else(|| Error::DeviceNotFound(id.to_string()))
    }

    /// Returns all descriptors in configuration order.
    #[must_use]
    pub fn descriptors(&self) -> &[DeviceDescriptor] {
        &self.descriptors
    }

    /// Returns all control ids in configuration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(DeviceDescriptor::id)
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl IntoIterator for DeviceRegistry {
    type Item = DeviceDescriptor;
    type IntoIter = std::vec::IntoIter<DeviceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}
