// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of controllable devices.
//!
//! The registry is configuration turned into lookup-ready data. It never
//! changes after it is built; callers rebuild it from a [`RegistryConfig`]
//! whenever they need it, so there is no long-lived mutable device list.

mod config;
mod descriptor;
mod device_registry;

pub use config::{DeviceConfig, RegistryConfig};
pub use descriptor::{DeviceCategory, DeviceDescriptor};
pub use device_registry::DeviceRegistry;
