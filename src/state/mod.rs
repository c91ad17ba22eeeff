// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state values and their derivation from network outcomes.
//!
//! # Examples
//!
//! ```
//! use tasmota_controls::error::NetworkError;
//! use tasmota_controls::registry::{DeviceRegistry, RegistryConfig};
//! use tasmota_controls::state::{DeviceState, reconcile};
//!
//! let registry = DeviceRegistry::build(&RegistryConfig::default());
//! let speakers = registry.lookup("TASMOTA_SPEAKER").unwrap();
//!
//! let outcome = Err(NetworkError::Unreachable("connection refused".into()));
//! assert_eq!(reconcile(speakers, &outcome), DeviceState::unreachable("TASMOTA_SPEAKER"));
//! ```

mod device_state;
mod reconcile;

pub use device_state::DeviceState;
pub use reconcile::reconcile;
