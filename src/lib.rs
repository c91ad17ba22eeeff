// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tasmota Controls - state synchronization and control dispatch for Tasmota
//! switches reached over HTTP.
//!
//! The crate backs a "device controls" surface: a host lists a small, fixed
//! set of controls, subscribes to their state and toggles them. Everything
//! network related runs on tokio tasks, and every failure is turned into a
//! state value or a rejected acknowledgment rather than an error.
//!
//! # Components
//!
//! - [`registry`]: device descriptors built from configuration
//! - [`protocol`]: the HTTP client for the Tasmota `/cm?cmnd=` API
//! - [`state`]: normalized device state and the reconciliation of responses
//! - [`event`]: the replaying publisher every session streams from
//! - [`dispatcher`]: the entry points used by the host
//!
//! # Quick Start
//!
//! ```no_run
//! use tasmota_controls::{Ack, ControlDispatcher};
//! use tasmota_controls::command::ControlAction;
//!
//! #[tokio::main]
//! async fn main() -> tasmota_controls::Result<()> {
//!     let dispatcher = ControlDispatcher::new()?;
//!
//!     // Status of every control, delivered as queries complete.
//!     let mut updates = dispatcher.open_session(["TASMOTA_LIGHT", "TASMOTA_SPEAKER"]);
//!
//!     if dispatcher.perform_action("TASMOTA_LIGHT", ControlAction::Toggle).await == Ack::Accepted {
//!         println!("light toggled");
//!     }
//!
//!     while let Some(state) = updates.recv().await {
//!         println!("{state}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod protocol;
pub mod registry;
pub mod state;
pub mod types;

pub use command::ControlAction;
pub use dispatcher::{Ack, AckHandle, ControlDispatcher, ControlDispatcherBuilder};
pub use error::{Error, NetworkError, Result};
pub use event::{UpdatePublisher, UpdateStream};
pub use protocol::{HttpConfig, RawPayload, TasmotaClient};
pub use registry::{DeviceCategory, DeviceDescriptor, DeviceRegistry, RegistryConfig};
pub use state::{DeviceState, reconcile};
pub use types::{Health, PowerState};
