// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publish/subscribe for device state updates.
//!
//! The [`UpdatePublisher`] is a replaying multicast channel: subscribers that
//! join late still receive every event published before they joined, so a
//! UI attaching after the initial status queries completed renders the
//! correct state without triggering another fetch.
//!
//! # Examples
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use tasmota_controls::event::UpdatePublisher;
//! use tasmota_controls::state::DeviceState;
//! use tasmota_controls::types::{Health, PowerState};
//!
//! let publisher = UpdatePublisher::new();
//! let mut early = publisher.subscribe();
//!
//! publisher.publish(DeviceState::new("TASMOTA_LIGHT", PowerState::On, Health::Ok));
//!
//! let mut late = publisher.subscribe();
//! assert_eq!(early.recv().await, late.recv().await);
//! # }
//! ```

mod update_publisher;
mod update_stream;

pub use update_publisher::UpdatePublisher;
pub use update_stream::UpdateStream;
