// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control dispatch for the host.
//!
//! The [`ControlDispatcher`] is the only component the host talks to. It
//! offers three entry points, none of which wait for the network:
//!
//! - [`list_controls`](ControlDispatcher::list_controls): the registered devices
//! - [`open_session`](ControlDispatcher::open_session): a fresh replaying
//!   stream of device states, seeded by one status query per device
//! - [`perform_action`](ControlDispatcher::perform_action): a command whose
//!   outcome is reported through an [`AckHandle`] and the session stream
//!
//! # Ordering
//!
//! Within a session, whichever result lands last for a device is its current
//! state. Concurrent actions and status queries for the same device are not
//! sequenced against each other.

mod ack;
mod control_dispatcher;
mod session;

pub use ack::{Ack, AckHandle};
pub use control_dispatcher::{ControlDispatcher, ControlDispatcherBuilder};
