// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a real Tasmota board.
//!
//! These tests require a device on the network and are ignored by default.
//! Run with: `cargo test --test real_devices -- --ignored --test-threads=1`
//!
//! # Environment Variables
//!
//! - `TASMOTA_HOST` - Device address (default: the built-in `192.168.1.225`)
//!
//! The board is expected to expose `POWER1` and `POWER2` relays. Each test
//! toggles a relay twice, leaving it as it was.

use std::env;
use std::time::Duration;

use tasmota_controls::command::ControlAction;
use tasmota_controls::registry::RegistryConfig;
use tasmota_controls::types::{Health, PowerState};
use tasmota_controls::{Ack, ControlDispatcher};
use tokio::time::{sleep, timeout};

fn dispatcher() -> ControlDispatcher {
    let mut config = RegistryConfig::default();
    if let Ok(host) = env::var("TASMOTA_HOST") {
        config.host = host;
    }

    ControlDispatcher::builder()
        .with_registry_config(config)
        .build()
        .unwrap()
}

fn all_ids(dispatcher: &ControlDispatcher) -> Vec<String> {
    dispatcher
        .list_controls()
        .iter()
        .map(|d| d.id().to_string())
        .collect()
}

#[tokio::test]
#[ignore = "requires a real device"]
async fn session_reports_every_control() {
    let dispatcher = dispatcher();
    let ids = all_ids(&dispatcher);
    let mut updates = dispatcher.open_session(ids.clone());

    for _ in &ids {
        let state = timeout(Duration::from_secs(10), updates.recv())
            .await
            .unwrap()
            .unwrap();
        println!("{state}");
        assert_eq!(state.health(), Health::Ok);
        assert!(state.power().is_known());
    }
}

#[tokio::test]
#[ignore = "requires a real device"]
async fn toggle_twice_restores_state() {
    let dispatcher = dispatcher();
    let id = RegistryConfig::LIGHT_ID;

    let before = dispatcher.snapshot([id]).await.remove(0);
    assert_eq!(before.health(), Health::Ok);

    let mut updates = dispatcher.open_session(Vec::<String>::new());

    assert_eq!(dispatcher.perform_action(id, ControlAction::Toggle).await, Ack::Accepted);
    let flipped = updates.recv().await.unwrap();
    assert_ne!(flipped.power(), before.power());
    assert_ne!(flipped.power(), PowerState::Unknown);

    sleep(Duration::from_millis(500)).await;

    assert_eq!(dispatcher.perform_action(id, ControlAction::Toggle).await, Ack::Accepted);
    let restored = updates.recv().await.unwrap();
    assert_eq!(restored.power(), before.power());
}
