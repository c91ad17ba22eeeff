// SPDX-License-Identifier: MPL-2.0

//! Device controls example.
//!
//! Drives the dispatcher the way a controls host does: list the controls,
//! watch their state, toggle one of them.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example controls -- list [config.json]
//! cargo run --example controls -- watch [config.json]
//! cargo run --example controls -- toggle <control_id> [config.json]
//! ```
//!
//! Without a config file the built-in devices are used.

use std::env;
use std::time::Duration;

use tasmota_controls::command::ControlAction;
use tasmota_controls::registry::RegistryConfig;
use tasmota_controls::{ControlDispatcher, UpdateStream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "list" => run_list(args.get(2)),
        "watch" => run_watch(args.get(2)).await,
        "toggle" => match args.get(2) {
            Some(id) => run_toggle(id, args.get(3)).await,
            None => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        },
        mode => {
            eprintln!("Unknown mode: {mode}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} list [config.json]");
    eprintln!("  {program} watch [config.json]");
    eprintln!("  {program} toggle <control_id> [config.json]");
}

fn dispatcher(config_path: Option<&String>) -> Result<ControlDispatcher, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => RegistryConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => RegistryConfig::default(),
    };

    Ok(ControlDispatcher::builder()
        .with_registry_config(config)
        .build()?)
}

fn run_list(config_path: Option<&String>) -> Result<(), Box<dyn std::error::Error>> {
    for control in dispatcher(config_path)?.list_controls() {
        println!(
            "{:<20} {:<20} {:<16} {} ({})",
            control.id(),
            control.display_name(),
            control.category(),
            control.base_address(),
            control.command_key()
        );
    }
    Ok(())
}

async fn run_watch(config_path: Option<&String>) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = dispatcher(config_path)?;
    let ids: Vec<String> = dispatcher
        .list_controls()
        .iter()
        .map(|d| d.id().to_string())
        .collect();

    println!("Watching {} controls, Ctrl+C to stop", ids.len());
    let updates = dispatcher.open_session(ids);

    tokio::select! {
        () = print_updates(updates) => {}
        _ = tokio::signal::ctrl_c() => dispatcher.close_session(),
    }
    Ok(())
}

async fn run_toggle(
    id: &str,
    config_path: Option<&String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = dispatcher(config_path)?;
    let mut updates = dispatcher.open_session([id]);

    // Initial status first, then the toggle result.
    if let Ok(Some(state)) = tokio::time::timeout(Duration::from_secs(6), updates.recv()).await {
        println!("before: {state}");
    }

    let ack = dispatcher.perform_action(id, ControlAction::Toggle).await;
    println!("toggle {ack}");

    if ack.is_accepted()
        && let Ok(Some(state)) = tokio::time::timeout(Duration::from_secs(1), updates.recv()).await
    {
        println!("after:  {state}");
    }
    Ok(())
}

async fn print_updates(mut updates: UpdateStream) {
    while let Some(state) = updates.recv().await {
        println!("{state}");
    }
}
