//! Lifecycle Registry
//!
//! This example walks a couple of states through birth, death and rebirth.
//!
//! Key concepts:
//! - Bare and edge hooks, with the edge winning when both match
//! - Hooks amending the incoming snapshot
//! - Direct sets that bypass hooks and leave `time` alone
//! - Re-entry configured from JSON
//!
//! Run with: cargo run --example lifecycle

use hookstate::{fields, HookError, Registry, RegistryConfig, TransitionTableBuilder};
use std::thread::sleep;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lifecycle Registry Example ===\n");

    let table = TransitionTableBuilder::new()
        .on("birth", |from, to, _| {
            to.insert("age", 0);
            to.insert("life", 1);
            to.insert("birthday", from.time_ms());
            Ok(())
        })
        .on_edge("birth", "dead", |_, to, duration| {
            to.insert("age", duration);
            Ok(())
        })
        .on("rebirth", |from, to, _| {
            let life = from
                .get("life")
                .and_then(|life| life.as_i64())
                .ok_or_else(|| HookError::new("no life to renew"))?;
            to.insert("life", life + 1);
            to.insert("age", 0);
            Ok(())
        })
        .build()?;

    let config = RegistryConfig::from_json(r#"{ "initial_state": "birth" }"#)?;
    let mut registry = Registry::builder().transitions(table).config(config).build();

    registry.create_with("first", fields! { "message" => "hello" })?;
    registry.create("second")?;
    println!("Created: {:?}", registry.keys());

    sleep(Duration::from_millis(50));

    let first = registry.get_mut("first").ok_or("first state missing")?;
    first.set("visits", 3);
    first.to_with("dead", fields! { "message" => "goodbye" })?;
    println!("first after death: {}", first.read().to_value());

    first.to("rebirth")?;
    println!("first after rebirth: {}", first.read().to_value());
    println!("first path: {:?}", first.history().get_path());
    println!("hooks fired: {:?}", first.history().hooks_fired());

    let second = registry.get("second").ok_or("second state missing")?;
    println!(
        "second is still in {:?}: {}",
        second.current_name(),
        second.read().to_value()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
