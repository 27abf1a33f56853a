// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the `understory_reorder` demos.

use core::fmt::Debug;
use core::hash::Hash;

use tracing_subscriber::EnvFilter;
use understory_reorder::{Engine, ReorderEvent};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `understory_reorder=debug`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("understory_reorder=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints the events one input produced, prefixed by a label for the input.
pub fn print_events<K: Debug, S: Debug>(input: &str, events: &[ReorderEvent<K, S>]) {
    if events.is_empty() {
        println!("{input}: (no events)");
        return;
    }
    for event in events {
        println!("{input}: {event:?}");
    }
}

/// Prints every surface's order on one line each.
pub fn print_board<K, S>(engine: &Engine<K, S>)
where
    K: Clone + PartialEq + Debug,
    S: Copy + Eq + Hash + Debug,
{
    for surface in engine.surfaces() {
        let label = surface.label().unwrap_or("(unlabeled)");
        println!("  {label:<10} {:?}", surface.order());
    }
}
