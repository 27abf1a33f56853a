// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard reordering across a three-column board.
//!
//! Grabs a card, moves it within its column, carries it right into the next
//! column, drops it there, then grabs another card and cancels.
//!
//! Run:
//! - `cargo run -p understory_demos --example keyboard_board`
//! - `RUST_LOG=understory_reorder=trace cargo run -p understory_demos --example keyboard_board`

use kurbo::Rect;
use understory_demos::{init_tracing, print_board, print_events};
use understory_reorder::{
    Direction, Engine, ItemConfig, KeyInput, LiveRegionLog, Rejected, SurfaceConfig,
};

fn main() -> Result<(), Rejected> {
    init_tracing();

    let mut engine: Engine<&str, u8> = Engine::new();
    let mut regions = Vec::new();
    for (id, label, cards) in [
        (0_u8, "Todo", &["design", "build", "ship"][..]),
        (1, "Doing", &["review"][..]),
        (2, "Done", &[][..]),
    ] {
        let x = f64::from(id) * 220.0;
        let region = LiveRegionLog::new();
        engine.register_surface(
            id,
            SurfaceConfig::new()
                .with_group("board")
                .with_label(label)
                .with_bounds(Rect::new(x, 0.0, x + 200.0, 400.0))
                .with_live_region(region.clone()),
        )?;
        regions.push((label, region));
        for &card in cards {
            engine.push_item(id, ItemConfig::new(card))?;
        }
    }

    println!("Start:");
    print_board(&engine);

    engine.focus(0, &"design")?;
    for (name, input) in [
        ("confirm", KeyInput::Confirm),
        ("down", KeyInput::Arrow(Direction::Down)),
        ("right", KeyInput::Arrow(Direction::Right)),
        ("up", KeyInput::Arrow(Direction::Up)),
        ("confirm", KeyInput::Confirm),
    ] {
        print_events(name, &engine.key(input)?);
    }

    println!("After moving \"design\":");
    print_board(&engine);

    engine.focus(0, &"build")?;
    for (name, input) in [
        ("confirm", KeyInput::Confirm),
        ("right", KeyInput::Arrow(Direction::Right)),
        ("right", KeyInput::Arrow(Direction::Right)),
        ("escape", KeyInput::Cancel),
    ] {
        print_events(name, &engine.key(input)?);
    }

    println!("After cancelling \"build\":");
    print_board(&engine);

    println!("Announced:");
    for (label, region) in &regions {
        for text in region.history() {
            println!("  [{label}] {text}");
        }
    }
    Ok(())
}
