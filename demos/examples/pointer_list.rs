// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer dragging in a vertical list and into a second list.
//!
//! The host owns layout here: after every drop it restacks rows and pushes
//! the new bounds back into the engine.
//!
//! Run:
//! - `cargo run -p understory_demos --example pointer_list`

use kurbo::{Point, Rect};
use understory_demos::{init_tracing, print_board, print_events};
use understory_reorder::{Engine, ItemConfig, Rejected, SurfaceConfig};

const ROW: f64 = 24.0;
const WIDTH: f64 = 160.0;

fn layout(engine: &mut Engine<&'static str, u8>, surface: u8) -> Result<(), Rejected> {
    let Some(x) = engine.surface(surface).map(|s| s.bounds().x0) else {
        return Err(Rejected::UnknownSurface);
    };
    for (i, item) in engine.order(surface).unwrap_or_default().into_iter().enumerate() {
        let y = i as f64 * ROW;
        engine.set_item_bounds(surface, &item, Rect::new(x, y, x + WIDTH, y + ROW))?;
    }
    Ok(())
}

fn main() -> Result<(), Rejected> {
    init_tracing();

    let mut engine: Engine<&'static str, u8> = Engine::new();
    for (id, label, rows) in [
        (0_u8, "Inbox", &["alpha", "bravo", "charlie", "delta"][..]),
        (1, "Archive", &["echo"][..]),
    ] {
        let x = f64::from(id) * (WIDTH + 40.0);
        engine.register_surface(
            id,
            SurfaceConfig::new()
                .with_group("mail")
                .with_label(label)
                .with_bounds(Rect::new(x, 0.0, x + WIDTH, 400.0)),
        )?;
        for &row in rows {
            engine.push_item(id, ItemConfig::new(row))?;
        }
        layout(&mut engine, id)?;
    }

    println!("Start:");
    print_board(&engine);

    // Drag "alpha" below "charlie": midpoints of the others are 36, 60, 84.
    print_events("begin", &engine.pointer_begin(0, &"alpha", Point::new(10.0, 12.0))?);
    for y in [30.0, 50.0, 70.0] {
        let index = engine.pointer_over(0, Point::new(10.0, y))?;
        println!("over y={y}: would land at {index}");
    }
    print_events("drop", &engine.pointer_drop(0, Point::new(10.0, 70.0))?);
    print_events("end", &engine.pointer_end());
    layout(&mut engine, 0)?;

    // Drag "delta" across into the archive, above "echo".
    print_events("begin", &engine.pointer_begin(0, &"delta", Point::new(10.0, 84.0))?);
    engine.pointer_leave(0);
    let target = Point::new(WIDTH + 50.0, 4.0);
    println!("enter archive: would land at {}", engine.pointer_enter(1, target)?);
    print_events("drop", &engine.pointer_drop(1, target)?);
    print_events("end", &engine.pointer_end());
    layout(&mut engine, 0)?;
    layout(&mut engine, 1)?;

    // Released outside every list: nothing changes.
    print_events("begin", &engine.pointer_begin(1, &"echo", Point::new(WIDTH + 50.0, 36.0))?);
    print_events("end", &engine.pointer_end());

    println!("End:");
    print_board(&engine);
    Ok(())
}
