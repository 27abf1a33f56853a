// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: an accessible reorder and transfer engine.
//!
//! This crate owns the state machine behind sortable lists and boards: items
//! are reordered within a container (a **surface**) and moved between
//! surfaces that share a transfer **group**. Two input protocols drive it,
//! and both produce identical outcomes:
//!
//! - [`pointer`]: press, drag, drop. Drop positions come from pointer
//!   coordinates compared against item midpoints.
//! - [`keyboard`]: focus an item, confirm to grab, arrows to move, confirm to
//!   drop, escape to cancel. Arrows along the perpendicular axis move the item
//!   to the neighboring surface in its group.
//!
//! The engine knows nothing about rendering or layout. Hosts register surfaces
//! and items with [`Engine`], keep geometry current, forward input, and apply
//! the [`ReorderEvent`]s each call returns. Every surface may carry a
//! [`LiveRegion`] through which the engine announces grabs, moves, drops and
//! cancellations to assistive technology.
//!
//! ## Invariants
//!
//! - Item positions are 1-based and contiguous within every surface after
//!   every call.
//! - At most one [`DragSession`] exists at a time, across all surfaces and
//!   both protocols. At most one item is ever not [`DragState::Idle`].
//! - Order changes only on a pointer drop or a keyboard move, transfer or
//!   cancel, and each call fully updates every surface it touches before
//!   returning its events.
//! - An invalid operation returns [`Rejected`] and changes nothing.
//!
//! ## Minimal example
//!
//! Two columns in one group. Grab `y` with the keyboard and move it right,
//! into the second column:
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_reorder::{
//!     Direction, Engine, ItemConfig, KeyInput, ReorderEvent, SurfaceConfig,
//! };
//!
//! let mut engine: Engine<&str, u32> = Engine::new();
//! engine
//!     .register_surface(
//!         1,
//!         SurfaceConfig::new()
//!             .with_group("board")
//!             .with_bounds(Rect::new(0.0, 0.0, 200.0, 400.0)),
//!     )
//!     .unwrap();
//! engine
//!     .register_surface(
//!         2,
//!         SurfaceConfig::new()
//!             .with_group("board")
//!             .with_bounds(Rect::new(220.0, 0.0, 420.0, 400.0)),
//!     )
//!     .unwrap();
//! for id in ["x", "y", "z"] {
//!     engine.push_item(1, ItemConfig::new(id)).unwrap();
//! }
//!
//! engine.focus(1, &"y").unwrap();
//! engine.key(KeyInput::Confirm).unwrap();
//! let events = engine.key(KeyInput::Arrow(Direction::Right)).unwrap();
//!
//! assert_eq!(
//!     events[0],
//!     ReorderEvent::Transfer {
//!         item: "y",
//!         from: 1,
//!         to: 2,
//!         new_index: 0,
//!         from_order: vec!["x", "z"],
//!         to_order: vec!["y"],
//!     }
//! );
//! assert_eq!(engine.focused(), Some((2, &"y")));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `tracing/std`, and provides
//!   the recording [`LiveRegionLog`].
//! - `libm`: `no_std` float math for Kurbo.
//!
//! Diagnostics are emitted through [`tracing`] under the
//! `understory_reorder` target.
//!
//! This crate is `no_std` and uses `alloc`. [`Engine`] is `Send` whenever its
//! id types are, so a host may move it to another thread or share it behind a
//! mutex.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod announce;
mod engine;
mod error;
mod event;
pub mod keyboard;
pub mod order;
pub mod pointer;
pub mod registry;
pub mod session;
mod surface;
mod types;

#[cfg(feature = "std")]
pub use announce::LiveRegionLog;
pub use announce::{AnnounceError, Announcement, LiveRegion};
pub use engine::Engine;
pub use error::Rejected;
pub use event::{Events, ReorderEvent};
pub use order::{resolve_drop_index, sync_positions};
pub use registry::adjacent_surface;
pub use session::{DragSession, Protocol};
pub use surface::{Item, ItemConfig, Surface, SurfaceConfig};
pub use types::{Direction, DragState, GroupId, KeyInput, Orientation, Step};
