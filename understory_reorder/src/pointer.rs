// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-drag protocol.
//!
//! ## Usage
//!
//! 1) On press-and-drag over an item, call [`Engine::pointer_begin`].
//! 2) As the pointer enters or moves over a surface, call
//!    [`Engine::pointer_enter`] / [`Engine::pointer_over`] to get a preview
//!    insertion index. Nothing moves yet.
//! 3) On release over a surface, call [`Engine::pointer_drop`]; this is the
//!    only call that mutates order.
//! 4) Always finish with [`Engine::pointer_end`], whether or not a drop
//!    happened. A drag that ends without a drop leaves order untouched.
//!
//! Entering or dropping on a surface outside the origin's transfer group is
//! refused without any visible effect. Ungrouped surfaces only accept their
//! own items back.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_reorder::{Engine, ItemConfig, ReorderEvent, SurfaceConfig};
//!
//! let mut engine: Engine<char, u8> = Engine::new();
//! engine.register_surface(0, SurfaceConfig::new()).unwrap();
//! for (i, id) in ['a', 'b', 'c'].into_iter().enumerate() {
//!     let y = i as f64 * 20.0;
//!     engine
//!         .push_item(0, ItemConfig::new(id).with_bounds(Rect::new(0.0, y, 100.0, y + 20.0)))
//!         .unwrap();
//! }
//!
//! engine.pointer_begin(0, &'a', Point::new(5.0, 5.0)).unwrap();
//! // Remaining midpoints are b = 30 and c = 50; y = 45 lands between them.
//! assert_eq!(engine.pointer_enter(0, Point::new(5.0, 45.0)), Ok(1));
//! let events = engine.pointer_drop(0, Point::new(5.0, 45.0)).unwrap();
//! assert!(matches!(events[0], ReorderEvent::Reorder { old_index: 0, new_index: 1, .. }));
//! engine.pointer_end();
//!
//! assert_eq!(engine.order(0), Some(vec!['b', 'a', 'c']));
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

use crate::announce::Announcement;
use crate::engine::Engine;
use crate::error::Rejected;
use crate::event::{Events, ReorderEvent};
use crate::order::resolve_drop_index;
use crate::session::{DragSession, Protocol};
use crate::types::DragState;

impl<K, S> Engine<K, S>
where
    K: Clone + PartialEq + Debug,
    S: Copy + Eq + Hash + Debug,
{
    /// Starts a pointer drag of `item` in `surface`.
    ///
    /// `press` is where the initiating press happened; it must fall inside
    /// the item's handle when the item has one. Refused while any session is
    /// active or the surface is disabled.
    pub fn pointer_begin(
        &mut self,
        surface: S,
        item: &K,
        press: Point,
    ) -> Result<Events<K, S>, Rejected> {
        self.begin_drag(surface, item, press).inspect_err(|reason| {
            tracing::debug!(target: "understory_reorder", ?surface, ?item, %reason, "pointer begin refused");
        })
    }

    /// Reports that the dragged pointer entered `surface` at `point`.
    ///
    /// Returns the insertion index the item would take if dropped here.
    pub fn pointer_enter(&mut self, surface: S, point: Point) -> Result<usize, Rejected> {
        self.update_preview(surface, point).inspect_err(|reason| {
            tracing::trace!(target: "understory_reorder", ?surface, %reason, "pointer enter refused");
        })
    }

    /// Reports pointer motion over `surface` during a drag.
    ///
    /// Same as [`Engine::pointer_enter`]; hosts call it for every move so the
    /// preview tracks the pointer.
    pub fn pointer_over(&mut self, surface: S, point: Point) -> Result<usize, Rejected> {
        self.pointer_enter(surface, point)
    }

    /// Reports that the dragged pointer left `surface`.
    pub fn pointer_leave(&mut self, surface: S) {
        if let Ok(session) = self.session.owned_by_mut(Protocol::Pointer) {
            if session.preview.is_some_and(|(over, _)| over == surface) {
                session.preview = None;
            }
        }
    }

    /// Drops the dragged item on `surface` at `point`.
    ///
    /// Moves the item, re-synchronizes positions on both surfaces, then
    /// reports a [`ReorderEvent::Reorder`] (same surface, index changed) or a
    /// [`ReorderEvent::Transfer`] (different surface). A drop that lands where
    /// the item already was succeeds with no events.
    pub fn pointer_drop(&mut self, surface: S, point: Point) -> Result<Events<K, S>, Rejected> {
        self.drop_dragged(surface, point).inspect_err(|reason| {
            tracing::debug!(target: "understory_reorder", ?surface, %reason, "pointer drop refused");
        })
    }

    /// Ends the pointer drag, dropped or not.
    ///
    /// Resets the item to [`DragState::Idle`] and destroys the session. Does
    /// nothing if no pointer session is active.
    pub fn pointer_end(&mut self) -> Events<K, S> {
        if self.session.owned_by(Protocol::Pointer).is_err() {
            return Vec::new();
        }
        let Some(session) = self.session.release() else {
            return Vec::new();
        };
        if let Ok((s, index)) = self.locate(session.surface, session.item()) {
            self.set_state(s, index, DragState::Idle);
        }
        tracing::debug!(
            target: "understory_reorder",
            item = ?session.item(),
            committed = session.dropped,
            "pointer drag ended"
        );
        vec![ReorderEvent::SessionEnd {
            item: session.item().clone(),
            committed: session.dropped,
        }]
    }

    fn begin_drag(&mut self, surface: S, item: &K, press: Point) -> Result<Events<K, S>, Rejected> {
        if self.session.is_active() {
            return Err(Rejected::SessionActive);
        }
        let (s, index) = self.locate(surface, item)?;
        let origin = self.surface_at(s);
        if origin.is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        if !origin.items()[index].accepts_press(press) {
            return Err(Rejected::OutsideHandle);
        }
        self.session.try_acquire(DragSession::new(
            item.clone(),
            surface,
            index,
            Protocol::Pointer,
        ))?;
        self.set_state(s, index, DragState::Dragging);
        tracing::debug!(target: "understory_reorder", ?surface, ?item, index, "pointer drag started");
        Ok(vec![ReorderEvent::SessionStart {
            item: item.clone(),
            surface,
        }])
    }

    /// Checks that the pointer session may target `surface` and returns its index.
    fn drop_target(&self, surface: S) -> Result<usize, Rejected> {
        let session = self.session.owned_by(Protocol::Pointer)?;
        if session.dropped {
            return Err(Rejected::AlreadyDropped);
        }
        let target = self.surface_index(surface)?;
        if surface != session.origin_surface() {
            let origin = self.surface_index(session.origin_surface())?;
            let group = self.surface_at(origin).group();
            if group.is_none() || self.surface_at(target).group() != group {
                return Err(Rejected::GroupMismatch);
            }
            if self.surface_at(target).contains(session.item()) {
                return Err(Rejected::DuplicateItem);
            }
        }
        if self.surface_at(target).is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        Ok(target)
    }

    fn update_preview(&mut self, surface: S, point: Point) -> Result<usize, Rejected> {
        let target = self.drop_target(surface)?;
        let item = self.session.owned_by(Protocol::Pointer)?.item();
        let over = self.surface_at(target);
        let index = resolve_drop_index(point, over.orientation(), over.items(), Some(item));
        self.session.owned_by_mut(Protocol::Pointer)?.preview = Some((surface, index));
        tracing::trace!(target: "understory_reorder", ?surface, index, "pointer preview");
        Ok(index)
    }

    fn drop_dragged(&mut self, surface: S, point: Point) -> Result<Events<K, S>, Rejected> {
        let target = self.drop_target(surface)?;
        let (item, current) = {
            let session = self.session.owned_by(Protocol::Pointer)?;
            (session.item().clone(), session.surface)
        };
        let (source, at) = self.locate(current, &item)?;
        if self.surface_at(source).is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        let over = self.surface_at(target);
        let insert_at = resolve_drop_index(point, over.orientation(), over.items(), Some(&item));

        let index = self.relocate(source, at, target, insert_at);
        if let Ok(session) = self.session.owned_by_mut(Protocol::Pointer) {
            session.dropped = true;
            session.preview = None;
            session.surface = surface;
            session.published = (surface, index);
        }

        let mut events = Vec::new();
        if source != target {
            events.push(self.transfer_event(&item, source, target, index));
        } else if index != at {
            events.push(self.reorder_event(&item, target, at, index));
        }
        let dest = self.surface_at_mut(target);
        let count = dest.len();
        dest.announce(&Announcement::Dropped {
            position: index + 1,
            count,
        });
        tracing::debug!(target: "understory_reorder", ?item, ?surface, index, "pointer drop applied");
        Ok(events)
    }
}
