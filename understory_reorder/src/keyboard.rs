// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-grab protocol.
//!
//! The keyboard protocol reaches the same outcomes as a pointer drag with
//! four keys. Keys act on the focused item, which the host reports through
//! [`Engine::focus`].
//!
//! | State       | Key                  | Effect                                             |
//! |-------------|----------------------|----------------------------------------------------|
//! | not grabbed | arrow, primary axis  | focus the neighboring item (no wraparound)        |
//! | not grabbed | confirm              | grab: start a session, announce the position       |
//! | not grabbed | cancel               | focus leaves the surface                           |
//! | grabbed     | arrow, primary axis  | move one slot (clamped), announce the position     |
//! | grabbed     | arrow, perpendicular | move to the end of the adjacent grouped surface    |
//! | grabbed     | confirm              | drop: end the session, report any pending reorder |
//! | grabbed     | cancel               | restore the pre-grab placement exactly             |
//!
//! Moves within a surface are reported once, as a single
//! [`ReorderEvent::Reorder`] on drop. Transfers are reported as they happen,
//! and a drop only reports what changed after the last transfer.
//!
//! Focus leaving a grabbed item, through [`Engine::focus`] on another item
//! or [`Engine::blur`], cancels the grab.
//!
//! ## Minimal example
//!
//! ```
//! use understory_reorder::{Direction, Engine, ItemConfig, KeyInput, ReorderEvent, SurfaceConfig};
//!
//! let mut engine: Engine<&str, u8> = Engine::new();
//! engine.register_surface(0, SurfaceConfig::new()).unwrap();
//! for id in ["a", "b", "c"] {
//!     engine.push_item(0, ItemConfig::new(id)).unwrap();
//! }
//!
//! engine.focus(0, &"a").unwrap();
//! engine.key(KeyInput::Confirm).unwrap();
//! engine.key(KeyInput::Arrow(Direction::Down)).unwrap();
//! engine.key(KeyInput::Arrow(Direction::Down)).unwrap();
//! let events = engine.key(KeyInput::Confirm).unwrap();
//!
//! assert_eq!(engine.order(0), Some(vec!["b", "c", "a"]));
//! assert!(matches!(events[0], ReorderEvent::Reorder { old_index: 0, new_index: 2, .. }));
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::announce::Announcement;
use crate::engine::Engine;
use crate::error::Rejected;
use crate::event::{Events, ReorderEvent};
use crate::session::{DragSession, Protocol};
use crate::types::{Direction, DragState, KeyInput, Step};

impl<K, S> Engine<K, S>
where
    K: Clone + PartialEq + Debug,
    S: Copy + Eq + Hash + Debug,
{
    /// Gives keyboard focus to `item` in `surface`.
    ///
    /// If another item is grabbed, that grab is cancelled first.
    pub fn focus(&mut self, surface: S, item: &K) -> Result<Events<K, S>, Rejected> {
        self.locate(surface, item)?;
        let mut events = Vec::new();
        let grabbed_elsewhere = self
            .session
            .owned_by(Protocol::Keyboard)
            .is_ok_and(|session| session.surface != surface || session.item() != item);
        if grabbed_elsewhere {
            events.extend(self.cancel_grab().into_iter().filter(is_not_focus));
        }
        self.focus = Some((surface, item.clone()));
        Ok(events)
    }

    /// Reports that keyboard focus left every surface.
    ///
    /// Cancels an active grab.
    pub fn blur(&mut self) -> Events<K, S> {
        let events = self.cancel_grab().into_iter().filter(is_not_focus).collect();
        self.focus = None;
        events
    }

    /// Handles a key press on the focused item.
    pub fn key(&mut self, input: KeyInput) -> Result<Events<K, S>, Rejected> {
        self.handle_key(input).inspect_err(|reason| {
            tracing::debug!(target: "understory_reorder", ?input, %reason, "key refused");
        })
    }

    fn handle_key(&mut self, input: KeyInput) -> Result<Events<K, S>, Rejected> {
        let (surface, item) = self.focus.clone().ok_or(Rejected::NotFocused)?;
        let (s, index) = self.locate(surface, &item)?;
        let grabbed = self
            .session
            .owned_by(Protocol::Keyboard)
            .is_ok_and(|session| session.surface == surface && *session.item() == item);
        let orientation = self.surface_at(s).orientation();
        let primary = |direction: Direction| orientation.is_primary(direction);

        match (grabbed, input) {
            (false, KeyInput::Arrow(direction)) if primary(direction) => {
                Ok(self.move_focus(s, index, direction.step()))
            }
            // Perpendicular arrows are left to the host's own focus handling.
            (false, KeyInput::Arrow(_)) => Ok(Vec::new()),
            (false, KeyInput::Confirm) => self.grab(s, index),
            (false, KeyInput::Cancel) => {
                self.focus = None;
                Ok(vec![ReorderEvent::FocusChanged { target: None }])
            }
            (true, KeyInput::Arrow(direction)) if primary(direction) => {
                self.step_grabbed(s, index, direction.step())
            }
            (true, KeyInput::Arrow(direction)) => self.transfer_grabbed(s, index, direction.step()),
            (true, KeyInput::Confirm) => Ok(self.drop_grabbed()),
            (true, KeyInput::Cancel) => Ok(self.cancel_grab()),
        }
    }

    fn move_focus(&mut self, s: usize, index: usize, step: Step) -> Events<K, S> {
        let surface = self.surface_at(s);
        let Some(next) = step.apply(index, surface.len()) else {
            return Vec::new();
        };
        let target = (*surface.id(), surface.items()[next].id().clone());
        self.focus = Some(target.clone());
        vec![ReorderEvent::FocusChanged {
            target: Some(target),
        }]
    }

    fn grab(&mut self, s: usize, index: usize) -> Result<Events<K, S>, Rejected> {
        let surface = self.surface_at(s);
        if surface.is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        let id = *surface.id();
        let item = surface.items()[index].id().clone();
        let count = surface.len();
        self.session.try_acquire(DragSession::new(
            item.clone(),
            id,
            index,
            Protocol::Keyboard,
        ))?;
        self.set_state(s, index, DragState::Grabbed);
        self.surface_at_mut(s).announce(&Announcement::Grabbed {
            position: index + 1,
            count,
        });
        tracing::debug!(target: "understory_reorder", surface = ?id, ?item, index, "keyboard grab");
        Ok(vec![ReorderEvent::SessionStart { item, surface: id }])
    }

    fn step_grabbed(&mut self, s: usize, index: usize, step: Step) -> Result<Events<K, S>, Rejected> {
        let surface = self.surface_at(s);
        if surface.is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        let count = surface.len();
        // Clamped at both ends; the position is announced again either way.
        let target = step.apply(index, count).unwrap_or(index);
        let landed = self.relocate(s, index, s, target);
        self.surface_at_mut(s).announce(&Announcement::Moved {
            position: landed + 1,
            count,
        });
        tracing::trace!(target: "understory_reorder", from = index, to = landed, "keyboard move");
        Ok(Vec::new())
    }

    fn transfer_grabbed(
        &mut self,
        s: usize,
        index: usize,
        step: Step,
    ) -> Result<Events<K, S>, Rejected> {
        let to = self.neighbor(s, step).ok_or(Rejected::NoAdjacentSurface)?;
        let item = self.surface_at(s).items()[index].id().clone();
        if self.surface_at(s).is_disabled() || self.surface_at(to).is_disabled() {
            return Err(Rejected::SurfaceDisabled);
        }
        if self.surface_at(to).contains(&item) {
            return Err(Rejected::DuplicateItem);
        }

        self.session.owned_by(Protocol::Keyboard)?;

        let landed = self.relocate(s, index, to, usize::MAX);
        let to_id = *self.surface_at(to).id();
        if let Ok(session) = self.session.owned_by_mut(Protocol::Keyboard) {
            session.surface = to_id;
            session.published = (to_id, landed);
        }
        self.focus = Some((to_id, item.clone()));

        let events = vec![
            self.transfer_event(&item, s, to, landed),
            ReorderEvent::FocusChanged {
                target: Some((to_id, item.clone())),
            },
        ];
        let dest = self.surface_at_mut(to);
        let label = dest.label.clone();
        let count = dest.len();
        dest.announce(&Announcement::Transferred {
            surface: label.as_deref(),
            position: landed + 1,
            count,
        });
        tracing::debug!(target: "understory_reorder", ?item, to = ?to_id, index = landed, "keyboard transfer");
        Ok(events)
    }

    fn drop_grabbed(&mut self) -> Events<K, S> {
        if self.session.owned_by(Protocol::Keyboard).is_err() {
            return Vec::new();
        }
        let Some(session) = self.session.release() else {
            return Vec::new();
        };
        let item = session.item().clone();
        let mut events = Vec::new();
        if let Ok((s, index)) = self.locate(session.surface, &item) {
            self.set_state(s, index, DragState::Idle);
            let (_, published) = session.published;
            if published != index {
                events.push(self.reorder_event(&item, s, published, index));
            }
            let surface = self.surface_at_mut(s);
            let count = surface.len();
            surface.announce(&Announcement::Dropped {
                position: index + 1,
                count,
            });
            tracing::debug!(target: "understory_reorder", ?item, index, "keyboard drop");
        }
        events.push(ReorderEvent::SessionEnd {
            item,
            committed: true,
        });
        events
    }

    /// Puts the grabbed item back where the grab started.
    fn cancel_grab(&mut self) -> Events<K, S> {
        if self.session.owned_by(Protocol::Keyboard).is_err() {
            return Vec::new();
        }
        let Some(session) = self.session.release() else {
            return Vec::new();
        };
        let item = session.item().clone();
        let mut events = Vec::new();
        if let (Ok((s, index)), Ok(origin)) = (
            self.locate(session.surface, &item),
            self.surface_index(session.origin_surface()),
        ) {
            self.set_state(s, index, DragState::Idle);
            self.relocate(s, index, origin, session.origin_index());
            if s != origin {
                let target = (session.origin_surface(), item.clone());
                self.focus = Some(target.clone());
                events.push(ReorderEvent::FocusChanged {
                    target: Some(target),
                });
            }
            self.surface_at_mut(origin)
                .announce(&Announcement::Cancelled);
        }
        tracing::debug!(target: "understory_reorder", ?item, "keyboard grab cancelled");
        events.push(ReorderEvent::SessionEnd {
            item,
            committed: false,
        });
        events
    }
}

fn is_not_focus<K, S>(event: &ReorderEvent<K, S>) -> bool {
    !matches!(event, ReorderEvent::FocusChanged { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ItemConfig, SurfaceConfig};
    use crate::types::Orientation;

    fn engine(orientation: Orientation) -> Engine<&'static str, u8> {
        let mut engine = Engine::new();
        engine
            .register_surface(0, SurfaceConfig::new().with_orientation(orientation))
            .unwrap();
        for id in ["a", "b", "c"] {
            engine.push_item(0, ItemConfig::new(id)).unwrap();
        }
        engine
    }

    #[test]
    fn keys_need_focus() {
        let mut engine = engine(Orientation::Vertical);
        assert_eq!(engine.key(KeyInput::Confirm), Err(Rejected::NotFocused));
        assert_eq!(engine.focus(0, &"zz"), Err(Rejected::UnknownItem));
    }

    #[test]
    fn arrows_move_focus_without_wrapping() {
        let mut engine = engine(Orientation::Horizontal);
        engine.focus(0, &"a").unwrap();

        assert_eq!(engine.key(KeyInput::Arrow(Direction::Left)), Ok(Vec::new()));
        assert_eq!(
            engine.key(KeyInput::Arrow(Direction::Right)),
            Ok(vec![ReorderEvent::FocusChanged {
                target: Some((0, "b"))
            }])
        );
        // Perpendicular arrows are not ours when nothing is grabbed.
        assert_eq!(engine.key(KeyInput::Arrow(Direction::Down)), Ok(Vec::new()));
        assert_eq!(engine.focused(), Some((0, &"b")));
        assert_eq!(engine.order(0), Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn grabbed_moves_clamp_at_bounds() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"b").unwrap();
        engine.key(KeyInput::Confirm).unwrap();

        engine.key(KeyInput::Arrow(Direction::Up)).unwrap();
        engine.key(KeyInput::Arrow(Direction::Up)).unwrap();
        assert_eq!(engine.order(0), Some(vec!["b", "a", "c"]));
        assert_eq!(engine.focused(), Some((0, &"b")));
        assert_eq!(
            engine.item(0, &"b").map(|i| i.state()),
            Some(DragState::Grabbed)
        );
    }

    #[test]
    fn confirm_in_place_reports_no_reorder() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"b").unwrap();
        engine.key(KeyInput::Confirm).unwrap();
        engine.key(KeyInput::Arrow(Direction::Down)).unwrap();
        engine.key(KeyInput::Arrow(Direction::Up)).unwrap();

        assert_eq!(
            engine.key(KeyInput::Confirm),
            Ok(vec![ReorderEvent::SessionEnd {
                item: "b",
                committed: true
            }])
        );
        assert_eq!(
            engine.item(0, &"b").map(|i| i.state()),
            Some(DragState::Idle)
        );
    }

    #[test]
    fn cancel_restores_within_surface() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"a").unwrap();
        engine.key(KeyInput::Confirm).unwrap();
        engine.key(KeyInput::Arrow(Direction::Down)).unwrap();
        engine.key(KeyInput::Arrow(Direction::Down)).unwrap();

        let events = engine.key(KeyInput::Cancel).unwrap();
        assert_eq!(
            events,
            vec![ReorderEvent::SessionEnd {
                item: "a",
                committed: false
            }]
        );
        assert_eq!(engine.order(0), Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn cancel_without_grab_leaves_surface() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"a").unwrap();
        assert_eq!(
            engine.key(KeyInput::Cancel),
            Ok(vec![ReorderEvent::FocusChanged { target: None }])
        );
        assert_eq!(engine.focused(), None);
    }

    #[test]
    fn focus_elsewhere_cancels_grab() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"a").unwrap();
        engine.key(KeyInput::Confirm).unwrap();
        engine.key(KeyInput::Arrow(Direction::Down)).unwrap();

        let events = engine.focus(0, &"c").unwrap();
        assert_eq!(
            events,
            vec![ReorderEvent::SessionEnd {
                item: "a",
                committed: false
            }]
        );
        assert_eq!(engine.order(0), Some(vec!["a", "b", "c"]));
        assert!(engine.session().is_none());
        assert_eq!(engine.focused(), Some((0, &"c")));
    }

    #[test]
    fn blur_cancels_grab() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"c").unwrap();
        engine.key(KeyInput::Confirm).unwrap();
        engine.key(KeyInput::Arrow(Direction::Up)).unwrap();

        assert_eq!(engine.blur().len(), 1);
        assert_eq!(engine.order(0), Some(vec!["a", "b", "c"]));
        assert_eq!(engine.focused(), None);
        assert!(engine.blur().is_empty());
    }

    #[test]
    fn disabled_surface_refuses_grab() {
        let mut engine = engine(Orientation::Vertical);
        engine.set_disabled(0, true).unwrap();
        engine.focus(0, &"a").unwrap();
        assert_eq!(engine.key(KeyInput::Confirm), Err(Rejected::SurfaceDisabled));
        // Focus still moves.
        assert_eq!(engine.key(KeyInput::Arrow(Direction::Down)).map(|e| e.len()), Ok(1));
    }

    #[test]
    fn ungrouped_perpendicular_is_refused() {
        let mut engine = engine(Orientation::Vertical);
        engine.focus(0, &"a").unwrap();
        engine.key(KeyInput::Confirm).unwrap();
        assert_eq!(
            engine.key(KeyInput::Arrow(Direction::Right)),
            Err(Rejected::NoAdjacentSurface)
        );
        assert_eq!(engine.order(0), Some(vec!["a", "b", "c"]));
    }
}
