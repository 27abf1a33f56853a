// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: registered surfaces, the session slot, and keyboard focus.
//!
//! Input handling lives in [`crate::pointer`] and [`crate::keyboard`]; this
//! module holds the registration API, queries, and the mutation helpers both
//! protocols share.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::error::Rejected;
use crate::event::{Events, ReorderEvent};
use crate::registry::adjacent_surface;
use crate::session::{DragSession, SessionSlot};
use crate::surface::{Item, ItemConfig, Surface, SurfaceConfig};
use crate::types::{DragState, GroupId, Orientation, Step};

/// Reorder and transfer engine.
///
/// `K` identifies items and `S` identifies surfaces. Hosts register surfaces
/// and their items, then forward pointer and keyboard input; every call
/// returns the [`Events`] it caused, or a [`Rejected`] reason with no state
/// change.
#[derive(Debug)]
pub struct Engine<K, S> {
    surfaces: Vec<Surface<K, S>>,
    lookup: HashMap<S, usize>,
    pub(crate) session: SessionSlot<K, S>,
    pub(crate) focus: Option<(S, K)>,
}

impl<K, S> Default for Engine<K, S> {
    fn default() -> Self {
        Self {
            surfaces: Vec::new(),
            lookup: HashMap::new(),
            session: SessionSlot::new(),
            focus: None,
        }
    }
}

impl<K, S> Engine<K, S>
where
    K: Clone + PartialEq + Debug,
    S: Copy + Eq + Hash + Debug,
{
    /// Creates an engine with no surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface.
    pub fn register_surface(&mut self, id: S, config: SurfaceConfig) -> Result<(), Rejected> {
        if self.lookup.contains_key(&id) {
            return Err(Rejected::DuplicateSurface);
        }
        tracing::debug!(target: "understory_reorder", surface = ?id, group = ?config.group, "surface registered");
        self.lookup.insert(id, self.surfaces.len());
        self.surfaces.push(Surface::new(id, config));
        Ok(())
    }

    /// Unregisters a surface along with its items.
    ///
    /// A session whose item lives in, or started in, this surface is ended
    /// uncommitted.
    pub fn unregister_surface(&mut self, id: S) -> Result<Events<K, S>, Rejected> {
        let index = self.surface_index(id)?;
        let mut events = Vec::new();
        let involved = self
            .session
            .get()
            .is_some_and(|session| session.surface == id || session.origin_surface() == id);
        if involved {
            events.extend(self.abandon_session());
        }
        if self.focus.as_ref().is_some_and(|(surface, _)| *surface == id) {
            self.focus = None;
        }
        self.surfaces.remove(index);
        self.lookup.clear();
        for (index, surface) in self.surfaces.iter().enumerate() {
            self.lookup.insert(*surface.id(), index);
        }
        tracing::debug!(target: "understory_reorder", surface = ?id, "surface unregistered");
        Ok(events)
    }

    /// Appends an item to a surface and returns its index.
    pub fn push_item(&mut self, surface: S, config: ItemConfig<K>) -> Result<usize, Rejected> {
        self.insert_item(surface, usize::MAX, config)
    }

    /// Inserts an item at `index` (clamped to the end) and returns where it landed.
    ///
    /// An active session keeps its origin and last reported placement
    /// relative to the same neighbors, so a later confirm or cancel ignores
    /// the insertion.
    pub fn insert_item(
        &mut self,
        surface: S,
        index: usize,
        config: ItemConfig<K>,
    ) -> Result<usize, Rejected> {
        let s = self.surface_index(surface)?;
        if self.surfaces[s].contains(&config.id) {
            return Err(Rejected::DuplicateItem);
        }
        let dragged = self.dragged_index(s);
        let landed = self.surfaces[s].put(index, Item::from(config));
        if let Some(session) = self.session.get_mut() {
            let slot = match dragged {
                Some(at) if at < landed => landed - 1,
                _ => landed,
            };
            session.note_insert(surface, slot);
        }
        Ok(landed)
    }

    /// Removes an item.
    ///
    /// Removing the item of an active session ends that session uncommitted.
    /// Removing any other item keeps the session's recorded placements
    /// relative to the remaining neighbors.
    pub fn remove_item(&mut self, surface: S, item: &K) -> Result<Events<K, S>, Rejected> {
        let (s, index) = self.locate(surface, item)?;
        let mut events = Vec::new();
        let involved = self
            .session
            .get()
            .is_some_and(|session| session.surface == surface && session.item() == item);
        if involved {
            events.extend(self.abandon_session());
        }
        if self
            .focus
            .as_ref()
            .is_some_and(|(fs, fi)| *fs == surface && fi == item)
        {
            self.focus = None;
        }
        let dragged = self.dragged_index(s);
        self.surfaces[s].take(index);
        if let Some(session) = self.session.get_mut() {
            let slot = match dragged {
                Some(at) if at < index => index - 1,
                _ => index,
            };
            session.note_remove(surface, slot);
        }
        Ok(events)
    }

    /// Enables or disables reordering on a surface.
    pub fn set_disabled(&mut self, surface: S, disabled: bool) -> Result<(), Rejected> {
        self.surface_mut(surface)?.disabled = disabled;
        Ok(())
    }

    /// Changes a surface's transfer group.
    pub fn set_group(&mut self, surface: S, group: Option<GroupId>) -> Result<(), Rejected> {
        self.surface_mut(surface)?.group = group;
        Ok(())
    }

    /// Changes a surface's layout axis.
    pub fn set_orientation(
        &mut self,
        surface: S,
        orientation: Orientation,
    ) -> Result<(), Rejected> {
        self.surface_mut(surface)?.orientation = orientation;
        Ok(())
    }

    /// Updates a surface's on-screen bounds.
    pub fn set_surface_bounds(&mut self, surface: S, bounds: Rect) -> Result<(), Rejected> {
        self.surface_mut(surface)?.bounds = bounds;
        Ok(())
    }

    /// Changes a surface's spoken label.
    pub fn set_label(&mut self, surface: S, label: Option<String>) -> Result<(), Rejected> {
        self.surface_mut(surface)?.label = label;
        Ok(())
    }

    /// Updates an item's bounds.
    pub fn set_item_bounds(&mut self, surface: S, item: &K, bounds: Rect) -> Result<(), Rejected> {
        self.item_mut(surface, item)?.bounds = bounds;
        Ok(())
    }

    /// Sets or clears an item's drag handle.
    pub fn set_item_handle(
        &mut self,
        surface: S,
        item: &K,
        handle: Option<Rect>,
    ) -> Result<(), Rejected> {
        self.item_mut(surface, item)?.handle = handle;
        Ok(())
    }

    /// Returns a surface.
    pub fn surface(&self, id: S) -> Option<&Surface<K, S>> {
        self.lookup.get(&id).map(|&index| &self.surfaces[index])
    }

    /// Returns all surfaces in registration order.
    pub fn surfaces(&self) -> &[Surface<K, S>] {
        &self.surfaces
    }

    /// Returns a surface's items in order.
    pub fn items(&self, id: S) -> Option<&[Item<K>]> {
        self.surface(id).map(Surface::items)
    }

    /// Returns a surface's item ids in order.
    pub fn order(&self, id: S) -> Option<Vec<K>> {
        self.surface(id).map(Surface::order)
    }

    /// Returns an item.
    pub fn item(&self, surface: S, item: &K) -> Option<&Item<K>> {
        self.surface(surface)?.item(item)
    }

    /// Returns a surface's revision counter.
    pub fn revision(&self, id: S) -> Option<u64> {
        self.surface(id).map(Surface::revision)
    }

    /// Returns the active session.
    pub fn session(&self) -> Option<&DragSession<K, S>> {
        self.session.get()
    }

    /// Returns the keyboard-focused item as `(surface, item)`.
    pub fn focused(&self) -> Option<(S, &K)> {
        self.focus.as_ref().map(|(surface, item)| (*surface, item))
    }

    /// Returns the live pointer preview as `(surface, insertion index)`.
    pub fn pointer_preview(&self) -> Option<(S, usize)> {
        self.session.get().and_then(DragSession::preview)
    }

    /// Returns the grouped sibling of `id` in visual order, if any.
    pub fn adjacent_surface(&self, id: S, step: Step) -> Option<S> {
        let from = *self.lookup.get(&id)?;
        adjacent_surface(&self.surfaces, from, step).map(|index| *self.surfaces[index].id())
    }

    pub(crate) fn surface_at(&self, index: usize) -> &Surface<K, S> {
        &self.surfaces[index]
    }

    pub(crate) fn surface_at_mut(&mut self, index: usize) -> &mut Surface<K, S> {
        &mut self.surfaces[index]
    }

    pub(crate) fn surface_index(&self, id: S) -> Result<usize, Rejected> {
        self.lookup.get(&id).copied().ok_or(Rejected::UnknownSurface)
    }

    /// Resolves `(surface, item)` to `(surface index, item index)`.
    pub(crate) fn locate(&self, surface: S, item: &K) -> Result<(usize, usize), Rejected> {
        let s = self.surface_index(surface)?;
        let index = self.surfaces[s].index_of(item).ok_or(Rejected::UnknownItem)?;
        Ok((s, index))
    }

    pub(crate) fn neighbor(&self, from: usize, step: Step) -> Option<usize> {
        adjacent_surface(&self.surfaces, from, step)
    }

    pub(crate) fn set_state(&mut self, surface: usize, index: usize, state: DragState) {
        if let Some(item) = self.surfaces[surface].item_mut(index) {
            item.state = state;
        }
    }

    /// Moves the item at `(from, at)` to `insert_at` in `to` and returns its
    /// final index.
    ///
    /// The item leaves `from` and joins `to` within this call; both surfaces
    /// are re-synchronized before it returns.
    pub(crate) fn relocate(&mut self, from: usize, at: usize, to: usize, insert_at: usize) -> usize {
        if from == to {
            let surface = &mut self.surfaces[from];
            let target = insert_at.min(surface.len().saturating_sub(1));
            surface.shift(at, target);
            return target;
        }
        let item = self.surfaces[from].take(at);
        self.surfaces[to].put(insert_at, item)
    }

    pub(crate) fn reorder_event(
        &self,
        item: &K,
        surface: usize,
        old_index: usize,
        new_index: usize,
    ) -> ReorderEvent<K, S> {
        let surface = &self.surfaces[surface];
        ReorderEvent::Reorder {
            item: item.clone(),
            surface: *surface.id(),
            old_index,
            new_index,
            new_order: surface.order(),
        }
    }

    pub(crate) fn transfer_event(
        &self,
        item: &K,
        from: usize,
        to: usize,
        new_index: usize,
    ) -> ReorderEvent<K, S> {
        let (from, to) = (&self.surfaces[from], &self.surfaces[to]);
        ReorderEvent::Transfer {
            item: item.clone(),
            from: *from.id(),
            to: *to.id(),
            new_index,
            from_order: from.order(),
            to_order: to.order(),
        }
    }

    /// Ends the active session without restoring anything.
    pub(crate) fn abandon_session(&mut self) -> Option<ReorderEvent<K, S>> {
        let session = self.session.release()?;
        if let Ok((s, index)) = self.locate(session.surface, session.item()) {
            self.set_state(s, index, DragState::Idle);
        }
        tracing::debug!(target: "understory_reorder", item = ?session.item(), "session abandoned");
        Some(ReorderEvent::SessionEnd {
            item: session.item().clone(),
            committed: false,
        })
    }

    /// Index of the session's item in the surface at `s`, if it is there.
    fn dragged_index(&self, s: usize) -> Option<usize> {
        let session = self.session.get()?;
        let surface = &self.surfaces[s];
        if *surface.id() != session.surface {
            return None;
        }
        surface.index_of(session.item())
    }

    fn surface_mut(&mut self, id: S) -> Result<&mut Surface<K, S>, Rejected> {
        let index = self.surface_index(id)?;
        Ok(&mut self.surfaces[index])
    }

    fn item_mut(&mut self, surface: S, item: &K) -> Result<&mut Item<K>, Rejected> {
        let (s, index) = self.locate(surface, item)?;
        self.surfaces[s].item_mut(index).ok_or(Rejected::UnknownItem)
    }
}
