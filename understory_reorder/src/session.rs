// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single in-progress reorder.
//!
//! The engine holds at most one [`DragSession`]. Both protocols acquire it
//! through the same exclusive slot, so a pointer drag and a keyboard grab can
//! never be in flight at the same time. Each session records the
//! [`Protocol`] that opened it; only that protocol may end it.
//!
//! Input is processed one event at a time, so the check-and-set on the slot
//! needs no locking. A host that feeds the engine from several threads must
//! wrap the whole [`Engine`](crate::Engine) in a mutex.

use crate::error::Rejected;

/// Input protocol that owns a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Pointer drag.
    Pointer,
    /// Keyboard grab.
    Keyboard,
}

/// Ephemeral record of one in-progress reorder or transfer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K, S> {
    item: K,
    origin_surface: S,
    origin_index: usize,
    protocol: Protocol,
    /// Surface currently holding the item.
    pub(crate) surface: S,
    /// Placement last reported to the host, as `(surface, index)`.
    pub(crate) published: (S, usize),
    /// Live pointer preview, as `(surface, insertion index)`.
    pub(crate) preview: Option<(S, usize)>,
    /// Set once a pointer drop has been applied.
    pub(crate) dropped: bool,
}

impl<K, S: Copy> DragSession<K, S> {
    pub(crate) fn new(item: K, surface: S, index: usize, protocol: Protocol) -> Self {
        Self {
            item,
            origin_surface: surface,
            origin_index: index,
            protocol,
            surface,
            published: (surface, index),
            preview: None,
            dropped: false,
        }
    }

    /// Returns the id of the item being moved.
    pub fn item(&self) -> &K {
        &self.item
    }

    /// Returns the surface the item started in.
    pub fn origin_surface(&self) -> S {
        self.origin_surface
    }

    /// Returns the item's 0-based index in the origin surface at session start.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Returns the protocol that opened the session.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the surface currently holding the item.
    pub fn surface(&self) -> S {
        self.surface
    }

    /// Returns the current pointer preview as `(surface, insertion index)`.
    pub fn preview(&self) -> Option<(S, usize)> {
        self.preview
    }
}

impl<K, S: Copy + PartialEq> DragSession<K, S> {
    /// Accounts for the host inserting an item into `surface`.
    ///
    /// `slot` counts the other items ahead of the new one, ignoring the
    /// dragged item. Recorded indices at or past it shift up by one.
    pub(crate) fn note_insert(&mut self, surface: S, slot: usize) {
        if self.origin_surface == surface && slot <= self.origin_index {
            self.origin_index += 1;
        }
        if self.published.0 == surface && slot <= self.published.1 {
            self.published.1 += 1;
        }
        if self.preview.is_some_and(|(over, _)| over == surface) {
            self.preview = None;
        }
    }

    /// Accounts for the host removing an item from `surface`.
    ///
    /// `slot` is counted the same way as in [`Self::note_insert`].
    pub(crate) fn note_remove(&mut self, surface: S, slot: usize) {
        if self.origin_surface == surface && slot < self.origin_index {
            self.origin_index -= 1;
        }
        if self.published.0 == surface && slot < self.published.1 {
            self.published.1 -= 1;
        }
        if self.preview.is_some_and(|(over, _)| over == surface) {
            self.preview = None;
        }
    }
}

/// Exclusive holder of the engine's only [`DragSession`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionSlot<K, S> {
    active: Option<DragSession<K, S>>,
}

impl<K, S> Default for SessionSlot<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> SessionSlot<K, S> {
    /// Creates an empty slot.
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { active: None }
    }

    /// Returns `true` while a session exists.
    pub(crate) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the active session.
    pub(crate) fn get(&self) -> Option<&DragSession<K, S>> {
        self.active.as_ref()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut DragSession<K, S>> {
        self.active.as_mut()
    }

    /// Returns the active session if `protocol` owns it.
    pub(crate) fn owned_by(&self, protocol: Protocol) -> Result<&DragSession<K, S>, Rejected> {
        match &self.active {
            None => Err(Rejected::NoSession),
            Some(session) if session.protocol != protocol => Err(Rejected::WrongProtocol),
            Some(session) => Ok(session),
        }
    }

    pub(crate) fn owned_by_mut(
        &mut self,
        protocol: Protocol,
    ) -> Result<&mut DragSession<K, S>, Rejected> {
        match &mut self.active {
            None => Err(Rejected::NoSession),
            Some(session) if session.protocol != protocol => Err(Rejected::WrongProtocol),
            Some(session) => Ok(session),
        }
    }

    /// Installs `session` unless one is already active.
    pub(crate) fn try_acquire(&mut self, session: DragSession<K, S>) -> Result<(), Rejected> {
        if self.active.is_some() {
            return Err(Rejected::SessionActive);
        }
        self.active = Some(session);
        Ok(())
    }

    /// Removes and returns the active session.
    pub(crate) fn release(&mut self) -> Option<DragSession<K, S>> {
        self.active.take()
    }
}
