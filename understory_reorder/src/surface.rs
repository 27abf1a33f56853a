// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Items and the surfaces that order them.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::announce::{Announcement, LiveRegion, announce};
use crate::order::sync_positions;
use crate::types::{DragState, GroupId, Orientation};

/// Host-supplied description of an item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemConfig<K> {
    /// Caller-assigned id, unique within the item's surface.
    pub id: K,
    /// Item bounds, in the same space as pointer coordinates.
    pub bounds: Rect,
    /// Optional drag handle. When set, pointer drags only start from inside it.
    pub handle: Option<Rect>,
}

impl<K> ItemConfig<K> {
    /// Creates a config with empty bounds and no handle.
    pub fn new(id: K) -> Self {
        Self {
            id,
            bounds: Rect::ZERO,
            handle: None,
        }
    }

    /// Sets the item bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Restricts pointer drags to presses inside `handle`.
    #[must_use]
    pub fn with_handle(mut self, handle: Rect) -> Self {
        self.handle = Some(handle);
        self
    }
}

/// A reorderable unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<K> {
    id: K,
    pub(crate) position: usize,
    pub(crate) state: DragState,
    pub(crate) bounds: Rect,
    pub(crate) handle: Option<Rect>,
}

impl<K> From<ItemConfig<K>> for Item<K> {
    fn from(config: ItemConfig<K>) -> Self {
        Self {
            id: config.id,
            position: 0,
            state: DragState::Idle,
            bounds: config.bounds,
            handle: config.handle,
        }
    }
}

impl<K> Item<K> {
    /// Returns the item id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Returns the 1-based position among the item's siblings.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the item's interaction state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns the item bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the drag handle, if any.
    pub fn handle(&self) -> Option<Rect> {
        self.handle
    }

    /// Returns `true` if a press at `point` may start a pointer drag.
    pub fn accepts_press(&self, point: Point) -> bool {
        self.handle.is_none_or(|handle| handle.contains(point))
    }
}

/// Host-supplied description of a surface.
#[derive(Default)]
pub struct SurfaceConfig {
    /// Transfer group; `None` allows reordering only.
    pub group: Option<GroupId>,
    /// Layout axis.
    pub orientation: Orientation,
    /// Suppresses all reordering while `true`.
    pub disabled: bool,
    /// On-screen bounds, used to order sibling surfaces.
    pub bounds: Rect,
    /// Name read out when an item moves into this surface.
    pub label: Option<String>,
    /// Channel for announcements made on this surface.
    pub live_region: Option<Box<dyn LiveRegion + Send>>,
}

impl SurfaceConfig {
    /// Creates a vertical, enabled, ungrouped surface config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins a transfer group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the layout axis.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the on-screen bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the spoken label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches an announcement channel.
    #[must_use]
    pub fn with_live_region(mut self, region: impl LiveRegion + Send + 'static) -> Self {
        self.live_region = Some(Box::new(region));
        self
    }
}

impl fmt::Debug for SurfaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceConfig")
            .field("group", &self.group)
            .field("orientation", &self.orientation)
            .field("disabled", &self.disabled)
            .field("bounds", &self.bounds)
            .field("label", &self.label)
            .field("live_region", &self.live_region.is_some())
            .finish()
    }
}

/// An ordered container of items.
///
/// Sequence order is the source of truth; every item's
/// [`position`](Item::position) is re-derived from it after each structural
/// change, before any event describing that change is returned.
pub struct Surface<K, S> {
    id: S,
    items: Vec<Item<K>>,
    pub(crate) group: Option<GroupId>,
    pub(crate) orientation: Orientation,
    pub(crate) disabled: bool,
    pub(crate) bounds: Rect,
    pub(crate) label: Option<String>,
    live_region: Option<Box<dyn LiveRegion + Send>>,
    revision: u64,
}

impl<K, S> Surface<K, S> {
    pub(crate) fn new(id: S, config: SurfaceConfig) -> Self {
        Self {
            id,
            items: Vec::new(),
            group: config.group,
            orientation: config.orientation,
            disabled: config.disabled,
            bounds: config.bounds,
            label: config.label,
            live_region: config.live_region,
            revision: 0,
        }
    }

    /// Returns the surface id.
    pub fn id(&self) -> &S {
        &self.id
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the surface holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the transfer group.
    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// Returns the layout axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns `true` while reordering is suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the on-screen bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the spoken label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns a counter bumped whenever item order or membership changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut Item<K>> {
        self.items.get_mut(index)
    }

    /// Removes the item at `index`.
    pub(crate) fn take(&mut self, index: usize) -> Item<K> {
        let item = self.items.remove(index);
        self.mutated();
        item
    }

    /// Inserts `item` at `index` (clamped to the end) and returns where it landed.
    pub(crate) fn put(&mut self, index: usize, item: Item<K>) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.mutated();
        index
    }

    /// Moves the item at `from` to `to` within this surface.
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.mutated();
    }

    pub(crate) fn announce(&mut self, announcement: &Announcement<'_>) {
        if let Some(region) = self.live_region.as_deref_mut() {
            announce(region, announcement);
        }
    }

    fn mutated(&mut self) {
        sync_positions(&mut self.items);
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K: PartialEq, S> Surface<K, S> {
    /// Returns the index of the item with `id`.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Returns `true` if an item with `id` is present.
    pub fn contains(&self, id: &K) -> bool {
        self.index_of(id).is_some()
    }

    /// Returns the item with `id`.
    pub fn item(&self, id: &K) -> Option<&Item<K>> {
        self.items.iter().find(|item| item.id() == id)
    }
}

impl<K: Clone, S> Surface<K, S> {
    /// Returns the item ids in order.
    pub fn order(&self) -> Vec<K> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }
}

impl<K: fmt::Debug, S: fmt::Debug> fmt::Debug for Surface<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("group", &self.group)
            .field("orientation", &self.orientation)
            .field("disabled", &self.disabled)
            .field("bounds", &self.bounds)
            .field("label", &self.label)
            .field("live_region", &self.live_region.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}
