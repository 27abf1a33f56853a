// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-position resolution and position synchronization.
//!
//! Both functions are pure with respect to everything but their explicit
//! arguments, and both are exposed so hosts can preview a drop or validate
//! their own item lists without going through an [`Engine`](crate::Engine).

use kurbo::Point;

use crate::surface::Item;
use crate::types::Orientation;

/// Maps a pointer position to an insertion index.
///
/// Items are scanned in order, skipping the one whose id equals `excluding`
/// (the item being dragged). The result is the index, among the remaining
/// items, of the first item whose midpoint along `orientation` lies strictly
/// past the pointer; if none does, it is the number of remaining items.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_reorder::{Item, ItemConfig, Orientation, resolve_drop_index};
///
/// // Midpoints at y = 10, 30, 50.
/// let items: Vec<Item<u32>> = [0.0, 20.0, 40.0]
///     .into_iter()
///     .enumerate()
///     .map(|(i, y)| {
///         Item::from(ItemConfig::new(i as u32).with_bounds(Rect::new(0.0, y, 100.0, y + 20.0)))
///     })
///     .collect();
///
/// let at = |y| resolve_drop_index(Point::new(0.0, y), Orientation::Vertical, &items, None);
/// assert_eq!(at(5.0), 0);
/// assert_eq!(at(25.0), 1);
/// assert_eq!(at(60.0), 3);
/// ```
#[must_use]
pub fn resolve_drop_index<K: PartialEq>(
    point: Point,
    orientation: Orientation,
    items: &[Item<K>],
    excluding: Option<&K>,
) -> usize {
    let coordinate = orientation.axis(point);
    let mut index = 0;
    for item in items {
        if excluding == Some(item.id()) {
            continue;
        }
        if orientation.axis(item.bounds().center()) > coordinate {
            return index;
        }
        index += 1;
    }
    index
}

/// Rewrites every item's 1-based position from its sequence index.
///
/// Returns `true` if any position changed. Calling it again without an
/// intervening mutation changes nothing.
pub fn sync_positions<K>(items: &mut [Item<K>]) -> bool {
    let mut changed = false;
    for (index, item) in items.iter_mut().enumerate() {
        let position = index + 1;
        if item.position != position {
            item.position = position;
            changed = true;
        }
    }
    changed
}
