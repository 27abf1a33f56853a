// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling discovery for cross-surface keyboard transfer.
//!
//! Surfaces sharing a [`GroupId`](crate::GroupId) are ordered by where they
//! sit on screen: left edge first, then top edge, then registration order.
//! The keyboard protocol steps through that order when a grabbed item is moved
//! along the perpendicular axis.

use alloc::vec::Vec;

use crate::surface::Surface;
use crate::types::Step;

/// Returns the index of the grouped neighbor of `surfaces[from]`.
///
/// `surfaces` is in registration order. Returns `None` if `from` is out of
/// range, is ungrouped, or is first/last in its group for `step`.
pub fn adjacent_surface<K, S>(surfaces: &[Surface<K, S>], from: usize, step: Step) -> Option<usize> {
    let group = surfaces.get(from)?.group.as_ref()?;

    let mut siblings: Vec<usize> = surfaces
        .iter()
        .enumerate()
        .filter(|(_, surface)| surface.group.as_ref() == Some(group))
        .map(|(index, _)| index)
        .collect();
    // Stable sort keeps registration order for surfaces at the same origin.
    siblings.sort_by(|&a, &b| {
        let (a, b) = (surfaces[a].bounds, surfaces[b].bounds);
        a.x0.total_cmp(&b.x0).then(a.y0.total_cmp(&b.y0))
    });

    let at = siblings.iter().position(|&index| index == from)?;
    let next = step.apply(at, siblings.len())?;
    siblings.get(next).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceConfig;
    use kurbo::Rect;

    fn column(id: u8, group: Option<&str>, x: f64, y: f64) -> Surface<u32, u8> {
        let mut config = SurfaceConfig::new().with_bounds(Rect::new(x, y, x + 100.0, y + 100.0));
        if let Some(group) = group {
            config = config.with_group(group);
        }
        Surface::new(id, config)
    }

    #[test]
    fn orders_by_horizontal_then_vertical_position() {
        // Registered out of visual order.
        let surfaces = [
            column(0, Some("g"), 200.0, 0.0),
            column(1, Some("g"), 0.0, 0.0),
            column(2, Some("g"), 200.0, -50.0),
        ];
        // Visual order: 1, 2, 0.
        assert_eq!(adjacent_surface(&surfaces, 1, Step::Next), Some(2));
        assert_eq!(adjacent_surface(&surfaces, 2, Step::Next), Some(0));
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Next), None);
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Previous), Some(2));
        assert_eq!(adjacent_surface(&surfaces, 1, Step::Previous), None);
    }

    #[test]
    fn ignores_other_groups_and_ungrouped() {
        let surfaces = [
            column(0, Some("a"), 0.0, 0.0),
            column(1, Some("b"), 100.0, 0.0),
            column(2, None, 200.0, 0.0),
            column(3, Some("a"), 300.0, 0.0),
        ];
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Next), Some(3));
        assert_eq!(adjacent_surface(&surfaces, 1, Step::Next), None);
        assert_eq!(adjacent_surface(&surfaces, 2, Step::Next), None);
    }

    #[test]
    fn tolerates_lonely_and_missing_surfaces() {
        let surfaces = [column(0, Some("g"), 0.0, 0.0)];
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Next), None);
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Previous), None);
        assert_eq!(adjacent_surface(&surfaces, 7, Step::Next), None);
    }

    #[test]
    fn ties_fall_back_to_registration_order() {
        let surfaces = [column(0, Some("g"), 0.0, 0.0), column(1, Some("g"), 0.0, 0.0)];
        assert_eq!(adjacent_surface(&surfaces, 0, Step::Next), Some(1));
        assert_eq!(adjacent_surface(&surfaces, 1, Step::Previous), Some(0));
    }
}
