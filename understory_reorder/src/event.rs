// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outbound notifications.

use alloc::vec::Vec;

/// Events produced by one engine call, in emission order.
pub type Events<K, S> = Vec<ReorderEvent<K, S>>;

/// A change the host may want to mirror or persist.
///
/// Indices are 0-based sequence indices. Order payloads are complete
/// snapshots taken after positions were re-synchronized, so they can be
/// persisted as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReorderEvent<K, S> {
    /// A session was created by either protocol.
    SessionStart {
        /// Item being moved.
        item: K,
        /// Surface the item starts in.
        surface: S,
    },
    /// An item changed index within one surface.
    Reorder {
        /// Item that moved.
        item: K,
        /// Surface holding the item.
        surface: S,
        /// Index before the move.
        old_index: usize,
        /// Index after the move.
        new_index: usize,
        /// Item ids of `surface`, in order.
        new_order: Vec<K>,
    },
    /// An item moved to a different surface.
    Transfer {
        /// Item that moved.
        item: K,
        /// Surface the item left.
        from: S,
        /// Surface the item joined.
        to: S,
        /// Index of the item in `to`.
        new_index: usize,
        /// Item ids of `from`, in order.
        from_order: Vec<K>,
        /// Item ids of `to`, in order.
        to_order: Vec<K>,
    },
    /// A session was destroyed.
    SessionEnd {
        /// Item that was being moved.
        item: K,
        /// `true` if the session ended with a drop, `false` if it was
        /// cancelled or abandoned.
        committed: bool,
    },
    /// The keyboard protocol moved focus; `None` means focus left the surfaces.
    FocusChanged {
        /// New focus as `(surface, item)`.
        target: Option<(S, K)>,
    },
}

impl<K, S> ReorderEvent<K, S> {
    /// Returns `true` for [`ReorderEvent::Reorder`] and [`ReorderEvent::Transfer`].
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Reorder { .. } | Self::Transfer { .. })
    }
}
