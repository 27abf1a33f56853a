// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Why an operation was refused.

use core::fmt;

/// Reason an [`Engine`](crate::Engine) operation was refused.
///
/// A rejected operation leaves every surface, item and session untouched and
/// produces no events. Hosts that only care about outcomes can discard the
/// error; it exists for diagnostics and tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejected {
    /// A session is already in progress.
    SessionActive,
    /// The operation needs a session and none exists.
    NoSession,
    /// The session belongs to the other input protocol.
    WrongProtocol,
    /// The surface is not registered.
    UnknownSurface,
    /// The item is not present in the named surface.
    UnknownItem,
    /// The surface does not accept mutation right now.
    SurfaceDisabled,
    /// The press started outside the item's drag handle.
    OutsideHandle,
    /// The target surface is not in the origin surface's group.
    GroupMismatch,
    /// There is no sibling surface in that direction.
    NoAdjacentSurface,
    /// The target surface already holds an item with the same id.
    DuplicateItem,
    /// A surface with the same id is already registered.
    DuplicateSurface,
    /// The pointer session has already dropped its item.
    AlreadyDropped,
    /// No item has keyboard focus.
    NotFocused,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SessionActive => "a reorder session is already active",
            Self::NoSession => "no reorder session is active",
            Self::WrongProtocol => "the active session belongs to the other input protocol",
            Self::UnknownSurface => "surface is not registered",
            Self::UnknownItem => "item is not in the surface",
            Self::SurfaceDisabled => "surface is disabled",
            Self::OutsideHandle => "press started outside the drag handle",
            Self::GroupMismatch => "surface is not in the origin's transfer group",
            Self::NoAdjacentSurface => "no adjacent surface in that direction",
            Self::DuplicateItem => "surface already contains an item with that id",
            Self::DuplicateSurface => "surface id is already registered",
            Self::AlreadyDropped => "the dragged item was already dropped",
            Self::NotFocused => "no item has keyboard focus",
        })
    }
}

impl core::error::Error for Rejected {}
