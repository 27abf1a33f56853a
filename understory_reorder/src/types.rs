// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types shared by both input protocols.

use alloc::string::String;
use core::fmt;

use kurbo::Point;

/// Layout axis of a surface.
///
/// The orientation decides which coordinate of a pointer position is compared
/// against item midpoints, and which arrow keys reorder within the surface
/// (primary axis) versus transfer to a sibling surface (perpendicular axis).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items are stacked top to bottom; `Up`/`Down` reorder.
    #[default]
    Vertical,
    /// Items are laid out left to right; `Left`/`Right` reorder.
    Horizontal,
}

impl Orientation {
    /// Returns the coordinate of `point` along this axis.
    #[must_use]
    pub fn axis(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Returns `true` if `direction` runs along this axis.
    #[must_use]
    pub fn is_primary(self, direction: Direction) -> bool {
        match self {
            Self::Vertical => direction.is_vertical(),
            Self::Horizontal => !direction.is_vertical(),
        }
    }
}

/// Interaction state of a single item.
///
/// At most one item across an [`Engine`](crate::Engine) is ever in a state
/// other than [`DragState::Idle`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragState {
    /// Not part of a session.
    #[default]
    Idle,
    /// Carried by a pointer drag.
    Dragging,
    /// Picked up with the keyboard.
    Grabbed,
}

impl DragState {
    /// Returns `true` for [`DragState::Dragging`] and [`DragState::Grabbed`].
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Identifier shared by surfaces that may exchange items.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a group identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

impl From<String> for GroupId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arrow-key direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the top.
    Up,
    /// Toward the bottom.
    Down,
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
}

impl Direction {
    /// Returns `true` for `Up` and `Down`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Maps the direction onto a sequence step.
    ///
    /// `Up` and `Left` point toward the head of a surface (or the previous
    /// surface); `Down` and `Right` toward the tail (or the next surface).
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::Up | Self::Left => Step::Previous,
            Self::Down | Self::Right => Step::Next,
        }
    }
}

/// One step backward or forward in an ordered sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Toward index zero.
    Previous,
    /// Away from index zero.
    Next,
}

impl Step {
    /// Applies the step to `index` within `0..len`, clamping at both ends.
    ///
    /// Returns `None` if the step would leave the range.
    #[must_use]
    pub fn apply(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Previous => index.checked_sub(1),
            Self::Next => index.checked_add(1).filter(|&next| next < len),
        }
    }
}

/// Keyboard input understood by the keyboard protocol.
///
/// Hosts translate their platform key events into these values; see
/// [`KeyInput::from_key_name`] for the common web key names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// An arrow key.
    Arrow(Direction),
    /// Pick up or put down the focused item.
    Confirm,
    /// Abandon the current grab, or leave the surface when nothing is grabbed.
    Cancel,
}

impl KeyInput {
    /// Maps a `KeyboardEvent.key` name to an input.
    ///
    /// ```
    /// use understory_reorder::{Direction, KeyInput};
    ///
    /// assert_eq!(KeyInput::from_key_name("ArrowLeft"), Some(KeyInput::Arrow(Direction::Left)));
    /// assert_eq!(KeyInput::from_key_name(" "), Some(KeyInput::Confirm));
    /// assert_eq!(KeyInput::from_key_name("Tab"), None);
    /// ```
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowUp" | "Up" => Self::Arrow(Direction::Up),
            "ArrowDown" | "Down" => Self::Arrow(Direction::Down),
            "ArrowLeft" | "Left" => Self::Arrow(Direction::Left),
            "ArrowRight" | "Right" => Self::Arrow(Direction::Right),
            "Enter" | " " | "Spacebar" => Self::Confirm,
            "Escape" | "Esc" => Self::Cancel,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_picks_axis() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Orientation::Vertical.axis(p), 7.0);
        assert_eq!(Orientation::Horizontal.axis(p), 3.0);
    }

    #[test]
    fn primary_axis_matches_orientation() {
        assert!(Orientation::Vertical.is_primary(Direction::Up));
        assert!(!Orientation::Vertical.is_primary(Direction::Right));
        assert!(Orientation::Horizontal.is_primary(Direction::Left));
        assert!(!Orientation::Horizontal.is_primary(Direction::Down));
    }

    #[test]
    fn step_clamps_without_wrapping() {
        assert_eq!(Step::Previous.apply(0, 3), None);
        assert_eq!(Step::Previous.apply(2, 3), Some(1));
        assert_eq!(Step::Next.apply(1, 3), Some(2));
        assert_eq!(Step::Next.apply(2, 3), None);
        assert_eq!(Step::Next.apply(0, 0), None);
    }

    #[test]
    fn key_names_cover_aliases() {
        assert_eq!(
            KeyInput::from_key_name("Down"),
            Some(KeyInput::Arrow(Direction::Down))
        );
        assert_eq!(KeyInput::from_key_name("Enter"), Some(KeyInput::Confirm));
        assert_eq!(KeyInput::from_key_name("Esc"), Some(KeyInput::Cancel));
        assert_eq!(KeyInput::from_key_name("a"), None);
    }
}
