// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assistive-technology announcements.
//!
//! Every surface may carry a [`LiveRegion`], the host's handle on whatever
//! channel surfaces text to screen readers (an ARIA live region, a platform
//! accessibility notification, a log). The engine renders an
//! [`Announcement`] to text and hands it to the surface's region.
//!
//! Screen readers tend to ignore a live region whose text did not change, so
//! each announcement first clears the region and then sets the new text. Two
//! identical messages in a row are therefore both spoken.
//!
//! Delivery is best effort. A region that reports an [`AnnounceError`] is
//! logged and otherwise ignored; the reorder that triggered it still completes.
//!
//! ## Recording announcements
//!
//! [`LiveRegionLog`] (`std` only) is a cloneable recording region. Keep one
//! clone and hand the other to a surface:
//!
//! ```
//! use understory_reorder::{Engine, ItemConfig, KeyInput, LiveRegionLog, SurfaceConfig};
//!
//! let log = LiveRegionLog::new();
//! let mut engine: Engine<&str, u8> = Engine::new();
//! engine
//!     .register_surface(0, SurfaceConfig::new().with_live_region(log.clone()))
//!     .unwrap();
//! engine.push_item(0, ItemConfig::new("a")).unwrap();
//! engine.push_item(0, ItemConfig::new("b")).unwrap();
//!
//! engine.focus(0, &"b").unwrap();
//! engine.key(KeyInput::Confirm).unwrap();
//! assert_eq!(
//!     log.text(),
//!     "grabbed, position 2 of 2, use arrows to move, confirm to drop, escape to cancel"
//! );
//! ```

use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;

#[cfg(feature = "std")]
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Error reported by a [`LiveRegion`] that could not deliver text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AnnounceError;

impl fmt::Display for AnnounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("announcement channel unavailable")
    }
}

impl core::error::Error for AnnounceError {}

/// Host-side channel that surfaces text to assistive technology.
pub trait LiveRegion {
    /// Empties the region.
    fn clear(&mut self) -> Result<(), AnnounceError>;

    /// Replaces the region's text.
    fn set_text(&mut self, text: &str) -> Result<(), AnnounceError>;
}

impl<R: LiveRegion + ?Sized> LiveRegion for Box<R> {
    fn clear(&mut self) -> Result<(), AnnounceError> {
        (**self).clear()
    }

    fn set_text(&mut self, text: &str) -> Result<(), AnnounceError> {
        (**self).set_text(text)
    }
}

/// A status change worth reporting to the user.
///
/// Positions are 1-based, matching what is read aloud.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Announcement<'a> {
    /// An item was picked up with the keyboard.
    Grabbed {
        /// Position of the item.
        position: usize,
        /// Number of items in the surface.
        count: usize,
    },
    /// A grabbed item moved within its surface.
    Moved {
        /// New position of the item.
        position: usize,
        /// Number of items in the surface.
        count: usize,
    },
    /// A grabbed item moved into another surface.
    Transferred {
        /// Label of the receiving surface, if the host gave it one.
        surface: Option<&'a str>,
        /// Position of the item in the receiving surface.
        position: usize,
        /// Number of items in the receiving surface.
        count: usize,
    },
    /// An item was put down.
    Dropped {
        /// Final position of the item.
        position: usize,
        /// Number of items in the surface.
        count: usize,
    },
    /// A grab was abandoned and the item returned to where it started.
    Cancelled,
}

impl fmt::Display for Announcement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Grabbed { position, count } => write!(
                f,
                "grabbed, position {position} of {count}, use arrows to move, confirm to drop, escape to cancel"
            ),
            Self::Moved { position, count } => {
                write!(f, "moved, position {position} of {count}")
            }
            Self::Transferred {
                surface: Some(label),
                position,
                count,
            } => write!(f, "moved to {label}, position {position} of {count}"),
            Self::Transferred {
                surface: None,
                position,
                count,
            } => write!(f, "moved to next list, position {position} of {count}"),
            Self::Dropped { position, count } => {
                write!(f, "dropped, position {position} of {count}")
            }
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Delivers `announcement` to `region`, clearing it first.
///
/// Failures are logged and dropped.
pub(crate) fn announce(region: &mut dyn LiveRegion, announcement: &Announcement<'_>) {
    let text = announcement.to_string();
    let delivered = region.clear().and_then(|()| region.set_text(&text));
    if let Err(err) = delivered {
        tracing::warn!(target: "understory_reorder", %err, %text, "announcement dropped");
    }
}

#[cfg(feature = "std")]
#[derive(Debug, Default)]
struct LogState {
    text: String,
    history: Vec<String>,
    clears: usize,
}

/// Recording [`LiveRegion`].
///
/// Clones share the same record, so a host or test can keep one handle while
/// the surface owns another. The record sits behind a mutex, so a surface
/// holding a log can move to another thread with its engine.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default)]
pub struct LiveRegionLog {
    state: Arc<Mutex<LogState>>,
}

#[cfg(feature = "std")]
impl LiveRegionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the region's current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.state().text.clone()
    }

    /// Returns every text ever set, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    /// Returns how many times the region was cleared.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.state().clears
    }

    // A panic while recording leaves plain data behind; keep reading it.
    fn state(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl LiveRegion for LiveRegionLog {
    fn clear(&mut self) -> Result<(), AnnounceError> {
        let mut state = self.state();
        state.text.clear();
        state.clears += 1;
        Ok(())
    }

    fn set_text(&mut self, text: &str) -> Result<(), AnnounceError> {
        let mut state = self.state();
        state.text.clear();
        state.text.push_str(text);
        state.history.push(text.into());
        Ok(())
    }
}
