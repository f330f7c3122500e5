// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by rows, sections, and the manager: identifiers, positions, and flags.

use core::fmt;
use core::sync::atomic::Ordering;

/// Cell kind used when a row does not name one.
pub const DEFAULT_CELL_KIND: &str = "DefaultCellIdentifier";

/// Height reported for rows that have no explicit height and no measured cell.
pub const DEFAULT_CELL_HEIGHT: f64 = 44.0;

/// Width reported for rows that have no explicit width and no measured cell.
pub const DEFAULT_CELL_WIDTH: f64 = 44.0;

/// Sentinel extent meaning "let the bound cell decide".
///
/// A row whose height (or width) is set to this value resolves its extent from the
/// last-bound cell's content, just as if no explicit extent had been set.
pub const AUTOMATIC_DIMENSION: f64 = -1.0;

#[cfg(target_has_atomic = "64")]
type IdCounter = core::sync::atomic::AtomicU64;

// Targets without 64-bit atomics fall back to a 32-bit counter.
#[cfg(not(target_has_atomic = "64"))]
type IdCounter = core::sync::atomic::AtomicU32;

static NEXT_ID: IdCounter = IdCounter::new(1);

#[allow(
    clippy::useless_conversion,
    reason = "The counter is only 32 bits wide on some targets"
)]
fn next_id() -> u64 {
    // Only uniqueness matters; no other memory is published through this counter.
    NEXT_ID.fetch_add(1, Ordering::Relaxed).into()
}

/// Identity of a [`Row`](crate::Row).
///
/// Two rows are the same row if and only if their ids are equal, whatever their content.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn next() -> Self {
        Self(next_id())
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identity of a [`Section`](crate::Section).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SectionId(u64);

impl SectionId {
    pub(crate) fn next() -> Self {
        Self(next_id())
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A grid position: a section index plus a row index within that section.
///
/// Whether the indices count every entity or only visible ones depends on the call
/// that produced or consumes the path (the `include_all` argument).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Row (item) index within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates a new position.
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

bitflags::bitflags! {
    /// Row flags controlling rendering and reordering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// Row is part of the rendered sequence.
        const VISIBLE = 0b0000_0001;
        /// Row may be reordered by the host. Advisory only.
        const MOVABLE = 0b0000_0010;
    }
}

impl Default for RowFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Which supplementary element of a section a query refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SupplementaryKind {
    /// Element above the section's rows.
    Header,
    /// Element below the section's rows.
    Footer,
}

/// Minimum spacing forwarded to the host layout, applied to every section.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    /// Minimum spacing between successive lines.
    pub line: f64,
    /// Minimum spacing between items in the same line.
    pub item: f64,
}
