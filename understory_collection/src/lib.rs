// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collection --heading-base-level=0

//! Understory Collection: declarative sections and rows for grid and list widgets.
//!
//! Describe what a grid shows as an ordered list of [`Section`]s, each holding an
//! ordered list of [`Row`]s, and let a [`Manager`] answer the widget's data source and
//! delegate questions: how many sections and items, which cell to dequeue and how to
//! fill it, how large each item is, and what to do when one is selected.
//!
//! - [`Row`]: one item. Carries identity, visibility, a cell kind, optional sizing,
//!   a payload, and optional populate / select / will-appear callbacks.
//! - [`Section`]: an ordered group of rows with its own visibility, an index title,
//!   and header/footer callbacks.
//! - [`Manager`]: owns the sections and implements [`CollectionDataSource`] and
//!   [`CollectionDelegate`] for any [`CollectionWidget`].
//!
//! ## Two coordinate spaces
//!
//! Every entity has a `visible` flag. Widgets only ever see visible sections and
//! visible rows, so positions handed to the manager by the widget are in
//! *visible-only* coordinates. Lookups take an `include_all` flag to address every
//! entity instead, and [`Manager::convert_to_include_all_index_path`] maps between
//! the two.
//!
//! ## Lookups never fail
//!
//! Widgets routinely ask about positions that were just invalidated. Positional
//! lookups ([`Manager::row`], [`Manager::section`], [`Section::row`]) therefore
//! return a fresh, empty placeholder when the index is out of range. Identity lookups
//! ([`Manager::index_path_of_row`], [`Section::index_of_row`]) return `None` when
//! nothing matches. Use the `get_*` variants to observe a miss directly.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_collection::{
//!     CellHandle, CollectionDataSource, CollectionDelegate, CollectionWidget, IndexPath,
//!     Manager,
//! };
//!
//! #[derive(Clone)]
//! struct Cell;
//!
//! impl CellHandle for Cell {
//!     fn content_size(&self) -> Option<Size> {
//!         None
//!     }
//! }
//!
//! struct Grid;
//!
//! impl CollectionWidget for Grid {
//!     type Cell = Cell;
//!     type View = ();
//!
//!     fn dequeue_reusable_cell(&mut self, _kind: &str, _position: IndexPath) -> Cell {
//!         Cell
//!     }
//!
//!     fn reload_data(&mut self) {}
//! }
//!
//! let mut grid = Grid;
//! let mut manager = Manager::<Grid>::new();
//! manager
//!     .add_row_with_kind("Photo")
//!     .set_width(100.0)
//!     .set_height(100.0)
//!     .set_on_select(|_, grid, _| grid.reload_data());
//!
//! assert_eq!(manager.number_of_items(&grid, 0), 1);
//! assert_eq!(
//!     manager.size_for_item(&grid, IndexPath::new(0, 0)),
//!     Size::new(100.0, 100.0)
//! );
//! manager.did_select_item(&mut grid, IndexPath::new(0, 0));
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded and synchronous, matching the UI thread that
//! drives the widget. Callbacks are reference-counted with [`Rc`](alloc::rc::Rc), so
//! rows, sections, and managers are neither `Send` nor `Sync`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for `kurbo`.
//! - `tracing`: emits `tracing` debug events whenever a lookup substitutes a
//!   placeholder or the manager creates its implicit first section.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "tracing")]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

mod host;
mod manager;
mod row;
mod section;
mod types;

#[cfg(test)]
mod testing;

pub use host::{
    CellHandle, CollectionDataSource, CollectionDelegate, CollectionWidget, ScrollEvent,
    ScrollObserver,
};
pub use manager::Manager;
pub use row::{OnSelect, Populate, Row, WillAppear};
pub use section::{HeightFor, Section, TitleFor, ViewFor};
pub use types::{
    AUTOMATIC_DIMENSION, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_KIND, DEFAULT_CELL_WIDTH, IndexPath,
    RowFlags, RowId, SectionId, Spacing, SupplementaryKind,
};
