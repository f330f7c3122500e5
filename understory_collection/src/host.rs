// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary with the host toolkit.
//!
//! The host owns rendering, layout, cell pooling, and scroll delivery. It implements
//! [`CollectionWidget`] so the manager can ask it for cells, and it calls into a
//! [`CollectionDataSource`] and a [`CollectionDelegate`] (both implemented by
//! [`Manager`](crate::Manager)) whenever it needs counts, cells, sizes, or to report
//! selection.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::types::{IndexPath, SupplementaryKind};

/// A non-owning handle to a pooled cell.
///
/// Handles are stored on rows as their "last-bound cell" and must not keep the cell
/// alive. A `Weak` pointer or an index into the host's pool are typical choices.
pub trait CellHandle: Clone {
    /// Size of the cell's rendered content, or `None` if the cell is gone or has not
    /// been laid out yet.
    fn content_size(&self) -> Option<Size>;
}

/// The grid/list widget the manager feeds.
pub trait CollectionWidget {
    /// Handle to a reusable cell.
    type Cell: CellHandle;
    /// Supplementary view value (section header or footer).
    type View: Clone;

    /// Returns a reusable cell registered under `kind`, prepared for `position`.
    fn dequeue_reusable_cell(&mut self, kind: &str, position: IndexPath) -> Self::Cell;

    /// Discards everything on screen and queries the data source again.
    fn reload_data(&mut self);
}

/// A scroll notification forwarded untouched to a [`ScrollObserver`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollEvent {
    /// The content offset changed.
    DidScroll {
        /// New content offset.
        offset: Point,
    },
    /// The user started dragging the content.
    WillBeginDragging,
    /// The user lifted their finger.
    DidEndDragging {
        /// Whether momentum scrolling follows.
        will_decelerate: bool,
    },
    /// Momentum scrolling came to rest.
    DidEndDecelerating,
}

/// Receives scroll notifications the manager does not interpret.
pub trait ScrollObserver<W: CollectionWidget> {
    /// Called for every forwarded scroll notification.
    fn scroll_event(&self, widget: &W, event: ScrollEvent);
}

/// Counts and cells: the questions a widget must ask before it can draw anything.
///
/// All positions are in visible-only coordinates.
pub trait CollectionDataSource<W: CollectionWidget> {
    /// Number of sections to draw.
    fn number_of_sections(&self, widget: &W) -> usize;

    /// Number of items to draw in `section`.
    fn number_of_items(&self, widget: &W, section: usize) -> usize;

    /// Produces and populates the cell for `position`.
    fn cell_for_item(&mut self, widget: &mut W, position: IndexPath) -> W::Cell;

    /// Labels for the host's index scroller, one per titled section.
    fn section_index_titles(&self, widget: &W) -> Vec<String> {
        let _ = widget;
        Vec::new()
    }
}

/// Layout queries and interaction notifications.
///
/// All positions are in visible-only coordinates. Every method has a neutral default
/// so partial implementations stay small.
pub trait CollectionDelegate<W: CollectionWidget> {
    /// Minimum spacing between lines in `section`.
    fn minimum_line_spacing(&self, widget: &W, section: usize) -> f64 {
        let _ = (widget, section);
        0.0
    }

    /// Minimum spacing between items of one line in `section`.
    fn minimum_item_spacing(&self, widget: &W, section: usize) -> f64 {
        let _ = (widget, section);
        0.0
    }

    /// The item at `position` was selected.
    fn did_select_item(&mut self, widget: &mut W, position: IndexPath) {
        let _ = (widget, position);
    }

    /// `cell` is about to be shown at `position`.
    fn will_display_item(&mut self, widget: &mut W, cell: &W::Cell, position: IndexPath) {
        let _ = (widget, cell, position);
    }

    /// Size of the item at `position`.
    fn size_for_item(&self, widget: &W, position: IndexPath) -> Size;

    /// Whether the item at `position` may be reordered.
    fn can_move_item(&self, widget: &W, position: IndexPath) -> bool {
        let _ = (widget, position);
        false
    }

    /// Height of the header or footer of `section`; zero hides it.
    fn supplementary_height(&self, widget: &W, kind: SupplementaryKind, section: usize) -> f64 {
        let _ = (widget, kind, section);
        0.0
    }

    /// Title of the header or footer of `section`.
    fn supplementary_title(
        &self,
        widget: &W,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<String> {
        let _ = (widget, kind, section);
        None
    }

    /// View for the header or footer of `section`.
    fn supplementary_view(
        &self,
        widget: &W,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<W::View> {
        let _ = (widget, kind, section);
        None
    }

    /// A scroll notification arrived.
    fn scroll_event(&self, widget: &W, event: ScrollEvent) {
        let _ = (widget, event);
    }
}
