// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections: ordered, named groups of rows with optional header and footer.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::host::CollectionWidget;
use crate::row::Row;
use crate::types::{RowId, SectionId, SupplementaryKind};

/// Computes a header or footer height.
pub type HeightFor<W> = dyn Fn(&Section<W>, &W, usize) -> f64;

/// Computes a header or footer title.
pub type TitleFor<W> = dyn Fn(&Section<W>, &W, usize) -> String;

/// Computes a header or footer view.
pub type ViewFor<W> = dyn Fn(&Section<W>, &W, usize) -> <W as CollectionWidget>::View;

/// Callback slots of one supplementary element.
struct Supplementary<W: CollectionWidget> {
    height: Option<Rc<HeightFor<W>>>,
    title: Option<Rc<TitleFor<W>>>,
    view: Option<Rc<ViewFor<W>>>,
}

impl<W: CollectionWidget> Supplementary<W> {
    const fn new() -> Self {
        Self {
            height: None,
            title: None,
            view: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.height.is_none() && self.title.is_none() && self.view.is_none()
    }
}

impl<W: CollectionWidget> Clone for Supplementary<W> {
    fn clone(&self) -> Self {
        Self {
            height: self.height.clone(),
            title: self.title.clone(),
            view: self.view.clone(),
        }
    }
}

/// An ordered group of [`Row`]s.
///
/// Rows keep insertion order. Adding is idempotent by identity, and lookups by
/// position never fail: an out-of-range index yields a fresh placeholder row.
///
/// ```rust
/// # use understory_collection::{CellHandle, CollectionWidget, IndexPath, Section};
/// # use kurbo::Size;
/// # #[derive(Clone)] struct Cell;
/// # impl CellHandle for Cell { fn content_size(&self) -> Option<Size> { None } }
/// # struct Grid;
/// # impl CollectionWidget for Grid {
/// #     type Cell = Cell;
/// #     type View = ();
/// #     fn dequeue_reusable_cell(&mut self, _: &str, _: IndexPath) -> Cell { Cell }
/// #     fn reload_data(&mut self) {}
/// # }
/// let mut section = Section::<Grid>::new();
/// let hidden = section.add_new_row().set_visible(false).id();
/// let shown = section.add_row_with_kind("Label").id();
///
/// assert_eq!(section.index_of_row(hidden, true), Some(0));
/// assert_eq!(section.index_of_row(hidden, false), None);
/// assert_eq!(section.row(0, false).id(), shown);
///
/// // Past the end: a placeholder that matches nothing we track.
/// let placeholder = section.row(5, false);
/// assert!(section.index_of_row(placeholder.id(), true).is_none());
/// ```
pub struct Section<W: CollectionWidget> {
    id: SectionId,
    visible: bool,
    payload: Option<Rc<dyn Any>>,
    index_title: Option<String>,
    rows: Vec<Row<W>>,
    header: Supplementary<W>,
    footer: Supplementary<W>,
}

impl<W: CollectionWidget> Section<W> {
    /// Creates an empty, visible section with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SectionId::next(),
            visible: true,
            payload: None,
            index_title: None,
            rows: Vec::new(),
            header: Supplementary::new(),
            footer: Supplementary::new(),
        }
    }

    /// Returns the section's identity.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns `true` if the section is rendered.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets whether the section is rendered.
    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.visible = visible;
        self
    }

    /// Returns the payload if one is set and it has type `T`.
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref()
    }

    /// Attaches user data for the callbacks.
    pub fn set_payload<T: Any>(&mut self, payload: T) -> &mut Self {
        self.payload = Some(Rc::new(payload));
        self
    }

    /// Label for the host's index scroller.
    #[must_use]
    pub fn index_title(&self) -> Option<&str> {
        self.index_title.as_deref()
    }

    /// Sets the label for the host's index scroller.
    pub fn set_index_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.index_title = Some(title.into());
        self
    }

    /// All rows, visible or not, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row<W>] {
        &self.rows
    }

    /// The visible rows, in insertion order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row<W>> {
        self.rows.iter().filter(|row| row.is_visible())
    }

    /// Number of rows in the chosen coordinate space.
    #[must_use]
    pub fn row_count(&self, include_all: bool) -> usize {
        if include_all {
            self.rows.len()
        } else {
            self.visible_rows().count()
        }
    }

    fn position_of(&self, index: usize, include_all: bool) -> Option<usize> {
        if include_all {
            (index < self.rows.len()).then_some(index)
        } else {
            self.rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.is_visible())
                .nth(index)
                .map(|(i, _)| i)
        }
    }

    /// Returns the row at `index`, or `None` when out of range.
    #[must_use]
    pub fn get_row(&self, index: usize, include_all: bool) -> Option<&Row<W>> {
        self.position_of(index, include_all).map(|i| &self.rows[i])
    }

    /// Mutable variant of [`Section::get_row`].
    pub fn get_row_mut(&mut self, index: usize, include_all: bool) -> Option<&mut Row<W>> {
        let i = self.position_of(index, include_all)?;
        Some(&mut self.rows[i])
    }

    /// Returns the row at `index`, or a fresh empty row when out of range.
    ///
    /// With `include_all` the index counts every row; otherwise only visible ones.
    #[must_use]
    pub fn row(&self, index: usize, include_all: bool) -> Cow<'_, Row<W>> {
        match self.get_row(index, include_all) {
            Some(row) => Cow::Borrowed(row),
            None => {
                log_debug!(
                    index,
                    len = self.row_count(include_all),
                    include_all,
                    "row index out of range, substituting an empty row"
                );
                Cow::Owned(Row::new())
            }
        }
    }

    /// Index of the row with identity `id` in the chosen coordinate space.
    #[must_use]
    pub fn index_of_row(&self, id: RowId, include_all: bool) -> Option<usize> {
        if include_all {
            self.rows.iter().position(|row| row.id() == id)
        } else {
            self.visible_rows().position(|row| row.id() == id)
        }
    }

    /// Appends `row` unless a row with the same identity is already present.
    ///
    /// Returns the stored row. When the identity was already present, the existing
    /// row is returned unchanged and `row` is dropped.
    pub fn add_row(&mut self, row: Row<W>) -> &mut Row<W> {
        let i = match self.index_of_row(row.id(), true) {
            Some(i) => i,
            None => {
                self.rows.push(row);
                self.rows.len() - 1
            }
        };
        &mut self.rows[i]
    }

    /// Appends a new empty row and returns it.
    pub fn add_new_row(&mut self) -> &mut Row<W> {
        self.add_row(Row::new())
    }

    /// Appends a new row using the cell registered under `kind` and returns it.
    pub fn add_row_with_kind(&mut self, kind: impl Into<String>) -> &mut Row<W> {
        self.add_row(Row::with_cell_kind(kind))
    }

    /// Removes every row.
    pub fn clear_rows(&mut self) -> &mut Self {
        self.rows.clear();
        self
    }

    fn supplementary(&self, kind: SupplementaryKind) -> &Supplementary<W> {
        match kind {
            SupplementaryKind::Header => &self.header,
            SupplementaryKind::Footer => &self.footer,
        }
    }

    fn supplementary_mut(&mut self, kind: SupplementaryKind) -> &mut Supplementary<W> {
        match kind {
            SupplementaryKind::Header => &mut self.header,
            SupplementaryKind::Footer => &mut self.footer,
        }
    }

    /// Computes the header or footer title from a callback.
    ///
    /// Replaces any previously set title, static or dynamic.
    pub fn set_title_with<F>(&mut self, kind: SupplementaryKind, title: F) -> &mut Self
    where
        F: Fn(&Self, &W, usize) -> String + 'static,
    {
        self.supplementary_mut(kind).title = Some(Rc::new(title));
        self
    }

    /// Uses a fixed header or footer title.
    pub fn set_title(&mut self, kind: SupplementaryKind, title: impl Into<String>) -> &mut Self {
        let title = title.into();
        self.set_title_with(kind, move |_, _, _| title.clone())
    }

    /// Computes the header or footer view from a callback.
    pub fn set_view_with<F>(&mut self, kind: SupplementaryKind, view: F) -> &mut Self
    where
        F: Fn(&Self, &W, usize) -> W::View + 'static,
    {
        self.supplementary_mut(kind).view = Some(Rc::new(view));
        self
    }

    /// Uses a fixed header or footer view.
    pub fn set_view(&mut self, kind: SupplementaryKind, view: W::View) -> &mut Self
    where
        W::View: 'static,
    {
        self.set_view_with(kind, move |_, _, _| view.clone())
    }

    /// Computes the header or footer height from a callback.
    pub fn set_height_with<F>(&mut self, kind: SupplementaryKind, height: F) -> &mut Self
    where
        F: Fn(&Self, &W, usize) -> f64 + 'static,
    {
        self.supplementary_mut(kind).height = Some(Rc::new(height));
        self
    }

    /// Uses a fixed header or footer height.
    pub fn set_height(&mut self, kind: SupplementaryKind, height: f64) -> &mut Self {
        self.set_height_with(kind, move |_, _, _| height)
    }

    /// Header or footer title for this section displayed at `index`.
    #[must_use]
    pub fn title(&self, kind: SupplementaryKind, widget: &W, index: usize) -> Option<String> {
        let title = self.supplementary(kind).title.as_ref()?;
        Some(title(self, widget, index))
    }

    /// Header or footer view for this section displayed at `index`.
    #[must_use]
    pub fn view(&self, kind: SupplementaryKind, widget: &W, index: usize) -> Option<W::View> {
        let view = self.supplementary(kind).view.as_ref()?;
        Some(view(self, widget, index))
    }

    /// Header or footer height for this section displayed at `index`.
    #[must_use]
    pub fn height(&self, kind: SupplementaryKind, widget: &W, index: usize) -> Option<f64> {
        let height = self.supplementary(kind).height.as_ref()?;
        Some(height(self, widget, index))
    }
}

impl<W: CollectionWidget> Default for Section<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: CollectionWidget> Clone for Section<W> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            visible: self.visible,
            payload: self.payload.clone(),
            index_title: self.index_title.clone(),
            rows: self.rows.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
        }
    }
}

impl<W: CollectionWidget> PartialEq for Section<W> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<W: CollectionWidget> Eq for Section<W> {}

impl<W: CollectionWidget> fmt::Debug for Section<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("index_title", &self.index_title)
            .field("rows", &self.rows)
            .field("has_header", &!self.header.is_empty())
            .field("has_footer", &!self.footer.is_empty())
            .finish_non_exhaustive()
    }
}
