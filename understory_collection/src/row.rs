// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rows: the leaf items of a collection.

use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use kurbo::Size;

use crate::host::{CellHandle, CollectionWidget};
use crate::types::{
    AUTOMATIC_DIMENSION, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_KIND, DEFAULT_CELL_WIDTH, IndexPath,
    RowFlags, RowId,
};

/// Fills a freshly dequeued cell with the row's content.
pub type Populate<W> = dyn Fn(&Row<W>, &<W as CollectionWidget>::Cell, IndexPath);

/// Reacts to the row being selected.
pub type OnSelect<W> = dyn Fn(&Row<W>, &mut W, IndexPath);

/// Reacts to the row's cell being about to appear.
pub type WillAppear<W> = dyn Fn(&Row<W>, &mut W, &<W as CollectionWidget>::Cell, IndexPath);

/// Where and into which cell a row was last rendered.
struct Binding<C> {
    position: IndexPath,
    cell: C,
}

/// One renderable item.
///
/// Rows are configured through chainable setters, each returning `&mut Self`:
///
/// ```rust
/// # use understory_collection::{CellHandle, CollectionWidget, IndexPath, Row};
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
/// let mut row = Row::<Grid>::with_cell_kind("Avatar");
/// row.set_height(64.0).set_width(64.0).set_payload(7_u32);
///
/// assert_eq!(row.cell_kind(), "Avatar");
/// assert_eq!(row.size(), Size::new(64.0, 64.0));
/// assert_eq!(row.payload::<u32>(), Some(&7));
///
/// row.set_visible(false);
/// assert_eq!(row.height(), 0.0);
/// ```
///
/// Equality is identity: a row equals itself and its clones, never a different row
/// with the same content. Unset callbacks make the matching event a no-op.
pub struct Row<W: CollectionWidget> {
    id: RowId,
    cell_kind: Option<String>,
    flags: RowFlags,
    payload: Option<Rc<dyn Any>>,
    populate: Option<Rc<Populate<W>>>,
    on_select: Option<Rc<OnSelect<W>>>,
    will_appear: Option<Rc<WillAppear<W>>>,
    height: Option<f64>,
    width: Option<f64>,
    binding: Option<Binding<W::Cell>>,
}

impl<W: CollectionWidget> Row<W> {
    /// Creates an empty, visible row with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: RowId::next(),
            cell_kind: None,
            flags: RowFlags::default(),
            payload: None,
            populate: None,
            on_select: None,
            will_appear: None,
            height: None,
            width: None,
            binding: None,
        }
    }

    /// Creates an empty row rendered with the cell registered under `kind`.
    #[must_use]
    pub fn with_cell_kind(kind: impl Into<String>) -> Self {
        let mut row = Self::new();
        row.cell_kind = Some(kind.into());
        row
    }

    /// Returns the row's identity.
    #[must_use]
    pub const fn id(&self) -> RowId {
        self.id
    }

    /// Returns the cell kind, or [`DEFAULT_CELL_KIND`] when none was set.
    #[must_use]
    pub fn cell_kind(&self) -> &str {
        self.cell_kind.as_deref().unwrap_or(DEFAULT_CELL_KIND)
    }

    /// Returns the row flags.
    #[must_use]
    pub const fn flags(&self) -> RowFlags {
        self.flags
    }

    /// Returns `true` if the row is part of the rendered sequence.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(RowFlags::VISIBLE)
    }

    /// Returns `true` if the row is marked as movable.
    #[must_use]
    pub const fn can_move(&self) -> bool {
        self.flags.contains(RowFlags::MOVABLE)
    }

    /// Returns the payload if one is set and it has type `T`.
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref()
    }

    /// Position of the last render, if the row has been bound.
    #[must_use]
    pub fn bound_position(&self) -> Option<IndexPath> {
        self.binding.as_ref().map(|b| b.position)
    }

    /// Handle to the last cell this row was rendered into.
    #[must_use]
    pub fn cell(&self) -> Option<&W::Cell> {
        self.binding.as_ref().map(|b| &b.cell)
    }

    /// Sets whether the row is rendered.
    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.flags.set(RowFlags::VISIBLE, visible);
        self
    }

    /// Sets the cell kind used to dequeue this row's cell.
    pub fn set_cell_kind(&mut self, kind: impl Into<String>) -> &mut Self {
        self.cell_kind = Some(kind.into());
        self
    }

    /// Attaches user data for the callbacks.
    pub fn set_payload<T: Any>(&mut self, payload: T) -> &mut Self {
        self.payload = Some(Rc::new(payload));
        self
    }

    /// Marks the row as movable.
    pub fn set_can_move(&mut self, movable: bool) -> &mut Self {
        self.flags.set(RowFlags::MOVABLE, movable);
        self
    }

    /// Sets the callback that fills a dequeued cell.
    pub fn set_populate<F>(&mut self, populate: F) -> &mut Self
    where
        F: Fn(&Self, &W::Cell, IndexPath) + 'static,
    {
        self.populate = Some(Rc::new(populate));
        self
    }

    /// Sets the selection callback.
    pub fn set_on_select<F>(&mut self, on_select: F) -> &mut Self
    where
        F: Fn(&Self, &mut W, IndexPath) + 'static,
    {
        self.on_select = Some(Rc::new(on_select));
        self
    }

    /// Sets the callback run just before the row's cell appears.
    pub fn set_will_appear<F>(&mut self, will_appear: F) -> &mut Self
    where
        F: Fn(&Self, &mut W, &W::Cell, IndexPath) + 'static,
    {
        self.will_appear = Some(Rc::new(will_appear));
        self
    }

    /// Sets an explicit height. [`AUTOMATIC_DIMENSION`] defers to the bound cell.
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.height = Some(height);
        self
    }

    /// Sets an explicit width. [`AUTOMATIC_DIMENSION`] defers to the bound cell.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Resolved height.
    ///
    /// In order:
    /// - `0.0` when the row is hidden,
    /// - the explicit height, unless it is [`AUTOMATIC_DIMENSION`],
    /// - [`DEFAULT_CELL_HEIGHT`] when the row was never bound,
    /// - the bound cell's content height, or [`DEFAULT_CELL_HEIGHT`] if unavailable.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.resolve_extent(self.height, DEFAULT_CELL_HEIGHT, |size| size.height)
    }

    /// Resolved width, following the same chain as [`Row::height`].
    #[must_use]
    pub fn width(&self) -> f64 {
        self.resolve_extent(self.width, DEFAULT_CELL_WIDTH, |size| size.width)
    }

    /// Resolved width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    fn resolve_extent(
        &self,
        explicit: Option<f64>,
        fallback: f64,
        measure: impl FnOnce(Size) -> f64,
    ) -> f64 {
        if !self.is_visible() {
            return 0.0;
        }
        match explicit {
            Some(extent) if extent != AUTOMATIC_DIMENSION => extent,
            _ => match &self.binding {
                None => fallback,
                Some(binding) => binding.cell.content_size().map_or(fallback, measure),
            },
        }
    }

    /// Runs the populate callback, if any.
    pub fn populate(&self, cell: &W::Cell, position: IndexPath) {
        if let Some(populate) = &self.populate {
            populate(self, cell, position);
        }
    }

    /// Runs the selection callback, if any.
    pub fn select(&self, widget: &mut W, position: IndexPath) {
        if let Some(on_select) = &self.on_select {
            on_select(self, widget, position);
        }
    }

    /// Runs the will-appear callback, if any.
    pub fn will_appear(&self, widget: &mut W, cell: &W::Cell, position: IndexPath) {
        if let Some(will_appear) = &self.will_appear {
            will_appear(self, widget, cell, position);
        }
    }

    /// Records the cell and position of the latest render.
    pub(crate) fn bind(&mut self, position: IndexPath, cell: W::Cell) {
        self.binding = Some(Binding { position, cell });
    }
}

impl<W: CollectionWidget> Default for Row<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: CollectionWidget> Clone for Row<W> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cell_kind: self.cell_kind.clone(),
            flags: self.flags,
            payload: self.payload.clone(),
            populate: self.populate.clone(),
            on_select: self.on_select.clone(),
            will_appear: self.will_appear.clone(),
            height: self.height,
            width: self.width,
            binding: self.binding.as_ref().map(|b| Binding {
                position: b.position,
                cell: b.cell.clone(),
            }),
        }
    }
}

impl<W: CollectionWidget> PartialEq for Row<W> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<W: CollectionWidget> Eq for Row<W> {}

impl<W: CollectionWidget> fmt::Debug for Row<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("cell_kind", &self.cell_kind())
            .field("flags", &self.flags)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("bound_position", &self.bound_position())
            .finish_non_exhaustive()
    }
}
