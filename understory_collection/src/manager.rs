// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The manager: owns the section list and answers the widget's questions.

use alloc::borrow::Cow;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

use crate::host::{
    CollectionDataSource, CollectionDelegate, CollectionWidget, ScrollEvent, ScrollObserver,
};
use crate::row::Row;
use crate::section::Section;
use crate::types::{DEFAULT_CELL_KIND, IndexPath, RowId, SectionId, Spacing, SupplementaryKind};

/// Adapter between a tree of [`Section`]s and [`Row`]s and a [`CollectionWidget`].
///
/// The manager does not hold the widget. Whoever owns the widget keeps a manager next
/// to it and hands the widget in on every bridging call, so there is exactly one
/// manager per widget and its lifetime is the owner's.
///
/// Positions coming from the widget are in visible-only coordinates: hidden sections
/// and rows are skipped. The lookup methods take an `include_all` flag to address
/// every entity instead.
///
/// ## Example
///
/// ```rust
/// use understory_collection::{
///     CellHandle, CollectionDataSource, CollectionWidget, IndexPath, Manager,
/// };
/// # use kurbo::Size;
/// # #[derive(Clone)] struct Cell;
/// # impl CellHandle for Cell { fn content_size(&self) -> Option<Size> { None } }
/// # #[derive(Default)] struct Grid { kinds: Vec<String> }
/// # impl CollectionWidget for Grid {
/// #     type Cell = Cell;
/// #     type View = ();
/// #     fn dequeue_reusable_cell(&mut self, kind: &str, _: IndexPath) -> Cell {
/// #         self.kinds.push(kind.into());
/// #         Cell
/// #     }
/// #     fn reload_data(&mut self) {}
/// # }
///
/// let mut grid = Grid::default();
/// let mut manager = Manager::<Grid>::new();
///
/// // Rows added before any section land in an implicit first section.
/// manager.add_row_with_kind("Title").set_height(60.0);
/// manager.add_new_row().set_visible(false);
/// manager.add_row_with_kind("Body");
///
/// assert_eq!(manager.number_of_sections(&grid), 1);
/// assert_eq!(manager.number_of_items(&grid, 0), 2);
///
/// manager.cell_for_item(&mut grid, IndexPath::new(0, 1));
/// assert_eq!(grid.kinds, ["Body"]);
///
/// // Visible position (0, 1) is the third row overall.
/// assert_eq!(
///     manager.convert_to_include_all_index_path(IndexPath::new(0, 1)),
///     Some(IndexPath::new(0, 2)),
/// );
/// ```
pub struct Manager<W: CollectionWidget> {
    sections: Vec<Section<W>>,
    spacing: Spacing,
    scroll_observer: Option<Weak<dyn ScrollObserver<W>>>,
}

impl<W: CollectionWidget> Manager<W> {
    /// Creates a manager with no sections and zero spacing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spacing(Spacing::default())
    }

    /// Creates a manager with no sections and the given spacing.
    #[must_use]
    pub fn with_spacing(spacing: Spacing) -> Self {
        Self {
            sections: Vec::new(),
            spacing,
            scroll_observer: None,
        }
    }

    /// Returns the spacing forwarded to the widget layout.
    #[must_use]
    pub const fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Replaces the spacing forwarded to the widget layout.
    pub fn set_spacing(&mut self, spacing: Spacing) -> &mut Self {
        self.spacing = spacing;
        self
    }

    /// Sets the minimum spacing between lines.
    pub fn set_minimum_line_spacing(&mut self, spacing: f64) -> &mut Self {
        self.spacing.line = spacing;
        self
    }

    /// Sets the minimum spacing between items of one line.
    pub fn set_minimum_item_spacing(&mut self, spacing: f64) -> &mut Self {
        self.spacing.item = spacing;
        self
    }

    /// Forwards scroll notifications to `observer` for as long as it stays alive.
    pub fn set_scroll_observer<O>(&mut self, observer: &Rc<O>) -> &mut Self
    where
        O: ScrollObserver<W> + 'static,
    {
        let observer: Weak<O> = Rc::downgrade(observer);
        self.scroll_observer = Some(observer as Weak<dyn ScrollObserver<W>>);
        self
    }

    /// Stops forwarding scroll notifications.
    pub fn clear_scroll_observer(&mut self) -> &mut Self {
        self.scroll_observer = None;
        self
    }

    /// Asks the widget to reload everything it shows.
    pub fn reload_data(&self, widget: &mut W) {
        widget.reload_data();
    }

    /// All sections, visible or not, in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Section<W>] {
        &self.sections
    }

    /// The visible sections, in insertion order.
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section<W>> {
        self.sections.iter().filter(|section| section.is_visible())
    }

    /// Number of sections in the chosen coordinate space.
    #[must_use]
    pub fn section_count(&self, include_all: bool) -> usize {
        if include_all {
            self.sections.len()
        } else {
            self.visible_sections().count()
        }
    }

    fn position_of(&self, index: usize, include_all: bool) -> Option<usize> {
        if include_all {
            (index < self.sections.len()).then_some(index)
        } else {
            self.sections
                .iter()
                .enumerate()
                .filter(|(_, section)| section.is_visible())
                .nth(index)
                .map(|(i, _)| i)
        }
    }

    /// Returns the section at `index`, or `None` when out of range.
    #[must_use]
    pub fn get_section(&self, index: usize, include_all: bool) -> Option<&Section<W>> {
        self.position_of(index, include_all).map(|i| &self.sections[i])
    }

    /// Mutable variant of [`Manager::get_section`].
    pub fn get_section_mut(&mut self, index: usize, include_all: bool) -> Option<&mut Section<W>> {
        let i = self.position_of(index, include_all)?;
        Some(&mut self.sections[i])
    }

    /// Returns the section at `index`, or a fresh empty section when out of range.
    #[must_use]
    pub fn section(&self, index: usize, include_all: bool) -> Cow<'_, Section<W>> {
        match self.get_section(index, include_all) {
            Some(section) => Cow::Borrowed(section),
            None => {
                log_debug!(
                    index,
                    len = self.section_count(include_all),
                    include_all,
                    "section index out of range, substituting an empty section"
                );
                Cow::Owned(Section::new())
            }
        }
    }

    /// Returns the row at `path`, or `None` when either index is out of range.
    #[must_use]
    pub fn get_row(&self, path: IndexPath, include_all: bool) -> Option<&Row<W>> {
        self.get_section(path.section, include_all)?.get_row(path.row, include_all)
    }

    /// Mutable variant of [`Manager::get_row`].
    pub fn get_row_mut(&mut self, path: IndexPath, include_all: bool) -> Option<&mut Row<W>> {
        self.get_section_mut(path.section, include_all)?
            .get_row_mut(path.row, include_all)
    }

    /// Returns the row at `path`, or a fresh empty row when out of range.
    ///
    /// The section is resolved first, then the row within it, both in the same
    /// coordinate space.
    #[must_use]
    pub fn row(&self, path: IndexPath, include_all: bool) -> Cow<'_, Row<W>> {
        match self.get_section(path.section, include_all) {
            Some(section) => section.row(path.row, include_all),
            None => {
                log_debug!(%path, include_all, "no section for row lookup, substituting an empty row");
                Cow::Owned(Row::new())
            }
        }
    }

    /// Index of the section with identity `id` in the chosen coordinate space.
    #[must_use]
    pub fn index_of_section(&self, id: SectionId, include_all: bool) -> Option<usize> {
        if include_all {
            self.sections.iter().position(|section| section.id() == id)
        } else {
            self.visible_sections().position(|section| section.id() == id)
        }
    }

    /// Position of the row with identity `id` in the chosen coordinate space.
    ///
    /// A row and its clones share one identity. If clones were added to several
    /// sections, the last section holding one wins.
    #[must_use]
    pub fn index_path_of_row(&self, id: RowId, include_all: bool) -> Option<IndexPath> {
        let locate = |(section_index, section): (usize, &Section<W>)| {
            let row = section.index_of_row(id, include_all)?;
            Some(IndexPath::new(section_index, row))
        };
        if include_all {
            self.sections.iter().enumerate().rev().find_map(locate)
        } else {
            self.visible_sections().enumerate().filter_map(locate).last()
        }
    }

    /// Appends `section` unless one with the same identity is already present.
    ///
    /// Returns the stored section.
    pub fn add_section(&mut self, section: Section<W>) -> &mut Section<W> {
        let i = match self.index_of_section(section.id(), true) {
            Some(i) => i,
            None => {
                self.sections.push(section);
                self.sections.len() - 1
            }
        };
        &mut self.sections[i]
    }

    /// Appends a new empty section and returns it.
    pub fn add_new_section(&mut self) -> &mut Section<W> {
        self.add_section(Section::new())
    }

    /// Returns the section new rows go into, creating it if there are no sections yet.
    ///
    /// That is the first visible section, or the first section overall when every
    /// section is hidden.
    pub fn ensure_section(&mut self) -> &mut Section<W> {
        if self.sections.is_empty() {
            log_debug!("no sections yet, creating the default section");
            self.sections.push(Section::new());
        }
        let i = self.position_of(0, false).unwrap_or(0);
        &mut self.sections[i]
    }

    /// Adds `row` to the first visible section, creating a section if needed.
    pub fn add_row(&mut self, row: Row<W>) -> &mut Row<W> {
        self.ensure_section().add_row(row)
    }

    /// Adds a new empty row to the first visible section and returns it.
    pub fn add_new_row(&mut self) -> &mut Row<W> {
        self.ensure_section().add_new_row()
    }

    /// Adds a new row using the cell registered under `kind` to the first visible section.
    pub fn add_row_with_kind(&mut self, kind: impl Into<String>) -> &mut Row<W> {
        self.ensure_section().add_row_with_kind(kind)
    }

    /// Removes every section.
    pub fn clear_sections(&mut self) {
        self.sections.clear();
    }

    /// Removes every row of the first section. Other sections are left alone.
    pub fn clear_rows(&mut self) {
        if let Some(first) = self.sections.first_mut() {
            first.clear_rows();
        }
    }

    /// Maps a visible-only position to the same row's position among all rows.
    ///
    /// Returns `None` when nothing is rendered at `path`.
    #[must_use]
    pub fn convert_to_include_all_index_path(&self, path: IndexPath) -> Option<IndexPath> {
        let id = self.get_row(path, false)?.id();
        self.index_path_of_row(id, true)
    }
}

impl<W: CollectionWidget> Default for Manager<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: CollectionWidget> fmt::Debug for Manager<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("sections", &self.sections)
            .field("spacing", &self.spacing)
            .field(
                "scroll_observer",
                &self
                    .scroll_observer
                    .as_ref()
                    .is_some_and(|observer| observer.strong_count() > 0),
            )
            .finish()
    }
}

impl<W: CollectionWidget> CollectionDataSource<W> for Manager<W> {
    fn number_of_sections(&self, _widget: &W) -> usize {
        self.section_count(false)
    }

    fn number_of_items(&self, _widget: &W, section: usize) -> usize {
        self.get_section(section, false)
            .map_or(0, |section| section.row_count(false))
    }

    fn cell_for_item(&mut self, widget: &mut W, position: IndexPath) -> W::Cell {
        let Some(row) = self.get_row_mut(position, false) else {
            log_debug!(%position, "cell requested for a missing row, returning a default cell");
            return widget.dequeue_reusable_cell(DEFAULT_CELL_KIND, position);
        };
        let cell = widget.dequeue_reusable_cell(row.cell_kind(), position);
        row.bind(position, cell.clone());
        row.populate(&cell, position);
        cell
    }

    fn section_index_titles(&self, _widget: &W) -> Vec<String> {
        self.visible_sections()
            .filter_map(Section::index_title)
            .map(String::from)
            .collect()
    }
}

impl<W: CollectionWidget> CollectionDelegate<W> for Manager<W> {
    fn minimum_line_spacing(&self, _widget: &W, _section: usize) -> f64 {
        self.spacing.line
    }

    fn minimum_item_spacing(&self, _widget: &W, _section: usize) -> f64 {
        self.spacing.item
    }

    fn did_select_item(&mut self, widget: &mut W, position: IndexPath) {
        if let Some(row) = self.get_row(position, false) {
            row.select(widget, position);
        }
    }

    fn will_display_item(&mut self, widget: &mut W, cell: &W::Cell, position: IndexPath) {
        if let Some(row) = self.get_row_mut(position, false) {
            row.bind(position, cell.clone());
            row.will_appear(widget, cell, position);
        }
    }

    fn size_for_item(&self, _widget: &W, position: IndexPath) -> Size {
        self.row(position, false).size()
    }

    fn can_move_item(&self, _widget: &W, position: IndexPath) -> bool {
        self.get_row(position, false).is_some_and(Row::can_move)
    }

    fn supplementary_height(&self, widget: &W, kind: SupplementaryKind, section: usize) -> f64 {
        self.get_section(section, false)
            .and_then(|s| s.height(kind, widget, section))
            .unwrap_or(0.0)
    }

    fn supplementary_title(
        &self,
        widget: &W,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<String> {
        self.get_section(section, false)?.title(kind, widget, section)
    }

    fn supplementary_view(
        &self,
        widget: &W,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<W::View> {
        self.get_section(section, false)?.view(kind, widget, section)
    }

    fn scroll_event(&self, widget: &W, event: ScrollEvent) {
        if let Some(observer) = self.scroll_observer.as_ref().and_then(Weak::upgrade) {
            observer.scroll_event(widget, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use kurbo::{Point, Size};

    use super::Manager;
    use crate::host::{
        CollectionDataSource, CollectionDelegate, CollectionWidget, ScrollEvent, ScrollObserver,
    };
    use crate::row::Row;
    use crate::section::Section;
    use crate::testing::TestWidget;
    use crate::types::{
        DEFAULT_CELL_HEIGHT, DEFAULT_CELL_KIND, DEFAULT_CELL_WIDTH, IndexPath, RowId, Spacing,
        SupplementaryKind,
    };

    /// Section 0 holds `[A(hidden), B, C]`.
    fn hidden_first() -> (Manager<TestWidget>, [RowId; 3]) {
        let mut manager = Manager::new();
        let a = manager.add_new_row().set_visible(false).id();
        let b = manager.add_row_with_kind("B").id();
        let c = manager.add_row_with_kind("C").id();
        (manager, [a, b, c])
    }

    #[test]
    fn add_row_creates_exactly_one_implicit_section() {
        let mut manager = Manager::<TestWidget>::new();
        assert!(manager.sections().is_empty());

        let id = manager.add_new_row().id();
        assert_eq!(manager.sections().len(), 1);
        assert_eq!(manager.index_path_of_row(id, true), Some(IndexPath::new(0, 0)));

        manager.add_new_row();
        assert_eq!(manager.sections().len(), 1);
        assert_eq!(manager.sections()[0].rows().len(), 2);
    }

    #[test]
    fn add_row_skips_hidden_leading_sections() {
        let mut manager = Manager::<TestWidget>::new();
        let widget = TestWidget::default();
        manager.add_new_section().set_visible(false);
        let shown = manager.add_new_section().id();

        let id = manager.add_new_row().id();
        assert_eq!(manager.index_path_of_row(id, false), Some(IndexPath::new(0, 0)));
        assert_eq!(manager.index_path_of_row(id, true), Some(IndexPath::new(1, 0)));
        assert_eq!(manager.number_of_items(&widget, 0), 1);
        assert_eq!(manager.ensure_section().id(), shown);
    }

    #[test]
    fn add_row_falls_back_to_first_section_when_all_hidden() {
        let mut manager = Manager::<TestWidget>::new();
        manager.add_new_section().set_visible(false);
        manager.add_new_section().set_visible(false);

        let id = manager.add_new_row().id();
        assert_eq!(manager.index_path_of_row(id, true), Some(IndexPath::new(0, 0)));
        assert_eq!(manager.index_path_of_row(id, false), None);
        assert_eq!(manager.sections().len(), 2);
    }

    #[test]
    fn index_path_prefers_last_section_holding_a_shared_identity() {
        let mut manager = Manager::<TestWidget>::new();
        let row = Row::new();
        let id = row.id();
        manager.add_new_section().add_row(row.clone());
        manager.add_new_section().add_row(row);

        assert_eq!(manager.index_path_of_row(id, true), Some(IndexPath::new(1, 0)));
        assert_eq!(manager.index_path_of_row(id, false), Some(IndexPath::new(1, 0)));
    }

    #[test]
    fn add_section_is_idempotent_by_identity() {
        let mut manager = Manager::<TestWidget>::new();
        let section = Section::new();
        let id = section.id();
        manager.add_section(section.clone());
        manager.add_new_section();
        manager.add_section(section);
        assert_eq!(manager.sections().len(), 2);
        assert_eq!(manager.index_of_section(id, true), Some(0));
    }

    #[test]
    fn index_path_is_none_after_clear_rows() {
        let mut manager = Manager::<TestWidget>::new();
        let row = Row::new();
        let id = row.id();
        manager.add_row(row);
        assert_eq!(manager.index_path_of_row(id, true), Some(IndexPath::new(0, 0)));

        manager.clear_rows();
        assert_eq!(manager.index_path_of_row(id, true), None);
        assert_eq!(manager.sections().len(), 1);
    }

    #[test]
    fn clear_rows_only_touches_the_first_section() {
        let mut manager = Manager::<TestWidget>::new();
        manager.add_new_row();
        let kept = manager.add_new_section().add_new_row().id();

        manager.clear_rows();
        assert!(manager.sections()[0].rows().is_empty());
        assert_eq!(manager.index_path_of_row(kept, true), Some(IndexPath::new(1, 0)));

        manager.clear_sections();
        assert!(manager.sections().is_empty());
        // No sections: a no-op.
        manager.clear_rows();
        assert!(manager.sections().is_empty());
    }

    #[test]
    fn convert_visible_position_to_all_items_position() {
        let (manager, [a, b, _]) = hidden_first();
        assert_eq!(manager.index_path_of_row(b, false), Some(IndexPath::new(0, 0)));
        assert_eq!(manager.index_path_of_row(a, false), None);
        assert_eq!(
            manager.convert_to_include_all_index_path(IndexPath::new(0, 0)),
            Some(IndexPath::new(0, 1))
        );
        assert_eq!(
            manager.convert_to_include_all_index_path(IndexPath::new(0, 1)),
            Some(IndexPath::new(0, 2))
        );
        assert_eq!(manager.convert_to_include_all_index_path(IndexPath::new(0, 2)), None);
    }

    #[test]
    fn hidden_sections_shift_visible_coordinates() {
        let mut manager = Manager::<TestWidget>::new();
        manager.add_new_section().set_visible(false).add_new_row();
        let shown = manager.add_new_section().add_new_row().id();

        assert_eq!(manager.section_count(false), 1);
        assert_eq!(manager.row(IndexPath::new(0, 0), false).id(), shown);
        assert_eq!(manager.index_path_of_row(shown, false), Some(IndexPath::new(0, 0)));
        assert_eq!(manager.index_path_of_row(shown, true), Some(IndexPath::new(1, 0)));
    }

    #[test]
    fn out_of_range_lookups_return_placeholders() {
        let (manager, ids) = hidden_first();
        let row = manager.row(IndexPath::new(0, 2), false);
        assert!(!ids.contains(&row.id()));
        assert!(manager.index_path_of_row(row.id(), true).is_none());

        let row = manager.row(IndexPath::new(4, 0), true);
        assert!(!ids.contains(&row.id()));

        let section = manager.section(1, true);
        assert!(manager.index_of_section(section.id(), true).is_none());
        assert!(section.rows().is_empty());
    }

    #[test]
    fn counts_follow_visibility() {
        let (mut manager, _) = hidden_first();
        let widget = TestWidget::default();
        manager.add_new_section().set_visible(false).add_new_row();

        assert_eq!(manager.number_of_sections(&widget), 1);
        assert_eq!(manager.number_of_items(&widget, 0), 2);
        assert_eq!(manager.number_of_items(&widget, 1), 0);
    }

    #[test]
    fn cell_for_item_binds_and_populates() {
        let (mut manager, [_, b, _]) = hidden_first();
        let mut widget = TestWidget::with_content_size(Size::new(80.0, 33.0));
        let populated = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&populated);
        if let Some(row) = manager.get_row_mut(IndexPath::new(0, 0), false) {
            row.set_populate(move |row, _, position| log.borrow_mut().push((row.id(), position)));
        }

        manager.cell_for_item(&mut widget, IndexPath::new(0, 0));
        assert_eq!(widget.dequeued, [(String::from("B"), IndexPath::new(0, 0))]);
        assert_eq!(*populated.borrow(), [(b, IndexPath::new(0, 0))]);

        let row = manager.row(IndexPath::new(0, 0), false);
        assert_eq!(row.bound_position(), Some(IndexPath::new(0, 0)));
        assert!(row.cell().is_some());
        // No explicit extent: the bound cell's content decides.
        assert_eq!(manager.size_for_item(&widget, IndexPath::new(0, 0)), Size::new(80.0, 33.0));
    }

    #[test]
    fn cell_for_missing_row_uses_default_kind() {
        let mut manager = Manager::<TestWidget>::new();
        let mut widget = TestWidget::default();
        manager.cell_for_item(&mut widget, IndexPath::new(3, 3));
        assert_eq!(
            widget.dequeued,
            [(String::from(DEFAULT_CELL_KIND), IndexPath::new(3, 3))]
        );
        assert!(manager.sections().is_empty());
    }

    #[test]
    fn selection_runs_callback_once_and_ignores_unset() {
        let (mut manager, _) = hidden_first();
        let mut widget = TestWidget::default();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        manager.add_new_row().set_on_select(move |_, widget, position| {
            assert_eq!(position, IndexPath::new(0, 2));
            widget.reload_data();
            seen.set(seen.get() + 1);
        });

        manager.did_select_item(&mut widget, IndexPath::new(0, 0));
        manager.did_select_item(&mut widget, IndexPath::new(9, 9));
        assert_eq!(hits.get(), 0);

        manager.did_select_item(&mut widget, IndexPath::new(0, 2));
        assert_eq!(hits.get(), 1);
        assert_eq!(widget.reloads, 1);
    }

    #[test]
    fn will_display_binds_and_notifies() {
        let mut manager = Manager::<TestWidget>::new();
        let mut widget = TestWidget::with_content_size(Size::new(5.0, 6.0));
        let appeared = Rc::new(Cell::new(false));
        let flag = Rc::clone(&appeared);
        manager
            .add_new_row()
            .set_will_appear(move |_, _, _, _| flag.set(true));

        let position = IndexPath::new(0, 0);
        let cell = widget.dequeue_reusable_cell("Any", position);
        manager.will_display_item(&mut widget, &cell, position);
        assert!(appeared.get());
        assert_eq!(manager.row(position, false).bound_position(), Some(position));
    }

    #[test]
    fn size_for_item_uses_row_sizing() {
        let mut manager = Manager::<TestWidget>::new();
        let widget = TestWidget::default();
        manager.add_new_row().set_width(120.0).set_height(40.0);
        manager.add_new_row();

        assert_eq!(manager.size_for_item(&widget, IndexPath::new(0, 0)), Size::new(120.0, 40.0));
        assert_eq!(
            manager.size_for_item(&widget, IndexPath::new(0, 1)),
            Size::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
        );
    }

    #[test]
    fn spacing_is_uniform_across_sections() {
        let mut manager = Manager::<TestWidget>::with_spacing(Spacing { line: 4.0, item: 2.0 });
        let widget = TestWidget::default();
        assert_eq!(manager.minimum_line_spacing(&widget, 0), 4.0);
        assert_eq!(manager.minimum_item_spacing(&widget, 7), 2.0);

        manager.set_minimum_line_spacing(10.0).set_minimum_item_spacing(1.0);
        assert_eq!(manager.minimum_line_spacing(&widget, 3), 10.0);
        assert_eq!(manager.spacing(), Spacing { line: 10.0, item: 1.0 });
    }

    #[test]
    fn supplementary_queries_use_visible_sections() {
        let mut manager = Manager::<TestWidget>::new();
        let widget = TestWidget::default();
        manager.add_new_section().set_visible(false);
        manager
            .add_new_section()
            .set_title(SupplementaryKind::Header, "Shown")
            .set_height(SupplementaryKind::Header, 24.0)
            .set_view(SupplementaryKind::Footer, "footer")
            .set_index_title("S");

        assert_eq!(
            manager.supplementary_title(&widget, SupplementaryKind::Header, 0).as_deref(),
            Some("Shown")
        );
        assert_eq!(manager.supplementary_height(&widget, SupplementaryKind::Header, 0), 24.0);
        assert_eq!(manager.supplementary_height(&widget, SupplementaryKind::Footer, 0), 0.0);
        assert_eq!(
            manager.supplementary_view(&widget, SupplementaryKind::Footer, 0),
            Some("footer")
        );
        assert_eq!(manager.supplementary_title(&widget, SupplementaryKind::Header, 1), None);
        assert_eq!(manager.section_index_titles(&widget), [String::from("S")]);
    }

    #[test]
    fn can_move_reflects_row_flag() {
        let mut manager = Manager::<TestWidget>::new();
        let widget = TestWidget::default();
        manager.add_new_row().set_can_move(true);
        manager.add_new_row();
        assert!(manager.can_move_item(&widget, IndexPath::new(0, 0)));
        assert!(!manager.can_move_item(&widget, IndexPath::new(0, 1)));
        assert!(!manager.can_move_item(&widget, IndexPath::new(1, 0)));
    }

    struct Recorder(RefCell<Vec<ScrollEvent>>);

    impl ScrollObserver<TestWidget> for Recorder {
        fn scroll_event(&self, _widget: &TestWidget, event: ScrollEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    #[test]
    fn scroll_events_reach_a_live_observer_only() {
        let mut manager = Manager::<TestWidget>::new();
        let widget = TestWidget::default();
        let recorder = Rc::new(Recorder(RefCell::new(Vec::new())));
        manager.set_scroll_observer(&recorder);

        let scrolled = ScrollEvent::DidScroll {
            offset: Point::new(0.0, 12.0),
        };
        manager.scroll_event(&widget, scrolled);
        manager.scroll_event(&widget, ScrollEvent::DidEndDecelerating);
        assert_eq!(
            *recorder.0.borrow(),
            [scrolled, ScrollEvent::DidEndDecelerating]
        );

        // The manager holds the observer weakly.
        drop(recorder);
        manager.scroll_event(&widget, ScrollEvent::WillBeginDragging);
    }

    #[test]
    fn reload_goes_to_the_widget() {
        let manager = Manager::<TestWidget>::new();
        let mut widget = TestWidget::default();
        manager.reload_data(&mut widget);
        assert_eq!(widget.reloads, 1);
    }
}
