// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording widget shared by the unit tests.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::Size;

use crate::host::{CellHandle, CollectionWidget};
use crate::types::IndexPath;

/// Weak handle into [`TestWidget`]'s cell pool.
#[derive(Clone, Debug)]
pub(crate) struct TestCell {
    slot: Weak<Cell<Option<Size>>>,
}

impl CellHandle for TestCell {
    fn content_size(&self) -> Option<Size> {
        self.slot.upgrade().and_then(|slot| slot.get())
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestWidget {
    /// Every `(kind, position)` passed to `dequeue_reusable_cell`.
    pub(crate) dequeued: Vec<(String, IndexPath)>,
    pub(crate) reloads: usize,
    content_size: Option<Size>,
    pool: Vec<Rc<Cell<Option<Size>>>>,
}

impl TestWidget {
    pub(crate) fn with_content_size(size: Size) -> Self {
        Self {
            content_size: Some(size),
            ..Self::default()
        }
    }

    /// Drops every pooled cell, invalidating outstanding handles.
    pub(crate) fn release_cells(&mut self) {
        self.pool.clear();
    }
}

impl CollectionWidget for TestWidget {
    type Cell = TestCell;
    type View = &'static str;

    fn dequeue_reusable_cell(&mut self, kind: &str, position: IndexPath) -> TestCell {
        self.dequeued.push((String::from(kind), position));
        let slot = Rc::new(Cell::new(self.content_size));
        let cell = TestCell {
            slot: Rc::downgrade(&slot),
        };
        self.pool.push(slot);
        cell
    }

    fn reload_data(&mut self) {
        self.reloads += 1;
    }
}
