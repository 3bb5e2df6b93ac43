//! Selection Cursor for Tabfinder.
//!
//! Keyboard highlight over the flattened list of rows currently displayed.
//! Pointer hover and keyboard highlight are exclusive: the session clears the
//! cursor on any pointer movement.

use crate::services::projection::DisplayRow;
use crate::types::errors::SelectionError;
use crate::types::tab::{TabId, WindowId};

/// Trait defining cursor movement over `row_count` displayed rows.
pub trait SelectionCursorTrait {
    fn next(&mut self, row_count: usize);
    fn previous(&mut self, row_count: usize);
    fn clear(&mut self);
    fn activate(&self, rows: &[DisplayRow]) -> Result<(TabId, WindowId), SelectionError>;
    fn highlighted(&self) -> Option<usize>;
}

/// Highlighted row index; `None` is the cleared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    highlighted: Option<usize>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index as the view expects it, with -1 for no highlight.
    pub fn highlighted_index(&self) -> i64 {
        self.highlighted.map_or(-1, |i| i as i64)
    }

    /// Pulls the highlight back inside `row_count` rows after the list shrank.
    pub fn clamp(&mut self, row_count: usize) {
        self.highlighted = match (self.highlighted, row_count) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => None,
        };
    }
}

impl SelectionCursorTrait for SelectionCursor {
    /// Moves down one row, stopping on the last row. No wraparound.
    fn next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let last = row_count - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Moves up one row, stopping on the first row.
    fn previous(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => i.saturating_sub(1).min(row_count - 1),
        });
    }

    fn clear(&mut self) {
        self.highlighted = None;
    }

    fn activate(&self, rows: &[DisplayRow]) -> Result<(TabId, WindowId), SelectionError> {
        let index = self.highlighted.ok_or(SelectionError::NoSelection)?;
        rows.get(index)
            .map(|row| (row.tab_id, row.window_id))
            .ok_or(SelectionError::NoSelection)
    }

    fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }
}
