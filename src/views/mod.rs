//! The three table views.
//!
//! Each view owns presentation state only: filters, sort where the view has
//! one, cursor and the cached row indices. The records live in the model and
//! are resolved to rows through [`crate::query::visible_rows`]. Switching
//! views tears the departed view down, so every view starts from defaults
//! when entered.

mod grid;
mod material;
mod stack;

pub use grid::GridView;
pub use material::MaterialView;
pub use stack::StackView;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::query::ColumnKey;

/// Row/column cursor with clamped movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn up(&mut self, step: usize) {
        self.row = self.row.saturating_sub(step);
    }

    pub fn down(&mut self, step: usize, rows: usize) {
        self.row = (self.row + step).min(rows.saturating_sub(1));
    }

    pub fn left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn right(&mut self, cols: usize) {
        self.col = (self.col + 1).min(cols.saturating_sub(1));
    }

    pub fn first_row(&mut self) {
        self.row = 0;
    }

    pub fn last_row(&mut self, rows: usize) {
        self.row = rows.saturating_sub(1);
    }

    /// Keep the cursor inside a shrunken row set.
    pub fn clamp_row(&mut self, rows: usize) {
        self.row = self.row.min(rows.saturating_sub(1));
    }
}

/// Filter text being edited in the active view, rendered inside the owning
/// column's header cell.
#[derive(Debug, Clone, Copy)]
pub struct FilterEditView<'a> {
    pub column: ColumnKey,
    pub text: &'a str,
    pub cursor_pos: usize,
}

/// Second header line of a column: the in-progress edit with a caret, the
/// committed value, or a dimmed placeholder.
pub(crate) fn filter_line<'a>(
    committed: &'a str,
    placeholder: String,
    edit: Option<(&'a str, usize)>,
) -> Line<'a> {
    match edit {
        Some((text, cursor)) => caret_line(text, cursor),
        None if committed.is_empty() => Line::from(Span::styled(
            placeholder,
            Style::new().add_modifier(Modifier::DIM),
        )),
        None => Line::from(committed),
    }
}

fn caret_line(text: &str, cursor: usize) -> Line<'_> {
    let byte = text
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let (before, rest) = text.split_at(byte);
    let mut chars = rest.chars();
    let under = chars.next();
    let after = chars.as_str();
    let caret = Span::styled(
        under.map(String::from).unwrap_or_else(|| " ".to_string()),
        Style::new().add_modifier(Modifier::REVERSED),
    );
    Line::from(vec![Span::raw(before), caret, Span::raw(after)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_clamps_to_the_last_row() {
        let mut cursor = Cursor::default();
        cursor.down(100, 3);
        assert_eq!(cursor.row, 2);
    }

    #[test]
    fn movement_on_an_empty_table_stays_at_zero() {
        let mut cursor = Cursor::default();
        cursor.down(1, 0);
        cursor.right(0);
        assert_eq!(cursor, Cursor { row: 0, col: 0 });
    }

    #[test]
    fn clamp_pulls_the_cursor_into_range() {
        let mut cursor = Cursor { row: 9, col: 1 };
        cursor.clamp_row(4);
        assert_eq!(cursor.row, 3);
    }

    #[test]
    fn filter_cell_prefers_the_edit_over_the_committed_value() {
        let line = filter_line("old", "Search...".to_string(), Some(("new", 3)));
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "new ");
    }

    #[test]
    fn filter_cell_falls_back_to_the_placeholder() {
        let line = filter_line("", "Search... (5)".to_string(), None);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "Search... (5)");
    }

    #[test]
    fn caret_splits_multibyte_text_on_char_boundaries() {
        let line = caret_line("åb", 1);
        let parts: Vec<_> = line
            .spans
            .iter()
            .map(|span| span.content.as_ref().to_string())
            .collect();
        assert_eq!(parts, vec!["å", "b", ""]);
    }
}
