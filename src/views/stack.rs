//! Stack table: every column sorts and filters. The filter row is always
//! visible and its placeholders show how many distinct values a column
//! holds; several columns can sort at once, with priority markers.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Cell, Row, Table, TableState};

use crate::people::Person;
use crate::query::{self, ColumnKey, FilterSet, SortSpec};
use crate::views::{Cursor, FilterEditView, filter_line};

pub const COLUMNS: [ColumnKey; 4] = [
    ColumnKey::Name,
    ColumnKey::Gender,
    ColumnKey::Email,
    ColumnKey::Phone,
];

#[derive(Debug, Default)]
pub struct StackView {
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub cursor: Cursor,
    pub rows: Vec<usize>,
    table: TableState,
}

impl StackView {
    pub fn columns(&self) -> &'static [ColumnKey] {
        &COLUMNS
    }

    pub fn current_column(&self) -> ColumnKey {
        COLUMNS[self.cursor.col]
    }

    pub fn refresh(&mut self, people: &[Person]) {
        self.rows = query::visible_rows(people, &self.filters, &self.sort);
        self.cursor.clamp_row(self.rows.len());
    }

    pub fn reset(&mut self, people: &[Person]) {
        *self = Self::default();
        self.refresh(people);
    }

    /// Cycle the cursor column through ascending, descending, unsorted,
    /// dropping any other column's sort.
    pub fn toggle_sort(&mut self, people: &[Person]) {
        self.sort.toggle(self.current_column());
        self.refresh(people);
    }

    /// Add the cursor column to the sort keys (or cycle it in place) without
    /// dropping the existing keys.
    pub fn extend_sort(&mut self, people: &[Person]) {
        self.sort.toggle_additional(self.current_column());
        self.refresh(people);
    }

    pub fn set_filter(&mut self, column: ColumnKey, value: String, people: &[Person]) {
        self.filters.set(column, value);
        self.refresh(people);
    }

    fn header_title(&self, column: ColumnKey, selected: bool) -> Line<'static> {
        let style = if selected {
            Style::new().bold().underlined()
        } else {
            Style::new().bold()
        };
        let mut line = Line::from(Span::styled(column.header(), style));
        if let Some(direction) = self.sort.direction_of(column) {
            let marker = match self.sort.priority_of(column) {
                Some(priority) if self.sort.keys().len() > 1 => {
                    format!(" {}{priority}", direction.marker())
                }
                _ => format!(" {}", direction.marker()),
            };
            line.push_span(Span::styled(marker, Style::new().cyan()));
        }
        line
    }

    pub fn render(
        &mut self,
        people: &[Person],
        edit: Option<FilterEditView>,
        frame: &mut Frame,
        area: Rect,
    ) {
        // Titles are built first so the cell closure borrows `filters` only,
        // not the whole view alongside the mutable table state.
        let titles: Vec<Line> = COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, &column)| self.header_title(column, idx == self.cursor.col))
            .collect();
        let header_cells = titles.into_iter().zip(COLUMNS).map(|(title, column)| {
            let editing = edit
                .filter(|e| e.column == column)
                .map(|e| (e.text, e.cursor_pos));
            let placeholder = format!("Search... ({})", query::unique_count(people, column));
            let value = filter_line(self.filters.get(column), placeholder, editing);
            Cell::from(Text::from(vec![title, value]))
        });
        let header = Row::new(header_cells).height(2);

        let body = self.rows.iter().map(|&idx| {
            let person = &people[idx];
            Row::new(
                COLUMNS
                    .iter()
                    .map(|&column| Cell::from(query::cell_text(person, column))),
            )
        });

        let widths = [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Min(24),
            Constraint::Length(16),
        ];
        let table = Table::new(body, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(Style::new().reversed());

        self.table.select((!self.rows.is_empty()).then_some(self.cursor.row));
        frame.render_stateful_widget(table, area, &mut self.table);
    }
}
