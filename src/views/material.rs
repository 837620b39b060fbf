//! Material table: zebra striping, a single sortable column at a time, and
//! row selection with a running count in the footer. The name column keeps
//! its green accent.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, TableState};

use crate::people::Person;
use crate::query::{self, ColumnKey, FilterSet, SortSpec};
use crate::views::{Cursor, FilterEditView, filter_line};

pub const COLUMNS: [ColumnKey; 4] = [
    ColumnKey::Name,
    ColumnKey::Email,
    ColumnKey::Gender,
    ColumnKey::Phone,
];

#[derive(Debug, Default)]
pub struct MaterialView {
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub cursor: Cursor,
    pub rows: Vec<usize>,
    /// Selected records by index into the record set, not by row position, so
    /// a selection survives refiltering and resorting.
    pub selected: BTreeSet<usize>,
    table: TableState,
}

impl MaterialView {
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

    /// Single active sort: cycling a column replaces whatever sorted before.
    pub fn toggle_sort(&mut self, people: &[Person]) {
        self.sort.toggle(self.current_column());
        self.refresh(people);
    }

    pub fn set_filter(&mut self, column: ColumnKey, value: String, people: &[Person]) {
        self.filters.set(column, value);
        self.refresh(people);
    }

    /// Select or deselect the record under the cursor.
    pub fn toggle_select(&mut self) {
        let Some(&record) = self.rows.get(self.cursor.row) else {
            return;
        };
        if !self.selected.remove(&record) {
            self.selected.insert(record);
        }
    }

    pub fn selection_summary(&self, total: usize) -> String {
        format!("{} of {} row(s) selected", self.selected.len(), total)
    }

    fn header_title(&self, column: ColumnKey, selected: bool) -> Line<'static> {
        let mut style = if column == ColumnKey::Name {
            Style::new().green().bold()
        } else {
            Style::new().bold()
        };
        if selected {
            style = style.underlined();
        }
        let mut line = Line::from(Span::styled(column.header(), style));
        if let Some(direction) = self.sort.direction_of(column) {
            line.push_span(Span::styled(
                format!(" {}", direction.marker()),
                Style::new().cyan(),
            ));
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
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        // Titles are built first so the cell closure borrows `filters` only,
        // not the whole view alongside the mutable table state.
        let titles: Vec<Line> = COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, &column)| self.header_title(column, idx == self.cursor.col))
            .collect();
        let mut header_cells = vec![Cell::from("")];
        header_cells.extend(titles.into_iter().zip(COLUMNS).map(|(title, column)| {
            let editing = edit
                .filter(|e| e.column == column)
                .map(|e| (e.text, e.cursor_pos));
            let placeholder = format!("Filter by {}", column.header());
            let value = filter_line(self.filters.get(column), placeholder, editing);
            Cell::from(Text::from(vec![title, value]))
        }));
        let header = Row::new(header_cells).height(2);

        let body = self.rows.iter().enumerate().map(|(visible_idx, &idx)| {
            let person = &people[idx];
            let mark = if self.selected.contains(&idx) {
                "[x]"
            } else {
                "[ ]"
            };
            let mut cells = vec![Cell::from(mark)];
            cells.extend(
                COLUMNS
                    .iter()
                    .map(|&column| Cell::from(query::cell_text(person, column))),
            );
            let row = Row::new(cells);
            if visible_idx % 2 == 1 {
                row.style(Style::new().add_modifier(Modifier::DIM))
            } else {
                row
            }
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Min(24),
            Constraint::Length(8),
            Constraint::Length(16),
        ];
        let table = Table::new(body, widths)
            .header(header)
            .block(Block::bordered())
            .column_spacing(2)
            .row_highlight_style(Style::new().reversed());

        self.table.select((!self.rows.is_empty()).then_some(self.cursor.row));
        frame.render_stateful_widget(table, table_area, &mut self.table);

        let footer = Line::from(self.selection_summary(people.len())).right_aligned();
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}
