//! Data grid: a plain spreadsheet look with a cell-level cursor, a filter
//! row that can be shown and hidden, and a clear-all action. The grid has no
//! sort state at all; rows always keep fetch order.
//!
//! Hiding the filter row only hides the inputs. Committed values keep
//! filtering until cleared.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, TableState};

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
pub struct GridView {
    pub filters: FilterSet,
    pub cursor: Cursor,
    pub rows: Vec<usize>,
    table: TableState,
}

impl GridView {
    pub fn columns(&self) -> &'static [ColumnKey] {
        &COLUMNS
    }

    pub fn current_column(&self) -> ColumnKey {
        COLUMNS[self.cursor.col]
    }

    pub fn refresh(&mut self, people: &[Person]) {
        self.rows = query::visible_rows(people, &self.filters, &SortSpec::default());
        self.cursor.clamp_row(self.rows.len());
    }

    pub fn reset(&mut self, people: &[Person]) {
        *self = Self::default();
        self.refresh(people);
    }

    pub fn set_filter(&mut self, column: ColumnKey, value: String, people: &[Person]) {
        self.filters.set(column, value);
        self.refresh(people);
    }

    /// Show or hide the filter inputs. Committed values stay in effect.
    pub fn toggle_filter_row(&mut self) {
        self.filters.enabled = !self.filters.enabled;
    }

    /// Drop every committed filter value.
    pub fn clear_filters(&mut self, people: &[Person]) {
        self.filters.clear_values();
        self.refresh(people);
    }

    pub fn render(
        &mut self,
        people: &[Person],
        edit: Option<FilterEditView>,
        frame: &mut Frame,
        area: Rect,
    ) {
        let [toolbar_area, table_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let mut toolbar = vec![
            Span::raw(if self.filters.enabled {
                " [f] hide filters"
            } else {
                " [f] show filters"
            }),
            Span::raw("   [C] clear filters"),
        ];
        let active = self.filters.active().count();
        if active > 0 {
            toolbar.push(Span::styled(
                format!("   {active} filter(s) active"),
                Style::new().yellow(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(toolbar)), toolbar_area);

        // The header grows a second line while the filter inputs are shown.
        let header_cells = COLUMNS.iter().enumerate().map(|(idx, &column)| {
            let style = if idx == self.cursor.col {
                Style::new().bold().underlined()
            } else {
                Style::new().bold()
            };
            let title = Line::from(Span::styled(column.header(), style));
            if !self.filters.enabled {
                return Cell::from(title);
            }
            let editing = edit
                .filter(|e| e.column == column)
                .map(|e| (e.text, e.cursor_pos));
            let value = filter_line(self.filters.get(column), String::new(), editing);
            Cell::from(Text::from(vec![title, value]))
        });
        let header_height = if self.filters.enabled { 2 } else { 1 };
        let header = Row::new(header_cells).height(header_height);

        let body = self.rows.iter().map(|&idx| {
            let person = &people[idx];
            Row::new(
                COLUMNS
                    .iter()
                    .map(|&column| Cell::from(query::cell_text(person, column))),
            )
        });

        let widths = [Constraint::Percentage(25); 4];
        let table = Table::new(body, widths)
            .header(header)
            .block(Block::bordered())
            .column_spacing(1)
            .cell_highlight_style(Style::new().reversed());

        self.table.select((!self.rows.is_empty()).then_some(self.cursor.row));
        self.table.select_column(Some(self.cursor.col));
        frame.render_stateful_widget(table, table_area, &mut self.table);
    }
}
