use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::domain::{HELP_TEXT, ViewKind};
use crate::model::Model;
use crate::views::FilterEditView;

/// Render the whole screen: tab strip, the active view, status line, and the
/// help popup on top when it is open.
pub fn draw(model: &mut Model, frame: &mut Frame) {
    let [tabs_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(model, frame, tabs_area);
    draw_body(model, frame, body_area);
    draw_status(model, frame, status_area);
    if model.help_visible() {
        draw_help(frame);
    }
}

fn draw_tabs(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = vec![" triview ".bold()];
    for (idx, kind) in ViewKind::ALL.into_iter().enumerate() {
        let tab = format!(" {} {} ", idx + 1, kind.label());
        spans.push(if kind == model.active() {
            tab.reversed()
        } else {
            tab.dim()
        });
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Line::from(spans), area);
}

fn draw_body(model: &mut Model, frame: &mut Frame, area: Rect) {
    // The views borrow the record set and the edit state next to their own
    // mutable table state, so split the model up front.
    let Model {
        stack,
        material,
        grid,
        people,
        edit,
        active,
        ..
    } = model;
    let edit_view = edit.as_ref().and_then(|e| {
        (e.view == *active).then_some(FilterEditView {
            column: e.column,
            text: e.last_input.input.as_str(),
            cursor_pos: e.last_input.cursor_pos,
        })
    });
    match active {
        ViewKind::Stack => stack.render(people, edit_view, frame, area),
        ViewKind::Material => material.render(people, edit_view, frame, area),
        ViewKind::Grid => grid.render(people, edit_view, frame, area),
    }
}

fn draw_status(model: &Model, frame: &mut Frame, area: Rect) {
    let [message_area, keys_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(area);
    let message = if let Some(edit) = model.filter_edit() {
        Line::from(vec![
            Span::raw(format!(" {} filter: ", edit.column.header())),
            Span::raw(edit.last_input.input.as_str()),
            " (Enter applies now, Esc discards)".dim(),
        ])
    } else {
        Line::from(format!(" {}", model.status_message()))
    };
    frame.render_widget(message, message_area);
    frame.render_widget(
        Line::from(" ? help   q quit ".dim()).right_aligned(),
        keys_area,
    );
}

fn draw_help(frame: &mut Frame) {
    let width = HELP_TEXT.lines().map(str::len).max().unwrap_or(0) as u16 + 2;
    let height = HELP_TEXT.lines().count() as u16 + 2;
    let area = popup_area(frame.area(), width, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .block(Block::bordered().title(" Help ".bold()))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
