use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use crate::domain::{AppConfig, AppError, Message, ViewKind};
use crate::model::Model;

/// Polls the terminal and maps key presses to [`Message`]s. While the model
/// reports an open filter edit, keys pass through unmapped so the line editor
/// sees them; only Ctrl-C keeps its meaning.
pub struct Controller {
    event_poll_time: Duration,
}

impl Controller {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            event_poll_time: config.event_poll,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, AppError> {
        if event::poll(self.event_poll_time)?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key, model.raw_keyevents()));
        }
        Ok(None)
    }

    fn handle_key(&self, key: KeyEvent, raw: bool) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }
        if raw {
            return Some(Message::RawKey(key));
        }
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Esc => Some(Message::Exit),
            KeyCode::Char('?') => Some(Message::Help),
            KeyCode::Char('1') => Some(Message::SwitchView(ViewKind::Stack)),
            KeyCode::Char('2') => Some(Message::SwitchView(ViewKind::Material)),
            KeyCode::Char('3') => Some(Message::SwitchView(ViewKind::Grid)),
            KeyCode::Tab => Some(Message::NextView),
            KeyCode::BackTab => Some(Message::PreviousView),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::PageUp => Some(Message::MovePageUp),
            KeyCode::PageDown => Some(Message::MovePageDown),
            KeyCode::Char('g') => Some(Message::MoveBeginning),
            KeyCode::Char('G') => Some(Message::MoveEnd),
            KeyCode::Char('s') => Some(Message::ToggleSort),
            KeyCode::Char('S') => Some(Message::ExtendSort),
            KeyCode::Char('/') => Some(Message::EditFilter),
            KeyCode::Char('f') => Some(Message::ToggleFilterRow),
            KeyCode::Char('C') => Some(Message::ClearFilters),
            KeyCode::Char(' ') => Some(Message::ToggleSelect),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}
