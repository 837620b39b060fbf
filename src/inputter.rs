use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Minimal line editor fed with raw key events while a filter value is
/// edited. The cursor counts characters, not bytes; [`InputResult`] carries a
/// snapshot for rendering plus the termination flags.
#[derive(Debug, Default)]
pub struct Inputter {
    current_input: String,
    cursor_pos: usize,
    finished: bool,
    canceled: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
    pub cursor_pos: usize,
}

impl Inputter {
    /// Start a session over `initial`, cursor at the end.
    pub fn seed(&mut self, initial: &str) {
        self.current_input = initial.to_string();
        self.cursor_pos = self.current_input.chars().count();
        self.finished = false;
        self.canceled = false;
    }

    pub fn read(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => self.enter(),
            (KeyCode::Esc, KeyModifiers::NONE) => self.escape(),
            (KeyCode::Backspace, KeyModifiers::NONE) => self.backspace(),
            (KeyCode::Delete, KeyModifiers::NONE) => self.delete(),
            (KeyCode::Left, KeyModifiers::NONE) => self.left(),
            (KeyCode::Right, KeyModifiers::NONE) => self.right(),
            (KeyCode::Home, KeyModifiers::NONE) => self.home(),
            (KeyCode::End, KeyModifiers::NONE) => self.end(),
            (kc, km) => self.key(kc, km),
        }
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            input: self.current_input.clone(),
            finished: self.finished,
            canceled: self.canceled,
            cursor_pos: self.cursor_pos,
        }
    }

    pub fn clear(&mut self) {
        self.current_input.clear();
        self.cursor_pos = 0;
        self.finished = false;
        self.canceled = false;
    }

    fn enter(&mut self) -> InputResult {
        self.finished = true;
        self.get()
    }

    fn escape(&mut self) -> InputResult {
        self.canceled = true;
        self.finished = true;
        self.get()
    }

    fn backspace(&mut self) -> InputResult {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_pos();
            self.current_input.remove(at);
        }
        self.get()
    }

    fn delete(&mut self) -> InputResult {
        if self.cursor_pos < self.current_input.chars().count() {
            let at = self.byte_pos();
            self.current_input.remove(at);
        }
        self.get()
    }

    fn left(&mut self) -> InputResult {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
        self.get()
    }

    fn right(&mut self) -> InputResult {
        if self.cursor_pos < self.current_input.chars().count() {
            self.cursor_pos += 1;
        }
        self.get()
    }

    fn home(&mut self) -> InputResult {
        self.cursor_pos = 0;
        self.get()
    }

    fn end(&mut self) -> InputResult {
        self.cursor_pos = self.current_input.chars().count();
        self.get()
    }

    fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputResult {
        // Ctrl/Alt chords are commands, not text.
        if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && let Some(chr) = code.as_char()
        {
            let at = self.byte_pos();
            self.current_input.insert(at, chr);
            self.cursor_pos += 1;
        }
        self.get()
    }

    fn byte_pos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(inputter: &mut Inputter, code: KeyCode) -> InputResult {
        inputter.read(KeyEvent::from(code))
    }

    fn type_text(inputter: &mut Inputter, text: &str) {
        for chr in text.chars() {
            press(inputter, KeyCode::Char(chr));
        }
    }

    #[test]
    fn typing_appends_at_the_cursor() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "ab");
        press(&mut inputter, KeyCode::Left);
        let result = press(&mut inputter, KeyCode::Char('c'));
        assert_eq!(result.input, "acb");
        assert_eq!(result.cursor_pos, 2);
    }

    #[test]
    fn backspace_removes_before_the_cursor() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "abc");
        press(&mut inputter, KeyCode::Left);
        let result = press(&mut inputter, KeyCode::Backspace);
        assert_eq!(result.input, "ac");
        assert_eq!(result.cursor_pos, 1);
    }

    #[test]
    fn backspace_at_the_start_is_a_noop() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "a");
        press(&mut inputter, KeyCode::Home);
        let result = press(&mut inputter, KeyCode::Backspace);
        assert_eq!(result.input, "a");
        assert_eq!(result.cursor_pos, 0);
    }

    #[test]
    fn delete_removes_under_the_cursor() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "abc");
        press(&mut inputter, KeyCode::Home);
        let result = press(&mut inputter, KeyCode::Delete);
        assert_eq!(result.input, "bc");
        assert_eq!(result.cursor_pos, 0);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "ab");
        let result = press(&mut inputter, KeyCode::Right);
        assert_eq!(result.cursor_pos, 2);
        press(&mut inputter, KeyCode::Home);
        let result = press(&mut inputter, KeyCode::Left);
        assert_eq!(result.cursor_pos, 0);
    }

    #[test]
    fn multibyte_input_keeps_char_positions() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "åb");
        press(&mut inputter, KeyCode::Left);
        press(&mut inputter, KeyCode::Left);
        let result = press(&mut inputter, KeyCode::Char('x'));
        assert_eq!(result.input, "xåb");
        let result = press(&mut inputter, KeyCode::Delete);
        assert_eq!(result.input, "xb");
    }

    #[test]
    fn enter_finishes_with_the_value() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "ann");
        let result = press(&mut inputter, KeyCode::Enter);
        assert!(result.finished);
        assert!(!result.canceled);
        assert_eq!(result.input, "ann");
    }

    #[test]
    fn escape_cancels() {
        let mut inputter = Inputter::default();
        type_text(&mut inputter, "ann");
        let result = press(&mut inputter, KeyCode::Esc);
        assert!(result.canceled);
    }

    #[test]
    fn seed_places_the_cursor_at_the_end() {
        let mut inputter = Inputter::default();
        inputter.seed("male");
        let result = press(&mut inputter, KeyCode::Char('s'));
        assert_eq!(result.input, "males");
        assert_eq!(result.cursor_pos, 5);
    }

    #[test]
    fn control_chords_insert_nothing() {
        let mut inputter = Inputter::default();
        let result = inputter.read(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(result.input, "");
    }

    #[test]
    fn shifted_characters_insert_as_typed() {
        let mut inputter = Inputter::default();
        let result = inputter.read(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(result.input, "A");
    }
}
