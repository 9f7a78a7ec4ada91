//! Single-line text entry field.
//!
//! Owns an edited string and a cursor. The session only ever reads
//! [`TextField::value`]; cursor state is private to the field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::theme;

/// Maximum characters a field accepts.
pub const CHAR_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in chars, 0..=len.
    cursor: usize,
    placeholder: String,
    focused: bool,
}

impl TextField {
    /// A blurred field holding `value`, cursor at the end.
    pub fn new(placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        let value: String = value.chars().take(CHAR_LIMIT).collect();
        TextField {
            cursor: value.chars().count(),
            value,
            placeholder: placeholder.into(),
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value: String = value.into();
        self.value = value.chars().take(CHAR_LIMIT).collect();
        self.cursor = self.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of char index `idx`.
    fn byte_at(&self, idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Apply a key. Returns true if the value changed.
    ///
    /// Blurred fields ignore all keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.len()),
            KeyCode::Char('u') if ctrl => {
                let end = self.byte_at(self.cursor);
                self.value.replace_range(..end, "");
                self.cursor = 0;
                end > 0
            }
            KeyCode::Char('k') if ctrl => {
                let start = self.byte_at(self.cursor);
                let changed = start < self.value.len();
                self.value.truncate(start);
                changed
            }
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return false;
                }
                let at = self.byte_at(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            _ => false,
        }
    }

    fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= CHAR_LIMIT {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        self.cursor = cursor.min(self.len());
        false
    }

    /// Render as a single line. Focused fields show the cursor as a
    /// reversed cell; empty fields show their placeholder dimmed.
    pub fn view(&self) -> Line<'static> {
        if self.value.is_empty() && !self.focused {
            return Line::from(Span::styled(self.placeholder.clone(), theme::STYLE_DIM));
        }
        if !self.focused {
            return Line::from(self.value.clone());
        }

        let split = self.byte_at(self.cursor);
        let (before, rest) = self.value.split_at(split);
        let mut chars = rest.chars();
        let under_cursor = chars.next().map_or_else(|| " ".to_string(), |c| c.to_string());
        let after: String = chars.collect();

        Line::from(vec![
            Span::styled(before.to_string(), Style::new()),
            Span::styled(under_cursor, theme::STYLE_CURSOR),
            Span::raw(after),
        ])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn focused(value: &str) -> TextField {
        let mut field = TextField::new("placeholder", value);
        field.focus();
        field
    }

    #[test]
    fn new_field_is_blurred_with_cursor_at_end() {
        let field = TextField::new("p", "héllo");
        assert!(!field.is_focused());
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn blurred_field_ignores_keys() {
        let mut field = TextField::new("p", "abc");
        assert!(!field.handle_key(key(KeyCode::Char('x'))));
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut field = focused("ab");
        assert!(field.handle_key(key(KeyCode::Char('c'))));
        assert_eq!(field.value(), "abc");

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Char('#')));
        assert_eq!(field.value(), "#abc");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn backspace_and_delete() {
        let mut field = focused("héllo");
        assert!(field.handle_key(key(KeyCode::Backspace)));
        assert_eq!(field.value(), "héll");

        field.handle_key(key(KeyCode::Home));
        assert!(!field.handle_key(key(KeyCode::Backspace)));
        assert!(field.handle_key(key(KeyCode::Delete)));
        assert_eq!(field.value(), "éll");
        assert!(field.handle_key(key(KeyCode::Delete)));
        assert_eq!(field.value(), "ll");
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut field = focused("ab");
        assert!(!field.handle_key(key(KeyCode::Delete)));
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn ctrl_u_and_ctrl_k_kill_around_cursor() {
        let mut field = focused("#8A2BE2");
        field.handle_key(ctrl('a'));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value(), "8A2BE2");

        let mut field = focused("hello world");
        field.handle_key(ctrl('u'));
        assert_eq!(field.value(), "");

        let mut field = focused("hello");
        field.handle_key(ctrl('a'));
        field.handle_key(ctrl('k'));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn other_control_chords_do_not_insert() {
        let mut field = focused("x");
        assert!(!field.handle_key(ctrl('z')));
        assert!(!field.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT)));
        assert_eq!(field.value(), "x");
    }

    #[test]
    fn respects_char_limit() {
        let long = "x".repeat(CHAR_LIMIT + 10);
        let mut field = focused(&long);
        assert_eq!(field.value().len(), CHAR_LIMIT);
        assert!(!field.handle_key(key(KeyCode::Char('y'))));
    }

    #[test]
    fn set_value_moves_cursor_to_end() {
        let mut field = focused("");
        field.set_value("#zzzzzz");
        assert_eq!(field.value(), "#zzzzzz");
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn view_shows_placeholder_when_empty_and_blurred() {
        let field = TextField::new("start hex", "");
        assert_eq!(field.view().to_string(), "start hex");
    }

    #[test]
    fn focused_view_reserves_a_cursor_cell() {
        let field = focused("ab");
        assert_eq!(field.view().to_string(), "ab ");
    }
}
