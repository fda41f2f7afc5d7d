use newsdesk_api::RecordId;

/// A blocking message shown on top of any screen until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// The record awaiting a yes/no answer before it is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub id: RecordId,
    pub title: String,
}

/// Single-line text buffer for a form field. `cursor` is a byte offset that
/// always sits on a char boundary of `value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        Self {
            value: text.to_string(),
            cursor: text.len(),
        }
    }
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace: removes the char left of the cursor.
    pub fn backspace(&mut self) {
        if let Some((start, _)) = self.char_before_cursor() {
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.char_before_cursor() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Text left and right of the cursor, for rendering the caret.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        debug_assert!(self.value.is_char_boundary(self.cursor));
        self.value.split_at(self.cursor)
    }

    fn char_before_cursor(&self) -> Option<(usize, char)> {
        self.value[..self.cursor].char_indices().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_respect_multibyte_chars() {
        let mut input = TextInput::from("Economí");
        input.insert('a');
        assert_eq!(input.value, "Economía");

        input.move_left();
        input.backspace();
        assert_eq!(input.value, "Economa");
        assert_eq!(input.split_at_cursor(), ("Econom", "a"));
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut input = TextInput::default();
        input.backspace();
        input.move_left();
        input.move_right();
        assert_eq!(input.cursor, 0);

        input.insert('é');
        input.home();
        input.move_right();
        assert_eq!(input.cursor, 'é'.len_utf8());
        input.end();
        input.move_right();
        assert_eq!(input.cursor, input.value.len());
        input.clear();
        assert_eq!(input, TextInput::default());
    }

    #[test]
    fn editing_mid_string_keeps_cursor_on_char_boundary() {
        let mut input = TextInput::from("año");
        input.move_left();
        input.move_left();
        assert_eq!(input.split_at_cursor(), ("a", "ño"));

        input.insert('ñ');
        assert_eq!(input.value, "añño");
        input.move_right();
        input.backspace();
        assert_eq!(input.value, "año");
        assert_eq!(input.split_at_cursor(), ("añ", "o"));
    }
}
