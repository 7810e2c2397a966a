/// Minimal multi-line text editor state for form fields. Cursor positions
/// are in characters, not bytes; conversions happen at the edit points.
/// Invariant: `lines` always holds at least one line.
#[derive(Debug, Clone)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub fn from_string(value: String) -> Self {
        let lines: Vec<String> = if value.is_empty() {
            vec![String::new()]
        } else {
            value.split('\n').map(str::to_string).collect()
        };
        let cursor_row = lines.len() - 1;
        let cursor_col = lines[cursor_row].chars().count();
        Self {
            lines,
            cursor_row,
            cursor_col,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// First line only, for single-line fields.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(index, _)| index)
            .unwrap_or(line.len())
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|line| line.chars().count()).unwrap_or(0)
    }

    pub fn insert_char(&mut self, c: char) {
        let row = self.cursor_row;
        let index = Self::byte_index(&self.lines[row], self.cursor_col);
        self.lines[row].insert(index, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let row = self.cursor_row;
        let index = Self::byte_index(&self.lines[row], self.cursor_col);
        let rest = self.lines[row].split_off(index);
        self.lines.insert(row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let row = self.cursor_row;
            let index = Self::byte_index(&self.lines[row], self.cursor_col - 1);
            self.lines[row].remove(index);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            // Join with the previous line
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&current);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_and_backspace_round_trip() {
        let mut editor = Editor::new();
        for c in "abc".chars() {
            editor.insert_char(c);
        }
        assert_eq!(editor.text(), "abc");
        editor.backspace();
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn newline_splits_at_cursor_and_backspace_rejoins() {
        let mut editor = Editor::from_string("hello".to_string());
        editor.cursor_col = 2;
        editor.insert_newline();
        assert_eq!(editor.text(), "he\nllo");
        editor.backspace();
        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor_col, 2);
    }

    #[test]
    fn multibyte_chars_edit_by_char_not_byte() {
        let mut editor = Editor::from_string("héllo".to_string());
        editor.cursor_col = 2;
        editor.backspace();
        assert_eq!(editor.text(), "hllo");
    }
}
