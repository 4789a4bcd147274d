use ropey::Rope;

/// Cursor position in a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub col: usize,
    /// Column to return to when moving vertically through shorter lines.
    col_memory: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editable text with a cursor, backed by a rope.
///
/// `revision` increases on every change so callers can tell whether the
/// text moved under them.
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: Cursor,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            revision: 0,
        }
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Swap in new content, keeping the cursor as close to where it was as
    /// the new text allows.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        let col = self.cursor.col.min(self.line_len(line));
        self.cursor = Cursor::at(line, self.floor_char_boundary(line, col));
        self.revision += 1;
    }

    pub fn insert_char(&mut self, ch: char) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.place_cursor(char_idx + 1);
        self.revision += 1;
    }

    /// Insert text at the cursor and leave the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);
        self.place_cursor(char_idx + s.chars().count());
        self.revision += 1;
    }

    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace. Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            // Remove "\r\n" as a unit
            let start = if char_idx >= 2 && self.rope.char(char_idx - 2) == '\r' {
                char_idx - 2
            } else {
                char_idx - 1
            };
            self.rope.remove(start..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let col = self.cursor.col.min(line.len());
            let prev_len = line[..col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(col - prev_len);
        }
        self.revision += 1;
        true
    }

    /// Delete at the cursor. Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.rope.char(char_idx) == '\r'
            && char_idx + 1 < self.rope.len_chars()
            && self.rope.char(char_idx + 1) == '\n'
        {
            char_idx + 2
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.revision += 1;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(false),
            Direction::Down => self.move_vertical(true),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let byte_col = self.cursor.col.min(line.len());
        line_start + line[..byte_col].chars().count()
    }

    /// Put the cursor at a rope char index, on the line the rope says it
    /// belongs to.
    fn place_cursor(&mut self, char_idx: usize) {
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self.rope.slice(line_start..char_idx).len_bytes();
        self.cursor.line = line;
        self.cursor.set_col(self.floor_char_boundary(line, col));
    }

    fn floor_char_boundary(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let col = self.cursor.col.min(line.len());
            let prev_len = line[..col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(col.saturating_sub(prev_len));
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if self.cursor.col < line.len() {
            let next_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, down: bool) {
        let target = if down {
            if self.cursor.line + 1 >= self.line_count() {
                return;
            }
            self.cursor.line + 1
        } else {
            if self.cursor.line == 0 {
                return;
            }
            self.cursor.line - 1
        };
        self.cursor.line = target;
        self.cursor.col = self.floor_char_boundary(target, self.cursor.col_memory);
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rope", &format_args!("Rope({} lines)", self.rope.len_lines()))
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .finish()
    }
}
