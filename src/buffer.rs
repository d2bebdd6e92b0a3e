//! Edit buffer and cursor.

use std::borrow::Cow;

/// Text buffer with cursor tracking for line editing operations.
///
/// Holds the bytes of the line being composed and the insertion point inside it.
/// The cursor always satisfies `0 <= cursor_pos <= len`.
///
/// This struct is typically not used directly - instead use [`LineEditor`](crate::LineEditor)
/// which pairs every mutation with the matching terminal update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    buffer: Vec<u8>,
    cursor_pos: usize,
}

impl LineBuffer {
    /// Creates a new line buffer with the specified capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use promptline::LineBuffer;
    ///
    /// let buffer = LineBuffer::new(256);
    /// assert!(buffer.is_empty());
    /// assert_eq!(buffer.cursor_pos(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            cursor_pos: 0,
        }
    }

    /// Clears the buffer and resets the cursor to the start.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_pos = 0;
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current cursor position from the start of the line.
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Returns the buffer contents as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the bytes from the cursor to the end of the line.
    pub fn tail(&self) -> &[u8] {
        &self.buffer[self.cursor_pos..]
    }

    /// Returns the buffer contents as text.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, since the
    /// editor works one byte per column.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Inserts a byte at the cursor position, shifting the rest right and moving the
    /// cursor forward.
    pub fn insert(&mut self, byte: u8) {
        self.buffer.insert(self.cursor_pos, byte);
        self.cursor_pos += 1;
    }

    /// Deletes the byte before the cursor (backspace operation).
    ///
    /// Returns `true` if a byte was deleted, `false` if the cursor is at the start.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            self.buffer.remove(self.cursor_pos);
            true
        } else {
            false
        }
    }

    /// Moves the cursor one position to the left.
    ///
    /// Returns `true` if the cursor moved, `false` if already at the start.
    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor one position to the right.
    ///
    /// Returns the byte passed over, or `None` if already at the end.
    pub fn move_cursor_right(&mut self) -> Option<u8> {
        let passed = self.buffer.get(self.cursor_pos).copied()?;
        self.cursor_pos += 1;
        Some(passed)
    }

    /// Moves the cursor to the start of the line.
    ///
    /// Returns the number of positions the cursor moved.
    pub fn move_cursor_to_start(&mut self) -> usize {
        let old_pos = self.cursor_pos;
        self.cursor_pos = 0;
        old_pos
    }

    /// Moves the cursor to the end of the line.
    ///
    /// Returns the number of positions the cursor moved.
    pub fn move_cursor_to_end(&mut self) -> usize {
        let old_pos = self.cursor_pos;
        self.cursor_pos = self.buffer.len();
        self.buffer.len() - old_pos
    }

    /// Drops everything from the cursor to the end of the line (Ctrl+K).
    ///
    /// The cursor does not move. Returns the number of bytes removed.
    pub fn truncate_at_cursor(&mut self) -> usize {
        let removed = self.buffer.len() - self.cursor_pos;
        self.buffer.truncate(self.cursor_pos);
        removed
    }

    /// Loads text into the buffer, replacing existing content.
    ///
    /// The cursor is positioned at the end of the loaded text.
    /// Used for history recall and tab completion.
    pub fn load(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.extend_from_slice(text.as_bytes());
        self.cursor_pos = self.buffer.len();
    }
}
