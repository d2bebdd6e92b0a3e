//! Terminal output primitives that keep track of the visual cursor column.

use crate::{Result, Terminal};

/// Writes edit updates to a terminal and tracks where the visual cursor is.
///
/// The column is counted from the end of the prompt, so after every editor
/// operation `column() == buffer.cursor_pos()`. Only three moves are used:
/// stepping left, printing bytes (which steps right), and overwriting with spaces.
#[derive(Debug)]
pub struct Renderer<'t, T: Terminal + ?Sized> {
    terminal: &'t mut T,
    column: usize,
}

impl<'t, T: Terminal + ?Sized> Renderer<'t, T> {
    /// Starts rendering at column 0, right after the prompt.
    pub fn new(terminal: &'t mut T) -> Self {
        Self {
            terminal,
            column: 0,
        }
    }

    /// Visual cursor column relative to the end of the prompt.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The terminal being drawn on; also the input source for key decoding.
    pub fn terminal(&mut self) -> &mut T {
        &mut *self.terminal
    }

    /// Prints `bytes` at the cursor, moving right by their length.
    pub fn print(&mut self, bytes: &[u8]) -> Result<()> {
        self.terminal.write(bytes)?;
        self.column += bytes.len();
        Ok(())
    }

    /// Moves left by `count` columns, stopping at the prompt.
    pub fn left(&mut self, count: usize) -> Result<()> {
        debug_assert!(count <= self.column, "moving left past the prompt");
        let count = count.min(self.column);
        for _ in 0..count {
            self.terminal.cursor_left()?;
        }
        self.column -= count;
        Ok(())
    }

    /// Overwrites `count` columns from the cursor with spaces and comes back.
    pub fn blank(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.print(&vec![b' '; count])?;
        self.left(count)
    }

    /// Erases the `count` columns before the cursor, leaving the cursor where the
    /// first of them was.
    pub fn erase_back(&mut self, count: usize) -> Result<()> {
        let count = count.min(self.column);
        self.left(count)?;
        self.blank(count)
    }

    /// Ends the line.
    pub fn newline(&mut self) -> Result<()> {
        self.terminal.write(b"\n")?;
        self.column = 0;
        self.terminal.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.terminal.flush()
    }
}
