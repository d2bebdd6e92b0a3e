//! The key-driven edit engine.

use crate::key::read_key;
use crate::{Dictionary, History, KeyEvent, LineBuffer, Renderer, Result, Terminal};

/// Callback receiving the whole buffer after each inserted character.
pub type Printer = Box<dyn FnMut(&str)>;

/// How an edit session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Enter was pressed; the buffer contents at that moment.
    Submitted(String),
    /// The terminate key was pressed.
    Terminated,
}

/// What the session loop should do after one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading keys
    Continue,
    /// Enter was pressed; the buffer is the submitted line
    Submit,
    /// The terminate key was pressed
    Terminate,
}

/// Line editor with history recall and tab completion.
///
/// Each call to [`read_line`](Self::read_line) is one edit session: the buffer
/// starts empty, history navigation starts past the newest entry, and keys are
/// applied until Enter or the terminate key. Every key that changes the buffer or
/// the cursor also updates the terminal so the visual cursor column stays equal to
/// the buffer cursor.
///
/// # Key Bindings
///
/// - **Left/Right**: Move cursor
/// - **Up/Down**: Recall older/newer submitted lines
/// - **Ctrl+A / Ctrl+E**: Jump to start/end of line
/// - **Ctrl+K**: Delete from cursor to end of line
/// - **Backspace**: Delete character before cursor
/// - **Tab**: Complete the line from the command dictionary
/// - **Enter**: Submit line
/// - **Ctrl+C**: Terminate
pub struct LineEditor {
    line: LineBuffer,
    history: History,
    dictionary: Dictionary,
    printer: Option<Printer>,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(Dictionary::new())
    }
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("line", &self.line)
            .field("history", &self.history)
            .field("dictionary", &self.dictionary)
            .field("printer", &self.printer.is_some())
            .finish()
    }
}

impl LineEditor {
    /// Creates an editor with empty history that completes from `dictionary`.
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            line: LineBuffer::new(256),
            history: History::new(),
            dictionary,
            printer: None,
        }
    }

    /// Installs the secondary output sink called with the buffer after each insertion.
    pub fn set_printer(&mut self, printer: Option<Printer>) {
        self.printer = printer;
    }

    /// The buffer being edited.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Lines submitted so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable history, used by the prompt loop to record submissions.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Commands used for tab completion.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Mutable completion dictionary.
    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Resets the buffer and history navigation for a new session.
    pub fn begin_session(&mut self) {
        self.line.clear();
        self.history.reset_navigation();
        tracing::debug!("edit session started");
    }

    /// Runs one edit session, assuming the prompt has already been printed.
    ///
    /// The caller is responsible for raw mode; see [`RawModeGuard`](crate::RawModeGuard).
    ///
    /// # Errors
    ///
    /// Propagates terminal read and write failures, including
    /// [`Error::Eof`](crate::Error::Eof) if input runs out before Enter.
    pub fn read_line<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> Result<Line> {
        self.begin_session();
        let mut out = Renderer::new(terminal);

        loop {
            let key = read_key(out.terminal())?;
            match self.handle_key(&mut out, key)? {
                Step::Continue => {}
                Step::Submit => {
                    out.newline()?;
                    let line = self.line.as_str().into_owned();
                    tracing::debug!(len = line.len(), "line submitted");
                    return Ok(Line::Submitted(line));
                }
                Step::Terminate => {
                    out.newline()?;
                    tracing::debug!("terminate key pressed");
                    return Ok(Line::Terminated);
                }
            }
        }
    }

    /// Applies one key to the buffer and the display.
    ///
    /// Enter and the terminate key only report what happened; the caller ends the
    /// session.
    ///
    /// # Errors
    ///
    /// Propagates terminal write failures.
    pub fn handle_key<T: Terminal + ?Sized>(
        &mut self,
        out: &mut Renderer<'_, T>,
        key: KeyEvent,
    ) -> Result<Step> {
        match key {
            KeyEvent::Enter => return Ok(Step::Submit),
            KeyEvent::Terminate => return Ok(Step::Terminate),
            KeyEvent::Printable(byte) => self.insert(out, byte)?,
            KeyEvent::Backspace => {
                if self.line.delete_before_cursor() {
                    out.left(1)?;
                    self.redraw_tail(out, 1)?;
                }
            }
            KeyEvent::Left => {
                if self.line.move_cursor_left() {
                    out.left(1)?;
                }
            }
            KeyEvent::Right => {
                if let Some(passed) = self.line.move_cursor_right() {
                    out.print(&[passed])?;
                }
            }
            KeyEvent::CtrlHome => {
                let count = self.line.move_cursor_to_start();
                out.left(count)?;
            }
            KeyEvent::CtrlEnd => self.move_to_end(out)?,
            KeyEvent::CtrlKillToEnd => {
                let removed = self.line.truncate_at_cursor();
                out.blank(removed)?;
            }
            KeyEvent::Tab => self.complete(out)?,
            KeyEvent::Up => {
                if let Some(entry) = self.history.previous() {
                    let entry = entry.to_string();
                    tracing::debug!(position = self.history.position(), "history previous");
                    self.replace_line(out, &entry)?;
                }
            }
            KeyEvent::Down => {
                if let Some(entry) = self.history.next_entry() {
                    let entry = entry.to_string();
                    tracing::debug!(position = self.history.position(), "history next");
                    self.replace_line(out, &entry)?;
                }
            }
            KeyEvent::Unrecognized => {
                tracing::trace!("ignoring unrecognized input");
                return Ok(Step::Continue);
            }
        }

        debug_assert_eq!(out.column(), self.line.cursor_pos());
        out.flush()?;
        Ok(Step::Continue)
    }

    fn insert<T: Terminal + ?Sized>(&mut self, out: &mut Renderer<'_, T>, byte: u8) -> Result<()> {
        self.line.insert(byte);
        out.print(&[byte])?;
        self.redraw_tail(out, 0)?;

        if let Some(printer) = self.printer.as_mut() {
            printer(&self.line.as_str());
        }
        Ok(())
    }

    /// Reprints everything after the cursor, blanks `trailing` stale columns past
    /// the new end of line, and returns to the cursor.
    fn redraw_tail<T: Terminal + ?Sized>(
        &self,
        out: &mut Renderer<'_, T>,
        trailing: usize,
    ) -> Result<()> {
        let tail = self.line.tail();
        out.print(tail)?;
        out.blank(trailing)?;
        out.left(tail.len())
    }

    fn move_to_end<T: Terminal + ?Sized>(&mut self, out: &mut Renderer<'_, T>) -> Result<()> {
        out.print(self.line.tail())?;
        self.line.move_cursor_to_end();
        Ok(())
    }

    /// Replaces the displayed line with `text`, cursor at its end.
    fn replace_line<T: Terminal + ?Sized>(
        &mut self,
        out: &mut Renderer<'_, T>,
        text: &str,
    ) -> Result<()> {
        self.move_to_end(out)?;
        out.erase_back(self.line.len())?;
        self.line.load(text);
        out.print(self.line.as_bytes())
    }

    fn complete<T: Terminal + ?Sized>(&mut self, out: &mut Renderer<'_, T>) -> Result<()> {
        if self.line.is_empty() {
            return Ok(());
        }

        match self.dictionary.complete(self.line.as_bytes()) {
            Some(command) => {
                let command = command.to_string();
                tracing::debug!(typed = %self.line.as_str(), command, "completed");
                self.replace_line(out, &command)
            }
            None => {
                tracing::debug!(typed = %self.line.as_str(), "no completion");
                // Reprint the line as-is; its bytes are never re-decoded.
                self.move_to_end(out)?;
                out.erase_back(self.line.len())?;
                out.print(self.line.as_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{screen, MockTerminal};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const UP: &[u8] = b"\x1b[A";
    const DOWN: &[u8] = b"\x1b[B";
    const RIGHT: &[u8] = b"\x1b[C";
    const LEFT: &[u8] = b"\x1b[D";

    fn editor_with(commands: &[&str]) -> LineEditor {
        LineEditor::new(commands.iter().copied().collect())
    }

    /// Feeds `keys` into a fresh session without requiring Enter, returning the
    /// editor and what the terminal shows.
    fn apply(editor: &mut LineEditor, keys: &[KeyEvent]) -> (String, usize) {
        editor.begin_session();
        let mut term = MockTerminal::new(b"");
        let mut out = Renderer::new(&mut term);
        for &key in keys {
            assert_eq!(editor.handle_key(&mut out, key).unwrap(), Step::Continue);
            assert_eq!(out.column(), editor.line().cursor_pos());
        }
        screen(&term.output)
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.bytes().map(KeyEvent::Printable).collect()
    }

    fn submit(editor: &mut LineEditor, input: &[u8]) -> Line {
        let mut term = MockTerminal::new(input);
        editor.read_line(&mut term).unwrap()
    }

    #[test]
    fn test_insert_at_end_and_middle() {
        let mut editor = LineEditor::default();
        let mut keys = typed("hllo");
        keys.extend([KeyEvent::Left; 3]);
        keys.push(KeyEvent::Printable(b'e'));

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "hello");
        assert_eq!(editor.line().cursor_pos(), 2);
        assert_eq!(shown, ("hello".to_string(), 2));
    }

    #[test]
    fn test_backspace_middle() {
        let mut editor = LineEditor::default();
        let mut keys = typed("abcd");
        keys.extend([KeyEvent::Left, KeyEvent::Left, KeyEvent::Backspace]);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "acd");
        assert_eq!(editor.line().cursor_pos(), 1);
        assert_eq!(shown, ("acd".to_string(), 1));
    }

    #[test]
    fn test_backspace_at_start_keeps_prompt() {
        let mut editor = LineEditor::default();
        let mut keys = typed("ab");
        keys.extend([KeyEvent::CtrlHome, KeyEvent::Backspace]);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "ab");
        assert_eq!(shown, ("ab".to_string(), 0));
    }

    #[test]
    fn test_insert_then_backspace_restores_state() {
        let mut editor = LineEditor::default();
        let mut keys = typed("abc");
        keys.extend([KeyEvent::Left, KeyEvent::Printable(b'x'), KeyEvent::Backspace]);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "abc");
        assert_eq!(editor.line().cursor_pos(), 2);
        assert_eq!(shown, ("abc".to_string(), 2));
    }

    #[test]
    fn test_left_right_boundaries() {
        let mut editor = LineEditor::default();
        let mut keys = typed("ab");
        keys.extend([KeyEvent::Right, KeyEvent::Right]);
        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().cursor_pos(), 2);
        assert_eq!(shown, ("ab".to_string(), 2));

        keys.extend([KeyEvent::Left; 4]);
        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "ab");
        assert_eq!(editor.line().cursor_pos(), 0);
        assert_eq!(shown, ("ab".to_string(), 0));
    }

    #[test]
    fn test_home_and_end() {
        let mut editor = LineEditor::default();
        let mut keys = typed("hello");
        keys.push(KeyEvent::CtrlHome);
        keys.push(KeyEvent::Right);
        keys.push(KeyEvent::CtrlEnd);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().cursor_pos(), 5);
        assert_eq!(shown, ("hello".to_string(), 5));
    }

    #[test]
    fn test_kill_to_end() {
        let mut editor = LineEditor::default();
        let mut keys = typed("hello");
        keys.extend([KeyEvent::CtrlHome, KeyEvent::Right, KeyEvent::Right]);
        keys.push(KeyEvent::CtrlKillToEnd);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "he");
        assert_eq!(editor.line().cursor_pos(), 2);
        assert_eq!(shown, ("he".to_string(), 2));
    }

    #[test]
    fn test_tab_completes_first_match() {
        let mut editor = editor_with(&["remove", "mkdir"]);
        let mut keys = typed("re");
        keys.push(KeyEvent::Tab);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "remove");
        assert_eq!(editor.line().cursor_pos(), 6);
        assert_eq!(shown, ("remove".to_string(), 6));
    }

    #[test]
    fn test_tab_without_match_keeps_buffer() {
        let mut editor = editor_with(&["remove", "mkdir"]);
        let mut keys = typed("zz");
        keys.push(KeyEvent::Tab);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "zz");
        assert_eq!(editor.line().cursor_pos(), 2);
        assert_eq!(shown, ("zz".to_string(), 2));
    }

    #[test]
    fn test_tab_without_match_keeps_non_utf8_bytes() {
        let mut editor = editor_with(&["remove"]);
        let keys = [KeyEvent::Printable(b'z'), KeyEvent::Printable(0xFF), KeyEvent::Tab];

        apply(&mut editor, &keys);
        assert_eq!(editor.line().as_bytes(), [b'z', 0xFF]);
        assert_eq!(editor.line().cursor_pos(), 2);
    }

    #[test]
    fn test_tab_on_empty_buffer_is_noop() {
        let mut editor = editor_with(&["remove"]);
        let shown = apply(&mut editor, &[KeyEvent::Tab]);
        assert!(editor.line().is_empty());
        assert_eq!(shown, (String::new(), 0));
    }

    #[test]
    fn test_tab_with_cursor_mid_line() {
        let mut editor = editor_with(&["mkdir"]);
        let mut keys = typed("mk");
        keys.extend([KeyEvent::Left, KeyEvent::Tab]);

        let shown = apply(&mut editor, &keys);
        assert_eq!(editor.line().as_str(), "mkdir");
        assert_eq!(shown, ("mkdir".to_string(), 5));
    }

    #[test]
    fn test_unrecognized_writes_nothing() {
        let mut editor = LineEditor::default();
        editor.begin_session();
        let mut term = MockTerminal::new(b"");
        let mut out = Renderer::new(&mut term);
        editor.handle_key(&mut out, KeyEvent::Unrecognized).unwrap();
        assert!(term.output.is_empty());
        assert!(editor.line().is_empty());
    }

    #[test]
    fn test_read_line_submits_buffer() {
        let mut editor = LineEditor::default();
        let line = submit(&mut editor, b"ls -l\n");
        assert_eq!(line, Line::Submitted("ls -l".to_string()));
    }

    #[test]
    fn test_read_line_terminate() {
        let mut editor = LineEditor::default();
        assert_eq!(submit(&mut editor, b"abc\x03"), Line::Terminated);
    }

    #[test]
    fn test_read_line_eof_is_error() {
        let mut editor = LineEditor::default();
        let mut term = MockTerminal::new(b"abc");
        assert!(matches!(editor.read_line(&mut term), Err(crate::Error::Eof)));
    }

    #[test]
    fn test_read_line_starts_with_empty_buffer() {
        let mut editor = LineEditor::default();
        submit(&mut editor, b"first\n");
        assert_eq!(submit(&mut editor, b"\n"), Line::Submitted(String::new()));
    }

    #[test]
    fn test_history_round_trip() {
        let mut editor = LineEditor::default();
        editor.history_mut().push("a");
        editor.history_mut().push("b");

        let mut term = MockTerminal::new(b"");
        editor.begin_session();
        let mut out = Renderer::new(&mut term);

        editor.handle_key(&mut out, KeyEvent::Up).unwrap();
        assert_eq!(editor.line().as_str(), "b");
        editor.handle_key(&mut out, KeyEvent::Up).unwrap();
        assert_eq!(editor.line().as_str(), "a");
        editor.handle_key(&mut out, KeyEvent::Up).unwrap();
        assert_eq!(editor.line().as_str(), "a");
        assert_eq!(editor.line().cursor_pos(), 1);

        editor.handle_key(&mut out, KeyEvent::Down).unwrap();
        assert_eq!(editor.line().as_str(), "b");
        editor.handle_key(&mut out, KeyEvent::Down).unwrap();
        assert_eq!(editor.line().as_str(), "");
        editor.handle_key(&mut out, KeyEvent::Down).unwrap();
        assert_eq!(editor.line().as_str(), "");
        assert_eq!(out.column(), 0);

        assert_eq!(screen(&term.output), (String::new(), 0));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_history_recall_erases_longer_line() {
        let mut editor = LineEditor::default();
        editor.history_mut().push("ls");

        let mut keys = typed("something long");
        keys.extend([KeyEvent::CtrlHome, KeyEvent::Up]);
        let shown = apply(&mut editor, &keys);
        assert_eq!(shown, ("ls".to_string(), 2));
    }

    #[test]
    fn test_history_up_on_empty_history() {
        let mut editor = LineEditor::default();
        let mut keys = typed("abc");
        keys.push(KeyEvent::Up);
        let shown = apply(&mut editor, &keys);
        assert_eq!(shown, ("abc".to_string(), 3));
    }

    #[test]
    fn test_printer_sees_buffer_after_each_insert() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut editor = LineEditor::default();
        editor.set_printer(Some(Box::new(move |line: &str| {
            sink.borrow_mut().push(line.to_string());
        })));
        let mut keys = typed("ac");
        keys.extend([KeyEvent::Left, KeyEvent::Printable(b'b'), KeyEvent::Backspace]);
        apply(&mut editor, &keys);

        assert_eq!(*seen.borrow(), ["a", "ac", "abc"]);
    }

    fn any_key() -> impl Strategy<Value = KeyEvent> {
        prop_oneof![
            (b'a'..=b'z').prop_map(KeyEvent::Printable),
            Just(KeyEvent::Backspace),
            Just(KeyEvent::Tab),
            Just(KeyEvent::CtrlHome),
            Just(KeyEvent::CtrlEnd),
            Just(KeyEvent::CtrlKillToEnd),
            Just(KeyEvent::Up),
            Just(KeyEvent::Down),
            Just(KeyEvent::Left),
            Just(KeyEvent::Right),
            Just(KeyEvent::Unrecognized),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_and_display_stay_in_sync(keys in prop::collection::vec(any_key(), 0..64)) {
            let mut editor = editor_with(&["remove", "mkdir", "make"]);
            editor.history_mut().push("first");
            editor.history_mut().push("second line");

            editor.begin_session();
            let mut term = MockTerminal::new(b"");
            let mut out = Renderer::new(&mut term);
            for key in keys {
                editor.handle_key(&mut out, key).unwrap();
                prop_assert!(editor.line().cursor_pos() <= editor.line().len());
                prop_assert_eq!(out.column(), editor.line().cursor_pos());
            }

            let (shown, col) = screen(&term.output);
            prop_assert_eq!(shown, editor.line().as_str().trim_end().to_string());
            prop_assert_eq!(col, editor.line().cursor_pos());
        }

        #[test]
        fn prop_insert_then_backspace_is_identity(
            text in "[a-z ]{0,12}",
            back in 0usize..12,
            c in b'a'..=b'z',
        ) {
            let mut editor = LineEditor::default();
            let mut keys = typed(&text);
            keys.extend(std::iter::repeat(KeyEvent::Left).take(back));
            apply(&mut editor, &keys);
            let before = editor.line().clone();

            editor.begin_session();
            let mut keys = typed(&text);
            keys.extend(std::iter::repeat(KeyEvent::Left).take(back));
            keys.extend([KeyEvent::Printable(c), KeyEvent::Backspace]);
            apply(&mut editor, &keys);

            prop_assert_eq!(editor.line(), &before);
        }
    }
}
