//! Decoding raw input bytes into key events.

use crate::{Error, Result, Terminal};

const CTRL_A: u8 = 1;
const CTRL_C: u8 = 3;
const CTRL_E: u8 = 5;
const BACKSPACE_CTRL_H: u8 = 8;
const TAB: u8 = 9;
const LINE_FEED: u8 = 10;
const CTRL_K: u8 = 11;
const CARRIAGE_RETURN: u8 = 13;
const ESCAPE: u8 = 27;
const CSI_INTRODUCER: u8 = b'[';
const DELETE: u8 = 127;

/// First byte that is displayed as itself.
const PRINTABLE_START: u8 = 32;

/// Key events that can be processed by the line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Byte to insert at the cursor
    Printable(u8),
    /// Enter/Return
    Enter,
    /// Ctrl+C, ends the prompt
    Terminate,
    /// Backspace (DEL or Ctrl+H)
    Backspace,
    /// Tab (complete command)
    Tab,
    /// Ctrl+A (move to start of line)
    CtrlHome,
    /// Ctrl+E (move to end of line)
    CtrlEnd,
    /// Ctrl+K (delete to end of line)
    CtrlKillToEnd,
    /// Up arrow (history previous)
    Up,
    /// Down arrow (history next)
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Anything else; ignored by the editor
    Unrecognized,
}

impl KeyEvent {
    /// Classifies a byte that does not start an escape sequence.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            LINE_FEED | CARRIAGE_RETURN => KeyEvent::Enter,
            CTRL_C => KeyEvent::Terminate,
            DELETE | BACKSPACE_CTRL_H => KeyEvent::Backspace,
            TAB => KeyEvent::Tab,
            CTRL_A => KeyEvent::CtrlHome,
            CTRL_E => KeyEvent::CtrlEnd,
            CTRL_K => KeyEvent::CtrlKillToEnd,
            b if b < PRINTABLE_START => KeyEvent::Unrecognized,
            b => KeyEvent::Printable(b),
        }
    }

    fn from_csi_final(byte: u8) -> Self {
        match byte {
            b'A' => KeyEvent::Up,
            b'B' => KeyEvent::Down,
            b'C' => KeyEvent::Right,
            b'D' => KeyEvent::Left,
            _ => KeyEvent::Unrecognized,
        }
    }
}

/// Reads exactly one key event from `terminal`.
///
/// An escape byte consumes the next two bytes as `ESC [ <final>`. A mismatched
/// introducer or unknown final byte yields [`KeyEvent::Unrecognized`]; the consumed
/// bytes are dropped, not replayed. Running out of input partway through an escape
/// sequence also yields [`KeyEvent::Unrecognized`].
///
/// # Errors
///
/// Propagates read failures, including [`Error::Eof`] when no byte at all is
/// available for a new key.
pub fn read_key<T: Terminal + ?Sized>(terminal: &mut T) -> Result<KeyEvent> {
    let byte = terminal.read_byte()?;
    let key = if byte == ESCAPE {
        read_escape_sequence(terminal)?
    } else {
        KeyEvent::from_byte(byte)
    };
    tracing::trace!(byte, ?key, "decoded key");
    Ok(key)
}

fn read_escape_sequence<T: Terminal + ?Sized>(terminal: &mut T) -> Result<KeyEvent> {
    let introducer = match terminal.read_byte() {
        Ok(b) => b,
        Err(Error::Eof) => return Ok(KeyEvent::Unrecognized),
        Err(e) => return Err(e),
    };
    if introducer != CSI_INTRODUCER {
        tracing::trace!(introducer, "dropping escape sequence");
        return Ok(KeyEvent::Unrecognized);
    }
    match terminal.read_byte() {
        Ok(b) => Ok(KeyEvent::from_csi_final(b)),
        Err(Error::Eof) => Ok(KeyEvent::Unrecognized),
        Err(e) => Err(e),
    }
}
