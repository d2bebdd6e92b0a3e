//! Terminal abstraction and scoped raw mode.

use std::ops::{Deref, DerefMut};

use crate::Result;

/// Terminal abstraction that enables platform-agnostic line editing.
///
/// Implement this trait to drive the editor from any byte-oriented I/O: a tty,
/// a UART, a socket, or a scripted buffer in tests.
///
/// # Platform Implementations
///
/// - [`terminals::StdioTerminal`](crate::terminals::StdioTerminal) for Unix (termios)
///
/// # Example
///
/// ```
/// use promptline::{Terminal, Result};
///
/// struct Scripted {
///     input: Vec<u8>,
///     output: Vec<u8>,
/// }
///
/// impl Terminal for Scripted {
///     fn read_byte(&mut self) -> Result<u8> {
///         self.input.pop().ok_or(promptline::Error::Eof)
///     }
///
///     fn write(&mut self, data: &[u8]) -> Result<()> {
///         self.output.extend_from_slice(data);
///         Ok(())
///     }
///
///     // ... implement other methods
/// #   fn flush(&mut self) -> Result<()> { Ok(()) }
/// #   fn enter_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// #   fn exit_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait Terminal {
    /// Reads a single byte from the input source.
    ///
    /// Should block until a byte is available.
    fn read_byte(&mut self) -> Result<u8>;

    /// Writes raw bytes to the output.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flushes any buffered output.
    ///
    /// Called after each key event to ensure immediate visual feedback.
    fn flush(&mut self) -> Result<()>;

    /// Enters raw mode for character-by-character input.
    ///
    /// Should disable line buffering, echo and signal generation so every key,
    /// including Ctrl+C, arrives as a byte.
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exits raw mode and restores the settings saved by [`enter_raw_mode`](Self::enter_raw_mode).
    fn exit_raw_mode(&mut self) -> Result<()>;

    /// Moves the cursor left by one column without touching the character under it.
    fn cursor_left(&mut self) -> Result<()> {
        self.write(b"\x08")
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        (**self).enter_raw_mode()
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        (**self).exit_raw_mode()
    }

    fn cursor_left(&mut self) -> Result<()> {
        (**self).cursor_left()
    }
}

/// Raw mode held for as long as the guard lives.
///
/// Created by [`RawModeGuard::new`], which switches the terminal into raw mode.
/// Dropping the guard restores the previous settings on every exit path: normal
/// return, `?` propagation, the terminate key, or a panic inside a submit handler.
/// The guard dereferences to the wrapped terminal.
#[derive(Debug)]
pub struct RawModeGuard<'t, T: Terminal + ?Sized> {
    terminal: &'t mut T,
}

impl<'t, T: Terminal + ?Sized> RawModeGuard<'t, T> {
    /// Enters raw mode on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns the terminal's error if raw mode could not be enabled; nothing is
    /// restored in that case because nothing was changed.
    pub fn new(terminal: &'t mut T) -> Result<Self> {
        terminal.enter_raw_mode()?;
        tracing::debug!("raw mode enabled");
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.exit_raw_mode() {
            tracing::warn!("failed to restore terminal mode: {e}");
        } else {
            tracing::debug!("raw mode restored");
        }
    }
}
