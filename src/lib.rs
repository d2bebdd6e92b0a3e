//! Interactive prompt with line editing, history recall and tab completion.
//!
//! This library reads raw keystrokes one at a time, keeps an edit buffer with a
//! movable cursor, redraws only what changed on the terminal, and hands every
//! submitted line to a caller-supplied handler. All I/O goes through the
//! [`Terminal`] trait, so the editing engine can be driven by a real tty or by
//! an in-memory script.
//!
//! # Features
//!
//! - **Line editing**: insert anywhere, backspace, left/right, Ctrl+A, Ctrl+E, Ctrl+K
//! - **Command history**: up/down recall of every non-empty submitted line
//! - **Tab completion**: first command in the dictionary that extends the typed text
//! - **Scoped raw mode**: terminal settings restored on every exit path
//!
//! # Quick Start
//!
//! ```no_run
//! use promptline::{Prompt, terminals::StdioTerminal};
//!
//! let mut prompt = Prompt::builder()
//!     .prompt("sh$> ")
//!     .welcome("Type a command, Ctrl+C to quit")
//!     .commands(["remove", "mkdir"])
//!     .on_submit(|line| println!("running {line}"))
//!     .build();
//!
//! let mut terminal = StdioTerminal::new();
//! prompt.start(&mut terminal)?;
//! std::process::exit(0);
//! # Ok::<(), promptline::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`LineBuffer`]: text being edited and the cursor inside it
//! - [`History`]: submitted lines plus the up/down navigation index
//! - [`Dictionary`]: known commands used for completion
//! - [`LineEditor`]: the key-driven state machine tying the above together
//! - [`Renderer`]: terminal output primitives that track the visual cursor column
//! - [`Prompt`]: prints the prompt, runs one edit session per line, dispatches
//!
//! # Custom Terminal Implementation
//!
//! ```
//! use promptline::{Terminal, Result};
//!
//! struct Uart {
//!     // Your platform-specific fields
//! }
//!
//! impl Terminal for Uart {
//!     fn read_byte(&mut self) -> Result<u8> {
//! #       Ok(b'\n')
//!     }
//!
//!     fn write(&mut self, data: &[u8]) -> Result<()> {
//! #       Ok(())
//!     }
//!
//!     fn flush(&mut self) -> Result<()> {
//! #       Ok(())
//!     }
//!
//!     fn enter_raw_mode(&mut self) -> Result<()> {
//! #       Ok(())
//!     }
//!
//!     fn exit_raw_mode(&mut self) -> Result<()> {
//! #       Ok(())
//!     }
//! }
//! ```

use std::io;

use thiserror::Error;

pub mod buffer;
pub mod dictionary;
pub mod editor;
pub mod history;
pub mod key;
pub mod prompt;
pub mod render;
pub mod terminal;
pub mod terminals;

#[cfg(test)]
pub(crate) mod mock;

pub use buffer::LineBuffer;
pub use dictionary::Dictionary;
pub use editor::{Line, LineEditor, Step};
pub use history::History;
pub use key::{read_key, KeyEvent};
pub use prompt::{Prompt, PromptBuilder, DEFAULT_PROMPT};
pub use render::Renderer;
pub use terminal::{RawModeGuard, Terminal};

/// Error type for promptline operations
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from or writing to the terminal failed
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// The input source has no more bytes
    #[error("End of file")]
    Eof,
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Eof,
            _ => Error::Io(e),
        }
    }
}

/// Result type for promptline operations
pub type Result<T> = std::result::Result<T, Error>;
