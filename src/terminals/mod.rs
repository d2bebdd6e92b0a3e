//! Platform-specific terminal implementations.
//!
//! - **Unix/Linux**: [`StdioTerminal`] using termios on stdin and plain stdout
//!
//! Other byte streams (serial ports, sockets, test scripts) can implement
//! [`Terminal`](crate::Terminal) directly.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::StdioTerminal;
