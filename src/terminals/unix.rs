// Unix terminal implementation using termios

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;

use crate::{Result, Terminal};

/// Unix terminal using stdin/stdout with termios
///
/// Raw mode clears `ICANON`, `ECHO` and `ISIG` so that keys arrive one byte at a
/// time, are not echoed, and Ctrl+C reaches the editor as input instead of
/// raising `SIGINT`. The saved settings are restored by
/// [`exit_raw_mode`](Terminal::exit_raw_mode) and again on drop.
pub struct StdioTerminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    original_termios: Option<libc::termios>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            original_termios: None,
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdioTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioTerminal")
            .field("raw", &self.original_termios.is_some())
            .finish()
    }
}

impl Terminal for StdioTerminal {
    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.stdin.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        Ok(self.stdout.write_all(data)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.stdout.flush()?)
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.original_termios.is_some() {
            return Ok(());
        }

        let fd = self.stdin.as_raw_fd();

        // SAFETY: `termios` is plain data, fully initialised by `tcgetattr` before use.
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }

            let original = termios;

            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG);
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }

            self.original_termios = Some(original);
        }

        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if let Some(original) = self.original_termios {
            let fd = self.stdin.as_raw_fd();

            // SAFETY: `original` was filled in by `tcgetattr` in `enter_raw_mode`.
            unsafe {
                if libc::tcsetattr(fd, libc::TCSANOW, &original) != 0 {
                    return Err(io::Error::last_os_error().into());
                }
            }

            self.original_termios = None;
        }

        Ok(())
    }
}

impl Drop for StdioTerminal {
    fn drop(&mut self) {
        let _ = self.exit_raw_mode();
    }
}
