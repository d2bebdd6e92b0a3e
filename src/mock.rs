// In-memory terminal used by the unit tests.

use std::collections::VecDeque;

use crate::{Error, Result, Terminal};

#[derive(Debug, Default)]
pub(crate) struct MockTerminal {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub raw: bool,
    pub raw_entered: usize,
    pub raw_exited: usize,
}

impl MockTerminal {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Terminal for MockTerminal {
    fn read_byte(&mut self) -> Result<u8> {
        self.input.pop_front().ok_or(Error::Eof)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.output.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        self.raw = true;
        self.raw_entered += 1;
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        self.raw = false;
        self.raw_exited += 1;
        Ok(())
    }
}

/// Replays terminal output onto a single line, returning what is visible and where
/// the cursor sits. Understands printable bytes, `\x08` and `\n` (which clears).
pub(crate) fn screen(output: &[u8]) -> (String, usize) {
    let mut line: Vec<u8> = Vec::new();
    let mut col: usize = 0;
    for &b in output {
        match b {
            b'\n' => {
                line.clear();
                col = 0;
            }
            0x08 => col = col.saturating_sub(1),
            _ => {
                if col < line.len() {
                    line[col] = b;
                } else {
                    line.push(b);
                }
                col += 1;
            }
        }
    }
    let shown = String::from_utf8_lossy(&line).trim_end().to_string();
    (shown, col)
}
