use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use crate::calc::{format_number, in_range, OperandPair};
use crate::window::WindowHandle;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("operands {first} and {second} are out of range")]
    OutOfRange { first: f64, second: f64 },
    #[error("standard input closed")]
    EndOfInput,
    #[error("calculator window is closed")]
    WindowClosed,
}

pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<String, ConsoleError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            // invalid UTF-8 becomes a token that fails to parse
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Err(ConsoleError::EndOfInput);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(String::from),
            );
        }
    }
}

pub struct ConsoleDriver<R, W> {
    tokens: Tokens<R>,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleDriver<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            tokens: Tokens::new(reader),
            out,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn prompt(&mut self, text: &str) -> Result<(), ConsoleError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn read_operand(&mut self, ordinal: &str) -> Result<f64, ConsoleError> {
        loop {
            self.prompt(&format!("Enter the {} number (0-15): ", ordinal))?;
            let token = self.tokens.next_token()?;

            match token.parse::<f64>() {
                Ok(value) if in_range(value) => return Ok(value),
                Ok(value) => {
                    debug!("rejected out-of-range operand {}", value);
                    writeln!(self.out, "Number out of range. Try again.")?;
                }
                Err(_) => {
                    debug!("rejected non-numeric operand {:?}", token);
                    writeln!(self.out, "Not a number. Try again.")?;
                }
            }
        }
    }

    pub fn prompt_operand_pair(&mut self) -> Result<OperandPair, ConsoleError> {
        let first = self.read_operand("first")?;
        let second = self.read_operand("second")?;
        let operands =
            OperandPair::new(first, second).ok_or(ConsoleError::OutOfRange { first, second })?;

        writeln!(
            self.out,
            "Numbers updated: {} and {}",
            format_number(first),
            format_number(second)
        )?;

        Ok(operands)
    }

    pub fn ask_continue(&mut self) -> Result<bool, ConsoleError> {
        self.prompt("Continue? (y/n): ")?;
        let token = self.tokens.next_token()?;

        Ok(token
            .chars()
            .next()
            .map_or(false, |c| c.to_ascii_lowercase() == 'y'))
    }

    fn finish(&mut self, handle: &WindowHandle) -> Result<(), ConsoleError> {
        writeln!(self.out, "Program finished.")?;
        handle.dispose();
        Ok(())
    }

    pub fn main_loop(&mut self, handle: &WindowHandle) -> Result<(), ConsoleError> {
        loop {
            match self.ask_continue() {
                Ok(true) => (),
                Ok(false) | Err(ConsoleError::EndOfInput) => return self.finish(handle),
                Err(e) => return Err(e),
            }

            let operands = match self.prompt_operand_pair() {
                Ok(operands) => operands,
                Err(ConsoleError::EndOfInput) => return self.finish(handle),
                Err(e) => return Err(e),
            };

            info!(
                "sending operands {} and {} to the window",
                operands.first, operands.second
            );
            handle.set_operands(operands)?;
        }
    }
}

#[cfg(test)]
mod tests;
