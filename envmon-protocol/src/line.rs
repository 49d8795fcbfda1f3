//! Inbound line accumulation
//!
//! Bytes arrive from the transport one at a time and in arbitrary chunks.
//! `LineBuffer` collects them raw until a `\n` terminator and hands back
//! the line with ASCII whitespace trimmed, decoded as UTF-8. The buffer
//! never holds a terminator: a newline always finalizes and resets it.

use heapless::{String, Vec};

/// Maximum length of a single inbound line in bytes (excluding terminator)
pub const MAX_LINE_LEN: usize = 128;

/// Line terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Errors that can occur while accumulating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN` before its terminator arrived.
    /// The rest of the line up to the next newline is dropped.
    Overflow,
    /// Completed line is not valid UTF-8 and was dropped
    InvalidUtf8,
}

/// Accumulator for newline-terminated text
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Dropping input until the next terminator after an overflow
    discarding: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Number of bytes held for the current partial line
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if no partial line is held
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check if the buffer is skipping the remainder of an oversized line
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Raw bytes of the partial line received so far
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line (leading/trailing ASCII whitespace removed), `Ok(None)` when
    /// more bytes are needed or the completed line was blank,
    /// `Err(LineError::Overflow)` once when a line outgrows the buffer and
    /// `Err(LineError::InvalidUtf8)` when a completed line does not decode.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        if byte == LINE_TERMINATOR {
            if self.discarding {
                self.reset();
                return Ok(None);
            }

            let line = Self::finalize(&self.buffer);
            self.buffer.clear();
            return line;
        }

        if self.discarding {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Err(LineError::Overflow);
        }

        Ok(None)
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete line found, if any.
    /// Bytes after that line's terminator are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn finalize(raw: &[u8]) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        let trimmed = raw.trim_ascii();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let text = core::str::from_utf8(trimmed).map_err(|_| LineError::InvalidUtf8)?;
        let mut line = String::new();
        // trimmed is a sub-slice of the buffer, so it always fits
        let _ = line.push_str(text);
        Ok(Some(line))
    }
}
