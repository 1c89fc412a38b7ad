//! Bounded raw-line reading.

use std::io::{BufRead, Read};

use crate::{MAX_LINE_LEN, error::TrimError};

/// One input record, reused across reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLine {
    bytes: Vec<u8>,
    number: usize,
}

impl RawLine {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(MAX_LINE_LEN),
            number: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 1-based input line number of the record currently held.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reads lines of at most [`MAX_LINE_LEN`] bytes, terminator included.
pub struct LineSource<R> {
    inner: R,
    line_number: usize,
    limit: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, MAX_LINE_LEN)
    }

    pub fn with_limit(inner: R, limit: usize) -> Self {
        Self {
            inner,
            line_number: 0,
            limit,
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Overwrites `line` with the next record, trailing bytes `<= b' '`
    /// stripped. Returns `false` at end of input, leaving `line` empty.
    pub fn read_into(&mut self, line: &mut RawLine) -> Result<bool, TrimError> {
        line.bytes.clear();
        let read = (&mut self.inner)
            .take(self.limit as u64)
            .read_until(b'\n', &mut line.bytes)?;
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        line.number = self.line_number;
        if read == self.limit
            && line.bytes.last() != Some(&b'\n')
            && !self.inner.fill_buf()?.is_empty()
        {
            return Err(TrimError::InputLineTooLong {
                line: self.line_number,
            });
        }
        let kept = line
            .bytes
            .iter()
            .rposition(|&b| b > b' ')
            .map_or(0, |last| last + 1);
        line.bytes.truncate(kept);
        Ok(true)
    }
}
