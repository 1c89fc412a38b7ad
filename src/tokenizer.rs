//! Single-byte delimiter tokenizing and bounded field accumulation.
//!
//! Lines are treated as opaque byte spans separated by one delimiter byte.
//! [`LineBuffer`] gathers fields for later output and refuses to grow past
//! its declared capacity.

use std::ops::Range;

use crate::{MAX_LINE_LEN, error::TrimError};

/// Returns the `index`-th `delimiter`-separated field of `line`.
///
/// `None` means the field does not exist, either because the line is empty
/// or because it has too few delimiters. A present but empty field is
/// `Some(&[])`.
pub fn field_at(line: &[u8], index: usize, delimiter: u8) -> Option<&[u8]> {
    if line.is_empty() {
        return None;
    }
    line.split(|&b| b == delimiter).nth(index)
}

/// Like [`field_at`], but a missing field is a fatal error for `line_number`.
pub fn field_or_missing(
    line: &[u8],
    index: usize,
    delimiter: u8,
    line_number: usize,
) -> Result<&[u8], TrimError> {
    field_at(line, index, delimiter).ok_or(TrimError::MissingField { line: line_number })
}

/// Fixed-capacity output line made of separator-terminated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    spans: Vec<Range<usize>>,
    capacity: usize,
    separator: u8,
}

impl LineBuffer {
    pub fn new(separator: u8) -> Self {
        Self::with_capacity(separator, MAX_LINE_LEN)
    }

    pub fn with_capacity(separator: u8, capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            spans: Vec::new(),
            capacity,
            separator,
        }
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.spans.clear();
    }

    /// Appends `span` followed by one separator.
    ///
    /// Fails with [`TrimError::OutputLineTooLong`] before touching the buffer
    /// when the result would reach the capacity.
    pub fn append_field(&mut self, span: &[u8], line_number: usize) -> Result<(), TrimError> {
        if self.bytes.len() + span.len() + 1 >= self.capacity {
            return Err(TrimError::OutputLineTooLong { line: line_number });
        }
        let start = self.bytes.len();
        self.bytes.extend_from_slice(span);
        self.spans.push(start..self.bytes.len());
        self.bytes.push(self.separator);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&[u8]> {
        self.spans.get(index).map(|span| &self.bytes[span.clone()])
    }

    pub fn fields(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.spans.iter().map(|span| &self.bytes[span.clone()])
    }

    /// Rendered fields including the trailing separator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rendered fields joined by the separator, without the trailing one.
    pub fn joined(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }
}
