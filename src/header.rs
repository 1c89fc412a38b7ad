//! Header parsing and column selector resolution.
//!
//! A selector is either a column number (`0..n`) or a case-insensitive
//! suffix of a header name. The leftmost matching column wins.

use log::info;

use crate::{MAX_FIELDS, error::TrimError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<Vec<u8>>,
}

impl Header {
    /// Splits the header line on every `delimiter`.
    pub fn parse(line: &[u8], delimiter: u8) -> Result<Self, TrimError> {
        let mut names = Vec::new();
        if !line.is_empty() {
            for name in line.split(|&b| b == delimiter) {
                if names.len() >= MAX_FIELDS {
                    return Err(TrimError::TooManyHeaderFields);
                }
                names.push(name.to_vec());
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&[u8]> {
        self.names.get(index).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.names.iter().map(Vec::as_slice)
    }

    /// Resolves `selector` to a column index.
    pub fn resolve(&self, selector: &str) -> Result<usize, TrimError> {
        if selector.is_empty() {
            return Err(TrimError::EmptySelector);
        }
        if selector.bytes().all(|b| b.is_ascii_digit()) {
            return selector
                .parse::<usize>()
                .ok()
                .filter(|&index| index < self.names.len())
                .ok_or_else(|| TrimError::FieldOutOfRange {
                    index: selector.to_string(),
                    last: self.names.len().saturating_sub(1),
                });
        }
        let suffix = selector.as_bytes();
        let index = self
            .names
            .iter()
            .position(|name| ends_with_ignore_case(name, suffix))
            .ok_or_else(|| TrimError::NoSuchField {
                selector: selector.to_string(),
            })?;
        info!("{selector}[{index}]");
        Ok(index)
    }
}

fn ends_with_ignore_case(name: &[u8], suffix: &[u8]) -> bool {
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
