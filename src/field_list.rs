//! Comma-separated field lists resolved against a header.

use itertools::Itertools;
use log::debug;

use crate::{
    MAX_FIELDS,
    error::TrimError,
    header::Header,
    tokenizer::{LineBuffer, field_or_missing},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Selector exactly as written in the list.
    pub token: String,
    pub index: usize,
}

/// Ordered column selection; the order is the output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    entries: Vec<FieldEntry>,
}

impl FieldList {
    /// Resolves every non-empty comma-separated token of `list` against `header`.
    pub fn compile(list: &str, header: &Header) -> Result<Self, TrimError> {
        let mut entries = Vec::new();
        for token in list.split(',').filter(|token| !token.is_empty()) {
            if entries.len() >= MAX_FIELDS {
                return Err(TrimError::TooManyOutputFields);
            }
            entries.push(FieldEntry {
                token: token.to_string(),
                index: header.resolve(token)?,
            });
        }
        let compiled = Self { entries };
        if !compiled.is_empty() {
            debug!("{}", compiled.indices().join(","));
        }
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.index)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.token.as_str())
    }

    /// Copies the selected fields of `line` into `out`, in list order.
    pub fn render_into(
        &self,
        line: &[u8],
        delimiter: u8,
        line_number: usize,
        out: &mut LineBuffer,
    ) -> Result<(), TrimError> {
        out.clear();
        for index in self.indices() {
            let span = field_or_missing(line, index, delimiter, line_number)?;
            out.append_field(span, line_number)?;
        }
        Ok(())
    }
}
