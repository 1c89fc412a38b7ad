//! Run schema pinning.
//!
//! The first block's parameter names become the run schema and fix the
//! output columns. Later blocks are projected onto that schema: a missing
//! name yields an empty value and a name the schema lacks is dropped.

use std::borrow::Cow;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{block::Block, error::TrimError, tokenizer::LineBuffer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSchema {
    names: LineBuffer,
}

/// Outcome of projecting one block onto the run schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub missing: usize,
    pub dropped: usize,
}

impl RunSchema {
    pub fn freeze(first: &Block) -> Self {
        let names = first.names().clone();
        let duplicates = names.fields().duplicates().map(lossy).join(", ");
        if !duplicates.is_empty() {
            warn!(
                "Duplicate parameter names [{duplicates}] in lines {}..{}; only the first occurrence is used",
                first.first_line(),
                first.last_line()
            );
        }
        Self { names }
    }

    pub fn names(&self) -> &LineBuffer {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True when `block` discovered exactly the schema's names, in order.
    pub fn matches(&self, block: &Block) -> bool {
        self.names.fields().eq(block.names().fields())
    }

    /// Writes `block`'s values into `out` in schema order.
    pub fn reconcile(
        &self,
        block: &Block,
        out: &mut LineBuffer,
    ) -> Result<Reconciliation, TrimError> {
        let (start, end) = (block.first_line(), block.last_line());
        let found = block.names();
        trace!(
            "Table altered format at line #{start}:\n[{}] became\n[{}]",
            lossy(self.names.joined()),
            lossy(found.joined())
        );
        if found.len() != self.names.len() {
            trace!("length changed!");
        }
        let duplicates = found.fields().duplicates().map(lossy).join(", ");
        if !duplicates.is_empty() {
            debug!("Duplicate parameter names [{duplicates}] in lines {start}..{end}");
        }

        let mut outcome = Reconciliation::default();
        out.clear();
        for name in self.names.fields() {
            let value = match found.fields().position(|candidate| candidate == name) {
                Some(position) => block.values().field(position).unwrap_or_default(),
                None => {
                    warn!("Missing [{}] data in lines {start}..{end}", lossy(name));
                    outcome.missing += 1;
                    &b""[..]
                }
            };
            out.append_field(value, end)?;
        }

        for name in found.fields().unique() {
            if !self.names.fields().contains(&name) {
                trace!("Dropped [{}] data in lines {start}..{end}", lossy(name));
                outcome.dropped += 1;
            }
        }
        Ok(outcome)
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
