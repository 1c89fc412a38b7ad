//! Grouping of input lines into blocks of identical context.
//!
//! A block is a maximal run of non-blank lines whose common-context fields
//! are byte-identical. Each line of a block contributes one (name, value)
//! pair. The line that ends a block is carried over and opens the next one,
//! so the reader never looks further ahead than that single line.

use std::{io::BufRead, mem};

use log::trace;

use crate::{
    error::TrimError,
    field_list::FieldList,
    lines::{LineSource, RawLine},
    tokenizer::{LineBuffer, field_or_missing},
};

/// Column layout shared by every block of a run.
#[derive(Debug, Clone)]
pub struct Layout {
    pub common: FieldList,
    pub name_index: usize,
    pub value_index: usize,
    pub input_separator: u8,
    pub output_separator: u8,
}

#[derive(Debug, Clone)]
pub struct Block {
    context: LineBuffer,
    names: LineBuffer,
    values: LineBuffer,
    lead: Vec<u8>,
    first_line: usize,
    last_line: usize,
}

impl Block {
    fn open(layout: &Layout, line: &RawLine, context: LineBuffer) -> Result<Self, TrimError> {
        let mut block = Self {
            context,
            names: LineBuffer::new(layout.output_separator),
            values: LineBuffer::new(layout.output_separator),
            lead: line.bytes().to_vec(),
            first_line: line.number(),
            last_line: line.number(),
        };
        block.push_pair(layout, line)?;
        Ok(block)
    }

    fn push_pair(&mut self, layout: &Layout, line: &RawLine) -> Result<(), TrimError> {
        let number = line.number();
        let separator = layout.input_separator;
        let value = field_or_missing(line.bytes(), layout.value_index, separator, number)?;
        let name = field_or_missing(line.bytes(), layout.name_index, separator, number)?;
        self.values.append_field(value, number)?;
        self.names.append_field(name, number)?;
        self.last_line = number;
        Ok(())
    }

    /// Rendered common-context fields; also the block's grouping key.
    pub fn context(&self) -> &LineBuffer {
        &self.context
    }

    /// Parameter names in discovery order, one per contributing line.
    pub fn names(&self) -> &LineBuffer {
        &self.names
    }

    /// Values in discovery order, parallel to [`Block::names`].
    pub fn values(&self) -> &LineBuffer {
        &self.values
    }

    /// The raw line that opened this block.
    pub fn lead(&self) -> &[u8] {
        &self.lead
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn last_line(&self) -> usize {
        self.last_line
    }
}

/// Streams [`Block`]s out of a line source.
pub struct BlockReader<R> {
    source: LineSource<R>,
    layout: Layout,
    carry: RawLine,
    has_carry: bool,
    scratch: RawLine,
    key: LineBuffer,
}

impl<R: BufRead> BlockReader<R> {
    /// `source` must already be positioned past the header line.
    pub fn new(source: LineSource<R>, layout: Layout) -> Self {
        let key = LineBuffer::new(layout.output_separator);
        Self {
            source,
            layout,
            carry: RawLine::new(),
            has_carry: false,
            scratch: RawLine::new(),
            key,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn lines_read(&self) -> usize {
        self.source.line_number()
    }

    /// Reads the next complete block, or `None` once input is exhausted.
    pub fn next_block(&mut self) -> Result<Option<Block>, TrimError> {
        if !self.has_carry {
            loop {
                if !self.source.read_into(&mut self.carry)? {
                    return Ok(None);
                }
                if !self.carry.is_blank() {
                    break;
                }
            }
        }
        self.has_carry = false;

        let mut context = LineBuffer::new(self.layout.output_separator);
        render_key(&self.layout, &self.carry, &mut context)?;
        let mut block = Block::open(&self.layout, &self.carry, context)?;

        while self.source.read_into(&mut self.scratch)? {
            if self.scratch.is_blank() {
                continue;
            }
            render_key(&self.layout, &self.scratch, &mut self.key)?;
            if !self.key.fields().eq(block.context().fields()) {
                trace!(
                    "Block of lines {}..{} ended by line #{}",
                    block.first_line(),
                    block.last_line(),
                    self.scratch.number()
                );
                mem::swap(&mut self.carry, &mut self.scratch);
                self.has_carry = true;
                break;
            }
            block.push_pair(&self.layout, &self.scratch)?;
        }
        Ok(Some(block))
    }
}

fn render_key(layout: &Layout, line: &RawLine, out: &mut LineBuffer) -> Result<(), TrimError> {
    layout
        .common
        .render_into(line.bytes(), layout.input_separator, line.number(), out)
}
