//! Run driver: resolves the layout from the header line, writes the output
//! header row, then one pivoted row per block.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    block::{Block, BlockReader, Layout},
    cli::{DEFAULT_COMMON, DEFAULT_EXTRA, DEFAULT_VALUE, TrimArgs},
    error::TrimError,
    field_list::FieldList,
    header::Header,
    io_utils::{self, DEFAULT_INPUT_SEPARATOR, DEFAULT_OUTPUT_SEPARATOR, write_row},
    lines::{LineSource, RawLine},
    reconcile::RunSchema,
    tokenizer::LineBuffer,
};

/// Plain-string configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimConfig {
    pub name_column: String,
    pub value_column: String,
    pub common: String,
    pub extra: String,
    pub input_separator: u8,
    pub output_separator: u8,
}

impl TrimConfig {
    /// Default STOQS layout with the given name-column selector.
    pub fn new(name_column: impl Into<String>) -> Self {
        Self {
            name_column: name_column.into(),
            value_column: DEFAULT_VALUE.to_string(),
            common: DEFAULT_COMMON.to_string(),
            extra: DEFAULT_EXTRA.to_string(),
            input_separator: DEFAULT_INPUT_SEPARATOR,
            output_separator: DEFAULT_OUTPUT_SEPARATOR,
        }
    }

    pub fn from_args(args: &TrimArgs) -> Result<Self, TrimError> {
        let name_column = args
            .name_column
            .clone()
            .ok_or(TrimError::MissingNameColumn)?;
        Ok(Self {
            name_column,
            value_column: args.value.clone(),
            common: args.common.clone(),
            extra: args.extra.clone(),
            input_separator: args.separator,
            output_separator: args.output_separator,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimSummary {
    /// Data rows written, one per block.
    pub blocks: usize,
    /// Blocks whose names differed from the run schema.
    pub drifted_blocks: usize,
    pub missing_values: usize,
    pub dropped_names: usize,
    /// Input lines consumed, header included.
    pub lines_read: usize,
}

pub fn execute(args: &TrimArgs) -> Result<()> {
    let config = TrimConfig::from_args(args)?;
    if !args.excess.is_empty() {
        info!("Ignored excess command options: {}", args.excess.join(" "));
    }
    info!(
        "Trimming '{}' -> {} (separator '{}', output '{}')",
        args.input.display(),
        args.output
            .as_ref()
            .map(|p| format!("{p:?}"))
            .unwrap_or_else(|| "stdout".into()),
        crate::printable_delimiter(config.input_separator),
        crate::printable_delimiter(config.output_separator)
    );
    let input = io_utils::open_input(&args.input)?;
    let mut output = io_utils::open_output(args.output.as_deref())?;
    let summary = transform(input, &mut output, &config)
        .with_context(|| format!("Trimming {:?}", args.input))?;
    info!(
        "Wrote {} row(s) from {} line(s); {} block(s) reconciled, {} value(s) missing, {} name(s) dropped",
        summary.blocks,
        summary.lines_read,
        summary.drifted_blocks,
        summary.missing_values,
        summary.dropped_names
    );
    Ok(())
}

/// Pivots `input` into `output`.
///
/// Only complete rows are ever written; a fatal error leaves the rows of
/// earlier blocks in place and nothing of the offending one.
pub fn transform<R, W>(input: R, output: &mut W, config: &TrimConfig) -> Result<TrimSummary, TrimError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let separator = config.output_separator;
    let mut source = LineSource::new(input);
    let mut header_line = RawLine::new();
    if !source.read_into(&mut header_line)? {
        return Err(TrimError::MissingHeader);
    }
    let header = Header::parse(header_line.bytes(), config.input_separator)?;
    debug!("Header has {} field(s)", header.len());
    let name_index = header.resolve(&config.name_column)?;
    let value_index = header.resolve(&config.value_column)?;
    let common = FieldList::compile(&config.common, &header)?;
    let extra = FieldList::compile(&config.extra, &header)?;

    let layout = Layout {
        common,
        name_index,
        value_index,
        input_separator: config.input_separator,
        output_separator: separator,
    };
    let mut blocks = BlockReader::new(source, layout);
    let mut summary = TrimSummary::default();
    let mut row = LineBuffer::new(separator);

    let Some(first) = blocks.next_block()? else {
        info!("No data lines follow the header");
        row.clear();
        for token in blocks.layout().common.tokens() {
            row.append_field(token.as_bytes(), header_line.number())?;
        }
        write_row(output, row.fields(), separator)?;
        output.flush()?;
        summary.lines_read = blocks.lines_read();
        return Ok(summary);
    };

    let schema = RunSchema::freeze(&first);
    let mut extras = LineBuffer::new(separator);
    extra.render_into(first.lead(), config.input_separator, first.first_line(), &mut extras)?;
    render_header(&mut row, &blocks.layout().common, &schema, &extras, header_line.number())?;
    write_row(output, row.fields(), separator)?;

    let mut reconciled = LineBuffer::new(separator);
    let mut block = first;
    loop {
        let values = if schema.matches(&block) {
            block.values()
        } else {
            let outcome = schema.reconcile(&block, &mut reconciled)?;
            summary.drifted_blocks += 1;
            summary.missing_values += outcome.missing;
            summary.dropped_names += outcome.dropped;
            &reconciled
        };
        render_row(&mut row, &block, values)?;
        write_row(output, row.fields(), separator)?;
        summary.blocks += 1;
        match blocks.next_block()? {
            Some(next) => block = next,
            None => break,
        }
    }
    output.flush()?;
    summary.lines_read = blocks.lines_read();
    Ok(summary)
}

fn render_header(
    row: &mut LineBuffer,
    common: &FieldList,
    schema: &RunSchema,
    extras: &LineBuffer,
    line_number: usize,
) -> Result<(), TrimError> {
    row.clear();
    for token in common.tokens() {
        row.append_field(token.as_bytes(), line_number)?;
    }
    for field in schema.names().fields().chain(extras.fields()) {
        row.append_field(field, line_number)?;
    }
    Ok(())
}

fn render_row(row: &mut LineBuffer, block: &Block, values: &LineBuffer) -> Result<(), TrimError> {
    row.clear();
    for field in block.context().fields().chain(values.fields()) {
        row.append_field(field, block.last_line())?;
    }
    Ok(())
}
