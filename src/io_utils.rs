//! Stream construction for the trimmer.
//!
//! The `-` path routes through stdin/stdout. Rows are written unquoted so
//! rendered fields pass through byte-for-byte with only the output
//! separator between them.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

pub const DEFAULT_INPUT_SEPARATOR: u8 = b'\t';
pub const DEFAULT_OUTPUT_SEPARATOR: u8 = b',';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_dash(p) => Ok(Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        ))),
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Writes one row: `fields` joined by `separator`, terminated by `\n`.
///
/// Fields pass through byte-for-byte; nothing is quoted.
pub fn write_row<'a, W, I>(writer: &mut W, fields: I, separator: u8) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a [u8]>,
{
    for (position, field) in fields.into_iter().enumerate() {
        if position > 0 {
            writer.write_all(&[separator])?;
        }
        writer.write_all(field)?;
    }
    writer.write_all(b"\n")
}
