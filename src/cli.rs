use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_COMMON: &str = "timevalue,depth,geom.x,geom.y";
pub const DEFAULT_VALUE: &str = "datavalue";
pub const DEFAULT_EXTRA: &str = "platform__name";

const AFTER_HELP: &str = "\
Columns or fields are identified by index (0..n) or by a suffix of the column name.

Examples:
  stoqs-trim name <stoqsHuge.tsv >trimmed.csv
  stoqs-trim standard_name --separator=, <stoqsHuge.csv >trimmed.csv
  stoqs-trim name --separator=, --output-separator='\\t' <stoqsHuge.csv >trimmed.tsv";

/// Trim a TSV (or CSV) file exported by STOQS so each output line holds every
/// parameter of one sample.
#[derive(Debug, Parser)]
#[command(
    version,
    long_about = None,
    after_help = AFTER_HELP,
    infer_long_args = true
)]
pub struct Cli {
    #[command(flatten)]
    pub trim: TrimArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TrimArgs {
    /// Column holding the names of the data values
    #[arg(value_name = "NAME_COLUMN")]
    pub name_column: Option<String>,
    /// Ignored trailing arguments
    #[arg(hide = true)]
    pub excess: Vec<String>,
    /// Input column separator (C escapes such as '\t' or '\x2c' are expanded)
    #[arg(long, default_value = "\\t", value_parser = parse_separator)]
    pub separator: u8,
    /// Output column separator
    #[arg(
        long = "output-separator",
        alias = "outputSeparator",
        default_value = ",",
        value_parser = parse_separator
    )]
    pub output_separator: u8,
    /// Enable debug messages, optionally at a numeric level
    #[arg(
        long,
        value_name = "LEVEL",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = 0,
        default_missing_value = "1"
    )]
    pub debug: u8,
    /// Common context columns
    #[arg(long, env = "common", default_value = DEFAULT_COMMON)]
    pub common: String,
    /// Column containing the data value
    #[arg(long, env = "value", default_value = DEFAULT_VALUE)]
    pub value: String,
    /// Extra unchanging columns appended to the header row
    #[arg(long, env = "extra", default_value = DEFAULT_EXTRA)]
    pub extra: String,
    /// Input file (stdin if omitted or '-')
    #[arg(short = 'i', long = "input", default_value = "-")]
    pub input: PathBuf,
    /// Output file (stdout if omitted or '-')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn parse_separator(value: &str) -> Result<u8, String> {
    match unescape(value)?.as_slice() {
        [byte] => Ok(*byte),
        _ => Err("Column separator must be a single character".to_string()),
    }
}

/// Expands C escape sequences: `\a \b \e \f \n \r \t \v`, `\0NNN` (octal),
/// `\1`..`\9` (decimal) and `\xHH` (hex). Unknown escapes keep the escaped
/// character; a trailing backslash is kept as is.
pub fn unescape(value: &str) -> Result<Vec<u8>, String> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut cursor = 0;
    while cursor < bytes.len() {
        let byte = bytes[cursor];
        cursor += 1;
        if byte != b'\\' || cursor == bytes.len() {
            out.push(byte);
            continue;
        }
        let escaped = bytes[cursor];
        cursor += 1;
        let expanded = match escaped {
            b'a' => 0x07,
            b'b' => 0x08,
            b'e' => 0x1b,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'0' => numeric_escape(bytes, &mut cursor, 8)?,
            b'1'..=b'9' => {
                cursor -= 1;
                numeric_escape(bytes, &mut cursor, 10)?
            }
            b'x' => numeric_escape(bytes, &mut cursor, 16)?,
            other => other,
        };
        out.push(expanded);
    }
    Ok(out)
}

fn numeric_escape(bytes: &[u8], cursor: &mut usize, radix: u32) -> Result<u8, String> {
    let mut value: u32 = 0;
    while let Some(digit) = bytes
        .get(*cursor)
        .and_then(|&b| (b as char).to_digit(radix))
    {
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .filter(|&v| v <= u32::from(u8::MAX))
            .ok_or_else(|| "Escape sequence value exceeds 255".to_string())?;
        *cursor += 1;
    }
    Ok(value as u8)
}
