pub mod block;
pub mod cli;
pub mod error;
pub mod field_list;
pub mod header;
pub mod io_utils;
pub mod lines;
pub mod reconcile;
pub mod tokenizer;
pub mod trim;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use log::LevelFilter;

use crate::{cli::Cli, error::TrimError};

pub use error::exit_status;

/// Most columns a header or field list may hold.
pub const MAX_FIELDS: usize = 99;
/// Longest input or output line, in bytes.
pub const MAX_LINE_LEN: usize = 2000;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging(debug: u8) {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("stoqs_trim", level_for_debug(debug));
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Maps the `--debug` level onto a log filter.
pub fn level_for_debug(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 | 3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(()),
                _ => Err(TrimError::InvalidArguments.into()),
            };
        }
    };
    init_logging(cli.trim.debug);
    if cli.trim.name_column.is_none() {
        Cli::command().print_help()?;
        println!();
        return Err(TrimError::MissingNameColumn.into());
    }
    trim::execute(&cli.trim)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        other if other.is_ascii_graphic() || other == b' ' => (other as char).to_string(),
        other => format!("\\x{other:02x}"),
    }
}
