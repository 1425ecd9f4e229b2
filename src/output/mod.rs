//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of QR records.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{
    format_date, print_error, print_history, print_info, print_record, print_success,
    print_warning,
};

use crate::cli::OutputFormat;
use crate::storage::QrRecord;
use std::io;

/// Format and print one record according to the specified format.
pub fn format_record(record: &QrRecord, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_record(record),
        OutputFormat::Json => json_format::print_json(record),
        OutputFormat::Csv => csv_format::print_csv(std::slice::from_ref(record)),
    }
}

/// Format and print a record list according to the specified format.
pub fn format_history(records: &[QrRecord], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_history(records),
        OutputFormat::Json => json_format::print_json(records),
        OutputFormat::Csv => csv_format::print_csv(records),
    }
}
