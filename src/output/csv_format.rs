//! CSV output formatting.
//!
//! Image payloads are left out; use `download` to get the PNG.

use crate::storage::QrRecord;
use std::io::{self, Write};

/// Print records in CSV format.
pub fn print_csv(records: &[QrRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    write_csv(stdout.lock(), records)
}

fn write_csv<W: Write>(writer: W, records: &[QrRecord]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["id", "short_id", "original_url", "created_at"])?;

    for record in records {
        wtr.write_record([
            record.id.as_str(),
            record.short_id.as_str(),
            record.original_url.as_str(),
            record.created_at.to_rfc3339().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
