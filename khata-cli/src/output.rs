//! CSV sink for extracted records.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use khata_core::TransactionRecord;

/// Write records as CSV (date, description, amount, direction) to `out`,
/// or to stdout when `out` is "-".
pub fn write_csv(records: &[TransactionRecord], date_format: &str, out: &Path) -> Result<()> {
    if out == Path::new("-") {
        write_records(io::stdout().lock(), records, date_format)
    } else {
        let file = fs::File::create(out).with_context(|| format!("create {}", out.display()))?;
        write_records(file, records, date_format)
    }
}

fn write_records<W: Write>(
    writer: W,
    records: &[TransactionRecord],
    date_format: &str,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "description", "amount", "direction"])
        .context("writing csv header")?;
    for record in records {
        wtr.write_record([
            record.date.format(date_format).to_string(),
            record.description.clone(),
            format!("{:.2}", record.amount),
            record.direction.as_str().to_string(),
        ])
        .context("writing csv row")?;
    }
    wtr.flush().context("flushing csv")?;
    Ok(())
}
