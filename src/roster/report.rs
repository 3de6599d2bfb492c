use std::{io::Write, path::Path};

use tracing::info;

use super::person::PersonRecord;

/// Default report file name.
pub const DEFAULT_REPORT_PATH: &str = "结果.csv";

pub const REPORT_HEADERS: [&str; 6] = ["姓名", "身份证号", "出生年月", "年龄", "性别", "城市"];

/// Writes the header row and one row per record, keeping the given order.
/// The header is written even when there are no records. Rows end in CRLF.
pub fn write_report<W: Write>(writer: W, records: &[PersonRecord]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(REPORT_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report_to_path<P: AsRef<Path>>(path: P, records: &[PersonRecord]) -> csv::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report(file, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote report");
    Ok(())
}
