// 💾 Export - Write cleaned tables as CSV
//
// Headers are written explicitly so an empty table still produces a file
// with the expected schema.

use crate::error::Result;
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn write_rows<W: Write, T: Serialize>(
    writer: &mut Writer<W>,
    headers: &[&str],
    rows: &[T],
) -> Result<()> {
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows to any sink
pub fn write_table_to<W: Write, T: Serialize>(sink: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    write_rows(&mut writer, headers, rows)
}

/// Write rows to a CSV file, creating the parent directory if needed
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    write_rows(&mut writer, headers, rows)?;

    info!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: String,
        label: String,
    }

    #[test]
    fn test_empty_table_still_has_headers() {
        let mut out = Vec::new();
        write_table_to::<_, Row>(&mut out, &["id", "label"], &[]).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "id,label\n");
    }

    #[test]
    fn test_rows_written_in_order() {
        let rows = vec![
            Row { id: "1".to_string(), label: "Tax".to_string() },
            Row { id: "2".to_string(), label: "Real Estate".to_string() },
        ];
        let mut out = Vec::new();
        write_table_to(&mut out, &["id", "label"], &rows).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,label\n1,Tax\n2,Real Estate\n"
        );
    }
}
