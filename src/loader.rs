use crate::error::DashboardError;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// The dataset exactly as read: header labels plus string records.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }
}

pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<RawTable, DashboardError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading dataset");
    let file = std::fs::File::open(path)?;
    read_raw(file)
}

/// Read a header row plus records from any reader. Records may be ragged;
/// short rows read as blank cells during normalization.
pub fn read_raw<R: Read>(reader: R) -> Result<RawTable, DashboardError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(result?);
    }
    debug!(columns = headers.len(), rows = rows.len(), "raw table read");
    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_headers_and_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refArea,Town, Extra ").unwrap();
        writeln!(file, "http://x.org/Akkar,Halba,1").unwrap();
        writeln!(file, "http://x.org/Zahle,Zahle,0").unwrap();
        file.flush().unwrap();

        let table = load_raw(file.path()).unwrap();
        assert_eq!(table.headers, vec!["refArea", "Town", "Extra"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_index("Town"), Some(1));
        assert_eq!(table.rows[1].get(1), Some("Zahle"));
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let data = "\u{feff}refArea,Town\nA/Akkar,Halba\n";
        let table = read_raw(data.as_bytes()).unwrap();
        assert_eq!(table.column_index("refArea"), Some(0));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_raw(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
