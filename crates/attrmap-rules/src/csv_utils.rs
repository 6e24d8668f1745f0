//! Shared CSV utilities for reading rule tables.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::RuleError;

/// One data record keyed by normalized header name.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    /// 1-based line of the record in the source.
    pub line: usize,
    pub cells: BTreeMap<String, String>,
}

impl CsvRow {
    /// Returns the first present cell among `keys`, trimmed.
    ///
    /// `None` means none of the columns exist in the table.
    pub fn get_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.cells.get(*key).cloned())
    }

    /// Like [`Self::get_any`], with absent columns read as empty.
    pub fn get_field(&self, keys: &[&str]) -> String {
        self.get_any(keys).unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(String::is_empty)
    }
}

/// Normalizes a header: strips a UTF-8 BOM, trims, lowercases.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_lowercase()
}

/// Reads delimited text into header-keyed rows.
///
/// Records may be shorter than the header row; missing trailing cells are
/// simply absent from the row map. `source` only labels errors.
pub fn read_csv_rows(
    contents: &[u8],
    delimiter: u8,
    source: &Path,
) -> Result<Vec<CsvRow>, RuleError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(contents);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| RuleError::csv(source, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(RuleError::MissingHeaders {
            path: source.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| RuleError::csv(source, &e))?;
        let line = record
            .position()
            .map_or(idx + 2, |position| position.line() as usize);
        let mut cells = BTreeMap::new();
        for (key, value) in headers.iter().zip(record.iter()) {
            if key.is_empty() {
                continue;
            }
            cells
                .entry(key.clone())
                .or_insert_with(|| value.trim().to_string());
        }
        rows.push(CsvRow { line, cells });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_trims_headers() {
        let data = "\u{feff}Pattern_Type ; prom_attribute\nexact;Колір\n";
        let rows = read_csv_rows(data.as_bytes(), b';', Path::new("t.csv")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_field(&["pattern_type"]), "exact");
        assert_eq!(rows[0].get_field(&["prom_attribute"]), "Колір");
        assert_eq!(rows[0].line, 2);
    }

    #[test]
    fn short_records_leave_cells_absent() {
        let data = "pattern_type;prom_attribute;priority\nexact;Колір\n";
        let rows = read_csv_rows(data.as_bytes(), b';', Path::new("t.csv")).unwrap();
        assert_eq!(rows[0].get_any(&["priority"]), None);
    }

    #[test]
    fn empty_input_has_no_headers() {
        let err = read_csv_rows(b"", b';', Path::new("empty.csv")).unwrap_err();
        assert!(matches!(err, RuleError::MissingHeaders { .. }));
    }
}
