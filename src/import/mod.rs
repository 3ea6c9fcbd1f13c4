//! Bulk CSV import into canonical products.
//!
//! Spreadsheet exports use their own headers. Those are first mapped onto
//! catalog column names through [`IMPORT_HEADER_ALIASES`], then each record
//! goes through the regular normalizer. Records with neither a series nor a
//! part number are dropped.

use crate::error::ImportError;
use crate::normalize::{Column, Columns, RawRow, fold_header, normalize_all};
use crate::product::Product;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Spreadsheet header spellings (folded) and the catalog column they feed.
/// Headers not listed here are passed through for the normalizer's own
/// alias lookup.
pub const IMPORT_HEADER_ALIASES: &[(&str, &str)] = &[
    ("model", "part_number"),
    ("modelnumber", "part_number"),
    ("catalognumber", "part_number"),
    ("catalog", "part_number"),
    ("productline", "series"),
    ("productfamily", "series"),
    ("name", "series"),
    ("actuation", "on_off"),
    ("contactaction", "on_off"),
    ("enclosurerating", "ip"),
    ("protection", "ip"),
    ("cable", "connection_type"),
    ("wiring", "connection_type"),
    ("pedalguard", "guard"),
    ("markets", "applications"),
    ("rating", "duty"),
];

fn canonical_header(header: &str) -> String {
    let folded = fold_header(header);
    IMPORT_HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, column)| column.to_string())
        .unwrap_or_else(|| header.trim().to_string())
}

/// Products read from one import plus how many records were skipped.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub products: Vec<Product>,
    pub dropped: usize,
}

/// Reads CSV records from `reader` and normalizes them.
pub fn import_csv<R: Read>(reader: R) -> Result<ImportReport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(canonical_header).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeader);
    }

    let mut rows = Vec::new();
    let mut dropped = 0;
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, cell)| !header.is_empty() && !cell.is_empty())
            .map(|(header, cell)| (header.as_str(), cell))
            .collect();

        let columns = Columns::resolve(&row);
        if columns.text(Column::Series).is_none() && columns.text(Column::PartNumber).is_none() {
            debug!(record = line + 1, "dropping record without series or part number");
            dropped += 1;
            continue;
        }
        rows.push(row);
    }

    let products = normalize_all(&rows);
    info!(imported = products.len(), dropped, "csv import finished");
    Ok(ImportReport { products, dropped })
}

/// Opens `path` and imports it as CSV.
pub fn import_file(path: impl AsRef<Path>) -> Result<ImportReport, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), "importing csv");
    import_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_headers_map_onto_columns() {
        assert_eq!(canonical_header("Model #"), "part_number");
        assert_eq!(canonical_header("Product Line"), "series");
        assert_eq!(canonical_header(" Duty "), "Duty");
    }

    #[test]
    fn header_only_input_yields_nothing() {
        let report = import_csv("Series,Duty\n".as_bytes()).unwrap();
        assert!(report.products.is_empty());
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = import_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingHeader));
    }
}
