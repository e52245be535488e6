//! Loads price index series from CSV files.
//!
//! Expected layout: a header row `period,value` followed by one observation
//! per row, e.g.
//!
//! ```csv
//! period,value
//! 2020,105.8
//! 2021,110.1
//! 2023-Q4,121.6
//! ```

use super::index_errors::IndexError;
use super::index_model::PriceIndexRecord;
use super::index_table::PriceIndexTable;
use csv::{ReaderBuilder, Trim};
use log::debug;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Reads a CSV file into a validated [`PriceIndexTable`].
pub fn load_price_index(path: impl AsRef<Path>) -> Result<PriceIndexTable, IndexError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| IndexError::LoadError(format!("{}: {}", path.display(), e)))?;
    let table = parse_price_index(file)?;
    debug!("Loaded {} index records from {}", table.len(), path.display());
    Ok(table)
}

/// Parses CSV content from any reader into a validated [`PriceIndexTable`].
pub fn parse_price_index<R: Read>(reader: R) -> Result<PriceIndexTable, IndexError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        // Header occupies line 1
        let line = idx + 2;
        let row = row.map_err(|e| IndexError::LoadError(format!("line {}: {}", line, e)))?;
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let period = row
            .get(0)
            .ok_or_else(|| IndexError::LoadError(format!("line {}: missing period column", line)))?
            .parse()
            .map_err(|e| IndexError::LoadError(format!("line {}: {}", line, e)))?;

        let raw_value = row
            .get(1)
            .ok_or_else(|| IndexError::LoadError(format!("line {}: missing value column", line)))?;
        let value = Decimal::from_str(raw_value).map_err(|_| {
            IndexError::LoadError(format!("line {}: invalid index value '{}'", line, raw_value))
        })?;

        records.push(PriceIndexRecord { period, value });
    }

    PriceIndexTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_csv_series() {
        let csv = "period,value\n2020,105.8\n2021,110.1\n2023-Q4,121.6\n";
        let table = parse_price_index(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.latest().unwrap().value, dec!(121.6));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let csv = "period,value\n2020,105.8\n\n2021,110.1\n";
        let table = parse_price_index(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_reports_line_of_bad_value() {
        let csv = "period,value\n2020,105.8\n2021,abc\n";
        let err = parse_price_index(csv.as_bytes()).unwrap_err();
        match err {
            IndexError::LoadError(msg) => assert!(msg.contains("line 3"), "message: {}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_reports_bad_period() {
        let csv = "period,value\n20-21,105.8\n";
        let err = parse_price_index(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::LoadError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "period,value").unwrap();
        writeln!(file, "2020,105.8").unwrap();
        writeln!(file, "2021-Q1,108.3").unwrap();
        file.flush().unwrap();

        let table = load_price_index(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let err = load_price_index("/nonexistent/cpi.csv").unwrap_err();
        assert!(matches!(err, IndexError::LoadError(_)));
    }
}
