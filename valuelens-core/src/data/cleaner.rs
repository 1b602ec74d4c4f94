//! Raw export → canonical schema.
//!
//! Two stateless transforms, applied to every row without filtering:
//! 1. The identifier in column 0 (`"HPG VN Equity"`) is cut to its first
//!    three characters.
//! 2. Source metric headers are renamed to `PE`, `PB`, `PS`.
//!
//! Everything else passes through, so cleaning a canonical table is a no-op.

use std::path::Path;

use tracing::{info, warn};

use crate::data::csv_io::{read_table, write_table};
use crate::domain::{Metric, Table};
use crate::error::{DataError, SchemaError};

/// Length of a ticker code.
pub const TICKER_LEN: usize = 3;

/// First three characters of an identifier. Shorter input is returned whole.
pub fn truncate_identifier(identifier: &str) -> String {
    identifier.chars().take(TICKER_LEN).collect()
}

/// Canonical name for a header; unknown headers map to themselves.
pub fn canonical_column_name(header: &str) -> &str {
    Metric::ALL
        .iter()
        .find(|m| m.source_column() == header)
        .map(|m| m.column())
        .unwrap_or(header)
}

/// Clean a raw table. Row count is preserved exactly.
pub fn clean(raw: &Table) -> Result<Table, SchemaError> {
    if raw.headers.is_empty() {
        return Err(SchemaError::EmptySchema);
    }

    let headers = raw
        .headers
        .iter()
        .map(|h| canonical_column_name(h).to_string())
        .collect();

    let rows = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut row = row.clone();
            if let Some(id) = row.first_mut() {
                if id.chars().count() < TICKER_LEN {
                    warn!(row = i, identifier = %id, "identifier shorter than a ticker code");
                }
                *id = truncate_identifier(id);
            }
            row
        })
        .collect();

    Ok(Table::new(headers, rows))
}

/// Summary of one `clean_file` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub rows: usize,
    /// `(source, canonical)` header pairs that were renamed.
    pub renamed: Vec<(String, String)>,
}

/// Read a raw export, clean it, and write the canonical file.
pub fn clean_file(input: &Path, output: &Path) -> Result<CleanReport, DataError> {
    let raw = read_table(input)?;
    let cleaned = clean(&raw)?;

    let renamed = raw
        .headers
        .iter()
        .zip(&cleaned.headers)
        .filter(|(before, after)| before != after)
        .map(|(before, after)| (before.clone(), after.clone()))
        .collect();

    write_table(output, &cleaned)?;

    let report = CleanReport {
        rows: cleaned.len(),
        renamed,
    };
    info!(
        input = %input.display(),
        output = %output.display(),
        rows = report.rows,
        renamed = report.renamed.len(),
        "cleaned valuation export"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> Table {
        Table::new(
            vec![
                "PRIMARYSECID".into(),
                "TRADE_DATE".into(),
                "PE_RATIO".into(),
                "PX_TO_BOOK_RATIO".into(),
                "PX_TO_SALES_RATIO".into(),
                "CUR_MKT_CAP".into(),
            ],
            vec![
                vec![
                    "HPG VN Equity".into(),
                    "2024-01-02".into(),
                    "10.5".into(),
                    "1.2".into(),
                    "0.8".into(),
                    "150000".into(),
                ],
                vec![
                    "VNM VN Equity".into(),
                    "2024-01-02".into(),
                    "".into(),
                    "4.1".into(),
                    "2.9".into(),
                    "".into(),
                ],
            ],
        )
    }

    #[test]
    fn truncates_identifier_to_three_chars() {
        assert_eq!(truncate_identifier("HPG VN Equity"), "HPG");
        assert_eq!(truncate_identifier("HPG"), "HPG");
    }

    #[test]
    fn short_identifier_is_kept_whole() {
        assert_eq!(truncate_identifier("AB"), "AB");
        assert_eq!(truncate_identifier(""), "");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_identifier("ĐHG VN Equity"), "ĐHG");
    }

    #[test]
    fn truncation_does_not_recase() {
        assert_eq!(truncate_identifier("hpg vn equity"), "hpg");
    }

    #[test]
    fn renames_source_columns_only() {
        assert_eq!(canonical_column_name("PE_RATIO"), "PE");
        assert_eq!(canonical_column_name("PX_TO_BOOK_RATIO"), "PB");
        assert_eq!(canonical_column_name("PX_TO_SALES_RATIO"), "PS");
        assert_eq!(canonical_column_name("CUR_MKT_CAP"), "CUR_MKT_CAP");
        assert_eq!(canonical_column_name("pe_ratio"), "pe_ratio");
    }

    #[test]
    fn clean_produces_canonical_headers_and_tickers() {
        let cleaned = clean(&raw_table()).unwrap();
        assert_eq!(
            cleaned.headers,
            vec!["PRIMARYSECID", "TRADE_DATE", "PE", "PB", "PS", "CUR_MKT_CAP"]
        );
        assert_eq!(cleaned.rows[0][0], "HPG");
        assert_eq!(cleaned.rows[0][2..5], ["10.5", "1.2", "0.8"]);
        assert_eq!(cleaned.rows[1][0], "VNM");
    }

    #[test]
    fn clean_preserves_row_count_and_passthrough_cells() {
        let raw = raw_table();
        let cleaned = clean(&raw).unwrap();
        assert_eq!(cleaned.len(), raw.len());
        assert_eq!(cleaned.rows[0][5], "150000");
        assert_eq!(cleaned.rows[1][2], "");
    }

    #[test]
    fn clean_keeps_duplicate_rows() {
        let mut raw = raw_table();
        let dup = raw.rows[0].clone();
        raw.rows.push(dup);
        let cleaned = clean(&raw).unwrap();
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned.rows[0], cleaned.rows[2]);
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean(&raw_table()).unwrap();
        let twice = clean(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_rejects_empty_schema() {
        let err = clean(&Table::default()).unwrap_err();
        assert_eq!(err, SchemaError::EmptySchema);
    }

    #[test]
    fn clean_accepts_headers_without_rows() {
        let raw = Table::new(vec!["PRIMARYSECID".into(), "PE_RATIO".into()], vec![]);
        let cleaned = clean(&raw).unwrap();
        assert!(cleaned.is_empty());
        assert_eq!(cleaned.headers, vec!["PRIMARYSECID", "PE"]);
    }
}
