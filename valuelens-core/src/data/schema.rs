//! Canonical file schema contract.
//!
//! - Column 0: ticker code (header name is whatever the export used)
//! - `TRADE_DATE`: calendar date; required to type a snapshot, optional for
//!   first-in-file lookups
//! - `PE`, `PB`, `PS`: nullable floats, each optional in the file
//! - Any other column: passed through, ignored by lookups and charts

use crate::domain::{Metric, Table};
use crate::error::SchemaError;

/// Name of the trade date column, identical in raw and canonical files.
pub const TRADE_DATE: &str = "TRADE_DATE";

/// Column positions resolved from a canonical header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSchema {
    /// Header of the first column, which holds the ticker.
    pub ticker_column: String,
    pub date_index: Option<usize>,
    /// Metric columns present in the file, with their positions.
    pub metric_indices: Vec<(Metric, usize)>,
}

impl CanonicalSchema {
    /// Resolve column positions, failing only if there are no columns at all.
    pub fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let ticker_column = headers.first().ok_or(SchemaError::EmptySchema)?.clone();
        let date_index = headers.iter().position(|h| h == TRADE_DATE);
        let metric_indices = Metric::ALL
            .iter()
            .filter_map(|m| headers.iter().position(|h| h == m.column()).map(|i| (*m, i)))
            .collect();

        Ok(Self {
            ticker_column,
            date_index,
            metric_indices,
        })
    }

    pub fn from_table(table: &Table) -> Result<Self, SchemaError> {
        Self::resolve(&table.headers)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.metric_indices.iter().map(|(m, _)| *m).collect()
    }

    /// Position of the date column, or `MissingColumn` when absent.
    pub fn require_date(&self) -> Result<usize, SchemaError> {
        self.date_index
            .ok_or_else(|| SchemaError::MissingColumn(TRADE_DATE.to_string()))
    }

    /// Position of a metric column, `None` when the file lacks it.
    pub fn metric_index(&self, metric: Metric) -> Option<usize> {
        self.metric_indices
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, i)| *i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_all_columns() {
        let s = CanonicalSchema::resolve(&headers(&[
            "PRIMARYSECID",
            "TRADE_DATE",
            "PE",
            "PB",
            "PS",
        ]))
        .unwrap();
        assert_eq!(s.ticker_column, "PRIMARYSECID");
        assert_eq!(s.date_index, Some(1));
        assert_eq!(s.require_date(), Ok(1));
        assert_eq!(
            s.metric_indices,
            vec![(Metric::Pe, 2), (Metric::Pb, 3), (Metric::Ps, 4)]
        );
    }

    #[test]
    fn metric_columns_are_optional() {
        let s = CanonicalSchema::resolve(&headers(&["ticker", "PB", "TRADE_DATE"])).unwrap();
        assert_eq!(s.metrics(), vec![Metric::Pb]);
        assert_eq!(s.metric_index(Metric::Pe), None);
        assert_eq!(s.metric_index(Metric::Pb), Some(1));
    }

    #[test]
    fn missing_date_column_resolves_but_is_not_required_yet() {
        let s = CanonicalSchema::resolve(&headers(&["ticker", "PE"])).unwrap();
        assert_eq!(s.date_index, None);
        assert_eq!(
            s.require_date(),
            Err(SchemaError::MissingColumn("TRADE_DATE".into()))
        );
    }

    #[test]
    fn empty_headers_fail() {
        let err = CanonicalSchema::resolve(&[]).unwrap_err();
        assert_eq!(err, SchemaError::EmptySchema);
    }
}
