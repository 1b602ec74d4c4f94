//! Dataset — an immutable snapshot of the canonical file.
//!
//! A snapshot is produced by `ValuationRepository::load()` and passed
//! explicitly to every query. Records keep file order; nothing is sorted,
//! deduplicated or cached here.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::parse::{parse_date, parse_metric};
use crate::data::schema::CanonicalSchema;
use crate::domain::{CanonicalRecord, Metric, SnapshotHash, Table};
use crate::error::{DataError, LookupError};

/// Which row answers a lookup when a ticker has several dated rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First matching row in file order, regardless of date.
    #[default]
    FirstInFile,
    /// Row with the greatest trade date; earliest file position wins ties.
    LatestByDate,
}

/// One requested metric and its value on the matched row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub metric: Metric,
    pub value: Option<f64>,
}

/// Result of a point lookup, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub ticker: String,
    /// Date of the matched row; `None` when the file has no usable date for it.
    pub trade_date: Option<chrono::NaiveDate>,
    pub values: Vec<MetricValue>,
}

impl Valuation {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.metric == metric)
            .and_then(|v| v.value)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.values.iter().map(|v| v.metric).collect()
    }
}

/// Immutable canonical snapshot.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    ticker_column: String,
    metrics: Vec<Metric>,
    records: Vec<CanonicalRecord>,
    hash: SnapshotHash,
}

impl Dataset {
    /// Type a canonical table. Row numbers in errors are 1-based data rows.
    pub fn from_table(source: &Path, table: &Table, hash: SnapshotHash) -> Result<Self, DataError> {
        let schema = CanonicalSchema::from_table(table)?;
        let date_index = schema.require_date()?;

        let mut records = Vec::with_capacity(table.len());
        for (i, row) in table.rows.iter().enumerate() {
            let row_no = i + 1;
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

            let date_cell = cell(date_index);
            let trade_date = parse_date(date_cell).ok_or_else(|| DataError::InvalidDate {
                row: row_no,
                value: date_cell.to_string(),
            })?;

            let mut record = CanonicalRecord {
                ticker: cell(0).to_string(),
                trade_date,
                pe: None,
                pb: None,
                ps: None,
            };
            for &(metric, idx) in &schema.metric_indices {
                let value = parse_metric(cell(idx)).map_err(|_| DataError::InvalidNumber {
                    row: row_no,
                    column: metric.column().to_string(),
                    value: cell(idx).to_string(),
                })?;
                record.set_value(metric, value);
            }
            records.push(record);
        }

        debug!(
            source = %source.display(),
            records = records.len(),
            metrics = ?schema.metrics(),
            "typed canonical snapshot"
        );

        Ok(Self {
            source: source.to_path_buf(),
            ticker_column: schema.ticker_column.clone(),
            metrics: schema.metrics(),
            records,
            hash,
        })
    }

    /// Build a snapshot directly from records, e.g. for tests.
    pub fn from_records(records: Vec<CanonicalRecord>) -> Self {
        let hash = SnapshotHash::of_bytes(format!("{records:?}").as_bytes());
        Self {
            source: PathBuf::new(),
            ticker_column: "ticker".to_string(),
            metrics: Metric::ALL.to_vec(),
            records,
            hash,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn ticker_column(&self) -> &str {
        &self.ticker_column
    }

    /// Metric columns present in the file.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn hash(&self) -> &SnapshotHash {
        &self.hash
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique tickers.
    pub fn tickers(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.ticker.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `(min, max)` trade-date year, or `None` for an empty snapshot.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let years = self.records.iter().map(|r| r.trade_date.year());
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// Rows for a ticker (uppercased before comparing), in file order.
    pub fn rows_for<'a>(&'a self, ticker: &str) -> impl Iterator<Item = &'a CanonicalRecord> + 'a {
        let wanted = ticker.to_uppercase();
        self.records.iter().filter(move |r| r.ticker == wanted)
    }

    /// Point lookup of metric values for a ticker.
    ///
    /// Checks run in this order: ticker presence, then metric validity.
    /// An invalid metric name fails the whole call; a valid metric whose
    /// column is absent from the file is left out of the result.
    pub fn lookup<S: AsRef<str>>(
        &self,
        ticker: &str,
        metrics: &[S],
        policy: MatchPolicy,
    ) -> Result<Valuation, LookupError> {
        let ticker = ticker.to_uppercase();
        let row = self
            .select_row(&ticker, policy)
            .ok_or_else(|| LookupError::TickerNotFound(ticker.clone()))?;

        let requested = Metric::parse_list(metrics).map_err(LookupError::InvalidMetric)?;

        let values = requested
            .into_iter()
            .filter(|m| self.metrics.contains(m))
            .map(|metric| MetricValue {
                metric,
                value: row.value(metric),
            })
            .collect();

        Ok(Valuation {
            ticker,
            trade_date: Some(row.trade_date),
            values,
        })
    }

    fn select_row(&self, ticker: &str, policy: MatchPolicy) -> Option<&CanonicalRecord> {
        let mut rows = self.records.iter().filter(|r| r.ticker == ticker);
        match policy {
            MatchPolicy::FirstInFile => rows.next(),
            MatchPolicy::LatestByDate => rows.fold(None, |best: Option<&CanonicalRecord>, r| {
                match best {
                    Some(b) if b.trade_date >= r.trade_date => Some(b),
                    _ => Some(r),
                }
            }),
        }
    }
}
