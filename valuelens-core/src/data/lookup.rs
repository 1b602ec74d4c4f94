//! Point lookups straight from an untyped canonical table.
//!
//! Only the matched ticker's rows are read, and of those only the requested
//! metric cells, so a malformed row for another ticker cannot fail the
//! lookup. `TRADE_DATE` is required only by `MatchPolicy::LatestByDate`.

use chrono::NaiveDate;

use crate::data::dataset::{MatchPolicy, MetricValue, Valuation};
use crate::data::parse::{parse_date, parse_metric};
use crate::data::schema::CanonicalSchema;
use crate::domain::{Metric, Table};
use crate::error::{DataError, LookupError};

/// A candidate row: 1-based data row number and its cells.
type Candidate<'a> = (usize, &'a [String]);

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Look up `metrics` for `ticker` in a canonical table.
///
/// Same contract as `Dataset::lookup`: ticker presence is checked first,
/// then metric validity, and absent metric columns are left out.
pub fn lookup_table<S: AsRef<str>>(
    table: &Table,
    ticker: &str,
    metrics: &[S],
    policy: MatchPolicy,
) -> Result<Valuation, LookupError> {
    let schema = CanonicalSchema::from_table(table).map_err(DataError::from)?;
    let ticker = ticker.to_uppercase();

    let candidates: Vec<Candidate<'_>> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| cell(row, 0) == ticker)
        .map(|(i, row)| (i + 1, row.as_slice()))
        .collect();
    if candidates.is_empty() {
        return Err(LookupError::TickerNotFound(ticker));
    }

    let requested = Metric::parse_list(metrics).map_err(LookupError::InvalidMetric)?;

    let (row_no, row, trade_date) = match policy {
        MatchPolicy::FirstInFile => {
            let (row_no, row) = candidates[0];
            let date = schema.date_index.and_then(|idx| parse_date(cell(row, idx)));
            (row_no, row, date)
        }
        MatchPolicy::LatestByDate => {
            let (row_no, row, date) = latest_row(&schema, &candidates)?
                .ok_or_else(|| LookupError::TickerNotFound(ticker.clone()))?;
            (row_no, row, Some(date))
        }
    };

    let mut values = Vec::with_capacity(requested.len());
    for metric in requested {
        let Some(idx) = schema.metric_index(metric) else {
            continue;
        };
        let raw = cell(row, idx);
        let value = parse_metric(raw).map_err(|_| DataError::InvalidNumber {
            row: row_no,
            column: metric.column().to_string(),
            value: raw.to_string(),
        })?;
        values.push(MetricValue { metric, value });
    }

    Ok(Valuation {
        ticker,
        trade_date,
        values,
    })
}

/// Candidate with the greatest trade date; earliest file position wins ties.
fn latest_row<'a>(
    schema: &CanonicalSchema,
    candidates: &[Candidate<'a>],
) -> Result<Option<(usize, &'a [String], NaiveDate)>, DataError> {
    let date_index = schema.require_date()?;
    let mut best: Option<(usize, &'a [String], NaiveDate)> = None;
    for &(row_no, row) in candidates {
        let raw = cell(row, date_index);
        let date = parse_date(raw).ok_or_else(|| DataError::InvalidDate {
            row: row_no,
            value: raw.to_string(),
        })?;
        if best.map_or(true, |(_, _, b)| date > b) {
            best = Some((row_no, row, date));
        }
    }
    Ok(best)
}
