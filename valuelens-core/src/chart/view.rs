//! ChartView — everything a renderer needs for one ticker/metric/start year.

use serde::{Deserialize, Serialize};

use crate::chart::stats::SummaryStats;
use crate::domain::{EmaSeries, Metric, TimeSeries};
use crate::error::DataError;

/// `raw`, `ema_fast` and `ema_slow` share length and indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub ticker: String,
    pub metric: Metric,
    pub start_year: i32,
    pub raw: TimeSeries,
    pub ema_fast: EmaSeries,
    pub ema_slow: EmaSeries,
    pub stats: SummaryStats,
}

impl ChartView {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// e.g. `P/E of HPG since 2021`
    pub fn title(&self) -> String {
        format!(
            "{} of {} since {}",
            self.metric.label(),
            self.ticker,
            self.start_year
        )
    }

    pub fn last_fast(&self) -> Option<f64> {
        self.ema_fast.last()
    }

    pub fn last_slow(&self) -> Option<f64> {
        self.ema_slow.last()
    }

    /// Rows of `(date, value, fast, slow)`.
    pub fn rows(&self) -> impl Iterator<Item = (chrono::NaiveDate, f64, f64, f64)> + '_ {
        self.raw
            .points
            .iter()
            .zip(&self.ema_fast.values)
            .zip(&self.ema_slow.values)
            .filter_map(|((p, &fast), &slow)| p.value.map(|v| (p.date, v, fast, slow)))
    }

    /// Export as CSV with columns `date,<METRIC>,EMA<fast>,EMA<slow>`.
    pub fn to_csv(&self) -> Result<String, DataError> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record([
            "date".to_string(),
            self.metric.column().to_string(),
            self.ema_fast.label(),
            self.ema_slow.label(),
        ])?;

        for (date, value, fast, slow) in self.rows() {
            wtr.write_record([
                date.to_string(),
                format!("{value:.6}"),
                format!("{fast:.6}"),
                format!("{slow:.6}"),
            ])?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| DataError::Csv(csv::Error::from(e.into_error())))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
