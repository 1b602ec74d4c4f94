//! ChartDataBuilder — narrows a snapshot to one chartable series.
//!
//! Pipeline, each stage narrowing the candidate rows:
//! 1. ticker (uppercased, exact match); empty means no chart
//! 2. trade year >= start year
//! 3. stable sort by trade date (ties keep file order)
//! 4. drop rows where the metric is missing; empty means no chart
//! 5. fast and slow EMA over the surviving values
//! 6. summary stats over the surviving values
//!
//! EMAs never see rows outside the filtered window.

use std::num::NonZeroUsize;

use chrono::Datelike;
use tracing::debug;

use crate::chart::stats::SummaryStats;
use crate::chart::view::ChartView;
use crate::data::Dataset;
use crate::domain::{CanonicalRecord, EmaSeries, Metric, SeriesPoint, TimeSeries};
use crate::error::{ChartError, SmoothingError};
use crate::indicators::{Ema, Smoother};

pub const DEFAULT_FAST_SPAN: usize = 20;
pub const DEFAULT_SLOW_SPAN: usize = 200;

const fn nonzero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("span must be non-zero"),
    }
}

const FAST: NonZeroUsize = nonzero(DEFAULT_FAST_SPAN);
const SLOW: NonZeroUsize = nonzero(DEFAULT_SLOW_SPAN);

#[derive(Debug, Clone)]
pub struct ChartDataBuilder {
    fast: Ema,
    slow: Ema,
}

impl ChartDataBuilder {
    pub fn new(fast_span: usize, slow_span: usize) -> Result<Self, SmoothingError> {
        Ok(Self {
            fast: Ema::new(fast_span)?,
            slow: Ema::new(slow_span)?,
        })
    }

    pub fn fast_span(&self) -> usize {
        self.fast.span()
    }

    pub fn slow_span(&self) -> usize {
        self.slow.span()
    }

    /// Build the chart view, or `Ok(None)` when nothing survives filtering.
    pub fn build(
        &self,
        dataset: &Dataset,
        ticker: &str,
        metric: Metric,
        start_year: i32,
    ) -> Result<Option<ChartView>, ChartError> {
        let ticker = ticker.to_uppercase();

        let mut rows: Vec<&CanonicalRecord> = dataset.rows_for(&ticker).collect();
        if rows.is_empty() {
            debug!(%ticker, "no rows for ticker");
            return Ok(None);
        }

        rows.retain(|r| r.trade_date.year() >= start_year);
        // `sort_by_key` is stable.
        rows.sort_by_key(|r| r.trade_date);

        let raw = TimeSeries::new(
            rows.iter()
                .map(|r| SeriesPoint {
                    date: r.trade_date,
                    value: r.value(metric),
                })
                .collect(),
        )
        .drop_missing();

        let values = raw.present_values();
        let Some(stats) = SummaryStats::compute(&values) else {
            debug!(%ticker, %metric, start_year, "no values after filtering");
            return Ok(None);
        };

        let ema_fast = EmaSeries {
            span: self.fast.span(),
            values: self.fast.smooth(&values),
        };
        let ema_slow = EmaSeries {
            span: self.slow.span(),
            values: self.slow.smooth(&values),
        };

        if ema_fast.len() != raw.len() || ema_slow.len() != raw.len() {
            return Err(ChartError::Other(format!(
                "misaligned overlays: raw={}, fast={}, slow={}",
                raw.len(),
                ema_fast.len(),
                ema_slow.len()
            )));
        }

        debug!(%ticker, %metric, start_year, points = raw.len(), "built chart view");

        Ok(Some(ChartView {
            ticker,
            metric,
            start_year,
            raw,
            ema_fast,
            ema_slow,
            stats,
        }))
    }

    /// Same as `build`, with the metric given by name.
    pub fn build_named(
        &self,
        dataset: &Dataset,
        ticker: &str,
        metric: &str,
        start_year: i32,
    ) -> Result<Option<ChartView>, ChartError> {
        let metric: Metric = metric
            .parse()
            .map_err(|e: crate::domain::ParseMetricError| ChartError::InvalidMetric(e.0))?;
        self.build(dataset, ticker, metric, start_year)
    }
}

impl Default for ChartDataBuilder {
    fn default() -> Self {
        Self {
            fast: Ema::with_span(FAST),
            slow: Ema::with_span(SLOW),
        }
    }
}
