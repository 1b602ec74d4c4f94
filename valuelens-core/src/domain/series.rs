//! Time series types produced for charting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One `(date, value)` observation. `None` marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Ordered observations for one ticker and metric, non-decreasing by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove points with a missing value, keeping order.
    pub fn drop_missing(self) -> Self {
        Self {
            points: self
                .points
                .into_iter()
                .filter(|p| p.value.is_some())
                .collect(),
        }
    }

    /// Values of the points that have one, in order.
    pub fn present_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// True if dates never decrease.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date <= w[1].date)
    }
}

/// EMA values aligned index-for-index with a null-free `TimeSeries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaSeries {
    pub span: usize,
    pub values: Vec<f64>,
}

impl EmaSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Legend label, e.g. `EMA20`.
    pub fn label(&self) -> String {
        format!("EMA{}", self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn drop_missing_keeps_order() {
        let ts = TimeSeries::new(vec![
            SeriesPoint { date: d(2021, 1, 1), value: Some(1.0) },
            SeriesPoint { date: d(2021, 1, 2), value: None },
            SeriesPoint { date: d(2021, 1, 3), value: Some(3.0) },
        ]);
        let clean = ts.drop_missing();
        assert_eq!(clean.len(), 2);
        assert_eq!(clean.present_values(), vec![1.0, 3.0]);
        assert_eq!(clean.dates(), vec![d(2021, 1, 1), d(2021, 1, 3)]);
    }

    #[test]
    fn chronological_check() {
        let ok = TimeSeries::new(vec![
            SeriesPoint { date: d(2021, 1, 1), value: Some(1.0) },
            SeriesPoint { date: d(2021, 1, 1), value: Some(2.0) },
            SeriesPoint { date: d(2021, 1, 2), value: Some(3.0) },
        ]);
        assert!(ok.is_chronological());

        let bad = TimeSeries::new(vec![
            SeriesPoint { date: d(2021, 1, 2), value: Some(1.0) },
            SeriesPoint { date: d(2021, 1, 1), value: Some(2.0) },
        ]);
        assert!(!bad.is_chronological());
    }

    #[test]
    fn ema_series_label() {
        let e = EmaSeries { span: 200, values: vec![1.0, 2.0] };
        assert_eq!(e.label(), "EMA200");
        assert_eq!(e.first(), Some(1.0));
        assert_eq!(e.last(), Some(2.0));
    }
}
