//! CanonicalRecord — one cleaned valuation row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// A single ticker/date observation of the three valuation multiples.
///
/// Any metric may be missing in the export; missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub ticker: String,
    #[serde(rename = "TRADE_DATE")]
    pub trade_date: NaiveDate,
    #[serde(rename = "PE")]
    pub pe: Option<f64>,
    #[serde(rename = "PB")]
    pub pb: Option<f64>,
    #[serde(rename = "PS")]
    pub ps: Option<f64>,
}

impl CanonicalRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Pe => self.pe,
            Metric::Pb => self.pb,
            Metric::Ps => self.ps,
        }
    }

    pub fn set_value(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Pe => self.pe = value,
            Metric::Pb => self.pb = value,
            Metric::Ps => self.ps = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CanonicalRecord {
        CanonicalRecord {
            ticker: "HPG".into(),
            trade_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            pe: Some(10.5),
            pb: Some(1.2),
            ps: None,
        }
    }

    #[test]
    fn value_by_metric() {
        let r = sample();
        assert_eq!(r.value(Metric::Pe), Some(10.5));
        assert_eq!(r.value(Metric::Pb), Some(1.2));
        assert_eq!(r.value(Metric::Ps), None);
    }

    #[test]
    fn set_value_by_metric() {
        let mut r = sample();
        r.set_value(Metric::Ps, Some(0.8));
        assert_eq!(r.ps, Some(0.8));
    }
}
