//! Valuation multiples carried by the canonical dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three valuation multiples in the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "PE")]
    Pe,
    #[serde(rename = "PB")]
    Pb,
    #[serde(rename = "PS")]
    Ps,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Pe, Metric::Pb, Metric::Ps];

    /// Column name in the canonical file.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Pe => "PE",
            Metric::Pb => "PB",
            Metric::Ps => "PS",
        }
    }

    /// Column name in the raw export.
    pub fn source_column(self) -> &'static str {
        match self {
            Metric::Pe => "PE_RATIO",
            Metric::Pb => "PX_TO_BOOK_RATIO",
            Metric::Ps => "PX_TO_SALES_RATIO",
        }
    }

    /// Human-readable label used in chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Pe => "P/E",
            Metric::Pb => "P/B",
            Metric::Ps => "P/S",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Metric::Pe => 0,
            Metric::Pb => 1,
            Metric::Ps => 2,
        }
    }

    pub fn next(self) -> Metric {
        Metric::ALL[(self.index() + 1) % Metric::ALL.len()]
    }

    /// Parse a list of metric names, all-or-nothing.
    ///
    /// Names are uppercased before matching. On failure the error carries
    /// every offending name (uppercased, in input order). Repeated names are
    /// collapsed to their first occurrence.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>, Vec<String>> {
        let mut metrics = Vec::with_capacity(names.len());
        let mut invalid = Vec::new();
        for name in names {
            match name.as_ref().parse::<Metric>() {
                Ok(m) => {
                    if !metrics.contains(&m) {
                        metrics.push(m);
                    }
                }
                Err(ParseMetricError(bad)) => invalid.push(bad),
            }
        }
        if invalid.is_empty() {
            Ok(metrics)
        } else {
            Err(invalid)
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A metric name outside {PE, PB, PS}. Holds the uppercased name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid metric '{0}' (expected one of PE, PB, PS)")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "PE" => Ok(Metric::Pe),
            "PB" => Ok(Metric::Pb),
            "PS" => Ok(Metric::Ps),
            _ => Err(ParseMetricError(upper)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("pe".parse::<Metric>().unwrap(), Metric::Pe);
        assert_eq!("Pb".parse::<Metric>().unwrap(), Metric::Pb);
        assert_eq!(" PS ".parse::<Metric>().unwrap(), Metric::Ps);
    }

    #[test]
    fn parse_rejects_source_names() {
        let err = "PE_RATIO".parse::<Metric>().unwrap_err();
        assert_eq!(err.0, "PE_RATIO");
    }

    #[test]
    fn parse_list_collects_every_invalid_name() {
        let err = Metric::parse_list(&["pe", "xx", "PB", "yy"]).unwrap_err();
        assert_eq!(err, vec!["XX".to_string(), "YY".to_string()]);
    }

    #[test]
    fn parse_list_dedupes_in_order() {
        let metrics = Metric::parse_list(&["pb", "PE", "PB"]).unwrap();
        assert_eq!(metrics, vec![Metric::Pb, Metric::Pe]);
    }

    #[test]
    fn next_cycles_through_all() {
        assert_eq!(Metric::Pe.next(), Metric::Pb);
        assert_eq!(Metric::Pb.next(), Metric::Ps);
        assert_eq!(Metric::Ps.next(), Metric::Pe);
    }

    #[test]
    fn serde_uses_canonical_columns() {
        let json = serde_json::to_string(&Metric::Pb).unwrap();
        assert_eq!(json, "\"PB\"");
        let back: Metric = serde_json::from_str("\"PS\"").unwrap();
        assert_eq!(back, Metric::Ps);
    }
}
