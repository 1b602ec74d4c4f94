//! ValueLens Core — valuation export cleaning, snapshots, smoothing, chart views.
//!
//! This crate contains the whole pipeline:
//! - Domain types (metrics, canonical records, tables, time series)
//! - Raw export cleaning (identifier truncation, column renaming)
//! - Canonical snapshot loading and point lookups
//! - EMA smoothing
//! - Chart view building (filtered series, two EMA overlays, summary stats)
//! - TOML configuration shared by the binaries

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;

pub use chart::{ChartDataBuilder, ChartView, SummaryStats};
pub use config::Config;
pub use data::{clean, clean_file, Dataset, MatchPolicy, Valuation, ValuationRepository};
pub use domain::{CanonicalRecord, Metric, Table, TimeSeries};
pub use error::{ChartError, ConfigError, DataError, LookupError, SchemaError, SmoothingError};
pub use indicators::ema;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: snapshot and view types are Send + Sync, so a
    /// worker thread can hold them.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<ChartView>();
        require_sync::<ChartView>();
        require_send::<ChartDataBuilder>();
        require_sync::<ChartDataBuilder>();
        require_send::<ValuationRepository>();
        require_sync::<ValuationRepository>();
        require_send::<Config>();
        require_sync::<Config>();

        require_send::<DataError>();
        require_sync::<DataError>();
        require_send::<LookupError>();
        require_sync::<LookupError>();
        require_send::<ChartError>();
        require_sync::<ChartError>();
    }

    /// The documented end-to-end scenario on an in-memory table.
    #[test]
    fn raw_row_cleans_and_looks_up() {
        let raw = Table::new(
            vec![
                "PRIMARYSECID".into(),
                "TRADE_DATE".into(),
                "PE_RATIO".into(),
                "PX_TO_BOOK_RATIO".into(),
                "PX_TO_SALES_RATIO".into(),
            ],
            vec![vec![
                "HPG VN Equity".into(),
                "2024-01-02".into(),
                "10.5".into(),
                "1.2".into(),
                "0.8".into(),
            ]],
        );
        let cleaned = clean(&raw).unwrap();
        let ds = Dataset::from_table(
            std::path::Path::new("mem.csv"),
            &cleaned,
            domain::SnapshotHash::of_bytes(b"mem"),
        )
        .unwrap();

        let r = &ds.records()[0];
        assert_eq!(r.ticker, "HPG");
        assert_eq!((r.pe, r.pb, r.ps), (Some(10.5), Some(1.2), Some(0.8)));

        let v = ds.lookup("hpg", &["pe", "pb"], MatchPolicy::FirstInFile).unwrap();
        assert_eq!(v.values.len(), 2);
        assert_eq!(v.get(Metric::Pe), Some(10.5));
        assert_eq!(v.get(Metric::Pb), Some(1.2));
    }
}
