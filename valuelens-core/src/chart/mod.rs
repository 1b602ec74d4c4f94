//! Chart views: filtered metric history with EMA overlays and summary stats.

pub mod builder;
pub mod stats;
pub mod view;

pub use builder::{ChartDataBuilder, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN};
pub use stats::SummaryStats;
pub use view::ChartView;
