//! Domain types for ValueLens

pub mod ids;
pub mod metric;
pub mod record;
pub mod series;
pub mod table;

pub use ids::SnapshotHash;
pub use metric::{Metric, ParseMetricError};
pub use record::CanonicalRecord;
pub use series::{EmaSeries, SeriesPoint, TimeSeries};
pub use table::Table;
