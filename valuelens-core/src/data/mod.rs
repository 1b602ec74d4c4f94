//! Data cleaning, canonical snapshots and lookups

pub mod cleaner;
pub mod csv_io;
pub mod dataset;
pub mod lookup;
pub mod parse;
pub mod repository;
pub mod schema;

pub use cleaner::{
    canonical_column_name, clean, clean_file, truncate_identifier, CleanReport, TICKER_LEN,
};
pub use csv_io::{read_table, write_table};
pub use dataset::{Dataset, MatchPolicy, MetricValue, Valuation};
pub use lookup::lookup_table;
pub use repository::ValuationRepository;
pub use schema::{CanonicalSchema, TRADE_DATE};
