//! ValuationRepository — source location of the canonical snapshot.
//!
//! Holds nothing but a path and a lookup policy. `load()` re-reads the file
//! on every call, so two loads may see different snapshots if the file
//! changed in between; compare `Dataset::hash()` to tell. `lookup()` reads
//! only the matched ticker's rows and never types the rest of the file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data::csv_io::{parse_table, read_bytes};
use crate::data::dataset::{Dataset, MatchPolicy, Valuation};
use crate::data::lookup::lookup_table;
use crate::domain::SnapshotHash;
use crate::error::{DataError, LookupError};

#[derive(Debug, Clone)]
pub struct ValuationRepository {
    path: PathBuf,
    policy: MatchPolicy,
}

impl ValuationRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: MatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Read and type the canonical file into a fresh snapshot.
    pub fn load(&self) -> Result<Dataset, DataError> {
        let bytes = read_bytes(&self.path)?;
        let hash = SnapshotHash::of_bytes(&bytes);
        let table = parse_table(&bytes)?;
        let dataset = Dataset::from_table(&self.path, &table, hash)?;
        info!(
            path = %self.path.display(),
            records = dataset.len(),
            snapshot = dataset.hash().short(),
            "loaded valuation snapshot"
        );
        Ok(dataset)
    }

    /// Re-read the file and look up `metrics` for `ticker` with the
    /// repository's policy.
    pub fn lookup<S: AsRef<str>>(&self, ticker: &str, metrics: &[S]) -> Result<Valuation, LookupError> {
        let bytes = read_bytes(&self.path)?;
        let table = parse_table(&bytes)?;
        let valuation = lookup_table(&table, ticker, metrics, self.policy)?;
        debug!(
            path = %self.path.display(),
            ticker = %valuation.ticker,
            policy = ?self.policy,
            "lookup answered"
        );
        Ok(valuation)
    }
}
