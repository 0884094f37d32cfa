//! Read-only policy catalog loaded from a CSV export.
//!
//! The store caches the outcome of the first load, success or failure, so every
//! dependent operation observes the same table (or the same error) until the
//! cache is explicitly invalidated.

mod normalizer;
mod parser;
mod record;

pub use record::{PolicyRecord, PolicyType, UnknownPolicyType};

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Reasons the catalog cannot serve data. Every variant surfaces as "data unavailable".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("insurance catalog not found at {path}")]
    Missing { path: String },
    #[error("failed to read insurance catalog: {0}")]
    Io(String),
    #[error("invalid catalog row {row}: {reason}")]
    Malformed { row: u64, reason: String },
    #[error("insurance catalog contains no policies")]
    Empty,
}

type CatalogOutcome = Result<Arc<[PolicyRecord]>, CatalogError>;

#[derive(Debug)]
enum CatalogSource {
    Path(PathBuf),
    Preloaded,
}

/// Owned, immutable policy table shared by handle across the advisor.
#[derive(Debug)]
pub struct CatalogStore {
    source: CatalogSource,
    cached: RwLock<Option<CatalogOutcome>>,
}

impl CatalogStore {
    /// Defers reading `path` until the first [`CatalogStore::load`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: CatalogSource::Path(path.as_ref().to_path_buf()),
            cached: RwLock::new(None),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Self {
        let outcome = parser::parse_records(reader).and_then(finalize);
        Self::preloaded(outcome)
    }

    pub fn from_records(records: Vec<PolicyRecord>) -> Self {
        let outcome = records
            .iter()
            .enumerate()
            .find_map(|(index, record)| {
                record
                    .invariant_violation()
                    .map(|reason| CatalogError::Malformed {
                        row: index as u64 + 1,
                        reason,
                    })
            })
            .map_or_else(|| finalize(records), Err);
        Self::preloaded(outcome)
    }

    fn preloaded(outcome: CatalogOutcome) -> Self {
        Self {
            source: CatalogSource::Preloaded,
            cached: RwLock::new(Some(outcome)),
        }
    }

    /// Returns the cached table, reading the backing file on first use.
    pub fn load(&self) -> Result<Arc<[PolicyRecord]>, CatalogError> {
        if let Some(outcome) = self.cached.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return outcome.clone();
        }

        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have filled the cache while we waited for the lock.
        cached.get_or_insert_with(|| self.read_source()).clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached table so the next load re-reads a path-backed source.
    /// Preloaded stores have nothing to re-read and keep their contents.
    pub fn invalidate(&self) {
        if let CatalogSource::Path(_) = self.source {
            *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    pub fn get(&self, index: usize) -> Result<Option<PolicyRecord>, CatalogError> {
        Ok(self.load()?.get(index).cloned())
    }

    pub fn by_type(&self, policy_type: PolicyType) -> Result<Vec<PolicyRecord>, CatalogError> {
        Ok(self
            .load()?
            .iter()
            .filter(|record| record.policy_type == policy_type)
            .cloned()
            .collect())
    }

    fn read_source(&self) -> CatalogOutcome {
        let path = match &self.source {
            CatalogSource::Path(path) => path,
            CatalogSource::Preloaded => return Err(CatalogError::Empty),
        };

        let outcome = match std::fs::File::open(path) {
            Ok(file) => parser::parse_records(file).and_then(finalize),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(CatalogError::Missing {
                path: path.display().to_string(),
            }),
            Err(err) => Err(CatalogError::Io(err.to_string())),
        };

        match &outcome {
            Ok(records) => info!(path = %path.display(), policies = records.len(), "policy catalog loaded"),
            Err(err) => warn!(path = %path.display(), error = %err, "policy catalog unavailable"),
        }

        outcome
    }
}

fn finalize(records: Vec<PolicyRecord>) -> CatalogOutcome {
    if records.is_empty() {
        Err(CatalogError::Empty)
    } else {
        Ok(records.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "Policy_Type,Coverage_Lakhs,Premium_INR,Age\n\
Term Life,50,12000,30\n\
Health,10,8500,42\n\
Health,15,9900,38\n";

    #[test]
    fn reader_backed_store_serves_cached_rows() {
        let store = CatalogStore::from_reader(Cursor::new(SAMPLE));
        assert!(store.is_loaded());

        let first = store.load().expect("catalog loads");
        let second = store.load().expect("catalog still loads");
        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn header_only_catalog_is_unavailable() {
        let store = CatalogStore::from_reader(Cursor::new("Policy_Type,Coverage_Lakhs,Premium_INR,Age\n"));
        assert_eq!(store.load().expect_err("empty"), CatalogError::Empty);
    }

    #[test]
    fn missing_path_reports_missing_until_invalidated() {
        let store = CatalogStore::from_path("./no-such-catalog.csv");
        assert!(!store.is_loaded());

        match store.load() {
            Err(CatalogError::Missing { path }) => assert!(path.contains("no-such-catalog.csv")),
            other => panic!("expected missing catalog, got {other:?}"),
        }
        assert!(store.is_loaded());

        store.invalidate();
        assert!(!store.is_loaded());
    }

    #[test]
    fn from_records_enforces_positive_amounts() {
        let store = CatalogStore::from_records(vec![
            PolicyRecord::new(PolicyType::Health, 10.0, 8000.0, 30),
            PolicyRecord::new(PolicyType::TermLife, 25.0, 0.0, 30),
        ]);
        assert!(matches!(
            store.load(),
            Err(CatalogError::Malformed { row: 2, .. })
        ));
    }

    #[test]
    fn lookups_by_index_and_type() {
        let store = CatalogStore::from_reader(Cursor::new(SAMPLE));
        let record = store.get(1).expect("loads").expect("row exists");
        assert_eq!(record.policy_type, PolicyType::Health);
        assert!(store.get(10).expect("loads").is_none());

        let health = store.by_type(PolicyType::Health).expect("loads");
        assert_eq!(health.len(), 2);
        assert!(store.by_type(PolicyType::AccidentCover).expect("loads").is_empty());
    }

    #[test]
    fn shared_store_reloads_after_invalidation() {
        let path = std::env::temp_dir().join(format!(
            "policy-catalog-reload-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).expect("write catalog");

        let store = Arc::new(CatalogStore::from_path(&path));
        assert_eq!(store.load().expect("catalog loads").len(), 3);

        std::fs::write(&path, "Policy_Type,Coverage_Lakhs,Premium_INR,Age\nHealth,10,8500,42\n")
            .expect("rewrite catalog");
        let shared = Arc::clone(&store);
        assert_eq!(shared.load().expect("still cached").len(), 3);

        shared.invalidate();
        assert_eq!(store.load().expect("catalog reloads").len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalidating_a_preloaded_store_keeps_its_rows() {
        let store = CatalogStore::from_reader(Cursor::new(SAMPLE));
        store.invalidate();
        assert!(store.is_loaded());
        assert_eq!(store.load().expect("catalog loads").len(), 3);
    }
}
