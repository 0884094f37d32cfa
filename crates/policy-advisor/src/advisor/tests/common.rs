use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::advisor::explanation::{GenerationError, SamplingOptions, TextGenerator};
use crate::advisor::profile::ProfileRequest;
use crate::advisor::PolicyAdvisor;
use crate::catalog::{CatalogStore, PolicyRecord, PolicyType};

pub(super) fn catalog_rows() -> Vec<PolicyRecord> {
    vec![
        PolicyRecord::new(PolicyType::TermLife, 50.0, 9_000.0, 30).with_region("North"),
        PolicyRecord::new(PolicyType::Health, 10.0, 7_200.0, 28).with_region("South"),
        PolicyRecord::new(PolicyType::Comprehensive, 25.0, 15_000.0, 35).with_region("West"),
        PolicyRecord::new(PolicyType::AccidentCover, 20.0, 3_600.0, 32).with_region("North"),
        PolicyRecord::new(PolicyType::Health, 5.0, 2_400.0, 30).with_region("East"),
        PolicyRecord::new(PolicyType::TermLife, 100.0, 21_000.0, 60).with_region("South"),
        PolicyRecord::new(PolicyType::Health, 15.0, 12_000.0, 62).with_region("West"),
        PolicyRecord::new(PolicyType::Comprehensive, 30.0, 26_000.0, 65).with_region("East"),
    ]
}

pub(super) fn catalog() -> Arc<CatalogStore> {
    Arc::new(CatalogStore::from_records(catalog_rows()))
}

pub(super) fn advisor() -> PolicyAdvisor {
    PolicyAdvisor::from_catalog(catalog())
}

pub(super) fn advisor_with(generator: Arc<dyn TextGenerator>) -> PolicyAdvisor {
    advisor().with_generator(generator)
}

pub(super) fn unavailable_advisor() -> PolicyAdvisor {
    PolicyAdvisor::from_catalog(Arc::new(CatalogStore::from_path(
        "./definitely-missing-catalog.csv",
    )))
}

pub(super) fn young_professional() -> ProfileRequest {
    ProfileRequest::new(30, 12.0, "Good", "peace of mind")
}

pub(super) fn poor_health_family() -> ProfileRequest {
    ProfileRequest::new(30, 12.0, "Poor", "cover my family")
}

pub(super) fn retiree_saver() -> ProfileRequest {
    ProfileRequest::new(62, 12.0, "Good", "save for retirement")
}

/// Generator returning a fixed reply and counting calls.
#[derive(Debug)]
pub(super) struct ScriptedGenerator {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub(super) fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(
        &self,
        _prompt: &str,
        _sampling: &SamplingOptions,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Generator that blocks well past any timeout used in tests.
#[derive(Debug)]
pub(super) struct StalledGenerator {
    pub(super) delay: Duration,
}

impl TextGenerator for StalledGenerator {
    fn generate(
        &self,
        _prompt: &str,
        _sampling: &SamplingOptions,
    ) -> Result<String, GenerationError> {
        std::thread::sleep(self.delay);
        Ok("too late".to_string())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
