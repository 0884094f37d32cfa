use metrics_exporter_prometheus::PrometheusHandle;
use policy_advisor::advisor::{HttpGeneratorConfig, HttpTextGenerator, PolicyAdvisor};
use policy_advisor::catalog::CatalogStore;
use policy_advisor::config::AppConfig;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the catalog and, when an endpoint is configured, the text generator.
pub(crate) fn build_advisor(config: &AppConfig, catalog_override: Option<PathBuf>) -> PolicyAdvisor {
    let catalog_path = catalog_override.unwrap_or_else(|| config.catalog.path.clone());
    let catalog = Arc::new(CatalogStore::from_path(&catalog_path));
    let explanation = &config.explanation;
    let advisor =
        PolicyAdvisor::from_catalog(catalog).with_explanation_timeout(explanation.timeout());

    match &explanation.endpoint {
        Some(endpoint) => {
            info!(%endpoint, model = %explanation.model, "text generation enabled");
            let generator = HttpTextGenerator::new(HttpGeneratorConfig::new(
                endpoint.clone(),
                explanation.model.clone(),
                explanation.timeout(),
            ));
            advisor.with_generator(Arc::new(generator))
        }
        None => {
            info!("no text generation endpoint configured; using fallback rationales");
            advisor
        }
    }
}
