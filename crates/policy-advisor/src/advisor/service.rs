use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::comparison::{compare, PolicyComparison};
use super::explanation::{self, Explanation, QuestionError, TextGenerator};
use super::insights::MarketInsights;
use super::premium::{PremiumEstimate, PremiumQuoteRequest};
use super::profile::{ProfileRequest, UserProfile};
use super::recommendation::{RecommendationEngine, RecommendationError, RecommendationResult};
use crate::catalog::{CatalogError, CatalogStore, PolicyRecord, PolicyType};

pub const DEFAULT_EXPLANATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Recommendation plus the rationale shown alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    #[serde(flatten)]
    pub recommendation: RecommendationResult,
    pub explanation: Explanation,
}

/// Catalog row paired with its position, used to pick policies for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub index: usize,
    #[serde(flatten)]
    pub policy: PolicyRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("Unable to load insurance data: {0}")]
    DataUnavailable(#[from] CatalogError),
    #[error("no policy at catalog index {0}")]
    UnknownPolicy(usize),
}

/// Service composing the recommendation engine with the optional text generator.
#[derive(Debug)]
pub struct PolicyAdvisor {
    engine: RecommendationEngine,
    generator: Option<Arc<dyn TextGenerator>>,
    explanation_timeout: Duration,
}

impl PolicyAdvisor {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self {
            engine,
            generator: None,
            explanation_timeout: DEFAULT_EXPLANATION_TIMEOUT,
        }
    }

    pub fn from_catalog(catalog: Arc<CatalogStore>) -> Self {
        Self::new(RecommendationEngine::new(catalog))
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_explanation_timeout(mut self, timeout: Duration) -> Self {
        self.explanation_timeout = timeout;
        self
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        self.engine.catalog()
    }

    pub fn generator(&self) -> Option<Arc<dyn TextGenerator>> {
        self.generator.clone()
    }

    pub fn explanation_timeout(&self) -> Duration {
        self.explanation_timeout
    }

    pub fn recommend(
        &self,
        request: &ProfileRequest,
    ) -> Result<RecommendationResult, RecommendationError> {
        self.engine.recommend(request)
    }

    /// Recommends first, then asks the generator for a rationale. The rationale
    /// never changes or blocks the recommendation itself.
    pub fn advise(&self, request: &ProfileRequest) -> Result<Advice, RecommendationError> {
        let profile = request.validate()?;
        let recommendation = self.engine.recommend_profile(&profile)?;
        let explanation = self.explain(&profile, &recommendation);

        info!(
            best_type = %recommendation.best_policy.policy.policy_type,
            total_candidates = recommendation.total_candidates,
            explanation_source = ?explanation.source,
            "advice prepared"
        );

        Ok(Advice {
            recommendation,
            explanation,
        })
    }

    pub fn explain(&self, profile: &UserProfile, result: &RecommendationResult) -> Explanation {
        explanation::explain(
            self.generator.as_deref(),
            profile,
            &result.best_policy.policy,
            result.risk_score,
        )
    }

    pub fn estimate_premium(&self, request: &PremiumQuoteRequest) -> PremiumEstimate {
        request.estimate()
    }

    pub fn insights(&self) -> Result<MarketInsights, CatalogError> {
        let catalog = self.catalog().load()?;
        Ok(MarketInsights::from_records(&catalog))
    }

    pub fn policies(
        &self,
        policy_type: Option<PolicyType>,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let catalog = self.catalog().load()?;
        Ok(catalog
            .iter()
            .enumerate()
            .filter(|(_, policy)| policy_type.map_or(true, |wanted| policy.policy_type == wanted))
            .map(|(index, policy)| CatalogEntry {
                index,
                policy: policy.clone(),
            })
            .collect())
    }

    pub fn compare(&self, first: usize, second: usize) -> Result<PolicyComparison, ComparisonError> {
        let first = self
            .catalog()
            .get(first)?
            .ok_or(ComparisonError::UnknownPolicy(first))?;
        let second = self
            .catalog()
            .get(second)?
            .ok_or(ComparisonError::UnknownPolicy(second))?;
        Ok(compare(&first, &second))
    }

    pub fn answer_question(&self, question: &str) -> Result<String, QuestionError> {
        explanation::answer_question(self.generator.as_deref(), question)
    }
}
