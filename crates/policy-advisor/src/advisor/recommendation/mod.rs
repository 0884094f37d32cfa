mod filters;
mod ranking;
mod rules;

pub use ranking::{affordability_score, RankedPolicy};
pub use rules::{GoalRule, RecommendationRules};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::profile::{ProfileError, ProfileRequest, UserProfile};
use super::risk;
use crate::catalog::{CatalogError, CatalogStore};

/// Best match plus ranked shortlist for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub best_policy: RankedPolicy,
    pub shortlist: Vec<RankedPolicy>,
    pub risk_score: f64,
    pub total_candidates: usize,
}

/// Failures surfaced by a recommendation request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendationError {
    #[error("Unable to load insurance data: {0}")]
    DataUnavailable(#[from] CatalogError),
    #[error("{0}")]
    InvalidInput(#[from] ProfileError),
    #[error(
        "No suitable policies found for your profile. Please consult with an insurance advisor."
    )]
    NoSuitablePolicy,
}

/// Filter-and-rank pipeline over a shared catalog.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CatalogStore>,
    rules: RecommendationRules,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self::with_rules(catalog, RecommendationRules::default())
    }

    pub fn with_rules(catalog: Arc<CatalogStore>, rules: RecommendationRules) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn rules(&self) -> &RecommendationRules {
        &self.rules
    }

    /// Validates the raw request before the catalog is touched.
    pub fn recommend(
        &self,
        request: &ProfileRequest,
    ) -> Result<RecommendationResult, RecommendationError> {
        let profile = request.validate()?;
        self.recommend_profile(&profile)
    }

    pub fn recommend_profile(
        &self,
        profile: &UserProfile,
    ) -> Result<RecommendationResult, RecommendationError> {
        let risk_score = risk::score(profile.age(), profile.health(), profile.income_lpa());
        let catalog = self.catalog.load()?;

        let candidates = filters::select_candidates(&catalog, profile, &self.rules);
        if candidates.is_empty() {
            debug!(catalog = catalog.len(), "no candidates survived filtering");
            return Err(RecommendationError::NoSuitablePolicy);
        }

        let total_candidates = candidates.len();
        let mut ranked = ranking::rank(&candidates, profile.age(), profile.income_lpa());
        ranked.truncate(self.rules.shortlist_len.max(1));
        let best_policy = ranked[0].clone();

        debug!(
            total_candidates,
            best_type = %best_policy.policy.policy_type,
            risk_score,
            "recommendation ranked"
        );

        Ok(RecommendationResult {
            best_policy,
            shortlist: ranked,
            risk_score,
            total_candidates,
        })
    }
}
