//! Profile validation, risk scoring, recommendation, quoting, and the optional
//! natural-language assistant built on top of the policy catalog.

pub mod comparison;
pub mod explanation;
pub mod insights;
pub mod premium;
pub mod profile;
pub mod recommendation;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use comparison::{ComparisonVerdict, PolicyComparison, PolicySide};
pub use explanation::{
    Explanation, ExplanationSource, GenerationError, HttpGeneratorConfig, HttpTextGenerator,
    QuestionError, SamplingOptions, TextGenerator,
};
pub use insights::MarketInsights;
pub use premium::{PremiumEstimate, PremiumQuoteRequest};
pub use profile::{HealthStatus, ProfileError, ProfileRequest, UserProfile};
pub use recommendation::{
    RankedPolicy, RecommendationEngine, RecommendationError, RecommendationResult,
    RecommendationRules,
};
pub use router::advisor_router;
pub use service::{Advice, CatalogEntry, ComparisonError, PolicyAdvisor};
