use serde::{Deserialize, Serialize};

use crate::advisor::profile::HealthStatus;
use crate::catalog::{PolicyRecord, PolicyType};

/// Thresholds driving the filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRules {
    pub age_window_years: u32,
    pub minimum_coverage_lakhs: f64,
    pub family_coverage_lakhs: f64,
    pub shortlist_len: usize,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            age_window_years: 10,
            minimum_coverage_lakhs: 10.0,
            family_coverage_lakhs: 15.0,
            shortlist_len: 5,
        }
    }
}

const MEDICAL_TYPES: &[PolicyType] = &[PolicyType::Health, PolicyType::Comprehensive];
const SAVINGS_TYPES: &[PolicyType] = &[PolicyType::TermLife, PolicyType::Comprehensive];

/// Policy families a health status is steered towards. Only poor health restricts.
pub(crate) fn health_allowed_types(health: HealthStatus) -> Option<&'static [PolicyType]> {
    match health {
        HealthStatus::Poor => Some(MEDICAL_TYPES),
        HealthStatus::Good | HealthStatus::Average => None,
    }
}

/// Keyword rule picked from the customer's stated goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalRule {
    FamilyProtection,
    CriticalIllness,
    Savings,
}

impl GoalRule {
    /// Checks keyword groups in precedence order; the first group that matches wins.
    pub fn detect(goal: &str) -> Option<Self> {
        let goal = goal.to_lowercase();

        if mentions(&goal, &["family", "dependent"]) {
            Some(GoalRule::FamilyProtection)
        } else if mentions(&goal, &["critical", "serious"]) {
            Some(GoalRule::CriticalIllness)
        } else if mentions(&goal, &["save", "investment"]) {
            Some(GoalRule::Savings)
        } else {
            None
        }
    }

    pub(crate) fn admits(&self, record: &PolicyRecord, rules: &RecommendationRules) -> bool {
        match self {
            GoalRule::FamilyProtection => record.coverage_lakhs >= rules.family_coverage_lakhs,
            GoalRule::CriticalIllness => MEDICAL_TYPES.contains(&record.policy_type),
            GoalRule::Savings => SAVINGS_TYPES.contains(&record.policy_type),
        }
    }
}

fn mentions(goal: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| goal.contains(keyword))
}
