use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::catalog::PolicyRecord;

/// Catalog row annotated with the ranking keys computed for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPolicy {
    #[serde(flatten)]
    pub policy: PolicyRecord,
    pub affordability_score: f64,
    pub age_diff: u32,
}

impl RankedPolicy {
    fn new(policy: &PolicyRecord, age: u32, income_lpa: f64) -> Self {
        Self {
            policy: policy.clone(),
            affordability_score: affordability_score(policy.premium_inr, income_lpa),
            age_diff: policy.age.abs_diff(age),
        }
    }
}

/// Annual premium relative to income expressed in thousands, scaled by twelve.
pub fn affordability_score(premium_inr: f64, income_lpa: f64) -> f64 {
    premium_inr / (income_lpa * 1000.0) * 12.0
}

/// Cheapest relative to income first, then closest age bracket, then most coverage.
/// The sort is stable so equal keys keep catalog order.
pub(crate) fn rank(candidates: &[&PolicyRecord], age: u32, income_lpa: f64) -> Vec<RankedPolicy> {
    let mut ranked: Vec<RankedPolicy> = candidates
        .iter()
        .map(|policy| RankedPolicy::new(policy, age, income_lpa))
        .collect();
    ranked.sort_by(compare_rank);
    ranked
}

fn compare_rank(left: &RankedPolicy, right: &RankedPolicy) -> Ordering {
    left.affordability_score
        .total_cmp(&right.affordability_score)
        .then_with(|| left.age_diff.cmp(&right.age_diff))
        .then_with(|| {
            right
                .policy
                .coverage_lakhs
                .total_cmp(&left.policy.coverage_lakhs)
        })
}
