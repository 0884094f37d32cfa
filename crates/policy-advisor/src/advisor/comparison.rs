use serde::Serialize;

use crate::catalog::PolicyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySide {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonVerdict {
    /// Second policy is cheaper without giving up coverage.
    SecondDominates,
    SecondCostsMoreCoversMore,
    Tradeoff,
}

impl ComparisonVerdict {
    pub fn summary(&self, comparison: &PolicyComparison) -> String {
        match self {
            ComparisonVerdict::SecondDominates => {
                "Policy 2 offers better or equal coverage at a lower premium".to_string()
            }
            ComparisonVerdict::SecondCostsMoreCoversMore => format!(
                "Policy 2 costs ₹{:.0} more but provides {} lakhs additional coverage",
                comparison.premium_difference, comparison.coverage_difference
            ),
            ComparisonVerdict::Tradeoff => {
                "Consider your specific needs when choosing between these policies".to_string()
            }
        }
    }
}

/// Side-by-side value analysis; differences are second minus first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyComparison {
    pub first: PolicyRecord,
    pub second: PolicyRecord,
    pub premium_difference: f64,
    pub coverage_difference: f64,
    pub first_value_ratio: f64,
    pub second_value_ratio: f64,
    pub better_value: PolicySide,
    pub verdict: ComparisonVerdict,
}

/// Lakhs of coverage bought per lakh of premium.
pub fn value_ratio(policy: &PolicyRecord) -> f64 {
    policy.coverage_lakhs / policy.premium_inr * 100_000.0
}

pub fn compare(first: &PolicyRecord, second: &PolicyRecord) -> PolicyComparison {
    let premium_difference = second.premium_inr - first.premium_inr;
    let coverage_difference = second.coverage_lakhs - first.coverage_lakhs;
    let first_value_ratio = value_ratio(first);
    let second_value_ratio = value_ratio(second);

    let better_value = if first_value_ratio > second_value_ratio {
        PolicySide::First
    } else {
        PolicySide::Second
    };

    let verdict = if premium_difference < 0.0 && coverage_difference >= 0.0 {
        ComparisonVerdict::SecondDominates
    } else if premium_difference > 0.0 && coverage_difference > 0.0 {
        ComparisonVerdict::SecondCostsMoreCoversMore
    } else {
        ComparisonVerdict::Tradeoff
    };

    PolicyComparison {
        first: first.clone(),
        second: second.clone(),
        premium_difference,
        coverage_difference,
        first_value_ratio,
        second_value_ratio,
        better_value,
        verdict,
    }
}
