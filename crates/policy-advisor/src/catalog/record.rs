use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalizer::normalize_label;

/// Product families offered in the policy catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    #[serde(rename = "Term Life", alias = "TermLife")]
    TermLife,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Comprehensive")]
    Comprehensive,
    #[serde(rename = "Accident Cover", alias = "AccidentCover")]
    AccidentCover,
}

impl PolicyType {
    pub const ALL: [PolicyType; 4] = [
        PolicyType::TermLife,
        PolicyType::Health,
        PolicyType::Comprehensive,
        PolicyType::AccidentCover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PolicyType::TermLife => "Term Life",
            PolicyType::Health => "Health",
            PolicyType::Comprehensive => "Comprehensive",
            PolicyType::AccidentCover => "Accident Cover",
        }
    }

    /// Lenient lookup used by quoting surfaces, where an unrecognised label is not an error.
    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "termlife" | "term" => Some(PolicyType::TermLife),
            "health" => Some(PolicyType::Health),
            "comprehensive" => Some(PolicyType::Comprehensive),
            "accidentcover" | "accident" => Some(PolicyType::AccidentCover),
            _ => None,
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy type '{0}'")]
pub struct UnknownPolicyType(pub String);

impl FromStr for PolicyType {
    type Err = UnknownPolicyType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_label(value).ok_or_else(|| UnknownPolicyType(value.trim().to_string()))
    }
}

/// One offered policy variant. Rows are only ever read or copied into views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub policy_type: PolicyType,
    pub coverage_lakhs: f64,
    pub premium_inr: f64,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl PolicyRecord {
    pub fn new(policy_type: PolicyType, coverage_lakhs: f64, premium_inr: f64, age: u32) -> Self {
        Self {
            policy_type,
            coverage_lakhs,
            premium_inr,
            age,
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub(crate) fn invariant_violation(&self) -> Option<String> {
        if !(self.coverage_lakhs.is_finite() && self.coverage_lakhs > 0.0) {
            return Some(format!(
                "coverage must be positive, found {}",
                self.coverage_lakhs
            ));
        }
        if !(self.premium_inr.is_finite() && self.premium_inr > 0.0) {
            return Some(format!("premium must be positive, found {}", self.premium_inr));
        }
        None
    }
}
