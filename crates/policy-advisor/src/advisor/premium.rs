use serde::{Deserialize, Serialize};

use super::profile::HealthStatus;
use crate::catalog::PolicyType;

const UNKNOWN_TYPE_BASE_RATE: f64 = 0.8;
const UNKNOWN_HEALTH_FACTOR: f64 = 1.0;

/// Standalone quote, independent of the catalog and of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumEstimate {
    pub estimated_premium: i64,
    pub base_rate: f64,
    pub age_factor: f64,
    pub health_factor: f64,
}

/// Raw quoting request. Labels that do not parse fall back to default factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuoteRequest {
    pub age: u32,
    pub coverage_lakhs: f64,
    pub policy_type: String,
    pub health: String,
}

impl PremiumQuoteRequest {
    pub fn estimate(&self) -> PremiumEstimate {
        estimate(
            self.age,
            self.coverage_lakhs,
            PolicyType::from_label(&self.policy_type),
            HealthStatus::from_label(&self.health),
        )
    }
}

/// `None` for either label means it was not recognised.
pub fn estimate(
    age: u32,
    coverage_lakhs: f64,
    policy_type: Option<PolicyType>,
    health: Option<HealthStatus>,
) -> PremiumEstimate {
    let base_rate = policy_type.map_or(UNKNOWN_TYPE_BASE_RATE, base_rate);
    let age_factor = age_factor(age);
    let health_factor = health.map_or(UNKNOWN_HEALTH_FACTOR, health_factor);

    let premium = coverage_lakhs * base_rate * age_factor * health_factor * 1000.0;

    PremiumEstimate {
        estimated_premium: premium.round() as i64,
        base_rate,
        age_factor,
        health_factor,
    }
}

/// Annual rate in thousands of rupees per lakh of coverage.
pub fn base_rate(policy_type: PolicyType) -> f64 {
    match policy_type {
        PolicyType::TermLife => 0.5,
        PolicyType::Health => 0.8,
        PolicyType::Comprehensive => 1.2,
        PolicyType::AccidentCover => 0.3,
    }
}

fn age_factor(age: u32) -> f64 {
    match age {
        0..=24 => 0.8,
        25..=34 => 1.0,
        35..=44 => 1.3,
        45..=54 => 1.7,
        _ => 2.5,
    }
}

fn health_factor(health: HealthStatus) -> f64 {
    match health {
        HealthStatus::Good => 1.0,
        HealthStatus::Average => 1.3,
        HealthStatus::Poor => 2.0,
    }
}
