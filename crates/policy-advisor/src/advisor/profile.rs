use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
pub const MAX_INCOME_LPA: f64 = 1000.0;
pub const MIN_GOAL_CHARS: usize = 5;

/// Self-reported health status, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Average,
    Poor,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Average => "Average",
            HealthStatus::Poor => "Poor",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Some(HealthStatus::Good),
            "average" => Some(HealthStatus::Average),
            "poor" => Some(HealthStatus::Poor),
            _ => None,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HealthStatus {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_label(value).ok_or(ProfileError::UnknownHealth)
    }
}

/// Raw recommendation request exactly as a caller submitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub age: i64,
    pub income_lpa: f64,
    pub health: String,
    pub goal: String,
}

impl ProfileRequest {
    pub fn new(
        age: i64,
        income_lpa: f64,
        health: impl Into<String>,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            age,
            income_lpa,
            health: health.into(),
            goal: goal.into(),
        }
    }

    pub fn validate(&self) -> Result<UserProfile, ProfileError> {
        UserProfile::try_from(self)
    }
}

/// Validated customer profile. Values are never clamped into range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    age: u32,
    income_lpa: f64,
    health: HealthStatus,
    goal: String,
}

impl UserProfile {
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn income_lpa(&self) -> f64 {
        self.income_lpa
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }
}

impl TryFrom<&ProfileRequest> for UserProfile {
    type Error = ProfileError;

    fn try_from(request: &ProfileRequest) -> Result<Self, Self::Error> {
        if request.age < MIN_AGE as i64 || request.age > MAX_AGE as i64 {
            return Err(ProfileError::AgeOutOfRange);
        }

        if !(request.income_lpa > 0.0 && request.income_lpa <= MAX_INCOME_LPA) {
            return Err(ProfileError::IncomeOutOfRange);
        }

        let health = request.health.parse::<HealthStatus>()?;

        let goal = request.goal.trim();
        if goal.is_empty() {
            return Err(ProfileError::MissingGoal);
        }
        if goal.chars().count() < MIN_GOAL_CHARS {
            return Err(ProfileError::GoalTooShort);
        }

        Ok(Self {
            age: request.age as u32,
            income_lpa: request.income_lpa,
            health,
            goal: goal.to_string(),
        })
    }
}

/// Validation failures, worded for the person filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Age must be between 18 and 100 years.")]
    AgeOutOfRange,
    #[error("Annual income must be between 1 and 1000 LPA.")]
    IncomeOutOfRange,
    #[error("Please select a valid health status.")]
    UnknownHealth,
    #[error("Please provide your insurance goal.")]
    MissingGoal,
    #[error("Please provide a more detailed insurance goal (at least 5 characters).")]
    GoalTooShort,
}
