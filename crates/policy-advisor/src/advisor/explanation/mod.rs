//! Optional natural-language rationale for a recommendation.
//!
//! Text generation is an injected capability. The advisor works without one, and
//! any failure from one is replaced by a rule-based rationale.

mod http;
mod prompt;
mod sampling;

pub use http::{HttpGeneratorConfig, HttpTextGenerator};
pub use sampling::SamplingOptions;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::warn;

use super::profile::UserProfile;
use crate::catalog::PolicyRecord;

/// External text-generation collaborator.
pub trait TextGenerator: Debug + Send + Sync {
    fn generate(&self, prompt: &str, sampling: &SamplingOptions)
    -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation unavailable: {0}")]
    Unavailable(String),
    #[error("text generation timed out after {seconds}s")]
    Timeout { seconds: u64 },
    #[error("text generation returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

impl Explanation {
    pub fn fallback(profile: &UserProfile, policy: &PolicyRecord, risk_score: f64) -> Self {
        Self {
            text: prompt::fallback_rationale(profile, policy, risk_score),
            source: ExplanationSource::Fallback,
        }
    }
}

/// Never fails: absence, errors, and blank output all yield the fallback rationale.
pub fn explain(
    generator: Option<&dyn TextGenerator>,
    profile: &UserProfile,
    policy: &PolicyRecord,
    risk_score: f64,
) -> Explanation {
    let Some(generator) = generator else {
        return Explanation::fallback(profile, policy, risk_score);
    };

    let prompt = prompt::recommendation_prompt(profile, policy, risk_score);
    match generator.generate(&prompt, &SamplingOptions::RATIONALE) {
        Ok(text) if !text.trim().is_empty() => Explanation {
            text: text.trim().to_string(),
            source: ExplanationSource::Generated,
        },
        Ok(_) => {
            warn!("text generator returned an empty rationale");
            Explanation::fallback(profile, policy, risk_score)
        }
        Err(err) => {
            warn!(error = %err, "text generator failed; using fallback rationale");
            Explanation::fallback(profile, policy, risk_score)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("Please ask a specific insurance-related question.")]
    EmptyQuestion,
    #[error("AI assistant is currently unavailable. Please try again later or contact our support team.")]
    AssistantUnavailable,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

const VAGUE_ANSWER: &str =
    "I'd be happy to help with your insurance question. Could you please be more specific?";

/// Forwards a free-form insurance question to the collaborator.
pub fn answer_question(
    generator: Option<&dyn TextGenerator>,
    question: &str,
) -> Result<String, QuestionError> {
    let generator = generator.ok_or(QuestionError::AssistantUnavailable)?;
    if question.trim().is_empty() {
        return Err(QuestionError::EmptyQuestion);
    }

    let prompt = prompt::question_prompt(question);
    let answer = generator.generate(&prompt, &SamplingOptions::ANSWER)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(VAGUE_ANSWER.to_string())
    } else {
        Ok(answer.to_string())
    }
}
