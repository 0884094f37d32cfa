use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::comparison::PolicyComparison;
use super::explanation::{self, Explanation, GenerationError, QuestionError};
use super::premium::PremiumQuoteRequest;
use super::profile::{ProfileRequest, UserProfile};
use super::recommendation::{RecommendationError, RecommendationResult};
use super::service::{ComparisonError, PolicyAdvisor};
use crate::catalog::{PolicyRecord, PolicyType};

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: ProfileRequest,
    #[serde(default)]
    pub include_explanation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: RecommendationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyListQuery {
    #[serde(default)]
    pub policy_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRequest {
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    #[serde(flatten)]
    pub comparison: PolicyComparison,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Router exposing recommendation, quoting, catalog, and assistant endpoints.
pub fn advisor_router(advisor: Arc<PolicyAdvisor>) -> Router {
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler))
        .route("/api/v1/premium-estimates", post(estimate_handler))
        .route("/api/v1/policies", get(policies_handler))
        .route("/api/v1/insights", get(insights_handler))
        .route("/api/v1/comparisons", post(compare_handler))
        .route("/api/v1/questions", post(question_handler))
        .with_state(advisor)
}

pub(crate) async fn recommend_handler(
    State(advisor): State<Arc<PolicyAdvisor>>,
    Json(request): Json<RecommendationRequest>,
) -> Response {
    let profile = match request.profile.validate() {
        Ok(profile) => profile,
        Err(err) => return recommendation_error(RecommendationError::from(err)),
    };

    let recommendation = match advisor.engine().recommend_profile(&profile) {
        Ok(result) => result,
        Err(err) => return recommendation_error(err),
    };

    let explanation = if request.include_explanation {
        Some(
            explain_within_timeout(
                &advisor,
                profile,
                recommendation.best_policy.policy.clone(),
                recommendation.risk_score,
            )
            .await,
        )
    } else {
        None
    };

    let body = RecommendationResponse {
        recommendation,
        explanation,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn estimate_handler(
    State(advisor): State<Arc<PolicyAdvisor>>,
    Json(request): Json<PremiumQuoteRequest>,
) -> Response {
    let estimate = advisor.estimate_premium(&request);
    (StatusCode::OK, Json(estimate)).into_response()
}

pub(crate) async fn policies_handler(
    State(advisor): State<Arc<PolicyAdvisor>>,
    Query(query): Query<PolicyListQuery>,
) -> Response {
    let policy_type = match query.policy_type.as_deref().map(str::parse::<PolicyType>) {
        Some(Ok(policy_type)) => Some(policy_type),
        Some(Err(err)) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        None => None,
    };

    match advisor.policies(policy_type) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
    }
}

pub(crate) async fn insights_handler(State(advisor): State<Arc<PolicyAdvisor>>) -> Response {
    match advisor.insights() {
        Ok(insights) => (StatusCode::OK, Json(insights)).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
    }
}

pub(crate) async fn compare_handler(
    State(advisor): State<Arc<PolicyAdvisor>>,
    Json(request): Json<ComparisonRequest>,
) -> Response {
    match advisor.compare(request.first, request.second) {
        Ok(comparison) => {
            let summary = comparison.verdict.summary(&comparison);
            let payload = ComparisonResponse {
                comparison,
                summary,
            };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err @ ComparisonError::UnknownPolicy(_)) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        Err(err @ ComparisonError::DataUnavailable(_)) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
    }
}

pub(crate) async fn question_handler(
    State(advisor): State<Arc<PolicyAdvisor>>,
    Json(request): Json<QuestionRequest>,
) -> Response {
    let timeout = advisor.explanation_timeout();
    let generator = advisor.generator();
    let task = tokio::task::spawn_blocking(move || {
        explanation::answer_question(generator.as_deref(), &request.question)
    });

    let outcome = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_error)) => Err(QuestionError::Generation(GenerationError::Unavailable(
            join_error.to_string(),
        ))),
        Err(_) => Err(QuestionError::Generation(GenerationError::Timeout {
            seconds: timeout.as_secs(),
        })),
    };

    match outcome {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))).into_response(),
        Err(err @ QuestionError::EmptyQuestion) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        Err(err @ QuestionError::AssistantUnavailable) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        Err(err @ QuestionError::Generation(_)) => {
            warn!(error = %err, "question answering failed");
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

/// Runs the generator on a blocking task and substitutes the fallback rationale
/// when it errors, panics, or outlives the configured timeout.
async fn explain_within_timeout(
    advisor: &PolicyAdvisor,
    profile: UserProfile,
    policy: PolicyRecord,
    risk_score: f64,
) -> Explanation {
    let Some(generator) = advisor.generator() else {
        return Explanation::fallback(&profile, &policy, risk_score);
    };

    let timeout = advisor.explanation_timeout();
    let task_profile = profile.clone();
    let task_policy = policy.clone();
    let task = tokio::task::spawn_blocking(move || {
        explanation::explain(Some(&*generator), &task_profile, &task_policy, risk_score)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(explanation)) => explanation,
        Ok(Err(join_error)) => {
            warn!(error = %join_error, "explanation task failed");
            Explanation::fallback(&profile, &policy, risk_score)
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "explanation timed out");
            Explanation::fallback(&profile, &policy, risk_score)
        }
    }
}

fn recommendation_error(err: RecommendationError) -> Response {
    let status = match err {
        RecommendationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationError::NoSuitablePolicy => StatusCode::NOT_FOUND,
        RecommendationError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
