use super::common::*;
use crate::advisor::profile::{ProfileError, ProfileRequest};
use crate::advisor::recommendation::{
    affordability_score, RecommendationEngine, RecommendationError, RecommendationRules,
};
use crate::catalog::{CatalogError, CatalogStore, PolicyRecord, PolicyType};
use std::sync::Arc;

#[test]
fn ranks_window_candidates_by_affordability() {
    let engine = RecommendationEngine::new(catalog());

    let result = engine
        .recommend(&young_professional())
        .expect("recommendation succeeds");

    assert_eq!(result.total_candidates, 4);
    assert_eq!(result.risk_score, 1.65);
    let order: Vec<PolicyType> = result
        .shortlist
        .iter()
        .map(|ranked| ranked.policy.policy_type)
        .collect();
    assert_eq!(
        order,
        vec![
            PolicyType::AccidentCover,
            PolicyType::Health,
            PolicyType::TermLife,
            PolicyType::Comprehensive,
        ]
    );
    assert_eq!(result.best_policy, result.shortlist[0]);
    assert_eq!(
        result.best_policy.affordability_score,
        affordability_score(3_600.0, 12.0)
    );
    assert_eq!(result.best_policy.age_diff, 2);
}

#[test]
fn poor_health_with_family_goal_keeps_large_medical_cover() {
    let engine = RecommendationEngine::new(catalog());

    let result = engine
        .recommend(&poor_health_family())
        .expect("recommendation succeeds");

    assert_eq!(result.total_candidates, 1);
    assert_eq!(result.best_policy.policy.policy_type, PolicyType::Comprehensive);
    assert_eq!(result.best_policy.policy.coverage_lakhs, 25.0);
}

#[test]
fn savings_goal_prefers_term_and_comprehensive_plans() {
    let engine = RecommendationEngine::new(catalog());

    let result = engine
        .recommend(&retiree_saver())
        .expect("recommendation succeeds");

    assert_eq!(result.total_candidates, 2);
    assert_eq!(result.best_policy.policy.policy_type, PolicyType::TermLife);
    assert_eq!(result.best_policy.policy.coverage_lakhs, 100.0);
    assert_eq!(result.shortlist[1].policy.policy_type, PolicyType::Comprehensive);
}

#[test]
fn age_outside_catalog_falls_back_to_whole_table() {
    let engine = RecommendationEngine::new(catalog());

    let result = engine
        .recommend(&ProfileRequest::new(95, 12.0, "Good", "peace of mind"))
        .expect("recommendation succeeds");

    // Every row at or above the coverage floor survives.
    assert_eq!(result.total_candidates, 7);
    assert_eq!(result.shortlist.len(), 5);
    assert_eq!(result.best_policy.policy.policy_type, PolicyType::AccidentCover);
}

#[test]
fn shortlist_length_follows_rules() {
    let rules = RecommendationRules {
        shortlist_len: 2,
        ..RecommendationRules::default()
    };
    let engine = RecommendationEngine::with_rules(catalog(), rules);

    let result = engine
        .recommend(&young_professional())
        .expect("recommendation succeeds");
    assert_eq!(result.total_candidates, 4);
    assert_eq!(result.shortlist.len(), 2);
}

#[test]
fn repeated_requests_return_identical_results() {
    let engine = RecommendationEngine::new(catalog());
    let request = poor_health_family();

    let first = engine.recommend(&request).expect("first run");
    let second = engine.recommend(&request).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn invalid_profile_is_rejected_before_loading_catalog() {
    let store = Arc::new(CatalogStore::from_path("./never-read.csv"));
    let engine = RecommendationEngine::new(store.clone());

    let error = engine
        .recommend(&ProfileRequest::new(17, 12.0, "Good", "peace of mind"))
        .expect_err("age below minimum");

    assert_eq!(
        error,
        RecommendationError::InvalidInput(ProfileError::AgeOutOfRange)
    );
    assert!(!store.is_loaded());
}

#[test]
fn missing_catalog_reports_data_unavailable() {
    let engine = RecommendationEngine::new(Arc::new(CatalogStore::from_path(
        "./definitely-missing-catalog.csv",
    )));

    match engine.recommend(&young_professional()) {
        Err(RecommendationError::DataUnavailable(CatalogError::Missing { .. })) => {}
        other => panic!("expected data unavailable, got {other:?}"),
    }
}

#[test]
fn catalog_without_adequate_cover_has_no_suitable_policy() {
    let store = CatalogStore::from_records(vec![
        PolicyRecord::new(PolicyType::Health, 5.0, 2_400.0, 30),
        PolicyRecord::new(PolicyType::AccidentCover, 8.0, 1_800.0, 45),
    ]);
    let engine = RecommendationEngine::new(Arc::new(store));

    assert_eq!(
        engine.recommend(&young_professional()),
        Err(RecommendationError::NoSuitablePolicy)
    );
}
