use tracing::debug;

use super::rules::{health_allowed_types, GoalRule, RecommendationRules};
use crate::advisor::profile::UserProfile;
use crate::catalog::PolicyRecord;

/// Runs the narrowing stages in order. Each stage falls back to the broader set it
/// received when its own restriction would leave nothing.
pub(crate) fn select_candidates<'a>(
    catalog: &'a [PolicyRecord],
    profile: &UserProfile,
    rules: &RecommendationRules,
) -> Vec<&'a PolicyRecord> {
    let windowed = age_window(catalog, profile.age(), rules);
    let covered = coverage_floor(catalog, windowed, rules);
    let health_fit = health_restriction(covered, profile);
    goal_restriction(health_fit, profile.goal(), rules)
}

fn age_window<'a>(
    catalog: &'a [PolicyRecord],
    age: u32,
    rules: &RecommendationRules,
) -> Vec<&'a PolicyRecord> {
    let all: Vec<&PolicyRecord> = catalog.iter().collect();
    narrow("age_window", all, |record| {
        record.age.abs_diff(age) <= rules.age_window_years
    })
}

fn coverage_floor<'a>(
    catalog: &'a [PolicyRecord],
    windowed: Vec<&'a PolicyRecord>,
    rules: &RecommendationRules,
) -> Vec<&'a PolicyRecord> {
    let meets_floor = |record: &PolicyRecord| record.coverage_lakhs >= rules.minimum_coverage_lakhs;

    let combined: Vec<&PolicyRecord> = windowed
        .into_iter()
        .filter(|record| meets_floor(*record))
        .collect();
    if !combined.is_empty() {
        debug!(stage = "coverage_floor", candidates = combined.len(), "stage applied");
        return combined;
    }

    let relaxed: Vec<&PolicyRecord> = catalog.iter().filter(|record| meets_floor(*record)).collect();
    debug!(
        stage = "coverage_floor",
        candidates = relaxed.len(),
        "age window dropped to satisfy coverage floor"
    );
    relaxed
}

fn health_restriction<'a>(
    candidates: Vec<&'a PolicyRecord>,
    profile: &UserProfile,
) -> Vec<&'a PolicyRecord> {
    match health_allowed_types(profile.health()) {
        Some(allowed) => narrow("health", candidates, |record| {
            allowed.contains(&record.policy_type)
        }),
        None => candidates,
    }
}

fn goal_restriction<'a>(
    candidates: Vec<&'a PolicyRecord>,
    goal: &str,
    rules: &RecommendationRules,
) -> Vec<&'a PolicyRecord> {
    match GoalRule::detect(goal) {
        Some(rule) => narrow("goal", candidates, |record| rule.admits(record, rules)),
        None => candidates,
    }
}

fn narrow<'a, F>(stage: &'static str, candidates: Vec<&'a PolicyRecord>, keep: F) -> Vec<&'a PolicyRecord>
where
    F: Fn(&PolicyRecord) -> bool,
{
    let narrowed: Vec<&PolicyRecord> = candidates
        .iter()
        .copied()
        .filter(|record| keep(*record))
        .collect();

    if narrowed.is_empty() {
        debug!(stage, candidates = candidates.len(), "restriction discarded");
        candidates
    } else {
        debug!(stage, candidates = narrowed.len(), "stage applied");
        narrowed
    }
}
