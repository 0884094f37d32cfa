use serde::Serialize;
use std::collections::BTreeMap;

use super::risk::round_to_cents;
use crate::catalog::{PolicyRecord, PolicyType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    pub policy_type: PolicyType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgePremium {
    pub age: u32,
    pub average_premium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageStats {
    pub policy_type: PolicyType,
    pub mean_coverage_lakhs: f64,
    pub min_coverage_lakhs: f64,
    pub max_coverage_lakhs: f64,
    pub mean_premium_inr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalSnapshot {
    pub region: String,
    pub average_premium: f64,
    pub average_coverage_lakhs: f64,
}

/// Aggregate views over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketInsights {
    pub total_policies: usize,
    pub type_distribution: Vec<TypeShare>,
    pub premium_by_age: Vec<AgePremium>,
    pub coverage_by_type: Vec<CoverageStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional: Option<Vec<RegionalSnapshot>>,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    premium_total: f64,
    coverage_total: f64,
    coverage_min: f64,
    coverage_max: f64,
}

impl Accumulator {
    fn add(&mut self, record: &PolicyRecord) {
        if self.count == 0 {
            self.coverage_min = record.coverage_lakhs;
            self.coverage_max = record.coverage_lakhs;
        } else {
            self.coverage_min = self.coverage_min.min(record.coverage_lakhs);
            self.coverage_max = self.coverage_max.max(record.coverage_lakhs);
        }
        self.count += 1;
        self.premium_total += record.premium_inr;
        self.coverage_total += record.coverage_lakhs;
    }

    fn mean_premium(&self) -> f64 {
        self.premium_total / self.count as f64
    }

    fn mean_coverage(&self) -> f64 {
        self.coverage_total / self.count as f64
    }
}

impl MarketInsights {
    pub fn from_records(records: &[PolicyRecord]) -> Self {
        let mut by_type: BTreeMap<PolicyType, Accumulator> = BTreeMap::new();
        let mut by_age: BTreeMap<u32, Accumulator> = BTreeMap::new();
        let mut by_region: BTreeMap<&str, Accumulator> = BTreeMap::new();

        for record in records {
            by_type.entry(record.policy_type).or_default().add(record);
            by_age.entry(record.age).or_default().add(record);
            if let Some(region) = record.region.as_deref() {
                by_region.entry(region).or_default().add(record);
            }
        }

        let mut type_distribution: Vec<TypeShare> = by_type
            .iter()
            .map(|(policy_type, totals)| TypeShare {
                policy_type: *policy_type,
                count: totals.count,
            })
            .collect();
        type_distribution.sort_by(|left, right| right.count.cmp(&left.count));

        let premium_by_age = by_age
            .iter()
            .map(|(age, totals)| AgePremium {
                age: *age,
                average_premium: round_to_cents(totals.mean_premium()),
            })
            .collect();

        let coverage_by_type = by_type
            .iter()
            .map(|(policy_type, totals)| CoverageStats {
                policy_type: *policy_type,
                mean_coverage_lakhs: round_to_cents(totals.mean_coverage()),
                min_coverage_lakhs: totals.coverage_min,
                max_coverage_lakhs: totals.coverage_max,
                mean_premium_inr: round_to_cents(totals.mean_premium()),
            })
            .collect();

        let regional = (!by_region.is_empty()).then(|| {
            by_region
                .iter()
                .map(|(region, totals)| RegionalSnapshot {
                    region: region.to_string(),
                    average_premium: round_to_cents(totals.mean_premium()),
                    average_coverage_lakhs: round_to_cents(totals.mean_coverage()),
                })
                .collect()
        });

        Self {
            total_policies: records.len(),
            type_distribution,
            premium_by_age,
            coverage_by_type,
            regional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<PolicyRecord> {
        vec![
            PolicyRecord::new(PolicyType::Health, 10.0, 8_000.0, 30).with_region("North"),
            PolicyRecord::new(PolicyType::Health, 20.0, 9_000.0, 40).with_region("South"),
            PolicyRecord::new(PolicyType::TermLife, 50.0, 12_000.0, 30).with_region("North"),
            PolicyRecord::new(PolicyType::Health, 15.0, 10_000.0, 30),
        ]
    }

    #[test]
    fn distribution_is_sorted_by_count() {
        let insights = MarketInsights::from_records(&catalog());
        assert_eq!(insights.total_policies, 4);
        assert_eq!(
            insights.type_distribution,
            vec![
                TypeShare {
                    policy_type: PolicyType::Health,
                    count: 3
                },
                TypeShare {
                    policy_type: PolicyType::TermLife,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn averages_premium_per_age() {
        let insights = MarketInsights::from_records(&catalog());
        assert_eq!(
            insights.premium_by_age,
            vec![
                AgePremium {
                    age: 30,
                    average_premium: 10_000.0
                },
                AgePremium {
                    age: 40,
                    average_premium: 9_000.0
                },
            ]
        );
    }

    #[test]
    fn coverage_stats_per_type() {
        let insights = MarketInsights::from_records(&catalog());
        let health = insights
            .coverage_by_type
            .iter()
            .find(|stats| stats.policy_type == PolicyType::Health)
            .expect("health stats");
        assert_eq!(health.mean_coverage_lakhs, 15.0);
        assert_eq!(health.min_coverage_lakhs, 10.0);
        assert_eq!(health.max_coverage_lakhs, 20.0);
        assert_eq!(health.mean_premium_inr, 9_000.0);
    }

    #[test]
    fn regional_view_only_when_regions_present() {
        let insights = MarketInsights::from_records(&catalog());
        let regional = insights.regional.expect("regions present");
        assert_eq!(regional.len(), 2);
        assert_eq!(regional[0].region, "North");
        assert_eq!(regional[0].average_premium, 10_000.0);
        assert_eq!(regional[0].average_coverage_lakhs, 30.0);

        let without_regions = vec![PolicyRecord::new(PolicyType::Health, 10.0, 8_000.0, 30)];
        assert!(MarketInsights::from_records(&without_regions)
            .regional
            .is_none());
    }
}
