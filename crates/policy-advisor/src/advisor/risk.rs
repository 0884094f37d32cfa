use super::profile::HealthStatus;

/// Coarse bracket-based risk score, rounded to two decimals.
pub fn score(age: u32, health: HealthStatus, income_lpa: f64) -> f64 {
    let raw = age_base(age) * health_multiplier(health) * income_multiplier(income_lpa);
    round_to_cents(raw)
}

fn age_base(age: u32) -> f64 {
    match age {
        0..=24 => 1.0,
        25..=34 => 1.5,
        35..=49 => 2.0,
        _ => 3.0,
    }
}

fn health_multiplier(health: HealthStatus) -> f64 {
    match health {
        HealthStatus::Good => 1.0,
        HealthStatus::Average => 1.5,
        HealthStatus::Poor => 2.5,
    }
}

// Lower income carries the higher multiplier.
fn income_multiplier(income_lpa: f64) -> f64 {
    if income_lpa < 5.0 {
        1.3
    } else if income_lpa < 15.0 {
        1.1
    } else {
        0.9
    }
}

/// Rounds the stored value to two decimals, ties to even.
///
/// `value * 100.0` can land on an exact half when the stored value sits just
/// below one, so the residual is taken with a single rounding via `mul_add`.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    let lower = (value * 100.0).floor();
    let residual = value.mul_add(100.0, -(lower + 0.5));
    let cents = if residual > 0.0 {
        lower + 1.0
    } else if residual < 0.0 {
        lower
    } else if lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    cents / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bracket_boundaries() {
        assert_eq!(score(24, HealthStatus::Good, 20.0), 0.9);
        assert_eq!(score(25, HealthStatus::Good, 20.0), 1.35);
        assert_eq!(score(35, HealthStatus::Good, 20.0), 1.8);
        assert_eq!(score(50, HealthStatus::Good, 20.0), 2.7);
    }

    #[test]
    fn combines_health_and_income_multipliers() {
        // 3.0 * 2.5 * 1.3
        assert_eq!(score(60, HealthStatus::Poor, 4.0), 9.75);
        // 1.5 * 1.5 * 1.1
        assert_eq!(score(30, HealthStatus::Average, 10.0), 2.48);
        assert_eq!(score(30, HealthStatus::Good, 10.0), 1.65);
    }

    #[test]
    fn half_cent_products_round_on_the_stored_value() {
        // 1.5 * 1.5 * 0.9 is stored just below 2.025
        assert_eq!(score(30, HealthStatus::Average, 20.0), 2.02);
        // 1.5 * 2.5 * 1.1 is stored as exactly 4.125
        assert_eq!(score(30, HealthStatus::Poor, 10.0), 4.12);
    }

    #[test]
    fn round_to_cents_handles_plain_values() {
        assert_eq!(round_to_cents(8_000.0), 8_000.0);
        assert_eq!(round_to_cents(1.004), 1.0);
        assert_eq!(round_to_cents(1.006), 1.01);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
    }

    fn health_strategy() -> impl Strategy<Value = HealthStatus> {
        prop_oneof![
            Just(HealthStatus::Good),
            Just(HealthStatus::Average),
            Just(HealthStatus::Poor),
        ]
    }

    proptest! {
        #[test]
        fn non_decreasing_in_age(younger in 18u32..=100, gap in 0u32..=82, health in health_strategy(), income in 0.1f64..1000.0) {
            let older = (younger + gap).min(100);
            prop_assert!(score(younger, health, income) <= score(older, health, income));
        }

        #[test]
        fn non_decreasing_in_health_severity(age in 18u32..=100, income in 0.1f64..1000.0) {
            let good = score(age, HealthStatus::Good, income);
            let average = score(age, HealthStatus::Average, income);
            let poor = score(age, HealthStatus::Poor, income);
            prop_assert!(good <= average);
            prop_assert!(average <= poor);
        }

        #[test]
        fn stays_within_expected_band(age in 18u32..=100, health in health_strategy(), income in 0.1f64..1000.0) {
            let value = score(age, health, income);
            prop_assert!(value > 0.0 && value <= 20.0);
        }
    }
}
