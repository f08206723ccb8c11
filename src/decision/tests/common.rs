use crate::decision::{Offer, Policy};

pub(super) fn offer(pay: f64, miles: f64, minutes: f64) -> Offer {
    Offer::new(pay, miles, minutes)
}

/// Policy with no time buffer so the arithmetic in assertions stays readable.
pub(super) fn unbuffered_policy(target_hourly: f64, min_per_mile: f64) -> Policy {
    Policy::new(target_hourly, min_per_mile).with_time_buffer(1.0)
}

/// Same as [`unbuffered_policy`] but with a pay floor high enough that the
/// guaranteed-take guard never fires.
pub(super) fn legacy_rule_policy(target_hourly: f64, min_per_mile: f64) -> Policy {
    let mut policy = unbuffered_policy(target_hourly, min_per_mile);
    policy.guaranteed_take_pay = 1_000.0;
    policy
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
