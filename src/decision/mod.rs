//! Offer metrics and the take / only-if-slow / decline classifier.
//!
//! Everything here is pure: an [`Offer`] and a [`Policy`] go in, an [`Evaluation`] comes out.
//! Input validation belongs to the caller (see [`crate::orders::request`]).

mod metrics;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use metrics::{
    calculate, effective_minutes, effective_pay, round_to_cents, Offer, OfferMetrics,
    RoundedMetrics,
};
pub use policy::{
    DecisionMode, Policy, ScoreThresholds, ScoreWeights, VehicleCostModel,
    DEFAULT_MAX_MINUTES, DEFAULT_TIME_BUFFER_MULTIPLIER, SLOW_HOURLY_RATIO,
};
pub use rules::{Decision, DecisionBasis, UnknownDecision};

use serde::Serialize;
use tracing::debug;

/// Outcome of evaluating one offer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub metrics: OfferMetrics,
    pub decision: Decision,
    pub basis: DecisionBasis,
}

impl Evaluation {
    pub fn rounded(&self) -> RoundedMetrics {
        self.metrics.rounded()
    }
}

pub fn evaluate(offer: &Offer, policy: &Policy) -> Evaluation {
    let metrics = metrics::calculate(offer, policy);
    let (decision, basis) = rules::classify(offer, policy, &metrics);

    debug!(
        pay = offer.pay,
        miles = offer.miles,
        minutes = offer.minutes,
        hourly_rate = metrics.hourly_rate,
        dollars_per_mile = metrics.dollars_per_mile,
        score = metrics.score,
        mode = policy.mode.label(),
        basis = basis.label(),
        %decision,
        "offer evaluated"
    );

    Evaluation {
        metrics,
        decision,
        basis,
    }
}
