use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::metrics::{Offer, OfferMetrics};
use super::policy::{DecisionMode, Policy, SLOW_HOURLY_RATIO};

/// Recommendation returned for an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Take,
    OnlyIfSlow,
    Decline,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Take, Decision::OnlyIfSlow, Decision::Decline];

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Take => "TAKE",
            Decision::OnlyIfSlow => "ONLY_IF_SLOW",
            Decision::Decline => "DECLINE",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown decision '{0}', expected TAKE, ONLY_IF_SLOW or DECLINE")]
pub struct UnknownDecision(pub String);

impl FromStr for Decision {
    type Err = UnknownDecision;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Decision::ALL
            .into_iter()
            .find(|decision| decision.label() == value)
            .ok_or_else(|| UnknownDecision(value.to_string()))
    }
}

/// Which rule produced the decision, kept for logs and audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    HardLimit,
    GuaranteedTake,
    Legacy,
    DualThreshold,
}

impl DecisionBasis {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionBasis::HardLimit => "hard_limit",
            DecisionBasis::GuaranteedTake => "guaranteed_take",
            DecisionBasis::Legacy => "legacy",
            DecisionBasis::DualThreshold => "dual_threshold",
        }
    }
}

struct Guard {
    basis: DecisionBasis,
    verdict: Decision,
    applies: fn(&Offer, &Policy, &OfferMetrics) -> bool,
}

/// Checked in order before the mode rule; the first match decides.
const GUARD_CHAIN: [Guard; 2] = [
    Guard {
        basis: DecisionBasis::HardLimit,
        verdict: Decision::Decline,
        applies: breaches_hard_limits,
    },
    Guard {
        basis: DecisionBasis::GuaranteedTake,
        verdict: Decision::Take,
        applies: meets_guaranteed_take,
    },
];

fn breaches_hard_limits(offer: &Offer, policy: &Policy, metrics: &OfferMetrics) -> bool {
    offer.pay < policy.min_payout || metrics.effective_minutes > policy.max_minutes
}

fn meets_guaranteed_take(offer: &Offer, policy: &Policy, metrics: &OfferMetrics) -> bool {
    offer.pay >= policy.guaranteed_take_pay && metrics.hourly_rate >= policy.target_hourly
}

pub(crate) fn classify(
    offer: &Offer,
    policy: &Policy,
    metrics: &OfferMetrics,
) -> (Decision, DecisionBasis) {
    GUARD_CHAIN
        .iter()
        .find(|guard| (guard.applies)(offer, policy, metrics))
        .map(|guard| (guard.verdict, guard.basis))
        .unwrap_or_else(|| policy.mode.classify(policy, metrics))
}

impl DecisionMode {
    pub(crate) fn classify(
        &self,
        policy: &Policy,
        metrics: &OfferMetrics,
    ) -> (Decision, DecisionBasis) {
        match self {
            DecisionMode::Legacy => {
                let decision = if metrics.hourly_rate >= policy.target_hourly
                    && metrics.dollars_per_mile >= policy.min_per_mile
                {
                    Decision::Take
                } else if metrics.hourly_rate >= policy.target_hourly * SLOW_HOURLY_RATIO {
                    Decision::OnlyIfSlow
                } else {
                    Decision::Decline
                };
                (decision, DecisionBasis::Legacy)
            }
            DecisionMode::DualThreshold(thresholds) => {
                let decision = if metrics.score >= thresholds.take_cut() {
                    Decision::Take
                } else if metrics.score >= thresholds.slow_cut() {
                    Decision::OnlyIfSlow
                } else {
                    Decision::Decline
                };
                (decision, DecisionBasis::DualThreshold)
            }
        }
    }
}
