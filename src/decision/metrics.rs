use serde::Serialize;

use super::policy::Policy;

/// A delivery or ride offer as quoted to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offer {
    pub pay: f64,
    pub miles: f64,
    pub minutes: f64,
}

impl Offer {
    pub fn new(pay: f64, miles: f64, minutes: f64) -> Self {
        Self {
            pay,
            miles,
            minutes,
        }
    }
}

/// Unrounded metrics for one offer. Classification compares these values directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OfferMetrics {
    pub effective_minutes: f64,
    pub effective_pay: f64,
    pub hourly_rate: f64,
    pub dollars_per_mile: f64,
    pub score: f64,
}

impl OfferMetrics {
    pub fn rounded(&self) -> RoundedMetrics {
        RoundedMetrics {
            hourly_rate: round_to_cents(self.hourly_rate),
            dollars_per_mile: round_to_cents(self.dollars_per_mile),
            score: round_to_cents(self.score),
        }
    }
}

/// Display copy of the public metrics, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedMetrics {
    pub hourly_rate: f64,
    pub dollars_per_mile: f64,
    pub score: f64,
}

/// Rounds to two decimals, sending exact halves to the even cent.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn effective_minutes(minutes: f64, time_buffer_multiplier: f64) -> f64 {
    minutes * time_buffer_multiplier
}

/// Pay left after advanced-mode vehicle costs. Never negative.
pub fn effective_pay(offer: &Offer, policy: &Policy) -> f64 {
    match &policy.cost_model {
        Some(model) => {
            let fuel_cost = model.fuel_cost(offer.miles);
            let wear_cost = model.wear_cost(offer.miles);
            (offer.pay - fuel_cost - wear_cost).max(0.0)
        }
        None => offer.pay,
    }
}

pub fn calculate(offer: &Offer, policy: &Policy) -> OfferMetrics {
    let effective_minutes = effective_minutes(offer.minutes, policy.time_buffer_multiplier);
    let effective_pay = effective_pay(offer, policy);

    let hourly_rate = if effective_minutes > 0.0 {
        (effective_pay / effective_minutes) * 60.0
    } else {
        0.0
    };
    let dollars_per_mile = if offer.miles > 0.0 {
        effective_pay / offer.miles
    } else {
        0.0
    };

    let weights = &policy.weights;
    let score = hourly_rate * weights.hourly + dollars_per_mile * weights.per_mile
        - effective_minutes * weights.time_penalty;

    OfferMetrics {
        effective_minutes,
        effective_pay,
        hourly_rate,
        dollars_per_mile,
        score,
    }
}
