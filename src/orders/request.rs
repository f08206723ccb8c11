use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decision::{
    Decision, Evaluation, Offer, Policy, ScoreWeights, VehicleCostModel, DEFAULT_MAX_MINUTES,
    DEFAULT_TIME_BUFFER_MULTIPLIER,
};

/// Miles per kilometre, used when a driver enters distance in km.
pub const MILES_PER_KILOMETER: f64 = 0.621371;

/// Unit the `miles` field was entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Mi,
    Km,
}

impl DistanceUnit {
    pub fn to_miles(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Mi => distance,
            DistanceUnit::Km => distance * MILES_PER_KILOMETER,
        }
    }
}

/// Wire shape of an evaluation request: the offer plus the driver's policy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub pay: f64,
    pub miles: f64,
    pub minutes: f64,
    pub target_hourly: f64,
    pub min_per_mile: f64,
    #[serde(default)]
    pub min_payout: f64,
    #[serde(default = "default_max_minutes")]
    pub max_minutes: f64,
    #[serde(default = "default_weight")]
    pub hourly_weight: f64,
    #[serde(default = "default_weight")]
    pub mile_weight: f64,
    #[serde(default)]
    pub time_penalty: f64,
    #[serde(default)]
    pub take_threshold: Option<f64>,
    #[serde(default)]
    pub slow_threshold: Option<f64>,
    #[serde(default = "default_time_buffer")]
    pub time_buffer_multiplier: f64,
    #[serde(default)]
    pub advanced_mode: bool,
    #[serde(default = "default_miles_per_gallon")]
    pub miles_per_gallon: f64,
    #[serde(default = "default_gas_price")]
    pub gas_price_per_gallon: f64,
    #[serde(default = "default_cost_per_mile")]
    pub cost_per_mile: f64,
    #[serde(default)]
    pub guaranteed_take_pay: f64,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

fn default_max_minutes() -> f64 {
    DEFAULT_MAX_MINUTES
}

fn default_weight() -> f64 {
    1.0
}

fn default_time_buffer() -> f64 {
    DEFAULT_TIME_BUFFER_MULTIPLIER
}

fn default_miles_per_gallon() -> f64 {
    VehicleCostModel::default().miles_per_gallon
}

fn default_gas_price() -> f64 {
    VehicleCostModel::default().gas_price_per_gallon
}

fn default_cost_per_mile() -> f64 {
    VehicleCostModel::default().cost_per_mile
}

impl EvaluateRequest {
    /// Request carrying only the required fields; everything else takes its wire default.
    pub fn new(pay: f64, miles: f64, minutes: f64, target_hourly: f64, min_per_mile: f64) -> Self {
        Self {
            pay,
            miles,
            minutes,
            target_hourly,
            min_per_mile,
            min_payout: 0.0,
            max_minutes: default_max_minutes(),
            hourly_weight: default_weight(),
            mile_weight: default_weight(),
            time_penalty: 0.0,
            take_threshold: None,
            slow_threshold: None,
            time_buffer_multiplier: default_time_buffer(),
            advanced_mode: false,
            miles_per_gallon: default_miles_per_gallon(),
            gas_price_per_gallon: default_gas_price(),
            cost_per_mile: default_cost_per_mile(),
            guaranteed_take_pay: 0.0,
            distance_unit: DistanceUnit::Mi,
        }
    }

    /// Checks the engine's preconditions and splits the request into offer and policy.
    pub fn validate(&self) -> Result<(Offer, Policy), ValidationError> {
        require(Requirement::Positive, "pay", self.pay)?;
        require(Requirement::Positive, "miles", self.miles)?;
        require(Requirement::Positive, "minutes", self.minutes)?;
        require(Requirement::Positive, "target_hourly", self.target_hourly)?;
        require(Requirement::Positive, "min_per_mile", self.min_per_mile)?;
        require(Requirement::NonNegative, "min_payout", self.min_payout)?;
        require(Requirement::Positive, "max_minutes", self.max_minutes)?;
        require(Requirement::Finite, "hourly_weight", self.hourly_weight)?;
        require(Requirement::Finite, "mile_weight", self.mile_weight)?;
        require(Requirement::Finite, "time_penalty", self.time_penalty)?;
        if let Some(take) = self.take_threshold {
            require(Requirement::Finite, "take_threshold", take)?;
        }
        if let Some(slow) = self.slow_threshold {
            require(Requirement::Finite, "slow_threshold", slow)?;
        }
        require(
            Requirement::BufferMultiplier,
            "time_buffer_multiplier",
            self.time_buffer_multiplier,
        )?;
        require(Requirement::Positive, "miles_per_gallon", self.miles_per_gallon)?;
        require(
            Requirement::NonNegative,
            "gas_price_per_gallon",
            self.gas_price_per_gallon,
        )?;
        require(Requirement::NonNegative, "cost_per_mile", self.cost_per_mile)?;
        require(
            Requirement::NonNegative,
            "guaranteed_take_pay",
            self.guaranteed_take_pay,
        )?;

        let offer = Offer::new(
            self.pay,
            self.distance_unit.to_miles(self.miles),
            self.minutes,
        );

        let cost_model = self.advanced_mode.then(|| VehicleCostModel {
            miles_per_gallon: self.miles_per_gallon,
            gas_price_per_gallon: self.gas_price_per_gallon,
            cost_per_mile: self.cost_per_mile,
        });

        let policy = Policy {
            min_payout: self.min_payout,
            max_minutes: self.max_minutes,
            weights: ScoreWeights {
                hourly: self.hourly_weight,
                per_mile: self.mile_weight,
                time_penalty: self.time_penalty,
            },
            time_buffer_multiplier: self.time_buffer_multiplier,
            cost_model,
            guaranteed_take_pay: self.guaranteed_take_pay,
            ..Policy::new(self.target_hourly, self.min_per_mile)
        }
        .with_thresholds(self.take_threshold, self.slow_threshold);

        Ok((offer, policy))
    }
}

/// Public result of an evaluation. Metrics are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub hourly_rate: f64,
    pub dollars_per_mile: f64,
    pub score: f64,
    pub decision: Decision,
}

impl From<&Evaluation> for EvaluateResponse {
    fn from(evaluation: &Evaluation) -> Self {
        let rounded = evaluation.rounded();
        Self {
            hourly_rate: rounded.hourly_rate,
            dollars_per_mile: rounded.dollars_per_mile,
            score: rounded.score,
            decision: evaluation.decision,
        }
    }
}

/// Constraint a numeric field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Positive,
    NonNegative,
    BufferMultiplier,
    Finite,
}

impl Requirement {
    fn holds(self, value: f64) -> bool {
        match self {
            Requirement::Positive => value.is_finite() && value > 0.0,
            Requirement::NonNegative => value.is_finite() && value >= 0.0,
            Requirement::BufferMultiplier => value.is_finite() && value >= 1.0,
            Requirement::Finite => value.is_finite(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Positive => write!(f, "greater than 0"),
            Requirement::NonNegative => write!(f, "greater than or equal to 0"),
            Requirement::BufferMultiplier => write!(f, "at least 1.0"),
            Requirement::Finite => write!(f, "a finite number"),
        }
    }
}

/// Rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be {requirement}")]
pub struct ValidationError {
    pub field: &'static str,
    pub requirement: Requirement,
}

pub(crate) fn require(
    requirement: Requirement,
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    if requirement.holds(value) {
        Ok(())
    } else {
        Err(ValidationError { field, requirement })
    }
}
