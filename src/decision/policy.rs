use serde::Serialize;

/// Safety multiplier applied to quoted minutes when a caller does not supply one.
pub const DEFAULT_TIME_BUFFER_MULTIPLIER: f64 = 1.15;

/// Share of `target_hourly` an offer must reach to be worth taking when the queue is slow.
pub const SLOW_HOURLY_RATIO: f64 = 0.85;

/// Effective-minute ceiling used when the caller sets none.
pub const DEFAULT_MAX_MINUTES: f64 = 9999.0;

/// Driver preferences applied to a single offer.
///
/// Every knob the engine reads lives here; nothing is pulled from process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub target_hourly: f64,
    pub min_per_mile: f64,
    pub min_payout: f64,
    pub max_minutes: f64,
    pub weights: ScoreWeights,
    pub mode: DecisionMode,
    pub time_buffer_multiplier: f64,
    /// `Some` switches on advanced mode, netting vehicle cost out of pay.
    pub cost_model: Option<VehicleCostModel>,
    pub guaranteed_take_pay: f64,
}

impl Policy {
    /// Legacy-mode policy with the stock defaults for everything but the two rate floors.
    pub fn new(target_hourly: f64, min_per_mile: f64) -> Self {
        Self {
            target_hourly,
            min_per_mile,
            min_payout: 0.0,
            max_minutes: DEFAULT_MAX_MINUTES,
            weights: ScoreWeights::default(),
            mode: DecisionMode::Legacy,
            time_buffer_multiplier: DEFAULT_TIME_BUFFER_MULTIPLIER,
            cost_model: None,
            guaranteed_take_pay: 0.0,
        }
    }

    pub fn with_thresholds(mut self, take: Option<f64>, slow: Option<f64>) -> Self {
        self.mode = DecisionMode::from_thresholds(take, slow);
        self
    }

    pub fn with_cost_model(mut self, cost_model: VehicleCostModel) -> Self {
        self.cost_model = Some(cost_model);
        self
    }

    pub fn with_time_buffer(mut self, multiplier: f64) -> Self {
        self.time_buffer_multiplier = multiplier;
        self
    }

    pub fn advanced_mode(&self) -> bool {
        self.cost_model.is_some()
    }
}

/// Linear weights composing the offer score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub hourly: f64,
    pub per_mile: f64,
    pub time_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hourly: 1.0,
            per_mile: 1.0,
            time_penalty: 0.0,
        }
    }
}

/// Rough operating-cost model used by advanced mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleCostModel {
    pub miles_per_gallon: f64,
    pub gas_price_per_gallon: f64,
    pub cost_per_mile: f64,
}

impl Default for VehicleCostModel {
    fn default() -> Self {
        Self {
            miles_per_gallon: 25.0,
            gas_price_per_gallon: 3.5,
            cost_per_mile: 0.30,
        }
    }
}

impl VehicleCostModel {
    pub fn fuel_cost(&self, miles: f64) -> f64 {
        if self.miles_per_gallon > 0.0 {
            (miles / self.miles_per_gallon) * self.gas_price_per_gallon
        } else {
            0.0
        }
    }

    pub fn wear_cost(&self, miles: f64) -> f64 {
        miles * self.cost_per_mile
    }
}

/// Rule family used once the guards have passed.
///
/// Chosen when the policy is built: supplying both score cutoffs selects
/// [`DecisionMode::DualThreshold`], anything less keeps [`DecisionMode::Legacy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionMode {
    Legacy,
    DualThreshold(ScoreThresholds),
}

impl DecisionMode {
    pub fn from_thresholds(take: Option<f64>, slow: Option<f64>) -> Self {
        match (take, slow) {
            (Some(take), Some(slow)) => Self::DualThreshold(ScoreThresholds::new(take, slow)),
            _ => Self::Legacy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DecisionMode::Legacy => "legacy",
            DecisionMode::DualThreshold(_) => "dual_threshold",
        }
    }
}

/// Score cutoffs, normalized so `take_cut >= slow_cut` whatever order the caller used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreThresholds {
    take_cut: f64,
    slow_cut: f64,
}

impl ScoreThresholds {
    pub fn new(take: f64, slow: f64) -> Self {
        Self {
            take_cut: take.max(slow),
            slow_cut: take.min(slow),
        }
    }

    pub fn take_cut(&self) -> f64 {
        self.take_cut
    }

    pub fn slow_cut(&self) -> f64 {
        self.slow_cut
    }
}
