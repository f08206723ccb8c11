use clap::Args;
use gig_decision::decision::{
    evaluate, Evaluation, Offer, Policy, VehicleCostModel, DEFAULT_MAX_MINUTES,
    DEFAULT_TIME_BUFFER_MULTIPLIER,
};
use gig_decision::error::AppError;
use gig_decision::orders::{
    CsvOrderRepository, DistanceUnit, EvaluateRequest, EvaluateResponse, OrderRepository,
    OrderStats,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Offer payout in dollars
    #[arg(long)]
    pub(crate) pay: f64,
    /// Trip distance (miles unless --km is set)
    #[arg(long)]
    pub(crate) miles: f64,
    /// Quoted trip duration in minutes
    #[arg(long)]
    pub(crate) minutes: f64,
    /// Minimum acceptable effective hourly rate
    #[arg(long)]
    pub(crate) target_hourly: f64,
    /// Minimum acceptable dollars per mile
    #[arg(long)]
    pub(crate) min_per_mile: f64,
    /// Decline anything paying less than this
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_payout: f64,
    /// Decline anything whose buffered duration exceeds this many minutes
    #[arg(long, default_value_t = DEFAULT_MAX_MINUTES)]
    pub(crate) max_minutes: f64,
    /// Score weight applied to the hourly rate
    #[arg(long, default_value_t = 1.0)]
    pub(crate) hourly_weight: f64,
    /// Score weight applied to dollars per mile
    #[arg(long, default_value_t = 1.0)]
    pub(crate) mile_weight: f64,
    /// Score penalty per buffered minute
    #[arg(long, default_value_t = 0.0)]
    pub(crate) time_penalty: f64,
    /// Score needed to TAKE (dual-threshold mode needs both thresholds)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) take_threshold: Option<f64>,
    /// Score needed for ONLY_IF_SLOW
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) slow_threshold: Option<f64>,
    /// Multiplier applied to quoted minutes
    #[arg(long, default_value_t = DEFAULT_TIME_BUFFER_MULTIPLIER)]
    pub(crate) time_buffer_multiplier: f64,
    /// Net fuel and wear out of the payout
    #[arg(long)]
    pub(crate) advanced_mode: bool,
    #[arg(long, default_value_t = VehicleCostModel::default().miles_per_gallon)]
    pub(crate) miles_per_gallon: f64,
    #[arg(long, default_value_t = VehicleCostModel::default().gas_price_per_gallon)]
    pub(crate) gas_price_per_gallon: f64,
    #[arg(long, default_value_t = VehicleCostModel::default().cost_per_mile)]
    pub(crate) cost_per_mile: f64,
    /// Always TAKE at or above this payout when the hourly target is met
    #[arg(long, default_value_t = 0.0)]
    pub(crate) guaranteed_take_pay: f64,
    /// Distance was entered in kilometres
    #[arg(long)]
    pub(crate) km: bool,
    /// Print the API response body instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    pub(crate) fn to_request(&self) -> EvaluateRequest {
        EvaluateRequest {
            min_payout: self.min_payout,
            max_minutes: self.max_minutes,
            hourly_weight: self.hourly_weight,
            mile_weight: self.mile_weight,
            time_penalty: self.time_penalty,
            take_threshold: self.take_threshold,
            slow_threshold: self.slow_threshold,
            time_buffer_multiplier: self.time_buffer_multiplier,
            advanced_mode: self.advanced_mode,
            miles_per_gallon: self.miles_per_gallon,
            gas_price_per_gallon: self.gas_price_per_gallon,
            cost_per_mile: self.cost_per_mile,
            guaranteed_take_pay: self.guaranteed_take_pay,
            distance_unit: if self.km {
                DistanceUnit::Km
            } else {
                DistanceUnit::Mi
            },
            ..EvaluateRequest::new(
                self.pay,
                self.miles,
                self.minutes,
                self.target_hourly,
                self.min_per_mile,
            )
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// CSV order log written by `serve --orders-csv`
    #[arg(long)]
    pub(crate) orders_csv: PathBuf,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let (offer, policy) = args.to_request().validate()?;
    let evaluation = evaluate(&offer, &policy);

    if args.json {
        let response = EvaluateResponse::from(&evaluation);
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Response unavailable: {err}"),
        }
    } else {
        render_evaluation(&offer, &policy, &evaluation);
    }

    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let repository = CsvOrderRepository::open(args.orders_csv)?;
    let stats = OrderStats::from_records(&repository.all()?);
    render_stats(&stats);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Offer decision demo");

    for (label, offer, policy) in demo_offers() {
        println!("\n{label}");
        let evaluation = evaluate(&offer, &policy);
        render_evaluation(&offer, &policy, &evaluation);
    }

    Ok(())
}

fn demo_offers() -> Vec<(&'static str, Offer, Policy)> {
    let baseline = Policy::new(24.0, 1.5);

    let mut picky = baseline.clone().with_thresholds(Some(45.0), Some(30.0));
    picky.guaranteed_take_pay = 25.0;

    let mut short_shift = baseline.clone();
    short_shift.max_minutes = 40.0;

    vec![
        (
            "Quick downtown drop",
            Offer::new(9.5, 2.1, 14.0),
            baseline.clone(),
        ),
        (
            "Long suburban run",
            Offer::new(11.0, 9.8, 32.0),
            baseline.clone(),
        ),
        (
            "Same run with vehicle costs",
            Offer::new(11.0, 9.8, 32.0),
            baseline.clone().with_cost_model(VehicleCostModel::default()),
        ),
        (
            "Score-based policy",
            Offer::new(14.0, 4.5, 22.0),
            picky,
        ),
        (
            "Airport trip past the shift limit",
            Offer::new(38.0, 21.0, 48.0),
            short_shift,
        ),
    ]
}

fn render_evaluation(offer: &Offer, policy: &Policy, evaluation: &Evaluation) {
    let rounded = evaluation.rounded();
    println!(
        "- Offer: ${:.2} for {:.1} mi / {:.0} min ({} mode{})",
        offer.pay,
        offer.miles,
        offer.minutes,
        policy.mode.label(),
        if policy.advanced_mode() {
            ", net of vehicle costs"
        } else {
            ""
        }
    );
    println!(
        "- Effective: ${:.2} over {:.1} min",
        evaluation.metrics.effective_pay, evaluation.metrics.effective_minutes
    );
    println!(
        "- ${:.2}/hr | ${:.2}/mi | score {:.2}",
        rounded.hourly_rate, rounded.dollars_per_mile, rounded.score
    );
    println!(
        "- Decision: {} (by {})",
        evaluation.decision,
        evaluation.basis.label()
    );
}

fn render_stats(stats: &OrderStats) {
    let overall = &stats.overall;
    println!("Order log summary");
    println!(
        "- {} orders | ${:.2}/hr average",
        overall.total_orders, overall.avg_hourly
    );
    println!(
        "- {} taken | {} only if slow | {} declined",
        overall.accepted, overall.only_if_slow, overall.declined
    );

    if stats.best_hours.is_empty() {
        println!("\nBest hours: none logged yet");
        return;
    }

    println!("\nBest hours (UTC)");
    for bucket in &stats.best_hours {
        println!(
            "- {}:00 ${:.2}/hr over {} orders",
            bucket.hour, bucket.avg_hourly, bucket.orders
        );
    }

    println!("\nBy day");
    for bucket in &stats.by_day {
        println!(
            "- {} ${:.2}/hr over {} orders",
            bucket.day, bucket.avg_hourly, bucket.orders
        );
    }
}
