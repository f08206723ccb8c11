use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::{require, Requirement, ValidationError};
use crate::decision::{effective_minutes, Decision, DEFAULT_TIME_BUFFER_MULTIPLIER};

/// Sequential identifier assigned by the order log, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

/// A decision the driver wants recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogOrderRequest {
    pub pay: f64,
    pub miles: f64,
    pub minutes: f64,
    pub decision: Decision,
    /// ISO-8601 timestamp; the log stamps the current UTC time when absent.
    #[serde(default)]
    pub time: Option<String>,
}

impl LogOrderRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(Requirement::Positive, "pay", self.pay)?;
        require(Requirement::Positive, "miles", self.miles)?;
        require(Requirement::Positive, "minutes", self.minutes)?;
        Ok(())
    }
}

/// Order accepted by the log but not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub pay: f64,
    pub miles: f64,
    pub minutes: f64,
    pub hourly_rate: f64,
    pub decision: Decision,
    pub logged_at: DateTime<FixedOffset>,
}

impl NewOrder {
    pub fn into_record(self, id: OrderId) -> OrderRecord {
        OrderRecord {
            id,
            pay: self.pay,
            miles: self.miles,
            minutes: self.minutes,
            hourly_rate: self.hourly_rate,
            decision: self.decision,
            logged_at: self.logged_at,
        }
    }
}

/// Persisted order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub pay: f64,
    pub miles: f64,
    pub minutes: f64,
    pub hourly_rate: f64,
    pub decision: Decision,
    pub logged_at: DateTime<FixedOffset>,
}

/// Body returned after an order is logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReceipt {
    pub status: String,
    pub id: OrderId,
}

impl LogReceipt {
    pub fn ok(id: OrderId) -> Self {
        Self {
            status: "ok".to_string(),
            id,
        }
    }
}

/// Hourly rate stored with a logged order.
///
/// Log entries do not carry the driver's policy, so this always applies the default
/// time buffer and can differ from the rate the evaluation reported.
pub fn logged_hourly_rate(pay: f64, minutes: f64) -> f64 {
    let minutes = effective_minutes(minutes, DEFAULT_TIME_BUFFER_MULTIPLIER);
    if minutes > 0.0 {
        (pay / minutes) * 60.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time format. Use ISO-8601.")]
pub struct InvalidTimestamp {
    pub value: String,
}

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parses an ISO-8601 timestamp. Values without an offset are read as UTC.
pub fn parse_logged_at(raw: &str) -> Result<DateTime<FixedOffset>, InvalidTimestamp> {
    let value = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp);
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(value, format) {
            return Ok(timestamp);
        }
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_and_remainder(value, "%Y-%m-%d")
        .ok()
        .and_then(|(date, rest)| date.and_hms_opt(hour_only(rest)?, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| InvalidTimestamp {
            value: raw.to_string(),
        })
}

/// Hour of a `T08` / ` 08` suffix; an empty suffix means midnight.
fn hour_only(rest: &str) -> Option<u32> {
    if rest.is_empty() {
        return Some(0);
    }

    let digits = rest.strip_prefix(['T', ' '])?;
    if digits.len() != 2 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
