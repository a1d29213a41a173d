//! Short-horizon vitality forecasting with circadian adjustment.
//!
//! The clock is a parameter: callers pass the current local time, tests pass
//! a fixed one. Nothing here reads the wall clock.

use super::snapshot::Snapshot;
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Serialize;

const POST_LUNCH_FACTOR: f64 = 0.85;
const NIGHT_FACTOR: f64 = 0.70;

const VITALITY_FLOOR: f64 = 20.0;
const VITALITY_CEIL: f64 = 100.0;
const RISK_THRESHOLD: u8 = 50;

/// Multiplicative derating of predicted vitality for known low-alertness
/// clock windows. `hour` is a 0-23 hour of day.
pub fn circadian_factor(hour: u32) -> f64 {
    if (14..=16).contains(&hour) {
        POST_LUNCH_FACTOR
    } else if hour >= 22 || hour <= 5 {
        NIGHT_FACTOR
    } else {
        1.0
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VitalityPrediction {
    pub timeframe: String,
    pub vitality_score: u8,
    pub risks: Vec<String>,
    pub probability: f64,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Energy,
    Stress,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub timeframe: String,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Forecast {
    pub predictions: Vec<VitalityPrediction>,
    pub alerts: Vec<Alert>,
}

/// Predict vitality for each of the next `horizon_hours` hours starting from
/// `now`. Hours whose score drops below the risk threshold carry an
/// `energy_dip` risk and emit a medium-severity alert stamped with the clock
/// time of that hour.
pub fn predict_vitality(s: &Snapshot, horizon_hours: u32, now: NaiveDateTime) -> Forecast {
    let base = ((s.energy + (10.0 - s.stress) + s.mood) / 3.0) * 10.0;

    let mut forecast = Forecast::default();
    for i in 1..=horizon_hours {
        let at = now + Duration::hours(i64::from(i));
        let adjusted = base * circadian_factor(at.hour());
        let vitality_score = adjusted.clamp(VITALITY_FLOOR, VITALITY_CEIL).round() as u8;
        let at_risk = vitality_score < RISK_THRESHOLD;

        forecast.predictions.push(VitalityPrediction {
            timeframe: format!("{}h", i),
            vitality_score,
            risks: if at_risk {
                vec!["energy_dip".to_string()]
            } else {
                Vec::new()
            },
            probability: if at_risk { 0.7 } else { 0.3 },
        });

        if at_risk {
            forecast.alerts.push(Alert {
                kind: AlertKind::Energy,
                severity: AlertSeverity::Medium,
                message: "Possibile calo energetico previsto".to_string(),
                timeframe: at.format("%H:%M").to_string(),
            });
        }
    }
    forecast
}
