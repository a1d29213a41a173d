//! Wire-level biometric input and the normalized snapshot every scoring
//! function consumes.

use serde::{Deserialize, Serialize};

const DEFAULT_SLEEP_HOURS: f64 = 7.0;
const DEFAULT_SLEEP_QUALITY: f64 = 7.0;
const DEFAULT_ENERGY: f64 = 6.0;
const DEFAULT_STRESS: f64 = 5.0;
const DEFAULT_MOOD: f64 = 7.0;
const DEFAULT_ACTIVITY_HOURS: f64 = 2.0;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SleepInput {
    pub hours: Option<f64>,
    pub quality: Option<f64>,
}

/// Caller-supplied biometric readings. Every field is optional; missing
/// values take documented defaults during normalization.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BiometricInput {
    pub sleep: Option<SleepInput>,
    pub energy: Option<f64>,
    pub stress: Option<f64>,
    pub mood: Option<f64>,
    /// Hours per week.
    pub physical_activity: Option<f64>,
}

/// User goal, used only for templated text insertion.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Goal {
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Goal {
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Miglioramento generale del benessere")
    }
}

/// A fully-populated, range-clamped snapshot. All defaulting and clamping
/// happens in [`Snapshot::normalize`]; downstream scoring assumes the ranges
/// documented on each field hold.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Hours slept, >= 0.
    pub sleep_hours: f64,
    /// 0-10.
    pub sleep_quality: f64,
    /// 0-10.
    pub energy: f64,
    /// 0-10.
    pub stress: f64,
    /// 0-10.
    pub mood: f64,
    /// Hours per week, >= 0.
    pub physical_activity: f64,
}

impl Snapshot {
    /// Apply defaults for missing fields, then clamp every reading into its
    /// documented range. 0-10 scales clamp on both ends; duration fields
    /// clamp at zero only.
    pub fn normalize(input: &BiometricInput) -> Self {
        let sleep = input.sleep.clone().unwrap_or_default();
        Self {
            sleep_hours: sleep.hours.unwrap_or(DEFAULT_SLEEP_HOURS).max(0.0),
            sleep_quality: clamp_scale(sleep.quality.unwrap_or(DEFAULT_SLEEP_QUALITY)),
            energy: clamp_scale(input.energy.unwrap_or(DEFAULT_ENERGY)),
            stress: clamp_scale(input.stress.unwrap_or(DEFAULT_STRESS)),
            mood: clamp_scale(input.mood.unwrap_or(DEFAULT_MOOD)),
            physical_activity: input
                .physical_activity
                .unwrap_or(DEFAULT_ACTIVITY_HOURS)
                .max(0.0),
        }
    }
}

fn clamp_scale(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 10.0) }
}

/// Format a 0-10 reading the way it is shown to users: whole numbers without
/// a decimal point, fractions with one digit.
pub fn fmt_level(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}
