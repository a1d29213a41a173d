//! The weighted composite wellness score.

use super::snapshot::Snapshot;
use serde::Serialize;

// Hand-tuned prioritization: sleep and energy dominate. These weights sum to
// 1.00 and are part of the output contract.
const SLEEP_WEIGHT: f64 = 0.30;
const ENERGY_WEIGHT: f64 = 0.25;
const STRESS_WEIGHT: f64 = 0.20;
const MOOD_WEIGHT: f64 = 0.15;
const ACTIVITY_WEIGHT: f64 = 0.10;

/// Activity saturates at this many hours per week.
const ACTIVITY_CAP_HOURS: f64 = 5.0;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Trend {
    fn from_overall(overall: u8) -> Self {
        match overall {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Breakdown {
    pub sleep: u8,
    pub energy: u8,
    pub stress: u8,
    pub mood: u8,
    pub activity: u8,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct WellnessScore {
    pub overall: u8,
    pub breakdown: Breakdown,
    pub trend: Trend,
}

/// Compute the weighted composite score for a normalized snapshot.
///
/// Each sub-score is normalized to 0-100 independently; the stress sub-score
/// is inverted so low stress scores high.
pub fn primary_score(s: &Snapshot) -> WellnessScore {
    let sleep = s.sleep_quality / 10.0 * 100.0;
    let energy = s.energy / 10.0 * 100.0;
    let stress = (10.0 - s.stress) / 10.0 * 100.0;
    let mood = s.mood / 10.0 * 100.0;
    let activity = (s.physical_activity / ACTIVITY_CAP_HOURS).min(1.0) * 100.0;

    let overall = (sleep * SLEEP_WEIGHT
        + energy * ENERGY_WEIGHT
        + stress * STRESS_WEIGHT
        + mood * MOOD_WEIGHT
        + activity * ACTIVITY_WEIGHT)
        .round() as u8;

    WellnessScore {
        overall,
        breakdown: Breakdown {
            sleep: sleep.round() as u8,
            energy: energy.round() as u8,
            stress: stress.round() as u8,
            mood: mood.round() as u8,
            activity: activity.round() as u8,
        },
        trend: Trend::from_overall(overall),
    }
}
