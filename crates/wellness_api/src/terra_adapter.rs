//! Mapping from vendor-normalized Terra records to a biometric input.
//!
//! Vendor payloads are probed leniently: only the handful of fields the
//! engine consumes are read, everything else is ignored. Readings the
//! wearable cannot supply (energy, stress, mood) stay unset so the
//! normalization defaults apply.

use crate::engine::snapshot::{BiometricInput, SleepInput};
use serde_json::Value;
use terra_client::WebhookPayload;

/// Build a biometric input from one webhook delivery.
pub fn snapshot_from_webhook(payload: &WebhookPayload) -> BiometricInput {
    let sleep = &payload.data["sleep"];
    let has_activity_calories = payload.data["activity"]["calories"]
        .as_f64()
        .is_some_and(|c| c > 0.0);

    BiometricInput {
        sleep: Some(SleepInput {
            hours: sleep.get("duration").and_then(Value::as_f64).or(Some(6.0)),
            quality: sleep.get("score").and_then(Value::as_f64).or(Some(7.0)),
        }),
        energy: None,
        stress: None,
        mood: None,
        physical_activity: Some(if has_activity_calories { 2.0 } else { 0.0 }),
    }
}

/// Build a biometric input from pulled history: sleep records plus daily
/// summaries over a trailing window.
pub fn snapshot_from_history(sleep: &Value, daily: &Value) -> BiometricInput {
    let mut hours_total = 0.0;
    let mut hours_count = 0u32;
    let mut score_total = 0.0;
    let mut score_count = 0u32;

    if let Some(records) = sleep["data"].as_array() {
        for item in records {
            let seconds = item["sleep_durations_data"]["asleep"]["duration_asleep_state_seconds"]
                .as_f64();
            if let Some(secs) = seconds {
                hours_total += secs / 3600.0;
                hours_count += 1;
            }
            if let Some(score) = item["score"].as_f64() {
                score_total += score;
                score_count += 1;
            }
        }
    }

    let mut burned_calories = false;
    if let Some(days) = daily["data"].as_array() {
        burned_calories = days.iter().any(|item| {
            item["calories_data"]["total_burned_calories"]
                .as_f64()
                .is_some_and(|c| c > 0.0)
        });
    }

    BiometricInput {
        sleep: Some(SleepInput {
            hours: (hours_count > 0).then(|| hours_total / f64::from(hours_count)),
            // History scores come back on a 0-100 scale; the engine works 0-10.
            quality: (score_count > 0).then(|| score_total / f64::from(score_count) / 10.0),
        }),
        energy: None,
        stress: None,
        mood: None,
        physical_activity: Some(if burned_calories { 2.0 } else { 0.0 }),
    }
}
