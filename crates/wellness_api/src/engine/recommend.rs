//! Threshold-based recommendation texts.

use super::snapshot::Snapshot;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Recommendation {
    pub actions: String,
    pub tips: String,
    pub priority: Priority,
    pub timeframe: &'static str,
}

/// Accumulate advice for every threshold the snapshot crosses. The rules are
/// independent: a bad day can fire all four.
pub fn recommend(s: &Snapshot) -> Recommendation {
    let mut actions: Vec<&str> = Vec::new();
    let mut tips: Vec<&str> = Vec::new();

    if s.sleep_quality < 7.0 {
        actions.push("Stabilisci una routine del sonno consistente");
        tips.push("Vai a letto e svegliati sempre alla stessa ora");
    }
    if s.energy < 6.0 {
        actions.push("Implementa pause attive ogni 2 ore");
        tips.push("Fai stretching o cammina per 5-10 minuti");
    }
    if s.stress > 6.0 {
        actions.push("Pratica tecniche di rilassamento");
        tips.push("Dedica 10 minuti al giorno alla meditazione");
    }
    if s.physical_activity < 2.0 {
        actions.push("Aumenta gradualmente l'attività fisica");
        tips.push("Inizia con 20 minuti di camminata al giorno");
    }

    let (actions, tips) = if actions.is_empty() {
        (
            "Mantieni le tue abitudini attuali.".to_string(),
            "Continua così!".to_string(),
        )
    } else {
        (
            format!("{}.", actions.join(". ")),
            format!("{}.", tips.join(". ")),
        )
    };

    Recommendation {
        actions,
        tips,
        priority: if s.energy < 5.0 || s.stress > 7.0 {
            Priority::High
        } else {
            Priority::Medium
        },
        timeframe: "immediate",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::snapshot::{BiometricInput, SleepInput};

    fn snapshot(quality: f64, energy: f64, stress: f64, activity: f64) -> Snapshot {
        Snapshot::normalize(&BiometricInput {
            sleep: Some(SleepInput {
                hours: Some(7.0),
                quality: Some(quality),
            }),
            energy: Some(energy),
            stress: Some(stress),
            mood: Some(7.0),
            physical_activity: Some(activity),
        })
    }

    #[test]
    fn all_four_branches_fire_with_high_priority() {
        let rec = recommend(&snapshot(5.0, 3.0, 8.0, 1.0));
        assert!(rec.actions.contains("routine del sonno"));
        assert!(rec.actions.contains("pause attive"));
        assert!(rec.actions.contains("rilassamento"));
        assert!(rec.actions.contains("attività fisica"));
        assert!(rec.actions.ends_with('.'));
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.timeframe, "immediate");
    }

    #[test]
    fn good_readings_return_the_maintain_pair() {
        let rec = recommend(&snapshot(9.0, 9.0, 2.0, 6.0));
        assert_eq!(rec.actions, "Mantieni le tue abitudini attuali.");
        assert_eq!(rec.tips, "Continua così!");
        assert_eq!(rec.priority, Priority::Medium);
    }

    #[test]
    fn fired_rules_join_with_separator_and_trailing_period() {
        let rec = recommend(&snapshot(5.0, 9.0, 2.0, 6.0));
        assert_eq!(
            rec.actions,
            "Stabilisci una routine del sonno consistente."
        );
        let rec = recommend(&snapshot(5.0, 3.0, 2.0, 6.0));
        assert_eq!(
            rec.actions,
            "Stabilisci una routine del sonno consistente. Implementa pause attive ogni 2 ore."
        );
    }

    #[test]
    fn priority_thresholds_are_exclusive() {
        // energy 5 and stress 7 sit exactly on the boundary: still medium.
        assert_eq!(recommend(&snapshot(9.0, 5.0, 7.0, 6.0)).priority, Priority::Medium);
        assert_eq!(recommend(&snapshot(9.0, 4.9, 7.0, 6.0)).priority, Priority::High);
        assert_eq!(recommend(&snapshot(9.0, 5.0, 7.1, 6.0)).priority, Priority::High);
    }
}
