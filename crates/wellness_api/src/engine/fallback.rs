//! Deterministic replacements for the text-generation collaborator.
//!
//! Served whenever the completion API is unreachable, misconfigured, or
//! returns output that fails structured parse.

use super::snapshot::{Goal, Snapshot, fmt_level};
use serde::Serialize;

/// Unweighted four-factor mean, scaled to 0-100.
///
/// This intentionally differs from [`primary_score`](super::primary_score)'s
/// weighted composite; the two formulas are kept as separately named
/// functions and must not be unified. Ties at .5 round to even.
pub fn fallback_score(s: &Snapshot) -> u8 {
    (((s.energy + (10.0 - s.stress) + s.sleep_quality + s.mood) / 4.0) * 10.0).round_ties_even()
        as u8
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAnalysis {
    pub prediction: String,
    pub motivation: String,
    pub action: String,
    pub extra_tip: String,
    pub score: u8,
}

/// One concrete action for today, picked by the first threshold crossed.
fn action_advice(s: &Snapshot) -> &'static str {
    if s.sleep_quality < 6.0 {
        "Priorità: migliora la routine del sonno. Vai a letto 30 minuti prima stasera."
    } else if s.energy < 5.0 {
        "Fai una pausa di 10 minuti all'aria aperta e bevi un bicchiere d'acqua."
    } else if s.stress > 7.0 {
        "Pratica 5 minuti di respirazione profonda: inspira 4 secondi, trattieni 4, espira 6."
    } else {
        "Mantieni le tue buone abitudini e aggiungi 15 minuti di movimento oggi."
    }
}

fn prediction_band(score: u8) -> &'static str {
    if score > 70 {
        "una giornata energica"
    } else if score > 50 {
        "energia moderata"
    } else {
        "necessità di recupero"
    }
}

pub fn fallback_analysis(s: &Snapshot, goal: &Goal) -> FallbackAnalysis {
    let score = fallback_score(s);
    FallbackAnalysis {
        prediction: format!("Basandoti sui tuoi dati, prevedo {}", prediction_band(score)),
        motivation: format!(
            "Continua a lavorare su \"{}\": i piccoli cambiamenti fanno la differenza.",
            goal.description_or_default()
        ),
        action: action_advice(s).to_string(),
        extra_tip: format!(
            "Hai dormito {} ore: punta a una finestra di sonno regolare di 7-8 ore.",
            fmt_level(s.sleep_hours)
        ),
        score,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachReply {
    pub response: String,
    pub energy_analysis: String,
    pub energy_actions: String,
    pub focus_analysis: String,
    pub focus_actions: String,
    pub sleep_analysis: String,
    pub sleep_actions: String,
    pub stress_analysis: String,
    pub stress_actions: String,
    pub prediction: String,
    pub score: u8,
}

/// Deterministic coach reply. The opening sentence is routed by keywords in
/// the user message; the per-dimension analysis/action fields are always
/// filled from the snapshot regardless of the detected keyword.
pub fn fallback_coach_reply(message: &str, s: &Snapshot, goal: &Goal) -> CoachReply {
    let score = fallback_score(s);
    let lower = message.to_lowercase();

    let response = if lower.contains("energia") {
        format!(
            "La tua energia oggi è {}/10. Con pause attive regolari puoi stabilizzarla già da oggi.",
            fmt_level(s.energy)
        )
    } else if lower.contains("stress") {
        format!(
            "Il tuo stress è a {}/10. Qualche minuto di respirazione profonda aiuta a riportarlo sotto controllo.",
            fmt_level(s.stress)
        )
    } else if lower.contains("sonno") {
        format!(
            "Hai dormito {} ore con qualità {}/10. Una routine serale costante è il primo passo per migliorare.",
            fmt_level(s.sleep_hours),
            fmt_level(s.sleep_quality)
        )
    } else {
        format!(
            "Sto seguendo il tuo obiettivo \"{}\". I tuoi dati di oggi indicano un punteggio di {}/100.",
            goal.description_or_default(),
            score
        )
    };

    CoachReply {
        response,
        energy_analysis: format!("Livello di energia attuale: {}/10.", fmt_level(s.energy)),
        energy_actions: "Fai pause attive ogni 2 ore e idratati regolarmente.".to_string(),
        focus_analysis: format!(
            "Con stress a {}/10 la capacità di concentrazione è {}.",
            fmt_level(s.stress),
            if s.stress > 6.0 { "ridotta" } else { "buona" }
        ),
        focus_actions: "Lavora a blocchi di 25 minuti con pause brevi.".to_string(),
        sleep_analysis: format!(
            "{} ore di sonno con qualità {}/10.",
            fmt_level(s.sleep_hours),
            fmt_level(s.sleep_quality)
        ),
        sleep_actions: "Vai a letto alla stessa ora e riduci gli schermi la sera.".to_string(),
        stress_analysis: format!("Livello di stress attuale: {}/10.", fmt_level(s.stress)),
        stress_actions: "Dedica 10 minuti al giorno a respirazione o meditazione.".to_string(),
        prediction: format!("Per le prossime ore prevedo {}.", prediction_band(score)),
        score,
    }
}
