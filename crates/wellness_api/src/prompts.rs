//! Prompt templates for the text-generation collaborator.
//!
//! Templates are Italian, matching the product language, and instruct the
//! model to answer with bare JSON so the response can be parsed with
//! [`crate::llm::extract_json`].

use crate::engine::snapshot::{Goal, Snapshot, fmt_level};

fn biometric_block(s: &Snapshot) -> String {
    format!(
        "- Sonno: {} ore, qualità {}/10\n\
         - Energia: {}/10\n\
         - Stress: {}/10\n\
         - Umore: {}/10\n\
         - Attività fisica: {} ore/settimana",
        fmt_level(s.sleep_hours),
        fmt_level(s.sleep_quality),
        fmt_level(s.energy),
        fmt_level(s.stress),
        fmt_level(s.mood),
        fmt_level(s.physical_activity),
    )
}

/// Prompt for the one-shot health analysis endpoint.
pub fn health_analysis_prompt(s: &Snapshot, goal: &Goal, query: Option<&str>) -> String {
    format!(
        "Sei un esperto AI di salute e benessere. Analizza questi dati biometrici e fornisci \
         consigli personalizzati in italiano.\n\n\
         DATI BIOMETRICI:\n{}\n\n\
         OBIETTIVO UTENTE: {}\n\n\
         RICHIESTA: {}\n\n\
         Fornisci una risposta in formato JSON con questi campi:\n\
         {{\n\
         \x20 \"prediction\": \"Analisi dello stato attuale (2-3 frasi)\",\n\
         \x20 \"motivation\": \"Motivazione personalizzata basata sull'obiettivo (2-3 frasi)\",\n\
         \x20 \"action\": \"Azioni concrete e specifiche da implementare oggi\",\n\
         \x20 \"extraTip\": \"Suggerimento bonus o insight particolare\",\n\
         \x20 \"score\": numero da 1 a 100 che rappresenta il punteggio di salute generale\n\
         }}\n\n\
         Rispondi SOLO con il JSON, senza altre spiegazioni.",
        biometric_block(s),
        goal.description_or_default(),
        query.unwrap_or("Fornisci un'analisi completa e consigli personalizzati"),
    )
}

/// Prompt for the conversational coach endpoint.
pub fn coach_chat_prompt(message: &str, s: &Snapshot, goal: &Goal) -> String {
    format!(
        "Sei un coach AI specializzato in salute e benessere. Rispondi in italiano.\n\n\
         DATI UTENTE:\n{}\n\n\
         OBIETTIVO: {}\n\n\
         DOMANDA UTENTE: \"{}\"\n\n\
         Fornisci una risposta dettagliata in formato JSON con questi campi:\n\
         {{\n\
         \x20 \"response\": \"Risposta principale alla domanda (3-4 frasi)\",\n\
         \x20 \"energyAnalysis\": \"Analisi specifica dei livelli di energia\",\n\
         \x20 \"energyActions\": \"Azioni concrete per migliorare l'energia\",\n\
         \x20 \"focusAnalysis\": \"Analisi della capacità di concentrazione\",\n\
         \x20 \"focusActions\": \"Azioni per migliorare il focus\",\n\
         \x20 \"sleepAnalysis\": \"Analisi della qualità del sonno\",\n\
         \x20 \"sleepActions\": \"Azioni per migliorare il sonno\",\n\
         \x20 \"stressAnalysis\": \"Analisi del livello di stress\",\n\
         \x20 \"stressActions\": \"Tecniche per gestire lo stress\",\n\
         \x20 \"prediction\": \"Previsione per le prossime ore/giorni\",\n\
         \x20 \"score\": numero da 1 a 100\n\
         }}\n\n\
         Rispondi SOLO con il JSON, senza altre spiegazioni.",
        biometric_block(s),
        goal.description_or_default(),
        message,
    )
}
