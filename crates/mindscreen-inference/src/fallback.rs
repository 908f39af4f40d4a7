//! Built-in recommendations used when the generator cannot be used.
//!
//! Four lists banded by PHQ-9 total: 0–4, 5–9, 10–14, and 15 or more.
//! Prediction severities map onto the same bands.

use mindscreen_core::models::prediction::PredictionSeverity;

const MINIMAL: [&str; 5] = [
    "Start a daily 10-minute mindfulness meditation practice",
    "Take a 30-minute walk in nature three times per week",
    "Maintain a regular sleep schedule (aim for 7-8 hours each night)",
    "Keep a gratitude journal and write down three things you're thankful for each day",
    "Schedule time for activities you enjoy, even if brief",
];

const MILD: [&str; 5] = [
    "Practice 15 minutes of deep breathing exercises daily",
    "Engage in moderate exercise for 30 minutes, 3-4 times per week",
    "Reduce caffeine and alcohol consumption",
    "Connect with at least one friend or family member each day",
    "Try a relaxing bedtime routine to improve sleep quality",
];

const MODERATE: [&str; 5] = [
    "Structure your day with a consistent routine",
    "Set small, achievable goals and celebrate completing them",
    "Join a support group (online or in-person)",
    "Practice progressive muscle relaxation before bed",
    "Limit exposure to negative news and social media",
];

const SEVERE: [&str; 5] = [
    "Prioritize self-care activities like taking warm baths or gentle yoga",
    "Reach out to your support network when feeling overwhelmed",
    "Break tasks into very small, manageable steps",
    "Consider light therapy if seasonal factors affect your mood",
    "Practice self-compassion through positive self-talk exercises",
];

/// Static list for a PHQ-9 total.
pub fn for_score(total: u8) -> Vec<String> {
    let list = match total {
        0..=4 => &MINIMAL,
        5..=9 => &MILD,
        10..=14 => &MODERATE,
        _ => &SEVERE,
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Static list for a prediction severity, via its equivalent score band.
pub fn for_prediction(severity: PredictionSeverity) -> Vec<String> {
    let band_floor = match severity {
        PredictionSeverity::Minimal => 0,
        PredictionSeverity::Mild => 5,
        PredictionSeverity::Moderate => 10,
        PredictionSeverity::Severe => 15,
    };
    for_score(band_floor)
}
