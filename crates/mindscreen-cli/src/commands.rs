//! Interactive flows behind each subcommand.
//!
//! Every flow takes its collaborators as trait implementations so it can be
//! driven end to end with scripted input and in-process fakes.

use std::io::{BufRead, Write};
use std::path::Path;

use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::PredictionResult;
use mindscreen_core::models::recommendation::RecommendationSet;
use mindscreen_inference::news::{NewsSource, headlines};
use mindscreen_inference::predict::Predictor;
use mindscreen_inference::recommend::{TextGenerator, recommend_for_phq9, recommend_for_prediction};
use mindscreen_instruments::error::InstrumentError;
use mindscreen_instruments::fields::{FieldKind, FieldSpec};
use mindscreen_instruments::instruments::phq9::{self, Answer, Difficulty, QUESTIONS};
use mindscreen_instruments::instruments::student::{self, StudentForm};
use mindscreen_instruments::session::{Phq9Report, Phq9Session};
use mindscreen_instruments::wizard::{Applied, AssessmentWizard, SubmitOutcome};
use mindscreen_instruments::all_instruments;
use tracing::info;

use crate::config::{self, MindscreenConfig};
use crate::terminal::Terminal;

pub const SCREENING_DISCLAIMER: &str = "The PHQ-9 is a screening tool, not a diagnostic \
instrument. Your healthcare provider can offer a comprehensive evaluation and develop a \
treatment plan tailored to your specific needs.";

pub const RECOMMENDATION_DISCLAIMER: &str = "These recommendations are AI-generated suggestions \
for general wellness. They are not a substitute for professional medical advice, diagnosis, or \
treatment.";

// ── PHQ-9 ────────────────────────────────────────────────────────────────

/// Run the questionnaire until the user declines a retake. Returns the
/// last finalized report.
pub async fn phq9<R, W, G>(term: &mut Terminal<R, W>, generator: &G) -> eyre::Result<Phq9Report>
where
    R: BufRead,
    W: Write,
    G: TextGenerator,
{
    let mut session = Phq9Session::new();
    let answer_labels: Vec<&str> = Answer::ALL.iter().map(|a| a.label()).collect();
    let difficulty_labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();

    loop {
        term.say("PHQ-9 Depression Questionnaire")?;
        term.say(phq9::PROMPT)?;

        for (i, question) in QUESTIONS.iter().enumerate() {
            term.blank()?;
            let choice = term.choose(&format!("{}. {question}", i + 1), &answer_labels)?;
            let preview = session.set_answer(i + 1, Answer::ALL[choice])?;
            term.say(format_args!(
                "Running total: {} ({}, {} of {} answered)",
                preview.total,
                preview.severity,
                preview.answered,
                phq9::QUESTION_COUNT
            ))?;
        }

        term.blank()?;
        let choice = term.choose(phq9::DIFFICULTY_PROMPT, &difficulty_labels)?;
        session.set_difficulty(Difficulty::ALL[choice])?;

        let report = session.submit()?.clone();
        info!(session_id = %report.session_id, "phq9 completed");
        print_phq9_report(term, &report)?;

        let set = recommend_for_phq9(generator, report.total(), report.severity()).await;
        print_recommendations(term, &set)?;
        term.say(SCREENING_DISCLAIMER)?;

        term.blank()?;
        if !term.confirm("Take the questionnaire again?", false)? {
            return Ok(report);
        }
        session.retake();
    }
}

fn print_phq9_report<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    report: &Phq9Report,
) -> eyre::Result<()> {
    term.blank()?;
    term.say("Your PHQ-9 Results")?;
    term.say(format_args!("Total score: {}/{}", report.total(), phq9::MAX_TOTAL))?;
    term.say(format_args!("Severity: {}", report.severity()))?;
    term.say(format_args!("Functional difficulty: {}", report.difficulty.label()))?;
    term.say(&report.interpretation)?;
    if report.crisis() {
        term.blank()?;
        term.say(phq9::CRISIS_RESOURCES)?;
    }
    Ok(())
}

// ── Student screening ────────────────────────────────────────────────────

/// Collect and validate the student form, then ask for a prediction,
/// offering a retry on failure.
pub async fn student<R, W, P>(term: &mut Terminal<R, W>, predictor: &P) -> eyre::Result<()>
where
    R: BufRead,
    W: Write,
    P: Predictor,
{
    term.say("Student Depression Screening")?;

    let mut form = StudentForm::default();
    let request = loop {
        form = ask_student_form(term, form)?;
        match form.validate() {
            Ok(request) => break request,
            Err(InstrumentError::InvalidForm { errors }) => {
                term.blank()?;
                term.say("Please fix the following:")?;
                for e in &errors {
                    term.say(format_args!("  - {e}"))?;
                }
                term.blank()?;
            }
            Err(e) => return Err(e.into()),
        }
    };

    let result = loop {
        match predictor.predict_student(&request).await {
            Ok(result) => break Some(result),
            Err(e) => {
                term.say(format_args!("Error: {e}"))?;
                if !term.confirm("Retry?", true)? {
                    break None;
                }
            }
        }
    };

    term.blank()?;
    if let Some(result) = &result {
        let verdict = if result.is_positive() {
            "Depression risk detected"
        } else {
            "No depression risk detected"
        };
        term.say(format_args!("Result: {verdict}"))?;
        if let Some(confidence) = result.confidence_label() {
            term.say(format_args!("Confidence: {confidence}"))?;
        }
    }

    let positive = result.as_ref().is_some_and(PredictionResult::is_positive);
    if positive || request.reports_suicidal_thoughts() {
        term.blank()?;
        term.say(student::CRISIS_RESOURCES)?;
    }
    Ok(())
}

/// Ask every field, offering the previous answer as the default.
fn ask_student_form<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    previous: StudentForm,
) -> eyre::Result<StudentForm> {
    let age = term.ask_integer("Age", previous.age)?;
    let academic_pressure = ask_slider(term, "Academic pressure (0-5)", previous.academic_pressure)?;
    let cgpa = term.ask_decimal("CGPA (0.0-10.0)", previous.cgpa)?;
    let study_satisfaction =
        ask_slider(term, "Study satisfaction (0-5)", previous.study_satisfaction)?;
    let work_study_hours = term.ask_integer("Weekly work/study hours", previous.work_study_hours)?;
    let dietary_habits =
        term.choose("Dietary habits", &["Unhealthy", "Moderate", "Healthy"])? as i64;
    let suicidal_thoughts = term.choose("Have you ever had suicidal thoughts?", &["No", "Yes"])? == 1;
    let financial_stress = ask_slider(term, "Financial stress (0-5)", previous.financial_stress)?;

    Ok(StudentForm {
        age,
        academic_pressure,
        cgpa,
        study_satisfaction,
        dietary_habits: Some(dietary_habits),
        suicidal_thoughts: Some(suicidal_thoughts),
        work_study_hours,
        financial_stress,
    })
}

fn ask_slider<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    label: &str,
    current: i64,
) -> eyre::Result<i64> {
    Ok(term.ask_integer(label, Some(current))?.unwrap_or(current))
}

// ── Local-factors assessment ─────────────────────────────────────────────

enum Step {
    Next,
    Back,
    Submit,
    StartOver,
    Quit,
}

/// Walk the sectioned wizard for one assessment kind.
pub async fn assess<R, W, P, G>(
    term: &mut Terminal<R, W>,
    kind: AssessmentKind,
    predictor: &P,
    generator: &G,
) -> eyre::Result<()>
where
    R: BufRead,
    W: Write,
    P: Predictor,
    G: TextGenerator,
{
    let mut wizard = AssessmentWizard::new(kind);
    term.say(format_args!("{} Assessment", kind.title()))?;

    loop {
        ask_section(term, &mut wizard)?;

        match choose_step(term, &wizard)? {
            Step::Next => {
                wizard.next();
            }
            Step::Back => wizard.previous(),
            Step::StartOver => wizard.reset(),
            Step::Quit => return Ok(()),
            Step::Submit => {
                if !submit(term, &mut wizard, predictor, generator).await? {
                    continue;
                }
                term.blank()?;
                if term.confirm("Start a new assessment?", false)? {
                    wizard.reset();
                } else {
                    return Ok(());
                }
            }
        }
    }
}

fn ask_section<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    wizard: &mut AssessmentWizard,
) -> eyre::Result<()> {
    let progress = wizard.progress();
    let section = wizard.current_section();

    term.blank()?;
    term.say(format_args!(
        "Section {} of {}: {} ({:.0}%, {} of {} completed)",
        progress.section,
        progress.total,
        section.title,
        progress.percent,
        progress.completed,
        progress.total
    ))?;
    if let Some(description) = &section.description {
        term.say(description)?;
    }

    for field in &section.fields {
        let current = wizard.value(&field.id).unwrap_or_default();
        loop {
            let value = ask_field(term, field, current)?;
            match wizard.set_field(&field.id, value) {
                Ok(()) => break,
                Err(e) => term.say(format_args!("{e}"))?,
            }
        }
    }
    Ok(())
}

fn ask_field<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    field: &FieldSpec,
    current: i64,
) -> eyre::Result<i64> {
    match field.kind {
        FieldKind::Checkbox => Ok(term.confirm(&field.label, current == 1)? as i64),
        FieldKind::Select | FieldKind::Rating => {
            let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
            let index = term.choose(&field.label, &labels)?;
            Ok(field.options[index].value)
        }
        FieldKind::Number => Ok(term
            .ask_integer(&field.label, Some(current))?
            .unwrap_or(current)),
    }
}

fn choose_step<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    wizard: &AssessmentWizard,
) -> eyre::Result<Step> {
    let mut steps = Vec::new();
    if wizard.is_last() {
        steps.push(("Submit", Step::Submit));
    } else {
        steps.push(("Next", Step::Next));
    }
    if !wizard.is_first() {
        steps.push(("Back", Step::Back));
    }
    steps.push(("Start over", Step::StartOver));
    steps.push(("Quit", Step::Quit));

    let labels: Vec<&str> = steps.iter().map(|(label, _)| *label).collect();
    let index = term.choose("What next?", &labels)?;
    Ok(steps.swap_remove(index).1)
}

/// Submit the wizard and show the result and recommendations. Returns
/// `false` when no result was stored, so the user stays on the last section.
async fn submit<R, W, P, G>(
    term: &mut Terminal<R, W>,
    wizard: &mut AssessmentWizard,
    predictor: &P,
    generator: &G,
) -> eyre::Result<bool>
where
    R: BufRead,
    W: Write,
    P: Predictor,
    G: TextGenerator,
{
    let mut recommendation = loop {
        let ticket = wizard.begin_submit()?;
        term.say("Submitting...")?;
        let outcome = predictor
            .predict_assessment(ticket.kind(), ticket.payload())
            .await;

        match wizard.complete_submit(ticket, outcome) {
            SubmitOutcome::Stored { recommendation } => break recommendation,
            SubmitOutcome::Failed => {
                let message = wizard.error().unwrap_or("prediction failed").to_string();
                term.say(format_args!("Error: {message}"))?;
                wizard.dismiss_error();
                if !term.confirm("Retry?", true)? {
                    return Ok(false);
                }
            }
            SubmitOutcome::Stale => return Ok(false),
        }
    };

    if let Some(result) = wizard.result() {
        print_prediction(term, wizard.kind(), result)?;
    }

    loop {
        let set = recommend_for_prediction(generator, recommendation.kind(), recommendation.result()).await;
        match wizard.complete_recommendation(recommendation, set) {
            Applied::Stored | Applied::Stale => break,
            Applied::Failed => {
                let message = wizard
                    .recommendation_error()
                    .unwrap_or("recommendations unavailable")
                    .to_string();
                term.say(format_args!("Could not load recommendations: {message}"))?;
                if !term.confirm("Retry?", true)? {
                    break;
                }
                recommendation = wizard.begin_recommendation()?;
            }
        }
    }

    if let Some(set) = wizard.recommendations() {
        print_recommendations(term, set)?;
    }
    Ok(true)
}

fn print_prediction<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    kind: AssessmentKind,
    result: &PredictionResult,
) -> eyre::Result<()> {
    term.blank()?;
    term.say(format_args!("{} Prediction", kind.title()))?;
    if result.is_positive() {
        term.say(format_args!("{} Detected", kind.title()))?;
    } else {
        term.say(format_args!("No {} Detected", kind.title()))?;
    }
    if let Some(confidence) = result.confidence_label() {
        term.say(format_args!("Confidence Level: {confidence}"))?;
    }
    Ok(())
}

fn print_recommendations<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    set: &RecommendationSet,
) -> eyre::Result<()> {
    term.blank()?;
    term.say("Recommendations")?;
    for item in &set.items {
        term.say(format_args!("  • {item}"))?;
    }
    if set.is_fallback() {
        term.say("(Showing general suggestions; personalized ones are unavailable right now.)")?;
    }
    term.say(RECOMMENDATION_DISCLAIMER)?;
    Ok(())
}

// ── News and listings ────────────────────────────────────────────────────

pub async fn news<R, W, S>(term: &mut Terminal<R, W>, source: &S) -> eyre::Result<()>
where
    R: BufRead,
    W: Write,
    S: NewsSource,
{
    let articles = headlines(source).await;
    if articles.is_empty() {
        term.say("No mental health news right now.")?;
        return Ok(());
    }

    for article in &articles {
        term.blank()?;
        term.say(&article.title)?;
        let mut byline = Vec::new();
        if let Some(source) = &article.source.name {
            byline.push(source.clone());
        }
        if let Some(author) = &article.author {
            byline.push(author.clone());
        }
        if let Some(at) = &article.published_at {
            byline.push(at.strftime("%Y-%m-%d").to_string());
        }
        if !byline.is_empty() {
            term.say(byline.join(" · "))?;
        }
        if let Some(description) = &article.description {
            term.say(description)?;
        }
        term.say(&article.url)?;
    }
    Ok(())
}

pub fn instruments<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> eyre::Result<()> {
    for instrument in all_instruments() {
        let fields: usize = instrument.sections().iter().map(|s| s.fields.len()).sum();
        term.say(format_args!(
            "{:<12} {} ({} sections, {} fields)",
            instrument.id(),
            instrument.name(),
            instrument.sections().len(),
            fields
        ))?;
    }
    Ok(())
}

// ── Config ───────────────────────────────────────────────────────────────

pub fn config_show<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    config: &MindscreenConfig,
    path: &Path,
) -> eyre::Result<()> {
    let info = config::config_info(config, path);
    term.say(serde_json::to_string_pretty(&info)?)
}

pub fn config_init<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    force: bool,
) -> eyre::Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    config::save_to(&MindscreenConfig::default(), path)?;
    term.say(format_args!("Wrote default config to {}", path.display()))
}
