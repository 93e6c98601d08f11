//! Onboarding question catalog and wizard engine.
//!
//! Defines the fixed, ordered sequence of onboarding questions, the typed
//! answer values collected for them, and the [`Wizard`] state machine that
//! drives the step-by-step questionnaire. Validation is exhaustive over the
//! question's input kind, so a malformed answer shape is rejected at the
//! type level rather than by ad-hoc runtime checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Question catalog
// ---------------------------------------------------------------------------

/// The input kind of a question, which dictates the shape of its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    /// Partial country/city/postal-code record.
    Location,
    /// Zero or more values drawn from a fixed option set.
    MultiSelect,
    /// Exactly one value drawn from a fixed option set.
    Radio,
    /// An integer within `[min, max]`.
    Range,
    /// Free text.
    Text,
}

/// A selectable option for radio and multi-select questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A single question definition in the onboarding sequence.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    /// Stable identifier; doubles as the answer-set key.
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    /// Option set for radio/multi-select questions; empty otherwise.
    pub options: &'static [QuestionOption],
    /// Lower bound for range questions.
    pub min: Option<i64>,
    /// Upper bound for range questions.
    pub max: Option<i64>,
    /// Slider step for range questions.
    pub step: Option<i64>,
    /// Display unit for range questions (e.g. `"kWh"`).
    pub unit: Option<&'static str>,
}

impl Question {
    const fn choice(
        id: &'static str,
        title: &'static str,
        prompt: &'static str,
        kind: QuestionKind,
        options: &'static [QuestionOption],
    ) -> Self {
        Question {
            id,
            title,
            prompt,
            kind,
            required: true,
            options,
            min: None,
            max: None,
            step: None,
            unit: None,
        }
    }
}

const ENERGY_TYPE_OPTIONS: &[QuestionOption] = &[
    QuestionOption { value: "wind", label: "Wind Energy" },
    QuestionOption { value: "tidal", label: "Tidal Energy" },
    QuestionOption { value: "solar", label: "Solar Energy" },
    QuestionOption { value: "hydroelectric", label: "Hydroelectric" },
];

const PROPERTY_TYPE_OPTIONS: &[QuestionOption] = &[
    QuestionOption { value: "house", label: "Single Family House" },
    QuestionOption { value: "apartment", label: "Apartment/Condo" },
    QuestionOption { value: "farm", label: "Farm/Rural Property" },
    QuestionOption { value: "business", label: "Small Business" },
];

const TIMEFRAME_OPTIONS: &[QuestionOption] = &[
    QuestionOption { value: "immediate", label: "Within 3 months" },
    QuestionOption { value: "short", label: "3-6 months" },
    QuestionOption { value: "medium", label: "6-12 months" },
    QuestionOption { value: "long", label: "1+ years" },
];

const GOAL_OPTIONS: &[QuestionOption] = &[
    QuestionOption { value: "cost_savings", label: "Reduce Energy Costs" },
    QuestionOption { value: "environmental", label: "Environmental Impact" },
    QuestionOption { value: "independence", label: "Energy Independence" },
    QuestionOption { value: "property_value", label: "Increase Property Value" },
    QuestionOption { value: "reliability", label: "Power Reliability" },
];

/// The fixed, ordered onboarding question sequence.
pub const QUESTIONS: &[Question] = &[
    Question {
        id: "location",
        title: "Tell us about your location",
        prompt: "Where are you located?",
        kind: QuestionKind::Location,
        required: true,
        options: &[],
        min: None,
        max: None,
        step: None,
        unit: None,
    },
    Question::choice(
        "energyType",
        "Energy preferences",
        "Which renewable energy sources interest you?",
        QuestionKind::MultiSelect,
        ENERGY_TYPE_OPTIONS,
    ),
    Question::choice(
        "propertyType",
        "Property information",
        "What type of property do you have?",
        QuestionKind::Radio,
        PROPERTY_TYPE_OPTIONS,
    ),
    Question {
        id: "currentUsage",
        title: "Energy consumption",
        prompt: "What's your approximate monthly energy usage?",
        kind: QuestionKind::Range,
        required: true,
        options: &[],
        min: Some(200),
        max: Some(2000),
        step: Some(50),
        unit: Some("kWh"),
    },
    Question::choice(
        "timeframe",
        "Implementation timeline",
        "When would you like to implement renewable energy solutions?",
        QuestionKind::Radio,
        TIMEFRAME_OPTIONS,
    ),
    Question::choice(
        "goals",
        "Your sustainability goals",
        "What are your main goals for renewable energy?",
        QuestionKind::MultiSelect,
        GOAL_OPTIONS,
    ),
];

/// Total number of questions in the sequence.
pub const TOTAL_QUESTIONS: usize = QUESTIONS.len();

/// Look up a question definition by id.
pub fn question_by_id(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

// ---------------------------------------------------------------------------
// Answer values
// ---------------------------------------------------------------------------

/// Partial location record. All fields optional; an answer counts as given
/// when at least one field is non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocationAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl LocationAnswer {
    /// True when no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        ![&self.country, &self.city, &self.zip_code]
            .into_iter()
            .any(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// A typed answer value, one variant per JSON wire shape.
///
/// Serialized untagged so the wire format stays
/// `string | string[] | number | object`, matching what the browser-side
/// wizard submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text or a radio selection.
    Text(String),
    /// Multi-select choices.
    Selections(Vec<String>),
    /// Range value.
    Number(i64),
    /// Location record.
    Location(LocationAnswer),
}

/// The accumulated mapping from question id to answer value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(pub BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    /// Store or replace the answer for a question.
    ///
    /// Rejects ids outside the catalog: answer-set keys correspond 1:1 to
    /// the ids in [`QUESTIONS`].
    pub fn insert(&mut self, question_id: &str, value: AnswerValue) -> Result<(), CoreError> {
        if question_by_id(question_id).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown question id '{question_id}'"
            )));
        }
        self.0.insert(question_id.to_string(), value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Per-question "is this answered" predicate used for progress display.
///
/// Deliberately independent of [`validate_answer`]: it never gates step
/// advancement, only the progress metric.
pub fn answer_satisfies(question: &Question, answer: Option<&AnswerValue>) -> bool {
    match (question.kind, answer) {
        (QuestionKind::Text | QuestionKind::Radio, Some(AnswerValue::Text(s))) => {
            !s.trim().is_empty()
        }
        (QuestionKind::MultiSelect, Some(AnswerValue::Selections(v))) => !v.is_empty(),
        (QuestionKind::Range, Some(AnswerValue::Number(_))) => true,
        (QuestionKind::Location, Some(AnswerValue::Location(loc))) => !loc.is_empty(),
        _ => false,
    }
}

/// Validate one question's answer for advancement or submission.
///
/// Checks requiredness, answer shape against the question kind, option-set
/// membership, and range bounds.
pub fn validate_answer(question: &Question, answer: Option<&AnswerValue>) -> Result<(), CoreError> {
    let Some(answer) = answer else {
        if question.required {
            return Err(CoreError::Validation(format!(
                "Question '{}' requires an answer",
                question.id
            )));
        }
        return Ok(());
    };

    match (question.kind, answer) {
        (QuestionKind::Text, AnswerValue::Text(s)) => {
            if question.required && s.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Question '{}' requires a non-empty answer",
                    question.id
                )));
            }
            Ok(())
        }
        (QuestionKind::Radio, AnswerValue::Text(s)) => {
            if s.trim().is_empty() {
                if question.required {
                    return Err(CoreError::Validation(format!(
                        "Question '{}' requires a selection",
                        question.id
                    )));
                }
                return Ok(());
            }
            if !question.options.iter().any(|o| o.value == s) {
                return Err(CoreError::Validation(format!(
                    "'{s}' is not a valid option for question '{}'",
                    question.id
                )));
            }
            Ok(())
        }
        (QuestionKind::MultiSelect, AnswerValue::Selections(values)) => {
            if question.required && values.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Question '{}' requires at least one selection",
                    question.id
                )));
            }
            for v in values {
                if !question.options.iter().any(|o| o.value == v) {
                    return Err(CoreError::Validation(format!(
                        "'{v}' is not a valid option for question '{}'",
                        question.id
                    )));
                }
            }
            Ok(())
        }
        (QuestionKind::Range, AnswerValue::Number(n)) => {
            let min = question.min.unwrap_or(i64::MIN);
            let max = question.max.unwrap_or(i64::MAX);
            if *n < min || *n > max {
                return Err(CoreError::Validation(format!(
                    "Answer {n} for question '{}' is outside the range {min}..={max}",
                    question.id
                )));
            }
            Ok(())
        }
        (QuestionKind::Location, AnswerValue::Location(loc)) => {
            if question.required && loc.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Question '{}' requires at least one location field",
                    question.id
                )));
            }
            Ok(())
        }
        (kind, _) => Err(CoreError::Validation(format!(
            "Answer for question '{}' does not match its input kind {kind:?}",
            question.id
        ))),
    }
}

/// Validate a complete answer set for submission.
///
/// Every key must name a catalog question, and every question's answer must
/// pass [`validate_answer`].
pub fn validate_answer_set(answers: &AnswerSet) -> Result<(), CoreError> {
    for key in answers.0.keys() {
        if question_by_id(key).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown question id '{key}' in answer set"
            )));
        }
    }
    for question in QUESTIONS {
        validate_answer(question, answers.get(question.id))?;
    }
    Ok(())
}

/// Count the questions whose stored answer satisfies the answered predicate,
/// independent of the wizard's current step.
pub fn completion_count(answers: &AnswerSet) -> usize {
    QUESTIONS
        .iter()
        .filter(|q| answer_satisfies(q, answers.get(q.id)))
        .count()
}

// ---------------------------------------------------------------------------
// Wizard state machine
// ---------------------------------------------------------------------------

/// Outcome of a successful [`Wizard::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved to the given step index.
    Advanced(usize),
    /// The final step validated; the accumulated answer set is ready to
    /// be submitted to the credential store.
    ReadyToSubmit,
}

/// Linear questionnaire driver over [`QUESTIONS`].
///
/// Steps are `0..TOTAL_QUESTIONS`. Advancement validates the current step's
/// answer; a failed validation leaves the step unchanged so the caller can
/// re-prompt. The progress metric ([`Wizard::completion_count`]) is
/// independent of position and never gates advancement.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: usize,
    answers: AnswerSet,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a wizard with previously collected answers at step 0.
    pub fn with_answers(answers: AnswerSet) -> Self {
        Wizard { step: 0, answers }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }

    /// The question at the current step.
    pub fn current_question(&self) -> &'static Question {
        &QUESTIONS[self.step]
    }

    /// Store or replace an answer. No shape validation happens at write
    /// time; that is deferred to [`Wizard::advance`].
    pub fn record_answer(&mut self, question_id: &str, value: AnswerValue) -> Result<(), CoreError> {
        self.answers.insert(question_id, value)
    }

    /// Validate the current step and move forward.
    ///
    /// On validation failure the step index is unchanged and the error
    /// describes what to re-prompt for. From the final step a successful
    /// validation yields [`Progress::ReadyToSubmit`] instead of moving.
    pub fn advance(&mut self) -> Result<Progress, CoreError> {
        let question = self.current_question();
        validate_answer(question, self.answers.get(question.id))?;

        if self.step + 1 < TOTAL_QUESTIONS {
            self.step += 1;
            Ok(Progress::Advanced(self.step))
        } else {
            Ok(Progress::ReadyToSubmit)
        }
    }

    /// Move back one step; no-op at step 0.
    pub fn retreat(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Number of questions answered so far, in any order.
    pub fn completion_count(&self) -> usize {
        completion_count(&self.answers)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
