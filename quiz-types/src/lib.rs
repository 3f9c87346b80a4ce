//! Core types shared by the quiz engine.
//!
//! This crate holds the plain data that crosses the engine boundary:
//! questions and their answer shapes, quiz documents, validation results,
//! session outcomes and configuration. Keeping them separate ensures:
//!
//! - **Renderer independence**: UI layers depend on data, never on engine logic
//! - **Stable wire format**: the JSON field names live in one place
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Minimum weighted keyword fraction required when a spec does not set one.
pub const DEFAULT_MIN_THRESHOLD: f64 = 0.6;

/// The six answer-shape categories a question can declare, plus a fallback
/// for tags the engine does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one lettered option.
    MultipleChoice,
    /// Type one word, synonyms accepted.
    SingleWord,
    /// Type "verdadero" or "falso".
    TrueFalse,
    /// Complete a sentence; scored by keywords.
    FillBlank,
    /// Mention several keywords; scored by keywords.
    MultipleKeywords,
    /// Free answer; scored by keywords.
    OpenEnded,
    /// Tag not understood by the engine.
    Unknown,
}

impl QuestionKind {
    /// Stable wire tag for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::SingleWord => "single_word",
            QuestionKind::TrueFalse => "true_false",
            QuestionKind::FillBlank => "fill_blank",
            QuestionKind::MultipleKeywords => "multiple_keywords",
            QuestionKind::OpenEnded => "open_ended",
            QuestionKind::Unknown => "unknown",
        }
    }

    /// Parses a wire tag. Unrecognized tags map to [`QuestionKind::Unknown`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "multiple_choice" => QuestionKind::MultipleChoice,
            "single_word" => QuestionKind::SingleWord,
            "true_false" => QuestionKind::TrueFalse,
            "fill_blank" => QuestionKind::FillBlank,
            "multiple_keywords" => QuestionKind::MultipleKeywords,
            "open_ended" => QuestionKind::OpenEnded,
            _ => QuestionKind::Unknown,
        }
    }

    /// Whether answers of this kind are scored against a [`KeywordSpec`].
    #[must_use]
    pub const fn is_keyword_based(self) -> bool {
        matches!(
            self,
            QuestionKind::FillBlank | QuestionKind::MultipleKeywords | QuestionKind::OpenEnded
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weighted required keywords for free-text questions.
///
/// `weights[i]` belongs to `words[i]`; a missing weight counts as 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSpec {
    /// Required keywords, in display order.
    #[serde(rename = "palabras", deserialize_with = "null_as_default")]
    pub words: Vec<String>,
    /// Per-keyword weights, index-aligned with `words`.
    #[serde(
        rename = "pesos",
        deserialize_with = "weights_or_unit",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub weights: Vec<f64>,
    /// Accepted alternatives per keyword.
    #[serde(
        rename = "sinonimos",
        deserialize_with = "null_as_default",
        skip_serializing_if = "FxHashMap::is_empty"
    )]
    pub synonyms_by_word: FxHashMap<String, Vec<String>>,
    /// Minimum weighted fraction (0.0-1.0) to count as correct.
    #[serde(rename = "umbral_minimo", skip_serializing_if = "Option::is_none")]
    pub min_threshold: Option<f64>,
}

impl KeywordSpec {
    /// Creates a spec with unit weights and no synonyms.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Weight of the keyword at `index`, 1 when no weight was given.
    #[inline]
    #[must_use]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }

    /// Synonyms listed for `word`, empty when none.
    #[must_use]
    pub fn synonyms_for(&self, word: &str) -> &[String] {
        self.synonyms_by_word
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Configured threshold, or `default` when none is set.
    #[inline]
    #[must_use]
    pub fn threshold_or(&self, default: f64) -> f64 {
        self.min_threshold.unwrap_or(default)
    }
}

/// Per-kind payload of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    /// Lettered options; the answer is one letter.
    MultipleChoice {
        /// Option letter to option text.
        options: BTreeMap<String, String>,
        /// Letter of the correct option.
        correct_answer: String,
    },
    /// One word with optional accepted synonyms.
    SingleWord {
        /// Expected word.
        correct_answer: String,
        /// Alternatives accepted as correct.
        synonyms: Vec<String>,
    },
    /// "verdadero" / "falso".
    TrueFalse {
        /// Expected literal.
        correct_answer: String,
    },
    /// Sentence completion scored by keywords.
    FillBlank(KeywordSpec),
    /// Keyword enumeration scored by keywords.
    MultipleKeywords(KeywordSpec),
    /// Open answer scored by keywords.
    OpenEnded(KeywordSpec),
    /// Tag the engine does not understand. Always validates as incorrect.
    Unknown {
        /// The raw `tipo` value found in the document.
        tag: String,
        /// Answer fields carried through unchanged.
        fields: UnrecognizedFields,
    },
}

/// Answer fields of a question whose `tipo` is not understood, kept as found
/// so the question serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnrecognizedFields {
    /// `opciones`, if present.
    pub options: Option<BTreeMap<String, String>>,
    /// `respuesta_correcta`, if present.
    pub correct_answer: Option<String>,
    /// `sinonimos`, if present.
    pub synonyms: Option<Vec<String>>,
    /// `palabras_clave`, if present.
    pub keywords: Option<KeywordSpec>,
}

impl QuestionBody {
    /// An unrecognized kind with no answer fields.
    pub fn unknown(tag: impl Into<String>) -> Self {
        QuestionBody::Unknown {
            tag: tag.into(),
            fields: UnrecognizedFields::default(),
        }
    }

    /// The kind of this payload.
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionBody::SingleWord { .. } => QuestionKind::SingleWord,
            QuestionBody::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionBody::FillBlank(_) => QuestionKind::FillBlank,
            QuestionBody::MultipleKeywords(_) => QuestionKind::MultipleKeywords,
            QuestionBody::OpenEnded(_) => QuestionKind::OpenEnded,
            QuestionBody::Unknown { .. } => QuestionKind::Unknown,
        }
    }

    /// Keyword spec for keyword-scored kinds.
    #[must_use]
    pub fn keyword_spec(&self) -> Option<&KeywordSpec> {
        match self {
            QuestionBody::FillBlank(spec)
            | QuestionBody::MultipleKeywords(spec)
            | QuestionBody::OpenEnded(spec) => Some(spec),
            _ => None,
        }
    }

    /// Literal expected answer for exact-match kinds.
    #[must_use]
    pub fn expected_answer(&self) -> Option<&str> {
        match self {
            QuestionBody::MultipleChoice { correct_answer, .. }
            | QuestionBody::SingleWord { correct_answer, .. }
            | QuestionBody::TrueFalse { correct_answer } => Some(correct_answer),
            _ => None,
        }
    }
}

/// A question as loaded from a quiz document. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "wire::RawQuestion", into = "wire::RawQuestion")]
pub struct Question {
    /// Prompt shown to the user.
    pub text: String,
    /// Citation shown after answering.
    pub reference: String,
    /// Kind-specific payload.
    pub body: QuestionBody,
}

impl Question {
    /// Creates a question without a reference.
    pub fn new(text: impl Into<String>, body: QuestionBody) -> Self {
        Self {
            text: text.into(),
            reference: String::new(),
            body,
        }
    }

    /// Sets the citation.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Shorthand for `self.body.kind()`.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }
}

mod wire {
    //! JSON shape of a question (`pregunta`, `tipo`, `opciones`, ...).

    use super::{KeywordSpec, Question, QuestionBody, QuestionKind, UnrecognizedFields};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Default, Serialize, Deserialize)]
    #[serde(default)]
    pub(super) struct RawQuestion {
        #[serde(rename = "pregunta")]
        text: Option<String>,
        #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(rename = "opciones", skip_serializing_if = "Option::is_none")]
        options: Option<BTreeMap<String, String>>,
        #[serde(rename = "respuesta_correcta", skip_serializing_if = "Option::is_none")]
        correct_answer: Option<String>,
        #[serde(rename = "sinonimos", skip_serializing_if = "Option::is_none")]
        synonyms: Option<Vec<String>>,
        #[serde(rename = "palabras_clave", skip_serializing_if = "Option::is_none")]
        keywords: Option<KeywordSpec>,
        #[serde(rename = "referencia", skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    }

    impl From<RawQuestion> for Question {
        fn from(raw: RawQuestion) -> Self {
            let tag = raw.kind.unwrap_or_else(|| "multiple_choice".to_owned());

            let body = match QuestionKind::from_tag(&tag) {
                QuestionKind::MultipleChoice => QuestionBody::MultipleChoice {
                    options: raw.options.unwrap_or_default(),
                    correct_answer: raw.correct_answer.unwrap_or_default(),
                },
                QuestionKind::SingleWord => QuestionBody::SingleWord {
                    correct_answer: raw.correct_answer.unwrap_or_default(),
                    synonyms: raw.synonyms.unwrap_or_default(),
                },
                QuestionKind::TrueFalse => QuestionBody::TrueFalse {
                    correct_answer: raw.correct_answer.unwrap_or_default(),
                },
                QuestionKind::FillBlank => {
                    QuestionBody::FillBlank(raw.keywords.unwrap_or_default())
                }
                QuestionKind::MultipleKeywords => {
                    QuestionBody::MultipleKeywords(raw.keywords.unwrap_or_default())
                }
                QuestionKind::OpenEnded => {
                    QuestionBody::OpenEnded(raw.keywords.unwrap_or_default())
                }
                QuestionKind::Unknown => QuestionBody::Unknown {
                    tag,
                    fields: UnrecognizedFields {
                        options: raw.options,
                        correct_answer: raw.correct_answer,
                        synonyms: raw.synonyms,
                        keywords: raw.keywords,
                    },
                },
            };

            Question {
                text: raw.text.unwrap_or_default(),
                reference: raw.reference.unwrap_or_default(),
                body,
            }
        }
    }

    impl From<Question> for RawQuestion {
        fn from(question: Question) -> Self {
            let mut raw = RawQuestion {
                text: Some(question.text),
                reference: (!question.reference.is_empty()).then_some(question.reference),
                ..RawQuestion::default()
            };

            match question.body {
                QuestionBody::MultipleChoice {
                    options,
                    correct_answer,
                } => {
                    raw.options = Some(options);
                    raw.correct_answer = Some(correct_answer);
                }
                QuestionBody::SingleWord {
                    correct_answer,
                    synonyms,
                } => {
                    raw.kind = Some(QuestionKind::SingleWord.label().to_owned());
                    raw.correct_answer = Some(correct_answer);
                    raw.synonyms = (!synonyms.is_empty()).then_some(synonyms);
                }
                QuestionBody::TrueFalse { correct_answer } => {
                    raw.kind = Some(QuestionKind::TrueFalse.label().to_owned());
                    raw.correct_answer = Some(correct_answer);
                }
                QuestionBody::FillBlank(spec) => {
                    raw.kind = Some(QuestionKind::FillBlank.label().to_owned());
                    raw.keywords = Some(spec);
                }
                QuestionBody::MultipleKeywords(spec) => {
                    raw.kind = Some(QuestionKind::MultipleKeywords.label().to_owned());
                    raw.keywords = Some(spec);
                }
                QuestionBody::OpenEnded(spec) => {
                    raw.kind = Some(QuestionKind::OpenEnded.label().to_owned());
                    raw.keywords = Some(spec);
                }
                QuestionBody::Unknown { tag, fields } => {
                    raw.kind = Some(tag);
                    raw.options = fields.options;
                    raw.correct_answer = fields.correct_answer;
                    raw.synonyms = fields.synonyms;
                    raw.keywords = fields.keywords;
                }
            }

            raw
        }
    }
}

/// A titled group of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Section heading.
    #[serde(rename = "titulo", deserialize_with = "null_as_default")]
    pub title: String,
    /// Questions in document order.
    #[serde(rename = "preguntas", deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

/// A complete quiz: metadata plus nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizDocument {
    /// Quiz title.
    #[serde(rename = "titulo", deserialize_with = "null_as_default")]
    pub title: String,
    /// Quiz author.
    #[serde(rename = "autor", deserialize_with = "null_as_default")]
    pub author: String,
    /// Optional blurb shown by viewers.
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections in document order.
    #[serde(rename = "secciones", deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
}

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keyword weights where a `null` entry counts as 1.
fn weights_or_unit<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let weights: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(weights
        .unwrap_or_default()
        .into_iter()
        .map(|w| w.unwrap_or(1.0))
        .collect())
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct QuizEnvelope {
    #[serde(rename = "cuestionario")]
    quiz: Option<QuizDocument>,
}

impl QuizDocument {
    /// Parses a document from its `{ "cuestionario": { ... } }` JSON form.
    ///
    /// A missing or `null` envelope, section list or question list yields an
    /// empty document rather than an error.
    ///
    /// # Errors
    /// Returns `DocumentError::Json` if the input is not valid JSON of the
    /// expected shape.
    pub fn from_json_str(input: &str) -> Result<Self, DocumentError> {
        let envelope: QuizEnvelope = serde_json::from_str(input)?;
        Ok(envelope.quiz.unwrap_or_default())
    }

    /// Serializes the document back into its enveloped JSON form.
    ///
    /// # Errors
    /// Returns `DocumentError::Json` if serialization fails.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        let envelope = QuizEnvelope {
            quiz: Some(self.clone()),
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Total number of questions across all sections.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// A keyword together with the weight it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedWord {
    /// Keyword as written in the question definition.
    pub word: String,
    /// Points the keyword is worth.
    pub weight: f64,
}

/// Detailed outcome of keyword scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOutcome {
    /// `ratio >= threshold`.
    pub is_correct: bool,
    /// Keywords found in the answer.
    pub matched_words: Vec<WeightedWord>,
    /// Keywords not found in the answer.
    pub missing_words: Vec<WeightedWord>,
    /// Sum of matched weights.
    pub score_obtained: f64,
    /// Sum of all weights.
    pub score_total: f64,
    /// `score_obtained / score_total`, 0 when the total is 0.
    pub ratio: f64,
}

/// Result of validating one answer. The shape depends on the question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Multiple choice, true/false and single word.
    Exact {
        /// Whether the answer matched.
        is_correct: bool,
        /// Answer the question expected.
        expected_answer: String,
    },
    /// Keyword-scored kinds.
    Keywords(KeywordOutcome),
    /// The question kind was not recognized; always incorrect.
    Unrecognized,
}

impl ValidationResult {
    /// Whether the answer counts as correct.
    #[inline]
    #[must_use]
    pub fn is_correct(&self) -> bool {
        match self {
            ValidationResult::Exact { is_correct, .. } => *is_correct,
            ValidationResult::Keywords(outcome) => outcome.is_correct,
            ValidationResult::Unrecognized => false,
        }
    }
}

/// What the session stored for an answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAnswer {
    /// Selected option letter of a multiple choice question.
    Choice(String),
    /// Typed answer of any other kind, with its validation.
    Text {
        /// Answer as typed.
        raw_text: String,
        /// Validation computed when the answer was recorded.
        result: ValidationResult,
    },
}

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No questions sampled yet, or reset.
    #[default]
    NotStarted,
    /// Questions are being answered.
    InProgress,
    /// The user advanced past the last question.
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::NotStarted => "not started",
            SessionState::InProgress => "in progress",
            SessionState::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Outcome of starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStart {
    /// Number of questions actually sampled.
    pub effective_count: usize,
    /// `true` when the request exceeded the pool and was reduced.
    pub was_clamped: bool,
}

/// Outcome of recording an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The answer was stored.
    Recorded(ValidationResult),
    /// The slot was already answered; the earlier answer is kept.
    AlreadyAnswered,
}

/// Outcome of advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at this index.
    Moved(usize),
    /// Advanced past the last question; the session is complete.
    Completed,
}

/// Coarse band a final percentage falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    /// 90 % and above.
    Excellent,
    /// 70 % to 89 %.
    VeryGood,
    /// 50 % to 69 %.
    GoodAttempt,
    /// Below 50 %.
    KeepPracticing,
}

impl PerformanceTier {
    /// Tier for a percentage in 0..=100.
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => PerformanceTier::Excellent,
            70..=89 => PerformanceTier::VeryGood,
            50..=69 => PerformanceTier::GoodAttempt,
            _ => PerformanceTier::KeepPracticing,
        }
    }
}

/// Final score of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    /// Questions answered correctly.
    pub correct_count: usize,
    /// Questions in the session.
    pub total: usize,
    /// `round(correct_count / total * 100)`.
    pub percentage: u32,
    /// Band of `percentage`.
    pub tier: PerformanceTier,
}

impl QuizResults {
    /// Unanswered and wrong answers together.
    #[inline]
    #[must_use]
    pub const fn incorrect_count(&self) -> usize {
        self.total - self.correct_count
    }
}

impl fmt::Display for QuizResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct ({}%)",
            self.correct_count, self.total, self.percentage
        )
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Session size used when the caller does not choose one.
    pub default_question_count: usize,
    /// Session sizes offered to the user.
    pub question_count_presets: Vec<usize>,
    /// Threshold for keyword specs that omit `umbral_minimo`.
    pub default_min_threshold: f64,
    /// Whether the normalizer folds accented characters.
    pub strip_diacritics: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_question_count: 10,
            question_count_presets: vec![10, 20, 30, 50],
            default_min_threshold: DEFAULT_MIN_THRESHOLD,
            strip_diacritics: true,
        }
    }
}

impl QuizConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` on malformed input and
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: QuizConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`QuizConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.default_min_threshold) {
            return Err(ConfigError::Invalid(format!(
                "default_min_threshold must be within [0, 1], got {}",
                self.default_min_threshold
            )));
        }
        if self.default_question_count == 0 {
            return Err(ConfigError::Invalid(
                "default_question_count must be at least 1".to_owned(),
            ));
        }
        if self.question_count_presets.contains(&0) {
            return Err(ConfigError::Invalid(
                "question_count_presets must not contain 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Errors raised by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start_session` was given no questions.
    #[error("no questions available to start a session")]
    EmptyPool,
    /// The operation needs an in-progress session.
    #[error("session is {state}, expected in progress")]
    NotInProgress {
        /// State the session was in.
        state: SessionState,
    },
    /// Results were requested before completion.
    #[error("session is {state}, results require a completed session")]
    NotCompleted {
        /// State the session was in.
        state: SessionState,
    },
    /// An answer slot outside the session was addressed.
    #[error("question index {index} out of range (session has {len} questions)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of questions in the session.
        len: usize,
    },
}

/// Errors raised while loading a quiz document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be read.
    #[error("failed to read quiz document: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid JSON of the expected shape.
    #[error("invalid quiz document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML of the expected shape.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid configuration value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cuestionario": {
            "titulo": "Lectura 5",
            "autor": "Equipo docente",
            "secciones": [
                {
                    "titulo": "Comprensión",
                    "preguntas": [
                        {
                            "pregunta": "¿Capital de Francia?",
                            "opciones": { "a": "Roma", "b": "París", "c": "Lima" },
                            "respuesta_correcta": "b",
                            "referencia": "Atlas, p. 3"
                        },
                        {
                            "pregunta": "Sinónimo de rápido",
                            "tipo": "single_word",
                            "respuesta_correcta": "veloz",
                            "sinonimos": ["ligero"]
                        },
                        {
                            "pregunta": "El sol es una estrella",
                            "tipo": "true_false",
                            "respuesta_correcta": "verdadero"
                        }
                    ]
                },
                {
                    "titulo": "Desarrollo",
                    "preguntas": [
                        {
                            "pregunta": "Explica la fotosíntesis",
                            "tipo": "open_ended",
                            "palabras_clave": {
                                "palabras": ["luz", "clorofila"],
                                "pesos": [2],
                                "sinonimos": { "luz": ["solar"] },
                                "umbral_minimo": 0.5
                            }
                        },
                        { "pregunta": "???", "tipo": "drag_and_drop" }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn parses_nested_document() {
        let doc = QuizDocument::from_json_str(SAMPLE).expect("valid document");
        assert_eq!(doc.title, "Lectura 5");
        assert_eq!(doc.author, "Equipo docente");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.question_count(), 5);
    }

    #[test]
    fn missing_tipo_means_multiple_choice() {
        let doc = QuizDocument::from_json_str(SAMPLE).unwrap();
        let q = &doc.sections[0].questions[0];
        assert_eq!(q.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q.reference, "Atlas, p. 3");
        match &q.body {
            QuestionBody::MultipleChoice {
                options,
                correct_answer,
            } => {
                assert_eq!(options.len(), 3);
                assert_eq!(correct_answer, "b");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn keyword_spec_fields_and_defaults() {
        let doc = QuizDocument::from_json_str(SAMPLE).unwrap();
        let q = &doc.sections[1].questions[0];
        let spec = q.body.keyword_spec().expect("keyword spec");
        assert_eq!(spec.words, vec!["luz", "clorofila"]);
        assert_eq!(spec.weight(0), 2.0);
        assert_eq!(spec.weight(1), 1.0);
        assert_eq!(spec.synonyms_for("luz"), ["solar".to_owned()]);
        assert!(spec.synonyms_for("clorofila").is_empty());
        assert_eq!(spec.threshold_or(DEFAULT_MIN_THRESHOLD), 0.5);
        assert_eq!(
            KeywordSpec::new(["a"]).threshold_or(DEFAULT_MIN_THRESHOLD),
            DEFAULT_MIN_THRESHOLD
        );
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let doc = QuizDocument::from_json_str(SAMPLE).unwrap();
        let q = &doc.sections[1].questions[1];
        assert_eq!(q.kind(), QuestionKind::Unknown);
        assert_eq!(
            q.body,
            QuestionBody::unknown("drag_and_drop")
        );
    }

    #[test]
    fn keyword_kind_without_spec_gets_empty_spec() {
        let q: Question =
            serde_json::from_str(r#"{ "pregunta": "x", "tipo": "fill_blank" }"#).unwrap();
        assert_eq!(q.body, QuestionBody::FillBlank(KeywordSpec::default()));
    }

    #[test]
    fn malformed_shapes_degrade_to_empty() {
        assert_eq!(QuizDocument::from_json_str("{}").unwrap().question_count(), 0);
        assert_eq!(
            QuizDocument::from_json_str(r#"{ "cuestionario": { "titulo": "t" } }"#)
                .unwrap()
                .sections
                .len(),
            0
        );
        let doc =
            QuizDocument::from_json_str(r#"{ "cuestionario": { "secciones": [ { "titulo": "s" } ] } }"#)
                .unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].questions.is_empty());
    }

    #[test]
    fn null_lists_degrade_to_empty() {
        let doc = QuizDocument::from_json_str(
            r#"{ "cuestionario": { "titulo": null, "secciones": [
                { "titulo": "vacia", "preguntas": null },
                { "titulo": "llena", "preguntas": [
                    { "pregunta": "p", "tipo": "true_false", "respuesta_correcta": "falso" }
                ] }
            ] } }"#,
        )
        .unwrap();
        assert_eq!(doc.title, "");
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].questions.is_empty());
        assert_eq!(doc.question_count(), 1);

        let doc =
            QuizDocument::from_json_str(r#"{ "cuestionario": { "secciones": null } }"#).unwrap();
        assert_eq!(doc.question_count(), 0);
    }

    #[test]
    fn null_weights_count_as_one() {
        let q: Question = serde_json::from_str(
            r#"{ "pregunta": "x", "tipo": "open_ended", "palabras_clave": {
                "palabras": ["a", "b", "c"], "pesos": [3, null], "sinonimos": null
            } }"#,
        )
        .unwrap();
        let spec = q.body.keyword_spec().expect("keyword spec");
        assert_eq!(spec.weights, vec![3.0, 1.0]);
        assert_eq!(spec.weight(1), 1.0);
        assert_eq!(spec.weight(2), 1.0);
        assert!(spec.synonyms_by_word.is_empty());

        let q: Question = serde_json::from_str(
            r#"{ "pregunta": "x", "tipo": "fill_blank", "palabras_clave": { "pesos": null } }"#,
        )
        .unwrap();
        assert_eq!(q.body, QuestionBody::FillBlank(KeywordSpec::default()));
    }

    #[test]
    fn unknown_question_keeps_answer_fields() {
        let input = r#"{
            "pregunta": "Ordena",
            "tipo": "ordering",
            "opciones": { "a": "uno", "b": "dos" },
            "respuesta_correcta": "ab",
            "sinonimos": ["ba"],
            "palabras_clave": { "palabras": ["uno"] }
        }"#;
        let q: Question = serde_json::from_str(input).unwrap();
        match &q.body {
            QuestionBody::Unknown { tag, fields } => {
                assert_eq!(tag, "ordering");
                assert_eq!(fields.options.as_ref().map(BTreeMap::len), Some(2));
                assert_eq!(fields.correct_answer.as_deref(), Some("ab"));
                assert_eq!(fields.synonyms, Some(vec!["ba".to_owned()]));
                assert_eq!(fields.keywords, Some(KeywordSpec::new(["uno"])));
            }
            other => panic!("unexpected body {other:?}"),
        }

        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["tipo"], "ordering");
        assert_eq!(json["opciones"]["b"], "dos");
        assert_eq!(json["respuesta_correcta"], "ab");
        assert_eq!(json["sinonimos"][0], "ba");
        assert_eq!(json["palabras_clave"]["palabras"][0], "uno");
        assert_eq!(serde_json::from_value::<Question>(json).unwrap(), q);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = QuizDocument::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
        assert!(err.to_string().starts_with("invalid quiz document"));
    }

    #[test]
    fn document_survives_serialization() {
        let doc = QuizDocument::from_json_str(SAMPLE).unwrap();
        let json = doc.to_json_string().unwrap();
        assert!(json.contains("\"cuestionario\""));
        assert!(json.contains("\"respuesta_correcta\""));
        assert_eq!(QuizDocument::from_json_str(&json).unwrap(), doc);
    }

    #[test]
    fn kind_tags_are_stable() {
        for kind in [
            QuestionKind::MultipleChoice,
            QuestionKind::SingleWord,
            QuestionKind::TrueFalse,
            QuestionKind::FillBlank,
            QuestionKind::MultipleKeywords,
            QuestionKind::OpenEnded,
        ] {
            assert_eq!(QuestionKind::from_tag(kind.label()), kind);
        }
        assert_eq!(QuestionKind::from_tag("essay"), QuestionKind::Unknown);
        assert!(QuestionKind::OpenEnded.is_keyword_based());
        assert!(!QuestionKind::TrueFalse.is_keyword_based());
    }

    #[test]
    fn validation_result_correctness() {
        let exact = ValidationResult::Exact {
            is_correct: true,
            expected_answer: "a".into(),
        };
        assert!(exact.is_correct());
        assert!(!ValidationResult::Unrecognized.is_correct());
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(PerformanceTier::from_percentage(100), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(90), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(89), PerformanceTier::VeryGood);
        assert_eq!(PerformanceTier::from_percentage(70), PerformanceTier::VeryGood);
        assert_eq!(PerformanceTier::from_percentage(69), PerformanceTier::GoodAttempt);
        assert_eq!(PerformanceTier::from_percentage(50), PerformanceTier::GoodAttempt);
        assert_eq!(PerformanceTier::from_percentage(49), PerformanceTier::KeepPracticing);
        assert_eq!(PerformanceTier::from_percentage(0), PerformanceTier::KeepPracticing);
    }

    #[test]
    fn results_display_and_incorrect() {
        let r = QuizResults {
            correct_count: 2,
            total: 3,
            percentage: 67,
            tier: PerformanceTier::GoodAttempt,
        };
        assert_eq!(r.incorrect_count(), 1);
        assert_eq!(r.to_string(), "2/3 correct (67%)");
    }

    #[test]
    fn config_defaults() {
        let c = QuizConfig::default();
        assert_eq!(c.default_question_count, 10);
        assert_eq!(c.question_count_presets, vec![10, 20, 30, 50]);
        assert_eq!(c.default_min_threshold, 0.6);
        assert!(c.strip_diacritics);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn config_from_toml_partial() {
        let c = QuizConfig::from_toml_str("default_question_count = 20\n").unwrap();
        assert_eq!(c.default_question_count, 20);
        assert_eq!(c.default_min_threshold, DEFAULT_MIN_THRESHOLD);
    }

    #[test]
    fn config_rejects_out_of_range() {
        let err = QuizConfig::from_toml_str("default_min_threshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = QuizConfig::from_toml_str("default_question_count = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = QuizConfig::from_toml_str("default_question_count = \"ten\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn session_error_messages() {
        let e = SessionError::NotInProgress {
            state: SessionState::Completed,
        };
        assert_eq!(e.to_string(), "session is completed, expected in progress");
        let e = SessionError::IndexOutOfRange { index: 4, len: 3 };
        assert!(e.to_string().contains("index 4"));
    }
}
