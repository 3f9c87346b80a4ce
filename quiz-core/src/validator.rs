//! Answer validation for every question kind.
//!
//! Exact kinds (single word, true/false) compare normalized strings. Keyword
//! kinds score the answer against a weighted [`KeywordSpec`]: a keyword counts
//! as present when the normalized answer *contains* the normalized keyword or
//! one of its synonyms as a substring. Containment lets plurals and verb forms
//! match without a stemmer, at the price of matching inside unrelated words
//! (`"sol"` is found in `"consolidar"`).

use memchr::memmem;
use quiz_types::{
    KeywordOutcome, KeywordSpec, Question, QuestionBody, QuizConfig, ValidationResult,
    WeightedWord, DEFAULT_MIN_THRESHOLD,
};
use smallvec::SmallVec;
use tracing::warn;

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};

/// Validates raw answers against questions.
#[derive(Clone, Debug)]
pub struct AnswerValidator {
    normalizer: TextNormalizer,
    default_min_threshold: f64,
}

impl Default for AnswerValidator {
    fn default() -> Self {
        Self {
            normalizer: TextNormalizer::default(),
            default_min_threshold: DEFAULT_MIN_THRESHOLD,
        }
    }
}

impl AnswerValidator {
    /// Creates a validator using the normalizer and threshold settings of `config`.
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(NormalizerConfig {
                strip_diacritics: config.strip_diacritics,
            }),
            default_min_threshold: config.default_min_threshold,
        }
    }

    /// The normalizer applied to answers and expected values.
    #[inline]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Validates `raw` against `question`.
    ///
    /// Multiple choice answers are compared literally with [`check_choice`];
    /// the session records them as letters. Unknown kinds never match.
    pub fn validate(&self, raw: &str, question: &Question) -> ValidationResult {
        match &question.body {
            QuestionBody::MultipleChoice { correct_answer, .. } => {
                check_choice(raw, correct_answer)
            }
            QuestionBody::SingleWord {
                correct_answer,
                synonyms,
            } => self.validate_single_word(raw, correct_answer, synonyms),
            QuestionBody::TrueFalse { correct_answer } => {
                self.validate_true_false(raw, correct_answer)
            }
            QuestionBody::FillBlank(spec)
            | QuestionBody::MultipleKeywords(spec)
            | QuestionBody::OpenEnded(spec) => {
                ValidationResult::Keywords(self.validate_keywords(raw, spec))
            }
            QuestionBody::Unknown { tag, .. } => {
                warn!(tag = %tag, "unrecognized question type, answer marked incorrect");
                ValidationResult::Unrecognized
            }
        }
    }

    /// Normalized equality with the expected word or any synonym.
    pub fn validate_single_word(
        &self,
        raw: &str,
        correct_answer: &str,
        synonyms: &[String],
    ) -> ValidationResult {
        let answer = self.normalizer.normalize(raw);
        let is_correct = answer == self.normalizer.normalize(correct_answer)
            || synonyms
                .iter()
                .any(|synonym| self.normalizer.normalize(synonym) == answer);

        ValidationResult::Exact {
            is_correct,
            expected_answer: correct_answer.to_owned(),
        }
    }

    /// Normalized equality, no synonyms.
    pub fn validate_true_false(&self, raw: &str, correct_answer: &str) -> ValidationResult {
        let is_correct = self.normalizer.normalize(raw) == self.normalizer.normalize(correct_answer);
        ValidationResult::Exact {
            is_correct,
            expected_answer: correct_answer.to_owned(),
        }
    }

    /// Scores `raw` against the weighted keywords of `spec`.
    ///
    /// The answer is correct when `ratio >= threshold`. A spec without
    /// keywords has `ratio` 0 and never passes, whatever its threshold.
    pub fn validate_keywords(&self, raw: &str, spec: &KeywordSpec) -> KeywordOutcome {
        let answer = self.normalizer.normalize(raw);
        let haystack = answer.as_bytes();

        let mut matched_words = Vec::new();
        let mut missing_words = Vec::new();
        let mut score_obtained = 0.0;
        let mut score_total = 0.0;

        for (i, word) in spec.words.iter().enumerate() {
            let weight = spec.weight(i);
            score_total += weight;

            let variants = self.variants(word, spec.synonyms_for(word));
            let found = variants
                .iter()
                .any(|variant| memmem::find(haystack, variant.as_bytes()).is_some());

            let entry = WeightedWord {
                word: word.clone(),
                weight,
            };
            if found {
                score_obtained += weight;
                matched_words.push(entry);
            } else {
                missing_words.push(entry);
            }
        }

        let ratio = if score_total > 0.0 {
            score_obtained / score_total
        } else {
            0.0
        };
        let threshold = spec.threshold_or(self.default_min_threshold);

        KeywordOutcome {
            is_correct: score_total > 0.0 && ratio >= threshold,
            matched_words,
            missing_words,
            score_obtained,
            score_total,
            ratio,
        }
    }

    fn variants(&self, word: &str, synonyms: &[String]) -> SmallVec<[String; 4]> {
        let mut variants = SmallVec::with_capacity(1 + synonyms.len());
        variants.push(self.normalizer.normalize(word));
        variants.extend(synonyms.iter().map(|s| self.normalizer.normalize(s)));
        variants
    }
}

/// Literal comparison of a selected option letter.
#[inline]
pub fn check_choice(selected: &str, correct_answer: &str) -> ValidationResult {
    ValidationResult::Exact {
        is_correct: selected == correct_answer,
        expected_answer: correct_answer.to_owned(),
    }
}
