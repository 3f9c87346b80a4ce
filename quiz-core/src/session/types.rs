//! Session state and accessors.

use quiz_types::{Question, QuizConfig, SessionAnswer, SessionError, SessionState};
use tracing::info;

use crate::validator::AnswerValidator;

/// One attempt at a sampled subset of questions.
///
/// `questions` and `answers` are index-aligned and have the same length for
/// the whole attempt. Navigation keeps `current_index` within bounds;
/// advancing past the last question completes the session instead.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    pub(crate) questions: Vec<Question>,
    pub(crate) answers: Vec<Option<SessionAnswer>>,
    pub(crate) current_index: usize,
    pub(crate) state: SessionState,
    pub(crate) validator: AnswerValidator,
}

impl QuizSession {
    /// Creates an idle session with the default validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle session whose validator follows `config`.
    pub fn with_config(config: &QuizConfig) -> Self {
        Self {
            validator: AnswerValidator::new(config),
            ..Self::default()
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of questions in the session, 0 when not started.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if no questions are loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the question being shown.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Sampled questions in session order.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Answer slots, index-aligned with [`QuizSession::questions`].
    #[inline]
    pub fn answers(&self) -> &[Option<SessionAnswer>] {
        &self.answers
    }

    /// The question being shown, if a session is loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// The recorded answer for the question being shown.
    pub fn current_answer(&self) -> Option<&SessionAnswer> {
        self.answers.get(self.current_index)?.as_ref()
    }

    /// Whether the slot at `index` holds an answer.
    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        matches!(self.answers.get(index), Some(Some(_)))
    }

    /// The validator used for typed answers.
    #[inline]
    pub fn validator(&self) -> &AnswerValidator {
        &self.validator
    }

    /// Discards questions, answers and position, returning to `NotStarted`.
    pub fn reset(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.state = SessionState::NotStarted;
    }

    /// Abandons the attempt. Same effect as [`QuizSession::reset`].
    pub fn exit(&mut self) {
        if self.state == SessionState::InProgress {
            info!(
                answered = self.answers.iter().filter(|a| a.is_some()).count(),
                total = self.len(),
                "leaving quiz, progress discarded"
            );
        }
        self.reset();
    }

    pub(crate) fn require_in_progress(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::InProgress => Ok(()),
            state => Err(SessionError::NotInProgress { state }),
        }
    }
}
