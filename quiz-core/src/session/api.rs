//! Session transitions: start, answer, navigate.

use quiz_types::{
    Question, QuestionBody, RecordOutcome, SessionAnswer, SessionError, SessionStart,
    SessionState, Step,
};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::session::types::QuizSession;
use crate::shuffle::shuffle;
use crate::validator::check_choice;

impl QuizSession {
    /// Samples up to `requested` questions from `pool` and starts answering.
    ///
    /// Uses the thread-local generator; see
    /// [`QuizSession::start_session_with_rng`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if `pool` is empty.
    pub fn start_session(
        &mut self,
        pool: &[Question],
        requested: usize,
    ) -> Result<SessionStart, SessionError> {
        self.start_session_with_rng(pool, requested, &mut rand::thread_rng())
    }

    /// Samples up to `requested` questions from `pool` using `rng`.
    ///
    /// A request larger than the pool is reduced to the pool size and
    /// reported through `was_clamped`. A request of 0 samples one question.
    /// Starting replaces any previous attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if `pool` is empty. The session is
    /// left untouched in that case.
    pub fn start_session_with_rng<R: Rng + ?Sized>(
        &mut self,
        pool: &[Question],
        requested: usize,
        rng: &mut R,
    ) -> Result<SessionStart, SessionError> {
        if pool.is_empty() {
            warn!("cannot start a session: no questions available");
            return Err(SessionError::EmptyPool);
        }

        let was_clamped = requested > pool.len();
        let effective_count = requested.clamp(1, pool.len());
        if was_clamped {
            warn!(
                requested,
                available = pool.len(),
                "not enough questions, using all of them"
            );
        }

        let mut questions = shuffle(pool, rng);
        questions.truncate(effective_count);

        self.questions = questions;
        self.answers = vec![None; effective_count];
        self.current_index = 0;
        self.state = SessionState::InProgress;

        info!(effective_count, requested, "quiz session started");

        Ok(SessionStart {
            effective_count,
            was_clamped,
        })
    }

    /// Records the answer for the question at `index`.
    ///
    /// Multiple choice answers are option letters compared literally; every
    /// other kind goes through the validator. Each slot accepts one answer:
    /// a second call returns `RecordOutcome::AlreadyAnswered` and keeps the
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an in-progress session and
    /// `SessionError::IndexOutOfRange` for an index past the last question.
    pub fn record_answer(
        &mut self,
        index: usize,
        value: &str,
    ) -> Result<RecordOutcome, SessionError> {
        self.require_in_progress()?;

        let len = self.questions.len();
        let (question, slot) = match (self.questions.get(index), self.answers.get_mut(index)) {
            (Some(question), Some(slot)) => (question, slot),
            _ => return Err(SessionError::IndexOutOfRange { index, len }),
        };

        if slot.is_some() {
            warn!(index, "question already answered, ignoring new answer");
            return Ok(RecordOutcome::AlreadyAnswered);
        }

        let (answer, result) = match &question.body {
            QuestionBody::MultipleChoice { correct_answer, .. } => (
                SessionAnswer::Choice(value.to_owned()),
                check_choice(value, correct_answer),
            ),
            _ => {
                let result = self.validator.validate(value, question);
                (
                    SessionAnswer::Text {
                        raw_text: value.to_owned(),
                        result: result.clone(),
                    },
                    result,
                )
            }
        };

        debug!(index, correct = result.is_correct(), "answer recorded");
        *slot = Some(answer);
        Ok(RecordOutcome::Recorded(result))
    }

    /// Records the answer for the question being shown.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::record_answer`].
    pub fn answer_current(&mut self, value: &str) -> Result<RecordOutcome, SessionError> {
        self.record_answer(self.current_index, value)
    }

    /// Moves to the next question, or completes the session from the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an in-progress session.
    pub fn advance(&mut self) -> Result<Step, SessionError> {
        self.require_in_progress()?;

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            debug!(index = self.current_index, "advanced");
            Ok(Step::Moved(self.current_index))
        } else {
            self.state = SessionState::Completed;
            info!(total = self.questions.len(), "quiz session completed");
            Ok(Step::Completed)
        }
    }

    /// Moves to the previous question. Does nothing on the first one.
    ///
    /// Recorded answers are kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an in-progress session.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.require_in_progress()?;

        if self.current_index > 0 {
            self.current_index -= 1;
            debug!(index = self.current_index, "went back");
        }
        Ok(self.current_index)
    }
}
