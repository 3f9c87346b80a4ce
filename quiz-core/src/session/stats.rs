//! Progress and review snapshots.

use quiz_types::{Question, SessionAnswer};

use crate::session::scoring::is_answer_correct;
use crate::session::types::QuizSession;

/// Where the user is in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the question being shown, 0 when not started.
    pub position: usize,
    /// Number of questions in the session.
    pub total: usize,
    /// Number of answered questions.
    pub answered: usize,
}

impl Progress {
    /// Fraction of the session reached, for progress bars.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.position as f32 / self.total as f32
        }
    }
}

/// One line of the results review.
#[derive(Debug, Clone, Copy)]
pub struct QuestionReview<'a> {
    /// Position in the session.
    pub index: usize,
    /// The question as asked.
    pub question: &'a Question,
    /// What the user answered, if anything.
    pub answer: Option<&'a SessionAnswer>,
    /// Whether the answer counts as correct.
    pub is_correct: bool,
}

impl QuizSession {
    /// Returns a progress snapshot.
    pub fn progress(&self) -> Progress {
        Progress {
            position: if self.is_empty() {
                0
            } else {
                self.current_index + 1
            },
            total: self.len(),
            answered: self.answers.iter().filter(|a| a.is_some()).count(),
        }
    }

    /// Per-question outcome in session order, for a review screen.
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (question, answer))| {
                let answer = answer.as_ref();
                QuestionReview {
                    index,
                    question,
                    answer,
                    is_correct: is_answer_correct(question, answer),
                }
            })
            .collect()
    }
}
