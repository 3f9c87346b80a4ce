//! Scoring functions.

use quiz_types::{
    PerformanceTier, Question, QuestionBody, QuizResults, SessionAnswer, SessionError,
    SessionState,
};

use crate::session::types::QuizSession;

/// Whether `answer` is a correct response to `question`.
///
/// Unanswered questions are incorrect.
pub fn is_answer_correct(question: &Question, answer: Option<&SessionAnswer>) -> bool {
    match (answer, &question.body) {
        (None, _) => false,
        (
            Some(SessionAnswer::Choice(letter)),
            QuestionBody::MultipleChoice { correct_answer, .. },
        ) => letter == correct_answer,
        (Some(SessionAnswer::Choice(_)), _) => false,
        (Some(SessionAnswer::Text { result, .. }), _) => result.is_correct(),
    }
}

/// `round(correct / total * 100)` with halves rounded up, in integers.
#[inline]
pub(crate) fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 200 + total) / (total * 2)) as u32
}

impl QuizSession {
    /// Final score of a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` unless the session has been
    /// advanced past its last question.
    pub fn compute_results(&self) -> Result<QuizResults, SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::NotCompleted { state: self.state });
        }

        let total = self.questions.len();
        let correct_count = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| is_answer_correct(question, answer.as_ref()))
            .count();
        let percentage = percentage(correct_count, total);

        Ok(QuizResults {
            correct_count,
            total,
            percentage,
            tier: PerformanceTier::from_percentage(percentage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_types::ValidationResult;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn choice_answers_compare_letters() {
        let q = Question::new(
            "q",
            QuestionBody::MultipleChoice {
                options: Default::default(),
                correct_answer: "c".into(),
            },
        );
        assert!(is_answer_correct(&q, Some(&SessionAnswer::Choice("c".into()))));
        assert!(!is_answer_correct(&q, Some(&SessionAnswer::Choice("a".into()))));
        assert!(!is_answer_correct(&q, None));
    }

    #[test]
    fn text_answers_use_stored_result() {
        let q = Question::new(
            "q",
            QuestionBody::TrueFalse {
                correct_answer: "falso".into(),
            },
        );
        let answer = SessionAnswer::Text {
            raw_text: "falso".into(),
            result: ValidationResult::Exact {
                is_correct: true,
                expected_answer: "falso".into(),
            },
        };
        assert!(is_answer_correct(&q, Some(&answer)));

        let unrecognized = SessionAnswer::Text {
            raw_text: "x".into(),
            result: ValidationResult::Unrecognized,
        };
        assert!(!is_answer_correct(&q, Some(&unrecognized)));
    }
}
