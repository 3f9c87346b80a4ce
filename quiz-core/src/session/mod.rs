//! Quiz session state machine.
//!
//! States move `NotStarted -> InProgress -> Completed`:
//! - [`QuizSession::start_session`] samples questions and enters `InProgress`
//! - [`QuizSession::record_answer`] fills an answer slot at most once
//! - [`QuizSession::advance`] / [`QuizSession::retreat`] move between questions;
//!   advancing from the last question is the only way into `Completed`
//! - [`QuizSession::compute_results`] scores a completed session
//! - [`QuizSession::reset`] / [`QuizSession::exit`] return to `NotStarted`
//!
//! Threading:
//! - A session is plain owned data with no interior mutability. One caller
//!   drives it; hold it behind whatever synchronization the caller needs.

mod api;
mod scoring;
mod stats;
mod types;

pub use scoring::is_answer_correct;
pub use stats::{Progress, QuestionReview};
pub use types::QuizSession;
