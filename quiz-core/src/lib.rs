//! Quiz engine core.
//!
//! Turns a [`QuizDocument`](quiz_types::QuizDocument) into a scored attempt:
//!
//! - [`pool`]: flattens nested sections into one question pool
//! - [`shuffle`]: Fisher-Yates sampling of the pool
//! - [`analyzer`]: text normalization and word splitting
//! - [`validator`]: per-kind answer validation and weighted keyword scoring
//! - [`session`]: the attempt state machine and final scoring
//!
//! Rendering, document fetching and screen flow belong to the caller, which
//! drives a [`QuizSession`] and displays the plain data it returns.
//!
//! ```
//! use quiz_core::{pool, QuizSession};
//! use quiz_types::{QuizDocument, Step};
//!
//! let doc = QuizDocument::from_json_str(r#"{ "cuestionario": { "secciones": [
//!     { "titulo": "s", "preguntas": [
//!         { "pregunta": "¿El agua hierve a 100 °C?", "tipo": "true_false",
//!           "respuesta_correcta": "verdadero" }
//!     ] }
//! ] } }"#).unwrap();
//!
//! let mut session = QuizSession::new();
//! session.start_session(&pool::flatten(&doc), 10).unwrap();
//! session.answer_current("Verdadero").unwrap();
//! assert_eq!(session.advance().unwrap(), Step::Completed);
//! assert_eq!(session.compute_results().unwrap().percentage, 100);
//! ```

pub mod analyzer;
pub mod loader;
pub mod pool;
pub mod session;
pub mod shuffle;
pub mod validator;

pub use analyzer::{extract_words, TextNormalizer};
pub use session::{Progress, QuestionReview, QuizSession};
pub use validator::AnswerValidator;
