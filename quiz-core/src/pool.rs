//! Question pool assembly and statistics.

use quiz_types::{Question, QuestionKind, QuizDocument};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Concatenates the questions of every section, in document order.
///
/// Sections without questions contribute nothing.
pub fn flatten(doc: &QuizDocument) -> Vec<Question> {
    if doc.sections.is_empty() {
        warn!(title = %doc.title, "quiz document has no sections");
        return Vec::new();
    }

    let mut pool = Vec::with_capacity(doc.question_count());
    for (i, section) in doc.sections.iter().enumerate() {
        debug!(
            section = i + 1,
            title = %section.title,
            questions = section.questions.len(),
            "collecting section"
        );
        pool.extend(section.questions.iter().cloned());
    }

    debug!(total = pool.len(), "question pool assembled");
    pool
}

/// Like [`flatten`], with an absent document treated as empty.
pub fn flatten_opt(doc: Option<&QuizDocument>) -> Vec<Question> {
    match doc {
        Some(doc) => flatten(doc),
        None => {
            warn!("no quiz document loaded");
            Vec::new()
        }
    }
}

/// Number of questions per kind, ordered by kind.
pub fn kind_counts(questions: &[Question]) -> Vec<(QuestionKind, usize)> {
    let mut counts: FxHashMap<QuestionKind, usize> = FxHashMap::default();
    for question in questions {
        *counts.entry(question.kind()).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_unstable_by_key(|&(kind, _)| kind);
    counts
}
