//! Loading quiz documents from disk.

use std::fs;
use std::path::Path;

use quiz_types::{DocumentError, Question, QuizDocument};
use tracing::info;

use crate::pool;

/// Reads and parses a quiz document.
///
/// # Errors
///
/// Returns `DocumentError::Io` if the file cannot be read and
/// `DocumentError::Json` if it is not a valid document.
pub fn load_document(path: impl AsRef<Path>) -> Result<QuizDocument, DocumentError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let doc = QuizDocument::from_json_str(&contents)?;
    info!(
        path = %path.display(),
        sections = doc.sections.len(),
        questions = doc.question_count(),
        "quiz document loaded"
    );
    Ok(doc)
}

/// Reads a quiz document and flattens it into a question pool.
///
/// # Errors
///
/// Same as [`load_document`].
pub fn load_pool(path: impl AsRef<Path>) -> Result<Vec<Question>, DocumentError> {
    let doc = load_document(path)?;
    Ok(pool::flatten(&doc))
}
