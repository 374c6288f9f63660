//! Query rewriting for better recall against the catalog embedding space.
//!
//! User questions arrive in Mongolian while the catalog text is largely
//! English; rewriting the question into an English search query closes that
//! gap. Rewriting is a best-effort optimization: any completer failure falls
//! back to the original question.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::completion::{ChatCompleter, ChatMessage};

/// Fixed instruction template for query rewriting.
const REWRITE_INSTRUCTION: &str = "You rewrite user questions into search queries for a \
children's clothing catalog. Rewrite the question into one short English search query. \
Infer the demographic (boy/girl), product category, and size when the question implies \
them. Reply with the query only, no explanation.";

/// Rewrites a natural-language question into a retrieval-optimized query.
///
/// Uses the injected [`ChatCompleter`] at zero temperature for determinism.
/// On any failure the original question is returned unchanged — the rewrite
/// is never a hard dependency of retrieval.
pub struct QueryRewriter {
    completer: Arc<dyn ChatCompleter>,
}

impl QueryRewriter {
    /// Create a new rewriter backed by the given completer.
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self { completer }
    }

    /// Rewrite `question` into a retrieval query.
    ///
    /// The completion is trimmed; multi-line completions otherwise pass
    /// through as-is. Returns `question` unchanged when the completer fails
    /// or produces an empty string.
    pub async fn rewrite(&self, question: &str) -> String {
        let messages =
            [ChatMessage::system(REWRITE_INSTRUCTION), ChatMessage::user(question.to_string())];

        match self.completer.complete(&messages, 0.0).await {
            Ok(completion) => {
                let rewritten = completion.trim();
                if rewritten.is_empty() {
                    warn!(question, "rewrite produced empty output, using original question");
                    return question.to_string();
                }
                debug!(question, rewritten, "rewrote query");
                rewritten.to_string()
            }
            Err(e) => {
                warn!(question, error = %e, "rewrite failed, using original question");
                question.to_string()
            }
        }
    }
}
