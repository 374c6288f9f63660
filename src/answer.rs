//! Grounded answer generation.
//!
//! Builds a fixed system instruction that restricts the model to the
//! retrieved context, plus a user message embedding the context and the
//! question, and returns the model's first completion verbatim. Unlike
//! query rewriting, generation failures are propagated — there is no good
//! default answer.

use std::sync::Arc;

use tracing::{error, info};

use crate::completion::{ChatCompleter, ChatMessage};
use crate::error::Result;

/// The fixed phrase the assistant uses when the context lacks the answer.
pub const REFUSAL_PHRASE: &str = "Мэдээлэл манай мэдлэгийн санд алга байна";

/// Sampling temperature for answers: low for a mostly deterministic but
/// natural tone.
const ANSWER_TEMPERATURE: f32 = 0.3;

/// Build the fixed system instruction enforcing the grounding policy.
fn system_prompt() -> String {
    format!(
        "Чи Монгол хэлтэй туслах. Доорх CONTEXT бол бидний мэдлэгийн сан (CSV + PDF). \
         Зөвхөн CONTEXT дээр үндэслэж товч, ойлгомжтой хариул. \
         Хэрвээ CONTEXT-д байхгүй мэдээлэл асуувал '{REFUSAL_PHRASE}' гэж хэл."
    )
}

/// Build the user message embedding the context and the question.
fn user_prompt(question: &str, context: &str) -> String {
    format!(
        "CONTEXT:\n{context}\n\nQUESTION:\n{question}\n\n\
         1. CONTEXT дотроос асуултад хамаатай хэсгийг ол.\n\
         2. Монгол хэлээр товч, хэрэгжүүлэхүйц хариул.\n\
         3. CONTEXT-д байхгүй зүйлийг хэзээ ч бүү зохио."
    )
}

/// Generates answers grounded in an assembled context block.
pub struct AnswerGenerator {
    completer: Arc<dyn ChatCompleter>,
}

impl AnswerGenerator {
    /// Create a new generator backed by the given completer.
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self { completer }
    }

    /// Generate an answer to `question` using only `context`.
    ///
    /// An empty `context` leads the model to the fixed refusal phrase.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Generation`](crate::RagError::Generation) (or
    /// [`RagError::Timeout`](crate::RagError::Timeout)) when the completer
    /// fails; this is surfaced to the caller rather than silently degraded.
    pub async fn generate(&self, question: &str, context: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(system_prompt()),
            ChatMessage::user(user_prompt(question, context)),
        ];

        let answer =
            self.completer.complete(&messages, ANSWER_TEMPERATURE).await.map_err(|e| {
                error!(error = %e, "answer generation failed");
                e
            })?;

        info!(context_len = context.len(), answer_len = answer.len(), "generated answer");
        Ok(answer)
    }
}
