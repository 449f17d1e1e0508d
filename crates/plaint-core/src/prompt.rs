//! Grounding prompt assembly.

use std::fmt::Write;

use plaint_index::retriever::RetrievedChunk;

const INSTRUCTIONS: &str = "You are a financial analyst assistant.\n\
Answer questions about customer complaints using ONLY the context below.\n\
Do not make up information.";

/// Compose the grounding prompt: instruction header, bulleted context lines
/// joined by blank lines, the literal question, and an answer cue.
///
/// Deterministic and total: an empty retrieval still produces a well-formed
/// prompt with an empty context block, degrading to a context-free answer.
#[must_use]
pub fn build_prompt(question: &str, chunks: &[RetrievedChunk]) -> String {
    let context: Vec<String> = chunks.iter().map(|c| format!("- {}", c.text)).collect();

    let mut prompt = String::new();
    let _ = write!(
        prompt,
        "{INSTRUCTIONS}\n\nContext:\n{}\n\nQuestion:\n{question}\n\nAnswer:",
        context.join("\n\n")
    );
    prompt
}
