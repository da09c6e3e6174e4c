use domain::models::IndexedChunk;
use domain::session::{Message, Role};

/// Fixed instruction prepended to every generation call.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant helping users with the household and population management system.\n\nResponse rules:\n1. Answer concisely and in language that is easy to understand\n2. Only answer based on the provided context\n3. If no information is found in the context, say \"I could not find information about this issue in the documents\"\n4. Do not fabricate information\n5. If there are multiple steps, list each step clearly\n6. Use polite and friendly language, and refuse to answer offensive or inappropriate requests with \"I'm sorry, I cannot answer this question.\"";

/// Returned instead of calling the generator when no retrieved chunk
/// clears the score threshold.
pub const NO_CONTEXT_FALLBACK: &str =
    "Sorry, I could not find relevant information to answer your question.";

/// How many trailing session messages are shown to the generator.
pub const HISTORY_WINDOW: usize = 6;

/// Joins the retrieved chunks that clear `min_score`, each prefixed
/// with its rounded score. `None` when nothing clears the bar — the
/// caller skips generation entirely in that case.
pub fn context_block(results: &[(&IndexedChunk, f32)], min_score: f32) -> Option<String> {
    let parts: Vec<String> = results
        .iter()
        .filter(|(chunk, score)| *score >= min_score && !chunk.text.is_empty())
        .map(|(chunk, score)| format!("[Score: {score:.2}] {}", chunk.text))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn render_history(history: &[Message]) -> String {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let lines: Vec<String> = recent
        .iter()
        .map(|message| {
            let speaker = match message.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            format!("{speaker}: {}", message.content)
        })
        .collect();
    lines.join("\n")
}

pub fn build_prompt(query: &str, context: &str, history: &[Message]) -> String {
    let history_str = render_history(history);
    let history_part = if history_str.is_empty() {
        "(None)".to_string()
    } else {
        history_str
    };
    format!(
        "{SYSTEM_PROMPT}\n\n### Conversation History:\n{history_part}\n\n### Reference Information (Context):\n{context}\n\n### Current Question:\n{query}\n\n### Answer:"
    )
}
