use domain::chunk::{Chunk, ChunkMetadata};

/// Parser for the question/answer documentation style: `### ` section
/// headers, `**Q: ...**` question lines, `A: ...` answer lines with
/// free continuation lines below them.
pub struct QaParser;

impl QaParser {
    pub fn parse(text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut answer: Vec<String> = Vec::new();
        let mut header: Option<String> = None;
        let mut title: Option<String> = None;

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("### ") {
                Self::flush(&mut chunks, &answer, &header, &title);
                answer.clear();
                header = Some(rest.trim().to_string());
                title = None;
            } else if line.starts_with("**Q:") || line.starts_with("**Q ") {
                Self::flush(&mut chunks, &answer, &header, &title);
                answer.clear();
                title = Some(Self::extract_question(line));
            } else if let Some(rest) = line.strip_prefix("A:") {
                let answer_text = rest.trim();
                if !answer_text.is_empty() {
                    answer.push(answer_text.to_string());
                }
            } else if !line.trim().is_empty() && title.is_some() {
                // Continuation of the current answer.
                answer.push(line.to_string());
            }
        }
        Self::flush(&mut chunks, &answer, &header, &title);
        chunks
    }

    /// Strips the leading `**Q` marker (plus any colons/whitespace)
    /// and the trailing bold-close marker.
    fn extract_question(line: &str) -> String {
        let rest = line.strip_prefix("**Q").unwrap_or(line);
        let rest = rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
        let rest = rest.strip_suffix("**").unwrap_or(rest);
        rest.trim().to_string()
    }

    /// Emits only when there is answer text AND a question title.
    fn flush(
        chunks: &mut Vec<Chunk>,
        answer: &[String],
        header: &Option<String>,
        title: &Option<String>,
    ) {
        let content = answer.join("\n").trim().to_string();
        if content.is_empty() {
            return;
        }
        if let Some(question) = title {
            chunks.push(Chunk::new(
                content,
                ChunkMetadata {
                    header: header.clone(),
                    section: None,
                    feature: None,
                    title: Some(question.clone()),
                },
            ));
        }
    }
}
