use domain::chunk::{Chunk, ChunkMetadata};

/// Feature lookup table. Declaration order matters: the first feature
/// whose keyword appears in the title wins.
const FEATURE_KEYWORDS: &[(&str, &[&str])] = &[
    ("button", &["Button", "Nút"]),
    ("form", &["Form"]),
    ("table", &["Table", "Bảng"]),
    ("header", &["Header", "Tiêu Đề"]),
];

fn detect_feature(title: &str) -> &'static str {
    let title_lower = title.to_lowercase();
    for (feature, keywords) in FEATURE_KEYWORDS {
        for keyword in *keywords {
            if title_lower.contains(&keyword.to_lowercase()) {
                return feature;
            }
        }
    }
    "general"
}

/// A title rendered in bold instead of a `#### ` heading.
fn is_bold_title(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 4 && trimmed.starts_with("**") && trimmed.ends_with("**")
}

fn strip_styling(line: &str) -> String {
    line.chars()
        .filter(|c| *c != '*' && *c != '#')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parser for the "system" documentation style: `## ` module headers,
/// `### ` sections, `#### `/bold feature titles, body lines in between.
pub struct DocumentParser;

impl DocumentParser {
    pub fn parse(text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut metadata = ChunkMetadata::default();

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("## ") {
                Self::flush(&mut chunks, &buffer, &metadata);
                let heading = rest.trim().to_string();
                buffer = vec![heading.clone()];
                metadata.header = Some(heading.clone());
                metadata.section = None;
                metadata.feature = Some("header".to_string());
                metadata.title = Some(heading);
            } else if let Some(rest) = line.strip_prefix("### ") {
                Self::flush(&mut chunks, &buffer, &metadata);
                let heading = rest.trim().to_string();
                buffer = vec![heading.clone()];
                metadata.section = Some(heading.clone());
                metadata.feature = Some("section".to_string());
                metadata.title = Some(heading);
            } else if line.starts_with("#### ") || is_bold_title(line) {
                Self::flush(&mut chunks, &buffer, &metadata);
                let title = strip_styling(line);
                buffer = vec![title.clone()];
                metadata.feature = Some(detect_feature(&title).to_string());
                metadata.title = Some(title);
            } else {
                buffer.push(line.to_string());
            }
        }
        Self::flush(&mut chunks, &buffer, &metadata);
        chunks
    }

    /// Emits the buffered chunk if its joined content is non-empty.
    /// Metadata is cloned here so later context mutation never alters
    /// chunks that were already emitted.
    fn flush(chunks: &mut Vec<Chunk>, buffer: &[String], metadata: &ChunkMetadata) {
        let content = buffer.join("\n").trim().to_string();
        if !content.is_empty() {
            chunks.push(Chunk::new(content, metadata.clone()));
        }
    }
}
