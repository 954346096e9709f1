//! spaCy JSON reader
//!
//! Reads the document produced by spaCy's `Doc.to_json()`:
//!
//! ```json
//! {"text": "Cats chase mice.",
//!  "tokens": [{"id": 0, "start": 0, "end": 4, "pos": "NOUN", "dep": "nsubj", "head": 1}, ...]}
//! ```
//!
//! Token offsets count characters, not bytes; heads are absolute token ids
//! and the sentence root points at itself.

use serde::Deserialize;

use textgraph_core::{DependencyParser, Result, TextGraphError, Token};

#[derive(Debug, Deserialize)]
struct SpacyDoc {
    text: String,
    tokens: Vec<SpacyToken>,
}

#[derive(Debug, Deserialize)]
struct SpacyToken {
    id: usize,
    start: usize,
    end: usize,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    dep: Option<String>,
    #[serde(default)]
    head: Option<usize>,
}

/// spaCy `Doc.to_json()` reader
#[derive(Debug, Clone, Default)]
pub struct SpacyJsonParser;

impl SpacyJsonParser {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }
}

/// Non-empty tag or a malformed-token error naming what is missing
fn required_tag(value: Option<String>, index: usize, what: &str) -> Result<String> {
    match value {
        Some(tag) if !tag.is_empty() => Ok(tag),
        _ => Err(TextGraphError::malformed(index, format!("missing {what}"))),
    }
}

impl DependencyParser for SpacyJsonParser {
    fn parse(&self, text: &str) -> Result<Vec<Token>> {
        let doc: SpacyDoc = serde_json::from_str(text)
            .map_err(|e| TextGraphError::parse(format!("line {}", e.line()), e.to_string()))?;

        // Byte offset of every character, plus the end of the text
        let boundaries: Vec<usize> = doc
            .text
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(doc.text.len()))
            .collect();

        let mut tokens = Vec::with_capacity(doc.tokens.len());
        for (index, raw) in doc.tokens.into_iter().enumerate() {
            if raw.id != index {
                return Err(TextGraphError::malformed(
                    index,
                    format!("token id {} out of sequence", raw.id),
                ));
            }
            if raw.start > raw.end || raw.end >= boundaries.len() {
                return Err(TextGraphError::malformed(
                    index,
                    format!(
                        "span {}..{} outside text of {} characters",
                        raw.start,
                        raw.end,
                        boundaries.len() - 1
                    ),
                ));
            }

            let surface = &doc.text[boundaries[raw.start]..boundaries[raw.end]];
            let dep = required_tag(raw.dep, index, "dependency label")?;
            let pos = required_tag(raw.pos, index, "part-of-speech tag")?;

            tokens.push(Token::new(index, surface, dep, pos, raw.head));
        }

        tracing::debug!(tokens = tokens.len(), "Parsed spaCy JSON input");
        Ok(tokens)
    }

    fn name(&self) -> &str {
        "spacy-json"
    }
}

// ============================================================================
// Tests
// ============================================================================
