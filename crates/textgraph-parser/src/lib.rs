//! textgraph Parser - Readers for dependency-parser output
//!
//! The natural-language parser itself runs upstream. This crate reads the
//! annotated token streams it serializes:
//! - CoNLL-U (UDPipe, Stanza, spaCy `spacy-conll`, treebanks)
//! - spaCy `Doc.to_json()` documents
//!
//! Each reader implements `textgraph_core::DependencyParser` and produces
//! tokens whose heads index into the returned sequence.

use std::path::Path;

use textgraph_core::{DependencyParser, Result, TextGraphError};

pub mod conllu;
pub mod spacy;

pub use conllu::ConlluParser;
pub use spacy::SpacyJsonParser;

// ============================================================================
// Input Formats
// ============================================================================

/// Supported serialized parse formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Conllu,
    SpacyJson,
}

impl InputFormat {
    /// Detect format from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "conllu" | "conll" => Some(Self::Conllu),
            "json" => Some(Self::SpacyJson),
            _ => None,
        }
    }

    /// Detect format from path
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("none");

        Self::from_extension(ext).ok_or_else(|| TextGraphError::UnsupportedFormat(ext.to_string()))
    }

    /// Build the parser for this format
    pub fn parser(&self) -> Box<dyn DependencyParser> {
        match self {
            Self::Conllu => Box::new(ConlluParser::new()),
            Self::SpacyJson => Box::new(SpacyJsonParser::new()),
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = TextGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "conllu" | "conll" => Ok(Self::Conllu),
            "spacy-json" | "spacy" | "json" => Ok(Self::SpacyJson),
            _ => Err(TextGraphError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conllu => write!(f, "conllu"),
            Self::SpacyJson => write!(f, "spacy-json"),
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Read an input file fully into memory
pub fn read_input(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| TextGraphError::Input {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Read input file");
    Ok(content)
}

// ============================================================================
// Tests
// ============================================================================
