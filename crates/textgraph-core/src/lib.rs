//! textgraph Core - Token model, error types, and shared traits
//!
//! This crate defines the abstractions shared by every stage of the
//! text-to-graph pipeline:
//! - Annotated tokens produced by a dependency parser
//! - Dependency roles and part-of-speech categories
//! - Relation triples handed from the extractor to the graph builder
//! - Common error types
//! - The `DependencyParser` trait
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, EnvOverrides, ExtractorConfig, LayoutConfig, LoggingConfig,
    ParserConfig, RenderConfig, RendererKind,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for textgraph operations
#[derive(Error, Debug)]
pub enum TextGraphError {
    #[error("Failed to read input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error at {location}: {message}")]
    Parse { location: String, message: String },

    #[error("Malformed token at index {index}: {reason}")]
    MalformedToken { index: usize, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TextGraphError {
    /// Shorthand for a malformed token error
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            index,
            reason: reason.into(),
        }
    }

    /// Shorthand for a parse error; `location` reads like "line 3" or "sentence 2"
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextGraphError>;

// ============================================================================
// Dependency Roles
// ============================================================================

/// Syntactic role of a token relative to its head
///
/// Only the first five roles take part in relation extraction; every other
/// parser label collapses into `Other`. Serialized names follow the parser
/// tag vocabulary so config files can list roles as `"nsubj"`, `"dobj"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyRole {
    #[serde(rename = "nsubj")]
    NominalSubject,
    #[serde(rename = "dobj", alias = "obj")]
    DirectObject,
    #[serde(rename = "pobj")]
    PrepositionalObject,
    #[serde(rename = "attr")]
    Attribute,
    #[serde(rename = "appos")]
    Apposition,
    #[serde(rename = "other")]
    Other,
}

impl DependencyRole {
    /// Roles that produce relation triples
    pub const RECOGNIZED: [Self; 5] = [
        Self::NominalSubject,
        Self::DirectObject,
        Self::PrepositionalObject,
        Self::Attribute,
        Self::Apposition,
    ];

    /// Map a parser dependency label onto a role.
    ///
    /// `obj` (Universal Dependencies) is accepted as an alias of `dobj`.
    /// Subtyped labels such as `nsubj:pass` are not folded into their base.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "nsubj" => Self::NominalSubject,
            "dobj" | "obj" => Self::DirectObject,
            "pobj" => Self::PrepositionalObject,
            "attr" => Self::Attribute,
            "appos" => Self::Apposition,
            _ => Self::Other,
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NominalSubject => "nsubj",
            Self::DirectObject => "dobj",
            Self::PrepositionalObject => "pobj",
            Self::Attribute => "attr",
            Self::Apposition => "appos",
            Self::Other => "other",
        }
    }

    /// Whether this role is one of the five relation-bearing roles
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl std::fmt::Display for DependencyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Part of Speech
// ============================================================================

/// Coarse part-of-speech category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Verb,
    #[serde(rename = "AUX")]
    Auxiliary,
    Noun,
    #[serde(rename = "ADJ")]
    Adjective,
    Other,
}

impl PartOfSpeech {
    /// Map a universal POS tag (`VERB`, `AUX`, `NOUN`, `ADJ`) onto a category
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "VERB" => Self::Verb,
            "AUX" => Self::Auxiliary,
            "NOUN" => Self::Noun,
            "ADJ" => Self::Adjective,
            _ => Self::Other,
        }
    }

    /// Get the tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verb => "VERB",
            Self::Auxiliary => "AUX",
            Self::Noun => "NOUN",
            Self::Adjective => "ADJ",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A dependency-annotated token
///
/// `head` indexes into the token sequence the token belongs to. A root
/// token points at itself. `None` means the parser could not supply a head;
/// such a token is rejected before extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the token sequence
    pub index: usize,

    /// Surface form
    pub text: String,

    /// Dependency role
    pub role: DependencyRole,

    /// Part-of-speech category
    pub pos: PartOfSpeech,

    /// Index of the head token
    pub head: Option<usize>,

    /// Raw dependency label as emitted by the parser
    pub dep_label: String,

    /// Raw part-of-speech tag as emitted by the parser
    pub pos_tag: String,
}

impl Token {
    /// Create a token from raw parser tags
    pub fn new(
        index: usize,
        text: impl Into<String>,
        dep_label: impl Into<String>,
        pos_tag: impl Into<String>,
        head: Option<usize>,
    ) -> Self {
        let dep_label = dep_label.into();
        let pos_tag = pos_tag.into();
        Self {
            index,
            text: text.into(),
            role: DependencyRole::from_label(&dep_label),
            pos: PartOfSpeech::from_tag(&pos_tag),
            head,
            dep_label,
            pos_tag,
        }
    }

    /// Whether the token is its own head
    pub fn is_root(&self) -> bool {
        self.head == Some(self.index)
    }
}

// ============================================================================
// Relation Triples
// ============================================================================

/// Part-of-speech of a head token that qualifies for a relation
///
/// Closed on purpose: the graph builder matches on it exhaustively to pick
/// edge direction and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeadCategory {
    Verb,
    #[serde(rename = "AUX")]
    Auxiliary,
    Noun,
    #[serde(rename = "ADJ")]
    Adjective,
}

impl HeadCategory {
    /// Qualifying category for a head part-of-speech, if any
    pub fn from_pos(pos: PartOfSpeech) -> Option<Self> {
        match pos {
            PartOfSpeech::Verb => Some(Self::Verb),
            PartOfSpeech::Auxiliary => Some(Self::Auxiliary),
            PartOfSpeech::Noun => Some(Self::Noun),
            PartOfSpeech::Adjective => Some(Self::Adjective),
            PartOfSpeech::Other => None,
        }
    }

    /// The underlying part-of-speech
    pub fn pos(&self) -> PartOfSpeech {
        match self {
            Self::Verb => PartOfSpeech::Verb,
            Self::Auxiliary => PartOfSpeech::Auxiliary,
            Self::Noun => PartOfSpeech::Noun,
            Self::Adjective => PartOfSpeech::Adjective,
        }
    }

    /// Verbs and auxiliaries
    pub fn is_verb_like(&self) -> bool {
        matches!(self, Self::Verb | Self::Auxiliary)
    }

    /// Tag name used as an edge label for descriptive relations
    pub fn as_str(&self) -> &'static str {
        self.pos().as_str()
    }
}

impl std::fmt::Display for HeadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw relation between a dependent token and its head
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationTriple {
    /// Dependent token text
    pub dependent: String,

    /// Head token text
    pub head: String,

    /// Head part-of-speech category
    pub category: HeadCategory,
}

impl RelationTriple {
    /// Create a new triple
    pub fn new(
        dependent: impl Into<String>,
        head: impl Into<String>,
        category: HeadCategory,
    ) -> Self {
        Self {
            dependent: dependent.into(),
            head: head.into(),
            category,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for dependency parsers
///
/// A parser is constructed once and passed by reference into the pipeline.
pub trait DependencyParser: Send + Sync {
    /// Parse text into an ordered sequence of annotated tokens
    fn parse(&self, text: &str) -> Result<Vec<Token>>;

    /// Get parser name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
