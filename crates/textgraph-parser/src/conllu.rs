//! CoNLL-U reader
//!
//! Sentences are read with the `conllu` crate and concatenated into a single
//! token sequence; per-sentence HEAD numbers are rebased onto the document so
//! every head indexes into the returned `Vec<Token>`.

use udgraph::graph::{Node, Sentence};
use conllu::io::{ReadSentence, Reader};
use textgraph_core::{DependencyParser, Result, TextGraphError, Token};

/// CoNLL-U placeholder for an unset field
const UNSET: &str = "_";

/// CoNLL-U dependency parse reader
#[derive(Debug, Clone, Default)]
pub struct ConlluParser;

impl ConlluParser {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// Convert one sentence into tokens appended to `tokens`
    ///
    /// Node 0 of a sentence is the artificial root, so word `n` lands at
    /// document index `offset + n - 1`.
    fn append_sentence(sentence: &Sentence, tokens: &mut Vec<Token>) -> Result<()> {
        let offset = tokens.len();
        let graph = sentence.dep_graph();

        let words = (1..).map_while(|position| {
            (position < sentence.len()).then(|| (position, &sentence[position]))
        });
        for (position, node) in words {
            let word = match node {
                Node::Token(word) => word,
                Node::Root => continue,
            };
            let index = offset + position - 1;

            let (head, deprel) = match graph.head(position) {
                Some(triple) => {
                    // Root attaches to itself
                    let head = if triple.head() == 0 {
                        index
                    } else {
                        offset + triple.head() - 1
                    };
                    let deprel = triple.relation().filter(|rel| !is_blank(rel)).ok_or_else(|| {
                        TextGraphError::malformed(
                            index,
                            format!("'{}' has no dependency label", word.form()),
                        )
                    })?;
                    (Some(head), deprel.to_string())
                }
                // HEAD `_`: kept headless so extraction rejects it
                None => (None, UNSET.to_string()),
            };

            let upos = word.upos().filter(|tag| !is_blank(tag)).ok_or_else(|| {
                TextGraphError::malformed(
                    index,
                    format!("'{}' has no part-of-speech tag", word.form()),
                )
            })?;

            tokens.push(Token::new(index, word.form(), deprel, upos, head));
        }

        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.is_empty() || value == UNSET
}

impl DependencyParser for ConlluParser {
    fn parse(&self, text: &str) -> Result<Vec<Token>> {
        let mut reader = Reader::new(text.as_bytes());
        let mut tokens = Vec::new();
        let mut sentences = 0usize;

        loop {
            let sentence = reader.read_sentence().map_err(|e| {
                TextGraphError::parse(format!("sentence {}", sentences + 1), e.to_string())
            })?;
            let Some(sentence) = sentence else { break };

            Self::append_sentence(&sentence, &mut tokens)?;
            sentences += 1;
        }

        tracing::debug!(sentences, tokens = tokens.len(), "Parsed CoNLL-U input");
        Ok(tokens)
    }

    fn name(&self) -> &str {
        "conllu"
    }
}

// ============================================================================
// Tests
// ============================================================================
