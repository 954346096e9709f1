//! textgraph Extractor - Relation extraction from dependency parses
//!
//! Maps a dependency-annotated token sequence to raw relation triples
//! (dependent text, head text, head category). Tokens whose role or head
//! part-of-speech does not qualify are skipped without error.

use textgraph_core::{DependencyRole, Result, TextGraphError, Token};

pub mod dependency;

pub use dependency::{DependencyRelationExtractor, Relations};

/// Trait for relation extractors
pub trait RelationExtractor: Send + Sync {
    /// Validate `tokens` and return a lazy iterator over their relations
    fn extract<'a>(&'a self, tokens: &'a [Token]) -> Result<Relations<'a>>;
}

/// Extract relations using the five default roles
pub fn extract_relations(tokens: &[Token]) -> Result<Relations<'_>> {
    validate_heads(tokens)?;
    Ok(Relations::new(tokens, &DependencyRole::RECOGNIZED))
}

/// Check that every token sits at its own index and has a head inside the
/// sequence
///
/// Heads are resolved by slice position while `Token::is_root` compares
/// against `Token::index`, so the two must agree.
pub fn validate_heads(tokens: &[Token]) -> Result<()> {
    for (position, token) in tokens.iter().enumerate() {
        if token.index != position {
            return Err(TextGraphError::malformed(
                position,
                format!(
                    "'{}' carries index {} but sits at position {position}",
                    token.text, token.index
                ),
            ));
        }
        match token.head {
            None => {
                return Err(TextGraphError::malformed(
                    position,
                    format!("'{}' has no head", token.text),
                ))
            }
            Some(head) if head >= tokens.len() => {
                return Err(TextGraphError::malformed(
                    position,
                    format!(
                        "'{}' points at head {head} outside sequence of {} tokens",
                        token.text,
                        tokens.len()
                    ),
                ))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use textgraph_core::{HeadCategory, RelationTriple};

    #[test]
    fn test_extract_relations_cats_chase_mice() {
        let tokens = vec![
            Token::new(0, "Cats", "nsubj", "NOUN", Some(1)),
            Token::new(1, "chase", "ROOT", "VERB", Some(1)),
            Token::new(2, "mice", "dobj", "NOUN", Some(1)),
        ];

        let triples: Vec<RelationTriple> = extract_relations(&tokens).unwrap().collect();

        assert_eq!(
            triples,
            vec![
                RelationTriple::new("Cats", "chase", HeadCategory::Verb),
                RelationTriple::new("mice", "chase", HeadCategory::Verb),
            ]
        );
    }

    #[test]
    fn test_validate_missing_head() {
        let tokens = vec![
            Token::new(0, "chase", "ROOT", "VERB", Some(0)),
            Token::new(1, "mice", "dobj", "NOUN", None),
        ];

        let err = extract_relations(&tokens).unwrap_err();
        assert!(matches!(err, TextGraphError::MalformedToken { index: 1, .. }));
    }

    #[test]
    fn test_validate_head_out_of_range() {
        let tokens = vec![Token::new(0, "Cats", "nsubj", "NOUN", Some(4))];

        let err = extract_relations(&tokens).unwrap_err();
        assert!(matches!(err, TextGraphError::MalformedToken { index: 0, .. }));
    }

    #[test]
    fn test_validate_index_matches_position() {
        let tokens = vec![
            Token::new(0, "Cats", "nsubj", "NOUN", Some(1)),
            Token::new(5, "chase", "ROOT", "VERB", Some(1)),
        ];

        let err = extract_relations(&tokens).unwrap_err();
        assert!(matches!(err, TextGraphError::MalformedToken { index: 1, .. }));
        assert!(err.to_string().contains("index 5"));
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_relations(&[]).unwrap().count(), 0);
    }
}
