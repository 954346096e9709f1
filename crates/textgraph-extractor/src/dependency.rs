//! Dependency-role relation extraction
//!
//! A token yields a triple when its role is one of the configured roles and
//! its head is a verb, auxiliary, noun or adjective. The triple carries the
//! token text, the head text and the head category, in token order.

use textgraph_core::{
    DependencyRole, ExtractorConfig, HeadCategory, RelationTriple, Result, Token,
};

use crate::{validate_heads, RelationExtractor};

// ============================================================================
// Lazy relation iterator
// ============================================================================

/// Lazy sequence of relation triples over a validated token slice
#[derive(Debug, Clone)]
pub struct Relations<'a> {
    tokens: &'a [Token],
    roles: &'a [DependencyRole],
    position: usize,
}

impl<'a> Relations<'a> {
    /// Iterate `tokens`, which must already have passed `validate_heads`
    pub(crate) fn new(tokens: &'a [Token], roles: &'a [DependencyRole]) -> Self {
        Self {
            tokens,
            roles,
            position: 0,
        }
    }

    fn relation_for(&self, token: &Token) -> Option<RelationTriple> {
        if !self.roles.contains(&token.role) {
            return None;
        }

        let head = token.head.and_then(|h| self.tokens.get(h))?;
        match HeadCategory::from_pos(head.pos) {
            Some(category) => Some(RelationTriple::new(&token.text, &head.text, category)),
            None => {
                tracing::trace!(
                    token = %token.text,
                    head = %head.text,
                    head_pos = %head.pos_tag,
                    "Skipping relation with unqualified head"
                );
                None
            }
        }
    }
}

impl Iterator for Relations<'_> {
    type Item = RelationTriple;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(token) = self.tokens.get(self.position) {
            self.position += 1;
            if let Some(triple) = self.relation_for(token) {
                return Some(triple);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tokens.len() - self.position))
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Relation extractor driven by dependency roles
#[derive(Debug, Clone)]
pub struct DependencyRelationExtractor {
    roles: Vec<DependencyRole>,
}

impl DependencyRelationExtractor {
    /// Create an extractor for the five default roles
    pub fn new() -> Self {
        Self {
            roles: DependencyRole::RECOGNIZED.to_vec(),
        }
    }

    /// Create an extractor for a custom role set
    ///
    /// `Other` is dropped; it never bears a relation.
    pub fn with_roles(roles: impl IntoIterator<Item = DependencyRole>) -> Self {
        let mut unique = Vec::new();
        for role in roles {
            if role.is_recognized() && !unique.contains(&role) {
                unique.push(role);
            }
        }
        Self { roles: unique }
    }

    /// Create from configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::with_roles(config.roles.iter().copied())
    }

    /// Roles this extractor recognizes
    pub fn roles(&self) -> &[DependencyRole] {
        &self.roles
    }
}

impl Default for DependencyRelationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor for DependencyRelationExtractor {
    fn extract<'a>(&'a self, tokens: &'a [Token]) -> Result<Relations<'a>> {
        validate_heads(tokens)?;
        Ok(Relations::new(tokens, &self.roles))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn token(index: usize, text: &str, dep: &str, pos: &str, head: usize) -> Token {
        Token::new(index, text, dep, pos, Some(head))
    }

    #[test]
    fn test_attribute_of_noun() {
        let tokens = vec![
            token(0, "red", "attr", "ADJ", 1),
            token(1, "car", "ROOT", "NOUN", 1),
        ];

        let triples: Vec<_> = DependencyRelationExtractor::new()
            .extract(&tokens)
            .unwrap()
            .collect();

        assert_eq!(
            triples,
            vec![RelationTriple::new("red", "car", HeadCategory::Noun)]
        );
    }

    #[test]
    fn test_unrecognized_role_is_skipped() {
        let tokens = vec![
            token(0, "The", "det", "DET", 1),
            token(1, "dog", "nsubj", "NOUN", 2),
            token(2, "barks", "ROOT", "VERB", 2),
            token(3, "loudly", "advmod", "ADV", 2),
        ];

        let triples: Vec<_> = DependencyRelationExtractor::new()
            .extract(&tokens)
            .unwrap()
            .collect();

        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].dependent, "dog");
    }

    #[test]
    fn test_unqualified_head_pos_is_skipped() {
        // "on" is an ADP head of the prepositional object
        let tokens = vec![
            token(0, "sat", "ROOT", "VERB", 0),
            token(1, "on", "prep", "ADP", 0),
            token(2, "mat", "pobj", "NOUN", 1),
        ];

        let count = DependencyRelationExtractor::new()
            .extract(&tokens)
            .unwrap()
            .count();

        assert_eq!(count, 0);
    }

    #[test]
    fn test_self_headed_token_emits_triple() {
        let tokens = vec![token(0, "Run", "nsubj", "VERB", 0)];

        let triples: Vec<_> = DependencyRelationExtractor::new()
            .extract(&tokens)
            .unwrap()
            .collect();

        assert_eq!(
            triples,
            vec![RelationTriple::new("Run", "Run", HeadCategory::Verb)]
        );
    }

    #[test]
    fn test_auxiliary_and_apposition_heads() {
        // "Paris is a city, the capital"
        let tokens = vec![
            token(0, "Paris", "nsubj", "PROPN", 1),
            token(1, "is", "ROOT", "AUX", 1),
            token(2, "city", "attr", "NOUN", 1),
            token(3, "capital", "appos", "NOUN", 2),
        ];

        let triples: Vec<_> = DependencyRelationExtractor::new()
            .extract(&tokens)
            .unwrap()
            .collect();

        assert_eq!(
            triples,
            vec![
                RelationTriple::new("Paris", "is", HeadCategory::Auxiliary),
                RelationTriple::new("city", "is", HeadCategory::Auxiliary),
                RelationTriple::new("capital", "city", HeadCategory::Noun),
            ]
        );
    }

    #[test]
    fn test_custom_roles() {
        let extractor = DependencyRelationExtractor::with_roles([
            DependencyRole::NominalSubject,
            DependencyRole::Other,
            DependencyRole::NominalSubject,
        ]);
        assert_eq!(extractor.roles(), &[DependencyRole::NominalSubject]);

        let tokens = vec![
            token(0, "Cats", "nsubj", "NOUN", 1),
            token(1, "chase", "ROOT", "VERB", 1),
            token(2, "mice", "dobj", "NOUN", 1),
        ];
        let triples: Vec<_> = extractor.extract(&tokens).unwrap().collect();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].dependent, "Cats");
    }

    #[test]
    fn test_from_config() {
        let extractor = DependencyRelationExtractor::from_config(&ExtractorConfig::default());
        assert_eq!(extractor.roles(), &DependencyRole::RECOGNIZED);
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    const DEPS: &[&str] = &["nsubj", "dobj", "pobj", "attr", "appos", "det", "amod", "ROOT"];
    const TAGS: &[&str] = &["VERB", "AUX", "NOUN", "ADJ", "ADP", "DET", "PROPN"];

    fn arb_tokens() -> impl Strategy<Value = Vec<Token>> {
        (1usize..24).prop_flat_map(|len| {
            prop::collection::vec(
                (
                    prop::sample::select(DEPS),
                    prop::sample::select(TAGS),
                    0..len,
                    0u8..6,
                ),
                len,
            )
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (dep, pos, head, word))| {
                        Token::new(i, format!("w{word}"), dep, pos, Some(head))
                    })
                    .collect()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_output_bounded_by_recognized_roles(tokens in arb_tokens()) {
            let recognized = tokens.iter().filter(|t| t.role.is_recognized()).count();
            let emitted = extract_count(&tokens);
            prop_assert!(emitted <= recognized);
        }

        #[test]
        fn prop_every_triple_has_qualifying_head(tokens in arb_tokens()) {
            let extractor = DependencyRelationExtractor::new();
            let expected: Vec<RelationTriple> = tokens
                .iter()
                .filter(|t| t.role.is_recognized())
                .filter_map(|t| {
                    let head = &tokens[t.head.unwrap()];
                    HeadCategory::from_pos(head.pos)
                        .map(|c| RelationTriple::new(&t.text, &head.text, c))
                })
                .collect();

            let actual: Vec<RelationTriple> = extractor.extract(&tokens).unwrap().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_extraction_is_deterministic(tokens in arb_tokens()) {
            let extractor = DependencyRelationExtractor::new();
            let first: Vec<_> = extractor.extract(&tokens).unwrap().collect();
            let second: Vec<_> = extractor.extract(&tokens).unwrap().collect();
            prop_assert_eq!(first, second);
        }
    }

    fn extract_count(tokens: &[Token]) -> usize {
        DependencyRelationExtractor::new()
            .extract(tokens)
            .unwrap()
            .count()
    }
}
