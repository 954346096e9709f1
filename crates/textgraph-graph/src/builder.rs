//! Graph builder
//!
//! Turns relation triples into labeled edges:
//! - verb or auxiliary head: `dependent -> head`, labeled with the head text
//! - noun or adjective head: `head -> dependent`, labeled with the head's
//!   part-of-speech name
//!
//! A later triple naming the same ordered pair overwrites the earlier label.
//! Two different relations between the same two surface forms therefore
//! keep only the last one processed.

use textgraph_core::{HeadCategory, RelationTriple};

use crate::KnowledgeGraph;

/// Incremental graph builder
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: KnowledgeGraph,
    triples_seen: usize,
    overwritten: usize,
}

impl GraphBuilder {
    /// Create a builder with an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one triple
    pub fn insert(&mut self, triple: &RelationTriple) {
        let (source, target, label) = match triple.category {
            HeadCategory::Verb | HeadCategory::Auxiliary => (
                triple.dependent.as_str(),
                triple.head.as_str(),
                triple.head.clone(),
            ),
            HeadCategory::Noun | HeadCategory::Adjective => (
                triple.head.as_str(),
                triple.dependent.as_str(),
                triple.category.as_str().to_string(),
            ),
        };

        self.triples_seen += 1;
        if let Some(previous) = self.graph.upsert_edge(source, target, label) {
            self.overwritten += 1;
            tracing::trace!(source, target, %previous, "Edge label overwritten");
        }
    }

    /// Add every triple from an iterator
    pub fn extend<I>(&mut self, triples: I)
    where
        I: IntoIterator<Item = RelationTriple>,
    {
        for triple in triples {
            self.insert(&triple);
        }
    }

    /// Number of triples inserted so far
    pub fn triples_seen(&self) -> usize {
        self.triples_seen
    }

    /// Number of inserts that replaced an existing edge label
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    /// Finish construction and hand over the graph
    pub fn finish(self) -> KnowledgeGraph {
        let stats = self.graph.stats();
        tracing::debug!(
            triples = self.triples_seen,
            overwritten = self.overwritten,
            nodes = stats.node_count,
            edges = stats.edge_count,
            self_loops = stats.self_loops,
            "Graph built"
        );
        self.graph
    }
}

/// Build a graph from a triple sequence in one pass
pub fn build_graph<I>(triples: I) -> KnowledgeGraph
where
    I: IntoIterator<Item = RelationTriple>,
{
    let mut builder = GraphBuilder::new();
    builder.extend(triples);
    builder.finish()
}

// ============================================================================
// Tests
// ============================================================================
