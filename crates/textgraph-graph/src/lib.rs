//! textgraph Graph - In-memory directed knowledge graph
//!
//! Nodes are distinct surface strings (case-sensitive, no normalization).
//! Each ordered (source, target) pair carries at most one edge with a single
//! label; inserting the pair again overwrites the label.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

pub mod builder;

pub use builder::{build_graph, GraphBuilder};

/// Directed, edge-labeled graph of token surface forms
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    graph: DiGraph<String, String>,
    node_index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `text`, creating the node on first use
    fn ensure_node(&mut self, text: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(text) {
            return idx;
        }
        let idx = self.graph.add_node(text.to_string());
        self.node_index.insert(text.to_string(), idx);
        idx
    }

    /// Insert or relabel the edge `source -> target`
    ///
    /// Missing endpoints are created. Returns the label that was replaced,
    /// if the edge already existed.
    pub(crate) fn upsert_edge(
        &mut self,
        source: &str,
        target: &str,
        label: impl Into<String>,
    ) -> Option<String> {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);
        let label = label.into();

        match self.graph.find_edge(from, to) {
            Some(edge) => Some(std::mem::replace(&mut self.graph[edge], label)),
            None => {
                self.graph.add_edge(from, to, label);
                None
            }
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges as (source, target, label) in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                edge.weight().as_str(),
            )
        })
    }

    /// Label of the edge `source -> target`
    pub fn label(&self, source: &str, target: &str) -> Option<&str> {
        let from = *self.node_index.get(source)?;
        let to = *self.node_index.get(target)?;
        let edge = self.graph.find_edge(from, to)?;
        Some(self.graph[edge].as_str())
    }

    /// Whether a node with this exact text exists
    pub fn contains_node(&self, text: &str) -> bool {
        self.node_index.contains_key(text)
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Underlying petgraph structure, for layout algorithms
    pub fn as_petgraph(&self) -> &DiGraph<String, String> {
        &self.graph
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            self_loops: self
                .graph
                .edge_references()
                .filter(|e| e.source() == e.target())
                .count(),
        }
    }
}

/// Summary counts for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub self_loops: usize,
}
