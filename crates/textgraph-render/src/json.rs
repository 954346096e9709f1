//! JSON scene renderer

use serde::{Deserialize, Serialize};

use textgraph_core::{Result, TextGraphError};
use textgraph_graph::KnowledgeGraph;

use crate::layout::Layout;
use crate::{position_of, GraphRenderer};

/// Positioned node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Labeled directed edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Laid-out graph ready for an external 3-D viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Combine a graph with its layout
    pub fn new(graph: &KnowledgeGraph, layout: &Layout) -> Result<Self> {
        let nodes = graph
            .nodes()
            .map(|node| {
                let [x, y, z] = position_of(layout, node)?;
                Ok(SceneNode {
                    id: node.to_string(),
                    x,
                    y,
                    z,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = graph
            .edges()
            .map(|(source, target, label)| SceneEdge {
                source: source.to_string(),
                target: target.to_string(),
                label: label.to_string(),
            })
            .collect();

        Ok(Self { nodes, edges })
    }
}

/// Renders a `Scene` as pretty-printed JSON
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, graph: &KnowledgeGraph, layout: &Layout) -> Result<String> {
        let scene = Scene::new(graph, layout)?;
        serde_json::to_string_pretty(&scene).map_err(|e| TextGraphError::Render(e.to_string()))
    }

    fn name(&self) -> &str {
        "json"
    }
}
