//! textgraph Render - Layout and visualization
//!
//! Places every node of a finished `KnowledgeGraph` in 3-D space with a
//! seeded spring layout, then renders the result:
//! - `HtmlRenderer`: interactive Plotly page, edge labels as annotations
//! - `JsonRenderer`: positioned nodes and labeled edges as JSON

use textgraph_core::{RenderConfig, RendererKind, Result, TextGraphError};
use textgraph_graph::KnowledgeGraph;

pub mod html;
pub mod json;
pub mod layout;

pub use html::HtmlRenderer;
pub use json::{JsonRenderer, Scene, SceneEdge, SceneNode};
pub use layout::{spring_layout, Layout, Point3};

/// Trait for graph renderers
pub trait GraphRenderer: Send + Sync {
    /// Render a laid-out graph to a document
    fn render(&self, graph: &KnowledgeGraph, layout: &Layout) -> Result<String>;

    /// Get renderer name for logging
    fn name(&self) -> &str;
}

/// Build the renderer selected in configuration
pub fn renderer_for(config: &RenderConfig) -> Box<dyn GraphRenderer> {
    match config.renderer {
        RendererKind::Html => Box::new(HtmlRenderer::from_config(config)),
        RendererKind::Json => Box::new(JsonRenderer::new()),
    }
}

/// Position of `node`, or a render error if the layout misses it
pub(crate) fn position_of(layout: &Layout, node: &str) -> Result<Point3> {
    layout
        .get(node)
        .ok_or_else(|| TextGraphError::Render(format!("no layout position for node '{node}'")))
}
