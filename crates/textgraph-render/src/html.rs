//! Interactive Plotly HTML renderer
//!
//! Produces a standalone page that loads plotly.js from its CDN. Nodes are
//! labeled markers, edges are line segments, and each edge label is a scene
//! annotation placed at the edge midpoint.

use serde_json::{json, Value};

use textgraph_core::{RenderConfig, Result, TextGraphError};
use textgraph_graph::KnowledgeGraph;

use crate::layout::Layout;
use crate::{position_of, GraphRenderer};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Plotly HTML renderer
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
    node_color: String,
    node_size: u32,
    edge_color: String,
    label_color: String,
}

impl HtmlRenderer {
    /// Create a renderer with the default styling
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Create from configuration
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            title: config.title.clone(),
            node_color: config.node_color.clone(),
            node_size: config.node_size,
            edge_color: config.edge_color.clone(),
            label_color: config.label_color.clone(),
        }
    }

    /// Build the Plotly `data` and `layout` objects
    pub fn figure(&self, graph: &KnowledgeGraph, layout: &Layout) -> Result<(Value, Value)> {
        let mut traces = Vec::new();

        for node in graph.nodes() {
            let [x, y, z] = position_of(layout, node)?;
            traces.push(json!({
                "type": "scatter3d",
                "x": [x],
                "y": [y],
                "z": [z],
                "mode": "markers+text",
                "marker": {"size": self.node_size, "color": self.node_color},
                "text": [node],
                "textposition": "middle center",
                "hoverinfo": "text",
            }));
        }

        let mut annotations = Vec::new();
        for (source, target, label) in graph.edges() {
            let [x1, y1, z1] = position_of(layout, source)?;
            let [x2, y2, z2] = position_of(layout, target)?;

            traces.push(json!({
                "type": "scatter3d",
                "x": [x1, x2],
                "y": [y1, y2],
                "z": [z1, z2],
                "mode": "lines",
                "line": {"color": self.edge_color, "width": 2},
                "hoverinfo": "none",
            }));

            annotations.push(json!({
                "x": (x1 + x2) / 2.0,
                "y": (y1 + y2) / 2.0,
                "z": (z1 + z2) / 2.0,
                "text": label,
                "showarrow": false,
                "font": {"size": 10, "color": self.label_color},
                "opacity": 0.7,
            }));
        }

        let hidden = json!({"visible": false});
        let figure_layout = json!({
            "title": {"text": self.title},
            "scene": {
                "xaxis": hidden.clone(),
                "yaxis": hidden.clone(),
                "zaxis": hidden,
                "annotations": annotations,
            },
            "showlegend": false,
            "hoverlabel": {"font": {"size": 12}},
        });

        Ok((Value::Array(traces), figure_layout))
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for HtmlRenderer {
    fn render(&self, graph: &KnowledgeGraph, layout: &Layout) -> Result<String> {
        let (data, figure_layout) = self.figure(graph, layout)?;
        let data = script_json(&data)?;
        let figure_layout = script_json(&figure_layout)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body style="margin:0">
<div id="graph" style="width:100vw;height:100vh"></div>
<script>
Plotly.newPlot("graph", {data}, {figure_layout});
</script>
</body>
</html>
"#,
            title = escape_html(&self.title),
            cdn = PLOTLY_CDN,
        ))
    }

    fn name(&self) -> &str {
        "html"
    }
}

/// JSON safe for embedding in a `<script>` element
fn script_json(value: &Value) -> Result<String> {
    let encoded = serde_json::to_string(value).map_err(|e| TextGraphError::Render(e.to_string()))?;
    Ok(encoded.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
