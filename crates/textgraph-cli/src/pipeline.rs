//! End-to-end pipeline: read, parse, extract, build, lay out, render
//!
//! Every stage failure is wrapped with the name of the stage so the user
//! can tell where processing stopped.

use std::path::Path;

use anyhow::Context;

use textgraph_core::{AppConfig, DependencyParser};
use textgraph_extractor::{DependencyRelationExtractor, RelationExtractor};
use textgraph_graph::{GraphBuilder, GraphStats};
use textgraph_parser::{read_input, InputFormat};
use textgraph_render::{renderer_for, spring_layout};

/// Counts gathered while running the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub tokens: usize,
    pub triples: usize,
    pub graph: GraphStats,
}

/// Rendered document plus run summary
#[derive(Debug, Clone)]
pub struct Output {
    pub rendered: String,
    pub summary: Summary,
}

/// Pick the input format: explicit setting first, then file extension
pub fn resolve_format(path: &Path, configured: Option<&str>) -> anyhow::Result<InputFormat> {
    let format = match configured {
        Some(name) => name.parse::<InputFormat>()?,
        None => InputFormat::from_path(path)?,
    };
    Ok(format)
}

/// Run the whole pipeline on one input file
///
/// The file is read before its format is resolved, so a missing path is
/// always reported as an input failure.
pub fn run(path: &Path, config: &AppConfig) -> anyhow::Result<Output> {
    let text = read_input(path).context("input read failed")?;

    let format = resolve_format(path, config.parser.format.as_deref())
        .context("format detection failed")?;
    // Constructed once, borrowed by the remaining stages
    let parser = format.parser();
    tracing::debug!(format = %format, parser = parser.name(), "Selected input reader");

    let output = process(&text, parser.as_ref(), config)?;
    tracing::info!(
        path = %path.display(),
        tokens = output.summary.tokens,
        triples = output.summary.triples,
        nodes = output.summary.graph.node_count,
        edges = output.summary.graph.edge_count,
        "Knowledge graph rendered"
    );

    Ok(output)
}

/// Parse, extract, build, lay out and render already-read input
pub fn process(
    text: &str,
    parser: &dyn DependencyParser,
    config: &AppConfig,
) -> anyhow::Result<Output> {
    let tokens = parser
        .parse(text)
        .with_context(|| format!("parse failed ({} reader)", parser.name()))?;

    let extractor = DependencyRelationExtractor::from_config(&config.extractor);
    let relations = extractor.extract(&tokens).context("extraction failed")?;

    let mut builder = GraphBuilder::new();
    builder.extend(relations);
    let triples = builder.triples_seen();
    let graph = builder.finish();

    let layout = spring_layout(&graph, &config.layout);
    let renderer = renderer_for(&config.render);
    let rendered = renderer
        .render(&graph, &layout)
        .with_context(|| format!("rendering failed ({} renderer)", renderer.name()))?;

    let summary = Summary {
        tokens: tokens.len(),
        triples,
        graph: graph.stats(),
    };

    Ok(Output { rendered, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use textgraph_core::RendererKind;
    use textgraph_parser::ConlluParser;

    const CATS: &str = "\
1\tCats\tcat\tNOUN\tNNS\t_\t2\tnsubj\t_\t_
2\tchase\tchase\tVERB\tVBP\t_\t0\tROOT\t_\t_
3\tmice\tmouse\tNOUN\tNNS\t_\t2\tdobj\t_\t_
";

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn conllu_file(content: &str) -> tempfile::NamedTempFile {
        temp_file(".conllu", content)
    }

    fn json_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.render.renderer = RendererKind::Json;
        config
    }

    #[test]
    fn test_run_summary() {
        let file = conllu_file(CATS);
        let output = run(file.path(), &json_config()).unwrap();

        assert_eq!(output.summary.tokens, 3);
        assert_eq!(output.summary.triples, 2);
        assert_eq!(output.summary.graph.node_count, 3);
        assert_eq!(output.summary.graph.edge_count, 2);

        let scene: serde_json::Value = serde_json::from_str(&output.rendered).unwrap();
        assert_eq!(scene["edges"][0]["source"], "Cats");
        assert_eq!(scene["edges"][0]["label"], "chase");
    }

    #[test]
    fn test_run_missing_file_names_stage() {
        let err = run(Path::new("/nonexistent/doc.conllu"), &AppConfig::default()).unwrap_err();

        assert!(format!("{err:#}").starts_with("input read failed"));
    }

    #[test]
    fn test_run_missing_file_wins_over_unknown_extension() {
        for path in ["/nonexistent/missing.txt", "/nonexistent/missing"] {
            let err = run(Path::new(path), &AppConfig::default()).unwrap_err();
            assert!(err.to_string().starts_with("input read failed"), "{path}: {err:#}");
        }
    }

    #[test]
    fn test_run_unknown_extension_names_stage() {
        let file = temp_file(".txt", CATS);
        let err = run(file.path(), &AppConfig::default()).unwrap_err();

        assert!(err.to_string().starts_with("format detection failed"));
        assert!(format!("{err:#}").contains("Unsupported input format: txt"));
    }

    #[test]
    fn test_run_parse_error_names_stage() {
        let file = conllu_file("1\tCats\tcat\tNOUN\tNNS\t_\tx\tnsubj\t_\t_\n");
        let err = run(file.path(), &AppConfig::default()).unwrap_err();

        assert!(err.to_string().starts_with("parse failed (conllu reader)"));
    }

    #[test]
    fn test_run_malformed_head_names_stage() {
        let file = conllu_file("1\tCats\tcat\tNOUN\tNNS\t_\t_\tnsubj\t_\t_\n");
        let err = run(file.path(), &AppConfig::default()).unwrap_err();

        assert!(err.to_string().starts_with("extraction failed"));
    }

    #[test]
    fn test_process_root_subject_becomes_self_loop() {
        let text = "1\tRun\trun\tVERB\tVB\t_\t0\tnsubj\t_\t_\n";
        let output = process(text, &ConlluParser::new(), &json_config()).unwrap();

        assert_eq!(output.summary.triples, 1);
        assert_eq!(output.summary.graph.node_count, 1);
        assert_eq!(output.summary.graph.edge_count, 1);
        assert_eq!(output.summary.graph.self_loops, 1);

        let scene: serde_json::Value = serde_json::from_str(&output.rendered).unwrap();
        assert_eq!(scene["edges"][0]["source"], "Run");
        assert_eq!(scene["edges"][0]["target"], "Run");
        assert_eq!(scene["edges"][0]["label"], "Run");
    }

    #[test]
    fn test_resolve_format() {
        let path = Path::new("doc.conllu");
        assert_eq!(resolve_format(path, None).unwrap(), InputFormat::Conllu);
        assert_eq!(
            resolve_format(path, Some("spacy-json")).unwrap(),
            InputFormat::SpacyJson
        );
        assert!(resolve_format(Path::new("doc.txt"), None).is_err());
    }
}
