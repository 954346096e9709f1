//! textgraph CLI - Build an interactive knowledge graph from a dependency parse
//!
//! Usage:
//!   textgraph <path>
//!   textgraph <path> --renderer json --output graph.json
//!   textgraph            (prompts for the path)

mod pipeline;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textgraph_core::{AppConfig, LoggingConfig, RendererKind};

#[derive(Parser)]
#[command(name = "textgraph")]
#[command(about = "Turn a dependency-parsed text into an interactive 3-D knowledge graph")]
#[command(version)]
struct Cli {
    /// Path to the parsed text (.conllu or spaCy .json); prompted for when omitted
    input: Option<PathBuf>,

    /// Input format (conllu, spacy-json); detected from the extension by default
    #[arg(long)]
    format: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the rendered graph to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Renderer (html, json)
    #[arg(long)]
    renderer: Option<RendererKind>,

    /// Layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Layout iterations
    #[arg(long)]
    iterations: Option<usize>,
}

impl Cli {
    /// Load configuration and apply command-line overrides
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?.with_env_override()?,
            None => AppConfig::from_env()?,
        };

        if let Some(format) = &self.format {
            config.parser.format = Some(format.clone());
        }
        if let Some(renderer) = self.renderer {
            config.render.renderer = renderer;
        }
        if let Some(seed) = self.seed {
            config.layout.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            anyhow::ensure!(iterations > 0, "--iterations must be at least 1");
            config.layout.iterations = iterations;
        }

        Ok(config)
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Ask for the input path on the terminal
fn prompt_for_path() -> anyhow::Result<PathBuf> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Enter the path to the text file: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read path from stdin")?;

    let path = line.trim();
    anyhow::ensure!(!path.is_empty(), "no input path given");
    Ok(PathBuf::from(path))
}

fn write_output(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("output write failed: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.load_config().context("configuration failed")?;
    init_logging(&config.logging);

    let input = match &cli.input {
        Some(path) => path.clone(),
        None => prompt_for_path().context("input read failed")?,
    };

    let output = pipeline::run(&input, &config)?;
    write_output(&output.rendered, cli.output.as_deref())?;

    if let Some(path) = &cli.output {
        eprintln!(
            "Wrote {} nodes and {} edges to {}",
            output.summary.graph.node_count,
            output.summary.graph.edge_count,
            path.display()
        );
    }

    Ok(())
}
