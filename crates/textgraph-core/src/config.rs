//! textgraph Configuration Management
//!
//! Handles configuration from a TOML file and environment variables,
//! with defaults that reproduce the stock visualization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::DependencyRole;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Input parsing configuration
    pub parser: ParserConfig,

    /// Relation extraction configuration
    pub extractor: ExtractorConfig,

    /// 3-D layout configuration
    pub layout: LayoutConfig,

    /// Rendering configuration
    pub render: RenderConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|message| ConfigError::ParseError { path, message })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.extractor.roles.contains(&DependencyRole::Other) {
            return Err("extractor.roles may not contain \"other\"".to_string());
        }
        if self.layout.iterations == 0 {
            return Err("layout.iterations must be at least 1".to_string());
        }
        Ok(())
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        EnvOverrides::from_env()?.apply(self)
    }
}

/// Settings taken from environment variables
///
/// Only variables that are actually set are recorded, so an override equal
/// to the built-in default still replaces a value from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub format: Option<String>,
    pub seed: Option<u64>,
    pub iterations: Option<usize>,
    pub renderer: Option<RendererKind>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, which returns the value of a set variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            format: lookup("TEXTGRAPH_INPUT_FORMAT"),
            seed: parse_var(&lookup, "TEXTGRAPH_LAYOUT_SEED")?,
            iterations: parse_var(&lookup, "TEXTGRAPH_LAYOUT_ITERATIONS")?,
            renderer: lookup("TEXTGRAPH_RENDERER")
                .map(|value| value.parse::<RendererKind>())
                .transpose()?,
            log_level: lookup("LOG_LEVEL"),
        })
    }

    /// Apply every recorded override to `config` and validate the result
    pub fn apply(self, mut config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(format) = self.format {
            config.parser.format = Some(format);
        }
        if let Some(seed) = self.seed {
            config.layout.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            config.layout.iterations = iterations;
        }
        if let Some(renderer) = self.renderer {
            config.render.renderer = renderer;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .map(|value| {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}

/// Input parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParserConfig {
    /// Input format name (`conllu`, `spacy-json`); detected from the file
    /// extension when unset
    pub format: Option<String>,
}

/// Relation extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Dependency roles that produce relations
    pub roles: Vec<DependencyRole>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            roles: DependencyRole::RECOGNIZED.to_vec(),
        }
    }
}

/// Force-directed layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Seed for the initial node positions
    pub seed: u64,

    /// Number of force simulation steps
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 50,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output renderer
    pub renderer: RendererKind,

    /// Page/figure title
    pub title: String,

    /// Node marker colour
    pub node_color: String,

    /// Node marker size
    pub node_size: u32,

    /// Edge line colour
    pub edge_color: String,

    /// Edge label colour
    pub label_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::Html,
            title: "Interactive Knowledge Graph".to_string(),
            node_color: "skyblue".to_string(),
            node_size: 20,
            edge_color: "gray".to_string(),
            label_color: "red".to_string(),
        }
    }
}

/// Supported renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Html,
    Json,
}

impl std::str::FromStr for RendererKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "renderer".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.layout.seed, 42);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.render.renderer, RendererKind::Html);
        assert_eq!(config.extractor.roles.len(), 5);
        assert!(config.parser.format.is_none());
    }

    #[test]
    fn test_renderer_parse() {
        assert_eq!("html".parse::<RendererKind>().unwrap(), RendererKind::Html);
        assert_eq!("JSON".parse::<RendererKind>().unwrap(), RendererKind::Json);
        assert!("svg".parse::<RendererKind>().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [layout]
            seed = 7

            [extractor]
            roles = ["nsubj", "obj"]
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.seed, 7);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(
            config.extractor.roles,
            vec![DependencyRole::NominalSubject, DependencyRole::DirectObject]
        );
        assert_eq!(config.render.title, "Interactive Knowledge Graph");
    }

    #[test]
    fn test_toml_rejects_other_role() {
        let err = AppConfig::from_toml_str("[extractor]\nroles = [\"other\"]").unwrap_err();
        assert!(err.contains("other"));
    }

    #[test]
    fn test_toml_rejects_zero_iterations() {
        assert!(AppConfig::from_toml_str("[layout]\niterations = 0").is_err());
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_env_default_value_overrides_file() {
        let file = AppConfig::from_toml_str(
            "[layout]\nseed = 7\niterations = 10\n[render]\nrenderer = \"json\"\n[logging]\nlevel = \"debug\"",
        )
        .unwrap();
        let env = EnvOverrides::from_lookup(vars(&[
            ("TEXTGRAPH_LAYOUT_SEED", "42"),
            ("TEXTGRAPH_LAYOUT_ITERATIONS", "50"),
            ("TEXTGRAPH_RENDERER", "html"),
            ("LOG_LEVEL", "warn"),
        ]))
        .unwrap();

        let config = env.apply(file).unwrap();
        assert_eq!(config.layout.seed, 42);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.render.renderer, RendererKind::Html);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unset_env_keeps_file_values() {
        let file = AppConfig::from_toml_str("[layout]\nseed = 7").unwrap();
        let env = EnvOverrides::from_lookup(vars(&[])).unwrap();
        assert_eq!(env, EnvOverrides::default());

        let config = env.apply(file).unwrap();
        assert_eq!(config.layout.seed, 7);
        assert!(config.parser.format.is_none());
    }

    #[test]
    fn test_env_rejects_zero_iterations() {
        let env =
            EnvOverrides::from_lookup(vars(&[("TEXTGRAPH_LAYOUT_ITERATIONS", "0")])).unwrap();
        let err = env.apply(AppConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_env_rejects_unparsable_values() {
        let err = EnvOverrides::from_lookup(vars(&[("TEXTGRAPH_LAYOUT_SEED", "forty-two")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "TEXTGRAPH_LAYOUT_SEED"));

        let err = EnvOverrides::from_lookup(vars(&[("TEXTGRAPH_RENDERER", "svg")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/textgraph.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }
}
