//! Configuration management

use std::path::Path;

use clap::ValueEnum;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::transform::{MethodTransformer, TransformerConfig};
use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transformer applied to every method
    pub transformer: TransformerConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Serialization format
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` in this format.
    pub fn render<T: Serialize>(self, value: &T, pretty: bool) -> Result<String> {
        Ok(match self {
            Self::Json if pretty => serde_json::to_string_pretty(value)?,
            Self::Json => serde_json::to_string(value)?,
            Self::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (METHOD_TRANSFORM_ prefix)
        figment = figment.merge(Env::prefixed("METHOD_TRANSFORM_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        tracing::debug!(
            format = ?config.output.format,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Build the configured transformer.
    pub fn compile_transformer(&self) -> Result<MethodTransformer> {
        MethodTransformer::compile(&self.transformer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierName;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.transformer, TransformerConfig::Noop);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Some(Path::new("/nonexistent/transform.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_transformer_chain_from_file() {
        let file = write_config(
            r"
transformer:
  chain:
    - override: [protected, final]
    - override: [static]
output:
  format: yaml
",
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(
            config.transformer,
            TransformerConfig::Chain(vec![
                TransformerConfig::Override(vec![ModifierName::Protected, ModifierName::Final]),
                TransformerConfig::Override(vec![ModifierName::Static]),
            ])
        );
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.compile_transformer().is_ok());
    }

    #[test]
    fn test_load_rejects_unknown_modifier() {
        let file = write_config("transformer:\n  override: [volatile]\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("volatile"), "{err}");
    }

    #[test]
    fn test_render_json_compact_and_pretty() {
        let value = vec!["a", "b"];
        let compact = OutputFormat::Json.render(&value, false).unwrap();
        assert_eq!(compact, r#"["a","b"]"#);
        let pretty = OutputFormat::Json.render(&value, true).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_render_yaml() {
        let value = vec!["a"];
        assert_eq!(OutputFormat::Yaml.render(&value, true).unwrap(), "- a\n");
    }
}
