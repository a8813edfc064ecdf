//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::scoring::OnnxOptions;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// ONNX score model; the service runs heuristic-only when it is absent
    pub model_path: PathBuf,

    /// Feature schema sidecar, defaults to `<model>.features.json`
    pub model_schema: Option<PathBuf>,

    /// Model input tensor name
    pub model_input: String,

    /// Probability output name
    pub model_proba_output: String,

    /// Raw decision output name
    pub model_raw_output: String,

    /// Known-bad domain dataset
    pub phishing_csv: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let onnx = OnnxOptions::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            model_path: onnx.model_path,
            model_schema: onnx.schema_path,
            model_input: onnx.input_name,
            model_proba_output: onnx.probability_output,
            model_raw_output: onnx.raw_output,
            phishing_csv: PathBuf::from("phishing_site_urls.csv"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: var("AEGIS_HOST").unwrap_or(defaults.host),

            port: var("AEGIS_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: var("AEGIS_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            model_schema: var("AEGIS_MODEL_SCHEMA")
                .map(PathBuf::from)
                .or(defaults.model_schema),

            model_input: var("AEGIS_MODEL_INPUT").unwrap_or(defaults.model_input),

            model_proba_output: var("AEGIS_MODEL_PROBA_OUTPUT")
                .unwrap_or(defaults.model_proba_output),

            model_raw_output: var("AEGIS_MODEL_RAW_OUTPUT").unwrap_or(defaults.model_raw_output),

            phishing_csv: var("AEGIS_PHISHING_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.phishing_csv),
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Model loading options derived from this configuration
    pub fn onnx_options(&self) -> OnnxOptions {
        OnnxOptions {
            model_path: self.model_path.clone(),
            schema_path: self.model_schema.clone(),
            input_name: self.model_input.clone(),
            probability_output: self.model_proba_output.clone(),
            raw_output: self.model_raw_output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.model_path, PathBuf::from("model.onnx"));
        assert_eq!(config.phishing_csv, PathBuf::from("phishing_site_urls.csv"));
        assert_eq!(
            config.onnx_options().schema_path(),
            PathBuf::from("model.features.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AEGIS_HOST", "0.0.0.0"),
            ("AEGIS_PORT", "8080"),
            ("AEGIS_MODEL_PATH", "/models/url.onnx"),
            ("AEGIS_MODEL_INPUT", "input"),
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        let options = config.onnx_options();
        assert_eq!(options.input_name, "input");
        assert_eq!(options.schema_path(), PathBuf::from("/models/url.features.json"));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = config_from(&[("AEGIS_PORT", "not-a-port")]);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = config_from(&[("AEGIS_HOST", "  ")]);
        assert_eq!(config.host, "127.0.0.1");
    }
}
