use crate::error::CliError;
use serde::Deserialize;
use siteplan_workflow::planner::PlannerSettings;
use siteplan_workflow::service::ModelSettings;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const API_KEY_NAMES: [&str; 3] = ["gemini_api_key", "GEMINI_API_KEY", "GOOGLE_API_KEY"];
const API_KEY_ENV: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
const DEFAULT_OUTPUT_DIR: &str = "website_requirements_output";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_keys: HashMap<String, toml::Value>,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub retry_attempts: usize,
    /// Override for the Gemini endpoint, mostly for testing
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let model = ModelSettings::default();
        Self {
            name: model.model,
            temperature: model.temperature,
            max_tokens: model.max_tokens,
            retry_attempts: PlannerSettings::default().retry_attempts,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub min_questions: usize,
    pub output_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_questions: PlannerSettings::default().min_questions,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.model.name.clone(),
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
        }
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            min_questions: self.session.min_questions,
            retry_attempts: self.model.retry_attempts.max(1),
            ..Default::default()
        }
    }
}

/// `~/.config/siteplan/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("siteplan").join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("Cannot read config {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// An explicit path must exist; the default path is optional.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, CliError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading config");
            load_config(&path)
        }
        _ => Ok(Config::default()),
    }
}

/// API key from the config file, falling back to the environment
/// (populated from `.env` at startup).
pub fn get_api_key(config: &Config) -> Result<String, CliError> {
    api_key_from(config, |name| std::env::var(name).ok())
}

fn api_key_from(
    config: &Config,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, CliError> {
    let usable = |key: &str| !key.trim().is_empty();
    API_KEY_NAMES
        .iter()
        .filter_map(|name| config.api_keys.get(*name).and_then(|v| v.as_str()))
        .find(|key| usable(*key))
        .map(|s| s.trim().to_string())
        .or_else(|| {
            API_KEY_ENV
                .iter()
                .filter_map(|name| env(*name))
                .find(|key| usable(key.as_str()))
                .map(|key| key.trim().to_string())
        })
        .ok_or_else(|| {
            CliError::Config(
                "Google API key not found. Set GOOGLE_API_KEY in your environment or .env file, \
                 or 'gemini_api_key' under [api_keys] in the config file"
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_planner() {
        let config = Config::default();
        assert_eq!(config.session.min_questions, 15);
        assert_eq!(config.model.retry_attempts, 3);
        assert_eq!(config.model.max_tokens, 2000);
        assert_eq!(
            config.session.output_dir,
            PathBuf::from("website_requirements_output")
        );
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api_keys]
gemini_api_key = "from-file"

[model]
name = "gemini-3-pro-preview"
retry_attempts = 5

[session]
min_questions = 8
output_dir = "briefs"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(get_api_key(&config).unwrap(), "from-file");
        assert_eq!(config.model_settings().model, "gemini-3-pro-preview");
        assert_eq!(config.model.temperature, 0.7);

        let planner = config.planner_settings();
        assert_eq!(planner.min_questions, 8);
        assert_eq!(planner.retry_attempts, 5);
        assert_eq!(config.session.output_dir, PathBuf::from("briefs"));
    }

    #[test]
    fn test_uppercase_key_name() {
        let config: Config = toml::from_str("[api_keys]\nGOOGLE_API_KEY = \"upper\"\n").unwrap();
        assert_eq!(get_api_key(&config).unwrap(), "upper");
    }

    #[test]
    fn test_blank_config_key_falls_back_to_environment() {
        let config: Config = toml::from_str("[api_keys]\ngemini_api_key = \"  \"\n").unwrap();
        let key = api_key_from(&config, |name| {
            (name == "GOOGLE_API_KEY").then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_no_usable_key_is_config_error() {
        let config: Config = toml::from_str("[api_keys]\nGEMINI_API_KEY = \"\"\n").unwrap();
        let err = api_key_from(&config, |_| Some(" ".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session\nmin_questions = ").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = resolve_config(Some(Path::new("/nonexistent/siteplan.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
