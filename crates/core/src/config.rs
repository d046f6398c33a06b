//! Configuration management for DocQA.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (.docqa/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric: uploaded files and the document
//! database live in `<workspace>/.docqa/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Providers that `validate` accepts.
pub const KNOWN_PROVIDERS: [&str; 2] = ["mock", "openai"];

/// Default chat-completions base URL for the network-backed provider.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model identifier for the network-backed provider.
pub const DEFAULT_MODEL: &str = "gpt-5.1";

/// Environment variable consulted for the credential when none is set explicitly.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .docqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Active LLM provider ("mock" or "openai")
    pub provider: String,

    /// Model identifier for the network-backed provider
    pub model: String,

    /// Chat-completions base URL
    pub endpoint: String,

    /// Explicit API key (DOCQA_API_KEY)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Answer cache settings
    pub cache: CacheSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Emit logs as JSON
    pub log_json: bool,
}

/// Size and time bounds of the answer cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached answers
    #[serde(rename = "maxEntries")]
    pub max_entries: u64,

    /// Time-to-live of an entry, counted from its write
    #[serde(rename = "ttlSecs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    cache: Option<CacheSection>,
    workspace: Option<WorkspaceSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheSection {
    #[serde(rename = "maxEntries")]
    max_entries: Option<u64>,
    #[serde(rename = "ttlSecs")]
    ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "mock".to_string(), // Works offline without credentials
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            cache: CacheSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `DOCQA_WORKSPACE`: Override workspace path
    /// - `DOCQA_CONFIG`: Path to config file
    /// - `DOCQA_PROVIDER`: LLM provider ("mock" or "openai")
    /// - `DOCQA_MODEL`: Model identifier
    /// - `DOCQA_ENDPOINT`: Chat-completions base URL
    /// - `DOCQA_API_KEY`: API key
    /// - `DOCQA_CACHE_MAX_ENTRIES`, `DOCQA_CACHE_TTL_SECS`: Answer cache bounds
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// Either argument takes precedence over `DOCQA_WORKSPACE` and
    /// `DOCQA_CONFIG`. Without a config file, `<workspace>/.docqa/config.yaml`
    /// is read when present.
    pub fn load_from(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        } else if let Ok(workspace) = std::env::var("DOCQA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Some(config_file) = config_file {
            config.config_file = Some(config_file);
        } else if let Ok(config_file) = std::env::var("DOCQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.data_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("DOCQA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("DOCQA_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Some(max_entries) = parse_env_u64("DOCQA_CACHE_MAX_ENTRIES")? {
            config.cache.max_entries = max_entries;
        }

        if let Some(ttl_secs) = parse_env_u64("DOCQA_CACHE_TTL_SECS")? {
            config.cache.ttl_secs = ttl_secs;
        }

        config.api_key = std::env::var("DOCQA_API_KEY").ok();

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(contents)?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(json) = logging.json {
                result.log_json = json;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = api_key_env;
            }
        }

        if let Some(cache) = config_file.cache {
            if let Some(max_entries) = cache.max_entries {
                result.cache.max_entries = max_entries;
            }
            if let Some(ttl_secs) = cache.ttl_secs {
                result.cache.ttl_secs = ttl_secs;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and the
    /// config file. `workspace` and `config_file` only relocate paths here;
    /// pass them to [`AppConfig::load_from`] to have their YAML read.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .docqa directory.
    pub fn data_dir(&self) -> PathBuf {
        self.workspace.join(".docqa")
    }

    /// Directory that holds uploaded files.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir().join("uploads")
    }

    /// SQLite database holding document records.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("documents.sqlite")
    }

    /// Ensure the .docqa directory exists.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        let data_dir = self.data_dir();
        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .docqa directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Resolve the API key for the network-backed provider.
    ///
    /// `DOCQA_API_KEY` wins, then the variable named by `api_key_env`.
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        let explicit = self.api_key.clone();
        let from_env = || std::env::var(&self.api_key_env).ok();

        explicit
            .or_else(from_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Validate configuration for the active provider.
    ///
    /// A missing API key is not an error: the network-backed provider
    /// degrades to fixed fallback answers instead.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();

        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.cache.max_entries == 0 {
            return Err(AppError::Config(
                "Cache size bound must be greater than zero".to_string(),
            ));
        }

        if provider == "openai" && self.resolve_api_key().is_none() {
            tracing::warn!(
                "Provider 'openai' selected but no API key found in DOCQA_API_KEY or {}",
                self.api_key_env
            );
        }

        Ok(())
    }
}

fn parse_env_u64(name: &str) -> AppResult<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.cache.max_entries, 1000);
        assert_eq!(config.cache.ttl(), Duration::from_secs(86_400));
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_derived_paths() {
        let config = AppConfig::default();
        assert!(config.data_dir().ends_with(".docqa"));
        assert!(config.uploads_dir().ends_with(".docqa/uploads"));
        assert!(config.database_path().ends_with("documents.sqlite"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some("openai".to_string()),
            Some("gpt-4o".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "openai");
        assert_eq!(overridden.model, "gpt-4o");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml_sections() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4o-mini
  endpoint: http://localhost:9999/v1
  apiKeyEnv: MY_KEY
cache:
  maxEntries: 25
  ttlSecs: 60
logging:
  level: debug
  color: false
  json: true
"#;
        let merged = AppConfig::default().merge_yaml_str(yaml).unwrap();
        assert_eq!(merged.provider, "openai");
        assert_eq!(merged.model, "gpt-4o-mini");
        assert_eq!(merged.endpoint, "http://localhost:9999/v1");
        assert_eq!(merged.api_key_env, "MY_KEY");
        assert_eq!(merged.cache, CacheSettings { max_entries: 25, ttl_secs: 60 });
        assert_eq!(merged.log_level.as_deref(), Some("debug"));
        assert!(merged.no_color);
        assert!(merged.log_json);
    }

    #[test]
    fn test_merge_yaml_partial_keeps_defaults() {
        let merged = AppConfig::default()
            .merge_yaml_str("cache:\n  ttlSecs: 5\n")
            .unwrap();
        assert_eq!(merged.provider, "mock");
        assert_eq!(merged.cache.max_entries, 1000);
        assert_eq!(merged.cache.ttl_secs, 5);
    }

    #[test]
    fn test_merge_yaml_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "llm:\n  provider: openai\n").unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.provider, "openai");
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "cache: [not, a, map]\n").unwrap();

        let err = AppConfig::default().merge_yaml(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_from_config_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        std::fs::write(&path, "llm:\n  model: gpt-4o-mini\ncache:\n  ttlSecs: 90\n").unwrap();

        let config =
            AppConfig::load_from(Some(temp.path().to_path_buf()), Some(path.clone())).unwrap();
        assert_eq!(config.config_file, Some(path));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.cache.ttl_secs, 90);
    }

    #[test]
    fn test_load_from_workspace_reads_its_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let data_dir = temp.path().join(".docqa");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("config.yaml"), "cache:\n  maxEntries: 5\n").unwrap();

        let config = AppConfig::load_from(Some(temp.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp.path());
        assert_eq!(config.cache.max_entries, 5);
    }

    #[test]
    fn test_load_from_missing_workspace() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = AppConfig::load_from(Some(missing), None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_explicit_api_key_wins_and_blank_is_absent() {
        let mut config = AppConfig::default();
        config.api_key_env = "DOCQA_TEST_UNSET_KEY_VAR".to_string();

        config.api_key = Some("  sk-test  ".to_string());
        assert_eq!(config.resolve_api_key(), Some("sk-test".to_string()));

        config.api_key = Some("   ".to_string());
        assert_eq!(config.resolve_api_key(), None);

        config.api_key = None;
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_openai_without_key_is_ok() {
        let mut config = AppConfig::default();
        config.provider = "openai".to_string();
        config.api_key_env = "DOCQA_TEST_UNSET_KEY_VAR".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_cache_bound() {
        let mut config = AppConfig::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());
    }
}
