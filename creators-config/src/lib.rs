//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources, lowest precedence first:
//!
//! 1. serde defaults on every field
//! 2. YAML files / inline snippets, in the order they were attached
//! 3. `CREATORS_`-prefixed environment variables (`__` separates levels, e.g.
//!    `CREATORS_BATCH__CONCURRENCY=4`)
//!
//! String values may reference `${VAR}`; expansion is recursive with a depth
//! cap. When no usable `api.api_key` is configured, the loader falls back to
//! `SCRAPE_CREATORS_API_KEY`.
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "SCRAPE_CREATORS_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.scrapecreators.com";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatorsConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Every call runs to completion; failures become gaps.
    #[default]
    BestEffort,
    /// The first failure aborts the batch.
    FailFast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    #[serde(default)]
    pub policy: BatchPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            call_timeout_secs: default_call_timeout_secs(),
            policy: BatchPolicy::default(),
        }
    }
}

impl BatchConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs.max(1))
    }
}

/// Which fixed batch the driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverJob {
    Profiles,
    #[default]
    UserTweets,
    Tweets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub job: DriverJob,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            job: DriverJob::default(),
            output_path: default_output_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_concurrency() -> usize {
    8
}
fn default_call_timeout_secs() -> u64 {
    60
}
fn default_output_path() -> String {
    "test.json".into()
}

/// Keys are opaque text, but YAML and typed env parsing may hand back a number or bool.
fn scalar_as_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Blank keys and placeholders that never resolved are treated as absent.
fn usable_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && !k.contains("${"))
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct CreatorsConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: &'static str,
}

impl Default for CreatorsConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatorsConfigLoader {
    /// Start with defaults plus `CREATORS_` env overrides.
    ///
    /// ```
    /// use creators_config::{BatchPolicy, CreatorsConfigLoader};
    ///
    /// let cfg = CreatorsConfigLoader::new()
    ///     .with_yaml_str("batch:\n  concurrency: 2\n  policy: fail_fast")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.batch.concurrency, 2);
    /// assert_eq!(cfg.batch.policy, BatchPolicy::FailFast);
    /// assert_eq!(cfg.api.base_url, "https://api.scrapecreators.com");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "CREATORS",
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, for env-only deployments.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use creators_config::CreatorsConfigLoader;
    ///
    /// unsafe { std::env::set_var("DOC_SC_KEY", "injected-from-env"); }
    ///
    /// let cfg = CreatorsConfigLoader::new()
    ///     .with_yaml_str("api:\n  api_key: \"${DOC_SC_KEY}\"")
    ///     .load()
    ///     .expect("valid configuration");
    /// assert_eq!(cfg.api.api_key.as_deref(), Some("injected-from-env"));
    ///
    /// unsafe { std::env::remove_var("DOC_SC_KEY"); }
    /// ```
    pub fn load(self) -> Result<CreatorsConfig, ConfigError> {
        let key_var = format!("{}_API__API_KEY", self.env_prefix);
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let mut typed: CreatorsConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        // Typed env parsing can reshape a digit-only key (e.g. into a lossy float); keep its exact text.
        if let Ok(raw) = std::env::var(&key_var) {
            let mut raw = Value::String(raw);
            expand_env_in_value(&mut raw);
            typed.api.api_key = raw.as_str().map(str::to_string);
        }

        typed.api.api_key = usable_key(typed.api.api_key.take())
            .or_else(|| usable_key(std::env::var(API_KEY_ENV).ok()));

        if typed.api.base_url.trim().is_empty() {
            return Err(ConfigError::Message("api.base_url must not be empty".into()));
        }
        if typed.batch.concurrency == 0 {
            return Err(ConfigError::Message("batch.concurrency must be at least 1".into()));
        }

        Ok(typed)
    }
}
