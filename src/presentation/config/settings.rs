use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub catalog: CatalogSettings,
    pub splitting: SplittingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    api_key: Option<String>,
    pub base_url: String,
    pub referer: String,
    pub app_title: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

impl LlmSettings {
    /// The configured key, treating an empty value as unset.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub base_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub base_dir: String,
    pub models_file: String,
    pub race_card_prompt: String,
    pub pools_prompt: String,
    pub site_summary_prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplittingSettings {
    pub timeout_secs: u64,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>.toml` (optional) and
    /// `APP__SECTION__KEY` variables. `OPENROUTER_API_KEY` overrides
    /// `llm.api_key`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("llm.base_url", "https://openrouter.ai/api/v1")?
            .set_default("llm.referer", "http://localhost:5000/")?
            .set_default("llm.app_title", "Horse Racing Analyzer")?
            .set_default("llm.temperature", 0.7_f64)?
            .set_default("llm.max_tokens", 4000_i64)?
            .set_default("llm.request_timeout_secs", 120_i64)?
            .set_default("storage.base_path", ".")?
            .set_default("catalog.base_dir", ".")?
            .set_default("catalog.models_file", "data/models.json")?
            .set_default("catalog.race_card_prompt", "data/prompt_template2.txt")?
            .set_default("catalog.pools_prompt", "data/prompt_template3.txt")?
            .set_default("catalog.site_summary_prompt", "data/prompt_template.txt")?
            .set_default("splitting.timeout_secs", 60_i64)?
            .set_default("splitting.max_upload_mb", 50_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", environment == Environment::Prod)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("llm.api_key", std::env::var("OPENROUTER_API_KEY").ok())?
            .build()?
            .try_deserialize()
    }
}
