use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_mongo_uri")]
    pub uri: String,
    #[serde(default = "default_database_name")]
    pub name: String,
    #[serde(default = "default_mentor_collection")]
    pub mentor_collection: String,
    pub server_selection_timeout_secs: Option<u64>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: default_mongo_uri(),
            name: default_database_name(),
            mentor_collection: default_mentor_collection(),
            server_selection_timeout_secs: None,
        }
    }
}

fn default_mongo_uri() -> String { "mongodb://localhost:27017/mentormentee".to_string() }
fn default_database_name() -> String { "mentormentee".to_string() }
fn default_mentor_collection() -> String { "mentors".to_string() }

/// Where embeddings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI-compatible embeddings endpoint
    #[default]
    Http,
    /// Local ONNX model, requires the `onnx` feature
    Onnx,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub batch_size: Option<usize>,
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_tokenizer_path")]
    pub tokenizer_path: String,
    pub intra_threads: Option<usize>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            endpoint: default_embedding_endpoint(),
            model: default_embedding_model(),
            api_key: None,
            timeout_secs: None,
            batch_size: None,
            model_path: default_model_path(),
            tokenizer_path: default_tokenizer_path(),
            intra_threads: None,
        }
    }
}

fn default_embedding_endpoint() -> String { "http://localhost:8080/v1/embeddings".to_string() }
fn default_embedding_model() -> String { "sentence-transformers/all-MiniLM-L6-v2".to_string() }
fn default_model_path() -> String { "models/all-MiniLM-L6-v2/model.onnx".to_string() }
fn default_tokenizer_path() -> String { "models/all-MiniLM-L6-v2/tokenizer.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

fn default_allowed_origin() -> String { "http://localhost:3000".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_topic_weight")]
    pub topic: f64,
    #[serde(default = "default_experience_max")]
    pub experience_max: f64,
    #[serde(default = "default_experience_neutral")]
    pub experience_neutral: f64,
    #[serde(default = "default_level_match")]
    pub level_match: f64,
    #[serde(default = "default_level_neutral")]
    pub level_neutral: f64,
    #[serde(default = "default_rating_max")]
    pub rating_max: f64,
    #[serde(default = "default_rating_neutral")]
    pub rating_neutral: f64,
    #[serde(default = "default_session_max")]
    pub session_max: f64,
    #[serde(default = "default_session_saturation")]
    pub session_saturation: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            topic: default_topic_weight(),
            experience_max: default_experience_max(),
            experience_neutral: default_experience_neutral(),
            level_match: default_level_match(),
            level_neutral: default_level_neutral(),
            rating_max: default_rating_max(),
            rating_neutral: default_rating_neutral(),
            session_max: default_session_max(),
            session_saturation: default_session_saturation(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            topic: config.topic,
            experience_max: config.experience_max,
            experience_neutral: config.experience_neutral,
            level_match: config.level_match,
            level_neutral: config.level_neutral,
            rating_max: config.rating_max,
            rating_neutral: config.rating_neutral,
            session_max: config.session_max,
            session_saturation: config.session_saturation,
        }
    }
}

fn default_topic_weight() -> f64 { 40.0 }
fn default_experience_max() -> f64 { 20.0 }
fn default_experience_neutral() -> f64 { 10.0 }
fn default_level_match() -> f64 { 15.0 }
fn default_level_neutral() -> f64 { 5.0 }
fn default_rating_max() -> f64 { 15.0 }
fn default_rating_neutral() -> f64 { 5.0 }
fn default_session_max() -> f64 { 10.0 }
fn default_session_saturation() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH)
    /// 5. MONGO_URI and FRONTEND_URL
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MENTOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MENTOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the plain environment variables shared with the rest of the platform
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(uri) = env::var("MONGO_URI") {
        builder = builder.set_override("database.uri", uri)?;
    }
    if let Ok(origin) = env::var("FRONTEND_URL") {
        builder = builder.set_override("cors.allowed_origin", origin)?;
    }

    builder.build()
}
