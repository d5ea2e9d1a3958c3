// Typed runtime configuration read from the environment.
//
// Parsing goes through a lookup function so tests can feed a map instead of
// mutating the process environment. Empty values count as unset.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::modules::hotspot::adapters::outbound::http_embeddings::HttpEmbeddingsConfig;
use crate::modules::hotspot::use_cases::query_questions::handler::DEFAULT_MIN_SIMILARITY;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8060;
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://127.0.0.1:8100/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-m3";
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err("expected `redis` or `memory`".into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Http,
    Hashing,
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "hashing" => Ok(Self::Hashing),
            _ => Err("expected `http` or `hashing`".into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub dir: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub redis_url: String,
    pub embeddings: EmbeddingBackend,
    pub embedding: HttpEmbeddingsConfig,
    pub min_similarity: f32,
    pub log: LogSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let min_similarity = parse(&get, "HOTSPOT_MIN_SIMILARITY", DEFAULT_MIN_SIMILARITY)?;
        if !(-1.0..=1.0).contains(&min_similarity) {
            return Err(ConfigError::Invalid {
                key: "HOTSPOT_MIN_SIMILARITY",
                value: min_similarity.to_string(),
                reason: "must be between -1 and 1".into(),
            });
        }

        let dimension = parse(&get, "EMBEDDING_DIM", DEFAULT_EMBEDDING_DIM)?;
        if dimension == 0 {
            return Err(ConfigError::Invalid {
                key: "EMBEDDING_DIM",
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            host: get("HOTSPOT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse(&get, "HOTSPOT_PORT", DEFAULT_PORT)?,
            store: parse(&get, "HOTSPOT_STORE", StoreBackend::Redis)?,
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            embeddings: parse(&get, "HOTSPOT_EMBEDDINGS", EmbeddingBackend::Http)?,
            embedding: HttpEmbeddingsConfig {
                base_url: get("EMBEDDING_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_BASE_URL.to_string()),
                model: get("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                api_key: get("EMBEDDING_API_KEY"),
                dimension,
                timeout: Duration::from_secs(parse(
                    &get,
                    "EMBEDDING_TIMEOUT_SECS",
                    DEFAULT_EMBEDDING_TIMEOUT_SECS,
                )?),
            },
            min_similarity,
            log: LogSettings {
                dir: get("HOTSPOT_LOG_DIR").map(PathBuf::from),
                json: parse(&get, "HOTSPOT_LOG_JSON", false)?,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
