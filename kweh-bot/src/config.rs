use crate::error::{ConfigErrorKind, InfraError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_base_url: String,       // e.g. "https://xivapi.com/" (trailing slash expected)
    pub catalog_token: String,
    pub catalog_logo: String,
    pub teamcraft_base_url: String,     // e.g. "https://ffxivteamcraft.com/"
    pub item_search_limit: u32,
    pub cache_expiry_secs: u64,
    pub user_prompts_timeout_ms: u64,
    pub embed_color: u32,
    pub http_timeout_secs: u64,
    pub database_url: Option<String>,   // unset = in-memory cache
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://xivapi.com/".to_string(),
            catalog_token: String::new(),
            catalog_logo: "https://xivapi.com/favicon.png".to_string(),
            teamcraft_base_url: "https://ffxivteamcraft.com/".to_string(),
            item_search_limit: 10,
            cache_expiry_secs: 86_400,
            user_prompts_timeout_ms: 30_000,
            embed_color: 0xFFD700,
            http_timeout_secs: 10,
            database_url: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| InfraError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;
        let cfg: Self = toml::from_str(&data).map_err(|e| InfraError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Parse(e),
        })?;
        Ok(cfg.normalized())
    }

    pub fn from_env() -> Result<Self, InfraError> {
        let _ = dotenvy::from_filename(".env");
        let d = Self::default();
        let cfg = Self {
            catalog_base_url: std::env::var("XIVAPI_BASE_URL").unwrap_or(d.catalog_base_url),
            catalog_token: std::env::var("XIVAPI_TOKEN").unwrap_or(d.catalog_token),
            catalog_logo: std::env::var("XIVAPI_LOGO").unwrap_or(d.catalog_logo),
            teamcraft_base_url: std::env::var("TEAMCRAFT_BASE_URL").unwrap_or(d.teamcraft_base_url),
            item_search_limit: env_parse("ITEM_SEARCH_LIMIT", d.item_search_limit)?,
            cache_expiry_secs: env_parse("CACHE_EXPIRY", d.cache_expiry_secs)?,
            user_prompts_timeout_ms: env_parse("USER_PROMPTS_TIMEOUT", d.user_prompts_timeout_ms)?,
            embed_color: env_parse("EMBED_COLOR", d.embed_color)?,
            http_timeout_secs: env_parse("HTTP_TIMEOUT", d.http_timeout_secs)?,
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
        };

        Ok(cfg.normalized())
    }

    /// Base urls are joined by plain concatenation, so both must end in a slash.
    fn normalized(mut self) -> Self {
        for base in [&mut self.catalog_base_url, &mut self.teamcraft_base_url] {
            if !base.ends_with('/') {
                base.push('/');
            }
        }
        self
    }

    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.cache_expiry_secs)
    }

    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_millis(self.user_prompts_timeout_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Canonical browse page of an item, used for every outbound link.
    pub fn item_link(&self, id: impl std::fmt::Display) -> String {
        format!("{}en/item/{}", self.teamcraft_base_url, id)
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T, InfraError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| InfraError::Config {
            path: ".env".into(),
            source: ConfigErrorKind::InvalidEnv(name.to_string(), raw),
        }),
        Err(_) => Ok(default),
    }
}
