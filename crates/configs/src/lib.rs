use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Sizing of the per-user unread private message counter cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_unread_capacity")]
    pub unread_capacity: u64,
    #[serde(default = "default_unread_ttl")]
    pub unread_ttl_secs: u64,
    /// Evict entries nobody has read for this long; disabled when absent.
    #[serde(default)]
    pub unread_idle_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { unread_capacity: default_unread_capacity(), unread_ttl_secs: default_unread_ttl(), unread_idle_secs: None }
    }
}

fn default_unread_capacity() -> u64 { 10_000 }
fn default_unread_ttl() -> u64 { 1800 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: Option<String>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(v) = std::env::var("UNREAD_CACHE_CAPACITY") {
            cfg.cache.unread_capacity = v.parse().map_err(|_| anyhow!("UNREAD_CACHE_CAPACITY must be an integer"))?;
        }
        if let Ok(v) = std::env::var("UNREAD_CACHE_TTL_SECS") {
            cfg.cache.unread_ttl_secs = v.parse().map_err(|_| anyhow!("UNREAD_CACHE_TTL_SECS must be an integer"))?;
        }
        if let Ok(v) = std::env::var("LOG_JSON") {
            cfg.logging.json = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.unread_capacity == 0 {
            return Err(anyhow!("cache.unread_capacity must be >= 1"));
        }
        if self.unread_ttl_secs == 0 {
            return Err(anyhow!("cache.unread_ttl_secs must be >= 1"));
        }
        if self.unread_idle_secs == Some(0) {
            return Err(anyhow!("cache.unread_idle_secs must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.cache.unread_capacity, 10_000);
        assert_eq!(cfg.cache.unread_ttl_secs, 1800);
        assert!(cfg.cache.unread_idle_secs.is_none());
        assert!(!cfg.logging.json);
    }

    #[test]
    fn full_document_parses() {
        let cfg = load_from_str(r#"
            [database]
            url = "sqlite::memory:"
            max_connections = 4
            min_connections = 1

            [cache]
            unread_capacity = 50
            unread_ttl_secs = 60
            unread_idle_secs = 30

            [logging]
            json = true
            level = "debug"
        "#).unwrap();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.cache.unread_capacity, 50);
        assert_eq!(cfg.cache.unread_idle_secs, Some(30));
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
        cfg.database.validate().unwrap();
        cfg.cache.validate().unwrap();
    }

    #[test]
    fn database_validation_rejects_bad_values() {
        let mut db = DatabaseConfig { url: "mysql://x".into(), ..Default::default() };
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/forum".into();
        db.validate().unwrap();
        db.min_connections = 5;
        db.max_connections = 2;
        assert!(db.validate().is_err());
    }

    #[test]
    fn cache_validation_rejects_zero() {
        let mut cache = CacheConfig::default();
        cache.validate().unwrap();
        cache.unread_ttl_secs = 0;
        assert!(cache.validate().is_err());
        cache = CacheConfig { unread_idle_secs: Some(0), ..Default::default() };
        assert!(cache.validate().is_err());
    }
}
