use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default)]
    pub google_client_id: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_minutes: default_token_minutes(),
            google_client_id: None,
        }
    }
}

impl AuthConfig {
    pub fn jwt_secret(&self) -> Option<&str> {
        non_blank(&self.jwt_secret)
    }

    pub fn google_client_id(&self) -> Option<&str> {
        non_blank(&self.google_client_id)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub seed_csv: Option<String>,
}

impl DataConfig {
    pub fn seed_csv(&self) -> Option<&str> {
        non_blank(&self.seed_csv)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_token_minutes() -> i64 {
    30
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "data/fmcg.db"

[server]
port = 3000

[auth]
access_token_minutes = 30
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (build.rs copies it there)
/// 2. The current working directory
/// 3. The embedded default
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for path in candidates {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            return parse_config(&contents);
        }
        tracing::debug!("config.toml not found at: {}", path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.auth.access_token_minutes <= 0 {
        anyhow::bail!("auth.access_token_minutes must be positive");
    }
    Ok(config)
}

/// Get the database file path from configuration.
/// Relative paths resolve against the executable directory.
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

/// Absolute paths are kept, relative ones are joined to the executable directory
pub fn resolve_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "data/fmcg.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.access_token_minutes, 30);
        assert!(config.auth.jwt_secret().is_none());
        assert!(config.data.seed_csv().is_none());
    }

    #[test]
    fn test_optional_sections_and_blank_values() {
        let config = parse_config(
            r#"
            [database]
            path = "/tmp/x.db"

            [auth]
            jwt_secret = "  "
            google_client_id = "abc.apps.googleusercontent.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.auth.jwt_secret().is_none());
        assert_eq!(
            config.auth.google_client_id(),
            Some("abc.apps.googleusercontent.com")
        );
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_rejects_non_positive_lifetime() {
        let err = parse_config("[database]\npath = \"a.db\"\n[auth]\naccess_token_minutes = 0\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_workspace_config_parses() {
        let config = parse_config(include_str!("../../../../config.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.auth.google_client_id().is_none());
    }
}
