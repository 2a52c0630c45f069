use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    /// Заполнить пустую таблицу демонстрационными заявками
    #[serde(default)]
    pub seed_demo: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "db/requests.db".into(),
            seed_demo: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Каталог со сборкой фронтенда (trunk dist)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".into()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    /// Токен бота для проверки подписи initData. Пусто — не проверять.
    #[serde(default)]
    pub bot_token: String,
    /// Отклонять запросы без заголовка Telegram-Init-Data
    #[serde(default)]
    pub require_init_data: bool,
    /// Максимальный возраст auth_date, 0 — без ограничения
    #[serde(default)]
    pub max_age_secs: u64,
}

impl TelegramConfig {
    pub fn bot_token(&self) -> Option<&str> {
        let token = self.bot_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "db/requests.db"
seed_demo = true

[server]
port = 3000
static_dir = "dist"

[telegram]
bot_token = ""
require_init_data = false
max_age_secs = 86400
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(config_path) = exe_dir().map(|dir| dir.join("config.toml")) {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Resolves a configured path relative to the executable directory
pub fn resolve_path(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match exe_dir() {
        Some(dir) => dir.join(p),
        None => PathBuf::from(path),
    }
}

/// Get the database file path from configuration
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "db/requests.db");
        assert!(config.database.seed_demo);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telegram.bot_token(), None);
        assert_eq!(config.telegram.max_age_secs, 86400);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse_config("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert!(!config.telegram.require_init_data);
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn blank_bot_token_means_no_verification() {
        let config = parse_config("[telegram]\nbot_token = \"  \"\n").unwrap();
        assert_eq!(config.telegram.bot_token(), None);
        let config = parse_config("[telegram]\nbot_token = \"123:abc\"\n").unwrap();
        assert_eq!(config.telegram.bot_token(), Some("123:abc"));
    }

    #[test]
    fn workspace_config_parses() {
        let config = parse_config(include_str!("../../../../config.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
