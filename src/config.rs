//! Application configuration.
//!
//! Values come from `config.toml`, then the environment (`.env` is loaded
//! first), then the defaults below.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Study Defaults ====================

/// Words per practice session
pub const SESSION_SIZE: usize = 10;

/// Wrong answers attached to every session word
pub const DISTRACTOR_COUNT: usize = 4;

/// Never-seen words mixed into a session when the review pool is large enough
pub const UNSEEN_CAP: usize = 5;

/// Minimum age in days before a box B word is due again (box C waits twice this)
pub const WEEK_THRESHOLD_DAYS: i64 = 7;

/// Minimum age in days before a box D word is due again
pub const MONTH_THRESHOLD_DAYS: i64 = 30;

/// Marks question-format items; they only get question-format distractors
pub const STYLE_MARKER: &str = "?";

/// Default number of words in dashboard rankings
pub const REPORT_LIMIT: usize = 10;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port (overridable via PORT)
pub const SERVER_PORT: u16 = 8000;

/// Default SQLite database location
pub const DEFAULT_DB_PATH: &str = "data/leitner.db";

/// Tunables for session selection and distractors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub session_size: usize,
    pub distractor_count: usize,
    pub unseen_cap: usize,
    pub week_threshold_days: i64,
    pub month_threshold_days: i64,
    pub style_marker: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            session_size: SESSION_SIZE,
            distractor_count: DISTRACTOR_COUNT,
            unseen_cap: UNSEEN_CAP,
            week_threshold_days: WEEK_THRESHOLD_DAYS,
            month_threshold_days: MONTH_THRESHOLD_DAYS,
            style_marker: STYLE_MARKER.to_string(),
        }
    }
}

impl StudyConfig {
    /// Replace values that would make sessions impossible with the defaults
    pub fn validated(mut self) -> Self {
        if self.session_size == 0 {
            tracing::warn!("session_size must be at least 1, using {}", SESSION_SIZE);
            self.session_size = SESSION_SIZE;
        }
        if self.distractor_count == 0 {
            tracing::warn!("distractor_count must be at least 1, using {}", DISTRACTOR_COUNT);
            self.distractor_count = DISTRACTOR_COUNT;
        }
        if self.week_threshold_days < 0 {
            tracing::warn!("week_threshold_days cannot be negative, using {}", WEEK_THRESHOLD_DAYS);
            self.week_threshold_days = WEEK_THRESHOLD_DAYS;
        }
        if self.month_threshold_days < 0 {
            tracing::warn!(
                "month_threshold_days cannot be negative, using {}",
                MONTH_THRESHOLD_DAYS
            );
            self.month_threshold_days = MONTH_THRESHOLD_DAYS;
        }
        self
    }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub study: Option<StudyConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
    /// JSON file used to fill an empty catalog
    pub seed_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
}

/// Fully resolved settings used by main
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub study: StudyConfig,
    pub port: u16,
}

impl Settings {
    /// Full address to bind the HTTP server to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.port)
    }
}

/// Parse config.toml contents
pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load settings with priority: config.toml > environment > defaults
pub fn load() -> Settings {
    let _ = dotenvy::dotenv();

    let file_config = match std::fs::read_to_string("config.toml") {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    resolve(
        file_config,
        std::env::var("DATABASE_PATH").ok(),
        std::env::var("PORT").ok(),
    )
}

/// Merge file values with environment overrides
pub fn resolve(file_config: AppConfig, env_db_path: Option<String>, env_port: Option<String>) -> Settings {
    let database = file_config.database.unwrap_or_default();

    let database_path = match (database.path, env_db_path) {
        (Some(path), _) => {
            tracing::info!("Using database from config.toml: {}", path);
            PathBuf::from(path)
        }
        (None, Some(path)) => {
            tracing::info!("Using database from DATABASE_PATH env: {}", path);
            PathBuf::from(path)
        }
        (None, None) => PathBuf::from(DEFAULT_DB_PATH),
    };

    let port = file_config
        .server
        .and_then(|s| s.port)
        .or_else(|| env_port.and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    Settings {
        database_path,
        seed_path: database.seed_path.map(PathBuf::from),
        study: file_config.study.unwrap_or_default().validated(),
        port,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_defaults() {
        let study = StudyConfig::default();
        assert_eq!(study.session_size, 10);
        assert_eq!(study.distractor_count, 4);
        assert_eq!(study.unseen_cap, 5);
        assert_eq!(study.week_threshold_days, 7);
        assert_eq!(study.month_threshold_days, 30);
        assert_eq!(study.style_marker, "?");
    }

    #[test]
    fn test_parse_partial_study_table() {
        let config = parse_config(
            r#"
            [study]
            session_size = 6
            style_marker = "¿"
            "#,
        )
        .unwrap();
        let study = config.study.unwrap();
        assert_eq!(study.session_size, 6);
        assert_eq!(study.style_marker, "¿");
        // Unspecified keys keep their defaults
        assert_eq!(study.distractor_count, DISTRACTOR_COUNT);
    }

    #[test]
    fn test_validated_replaces_zero_sizes() {
        let study = StudyConfig {
            session_size: 0,
            distractor_count: 0,
            ..StudyConfig::default()
        }
        .validated();
        assert_eq!(study.session_size, SESSION_SIZE);
        assert_eq!(study.distractor_count, DISTRACTOR_COUNT);
    }

    #[test]
    fn test_resolve_priority() {
        let config = parse_config(
            r#"
            [database]
            path = "from_file.db"
            "#,
        )
        .unwrap();
        let settings = resolve(config, Some("from_env.db".into()), Some("9000".into()));
        assert_eq!(settings.database_path, PathBuf::from("from_file.db"));
        assert_eq!(settings.port, 9000);

        let settings = resolve(AppConfig::default(), Some("from_env.db".into()), None);
        assert_eq!(settings.database_path, PathBuf::from("from_env.db"));
        assert_eq!(settings.port, SERVER_PORT);
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve(AppConfig::default(), None, Some("not-a-port".into()));
        assert_eq!(settings.database_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(settings.port, SERVER_PORT);
        assert!(settings.seed_path.is_none());
        assert_eq!(settings.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_example_config_parses() {
        let config = parse_config(include_str!("../config.example.toml")).unwrap();
        let settings = resolve(config, None, None);
        assert_eq!(settings.database_path, PathBuf::from("data/leitner.db"));
        assert_eq!(settings.study, StudyConfig::default());
    }
}
