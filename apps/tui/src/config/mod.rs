use crate::api::TimestampFallback;
use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USER_NAME: &str = "Jon Anderson";
pub const DEFAULT_USER_SKILLS: &str = "Medical, Rescue";
pub const DEFAULT_POLL_SECS: u64 = 10;

/// Runtime configuration assembled from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub user_name: String,
    pub user_skills: String,
    pub user_xp: u32,
    pub timestamp_fallback: TimestampFallback,
    pub poll_interval: Duration,
    pub database_url: String,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            user_skills: DEFAULT_USER_SKILLS.to_string(),
            user_xp: 2450,
            timestamp_fallback: TimestampFallback::Random,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            database_url: "sqlite://civic_flow.db".to_string(),
            export_dir: PathBuf::from("./notices"),
            log_file: PathBuf::from("civic_flow.log"),
            debug: false,
        }
    }
}

/// Loads `.env` and reads every `CIVIC_*` setting, falling back to defaults.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();

    let defaults = AppConfig::default();

    let api_url = env::var("CIVIC_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or(defaults.api_url);

    let user_xp = match env::var("CIVIC_USER_XP") {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| eyre!("Invalid CIVIC_USER_XP '{value}': {e}"))?,
        Err(_) => defaults.user_xp,
    };

    let poll_interval = match env::var("CIVIC_POLL_SECS") {
        Ok(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|e| eyre!("Invalid CIVIC_POLL_SECS '{value}': {e}"))?;
            Duration::from_secs(secs.max(1))
        }
        Err(_) => defaults.poll_interval,
    };

    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "civic_flow.db".to_string());

    Ok(AppConfig {
        api_url,
        user_name: env::var("CIVIC_USER_NAME").unwrap_or(defaults.user_name),
        user_skills: env::var("CIVIC_USER_SKILLS").unwrap_or(defaults.user_skills),
        user_xp,
        timestamp_fallback: timestamp_fallback_from_env()?,
        poll_interval,
        database_url: database_url(&db_name)?,
        export_dir: env::var("CIVIC_EXPORT_DIR").map_or(defaults.export_dir, PathBuf::from),
        log_file: env::var("CIVIC_LOG_FILE").map_or(defaults.log_file, PathBuf::from),
        debug: env::var("DEBUG").is_ok_and(|value| is_truthy(&value)),
    })
}

fn timestamp_fallback_from_env() -> color_eyre::eyre::Result<TimestampFallback> {
    if env::var("CIVIC_SYNTH_TIMESTAMPS").is_ok_and(|value| !is_truthy(&value)) {
        return Ok(TimestampFallback::Missing);
    }

    match env::var("CIVIC_TIMESTAMP_SEED") {
        Ok(seed) => {
            let seed = seed
                .trim()
                .parse()
                .map_err(|e| eyre!("Invalid CIVIC_TIMESTAMP_SEED '{seed}': {e}"))?;
            Ok(TimestampFallback::Seeded(seed))
        }
        Err(_) => Ok(TimestampFallback::Random),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Builds the SQLite URL for the preference store relative to the current
/// directory.
pub fn database_url(db_name: &str) -> color_eyre::eyre::Result<String> {
    if db_name == ":memory:" {
        return Ok("sqlite::memory:".to_string());
    }

    let database_path = env::current_dir()?.join(db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // SQLx wants three slashes for absolute paths and two for relative ones.
    let clean_path = path_str.trim_start_matches('/');
    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
    }

    #[test]
    fn memory_database_url() -> color_eyre::eyre::Result<()> {
        assert_eq!(database_url(":memory:")?, "sqlite::memory:");
        Ok(())
    }

    #[test]
    fn absolute_database_url_has_three_slashes() -> color_eyre::eyre::Result<()> {
        let url = database_url("civic_flow_test.db")?;
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("civic_flow_test.db"));
        Ok(())
    }
}
