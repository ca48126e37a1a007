use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Creates the preference table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating on demand) the preference store at `database_url`
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    log::debug!("Opening preference store at {database_url}");

    let in_memory = database_url.contains(":memory:");

    if !in_memory {
        let db_path = extract_db_path_from_url(database_url)?;
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                log::info!("Creating parent directory: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|e| {
                    color_eyre::eyre::eyre!("Failed to create database directory: {e}")
                })?;
            }
        }

        let db_exists = Sqlite::database_exists(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;

        if !db_exists {
            log::info!("Preference store does not exist, creating it now");
            Sqlite::create_database(database_url)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
        }
    }

    // Every connection to `:memory:` is its own database.
    let max_connections = if in_memory { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    log::debug!("Preference store ready");
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<String> {
    if !url.starts_with("sqlite://") {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    }

    let path_part = url.trim_start_matches("sqlite://");

    if cfg!(windows) {
        // Windows: sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                let path = path_part
                    .strip_prefix('/')
                    .map_or_else(|| path_part.to_string(), std::string::ToString::to_string);

                return Ok(path);
            }
        }
    }

    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}
