use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "civic_flow", version, about = "Civic Flow TUI")]
pub struct CliArgs {
    /// Print the issue feed and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless feed as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override preference database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Open a route on start, e.g. /report or /issue/government/12
    #[arg(long, value_name = "PATH")]
    pub route: Option<String>,

    /// Headless: only issues whose title, description or address match
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Headless: all, government or volunteer
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Headless: newest, oldest or severity
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("CIVIC_API_URL", url);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_filters() {
        let args = CliArgs::parse_from([
            "civic_flow",
            "--headless",
            "--json",
            "--query",
            "pothole",
            "--type",
            "government",
            "--sort",
            "severity",
        ]);

        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.query.as_deref(), Some("pothole"));
        assert_eq!(args.issue_type.as_deref(), Some("government"));
        assert_eq!(args.sort.as_deref(), Some("severity"));
    }
}
