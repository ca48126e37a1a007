use civic_flow::api::ApiClient;
use civic_flow::app::{App, AppActions};
use civic_flow::capabilities::Capabilities;
use civic_flow::cli::CliArgs;
use civic_flow::config::{init_app_config, AppConfig};
use civic_flow::feed::{FeedQuery, SortKey, TypeFilter};
use civic_flow::route::Route;
use civic_flow::{event, terminal};
use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.headless || !is_terminal();
    init_logging(&config, headless)?;

    let api = Arc::new(ApiClient::from_config(&config)?);
    log::info!("Using backend at {}", api.base_url());

    if headless {
        let query = headless_query(&args)?;
        return event::run_headless(api.as_ref(), &query, args.json).await;
    }

    let (tx, mut events) = mpsc::unbounded_channel();
    let actions = AppActions::new(api, tx);
    let capabilities = Capabilities::detect(config.export_dir.clone());
    let mut app = App::new(actions, &config, capabilities);

    let last_route = app.initialize_preferences(&config.database_url).await;
    let route = match &args.route {
        Some(path) => Route::parse(path).ok_or_else(|| eyre!("Unknown route '{path}'"))?,
        None => last_route.unwrap_or_default(),
    };

    let mut terminal = terminal::setup_terminal()?;
    app.start(route);

    let result = event::run(&mut terminal, &mut app, &mut events).await;

    terminal::cleanup_terminal_state(true, true);
    result
}

/// Logs go to a file while the TUI owns the screen, to stderr otherwise.
fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let level = if config.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_env("RUST_LOG");

    if !headless {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn headless_query(args: &CliArgs) -> Result<FeedQuery> {
    let type_filter = match &args.issue_type {
        Some(value) => {
            TypeFilter::parse(value).ok_or_else(|| eyre!("Unknown issue type '{value}'"))?
        }
        None => TypeFilter::default(),
    };

    let sort = match &args.sort {
        Some(value) => SortKey::parse(value).ok_or_else(|| eyre!("Unknown sort key '{value}'"))?,
        None => SortKey::default(),
    };

    Ok(FeedQuery {
        text: args.query.clone().unwrap_or_default(),
        type_filter,
        sort,
    })
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
