use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::CivicApi;
use crate::app::{handle_input, App, AppEvent};
use crate::domain::Issue;
use crate::feed::FeedQuery;
use crate::ui;

/// Applies every background result that has arrived since the last frame.
/// Returns how many were applied.
pub fn drain_events(app: &mut App, events: &mut UnboundedReceiver<AppEvent>) -> usize {
    let mut applied = 0;
    loop {
        match events.try_recv() {
            Ok(event) => {
                app.handle_event(event);
                applied += 1;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                log::warn!("event channel closed");
                break;
            }
        }
    }
    applied
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(api: &dyn CivicApi, query: &FeedQuery, json: bool) -> Result<()> {
    let feed = build_headless_feed(api, query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        render_headless_feed(&feed);
    }

    Ok(())
}

fn render_headless_feed(feed: &HeadlessFeed) {
    println!("\nCivic Flow Feed");
    println!("===============");
    println!("Issues: {} of {}", feed.shown, feed.total);
    println!("Type: {}   Sort: {}", feed.type_filter, feed.sort);
    if !feed.search.is_empty() {
        println!("Search: {}", feed.search);
    }

    println!();
    for issue in &feed.issues {
        println!(
            "- #{} | {} | {} | {} | severity {} | {} | {}",
            issue.id,
            issue.issue_type,
            issue.title,
            issue.category,
            issue.severity,
            issue.status,
            issue.reported_at.as_deref().unwrap_or("-")
        );
    }
}

pub async fn build_headless_feed(api: &dyn CivicApi, query: &FeedQuery) -> HeadlessFeed {
    let issues = api.fetch_feed(None).await;
    let visible = query.apply(&issues);

    HeadlessFeed {
        total: issues.len(),
        shown: visible.len(),
        search: query.text.clone(),
        type_filter: query.type_filter.label().to_string(),
        sort: query.sort.label().to_string(),
        issues: visible.into_iter().map(HeadlessIssue::from).collect(),
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HeadlessFeed {
    pub total: usize,
    pub shown: usize,
    pub search: String,
    pub type_filter: String,
    pub sort: String,
    pub issues: Vec<HeadlessIssue>,
}

#[derive(Debug, serde::Serialize)]
pub struct HeadlessIssue {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub category: String,
    pub severity: u8,
    pub status: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub reported_by: String,
    pub reported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporters_joined: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers_joined: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers_needed: Option<u32>,
}

impl From<&Issue> for HeadlessIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            title: issue.title.clone(),
            issue_type: issue.issue_type().as_str().to_string(),
            category: issue.category.clone(),
            severity: issue.severity,
            status: issue.status.as_str().to_string(),
            address: issue.location.address.clone(),
            lat: issue.location.lat,
            lng: issue.location.lng,
            reported_by: issue.reported_by.clone(),
            reported_at: issue.timestamp.map(|timestamp| timestamp.to_rfc3339()),
            supporters_joined: issue.supporters_joined,
            volunteers_joined: issue.volunteers_joined,
            volunteers_needed: issue.volunteers_needed,
        }
    }
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        drain_events(app, events);

        // Update animations
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        log::debug!("redraw after resize failed: {e}");
                    }
                }
                Ok(_) => {}
                Err(e) => log::debug!("terminal event read failed: {e}"),
            }
        }

        // Let spawned requests run.
        tokio::task::yield_now().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::AppActions;
    use crate::capabilities::Capabilities;
    use crate::config::AppConfig;
    use crate::feed::fixtures::issue;
    use crate::feed::{SortKey, TypeFilter};
    use crate::testing::FakeApi;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn sample_feed() -> FakeApi {
        let mut supported = issue("1", "Pothole on Mall Road", "Road Safety", 8, Some(1));
        supported.supporters_joined = Some(14);

        FakeApi::default().with_feed(vec![
            supported,
            issue("2", "Blood donors needed", "Medical", 9, Some(3)),
            issue("3", "Broken streetlight", "Infrastructure", 5, Some(2)),
        ])
    }

    #[tokio::test]
    async fn headless_feed_applies_query() {
        let api = sample_feed();
        let query = FeedQuery {
            text: String::new(),
            type_filter: TypeFilter::Government,
            sort: SortKey::Severity,
        };

        let feed = build_headless_feed(&api, &query).await;

        assert_eq!(feed.total, 3);
        assert_eq!(feed.shown, 2);
        assert_eq!(feed.issues[0].id, "1");
        assert_eq!(feed.issues[1].id, "3");
        assert_eq!(feed.type_filter, "Government");
    }

    #[tokio::test]
    async fn headless_json_omits_missing_counters() -> Result<()> {
        let api = sample_feed();
        let feed = build_headless_feed(&api, &FeedQuery::default()).await;

        let value = serde_json::to_value(&feed)?;
        let issues = value["issues"].as_array().cloned().unwrap_or_default();
        let pothole = issues
            .iter()
            .find(|issue| issue["id"] == "1")
            .cloned()
            .unwrap_or_default();
        let donors = issues
            .iter()
            .find(|issue| issue["id"] == "2")
            .cloned()
            .unwrap_or_default();

        assert_eq!(pothole["supporters_joined"], 14);
        assert_eq!(pothole["type"], "government");
        assert!(donors.get("volunteers_needed").is_none());
        assert_eq!(donors["type"], "volunteer");
        Ok(())
    }

    #[tokio::test]
    async fn drain_applies_pending_results() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let actions = AppActions::new(Arc::new(sample_feed()), tx);
        let capabilities = Capabilities::detect(std::env::temp_dir().join("civic_flow_notices"));
        let mut app = App::new(actions, &AppConfig::default(), capabilities);

        app.reload_feed();
        assert!(app.feed.loading);

        let mut applied = 0;
        for _ in 0..10 {
            tokio::task::yield_now().await;
            applied += drain_events(&mut app, &mut rx);
            if applied > 0 {
                break;
            }
        }

        assert_eq!(applied, 1);
        assert!(!app.feed.loading);
        assert_eq!(app.feed.visible.len(), 3);
    }
}
