use crate::api::{LegalNotice, PublishIssueRequest, ReportAnalysis, DEFAULT_COORDS};
use crate::app::actions::AppActions;
use crate::app::events::AppEvent;
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::capabilities::Capabilities;
use crate::comments::CommentPoller;
use crate::config::AppConfig;
use crate::db::PreferenceKey;
use crate::domain::{ChatMessage, ChatRole, Comment, DepartmentStats, Issue, NewComment};
use crate::feed::FeedQuery;
use crate::route::{Route, TypeMismatch};
use crate::session::{Session, UserProfile};
use crate::theme::{ThemeMode, ThemeProvider};
use std::path::PathBuf;
use std::time::Duration;
use throbber_widgets_tui::ThrobberState;

pub const CHAT_GREETING: &str = "Hello! I'm CivicBot. I can help you with local laws, report status, or general questions. How can I assist?";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Feed,
    Map,
    Chat,
    Departments,
    Leagues,
    Profile,
    Issue,
    Report,
}

impl AppScreen {
    /// Dashboard views reachable with Tab, in display order.
    pub const TABS: [Self; 6] = [
        Self::Feed,
        Self::Map,
        Self::Chat,
        Self::Departments,
        Self::Leagues,
        Self::Profile,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Map => "Map",
            Self::Chat => "Assistant",
            Self::Departments => "Departments",
            Self::Leagues => "Leagues",
            Self::Profile => "Profile",
            Self::Issue => "Issue",
            Self::Report => "Report",
        }
    }

    pub fn tab_index(self) -> Option<usize> {
        Self::TABS.iter().position(|tab| *tab == self)
    }
}

#[derive(Debug, Default)]
pub struct FeedState {
    pub issues: Vec<Issue>,
    pub query: FeedQuery,
    pub visible: Vec<usize>,
    pub selected: usize,
    pub loading: bool,
    pub search_active: bool,
}

impl FeedState {
    /// Recomputes the visible subset after the issues or any control changed.
    pub fn refresh(&mut self) {
        self.visible = self.query.visible_indices(&self.issues);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.visible
            .get(self.selected)
            .and_then(|&index| self.issues.get(index))
    }

    pub fn visible_issues(&self) -> impl Iterator<Item = &Issue> {
        self.visible
            .iter()
            .filter_map(|&index| self.issues.get(index))
    }
}

/// A fetched issue together with its thread and composer.
#[derive(Debug)]
pub struct IssueView {
    pub issue: Issue,
    pub comments: Vec<Comment>,
    pub comment_input: String,
    pub composing: bool,
    pub posting: bool,
    pub joined: bool,
    pub notice: Option<LegalNotice>,
    pub notice_pending: bool,
    pub export_requested: bool,
    pub complaint: Option<String>,
    pub complaint_pending: bool,
}

impl IssueView {
    pub const fn new(issue: Issue) -> Self {
        Self {
            issue,
            comments: Vec::new(),
            comment_input: String::new(),
            composing: false,
            posting: false,
            joined: false,
            notice: None,
            notice_pending: false,
            export_requested: false,
            complaint: None,
            complaint_pending: false,
        }
    }
}

#[derive(Debug)]
pub enum DetailState {
    Idle,
    Loading(Route),
    Loaded(Box<IssueView>),
    NotFound,
    Mismatch(TypeMismatch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStep {
    #[default]
    Describe,
    AttachImage,
    Analyzing,
    Review,
    Publishing,
    Published,
}

#[derive(Debug, Default)]
pub struct ReportState {
    pub step: ReportStep,
    pub description: String,
    pub image_path: String,
    pub analysis: Option<ReportAnalysis>,
    pub published_id: Option<String>,
    pub error: Option<String>,
}

impl ReportState {
    /// Steps back from a request whose result will never arrive.
    pub fn abandon_request(&mut self) {
        self.step = match self.step {
            ReportStep::Analyzing => ReportStep::AttachImage,
            ReportStep::Publishing => ReportStep::Review,
            step => step,
        };
    }
}

#[derive(Debug)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub use_docs: bool,
    pub waiting: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                text: CHAT_GREETING.to_string(),
            }],
            input: String::new(),
            use_docs: true,
            waiting: false,
        }
    }
}

#[derive(Debug, Default)]
pub enum DepartmentsState {
    #[default]
    Idle,
    Loading,
    Loaded(DepartmentStats),
    Failed,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub route: Route,
    pub view_generation: u64,
    pub actions: AppActions,
    pub session: Session,
    pub theme: ThemeProvider,
    pub capabilities: Capabilities,
    pub poll_interval: Duration,
    pub feed: FeedState,
    pub detail: DetailState,
    poller: Option<CommentPoller>,
    pub report: ReportState,
    pub chat: ChatState,
    pub departments: DepartmentsState,
    pub profile: Option<UserProfile>,
    pub status_message: String,
    pub alert: Option<String>,
    pub show_help: bool,
    pub throbber: ThrobberState,
}

impl App {
    pub fn new(actions: AppActions, config: &AppConfig, capabilities: Capabilities) -> Self {
        Self {
            running: true,
            screen: AppScreen::Feed,
            route: Route::Dashboard,
            view_generation: 0,
            actions,
            session: Session::from_config(config),
            theme: ThemeProvider::default(),
            capabilities,
            poll_interval: config.poll_interval,
            feed: FeedState::default(),
            detail: DetailState::Idle,
            poller: None,
            report: ReportState::default(),
            chat: ChatState::default(),
            departments: DepartmentsState::default(),
            profile: None,
            status_message: String::new(),
            alert: None,
            show_help: false,
            throbber: ThrobberState::default(),
        }
    }

    /// Opens the preference store and applies the stored theme. Returns the
    /// last visited route, if one was stored.
    pub async fn initialize_preferences(&mut self, database_url: &str) -> Option<Route> {
        if let Err(e) = self.actions.initialize(database_url).await {
            log::warn!("preference store unavailable: {e}");
            return None;
        }

        if let Some(mode) = self
            .actions
            .load_preference(PreferenceKey::Theme)
            .await
            .and_then(|value| ThemeMode::parse(&value))
        {
            self.theme = ThemeProvider::new(mode);
        }

        self.actions
            .load_preference(PreferenceKey::LastRoute)
            .await
            .and_then(|value| Route::parse(&value))
    }

    /// Kicks off the feed load and opens `route`.
    pub fn start(&mut self, route: Route) {
        self.reload_feed();
        self.navigate(route);
    }

    pub fn update(&mut self) {
        self.throbber.calc_next();
    }

    pub const fn is_loading(&self) -> bool {
        self.feed.loading
            || matches!(self.detail, DetailState::Loading(_))
            || matches!(self.departments, DepartmentsState::Loading)
            || matches!(
                self.report.step,
                ReportStep::Analyzing | ReportStep::Publishing
            )
            || self.chat.waiting
    }

    /// Whether keystrokes currently go into a text field.
    pub fn is_typing(&self) -> bool {
        match self.screen {
            AppScreen::Feed => self.feed.search_active,
            AppScreen::Chat => true,
            AppScreen::Report => matches!(
                self.report.step,
                ReportStep::Describe | ReportStep::AttachImage
            ),
            AppScreen::Issue => {
                matches!(&self.detail, DetailState::Loaded(view) if view.composing)
            }
            AppScreen::Map | AppScreen::Departments | AppScreen::Leagues | AppScreen::Profile => {
                false
            }
        }
    }

    /// Leaves the current view: later results addressed to it are dropped,
    /// its comment poller stops and any request still in flight is abandoned.
    fn begin_view(&mut self) {
        self.view_generation += 1;
        self.poller = None;
        self.detail = DetailState::Idle;
        self.alert = None;
        self.report.abandon_request();
        if matches!(self.departments, DepartmentsState::Loading) {
            self.departments = DepartmentsState::Idle;
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.begin_view();
        log::debug!("navigating to {route}");

        match &route {
            Route::Dashboard => {
                self.screen = AppScreen::Feed;
            }
            Route::Report => {
                self.report = ReportState::default();
                self.screen = AppScreen::Report;
            }
            Route::GovernmentIssue(_) | Route::VolunteerIssue(_) => {
                self.detail = DetailState::Loading(route.clone());
                self.screen = AppScreen::Issue;
                self.actions.load_issue(self.view_generation, route.clone());
            }
        }

        self.actions
            .save_preference(PreferenceKey::LastRoute, route.to_string());
        self.route = route;
    }

    pub fn switch_tab(&mut self, screen: AppScreen) {
        if screen.tab_index().is_none() {
            return;
        }

        self.begin_view();
        self.route = Route::Dashboard;
        self.screen = screen;

        match screen {
            AppScreen::Departments => self.reload_departments(),
            AppScreen::Profile => self.profile = None,
            _ => {}
        }
    }

    pub fn next_tab(&mut self) {
        let index = self.screen.tab_index().unwrap_or(0);
        let next = wrap_increment(index, AppScreen::TABS.len());
        self.switch_tab(AppScreen::TABS[next]);
    }

    pub fn previous_tab(&mut self) {
        let index = self.screen.tab_index().unwrap_or(0);
        let previous = wrap_decrement(index, AppScreen::TABS.len());
        self.switch_tab(AppScreen::TABS[previous]);
    }

    pub fn back_to_dashboard(&mut self) {
        self.navigate(Route::Dashboard);
    }

    pub fn reload_feed(&mut self) {
        self.feed.loading = true;
        self.actions.load_feed();
    }

    pub fn reload_departments(&mut self) {
        self.departments = DepartmentsState::Loading;
        self.actions.load_departments(self.view_generation);
    }

    pub fn open_selected_issue(&mut self) {
        if let Some(route) = self.feed.selected_issue().map(Route::for_issue) {
            self.navigate(route);
        }
    }

    pub fn open_profile(&mut self, name: &str) {
        self.switch_tab(AppScreen::Profile);
        self.profile = Some(self.session.profile_for(name));
    }

    pub fn displayed_profile(&self) -> &UserProfile {
        self.profile.as_ref().unwrap_or(&self.session.profile)
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme.toggle();
        self.actions
            .save_preference(PreferenceKey::Theme, mode.as_str().to_string());
        self.status_message = format!("Theme: {}", mode.as_str());
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        if let Some(generation) = event.generation() {
            if generation != self.view_generation {
                log::debug!(
                    "dropping result for view {generation}, current view is {}",
                    self.view_generation
                );
                return;
            }
        }

        match event {
            AppEvent::FeedLoaded(issues) => {
                self.feed.issues = issues;
                self.feed.loading = false;
                self.feed.refresh();
            }
            AppEvent::IssueLoaded { route, issue, .. } => self.show_issue(&route, issue),
            AppEvent::Comments(update) => {
                if let DetailState::Loaded(view) = &mut self.detail {
                    if view.issue.id == update.issue_id {
                        view.comments = update.comments;
                    }
                }
            }
            AppEvent::CommentPosted { result, .. } => self.comment_posted(result),
            AppEvent::ReportAnalyzed { result, .. } => match result {
                Ok(response) => {
                    self.report.analysis = Some(ReportAnalysis::from_raw(&response.analysis));
                    self.report.step = ReportStep::Review;
                    self.report.error = None;
                }
                Err(e) => {
                    log::error!("report analysis failed: {e}");
                    self.report.step = ReportStep::AttachImage;
                    self.report.error = Some(format!("Connection to AI Brain failed: {e}"));
                }
            },
            AppEvent::IssuePublished { result, .. } => match result {
                Ok(response) => {
                    self.report.step = ReportStep::Published;
                    self.report.published_id = response.id;
                    self.report.error = None;
                    self.reload_feed();
                }
                Err(e) => {
                    log::error!("publishing failed: {e}");
                    self.report.step = ReportStep::Review;
                    self.report.error =
                        Some("Failed to publish issue. Please try again.".to_string());
                }
            },
            AppEvent::ChatReplied(reply) => {
                self.chat.waiting = false;
                self.chat.messages.push(ChatMessage {
                    role: ChatRole::Assistant,
                    text: reply.reply,
                });
            }
            AppEvent::DepartmentsLoaded { result, .. } => {
                self.departments = match result {
                    Ok(stats) => DepartmentsState::Loaded(stats),
                    Err(e) => {
                        log::error!("department stats failed: {e}");
                        DepartmentsState::Failed
                    }
                };
            }
            AppEvent::NoticeGenerated { result, .. } => self.notice_generated(result),
            AppEvent::ComplaintDrafted { result, .. } => self.complaint_drafted(result),
        }
    }

    fn show_issue(&mut self, route: &Route, issue: Option<Issue>) {
        self.detail = match issue {
            None => DetailState::NotFound,
            Some(issue) => match route.check(&issue) {
                Err(mismatch) => {
                    log::warn!("{mismatch}");
                    DetailState::Mismatch(mismatch)
                }
                Ok(()) => {
                    self.poller = Some(
                        self.actions
                            .start_comment_poller(&issue.id, self.poll_interval),
                    );
                    DetailState::Loaded(Box::new(IssueView::new(issue)))
                }
            },
        };
    }

    pub fn start_composing(&mut self) {
        if let DetailState::Loaded(view) = &mut self.detail {
            view.composing = true;
        }
    }

    pub fn submit_comment(&mut self) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };

        let text = view.comment_input.trim().to_string();
        if text.is_empty() || view.posting {
            return;
        }

        view.posting = true;
        self.actions.post_comment(
            self.view_generation,
            NewComment {
                issue_id: view.issue.id.clone(),
                user_name: self.session.user_name().to_string(),
                text,
                avatar: self.session.avatar().to_string(),
            },
        );
    }

    fn comment_posted(&mut self, result: Result<(), String>) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };
        view.posting = false;

        match result {
            Ok(()) => {
                view.comment_input.clear();
                view.composing = false;
                self.status_message = "Comment posted".to_string();
                self.actions.refresh_comments(&view.issue.id);
            }
            Err(e) => {
                log::error!("Failed to post comment: {e}");
                self.status_message = format!("Failed to post comment: {e}");
            }
        }
    }

    /// Marks the user as a supporter or volunteer. Counters stay as the
    /// backend reported them.
    pub fn join_issue(&mut self) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };
        if view.joined {
            return;
        }

        view.joined = true;
        self.status_message = if view.issue.is_government() {
            "You've joined the case!".to_string()
        } else {
            "Thank you for volunteering! The organizer will contact you.".to_string()
        };
    }

    /// Exports the legal notice, generating it first when needed.
    pub fn export_notice(&mut self) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };

        if !view.issue.is_government() {
            self.status_message =
                "Legal notices are only drafted for government issues".to_string();
            return;
        }

        if !self.capabilities.exporter.is_available() {
            self.alert = Some("Exporting notices is not supported here.".to_string());
            return;
        }

        let Some(notice) = &view.notice else {
            view.export_requested = true;
            if !view.notice_pending {
                view.notice_pending = true;
                self.actions
                    .generate_notice(self.view_generation, view.issue.id.clone());
            }
            self.status_message = "Generating legal notice...".to_string();
            return;
        };

        view.export_requested = false;
        match self.capabilities.exporter.export(&view.issue, notice) {
            Ok(path) => {
                self.status_message = format!("Notice exported: {}", path.display());
            }
            Err(e) => {
                log::error!("notice export failed: {e}");
                self.alert = Some(e.to_string());
            }
        }
    }

    fn notice_generated(&mut self, result: Result<LegalNotice, String>) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };
        view.notice_pending = false;

        match result {
            Ok(notice) => {
                view.notice = Some(notice);
                if view.export_requested {
                    self.export_notice();
                } else {
                    self.status_message = "Legal notice ready".to_string();
                }
            }
            Err(e) => {
                log::error!("legal notice failed: {e}");
                view.export_requested = false;
                self.alert = Some(format!("Could not generate legal notice: {e}"));
            }
        }
    }

    pub fn draft_complaint(&mut self) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };
        if view.complaint_pending {
            return;
        }

        view.complaint_pending = true;
        self.status_message = "Drafting complaint...".to_string();
        self.actions
            .draft_complaint(self.view_generation, view.issue.id.clone());
    }

    fn complaint_drafted(&mut self, result: Result<serde_json::Value, String>) {
        let DetailState::Loaded(view) = &mut self.detail else {
            return;
        };
        view.complaint_pending = false;

        match result {
            Ok(draft) => {
                view.complaint = Some(complaint_text(&draft));
                self.status_message = "Complaint drafted".to_string();
            }
            Err(e) => {
                log::error!("complaint draft failed: {e}");
                self.status_message = format!("Could not draft complaint: {e}");
            }
        }
    }

    /// Appends a transcript to the field being edited, or explains why voice
    /// input is unavailable.
    pub fn start_voice_input(&mut self) {
        if !self.capabilities.voice.is_available() {
            self.alert = Some("Voice input is not supported in this terminal.".to_string());
            return;
        }

        match self.capabilities.voice.listen() {
            Ok(transcript) => match self.screen {
                AppScreen::Report => push_words(&mut self.report.description, &transcript),
                AppScreen::Chat => push_words(&mut self.chat.input, &transcript),
                _ => {}
            },
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    pub fn confirm_description(&mut self) {
        if self.report.description.trim().is_empty() {
            self.report.error = Some("Please describe the issue first.".to_string());
            return;
        }
        self.report.error = None;
        self.report.step = ReportStep::AttachImage;
    }

    pub fn analyze_report(&mut self) {
        let path = self.report.image_path.trim();
        let file = (!path.is_empty()).then(|| PathBuf::from(path));

        self.report.step = ReportStep::Analyzing;
        self.report.error = None;
        self.actions.submit_report(
            self.view_generation,
            self.report.description.trim().to_string(),
            file,
        );
    }

    pub fn publish_report(&mut self) {
        let Some(analysis) = &self.report.analysis else {
            return;
        };

        let payload = PublishIssueRequest::from_analysis(
            analysis,
            self.report.description.trim(),
            DEFAULT_COORDS,
            self.session.user_name(),
            self.session.avatar(),
        );

        self.report.step = ReportStep::Publishing;
        self.actions.publish_issue(self.view_generation, payload);
    }

    pub fn send_chat(&mut self) {
        let query = self.chat.input.trim().to_string();
        if query.is_empty() || self.chat.waiting {
            return;
        }

        self.chat.messages.push(ChatMessage {
            role: ChatRole::User,
            text: query.clone(),
        });
        self.chat.input.clear();
        self.chat.waiting = true;
        self.actions.send_chat(query, self.chat.use_docs);
    }
}

/// The backend's draft text, or the whole response when no text field is
/// recognised.
fn complaint_text(draft: &serde_json::Value) -> String {
    ["complaint", "draft", "text", "preview_text"]
        .iter()
        .find_map(|key| draft.get(*key).and_then(serde_json::Value::as_str))
        .map_or_else(
            || serde_json::to_string_pretty(draft).unwrap_or_default(),
            str::to_string,
        )
}

fn push_words(target: &mut String, words: &str) {
    if !target.is_empty() && !target.ends_with(' ') {
        target.push(' ');
    }
    target.push_str(words);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fixtures::issue;
    use crate::testing::{comment, FakeApi};
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn test_app(api: FakeApi) -> (App, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let actions = AppActions::new(Arc::new(api), tx);
        let capabilities = Capabilities::detect(std::env::temp_dir().join("civic_flow_notices"));
        (
            App::new(actions, &AppConfig::default(), capabilities),
            rx,
        )
    }

    async fn next_event(rx: &mut UnboundedReceiver<AppEvent>) -> AppEvent {
        rx.recv().await.expect("event")
    }

    #[tokio::test]
    async fn government_route_with_volunteer_issue_shows_mismatch() {
        let (mut app, mut rx) =
            test_app(FakeApi::default().with_issue(issue("5", "Food Drive", "Food", 4, None)));

        app.navigate(Route::GovernmentIssue("5".to_string()));
        assert!(matches!(app.detail, DetailState::Loading(_)));

        let event = next_event(&mut rx).await;
        app.handle_event(event);

        let DetailState::Mismatch(mismatch) = &app.detail else {
            panic!("expected mismatch, got {:?}", app.detail);
        };
        assert_eq!(
            mismatch.to_string(),
            "Issue type mismatch. Expected 'government', got 'volunteer'. Category: 'Food'"
        );
        assert!(app.poller.is_none());
    }

    #[tokio::test]
    async fn unknown_issue_is_not_found() {
        let (mut app, mut rx) = test_app(FakeApi::default());

        app.navigate(Route::VolunteerIssue("404".to_string()));
        let event = next_event(&mut rx).await;
        app.handle_event(event);

        assert!(matches!(app.detail, DetailState::NotFound));
    }

    #[tokio::test]
    async fn results_for_a_left_view_are_dropped() {
        let (mut app, mut rx) = test_app(
            FakeApi::default().with_issue(issue("1", "Pothole", "Road Safety", 9, None)),
        );

        app.navigate(Route::GovernmentIssue("1".to_string()));
        let late = next_event(&mut rx).await;

        app.back_to_dashboard();
        app.handle_event(late);

        assert!(matches!(app.detail, DetailState::Idle));
        assert_eq!(app.screen, AppScreen::Feed);
        assert!(app.poller.is_none());
    }

    #[tokio::test]
    async fn loaded_issue_receives_polled_comments() {
        let (mut app, mut rx) = test_app(
            FakeApi::default()
                .with_issue(issue("1", "Pothole", "Road Safety", 9, None))
                .with_comments(vec![comment(1, "Still there"), comment(2, "Reported")]),
        );

        app.navigate(Route::GovernmentIssue("1".to_string()));
        let loaded = next_event(&mut rx).await;
        app.handle_event(loaded);
        assert!(app.poller.is_some());

        let comments = next_event(&mut rx).await;
        app.handle_event(comments);

        let DetailState::Loaded(view) = &app.detail else {
            panic!("expected loaded issue");
        };
        assert_eq!(view.comments.len(), 2);
        assert_eq!(view.comments[0].text, "Still there");
    }

    #[tokio::test]
    async fn failed_comment_keeps_input() {
        let (mut app, mut rx) = test_app(
            FakeApi::default()
                .with_issue(issue("1", "Pothole", "Road Safety", 9, None))
                .failing_writes(),
        );

        app.navigate(Route::GovernmentIssue("1".to_string()));
        let loaded = next_event(&mut rx).await;
        app.handle_event(loaded);

        app.start_composing();
        if let DetailState::Loaded(view) = &mut app.detail {
            view.comment_input = "Needs repair".to_string();
        }
        app.submit_comment();

        loop {
            match next_event(&mut rx).await {
                event @ AppEvent::CommentPosted { .. } => {
                    app.handle_event(event);
                    break;
                }
                other => app.handle_event(other),
            }
        }

        let DetailState::Loaded(view) = &app.detail else {
            panic!("expected loaded issue");
        };
        assert_eq!(view.comment_input, "Needs repair");
        assert!(!view.posting);
        assert!(app.status_message.starts_with("Failed to post comment"));
    }

    #[tokio::test]
    async fn feed_controls_recompute_visible_rows() {
        let (mut app, _rx) = test_app(FakeApi::default());
        app.handle_event(AppEvent::FeedLoaded(vec![
            issue("1", "Pothole on Main Street", "Road Safety", 9, Some(30)),
            issue("2", "Food Drive", "Food", 5, Some(31)),
        ]));
        assert_eq!(app.feed.visible, vec![1, 0]);

        app.feed.query.text = "pothole".to_string();
        app.feed.refresh();
        assert_eq!(app.feed.visible, vec![0]);
        assert_eq!(app.feed.selected_issue().map(|i| i.id.as_str()), Some("1"));
    }

    #[tokio::test]
    async fn voice_input_raises_alert() {
        let (mut app, _rx) = test_app(FakeApi::default());
        app.navigate(Route::Report);
        app.start_voice_input();

        assert_eq!(
            app.alert.as_deref(),
            Some("Voice input is not supported in this terminal.")
        );
        assert!(app.report.description.is_empty());
    }

    #[tokio::test]
    async fn report_flow_reaches_review_and_publishes() {
        let (mut app, mut rx) = test_app(FakeApi::default());
        app.navigate(Route::Report);

        app.confirm_description();
        assert_eq!(app.report.step, ReportStep::Describe);
        assert!(app.report.error.is_some());

        app.report.description = "Huge pothole near the school gate".to_string();
        app.confirm_description();
        app.analyze_report();
        assert_eq!(app.report.step, ReportStep::Analyzing);

        let analyzed = next_event(&mut rx).await;
        app.handle_event(analyzed);
        assert_eq!(app.report.step, ReportStep::Review);
        let analysis = app.report.analysis.as_ref().expect("analysis");
        assert_eq!(analysis.category, "Road Safety");
        assert!(analysis.legal_reference.is_some());

        app.publish_report();
        let published = next_event(&mut rx).await;
        app.handle_event(published);
        assert_eq!(app.report.step, ReportStep::Published);
        assert_eq!(app.report.published_id.as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn chat_round_trip_appends_reply() {
        let (mut app, mut rx) = test_app(FakeApi::default());
        app.switch_tab(AppScreen::Chat);
        app.chat.input = "Who fixes streetlights?".to_string();
        app.send_chat();
        assert!(app.chat.waiting);

        let reply = next_event(&mut rx).await;
        app.handle_event(reply);

        assert!(!app.chat.waiting);
        assert_eq!(app.chat.messages.len(), 3);
        assert_eq!(app.chat.messages[2].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn joining_does_not_touch_counters() {
        let mut pothole = issue("1", "Pothole", "Road Safety", 9, None);
        pothole.supporters_joined = Some(12);
        let (mut app, mut rx) = test_app(FakeApi::default().with_issue(pothole));

        app.navigate(Route::GovernmentIssue("1".to_string()));
        let loaded = next_event(&mut rx).await;
        app.handle_event(loaded);
        app.join_issue();

        let DetailState::Loaded(view) = &app.detail else {
            panic!("expected loaded issue");
        };
        assert!(view.joined);
        assert_eq!(view.issue.supporters_joined, Some(12));
    }

    #[tokio::test]
    async fn posted_comment_clears_input_and_refreshes() {
        let api = Arc::new(
            FakeApi::default().with_issue(issue("2", "Food Drive", "Food", 5, None)),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let actions = AppActions::new(api.clone(), tx);
        let capabilities = Capabilities::detect(std::env::temp_dir().join("civic_flow_notices"));
        let mut app = App::new(actions, &AppConfig::default(), capabilities);

        app.navigate(Route::VolunteerIssue("2".to_string()));
        let loaded = next_event(&mut rx).await;
        app.handle_event(loaded);

        app.start_composing();
        if let DetailState::Loaded(view) = &mut app.detail {
            view.comment_input = "  I can help on Saturday ".to_string();
        }
        app.submit_comment();

        loop {
            match next_event(&mut rx).await {
                event @ AppEvent::CommentPosted { .. } => {
                    app.handle_event(event);
                    break;
                }
                other => app.handle_event(other),
            }
        }

        let posted = api.posted_comments();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].text, "I can help on Saturday");
        assert_eq!(posted[0].user_name, "Jon Anderson");

        let DetailState::Loaded(view) = &app.detail else {
            panic!("expected loaded issue");
        };
        assert!(view.comment_input.is_empty());
        assert!(!view.composing);
    }

    #[tokio::test]
    async fn complaint_draft_is_shown() {
        let (mut app, mut rx) = test_app(
            FakeApi::default().with_issue(issue("1", "Pothole", "Road Safety", 9, None)),
        );

        app.navigate(Route::GovernmentIssue("1".to_string()));
        let loaded = next_event(&mut rx).await;
        app.handle_event(loaded);
        app.draft_complaint();

        loop {
            match next_event(&mut rx).await {
                event @ AppEvent::ComplaintDrafted { .. } => {
                    app.handle_event(event);
                    break;
                }
                other => app.handle_event(other),
            }
        }

        let DetailState::Loaded(view) = &app.detail else {
            panic!("expected loaded issue");
        };
        assert_eq!(view.complaint.as_deref(), Some("Complaint draft"));
    }

    #[test]
    fn complaint_text_falls_back_to_json() {
        let draft = serde_json::json!({ "subject": "Pothole" });
        assert!(complaint_text(&draft).contains("\"subject\""));
    }

    #[tokio::test]
    async fn tabs_wrap_around() {
        let (mut app, _rx) = test_app(FakeApi::default());
        app.previous_tab();
        assert_eq!(app.screen, AppScreen::Profile);
        app.next_tab();
        assert_eq!(app.screen, AppScreen::Feed);
    }

    #[tokio::test]
    async fn leaving_report_while_analyzing_stops_loading() {
        let (mut app, mut rx) = test_app(FakeApi::default());

        app.navigate(Route::Report);
        app.report.description = "Broken streetlight".to_string();
        app.confirm_description();
        app.analyze_report();
        assert!(app.is_loading());

        app.back_to_dashboard();
        assert_eq!(app.report.step, ReportStep::AttachImage);
        assert!(!app.is_loading());

        let event = next_event(&mut rx).await;
        app.handle_event(event);
        assert_eq!(app.report.step, ReportStep::AttachImage);
        assert!(app.report.analysis.is_none());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn leaving_report_while_publishing_returns_to_review() {
        let (mut app, _rx) = test_app(FakeApi::default());

        app.navigate(Route::Report);
        app.report.step = ReportStep::Publishing;
        app.switch_tab(AppScreen::Map);

        assert_eq!(app.report.step, ReportStep::Review);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn leaving_departments_while_loading_stops_loading() {
        let (mut app, mut rx) = test_app(FakeApi::default());

        app.switch_tab(AppScreen::Departments);
        assert!(matches!(app.departments, DepartmentsState::Loading));

        app.switch_tab(AppScreen::Leagues);
        assert!(matches!(app.departments, DepartmentsState::Idle));
        assert!(!app.is_loading());

        let event = next_event(&mut rx).await;
        app.handle_event(event);
        assert!(matches!(app.departments, DepartmentsState::Idle));
        assert!(!app.is_loading());
    }
}
