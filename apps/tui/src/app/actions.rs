use crate::api::{CivicApi, PublishIssueRequest};
use crate::app::events::AppEvent;
use crate::comments::CommentPoller;
use crate::db::{create_database_pool, get_preference, set_preference, PreferenceKey};
use crate::domain::NewComment;
use crate::route::Route;
use color_eyre::Result;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Backend calls and local storage. Network work runs on spawned tasks that
/// report back through `tx`.
#[derive(Clone)]
pub struct AppActions {
    pub api: Arc<dyn CivicApi>,
    pub db_pool: Option<SqlitePool>,
    tx: UnboundedSender<AppEvent>,
}

impl AppActions {
    pub fn new(api: Arc<dyn CivicApi>, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            db_pool: None,
            tx,
        }
    }

    /// Opens the preference store. The app keeps working without it.
    pub async fn initialize(&mut self, database_url: &str) -> Result<()> {
        self.db_pool = Some(create_database_pool(database_url).await?);
        Ok(())
    }

    fn send(tx: &UnboundedSender<AppEvent>, event: AppEvent) {
        if tx.send(event).is_err() {
            log::debug!("event loop gone, dropping result");
        }
    }

    pub fn load_feed(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let issues = api.fetch_feed(None).await;
            Self::send(&tx, AppEvent::FeedLoaded(issues));
        });
    }

    pub fn load_issue(&self, generation: u64, route: Route) {
        let Some(id) = route.issue_id().map(str::to_string) else {
            return;
        };

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let issue = api.fetch_issue(&id).await;
            Self::send(
                &tx,
                AppEvent::IssueLoaded {
                    generation,
                    route,
                    issue,
                },
            );
        });
    }

    pub fn start_comment_poller(&self, issue_id: &str, period: Duration) -> CommentPoller {
        CommentPoller::spawn(Arc::clone(&self.api), issue_id, period, self.tx.clone())
    }

    pub fn post_comment(&self, generation: u64, comment: NewComment) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .post_comment(&comment)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::CommentPosted { generation, result });
        });
    }

    /// One-off refresh outside the poll cadence, used after posting.
    pub fn refresh_comments(&self, issue_id: &str) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let issue_id = issue_id.to_string();
        tokio::spawn(async move {
            let comments = api.fetch_comments(&issue_id).await;
            Self::send(
                &tx,
                AppEvent::Comments(crate::comments::CommentUpdate { issue_id, comments }),
            );
        });
    }

    pub fn submit_report(&self, generation: u64, description: String, file: Option<PathBuf>) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .submit_report(&description, file.as_deref())
                .await
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::ReportAnalyzed { generation, result });
        });
    }

    pub fn publish_issue(&self, generation: u64, payload: PublishIssueRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .publish_issue(&payload)
                .await
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::IssuePublished { generation, result });
        });
    }

    pub fn send_chat(&self, query: String, use_docs: bool) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = api.send_chat(&query, use_docs).await;
            Self::send(&tx, AppEvent::ChatReplied(reply));
        });
    }

    pub fn load_departments(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .fetch_department_stats()
                .await
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::DepartmentsLoaded { generation, result });
        });
    }

    pub fn generate_notice(&self, generation: u64, issue_id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .generate_legal_notice(&issue_id)
                .await
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::NoticeGenerated { generation, result });
        });
    }

    pub fn draft_complaint(&self, generation: u64, issue_id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .draft_complaint(&issue_id)
                .await
                .map_err(|e| e.to_string());
            Self::send(&tx, AppEvent::ComplaintDrafted { generation, result });
        });
    }

    pub async fn load_preference(&self, key: PreferenceKey) -> Option<String> {
        let pool = self.db_pool.as_ref()?;
        match get_preference(pool, key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("could not read preference {}: {e}", key.as_str());
                None
            }
        }
    }

    /// Writes in the background; failures are only logged.
    pub fn save_preference(&self, key: PreferenceKey, value: String) {
        let Some(pool) = self.db_pool.clone() else {
            return;
        };

        tokio::spawn(async move {
            if let Err(e) = set_preference(&pool, key, &value).await {
                log::warn!("could not store preference {}: {e}", key.as_str());
            }
        });
    }
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions")
            .field("db_pool", &self.db_pool.is_some())
            .finish_non_exhaustive()
    }
}
