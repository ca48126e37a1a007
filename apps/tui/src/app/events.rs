use crate::api::{LegalNotice, PublishResponse, ReportResponse};
use crate::comments::CommentUpdate;
use crate::domain::{ChatReply, DepartmentStats, Issue};
use crate::route::Route;

/// Results of background work, delivered to the UI loop over a channel.
///
/// Variants carrying a `generation` belong to one view; the app discards them
/// once the user has navigated elsewhere.
#[derive(Debug)]
pub enum AppEvent {
    FeedLoaded(Vec<Issue>),
    IssueLoaded {
        generation: u64,
        route: Route,
        issue: Option<Issue>,
    },
    Comments(CommentUpdate),
    CommentPosted {
        generation: u64,
        result: Result<(), String>,
    },
    ReportAnalyzed {
        generation: u64,
        result: Result<ReportResponse, String>,
    },
    IssuePublished {
        generation: u64,
        result: Result<PublishResponse, String>,
    },
    ChatReplied(ChatReply),
    DepartmentsLoaded {
        generation: u64,
        result: Result<DepartmentStats, String>,
    },
    NoticeGenerated {
        generation: u64,
        result: Result<LegalNotice, String>,
    },
    ComplaintDrafted {
        generation: u64,
        result: Result<serde_json::Value, String>,
    },
}

impl AppEvent {
    /// The view generation this event belongs to, if it is view-scoped.
    pub const fn generation(&self) -> Option<u64> {
        match self {
            Self::IssueLoaded { generation, .. }
            | Self::CommentPosted { generation, .. }
            | Self::ReportAnalyzed { generation, .. }
            | Self::IssuePublished { generation, .. }
            | Self::DepartmentsLoaded { generation, .. }
            | Self::NoticeGenerated { generation, .. }
            | Self::ComplaintDrafted { generation, .. } => Some(*generation),
            Self::FeedLoaded(_) | Self::Comments(_) | Self::ChatReplied(_) => None,
        }
    }
}

impl From<CommentUpdate> for AppEvent {
    fn from(update: CommentUpdate) -> Self {
        Self::Comments(update)
    }
}
