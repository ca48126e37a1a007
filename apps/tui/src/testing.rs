//! In-memory backend for unit tests.

use crate::api::{
    ApiError, CivicApi, LegalNotice, PostCommentResponse, PublishIssueRequest, PublishResponse,
    ReportResponse,
};
use crate::domain::{ChatReply, Comment, DepartmentScore, DepartmentStats, Issue, NewComment};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn comment(id: u32, text: &str) -> Comment {
    Comment {
        id: id.to_string(),
        user_name: "Ayesha Khan".to_string(),
        avatar: String::new(),
        text: text.to_string(),
        timestamp: Some("2026-01-30 10:00:00".to_string()),
    }
}

#[derive(Debug, Default)]
pub struct FakeApi {
    feed: Vec<Issue>,
    issues: Vec<Issue>,
    comments: Vec<Comment>,
    fail_writes: bool,
    comment_fetches: AtomicUsize,
    posted: Mutex<Vec<NewComment>>,
}

impl FakeApi {
    pub fn with_feed(mut self, feed: Vec<Issue>) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn comment_fetches(&self) -> usize {
        self.comment_fetches.load(Ordering::SeqCst)
    }

    pub fn posted_comments(&self) -> Vec<NewComment> {
        self.posted.lock().map(|posted| posted.clone()).unwrap_or_default()
    }

    fn write_result(&self) -> Result<(), ApiError> {
        if self.fail_writes {
            Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CivicApi for FakeApi {
    async fn fetch_feed(&self, _coords: Option<(f64, f64)>) -> Vec<Issue> {
        self.feed.clone()
    }

    async fn fetch_issue(&self, id: &str) -> Option<Issue> {
        self.issues.iter().find(|issue| issue.id == id).cloned()
    }

    async fn submit_report(
        &self,
        description: &str,
        _file: Option<&Path>,
    ) -> Result<ReportResponse, ApiError> {
        self.write_result()?;
        Ok(ReportResponse {
            status: Some("analyzed".to_string()),
            analysis: json!({
                "title": "Road Damage",
                "category": "Road Safety",
                "severity": 8,
                "ai_analysis": description,
                "responsible_department": "Traffic Police / Highways",
            }),
            error: None,
        })
    }

    async fn publish_issue(
        &self,
        _payload: &PublishIssueRequest,
    ) -> Result<PublishResponse, ApiError> {
        self.write_result()?;
        Ok(PublishResponse {
            status: "saved".to_string(),
            id: Some("99".to_string()),
        })
    }

    async fn fetch_comments(&self, _issue_id: &str) -> Vec<Comment> {
        self.comment_fetches.fetch_add(1, Ordering::SeqCst);
        self.comments.clone()
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<PostCommentResponse, ApiError> {
        self.write_result()?;
        if let Ok(mut posted) = self.posted.lock() {
            posted.push(comment.clone());
        }
        Ok(PostCommentResponse {
            status: "success".to_string(),
            id: Some("1".to_string()),
        })
    }

    async fn send_chat(&self, query: &str, _use_docs: bool) -> ChatReply {
        ChatReply {
            reply: format!("You asked: {query}"),
        }
    }

    async fn fetch_department_stats(&self) -> Result<DepartmentStats, ApiError> {
        self.write_result()?;
        Ok(DepartmentStats {
            trending: vec![DepartmentScore {
                name: "Waste Management Co.".to_string(),
                score: 92,
                resolved: 40,
                trend: "up".to_string(),
            }],
            needs_attention: Vec::new(),
        })
    }

    async fn draft_complaint(&self, issue_id: &str) -> Result<serde_json::Value, ApiError> {
        self.write_result()?;
        Ok(json!({ "issue_id": issue_id, "draft": "Complaint draft" }))
    }

    async fn generate_legal_notice(&self, issue_id: &str) -> Result<LegalNotice, ApiError> {
        self.write_result()?;
        Ok(LegalNotice {
            filename: format!("notice_{issue_id}.pdf"),
            preview_text: "To the Executive Engineer".to_string(),
            error: None,
        })
    }
}
