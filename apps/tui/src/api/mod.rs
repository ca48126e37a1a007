//! REST client for the Civic Flow backend.

mod client;
mod error;
pub mod models;

pub use client::{ApiClient, CivicApi, CHAT_FALLBACK_REPLY, DEFAULT_COORDS};
pub use error::ApiError;
pub use models::{
    department_for, LegalNotice, PostCommentResponse, PublishIssueRequest, PublishResponse,
    ReportAnalysis, ReportResponse, TimestampFallback, TimestampSource,
};
