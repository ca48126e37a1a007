use crate::domain::{Issue, IssueType};
use std::fmt;
use thiserror::Error;

/// Client-side locations the UI can open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Report,
    GovernmentIssue(String),
    VolunteerIssue(String),
}

impl Route {
    /// Accepts `/`, `/dashboard`, `/report`, `/issue/government/:id` and
    /// `/issue/volunteer/:id`. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.trim_end_matches('/');
        let segments = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        match segments.as_slice() {
            [] | ["dashboard"] => Some(Self::Dashboard),
            ["report"] => Some(Self::Report),
            ["issue", kind, id] => match IssueType::parse(kind)? {
                IssueType::Government => Some(Self::GovernmentIssue((*id).to_string())),
                IssueType::Volunteer => Some(Self::VolunteerIssue((*id).to_string())),
            },
            _ => None,
        }
    }

    pub fn for_issue(issue: &Issue) -> Self {
        match issue.issue_type() {
            IssueType::Government => Self::GovernmentIssue(issue.id.clone()),
            IssueType::Volunteer => Self::VolunteerIssue(issue.id.clone()),
        }
    }

    pub fn issue_id(&self) -> Option<&str> {
        match self {
            Self::GovernmentIssue(id) | Self::VolunteerIssue(id) => Some(id),
            Self::Dashboard | Self::Report => None,
        }
    }

    /// The issue type an issue route is allowed to render.
    pub const fn expected_type(&self) -> Option<IssueType> {
        match self {
            Self::GovernmentIssue(_) => Some(IssueType::Government),
            Self::VolunteerIssue(_) => Some(IssueType::Volunteer),
            Self::Dashboard | Self::Report => None,
        }
    }

    /// Rejects an issue whose derived type does not match the route it was
    /// opened under.
    pub fn check(&self, issue: &Issue) -> Result<(), TypeMismatch> {
        match self.expected_type() {
            Some(expected) if expected != issue.issue_type() => Err(TypeMismatch {
                expected,
                actual: issue.issue_type(),
                category: issue.category.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "/"),
            Self::Report => write!(f, "/report"),
            Self::GovernmentIssue(id) => write!(f, "/issue/government/{id}"),
            Self::VolunteerIssue(id) => write!(f, "/issue/volunteer/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Issue type mismatch. Expected '{}', got '{}'. Category: '{category}'",
    .expected.as_str(),
    .actual.as_str()
)]
pub struct TypeMismatch {
    pub expected: IssueType,
    pub actual: IssueType,
    pub category: String,
}
