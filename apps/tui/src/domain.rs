use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Categories the backend files under government responsibility.
pub const GOVERNMENT_CATEGORIES: [&str; 7] = [
    "GOVT",
    "Road Safety",
    "Public Safety",
    "Sanitation",
    "Urban Planning",
    "Infrastructure",
    "Electricity",
];

pub fn is_government_category(category: &str) -> bool {
    GOVERNMENT_CATEGORIES.contains(&category)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Government,
    Volunteer,
}

impl IssueType {
    pub fn from_category(category: &str) -> Self {
        if is_government_category(category) {
            Self::Government
        } else {
            Self::Volunteer
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Government => "government",
            Self::Volunteer => "volunteer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "government" => Some(Self::Government),
            "volunteer" => Some(Self::Volunteer),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Volunteer => "Volunteer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }

    /// Lenient parse; anything unrecognised is treated as pending.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "in-progress" => Self::InProgress,
            "resolved" => Self::Resolved,
            _ => Self::Pending,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// A normalized issue snapshot.
///
/// The issue type is not stored: it is always derived from `category`, so a
/// snapshot can never carry a conflicting type/category pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ai_analysis: String,
    pub severity: u8,
    pub location: Location,
    pub category: String,
    pub status: IssueStatus,
    pub supporters_joined: Option<u32>,
    pub volunteers_needed: Option<u32>,
    pub volunteers_joined: Option<u32>,
    pub reported_by: String,
    pub avatar: String,
    pub department: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub trust: TrustIndicators,
}

impl Issue {
    pub fn issue_type(&self) -> IssueType {
        IssueType::from_category(&self.category)
    }

    pub fn is_government(&self) -> bool {
        self.issue_type() == IssueType::Government
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.map_or(0, |ts| ts.timestamp_millis())
    }
}

/// Backend supplied trust indicators for the AI analysis. Displayed only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrustIndicators {
    pub ai_confidence: Option<f64>,
    pub fairness_score: Option<f64>,
    pub disagreement_rate: Option<f64>,
    pub opik_trace_id: Option<String>,
    pub financial_relief: Option<String>,
}

impl TrustIndicators {
    pub const fn is_empty(&self) -> bool {
        self.ai_confidence.is_none()
            && self.fairness_score.is_none()
            && self.disagreement_rate.is_none()
            && self.opik_trace_id.is_none()
            && self.financial_relief.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub issue_id: String,
    pub user_name: String,
    pub text: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DepartmentScore {
    pub name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub resolved: u32,
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DepartmentStats {
    #[serde(default)]
    pub trending: Vec<DepartmentScore>,
    #[serde(default)]
    pub needs_attention: Vec<DepartmentScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Backend ids arrive as integers from some endpoints and strings from others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|value| !value.is_null())
        .map(|value| value_to_string(&value)))
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_type_follows_government_category_set() {
        for category in GOVERNMENT_CATEGORIES {
            assert_eq!(IssueType::from_category(category), IssueType::Government);
        }
        for category in ["Food", "Medical", "Social", "govt", ""] {
            assert_eq!(IssueType::from_category(category), IssueType::Volunteer);
        }
    }

    #[test]
    fn status_parse_is_lenient() {
        assert_eq!(IssueStatus::parse_lenient("in-progress"), IssueStatus::InProgress);
        assert_eq!(IssueStatus::parse_lenient("In Progress"), IssueStatus::InProgress);
        assert_eq!(IssueStatus::parse_lenient("resolved"), IssueStatus::Resolved);
        assert_eq!(IssueStatus::parse_lenient("open"), IssueStatus::Pending);
    }

    #[test]
    fn comment_accepts_numeric_ids() -> Result<(), serde_json::Error> {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 7, "user_name": "Emma Wilson", "text": "On it", "timestamp": null}"#,
        )?;
        assert_eq!(comment.id, "7");
        assert_eq!(comment.avatar, "");
        assert_eq!(comment.timestamp, None);
        Ok(())
    }
}
