use crate::avatar;
use crate::domain::{
    optional_string_or_number, Comment, Issue, IssueStatus, IssueType, Location, TrustIndicators,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "Bahawalpur";
pub const DEFAULT_REPORTER: &str = "Civic Citizen";
pub const PENDING_ANALYSIS: &str = "Analysing...";
pub const DEFAULT_LEGAL_REFERENCE: &str = "Local Govt Act 2013, Section 11-B";
pub const DEFAULT_MATCHED_VOLUNTEERS: u32 = 3;
pub const DEFAULT_REPORT_SEVERITY: u8 = 5;

/// Width of the window synthetic feed timestamps are drawn from.
pub const TIMESTAMP_WINDOW_MS: i64 = 10 * 24 * 60 * 60 * 1000;

/// How to fill in a feed item's timestamp when the backend omits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFallback {
    /// Leave the timestamp empty; it sorts as the epoch.
    Missing,
    /// "now minus up to ten days", freshly seeded per process.
    Random,
    /// Same as `Random` but reproducible.
    Seeded(u64),
}

#[derive(Debug)]
pub struct TimestampSource {
    rng: Option<StdRng>,
}

impl TimestampSource {
    pub fn new(fallback: TimestampFallback) -> Self {
        let rng = match fallback {
            TimestampFallback::Missing => None,
            TimestampFallback::Random => Some(StdRng::from_entropy()),
            TimestampFallback::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };
        Self { rng }
    }

    pub fn synthesize(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let rng = self.rng.as_mut()?;
        let offset = rng.gen_range(0..TIMESTAMP_WINDOW_MS);
        Some(now - chrono::Duration::milliseconds(offset))
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub feed: Vec<RawIssue>,
}

/// An issue record exactly as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssue {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "aiAnalysis", alias = "ai_analysis")]
    pub ai_analysis: Option<String>,
    #[serde(default, rename = "supportersJoined")]
    pub supporters_joined: Option<u32>,
    #[serde(default, rename = "volunteersNeeded")]
    pub volunteers_needed: Option<u32>,
    #[serde(default, rename = "volunteersJoined")]
    pub volunteers_joined: Option<u32>,
    #[serde(default, rename = "reportedBy", alias = "reported_by")]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ai_confidence: Option<f64>,
    #[serde(default)]
    pub opik_trace_id: Option<String>,
    #[serde(default)]
    pub fairness_score: Option<f64>,
    #[serde(default)]
    pub disagreement_rate: Option<f64>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub financial_relief: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RawIssue {
    /// Converts to the normalized shape. `coords` stands in for a missing
    /// backend position; `fallback_timestamp` runs only when the backend sent
    /// no usable timestamp.
    pub fn normalize(
        self,
        coords: (f64, f64),
        fallback_timestamp: impl FnOnce() -> Option<DateTime<Utc>>,
    ) -> Issue {
        let id = self.id.unwrap_or_default();
        let category = self.category.unwrap_or_default();
        let department = department_for(self.department.as_deref(), &category);
        let avatar_key = self
            .reported_by
            .clone()
            .unwrap_or_else(|| format!("User{id}"));
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(fallback_timestamp);

        Issue {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            ai_analysis: self
                .ai_analysis
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| PENDING_ANALYSIS.to_string()),
            severity: normalize_severity(self.severity),
            location: Location {
                lat: self.lat.unwrap_or(coords.0),
                lng: self.lon.unwrap_or(coords.1),
                address: self
                    .location
                    .filter(|address| !address.is_empty())
                    .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            },
            status: self
                .status
                .as_deref()
                .map_or(IssueStatus::Pending, IssueStatus::parse_lenient),
            supporters_joined: self.supporters_joined,
            volunteers_needed: self.volunteers_needed,
            volunteers_joined: self.volunteers_joined,
            reported_by: self
                .reported_by
                .unwrap_or_else(|| DEFAULT_REPORTER.to_string()),
            avatar: avatar::resolve(&avatar_key),
            department,
            timestamp,
            tags: self.tags.unwrap_or_default(),
            image_url: self.image_url,
            trust: TrustIndicators {
                ai_confidence: self.ai_confidence,
                fairness_score: self.fairness_score,
                disagreement_rate: self.disagreement_rate,
                opik_trace_id: self.opik_trace_id,
                financial_relief: self.financial_relief,
            },
            category,
            id,
        }
    }
}

fn normalize_severity(raw: Option<f64>) -> u8 {
    match raw {
        Some(value) if value.is_finite() => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let severity = value.round().clamp(0.0, 10.0) as u8;
            severity
        }
        _ => 0,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// Responsible department: the backend's value unless it is a generic
/// placeholder, otherwise a lookup by category.
pub fn department_for(department: Option<&str>, category: &str) -> String {
    if let Some(department) = department {
        if !department.is_empty() && department != "General" && department != "General Dept" {
            return department.to_string();
        }
    }

    match category {
        "GOVT" => "City Administration",
        "Road Safety" => "Traffic Police / Highways",
        "Public Safety" => "Police Department",
        "Sanitation" => "Waste Management Co.",
        "Urban Planning" => "Development Authority",
        "Infrastructure" => "Works & Services Dept",
        "Electricity" => "WAPDA / Energy Dept",
        _ => "Municipal Corporation",
    }
    .to_string()
}

#[derive(Debug, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// `/report` response. `analysis` is passed through untouched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub analysis: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reviewable summary of a raw report analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportAnalysis {
    pub title: String,
    pub category: String,
    pub severity: u8,
    pub legal_reference: Option<String>,
    pub matched_volunteers: Option<u32>,
    pub ai_analysis: String,
    pub department: Option<String>,
    pub image_url: Option<String>,
    pub coords: Option<(f64, f64)>,
}

impl ReportAnalysis {
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        let text = |key: &str| {
            raw.get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let category = text("category").unwrap_or_else(|| "General".to_string());
        let is_government = IssueType::from_category(&category) == IssueType::Government;
        let severity = raw
            .get("severity")
            .and_then(serde_json::Value::as_f64)
            .filter(|severity| *severity > 0.0)
            .map_or(DEFAULT_REPORT_SEVERITY, |severity| {
                normalize_severity(Some(severity))
            });
        let matched = raw
            .get("matched_volunteers_count")
            .and_then(serde_json::Value::as_u64)
            .and_then(|count| u32::try_from(count).ok());
        let coords = raw
            .get("lat")
            .and_then(serde_json::Value::as_f64)
            .zip(raw.get("lon").and_then(serde_json::Value::as_f64));

        Self {
            title: text("title").unwrap_or_else(|| format!("{category} Issue")),
            severity,
            legal_reference: is_government.then(|| {
                text("legal_precedent").unwrap_or_else(|| DEFAULT_LEGAL_REFERENCE.to_string())
            }),
            matched_volunteers: (!is_government)
                .then(|| matched.unwrap_or(DEFAULT_MATCHED_VOLUNTEERS)),
            ai_analysis: text("ai_analysis").unwrap_or_default(),
            department: text("responsible_department"),
            image_url: text("image_url"),
            coords,
            category,
        }
    }

    pub fn issue_type(&self) -> IssueType {
        IssueType::from_category(&self.category)
    }
}

/// Body of `POST /publish_issue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishIssueRequest {
    pub title: String,
    pub category: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub tags: Vec<String>,
    pub severity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_precedent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_volunteers_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub reported_by: String,
    pub avatar: String,
}

impl PublishIssueRequest {
    pub fn from_analysis(
        analysis: &ReportAnalysis,
        description: &str,
        coords: (f64, f64),
        reported_by: &str,
        avatar: &str,
    ) -> Self {
        let (lat, lon) = analysis.coords.unwrap_or(coords);
        Self {
            title: analysis.title.clone(),
            category: analysis.category.clone(),
            description: description.to_string(),
            lat,
            lon,
            tags: vec![analysis.category.clone()],
            severity: analysis.severity,
            ai_analysis: Some(analysis.ai_analysis.clone()).filter(|text| !text.is_empty()),
            legal_precedent: analysis.legal_reference.clone(),
            matched_volunteers_count: analysis.matched_volunteers,
            responsible_department: analysis.department.clone(),
            image_url: analysis.image_url.clone(),
            reported_by: reported_by.to_string(),
            avatar: avatar.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostCommentResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegalNotice {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub preview_text: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawIssue {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn feed_record_is_normalized() {
        let record = raw(json!({
            "id": 12,
            "title": "Overflowing Gutter",
            "category": "Sanitation",
            "description": "Sewage overflow",
            "severity": 8,
            "reportedBy": "Emma Wilson",
            "department": "General"
        }));

        let issue = record.normalize((29.3956, 71.6833), || None);

        assert_eq!(issue.id, "12");
        assert!(issue.is_government());
        assert_eq!(issue.location.lat, 29.3956);
        assert_eq!(issue.location.lng, 71.6833);
        assert_eq!(issue.location.address, DEFAULT_ADDRESS);
        assert_eq!(issue.ai_analysis, PENDING_ANALYSIS);
        assert_eq!(issue.department, "Waste Management Co.");
        assert_eq!(issue.avatar, avatar::resolve("Emma Wilson"));
        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(issue.supporters_joined, None);
    }

    #[test]
    fn missing_reporter_uses_user_id_for_avatar() {
        let issue = raw(json!({"id": "9", "category": "Food"})).normalize((0.0, 0.0), || None);
        assert_eq!(issue.reported_by, DEFAULT_REPORTER);
        assert_eq!(issue.avatar, avatar::resolve("User9"));
        assert!(!issue.is_government());
    }

    #[test]
    fn backend_timestamp_beats_fallback() {
        let issue = raw(json!({"id": 1, "timestamp": "2024-02-01"}))
            .normalize((0.0, 0.0), || Some(Utc::now()));
        assert_eq!(
            issue.timestamp,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single()
        );
    }

    #[test]
    fn severity_is_clamped() {
        assert_eq!(normalize_severity(Some(14.0)), 10);
        assert_eq!(normalize_severity(Some(-2.0)), 0);
        assert_eq!(normalize_severity(None), 0);
    }

    #[test]
    fn department_prefers_specific_backend_value() {
        assert_eq!(department_for(Some("Rescue 1122"), "Medical"), "Rescue 1122");
        assert_eq!(
            department_for(Some("General Dept"), "Electricity"),
            "WAPDA / Energy Dept"
        );
        assert_eq!(department_for(None, "Food"), "Municipal Corporation");
    }

    #[test]
    fn seeded_timestamps_are_reproducible_and_recent() {
        let now = Utc::now();
        let mut first = TimestampSource::new(TimestampFallback::Seeded(7));
        let mut second = TimestampSource::new(TimestampFallback::Seeded(7));

        for _ in 0..20 {
            let a = first.synthesize(now);
            assert_eq!(a, second.synthesize(now));
            let a = a.map_or(0, |ts| (now - ts).num_milliseconds());
            assert!((0..TIMESTAMP_WINDOW_MS).contains(&a));
        }

        assert_eq!(
            TimestampSource::new(TimestampFallback::Missing).synthesize(now),
            None
        );
    }

    #[test]
    fn report_analysis_defaults() {
        let government = ReportAnalysis::from_raw(&json!({"category": "GOVT"}));
        assert_eq!(government.severity, DEFAULT_REPORT_SEVERITY);
        assert_eq!(
            government.legal_reference.as_deref(),
            Some(DEFAULT_LEGAL_REFERENCE)
        );
        assert_eq!(government.matched_volunteers, None);
        assert_eq!(government.title, "GOVT Issue");

        let volunteer = ReportAnalysis::from_raw(&json!({
            "category": "Medical",
            "severity": 7,
            "lat": 29.3956,
            "lon": 71.6833
        }));
        assert_eq!(volunteer.severity, 7);
        assert_eq!(volunteer.legal_reference, None);
        assert_eq!(volunteer.matched_volunteers, Some(DEFAULT_MATCHED_VOLUNTEERS));
        assert_eq!(volunteer.coords, Some((29.3956, 71.6833)));
    }

    #[test]
    fn publish_payload_skips_empty_optionals() -> Result<(), serde_json::Error> {
        let analysis = ReportAnalysis::from_raw(&json!({"category": "Food", "severity": 4}));
        let payload =
            PublishIssueRequest::from_analysis(&analysis, "Soup kitchen", (1.0, 2.0), "Jon", "");
        let body = serde_json::to_value(&payload)?;

        assert_eq!(body["tags"], json!(["Food"]));
        assert_eq!(body["lat"], json!(1.0));
        assert!(body.get("legal_precedent").is_none());
        assert_eq!(body["matched_volunteers_count"], json!(3));
        Ok(())
    }
}
