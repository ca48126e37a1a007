use crate::domain::{Issue, IssueType};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Government,
    Volunteer,
}

impl TypeFilter {
    pub const fn matches(self, issue_type: IssueType) -> bool {
        match self {
            Self::All => true,
            Self::Government => matches!(issue_type, IssueType::Government),
            Self::Volunteer => matches!(issue_type, IssueType::Volunteer),
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Government,
            Self::Government => Self::Volunteer,
            Self::Volunteer => Self::All,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "government" => Some(Self::Government),
            "volunteer" => Some(Self::Volunteer),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Government => "Government",
            Self::Volunteer => "Volunteer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Severity,
}

impl SortKey {
    pub const fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Severity,
            Self::Severity => Self::Newest,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "severity" => Some(Self::Severity),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
            Self::Severity => "Severity",
        }
    }

    fn compare(self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Newest => b.timestamp_millis().cmp(&a.timestamp_millis()),
            Self::Oldest => a.timestamp_millis().cmp(&b.timestamp_millis()),
            Self::Severity => b.severity.cmp(&a.severity),
        }
    }
}

/// The three independent feed controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub text: String,
    pub type_filter: TypeFilter,
    pub sort: SortKey,
}

impl FeedQuery {
    pub fn matches(&self, issue: &Issue) -> bool {
        self.type_filter.matches(issue.issue_type()) && self.matches_text(issue)
    }

    fn matches_text(&self, issue: &Issue) -> bool {
        let needle = self.text.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            issue.title.as_str(),
            issue.description.as_str(),
            issue.location.address.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Indices into `issues` of the visible subset, in display order.
    pub fn visible_indices(&self, issues: &[Issue]) -> Vec<usize> {
        let mut indices = issues
            .iter()
            .enumerate()
            .filter(|(_, issue)| self.matches(issue))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        indices.sort_by(|&a, &b| self.sort.compare(&issues[a], &issues[b]));
        indices
    }

    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        self.visible_indices(issues)
            .into_iter()
            .map(|index| &issues[index])
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Issue, IssueStatus, Location, TrustIndicators};
    use chrono::{TimeZone, Utc};

    pub fn issue(id: &str, title: &str, category: &str, severity: u8, day: Option<u32>) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} reported by residents"),
            ai_analysis: String::new(),
            severity,
            location: Location {
                lat: 40.758,
                lng: -73.9855,
                address: "Main Street, Model Town".to_string(),
            },
            category: category.to_string(),
            status: IssueStatus::Pending,
            supporters_joined: None,
            volunteers_needed: None,
            volunteers_joined: None,
            reported_by: "Civic Citizen".to_string(),
            avatar: String::new(),
            department: String::new(),
            timestamp: day.and_then(|day| Utc.with_ymd_and_hms(2026, 1, day, 9, 0, 0).single()),
            tags: Vec::new(),
            image_url: None,
            trust: TrustIndicators::default(),
        }
    }
}
