use crate::avatar;
use crate::config::AppConfig;
use crate::gamification::{league_for_xp, League, LevelProgress};

const OWN_ROLE: &str = "Civic Hero";
const DEFAULT_STREAK_DAYS: u32 = 12;

/// XP figures shown for the signed-in user only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub league: League,
    pub progress: LevelProgress,
    pub streak_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub email: String,
    pub joined: String,
    pub impact: String,
    pub standing: Option<Standing>,
}

impl UserProfile {
    /// Public card for another reporter; contact details stay hidden.
    pub fn visitor(name: &str) -> Self {
        Self {
            name: name.to_string(),
            role: "Concerned Citizen".to_string(),
            avatar: avatar::resolve(name),
            email: "hidden@privacy.com".to_string(),
            joined: "March 2024".to_string(),
            impact: "3 Issues Reported".to_string(),
            standing: None,
        }
    }
}

/// The signed-in user, built from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub profile: UserProfile,
}

impl Session {
    pub fn from_config(config: &AppConfig) -> Self {
        let name = config.user_name.clone();
        let email = format!("{}@civicflow.com", name.to_lowercase().replace(' ', "."));

        Self {
            profile: UserProfile {
                avatar: avatar::resolve(&name),
                role: OWN_ROLE.to_string(),
                email,
                joined: "January 2024".to_string(),
                impact: "12 Issues Resolved".to_string(),
                standing: Some(Standing {
                    league: league_for_xp(config.user_xp),
                    progress: LevelProgress::for_xp(config.user_xp),
                    streak_days: DEFAULT_STREAK_DAYS,
                }),
                name,
            },
        }
    }

    pub fn user_name(&self) -> &str {
        &self.profile.name
    }

    pub fn avatar(&self) -> &str {
        &self.profile.avatar
    }

    /// The own profile for `name`, otherwise a visitor card.
    pub fn profile_for(&self, name: &str) -> UserProfile {
        if name == self.profile.name {
            self.profile.clone()
        } else {
            UserProfile::visitor(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reflects_configured_user() {
        let session = Session::from_config(&AppConfig::default());
        let standing = session.profile.standing.as_ref().expect("own standing");

        assert_eq!(session.user_name(), "Jon Anderson");
        assert_eq!(session.profile.email, "jon.anderson@civicflow.com");
        assert_eq!(standing.league.name, "Gold League");
        assert_eq!(standing.progress.remaining(), 550);
        assert_eq!(session.avatar(), avatar::resolve("Jon Anderson"));
    }

    #[test]
    fn other_names_get_visitor_cards() {
        let session = Session::from_config(&AppConfig::default());
        let visitor = session.profile_for("Ayesha Khan");

        assert_eq!(visitor.role, "Concerned Citizen");
        assert!(visitor.standing.is_none());
        assert_eq!(session.profile_for("Jon Anderson"), session.profile);
    }
}
