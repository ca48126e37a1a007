/// Keys the client persists between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Theme,
    LastRoute,
}

impl PreferenceKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::LastRoute => "last_route",
        }
    }
}
