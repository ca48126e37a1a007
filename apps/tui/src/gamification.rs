//! League tiers and level progress derived from XP.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub name: &'static str,
    pub min_xp: u32,
}

const BRONZE: League = League {
    name: "Bronze League",
    min_xp: 0,
};

/// Highest tier first.
pub const LEAGUES: [League; 5] = [
    League {
        name: "Diamond League",
        min_xp: 5000,
    },
    League {
        name: "Platinum League",
        min_xp: 3000,
    },
    League {
        name: "Gold League",
        min_xp: 1500,
    },
    League {
        name: "Silver League",
        min_xp: 500,
    },
    BRONZE,
];

pub fn league_for_xp(xp: u32) -> League {
    LEAGUES
        .iter()
        .copied()
        .find(|league| xp >= league.min_xp)
        .unwrap_or(BRONZE)
}

/// The tier above the one `xp` is in, if any.
pub fn next_league(xp: u32) -> Option<League> {
    LEAGUES.iter().rev().copied().find(|league| league.min_xp > xp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub xp: u32,
    pub next_level_xp: Option<u32>,
}

impl LevelProgress {
    pub fn for_xp(xp: u32) -> Self {
        Self {
            xp,
            next_level_xp: next_league(xp).map(|league| league.min_xp),
        }
    }

    /// Progress toward the next tier, `100` once the top tier is reached.
    pub fn percent(&self) -> u16 {
        match self.next_level_xp {
            Some(target) if target > 0 => {
                let percent = u64::from(self.xp) * 100 / u64::from(target);
                u16::try_from(percent.min(100)).unwrap_or(100)
            }
            _ => 100,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.next_level_xp
            .map_or(0, |target| target.saturating_sub(self.xp))
    }
}
