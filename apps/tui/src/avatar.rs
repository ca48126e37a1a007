//! Deterministic display-name to avatar URL mapping.

const KNOWN_PROFILES: [(&str, &str); 12] = [
    (
        "Jon Anderson",
        "https://img.freepik.com/premium-photo/happy-selfie-fitness-with-man-city-social-media-profile-picture-running-smile-workout-relax-with-portrait-male-runner-photo-road-exercise-training-freedom_590464-198210.jpg",
    ),
    (
        "Robert Brown",
        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Emma Wilson",
        "https://images.unsplash.com/photo-1494790108377-be9c29b29330?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "James Smith",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Dr. Michael Chen",
        "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "William Davis",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Emily Rodriguez",
        "https://images.unsplash.com/photo-1534528741775-53994a69daeb?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "David Miller",
        "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Sarah Connor",
        "https://images.unsplash.com/photo-1580489944761-15a19d654956?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Dr. Ayesha Khan",
        "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?ixlib=rb-4.0.3&auto=format&fit=crop&w=256&q=80",
    ),
    (
        "Rescue 1122 Squad",
        "https://cdn-icons-png.flaticon.com/512/4006/4006520.png",
    ),
    (
        "Sarah Smith",
        "https://img.freepik.com/premium-photo/portrait-businesswoman-smile-office-with-pride-work-small-business-receptionist-creative-agency-personal-assistant-startup-happiness-with-face-girl-career-new-york_590464-375800.jpg?semt=ais_hybrid&w=740&q=80",
    ),
];

const FEMININE_POOL: [&str; 2] = [
    "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&w=256&q=80",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=256&q=80",
];

const HONORIFICS: [&str; 3] = ["mrs.", "ms.", "miss"];
const FEMININE_ENDINGS: [char; 3] = ['a', 'i', 'y'];

/// Resolves an avatar URL for a display name.
///
/// Lookup order: known profile table, then the name heuristic picking from a
/// two image pool, then a hash based avatar service. The same name always
/// yields the same URL. Different names may collide, since the checksum is a
/// plain sum of code units.
pub fn resolve(name: &str) -> String {
    if let Some((_, url)) = KNOWN_PROFILES.iter().find(|(known, _)| *known == name) {
        return (*url).to_string();
    }

    let seed = checksum(name);

    if looks_feminine(name) {
        let index = usize::try_from(seed % FEMININE_POOL.len() as u64).unwrap_or(0);
        return FEMININE_POOL[index].to_string();
    }

    format!("https://i.pravatar.cc/150?u={seed}")
}

/// Sum of the name's UTF-16 code units.
pub fn checksum(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

fn looks_feminine(name: &str) -> bool {
    let lower = name.to_lowercase();
    HONORIFICS.iter().any(|honorific| lower.contains(honorific))
        || lower.ends_with(FEMININE_ENDINGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_win() {
        assert_eq!(resolve("Rescue 1122 Squad"), KNOWN_PROFILES[10].1);
        assert!(resolve("Emma Wilson").contains("photo-1494790108377"));
    }

    #[test]
    fn resolution_is_deterministic() {
        for name in ["Civic Citizen", "Priya Sharma", "User42", "", "Mrs. Lee"] {
            assert_eq!(resolve(name), resolve(name));
        }
    }

    #[test]
    fn feminine_heuristic_uses_pool() {
        let url = resolve("Priya Sharma");
        assert!(FEMININE_POOL.contains(&url.as_str()));

        let seed = checksum("Ms. Jones");
        let expected = FEMININE_POOL[(seed % 2) as usize];
        assert_eq!(resolve("Ms. Jones"), expected);
    }

    #[test]
    fn default_uses_checksum_service() {
        // 'R' + 'o' + 'b' = 82 + 111 + 98
        assert_eq!(resolve("Rob"), "https://i.pravatar.cc/150?u=291");
    }

    #[test]
    fn anagrams_collide() {
        assert_eq!(resolve("Tom"), resolve("Mot"));
    }
}
