use serde::{Deserialize, Serialize};

pub type PlayerName = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mafia,
    Don,
    Detective,
    Doctor,
    Maniac,
    Civilian,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Mafia,
        Role::Don,
        Role::Detective,
        Role::Doctor,
        Role::Maniac,
        Role::Civilian,
    ];

    /// Stable, locale-independent key. Matches the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Role::Mafia => "mafia",
            Role::Don => "don",
            Role::Detective => "detective",
            Role::Doctor => "doctor",
            Role::Maniac => "maniac",
            Role::Civilian => "civilian",
        }
    }

    pub fn is_mafia(self) -> bool {
        matches!(self, Role::Mafia | Role::Don)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub player: PlayerName,
    pub role: Role,
}

/// Players paired with their roles, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment(Vec<Seat>);

impl Assignment {
    pub(crate) fn new(seats: Vec<Seat>) -> Self {
        Self(seats)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Seat> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn role_of(&self, player: &str) -> Option<Role> {
        self.0.iter().find(|s| s.player == player).map(|s| s.role)
    }

    pub fn count(&self, role: Role) -> usize {
        self.0.iter().filter(|s| s.role == role).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Seat;
    type IntoIter = std::slice::Iter<'a, Seat>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod role_tests {
    use super::*;

    #[test]
    fn keys_match_serde_names() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.key()));
        }
    }

    #[test]
    fn only_mafia_and_don_are_mafia_aligned() {
        let aligned: Vec<_> = Role::ALL.into_iter().filter(|r| r.is_mafia()).collect();
        assert_eq!(aligned, vec![Role::Mafia, Role::Don]);
    }

    #[test]
    fn assignment_serializes_as_plain_list() {
        let a = Assignment::new(vec![
            Seat {
                player: "Anna".into(),
                role: Role::Don,
            },
            Seat {
                player: "Boris".into(),
                role: Role::Civilian,
            },
        ]);
        let v: serde_json::Value = serde_json::from_str(&a.to_json().unwrap()).unwrap();
        assert_eq!(v[0]["player"], "Anna");
        assert_eq!(v[0]["role"], "don");
        assert_eq!(v[1]["role"], "civilian");
        assert_eq!(a.role_of("Boris"), Some(Role::Civilian));
        assert_eq!(a.role_of("Nobody"), None);
    }
}
