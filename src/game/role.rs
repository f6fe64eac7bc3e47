use crate::error::{ConfigError, Error, NameError};
use crate::types::{Assignment, PlayerName, Role, Seat};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_PLAYERS: usize = 4;
/// Smallest table that gets a Maniac when the role set asks for one.
pub const MANIAC_MIN_PLAYERS: usize = 8;

/// How many Detectives sit at the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DetectivePolicy {
    /// Always exactly one.
    #[default]
    Single,
    /// One per six players, at least one.
    PerSix,
}

impl DetectivePolicy {
    fn count(self, player_count: usize) -> usize {
        match self {
            DetectivePolicy::Single => 1,
            DetectivePolicy::PerSix => (player_count / 6).max(1),
        }
    }
}

/// Named role-set presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Mafia, Detective, Doctor, Civilians.
    #[default]
    Classic,
    /// Classic with one Mafia promoted to Don.
    Don,
    /// Don variant plus a Maniac from eight players up.
    Extended,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Don, Variant::Extended];
}

/// Optional roles that take part in a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet {
    pub doctor: bool,
    pub don: bool,
    pub maniac: bool,
    pub detectives: DetectivePolicy,
}

impl RoleSet {
    pub fn classic() -> Self {
        Self {
            doctor: true,
            don: false,
            maniac: false,
            detectives: DetectivePolicy::Single,
        }
    }

    pub fn with_don() -> Self {
        Self {
            don: true,
            ..Self::classic()
        }
    }

    pub fn extended() -> Self {
        Self {
            maniac: true,
            ..Self::with_don()
        }
    }

    pub fn detectives(self, detectives: DetectivePolicy) -> Self {
        Self { detectives, ..self }
    }

    pub fn without_doctor(self) -> Self {
        Self {
            doctor: false,
            ..self
        }
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::classic()
    }
}

impl From<Variant> for RoleSet {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Classic => RoleSet::classic(),
            Variant::Don => RoleSet::with_don(),
            Variant::Extended => RoleSet::extended(),
        }
    }
}

/// How many of each role a table gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCounts {
    pub mafia: usize,
    pub don: usize,
    pub detective: usize,
    pub doctor: usize,
    pub maniac: usize,
    pub civilian: usize,
}

impl RoleCounts {
    /// Distribution for `player_count` players.
    ///
    /// A third of the table (rounded down) is mafia-aligned. Promoting one of
    /// them to Don never changes that total.
    pub fn for_players(player_count: usize, set: &RoleSet) -> Result<Self, ConfigError> {
        if player_count < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers {
                given: player_count,
                min: MIN_PLAYERS,
            });
        }

        let mafia_total = player_count / 3;
        let don = usize::from(set.don && mafia_total > 1);
        let detective = set.detectives.count(player_count);
        let doctor = usize::from(set.doctor);
        let maniac = usize::from(set.maniac && player_count >= MANIAC_MIN_PLAYERS);

        let special = mafia_total + detective + doctor + maniac;
        if special > player_count {
            return Err(ConfigError::CapacityExceeded {
                special,
                players: player_count,
            });
        }

        Ok(Self {
            mafia: mafia_total - don,
            don,
            detective,
            doctor,
            maniac,
            civilian: player_count - special,
        })
    }

    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Mafia => self.mafia,
            Role::Don => self.don,
            Role::Detective => self.detective,
            Role::Doctor => self.doctor,
            Role::Maniac => self.maniac,
            Role::Civilian => self.civilian,
        }
    }

    pub fn mafia_aligned(&self) -> usize {
        self.mafia + self.don
    }

    pub fn total(&self) -> usize {
        Role::ALL.iter().map(|r| self.count(*r)).sum()
    }

    /// Unshuffled role list, grouped in `Role::ALL` order.
    pub fn to_roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(self.total());
        for role in Role::ALL {
            roles.extend(std::iter::repeat(role).take(self.count(role)));
        }
        roles
    }
}

/// Shuffled role list for `player_count` seats.
pub fn assign_roles<R>(
    player_count: usize,
    set: &RoleSet,
    rng: &mut R,
) -> Result<Vec<Role>, ConfigError>
where
    R: Rng + ?Sized,
{
    let counts = RoleCounts::for_players(player_count, set)?;
    log::debug!("role counts for {player_count} players: {counts:?}");

    let mut roles = counts.to_roles();
    roles.shuffle(rng);
    Ok(roles)
}

/// Assign roles to players randomly
pub fn deal<R>(players: &[PlayerName], set: &RoleSet, rng: &mut R) -> Result<Assignment, Error>
where
    R: Rng + ?Sized,
{
    if players.iter().any(|p| p.trim().is_empty()) {
        return Err(NameError::Empty.into());
    }

    let roles = assign_roles(players.len(), set, rng)?;
    log::info!("dealt {} roles", roles.len());

    let seats = players
        .iter()
        .cloned()
        .zip(roles)
        .map(|(player, role)| Seat { player, role })
        .collect();
    Ok(Assignment::new(seats))
}
