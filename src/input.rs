use crate::error::{ConfigError, Error, NameError, Result};
use crate::game::role::MIN_PLAYERS;
use crate::types::PlayerName;
use std::collections::HashSet;

/// Characters that cannot appear in a player's file name.
pub const INVALID_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Upper bound on up-front allocation; the count comes from user input.
const RESERVE_LIMIT: usize = 64;

pub fn parse_player_count(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let count = trimmed
        .parse::<usize>()
        .map_err(|_| Error::NotANumber(trimmed.to_string()))?;
    if count < MIN_PLAYERS {
        return Err(ConfigError::TooFewPlayers {
            given: count,
            min: MIN_PLAYERS,
        }
        .into());
    }
    Ok(count)
}

/// Player names collected so far. Names are unique ignoring case.
#[derive(Debug, Default)]
pub struct Roster {
    names: Vec<PlayerName>,
    seen: HashSet<String>,
}

impl Roster {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(RESERVE_LIMIT);
        Self {
            names: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn from_names<I, S>(names: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Roster::default();
        for name in names {
            roster.push(name.as_ref())?;
        }
        Ok(roster)
    }

    /// Check a raw name without adding it. Returns the trimmed name.
    pub fn check<'a>(&self, raw: &'a str) -> Result<&'a str, NameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.contains(INVALID_NAME_CHARS) || name.contains(char::is_control) {
            return Err(NameError::InvalidCharacters(name.to_string()));
        }
        if self.seen.contains(&name.to_lowercase()) {
            return Err(NameError::Duplicate(name.to_string()));
        }
        Ok(name)
    }

    pub fn push(&mut self, raw: &str) -> Result<(), NameError> {
        let name = self.check(raw)?.to_string();
        self.seen.insert(name.to_lowercase());
        self.names.push(name);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[PlayerName] {
        &self.names
    }

    pub fn into_names(self) -> Vec<PlayerName> {
        self.names
    }
}
