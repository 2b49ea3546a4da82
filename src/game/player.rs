use crate::error::GameError;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub name: String,
    pub role: Role,
    pub alive: bool,
    pub eliminated_by: Option<EliminationReason>,
    pub eliminated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    Villager,
    Werewolf,
    Seer,
    Doctor,
}

/// The team a role wins with; the seer and doctor count as villagers.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Team {
    Villagers,
    Werewolves,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum EliminationReason {
    WerewolfKill,
    Voting,
    Unknown,
}

impl Role {
    pub fn team(self) -> Team {
        match self {
            Role::Werewolf => Team::Werewolves,
            Role::Villager | Role::Seer | Role::Doctor => Team::Villagers,
        }
    }

    pub fn has_night_action(self) -> bool {
        self.night_priority().is_some()
    }

    /// The narrative order in which roles are woken at night.
    /// Resolution itself is atomic once all submissions are in.
    pub fn night_priority(self) -> Option<u8> {
        match self {
            Role::Seer => Some(1),
            Role::Werewolf => Some(2),
            Role::Doctor => Some(3),
            Role::Villager => None,
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Villager => "Villager",
            Role::Werewolf => "Werewolf",
            Role::Seer => "Seer",
            Role::Doctor => "Doctor",
        }
        .to_string()
    }
}

impl Player {
    pub fn new(name: String, role: Role) -> Self {
        Self {
            name,
            role,
            alive: true,
            eliminated_by: None,
            eliminated_at: None,
        }
    }

    pub fn team(&self) -> Team {
        self.role.team()
    }

    /// Marks the player as eliminated. Has no effect on an already dead player.
    pub fn eliminate(&mut self, reason: EliminationReason) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.eliminated_by = Some(reason);
        self.eliminated_at = Some(Utc::now());
    }
}

/// The balanced role counts for a given number of players.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoleDistribution {
    pub werewolves: usize,
    pub seers: usize,
    pub doctors: usize,
    pub villagers: usize,
}

impl RoleDistribution {
    pub const MIN_PLAYERS: usize = 3;
    pub const MAX_PLAYERS: usize = 12;

    /// Gets the role distribution for the given number of players.
    /// Every game has exactly one seer and one doctor; the werewolf count
    /// keeps them strictly outnumbered at roughly a 20-40% share.
    pub fn for_player_count(num_players: usize) -> Result<Self, GameError> {
        if num_players < Self::MIN_PLAYERS {
            return Err(GameError::TooFewPlayers);
        }
        if num_players > Self::MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        let werewolves = match num_players {
            3..=5 => 1,
            6..=8 => 2,
            9..=11 => 3,
            _ => 4,
        };
        Ok(Self {
            werewolves,
            seers: 1,
            doctors: 1,
            villagers: num_players - werewolves - 2,
        })
    }

    pub fn total(&self) -> usize {
        self.werewolves + self.seers + self.doctors + self.villagers
    }

    pub fn villager_team(&self) -> usize {
        self.seers + self.doctors + self.villagers
    }
}

/// Builds the role multiset for `num_players` and deals it out in random order.
/// Every player receives exactly one role and the counts match the
/// distribution table exactly.
pub fn assign_roles(
    num_players: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<Role>, GameError> {
    let dist = RoleDistribution::for_player_count(num_players)?;
    let mut roles = Vec::with_capacity(num_players);
    roles.extend(std::iter::repeat(Role::Werewolf).take(dist.werewolves));
    roles.extend(std::iter::repeat(Role::Seer).take(dist.seers));
    roles.extend(std::iter::repeat(Role::Doctor).take(dist.doctors));
    roles.extend(std::iter::repeat(Role::Villager).take(dist.villagers));
    roles.shuffle(rng);
    Ok(roles)
}
