use super::player::Role;
use super::visibility::{visible_info, PlayerInfo};
use super::votes::VoteOutcome;
use super::{Game, GameOutcome, GamePhase, GameState, HandoffInstruction};
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The group-visible view of the game, shown while the device sits in the
/// middle. Roles stay hidden until the game is over.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct BoardUpdate {
    pub phase: GamePhase,
    pub round: usize,
    pub players: Vec<PlayerInfo>,
    /// Who has voted this round, without revealing their choices.
    pub vote_status: Option<Vec<(String, bool)>>,
    /// The tally being revealed during the elimination phase.
    pub vote_result: Option<VoteAnnouncement>,
    pub last_night: Option<NightAnnouncement>,
    pub handoff: HandoffInstruction,
    pub outcome: Option<GameOutcome>,
}

/// The revealed result of a voting round.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct VoteAnnouncement {
    pub outcome: VoteOutcome,
    pub eliminated: Option<String>,
}

/// The morning announcement of a resolved night.
/// The seer's result is deliberately absent; it is private to the seer.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct NightAnnouncement {
    pub eliminated: Option<String>,
    pub survived_attack: bool,
}

/// The private view handed to a single player during a handoff.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlayerUpdate {
    pub name: String,
    /// `None` until roles have been assigned.
    pub role: Option<Role>,
    pub alive: bool,
    pub players: Vec<PlayerInfo>,
    pub prompt: Option<PlayerPrompt>,
}

/// What a player is expected to do with the device right now.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type")]
pub enum PlayerPrompt {
    RevealRole {
        role: Role,
    },
    ChooseInvestigation {
        options: Vec<String>,
    },
    InvestigationResult {
        target: String,
        is_werewolf: bool,
    },
    ChooseAttack {
        options: Vec<String>,
    },
    ChooseProtection {
        options: Vec<String>,
    },
    Vote {
        options: Vec<String>,
    },
    Dead,
    GameOver {
        outcome: GameOutcome,
        won: bool,
    },
}

impl Game {
    pub fn get_board_update(&self) -> BoardUpdate {
        let players = match &self.state {
            GameState::Setup { names } => names
                .iter()
                .map(|name| PlayerInfo {
                    name: name.clone(),
                    alive: true,
                    role: None,
                })
                .collect(),
            _ => {
                let reveal = self.game_over();
                self.players
                    .iter()
                    .map(|p| PlayerInfo {
                        name: p.name.clone(),
                        alive: p.alive,
                        role: reveal.then_some(p.role),
                    })
                    .collect()
            }
        };
        BoardUpdate {
            phase: self.phase(),
            round: self.round,
            players,
            vote_status: self.vote_status(),
            vote_result: match &self.state {
                GameState::Elimination { outcome, eliminated } => Some(VoteAnnouncement {
                    outcome: outcome.clone(),
                    eliminated: eliminated.map(|idx| self.players[idx].name.clone()),
                }),
                _ => None,
            },
            last_night: self.last_night.map(|night| NightAnnouncement {
                eliminated: night.eliminated.map(|idx| self.players[idx].name.clone()),
                survived_attack: night.survived_attack,
            }),
            handoff: self.handoff_instruction(),
            outcome: self.outcome(),
        }
    }

    pub fn get_player_update(&self, player: usize) -> Result<PlayerUpdate, GameError> {
        if let GameState::Setup { names } = &self.state {
            let name = names.get(player).ok_or(GameError::InvalidPlayerIndex)?;
            return Ok(PlayerUpdate {
                name: name.clone(),
                role: None,
                alive: true,
                players: names
                    .iter()
                    .map(|name| PlayerInfo {
                        name: name.clone(),
                        alive: true,
                        role: None,
                    })
                    .collect(),
                prompt: None,
            });
        }

        self.check_player_index(player)?;
        let viewer = &self.players[player];
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, subject)| visible_info(self.phase(), viewer, subject, idx == player))
            .collect();
        Ok(PlayerUpdate {
            name: viewer.name.clone(),
            role: Some(viewer.role),
            alive: viewer.alive,
            players,
            prompt: self.get_player_prompt(player),
        })
    }

    fn get_player_prompt(&self, player_idx: usize) -> Option<PlayerPrompt> {
        let player = &self.players[player_idx];

        // Dead players can't perform any actions
        if !player.alive && !self.game_over() {
            return Some(PlayerPrompt::Dead);
        }

        match &self.state {
            GameState::Setup { .. } => None,

            GameState::RoleReveal { acks } => (!acks.has_seen(player_idx))
                .then_some(PlayerPrompt::RevealRole { role: player.role }),

            GameState::Night { submissions } => {
                if let Some((_, role)) = self.night_turn() {
                    if player.role == role {
                        return Some(match role {
                            Role::Seer => PlayerPrompt::ChooseInvestigation {
                                options: self.living_names(),
                            },
                            Role::Werewolf => PlayerPrompt::ChooseAttack {
                                options: self.attack_options(),
                            },
                            _ => PlayerPrompt::ChooseProtection {
                                options: self.protection_options(),
                            },
                        });
                    }
                }
                // The seer learns their result as soon as they have chosen
                if player.role == Role::Seer {
                    if let Some(target) = submissions.seer_target {
                        return Some(PlayerPrompt::InvestigationResult {
                            target: self.players[target].name.clone(),
                            is_werewolf: self.players[target].role == Role::Werewolf,
                        });
                    }
                }
                None
            }

            GameState::Day => {
                if player.role == Role::Seer {
                    if let Some(result) = self.last_night.and_then(|night| night.seer_result) {
                        return Some(PlayerPrompt::InvestigationResult {
                            target: self.players[result.target].name.clone(),
                            is_werewolf: result.is_werewolf,
                        });
                    }
                }
                None
            }

            GameState::Voting { ballots } => {
                (!ballots.has_cast(player_idx)).then(|| PlayerPrompt::Vote {
                    options: self.living_names(),
                })
            }

            GameState::Elimination { .. } => None,

            GameState::GameOver(outcome) => Some(PlayerPrompt::GameOver {
                outcome: *outcome,
                won: self.player_has_won(player_idx).unwrap_or(false),
            }),
        }
    }

    fn living_names(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.name.clone())
            .collect()
    }

    /// The werewolves may not attack one of their own.
    fn attack_options(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.alive && p.role != Role::Werewolf)
            .map(|p| p.name.clone())
            .collect()
    }

    /// The doctor may protect anyone living, themselves included,
    /// except the previous night's target.
    fn protection_options(&self) -> Vec<String> {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, p)| p.alive && self.last_protected != Some(*idx))
            .map(|(_, p)| p.name.clone())
            .collect()
    }
}
