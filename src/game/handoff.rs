use super::player::Role;
use super::{Game, GamePhase, GameState};
use serde::{Deserialize, Serialize};

/// Natural-language device handoff instructions,
/// consumed directly by the presentation layer's instruction banners.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct HandoffInstruction {
    /// Who should be holding the device.
    pub who: String,
    /// What they are expected to do with it.
    pub what: String,
    /// When the handoff should happen.
    pub when: String,
}

impl HandoffInstruction {
    fn group(what: &str, when: &str) -> Self {
        Self {
            who: "Everyone".to_string(),
            what: what.to_string(),
            when: when.to_string(),
        }
    }

    fn private(who: &str, what: &str) -> Self {
        Self {
            who: who.to_string(),
            what: what.to_string(),
            when: "As soon as the device is passed to you, away from the group".to_string(),
        }
    }
}

impl GamePhase {
    /// Phases in which the device must be passed player to player for a
    /// private action; in all other phases it stays in the middle of the group.
    pub fn requires_private_handoff(self) -> bool {
        matches!(
            self,
            GamePhase::RoleReveal | GamePhase::Night | GamePhase::Voting
        )
    }
}

impl Game {
    /// The player who should privately act next during the night, and the
    /// role they act as, following the narrative wake order: seer, then
    /// werewolves, then doctor. `None` once every living night role has
    /// submitted (or outside the night phase).
    pub fn night_turn(&self) -> Option<(usize, Role)> {
        let GameState::Night { submissions } = &self.state else {
            return None;
        };
        let pending = [
            (submissions.seer_target, Role::Seer),
            (submissions.werewolf_target, Role::Werewolf),
            (submissions.doctor_target, Role::Doctor),
        ];
        for (submitted, role) in pending {
            if submitted.is_none() {
                if let Some(idx) = self.find_living_role(role) {
                    return Some((idx, role));
                }
            }
        }
        None
    }

    /// Derives who should hold the device right now, what they should do,
    /// and when to pass it on.
    pub fn handoff_instruction(&self) -> HandoffInstruction {
        match &self.state {
            GameState::Setup { .. } => HandoffInstruction::group(
                "Gather around and enter every player's name",
                "Before the game begins",
            ),
            GameState::RoleReveal { acks } => {
                let next = (0..self.players.len()).find(|idx| !acks.has_seen(*idx));
                match next {
                    Some(idx) => HandoffInstruction::private(
                        &self.players[idx].name,
                        "Look at your secret role, then pass the device on",
                    ),
                    None => HandoffInstruction::group(
                        "Place the device back in the middle",
                        "Everyone has seen their role",
                    ),
                }
            }
            GameState::Night { .. } => match self.night_turn() {
                Some((idx, Role::Seer)) => HandoffInstruction::private(
                    &self.players[idx].name,
                    "Choose a player to investigate tonight",
                ),
                Some((idx, Role::Werewolf)) => HandoffInstruction::private(
                    &self.players[idx].name,
                    "Choose the pack's victim for tonight",
                ),
                Some((idx, _)) => HandoffInstruction::private(
                    &self.players[idx].name,
                    "Choose a player to protect tonight",
                ),
                None => HandoffInstruction::group(
                    "Place the device back in the middle and wake up",
                    "The night is over",
                ),
            },
            GameState::Day => HandoffInstruction::group(
                "Discuss who you suspect of being a werewolf",
                "Until the group is ready to vote",
            ),
            GameState::Voting { ballots } => {
                let next = self
                    .players
                    .iter()
                    .enumerate()
                    .find(|(idx, p)| p.alive && !ballots.has_cast(*idx));
                match next {
                    Some((_, player)) => HandoffInstruction::private(
                        &player.name,
                        "Cast your vote in private, then pass the device on",
                    ),
                    None => HandoffInstruction::group(
                        "All votes are in; reveal the result",
                        "The last vote has been cast",
                    ),
                }
            }
            GameState::Elimination { .. } => HandoffInstruction::group(
                "Reveal the result of the vote",
                "The device stays in the middle",
            ),
            GameState::GameOver(outcome) => HandoffInstruction::group(
                &format!("The game is over: {}. All roles are revealed", outcome.to_string()),
                "The device stays in the middle",
            ),
        }
    }
}
