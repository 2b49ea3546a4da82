use self::acknowledgements::RoleAcknowledgements;
pub use self::handoff::HandoffInstruction;
pub use self::night::{NightOutcome, NightSubmissions, SeerResult};
pub use self::options::{GameOptions, TiePolicy};
pub use self::player::{assign_roles, EliminationReason, Player, Role, RoleDistribution, Team};
pub use self::update::{
    BoardUpdate, NightAnnouncement, PlayerPrompt, PlayerUpdate, VoteAnnouncement,
};
pub use self::visibility::PlayerInfo;
pub use self::votes::VoteOutcome;
use self::visibility::visible_info;
use self::votes::Ballots;
use crate::error::GameError;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

mod acknowledgements;
mod handoff;
mod night;
mod options;
mod player;
mod update;
mod visibility;
mod votes;

/// A single pass-and-play game of Werewolf.
///
/// The `Game` exclusively owns all mutable session state; every operation
/// validates its preconditions before mutating anything, and rule violations
/// are reported back to the caller as a [GameError] rather than a panic.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game {
    opts: GameOptions,
    players: Vec<Player>,
    state: GameState,
    current_player: usize,
    round: usize,
    last_protected: Option<usize>,
    last_night: Option<NightOutcome>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Serialize, Deserialize, Debug)]
enum GameState {
    Setup {
        names: Vec<String>,
    },
    RoleReveal {
        acks: RoleAcknowledgements,
    },
    Night {
        submissions: NightSubmissions,
    },
    Day,
    Voting {
        ballots: Ballots,
    },
    Elimination {
        outcome: VoteOutcome,
        eliminated: Option<usize>,
    },
    GameOver(GameOutcome),
}

/// The flat phase identifier exposed to the presentation layer.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum GamePhase {
    Setup,
    RoleReveal,
    Night,
    Day,
    Voting,
    Elimination,
    GameOver,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    /// Every werewolf has been eliminated.
    VillagersWin,
    /// The werewolves equal or outnumber the surviving villager team.
    WerewolvesWin,
}

impl ToString for GameOutcome {
    fn to_string(&self) -> String {
        match self {
            GameOutcome::VillagersWin => "VillagersWin",
            GameOutcome::WerewolvesWin => "WerewolvesWin",
        }
        .to_string()
    }
}

/// Evaluates the win conditions against the living role counts.
/// Returns `None` while the game should continue.
pub fn evaluate_win(
    alive_werewolves: usize,
    alive_villager_team: usize,
) -> Option<GameOutcome> {
    if alive_werewolves == 0 {
        Some(GameOutcome::VillagersWin)
    } else if alive_werewolves >= alive_villager_team {
        Some(GameOutcome::WerewolvesWin)
    } else {
        None
    }
}

impl Game {
    /// Creates a new game in the setup phase with an empty roster.
    pub fn new(opts: GameOptions, seed: u64) -> Self {
        Game {
            opts,
            players: vec![],
            state: GameState::Setup { names: vec![] },
            current_player: 0,
            round: 0,
            last_protected: None,
            last_night: None,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The current phase of the game.
    pub fn phase(&self) -> GamePhase {
        match &self.state {
            GameState::Setup { .. } => GamePhase::Setup,
            GameState::RoleReveal { .. } => GamePhase::RoleReveal,
            GameState::Night { .. } => GamePhase::Night,
            GameState::Day => GamePhase::Day,
            GameState::Voting { .. } => GamePhase::Voting,
            GameState::Elimination { .. } => GamePhase::Elimination,
            GameState::GameOver(_) => GamePhase::GameOver,
        }
    }

    /// Adds a player during setup. Names are trimmed and must be unique
    /// case-insensitively among the roster.
    pub fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        let GameState::Setup { names } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 50 {
            return Err(GameError::InvalidPlayerName);
        }
        if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return Err(GameError::DuplicatePlayerName);
        }
        if names.len() >= RoleDistribution::MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        names.push(name.to_string());
        Ok(())
    }

    /// Adds several players during setup. Stops at the first invalid name.
    pub fn add_players(&mut self, names: &[&str]) -> Result<(), GameError> {
        for name in names {
            self.add_player(name)?;
        }
        Ok(())
    }

    /// Assigns roles and begins the role reveal round.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        let GameState::Setup { names } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        let names = names.clone();
        let roles = assign_roles(names.len(), &mut self.rng)?;
        self.players = names
            .into_iter()
            .zip(roles)
            .map(|(name, role)| Player::new(name, role))
            .collect();
        self.current_player = 0;
        self.state = GameState::RoleReveal {
            acks: RoleAcknowledgements::new(self.players.len()),
        };
        log::info!(
            "game started with {} players; beginning role reveal",
            self.players.len()
        );
        Ok(())
    }

    /// Called when a player has privately viewed their role.
    /// The night begins automatically once every player has done so.
    pub fn acknowledge_role(&mut self, player: usize) -> Result<(), GameError> {
        self.check_player_index(player)?;
        let GameState::RoleReveal { acks } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        let all_seen = acks.mark_seen(player);
        if all_seen {
            self.begin_night();
        }
        Ok(())
    }

    /// Drives the phase state machine one step, applying the transition
    /// guards of each phase. Returns `InvalidAction` without mutating
    /// anything when the current phase is not ready to end.
    pub fn advance_phase(&mut self) -> Result<(), GameError> {
        match &self.state {
            GameState::Setup { .. } => Err(GameError::InvalidAction),
            GameState::RoleReveal { acks } => {
                if !acks.complete() {
                    return Err(GameError::InvalidAction);
                }
                self.begin_night();
                Ok(())
            }
            GameState::Night { submissions } => {
                if self.night_turn().is_some() {
                    return Err(GameError::InvalidAction);
                }
                let submissions = *submissions;
                self.end_night(submissions);
                Ok(())
            }
            GameState::Day => {
                if self.num_players_alive() < 2 {
                    return Err(GameError::InvalidAction);
                }
                self.current_player = self.first_alive();
                self.state = GameState::Voting {
                    ballots: Ballots::new(),
                };
                log::info!("day {} discussion closed; voting begins", self.round);
                Ok(())
            }
            GameState::Voting { ballots } => {
                if ballots.count() < self.num_players_alive() {
                    return Err(GameError::InvalidAction);
                }
                let outcome = ballots.tally();
                self.end_voting(outcome);
                Ok(())
            }
            GameState::Elimination { .. } => {
                if !self.check_game_over() {
                    self.begin_night();
                }
                Ok(())
            }
            GameState::GameOver(_) => Err(GameError::InvalidAction),
        }
    }

    /// Starts a new night round. Submissions from the previous night are
    /// discarded; the doctor's previous target is retained to enforce the
    /// no-consecutive-protection rule.
    fn begin_night(&mut self) {
        self.round += 1;
        self.state = GameState::Night {
            submissions: NightSubmissions::new(),
        };
        log::info!("night {} begins", self.round);
    }

    /// Resolves the night once all submissions are in, then either ends the
    /// game immediately or proceeds to the day discussion.
    fn end_night(&mut self, submissions: NightSubmissions) {
        let roles: Vec<Role> = self.players.iter().map(|p| p.role).collect();
        let outcome = submissions.resolve(&roles);
        self.last_protected = submissions.doctor_target;
        self.last_night = Some(outcome);

        if let Some(victim) = outcome.eliminated {
            self.players[victim].eliminate(EliminationReason::WerewolfKill);
            log::info!("{} was eliminated during the night", self.players[victim].name);
            if self.check_game_over() {
                return;
            }
        }
        self.state = GameState::Day;
    }

    /// Applies the vote tally and the configured tie policy, eliminating a
    /// player where the round produced one.
    fn end_voting(&mut self, outcome: VoteOutcome) {
        let eliminated = match &outcome {
            VoteOutcome::Decided(target) => Some(*target),
            VoteOutcome::Tied(candidates) => match self.opts.tie_policy {
                TiePolicy::RandomElimination if !candidates.is_empty() => {
                    Some(candidates[self.rng.gen_range(0..candidates.len())])
                }
                _ => None,
            },
        };
        if let Some(target) = eliminated {
            self.players[target].eliminate(EliminationReason::Voting);
            log::info!("{} was voted out", self.players[target].name);
        }
        self.state = GameState::Elimination {
            outcome,
            eliminated,
        };
    }

    /// Called during the night when the seer chooses who to investigate.
    pub fn record_seer_choice(&mut self, player: usize, target: usize) -> Result<(), GameError> {
        self.check_night_action(player, target, Role::Seer)?;
        if let GameState::Night { submissions } = &mut self.state {
            submissions.seer_target = Some(target);
        }
        Ok(())
    }

    /// Called during the night when a werewolf chooses who to attack.
    /// One living werewolf submits on behalf of the pack; the pack may not
    /// target one of its own.
    pub fn record_werewolf_choice(
        &mut self,
        player: usize,
        target: usize,
    ) -> Result<(), GameError> {
        self.check_night_action(player, target, Role::Werewolf)?;
        if self.players[target].role == Role::Werewolf {
            return Err(GameError::InvalidPlayerChoice);
        }
        if let GameState::Night { submissions } = &mut self.state {
            submissions.werewolf_target = Some(target);
        }
        Ok(())
    }

    /// Called during the night when the doctor chooses who to protect.
    /// The same player may not be protected two nights in a row.
    pub fn record_doctor_choice(
        &mut self,
        player: usize,
        target: usize,
    ) -> Result<(), GameError> {
        self.check_night_action(player, target, Role::Doctor)?;
        if self.last_protected == Some(target) {
            return Err(GameError::ConsecutiveProtection);
        }
        if let GameState::Night { submissions } = &mut self.state {
            submissions.doctor_target = Some(target);
        }
        Ok(())
    }

    /// Validates a night submission: the game must be in its night phase,
    /// the actor a living player of the given role, and the target a living
    /// player. The phase guard runs first so that out-of-phase calls fail
    /// with `InvalidAction` regardless of the choice itself.
    fn check_night_action(
        &self,
        player: usize,
        target: usize,
        role: Role,
    ) -> Result<(), GameError> {
        if !matches!(self.state, GameState::Night { .. }) {
            return Err(GameError::InvalidAction);
        }
        self.check_player_index(player)?;
        self.check_player_index(target)?;
        if !self.players[player].alive || self.players[player].role != role {
            return Err(GameError::InvalidAction);
        }
        if !self.players[target].alive {
            return Err(GameError::InvalidPlayerChoice);
        }
        Ok(())
    }

    /// Called when a living player casts their elimination vote.
    /// Re-voting while the round is open replaces the earlier ballot;
    /// voting for oneself is valid.
    pub fn record_vote(&mut self, voter: usize, target: usize) -> Result<(), GameError> {
        self.check_player_index(voter)?;
        self.check_player_index(target)?;
        if !self.players[voter].alive {
            return Err(GameError::InvalidAction);
        }
        if !self.players[target].alive {
            return Err(GameError::InvalidPlayerChoice);
        }
        let GameState::Voting { ballots } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        ballots.cast(voter, target);
        Ok(())
    }

    /// Eliminates a player by name, outside the normal night/vote flow.
    /// Idempotent: returns `false` for unknown or already dead players, or
    /// once the game is over, and leaves the game untouched.
    pub fn eliminate_player(&mut self, name: &str) -> bool {
        if self.game_over() {
            return false;
        }
        let Ok(idx) = self.find_player(name) else {
            return false;
        };
        if !self.players[idx].alive {
            return false;
        }
        self.players[idx].eliminate(EliminationReason::Unknown);
        log::info!("{} was eliminated", self.players[idx].name);
        self.check_game_over();
        true
    }

    /// Checks the win conditions, ending the game if one holds.
    fn check_game_over(&mut self) -> bool {
        let outcome = evaluate_win(self.alive_werewolves(), self.alive_villager_team());
        if let Some(outcome) = outcome {
            log::info!("game over: {}", outcome.to_string());
            self.state = GameState::GameOver(outcome);
            return true;
        }
        false
    }

    /// Cycles the device holder to the next living player, wrapping around.
    /// Used during the sequential private-handoff phases.
    pub fn advance_current_player(&mut self) {
        self.current_player = self.next_player(self.current_player);
    }

    /// The player currently expected to be holding the device.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Gets the player names, in seating order.
    pub fn player_names(&self) -> Vec<String> {
        match &self.state {
            GameState::Setup { names } => names.clone(),
            _ => self.players.iter().map(|p| p.name.clone()).collect(),
        }
    }

    /// Finds a player with the given name; identity is by trimmed,
    /// case-insensitive name.
    pub fn find_player(&self, name: &str) -> Result<usize, GameError> {
        let name = name.trim();
        self.players
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or(GameError::PlayerNotFound)
    }

    /// Gets a player's role. Unfiltered: intended for the player's own
    /// private reveal; use [Game::visible_player_info] for everything else.
    pub fn player_role(&self, name: &str) -> Result<Role, GameError> {
        self.find_player(name).map(|idx| self.players[idx].role)
    }

    /// The privacy-filtered view of `subject` as seen by `viewer`.
    pub fn visible_player_info(
        &self,
        subject: usize,
        viewer: usize,
    ) -> Result<PlayerInfo, GameError> {
        self.check_player_index(subject)?;
        self.check_player_index(viewer)?;
        Ok(visible_info(
            self.phase(),
            &self.players[viewer],
            &self.players[subject],
            subject == viewer,
        ))
    }

    /// Who has voted so far this round, without revealing their choices.
    /// `None` outside the voting phase.
    pub fn vote_status(&self) -> Option<Vec<(String, bool)>> {
        let GameState::Voting { ballots } = &self.state else {
            return None;
        };
        Some(
            self.players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.alive)
                .map(|(idx, p)| (p.name.clone(), ballots.has_cast(idx)))
                .collect(),
        )
    }

    /// The announced outcome of the most recent night, if any.
    pub fn last_night(&self) -> Option<&NightOutcome> {
        self.last_night.as_ref()
    }

    /// The terminal outcome, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match &self.state {
            GameState::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Returns true if the game has started and has not yet finished.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.state,
            GameState::Setup { .. } | GameState::GameOver(_)
        )
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    /// Returns whether a particular player is on the winning team.
    /// `Ok(false)` while the game is still in progress.
    pub fn player_has_won(&self, player: usize) -> Result<bool, GameError> {
        self.check_player_index(player)?;
        let GameState::GameOver(outcome) = self.state else {
            return Ok(false);
        };
        let team = self.players[player].team();
        Ok(match outcome {
            GameOutcome::VillagersWin => team == Team::Villagers,
            GameOutcome::WerewolvesWin => team == Team::Werewolves,
        })
    }

    /// The night number, starting at 1 for the first night.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        match &self.state {
            GameState::Setup { names } => names.len(),
            _ => self.players.len(),
        }
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Gets the number of living werewolves.
    pub fn alive_werewolves(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.alive && p.role == Role::Werewolf)
            .count()
    }

    /// Gets the number of living villager-team players.
    pub fn alive_villager_team(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.alive && p.team() == Team::Villagers)
            .count()
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.players.len() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerIndex)
        }
    }

    /// Finds the next alive player, wrapping around the roster.
    fn next_player(&self, player: usize) -> usize {
        (player + 1..self.players.len())
            .chain(0..player)
            .find(|idx| self.players[*idx].alive)
            .unwrap_or(player)
    }

    /// The first living player in seating order.
    fn first_alive(&self) -> usize {
        self.players
            .iter()
            .position(|p| p.alive)
            .unwrap_or(0)
    }

    /// Finds the first living player with the given role.
    fn find_living_role(&self, role: Role) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.alive && p.role == role)
    }
}
