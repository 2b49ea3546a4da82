use crate::error::GameError;
use crate::game::{Game, GameOptions};
use rand::RngCore;
use serde_json::{json, Value};

/// A callback invoked with a freshly serialized snapshot of the game
/// after every successful mutation.
pub type Listener = Box<dyn FnMut(&Value)>;

/// A single play-through of the game.
///
/// The session exclusively owns one [Game] for its lifetime; it is
/// constructed at the start of a play-through and discarded (never
/// persisted) at the end. Mutations go through [GameSession::mutate] so
/// that every subscriber is notified of the resulting state; a UI layer
/// that prefers polling can read through [GameSession::game] instead.
pub struct GameSession {
    game: Game,
    listeners: Vec<Listener>,
}

impl GameSession {
    /// Creates a session with a fresh game in its setup phase.
    pub fn new(opts: GameOptions) -> Self {
        let seed = rand::thread_rng().next_u64();
        Self {
            game: Game::new(opts, seed),
            listeners: vec![],
        }
    }

    /// Creates a session with a fixed RNG seed, for replayable games.
    pub fn with_seed(opts: GameOptions, seed: u64) -> Self {
        Self {
            game: Game::new(opts, seed),
            listeners: vec![],
        }
    }

    /// Read access to the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Registers a listener, which immediately receives the current state.
    pub fn subscribe(&mut self, listener: impl FnMut(&Value) + 'static) {
        self.listeners.push(Box::new(listener));
        self.notify();
    }

    /// Performs an action on the game. Listeners are notified only if the
    /// action succeeds; a failed action leaves the game untouched.
    pub fn mutate<F>(&mut self, mutation: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        mutation(&mut self.game)?;
        self.notify();
        Ok(())
    }

    /// Discards the current game and starts over in the setup phase.
    pub fn reset(&mut self, opts: GameOptions) {
        let seed = rand::thread_rng().next_u64();
        self.game = Game::new(opts, seed);
        self.notify();
    }

    /// Serializes the board view and every per-player private view,
    /// and hands the payload to each listener.
    fn notify(&mut self) {
        let board = serde_json::to_value(self.game.get_board_update()).unwrap_or(Value::Null);
        let players = (0..self.game.num_players())
            .map(|idx| {
                self.game
                    .get_player_update(idx)
                    .ok()
                    .and_then(|update| serde_json::to_value(update).ok())
                    .unwrap_or(Value::Null)
            })
            .collect::<Vec<_>>();
        let payload = json!({ "board": board, "players": players });
        for listener in self.listeners.iter_mut() {
            listener(&payload);
        }
    }
}
