use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game)
/// or [GameSession](crate::session::GameSession).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("player names must be 1 to 50 characters long")]
    InvalidPlayerName,
    #[error("another player already has this name")]
    DuplicatePlayerName,
    #[error("no player exists with the given name")]
    PlayerNotFound,
    #[error("invalid player index")]
    InvalidPlayerIndex,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("this player cannot be chosen for this action")]
    InvalidPlayerChoice,
    #[error("the doctor cannot protect the same player two nights in a row")]
    ConsecutiveProtection,
}
