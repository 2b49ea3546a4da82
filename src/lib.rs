//! A single-device, pass-and-play Werewolf rules engine.
//!
//! The engine is the rules core of a social deduction party game played on
//! one shared device: role assignment and balancing, phase progression,
//! night-action resolution, vote tallying with a configurable tie policy,
//! win-condition detection, and privacy-scoped information filtering so a
//! passed-around screen never leaks another player's role.
//!
//! The crate has no UI, no network, and no persistence; a presentation
//! layer drives it through [game::Game]'s operations (or a
//! [session::GameSession] when change notifications are wanted) and renders
//! the privacy-filtered views it hands back.

pub mod error;
pub mod game;
pub mod session;

pub use error::GameError;
pub use game::{Game, GameOptions, GameOutcome, GamePhase, TiePolicy};
pub use session::GameSession;
