use serde::{Deserialize, Serialize};

/// Options for customising a game of Werewolf.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default)]
pub struct GameOptions {
    /// How a tied day vote is resolved.
    pub tie_policy: TiePolicy,
}

/// What happens when two or more players share the maximum vote count.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub enum TiePolicy {
    /// One of the tied candidates is eliminated, chosen uniformly at random.
    #[default]
    RandomElimination,
    /// Nobody is eliminated; play proceeds to the next night.
    NoElimination,
}
