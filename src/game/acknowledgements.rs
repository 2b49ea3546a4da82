use serde::{Deserialize, Serialize};

/// Tracks which players have privately viewed their role during the reveal
/// round. The first night cannot begin until the device has made a full
/// circuit of the roster.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RoleAcknowledgements {
    seen: Vec<bool>,
}

impl RoleAcknowledgements {
    /// Starts a fresh reveal round for a roster of `num_players`.
    pub fn new(num_players: usize) -> Self {
        Self {
            seen: vec![false; num_players],
        }
    }

    /// Whether the given player has viewed their role yet.
    pub fn has_seen(&self, player_idx: usize) -> bool {
        self.seen[player_idx]
    }

    /// Records that a player has viewed their role,
    /// and returns `true` iff the whole roster has now done so.
    pub fn mark_seen(&mut self, player_idx: usize) -> bool {
        self.seen[player_idx] = true;
        self.complete()
    }

    /// Returns `true` iff every player has viewed their role.
    pub fn complete(&self) -> bool {
        self.seen.iter().all(|seen| *seen)
    }
}
