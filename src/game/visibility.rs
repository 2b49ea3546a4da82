use super::player::{Player, Role};
use super::GamePhase;
use serde::{Deserialize, Serialize};

/// What one player is allowed to see about another on a shared device.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PlayerInfo {
    pub name: String,
    pub alive: bool,
    /// `None` whenever the viewer is not allowed to see the subject's role.
    pub role: Option<Role>,
}

/// Whether a viewer may see a subject's role, in rule priority order:
/// players always see their own role; everything is revealed at game over;
/// werewolves recognize each other during the night; everything else is hidden.
///
/// Total and stateless, so it can be re-derived at any point from current
/// state and checked against arbitrary `(phase, viewer, subject)` tuples.
pub fn role_visible(
    phase: GamePhase,
    same_player: bool,
    viewer_role: Role,
    subject_role: Role,
) -> bool {
    if same_player {
        return true;
    }
    if phase == GamePhase::GameOver {
        return true;
    }
    phase == GamePhase::Night
        && viewer_role == Role::Werewolf
        && subject_role == Role::Werewolf
}

/// Builds the privacy-filtered view of `subject` as seen by `viewer`.
/// Liveness is always visible regardless of phase or viewer.
pub fn visible_info(
    phase: GamePhase,
    viewer: &Player,
    subject: &Player,
    same_player: bool,
) -> PlayerInfo {
    let show_role = role_visible(phase, same_player, viewer.role, subject.role);
    PlayerInfo {
        name: subject.name.clone(),
        alive: subject.alive,
        role: show_role.then_some(subject.role),
    }
}
