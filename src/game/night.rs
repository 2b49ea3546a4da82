use super::player::Role;
use serde::{Deserialize, Serialize};

/// The private target submissions collected during one night round.
/// Cleared when each new night begins.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default)]
pub struct NightSubmissions {
    pub werewolf_target: Option<usize>,
    pub seer_target: Option<usize>,
    pub doctor_target: Option<usize>,
}

/// The seer's private investigation result.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct SeerResult {
    pub target: usize,
    pub is_werewolf: bool,
}

/// The resolved outcome of one night round.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct NightOutcome {
    pub eliminated: Option<usize>,
    pub survived_attack: bool,
    pub seer_result: Option<SeerResult>,
}

impl NightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the night atomically once all submissions are in.
    ///
    /// The investigation has no bearing on the elimination. The werewolf
    /// attack fails iff the doctor protected the same player; with no
    /// werewolf target submitted nobody dies. Doctor submission validity
    /// (the no-consecutive-protection rule) is checked at submission time,
    /// not here.
    pub fn resolve(&self, roles: &[Role]) -> NightOutcome {
        let seer_result = self.seer_target.map(|target| SeerResult {
            target,
            is_werewolf: roles[target] == Role::Werewolf,
        });

        let (eliminated, survived_attack) = match self.werewolf_target {
            Some(target) if self.doctor_target == Some(target) => (None, true),
            Some(target) => (Some(target), false),
            None => (None, false),
        };

        NightOutcome {
            eliminated,
            survived_attack,
            seer_result,
        }
    }
}
