use super::player::RoleDistribution;
use serde::{Deserialize, Serialize};

/// Tracks each voter's chosen elimination target for one voting round.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct Ballots {
    ballots: [Option<usize>; RoleDistribution::MAX_PLAYERS],
}

/// The result of counting a round of ballots.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum VoteOutcome {
    /// A single player received the most votes.
    Decided(usize),
    /// Two or more players share the maximum vote count,
    /// or no votes were cast at all (empty candidate set).
    Tied(Vec<usize>),
}

impl Ballots {
    /// Creates a new `Ballots` with no votes cast.
    pub fn new() -> Self {
        Self {
            ballots: [None; RoleDistribution::MAX_PLAYERS],
        }
    }

    /// Returns whether the given player has cast their vote.
    pub fn has_cast(&self, voter_idx: usize) -> bool {
        self.ballots[voter_idx].is_some()
    }

    /// Records a vote. Voting again while the round is open replaces the earlier ballot.
    pub fn cast(&mut self, voter_idx: usize, target_idx: usize) {
        self.ballots[voter_idx] = Some(target_idx);
    }

    /// The number of ballots cast so far.
    pub fn count(&self) -> usize {
        self.ballots.iter().filter(|b| b.is_some()).count()
    }

    /// Counts the ballots. Candidates sharing the maximum count produce a tie;
    /// a round with no ballots at all ties with an empty candidate set.
    pub fn tally(&self) -> VoteOutcome {
        let mut counts = [0usize; RoleDistribution::MAX_PLAYERS];
        for target in self.ballots.iter().flatten() {
            counts[*target] += 1;
        }

        let max_votes = counts.iter().copied().max().unwrap_or(0);
        if max_votes == 0 {
            return VoteOutcome::Tied(vec![]);
        }

        let top: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == max_votes)
            .map(|(idx, _)| idx)
            .collect();

        match top.as_slice() {
            [single] => VoteOutcome::Decided(*single),
            _ => VoteOutcome::Tied(top),
        }
    }
}

impl Default for Ballots {
    fn default() -> Self {
        Self::new()
    }
}
