//! Final reveal sequence
//!
//! At the end of the event the standings are disclosed one team at a time,
//! from last place to the winner. The sequence is armed by the operator and
//! each following step shows exactly one team. The ranking is captured on
//! the first step after arming and is not recomputed until the sequence is
//! armed again, so score changes during the ceremony cannot reorder it.

use serde::Serialize;

use crate::{Error, constants, leaderboard::Standing};

/// Current phase of the reveal sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum RevealState {
    /// No reveal has been requested
    #[default]
    NotStarted,
    /// Reveal requested but nothing shown yet
    Armed,
    /// Teams are being shown; `cursor` indexes the next team in `snapshot`
    InProgress {
        /// Index into `snapshot` of the next team to reveal
        cursor: usize,
        /// Ranking captured when the first team was shown
        snapshot: Vec<Standing>,
    },
    /// The winner has been shown
    Finished,
}

/// One disclosed team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealStep {
    /// The disclosed team with its place and score
    pub standing: Standing,
    /// Whether this step announced the winner and ended the sequence
    pub complete: bool,
}

/// Walks a ranking from last place to first
#[derive(Debug, Clone, Default, Serialize)]
pub struct RevealSequencer {
    state: RevealState,
}

impl RevealSequencer {
    /// Arms the sequence, discarding any progress
    pub fn start(&mut self) {
        self.state = RevealState::Armed;
    }

    /// Returns the sequence to its initial state
    pub fn clear(&mut self) {
        self.state = RevealState::NotStarted;
    }

    /// Reveals the next team
    ///
    /// `rank` is only called on the first step after [`start`](Self::start)
    /// to capture the ranking that the remainder of the sequence walks.
    ///
    /// # Errors
    ///
    /// * `Error::RevealNotStarted` - The sequence was never armed
    /// * `Error::RevealAlreadyFinished` - The winner was already shown
    /// * `Error::EmptyTeamSet` - The captured ranking is empty; the sequence
    ///   stays armed
    pub fn step<F: FnOnce() -> Vec<Standing>>(&mut self, rank: F) -> Result<RevealStep, Error> {
        match std::mem::take(&mut self.state) {
            RevealState::NotStarted => Err(Error::RevealNotStarted),
            RevealState::Finished => {
                self.state = RevealState::Finished;
                Err(Error::RevealAlreadyFinished)
            }
            RevealState::Armed => {
                let snapshot = rank();
                let Some(last) = snapshot.len().checked_sub(1) else {
                    self.state = RevealState::Armed;
                    return Err(Error::EmptyTeamSet);
                };
                Ok(self.reveal(last, snapshot))
            }
            RevealState::InProgress { cursor, snapshot } => Ok(self.reveal(cursor, snapshot)),
        }
    }

    fn reveal(&mut self, index: usize, snapshot: Vec<Standing>) -> RevealStep {
        let standing = snapshot[index].clone();

        let complete = if let Some(cursor) = index.checked_sub(1) {
            self.state = RevealState::InProgress { cursor, snapshot };
            false
        } else {
            self.state = RevealState::Finished;
            true
        };

        tracing::info!(
            position = standing.position,
            team = %standing.name,
            complete,
            "revealed team"
        );

        RevealStep { standing, complete }
    }

    /// Current phase
    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Index reported to the dashboard
    ///
    /// `-1` while no reveal is running (not started or finished), `-2` while
    /// armed, otherwise the index of the next team to reveal.
    pub fn final_index(&self) -> i64 {
        match &self.state {
            RevealState::NotStarted | RevealState::Finished => constants::reveal::INDEX_INACTIVE,
            RevealState::Armed => constants::reveal::INDEX_ARMED,
            RevealState::InProgress { cursor, .. } => *cursor as i64,
        }
    }

    /// Position of the team shown by the most recent step, if any
    pub fn last_revealed(&self) -> Option<usize> {
        match &self.state {
            RevealState::NotStarted | RevealState::Armed => None,
            RevealState::InProgress { cursor, .. } => Some(cursor + 2),
            RevealState::Finished => Some(1),
        }
    }
}
