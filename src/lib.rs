//! # Gridboard Scoreboard Library
//!
//! This library provides the core state for a live event scoreboard. An
//! operator adjusts team scores and drives the event through chat commands,
//! while a read-only dashboard polls the same state. The crate owns the
//! team registry, alias resolution, rankings, the last-to-first final
//! reveal, the round counter and the timed round-animation latch.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constants;

pub mod aliases;
pub mod animation;
pub mod command;
pub mod leaderboard;
pub mod reveal;
pub mod round;
pub mod scoreboard;
pub mod session;
pub mod teams;

/// Alarm messages for timed events
///
/// The host schedules these through the callback handed to operations that
/// start a timer, and delivers them back to
/// [`Scoreboard::receive_alarm`](scoreboard::Scoreboard::receive_alarm)
/// once the requested duration has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Round animation latch alarms
    Animation(animation::AlarmMessage),
}

/// Conditions reported back to the operator
///
/// None of these are fatal. Some are failures of the requested operation
/// (an unknown team, a malformed number) and some are boundary conditions
/// that leave the state untouched, see [`Error::is_informational`].
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The name, alias or id did not resolve to any team
    #[error("team «{query}» not found")]
    TeamNotFound {
        /// The text the operator supplied
        query: String,
        /// Every valid `(id, name)` pair, in registry order
        available: Vec<(u32, String)>,
    },
    /// The supplied points value is not an integer
    #[error("points must be an integer, got «{0}»")]
    InvalidScoreDelta(String),
    /// The operation needs at least one team
    #[error("no teams are defined")]
    EmptyTeamSet,
    /// More teams were supplied than a single setup accepts
    #[error("at most {max} teams are allowed, got {count}")]
    TooManyTeams {
        /// Number of definitions supplied
        count: usize,
        /// Upper bound on definitions
        max: usize,
    },
    /// A team definition line failed validation
    #[error("team definition {line} is invalid: {reason}")]
    InvalidTeamDefinition {
        /// 1-based position of the definition in the setup
        line: usize,
        /// Human readable explanation
        reason: String,
    },
    /// The round counter already reached its last round
    #[error("already at the last round ({max})")]
    RoundAtMaximum {
        /// The configured number of rounds
        max: u32,
    },
    /// A reveal step was requested before the reveal was armed
    #[error("the final reveal has not been started")]
    RevealNotStarted,
    /// A reveal step was requested after the winner was announced
    #[error("the final reveal is already finished")]
    RevealAlreadyFinished,
    /// The operator text does not name a known command
    #[error("unknown command «{0}»")]
    UnknownCommand(String),
    /// The command is missing required arguments
    #[error("missing arguments, usage: {usage}")]
    MissingArgument {
        /// Expected usage of the command
        usage: String,
    },
}

impl Error {
    /// Whether this is a boundary condition rather than a failure
    ///
    /// Informational conditions describe a state the operator should know
    /// about (the last round, a reveal that has not started or has ended)
    /// and never indicate bad input.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Self::RoundAtMaximum { .. } | Self::RevealNotStarted | Self::RevealAlreadyFinished
        )
    }

    /// Converts the error to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
