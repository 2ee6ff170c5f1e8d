//! Operator commands
//!
//! The chat front end hands the core typed [`Command`] values. This module
//! also decodes the raw text an operator types (`/add ferrari 5`) into those
//! values, so a dispatcher only has to forward messages.

use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Error, teams::TeamDefinition};

/// Usage lines for every command, in the order they are listed to operators
pub const USAGE: &[(&str, &str)] = &[
    ("/add <team> <points>", "change a team's score"),
    ("/table", "show the current ranking"),
    ("/reset", "set every score to zero"),
    ("/round", "play the round animation"),
    ("/advance", "move to the next round"),
    ("/final", "arm the final reveal"),
    ("/next", "reveal the next team of the final"),
    ("/teams", "replace the teams, one \"name, alias, …\" per line"),
];

const ADD_USAGE: &str = "/add <team> <points>";

/// A decoded operator command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// List the available commands
    Help,
    /// Replace every team with new definitions
    SetupTeams(Vec<TeamDefinition>),
    /// Add points to a team, negative points subtract
    AddPoints {
        /// Name, alias or id of the team
        team: String,
        /// Points to add
        points: i64,
    },
    /// Show the current ranking
    Ranking,
    /// Set every score to zero
    Reset,
    /// Raise the round animation latch
    TriggerAnimation,
    /// Move to the next round
    AdvanceRound,
    /// Arm the final reveal
    ArmReveal,
    /// Reveal the next team of the final
    StepReveal,
}

impl FromStr for Command {
    type Err = Error;

    /// Decodes operator text
    ///
    /// The first word is the verb, with an optional leading `/` and an
    /// optional `@botname` suffix. For `/add` the last word is the points
    /// value and every word before it forms the team query. For `/teams`
    /// the rest of the first line and every following line are team
    /// definitions.
    ///
    /// # Errors
    ///
    /// * `Error::UnknownCommand` - The verb is not recognized
    /// * `Error::MissingArgument` - `/add` lacks a team or points value
    /// * `Error::InvalidScoreDelta` - The points value is not an integer
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim_start();
        let (first_line, rest) = text.split_once('\n').unwrap_or((text, ""));
        let mut words = first_line.split_whitespace();

        let raw_verb = words.next().unwrap_or_default();
        let verb = raw_verb.strip_prefix('/').unwrap_or(raw_verb);
        let verb = verb.split_once('@').map_or(verb, |(verb, _)| verb);

        match verb.to_lowercase().as_str() {
            "start" | "help" => Ok(Self::Help),
            "table" | "leaderboard" => Ok(Self::Ranking),
            "reset" => Ok(Self::Reset),
            "round" => Ok(Self::TriggerAnimation),
            "advance" => Ok(Self::AdvanceRound),
            "final" => Ok(Self::ArmReveal),
            "next" => Ok(Self::StepReveal),
            "add" => parse_add(&words.collect_vec()),
            "teams" => {
                let inline = words.join(" ");
                Ok(Self::SetupTeams(TeamDefinition::parse_lines(&format!(
                    "{inline}\n{rest}"
                ))))
            }
            _ => Err(Error::UnknownCommand(raw_verb.to_owned())),
        }
    }
}

fn parse_add(arguments: &[&str]) -> Result<Command, Error> {
    let [team @ .., points] = arguments else {
        return Err(Error::MissingArgument {
            usage: ADD_USAGE.to_owned(),
        });
    };
    if team.is_empty() {
        return Err(Error::MissingArgument {
            usage: ADD_USAGE.to_owned(),
        });
    }

    let points = points
        .parse()
        .map_err(|_| Error::InvalidScoreDelta((*points).to_owned()))?;

    Ok(Command::AddPoints {
        team: team.join(" "),
        points,
    })
}
