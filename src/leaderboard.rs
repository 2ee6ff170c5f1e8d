//! Ranking of teams by score
//!
//! Rankings are never cached: scores change between queries, so every call
//! derives the order from the registry as it is right now.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::teams::{Team, TeamRegistry};

/// A team's place in a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Place in the ranking (1-indexed)
    pub position: usize,
    /// Team id
    pub id: u32,
    /// Team display label
    pub name: String,
    /// Team score at the time of ranking
    pub score: i64,
}

/// Orders the teams by descending score
///
/// The sort is stable: teams with equal scores keep their registry order,
/// so the result is fully determined by the registry contents.
///
/// # Examples
///
/// ```rust
/// use gridboard::leaderboard::ranking;
/// use gridboard::teams::{TeamDefinition, TeamRegistry};
///
/// let mut registry = TeamRegistry::default();
/// registry.create_teams(TeamDefinition::parse_lines("Alpha\nBravo")).unwrap();
/// registry.adjust_score(2, 5);
///
/// let names: Vec<_> = ranking(&registry).into_iter().map(|s| s.name).collect();
/// assert_eq!(names, ["Bravo", "Alpha"]);
/// ```
pub fn ranking(registry: &TeamRegistry) -> Vec<Standing> {
    registry
        .teams()
        .iter()
        .sorted_by_key(|team| Reverse(team.score()))
        .enumerate()
        .map(|(index, team)| standing(index + 1, team))
        .collect_vec()
}

fn standing(position: usize, team: &Team) -> Standing {
    Standing {
        position,
        id: team.id(),
        name: team.name().to_owned(),
        score: team.score(),
    }
}
