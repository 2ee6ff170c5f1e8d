//! Resolution of operator text to teams
//!
//! Operators refer to teams loosely: by id, by one of several aliases, in
//! Latin or Cyrillic, with stray punctuation or spaces. Both the query and
//! the team's keys are normalized before an exact comparison.

use serde::{Deserialize, Serialize};

use crate::teams::{Team, TeamRegistry};

/// Which team keys a query may match besides the id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasMatching {
    /// Only the id and the aliases
    AliasesOnly,
    /// The id, the aliases and the display name
    #[default]
    AliasesAndName,
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ('а'..='я').contains(&c)
}

/// Lowercases `text` and drops every character that is not a Latin or
/// Cyrillic letter or a digit
///
/// # Examples
///
/// ```rust
/// use gridboard::aliases::normalize;
///
/// assert_eq!(normalize("Red Bull!"), "redbull");
/// assert_eq!(normalize("Ред-Булл"), "редбулл");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| is_key_char(*c)).collect()
}

fn matches(team: &Team, key: &str, matching: AliasMatching) -> bool {
    let equals = |candidate: &str| {
        let candidate = normalize(candidate);
        !candidate.is_empty() && candidate == key
    };

    team.aliases().iter().any(|alias| equals(alias))
        || (matching == AliasMatching::AliasesAndName && equals(team.name()))
}

/// Finds the team `query` refers to
///
/// Ids take precedence: a query equal to some team's id resolves to that
/// team even when an earlier team carries the same text as an alias.
/// Otherwise teams are tried in registry order and the first alias or name
/// match wins. A query that normalizes to nothing never matches.
///
/// # Returns
///
/// The matching team, or `None` if no team matches
pub fn resolve<'a>(
    registry: &'a TeamRegistry,
    query: &str,
    matching: AliasMatching,
) -> Option<&'a Team> {
    let key = normalize(query);
    if key.is_empty() {
        return None;
    }

    let teams = registry.teams();

    teams
        .iter()
        .find(|team| team.id().to_string() == key)
        .or_else(|| teams.iter().find(|team| matches(team, &key, matching)))
}
