//! Team setup and score keeping
//!
//! This module holds the registry of competing teams. Teams are created in a
//! single setup step from operator supplied definitions, receive sequential
//! ids in definition order and carry a signed score that only the registry
//! mutates.

use std::str::FromStr;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Error, constants};

/// Operator supplied description of a single team
///
/// Definitions are usually written one per line as
/// `"name, alias, alias, …"`, see [`TeamDefinition::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TeamDefinition {
    /// Display label of the team
    #[garde(length(chars, min = 1, max = constants::teams::MAX_NAME_LENGTH))]
    pub name: String,
    /// Alternate keys the operator may use to refer to the team
    #[garde(
        length(max = constants::teams::MAX_ALIAS_COUNT),
        inner(length(chars, min = 1, max = constants::teams::MAX_ALIAS_LENGTH))
    )]
    pub aliases: Vec<String>,
}

impl FromStr for TeamDefinition {
    type Err = std::convert::Infallible;

    /// Parses a `"name, alias, alias, …"` line
    ///
    /// Entries are trimmed and empty entries dropped. A line without any
    /// entry yields an empty name, which validation later rejects.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut entries = line
            .split(',')
            .map(rustrict::trim_whitespace)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned);

        let name = entries.next().unwrap_or_default();

        Ok(Self {
            name,
            aliases: entries.collect(),
        })
    }
}

impl TeamDefinition {
    /// Parses one definition per non-blank line of `text`
    pub fn parse_lines(text: &str) -> Vec<Self> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| line.parse().ok())
            .collect()
    }

    fn check(&self, line: usize) -> Result<(), Error> {
        self.validate()
            .map_err(|report| Error::InvalidTeamDefinition {
                line,
                reason: report.to_string(),
            })
    }
}

/// A competing team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    id: u32,
    name: String,
    aliases: Vec<String>,
    score: i64,
}

impl Team {
    /// Stable 1-based id assigned at setup
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate keys resolving to this team
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Current score
    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Result of a score adjustment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreChange {
    /// Id of the adjusted team
    pub id: u32,
    /// Display label of the adjusted team
    pub name: String,
    /// Score before the adjustment
    pub previous: i64,
    /// Score after the adjustment
    pub current: i64,
}

/// Ordered collection of all teams in the event
///
/// Insertion order equals creation order equals id order. The registry is
/// created empty and replaced wholesale by [`TeamRegistry::create_teams`].
#[derive(Debug, Default, Clone, Serialize)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Replaces every team with the supplied definitions
    ///
    /// Ids are assigned sequentially from 1 in definition order and every
    /// score starts at 0. Names and aliases are trimmed of surrounding
    /// whitespace before validation.
    ///
    /// # Returns
    ///
    /// The number of teams created.
    ///
    /// # Errors
    ///
    /// * `Error::EmptyTeamSet` - No definitions were supplied; the registry
    ///   is left empty so the caller can warn the operator
    /// * `Error::TooManyTeams` - More definitions than a setup accepts; the
    ///   registry is untouched
    /// * `Error::InvalidTeamDefinition` - A definition failed validation; the
    ///   registry is untouched
    pub fn create_teams(&mut self, definitions: Vec<TeamDefinition>) -> Result<usize, Error> {
        if definitions.is_empty() {
            self.teams.clear();
            return Err(Error::EmptyTeamSet);
        }

        if definitions.len() > constants::teams::MAX_TEAM_COUNT {
            return Err(Error::TooManyTeams {
                count: definitions.len(),
                max: constants::teams::MAX_TEAM_COUNT,
            });
        }

        let definitions = definitions
            .into_iter()
            .map(|TeamDefinition { name, aliases }| TeamDefinition {
                name: rustrict::trim_whitespace(&name).to_owned(),
                aliases: aliases
                    .iter()
                    .map(|alias| rustrict::trim_whitespace(alias).to_owned())
                    .collect(),
            })
            .collect_vec();

        for (index, definition) in definitions.iter().enumerate() {
            definition.check(index + 1)?;
        }

        self.teams = definitions
            .into_iter()
            .zip(1..)
            .map(|(TeamDefinition { name, aliases }, id)| Team {
                id,
                name,
                aliases,
                score: 0,
            })
            .collect();

        Ok(self.teams.len())
    }

    /// Adds `delta` points to the team with the given id
    ///
    /// Negative deltas subtract. Scores have no floor or ceiling other than
    /// saturating at the bounds of `i64`.
    ///
    /// # Returns
    ///
    /// The score before and after the change, or `None` if no team has `id`
    pub fn adjust_score(&mut self, id: u32, delta: i64) -> Option<ScoreChange> {
        let team = self.teams.iter_mut().find(|team| team.id == id)?;

        let previous = team.score;
        team.score = previous.saturating_add(delta);

        Some(ScoreChange {
            id,
            name: team.name.clone(),
            previous,
            current: team.score,
        })
    }

    /// Sets every score back to 0
    pub fn reset_all(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
    }

    /// Gets the team with the given id
    pub fn get(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    /// All teams in registry order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of teams
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no team exists
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Every `(id, name)` pair in registry order
    pub fn directory(&self) -> Vec<(u32, String)> {
        self.teams
            .iter()
            .map(|team| (team.id, team.name.clone()))
            .collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn definition(name: &str, aliases: &[&str]) -> TeamDefinition {
        TeamDefinition {
            name: name.to_owned(),
            aliases: aliases.iter().map(|alias| (*alias).to_owned()).collect(),
        }
    }

    pub(crate) fn registry_with(names: &[&str]) -> TeamRegistry {
        let mut registry = TeamRegistry::default();
        registry
            .create_teams(names.iter().map(|name| definition(name, &[])).collect())
            .unwrap();
        registry
    }

    #[test]
    fn test_parse_definition_line() {
        let definition: TeamDefinition = "Red Bull, redbull , ред булл,, булл".parse().unwrap();

        assert_eq!(definition.name, "Red Bull");
        assert_eq!(definition.aliases, vec!["redbull", "ред булл", "булл"]);
    }

    #[test]
    fn test_parse_definition_line_without_aliases() {
        let definition: TeamDefinition = "  Ferrari  ".parse().unwrap();

        assert_eq!(definition.name, "Ferrari");
        assert!(definition.aliases.is_empty());
    }

    #[test]
    fn test_parse_lines_skips_blank_lines() {
        let definitions = TeamDefinition::parse_lines("Alpha, a\n\n   \nBravo, b, bb\n");

        assert_eq!(
            definitions,
            vec![definition("Alpha", &["a"]), definition("Bravo", &["b", "bb"])]
        );
    }

    #[test]
    fn test_create_teams_assigns_sequential_ids() {
        let registry = registry_with(&["Alpha", "Bravo", "Charlie"]);

        let ids = registry.teams().iter().map(Team::id).collect_vec();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(registry.teams().iter().all(|team| team.score() == 0));
        assert_eq!(registry.get(2).map(Team::name), Some("Bravo"));
    }

    #[test]
    fn test_create_teams_replaces_previous_set() {
        let mut registry = registry_with(&["Alpha", "Bravo"]);
        registry.adjust_score(1, 10);

        let created = registry
            .create_teams(vec![definition("Delta", &["d"])])
            .unwrap();

        assert_eq!(created, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.teams()[0].id(), 1);
        assert_eq!(registry.teams()[0].name(), "Delta");
        assert_eq!(registry.teams()[0].score(), 0);
    }

    #[test]
    fn test_create_teams_empty() {
        let mut registry = registry_with(&["Alpha"]);

        assert_eq!(registry.create_teams(vec![]), Err(Error::EmptyTeamSet));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_teams_invalid_definition_keeps_registry() {
        let mut registry = registry_with(&["Alpha"]);

        let result = registry.create_teams(vec![
            definition("Bravo", &[]),
            definition("   ", &["blank"]),
        ]);

        assert!(matches!(
            result,
            Err(Error::InvalidTeamDefinition { line: 2, .. })
        ));
        assert_eq!(registry.directory(), vec![(1, "Alpha".to_owned())]);
    }

    #[test]
    fn test_create_teams_name_too_long() {
        let mut registry = TeamRegistry::default();
        let long_name = "x".repeat(constants::teams::MAX_NAME_LENGTH + 1);

        let result = registry.create_teams(vec![definition(&long_name, &[])]);

        assert!(matches!(
            result,
            Err(Error::InvalidTeamDefinition { line: 1, .. })
        ));
    }

    #[test]
    fn test_create_teams_cyrillic_name_within_limit() {
        let mut registry = TeamRegistry::default();
        let name = "Ж".repeat(constants::teams::MAX_NAME_LENGTH);

        assert_eq!(registry.create_teams(vec![definition(&name, &[])]), Ok(1));
    }

    #[test]
    fn test_create_teams_accepts_any_operator_name() {
        let mut registry = TeamRegistry::default();
        let names = ["Sexton", "Hell Riders", "Hooters", "Shitake", "Fanny", "Butt Heads"];

        let created = registry.create_teams(names.iter().map(|name| definition(name, &[])).collect());

        assert_eq!(created, Ok(names.len()));
        let registered = registry.teams().iter().map(Team::name).collect_vec();
        assert_eq!(registered, names);
    }

    #[test]
    fn test_create_teams_too_many() {
        let mut registry = TeamRegistry::default();
        let definitions = (0..=constants::teams::MAX_TEAM_COUNT)
            .map(|i| definition(&format!("Team {i}"), &[]))
            .collect_vec();

        assert_eq!(
            registry.create_teams(definitions),
            Err(Error::TooManyTeams {
                count: constants::teams::MAX_TEAM_COUNT + 1,
                max: constants::teams::MAX_TEAM_COUNT,
            })
        );
    }

    #[test]
    fn test_create_teams_trims_aliases() {
        let mut registry = TeamRegistry::default();
        registry
            .create_teams(vec![definition(" Alpha ", &[" a ", "alp"])])
            .unwrap();

        let team = &registry.teams()[0];
        assert_eq!(team.name(), "Alpha");
        assert_eq!(team.aliases(), ["a", "alp"]);
    }

    #[test]
    fn test_adjust_score_accumulates_deltas() {
        let mut registry = registry_with(&["Alpha", "Bravo"]);
        let deltas = [5, -12, 40, 0, -3];

        for delta in deltas {
            registry.adjust_score(2, delta);
        }

        assert_eq!(registry.get(2).unwrap().score(), deltas.iter().sum::<i64>());
        assert_eq!(registry.get(1).unwrap().score(), 0);
    }

    #[test]
    fn test_adjust_score_reports_change() {
        let mut registry = registry_with(&["Alpha"]);
        registry.adjust_score(1, 7);

        let change = registry.adjust_score(1, -10).unwrap();

        assert_eq!(
            change,
            ScoreChange {
                id: 1,
                name: "Alpha".to_owned(),
                previous: 7,
                current: -3,
            }
        );
    }

    #[test]
    fn test_adjust_score_unknown_id() {
        let mut registry = registry_with(&["Alpha"]);

        assert!(registry.adjust_score(9, 5).is_none());
        assert_eq!(registry.get(1).unwrap().score(), 0);
    }

    #[test]
    fn test_adjust_score_saturates() {
        let mut registry = registry_with(&["Alpha"]);
        registry.adjust_score(1, i64::MAX);

        let change = registry.adjust_score(1, 1).unwrap();

        assert_eq!(change.current, i64::MAX);
    }

    #[test]
    fn test_reset_all() {
        let mut registry = registry_with(&["Alpha", "Bravo"]);
        registry.adjust_score(1, 10);
        registry.adjust_score(2, -4);

        registry.reset_all();

        assert!(registry.teams().iter().all(|team| team.score() == 0));
        assert_eq!(registry.len(), 2);
    }
}
