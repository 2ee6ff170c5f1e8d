//! Scoreboard controller and read models
//!
//! This module contains the main scoreboard struct that owns every piece of
//! event state: the team registry, the round counter, the animation latch
//! and the final reveal. Operator commands mutate it one at a time, and the
//! dashboard reads it through the [`ScoresView`] and [`FinalView`] models.

use std::time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    AlarmMessage, Error,
    aliases::{self, AliasMatching},
    animation::AnimationLatch,
    command::{self, Command},
    constants,
    leaderboard::{self, Standing},
    reveal::{RevealSequencer, RevealStep},
    round::RoundCounter,
    session::Tunnel,
    teams::{ScoreChange, Team, TeamDefinition, TeamRegistry},
};

type ValidationResult = garde::Result;

/// Validates that the animation window falls within the configured bounds
fn validate_animation_window(val: &Duration) -> ValidationResult {
    const MIN: u64 = constants::animation::MIN_WINDOW_MILLIS;
    const MAX: u64 = constants::animation::MAX_WINDOW_MILLIS;

    if (u128::from(MIN)..=u128::from(MAX)).contains(&val.as_millis()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "animation_window is outside of the bounds [{MIN},{MAX}] milliseconds",
        )))
    }
}

/// Configuration options for the scoreboard
///
/// Missing fields take their default values when deserialized, so an empty
/// JSON object describes the standard eleven round event.
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Number of rounds in the event
    #[garde(range(
        min = constants::round::MIN_MAX_ROUNDS,
        max = constants::round::MAX_MAX_ROUNDS
    ))]
    pub max_rounds: u32,
    /// How long the round animation flag stays raised
    #[garde(custom(|v, _| validate_animation_window(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub animation_window: Duration,
    /// Whether team names resolve in addition to ids and aliases
    #[garde(skip)]
    pub alias_matching: AliasMatching,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_rounds: constants::round::DEFAULT_MAX_ROUNDS,
            animation_window: Duration::from_millis(constants::animation::DEFAULT_WINDOW_MILLIS),
            alias_matching: AliasMatching::default(),
        }
    }
}

/// Outcome of a successful command, sent back to the operator
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// Available commands with their descriptions
    Help(&'static [(&'static str, &'static str)]),
    /// The teams that now make up the registry
    TeamsCreated(Vec<TeamView>),
    /// A team's score changed
    ScoreChanged(ScoreChange),
    /// The current ranking, best first
    Ranking(Vec<Standing>),
    /// Every score was set to zero
    ScoresReset,
    /// The round animation was started
    RoundAnimation {
        /// Round the animation belongs to
        round: u32,
    },
    /// The event moved to a new round
    RoundAdvanced {
        /// The new current round
        round: u32,
        /// The last round
        max_rounds: u32,
    },
    /// The final reveal is armed and waits for its first step
    RevealArmed {
        /// Number of teams that will be revealed
        team_count: usize,
    },
    /// One team of the final was revealed
    Revealed(RevealStep),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A team as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    /// Team id
    pub id: u32,
    /// Team display label
    pub name: String,
    /// Current score
    pub score: i64,
}

impl From<&Team> for TeamView {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_owned(),
            score: team.score(),
        }
    }
}

/// Polled dashboard state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoresView {
    /// Current round
    pub round: u32,
    /// Last round
    pub max_rounds: u32,
    /// Whether the round animation should be playing
    pub trigger_round: bool,
    /// Every team in registry order
    pub teams: Vec<TeamView>,
}

/// Polled final reveal state
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalView {
    /// `-1` when no reveal runs, `-2` while armed, otherwise the index of
    /// the next team to reveal
    pub final_index: i64,
    /// Position of the most recently revealed team
    pub revealed: Option<usize>,
}

/// The scoreboard of a single event
///
/// All state lives in memory for the lifetime of the process. The struct is
/// plain owned data; a host that serves the dashboard from another thread
/// shares it behind a lock.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    /// Configuration the scoreboard was created with
    options: Options,
    /// Every team and its score
    teams: TeamRegistry,
    /// Progress of the final reveal
    reveal: RevealSequencer,
    /// Current round
    round: RoundCounter,
    /// Round animation flag
    animation: AnimationLatch,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Scoreboard {
    /// Creates an empty scoreboard
    ///
    /// The options are expected to be validated by the caller; out of range
    /// round counts are still raised to at least one round.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridboard::scoreboard::{Options, Scoreboard};
    ///
    /// let scoreboard = Scoreboard::new(Options::default());
    /// assert!(scoreboard.teams().is_empty());
    /// assert_eq!(scoreboard.scores_view().round, 1);
    /// ```
    pub fn new(options: Options) -> Self {
        Self {
            options,
            teams: TeamRegistry::default(),
            reveal: RevealSequencer::default(),
            round: RoundCounter::new(options.max_rounds),
            animation: AnimationLatch::new(options.animation_window),
        }
    }

    /// Configuration the scoreboard was created with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Every team and its score
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Round counter
    pub fn round(&self) -> &RoundCounter {
        &self.round
    }

    /// Final reveal progress
    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    /// Whether the round animation should be playing
    pub fn is_animation_active(&self) -> bool {
        self.animation.is_active()
    }

    /// Replaces every team
    ///
    /// Any final reveal in progress refers to the old teams and is reset.
    ///
    /// # Errors
    ///
    /// See [`TeamRegistry::create_teams`].
    pub fn create_teams(&mut self, definitions: Vec<TeamDefinition>) -> Result<usize, Error> {
        let result = self.teams.create_teams(definitions);

        match &result {
            Ok(count) => {
                tracing::info!(count, "teams created");
                self.reveal.clear();
            }
            Err(Error::EmptyTeamSet) => {
                tracing::warn!("team setup without definitions, registry is now empty");
                self.reveal.clear();
            }
            Err(error) => tracing::info!(%error, "team setup rejected"),
        }

        result
    }

    /// Finds the team operator text refers to
    ///
    /// # Errors
    ///
    /// * `Error::EmptyTeamSet` - No team exists
    /// * `Error::TeamNotFound` - No team matches `query`
    pub fn resolve(&self, query: &str) -> Result<&Team, Error> {
        if self.teams.is_empty() {
            return Err(Error::EmptyTeamSet);
        }

        aliases::resolve(&self.teams, query, self.options.alias_matching)
            .ok_or_else(|| self.not_found(query))
    }

    fn not_found(&self, query: &str) -> Error {
        Error::TeamNotFound {
            query: query.to_owned(),
            available: self.teams.directory(),
        }
    }

    /// Adds points to the team `query` refers to
    ///
    /// # Errors
    ///
    /// * `Error::EmptyTeamSet` - No team exists
    /// * `Error::TeamNotFound` - No team matches `query`; nothing changes
    pub fn adjust_score(&mut self, query: &str, delta: i64) -> Result<ScoreChange, Error> {
        let id = self.resolve(query)?.id();

        let change = self
            .teams
            .adjust_score(id, delta)
            .ok_or_else(|| self.not_found(query))?;

        tracing::info!(
            team = %change.name,
            previous = change.previous,
            current = change.current,
            "score adjusted"
        );

        Ok(change)
    }

    /// Current ranking, best first
    ///
    /// # Errors
    ///
    /// * `Error::EmptyTeamSet` - No team exists
    pub fn ranking(&self) -> Result<Vec<Standing>, Error> {
        if self.teams.is_empty() {
            return Err(Error::EmptyTeamSet);
        }

        Ok(leaderboard::ranking(&self.teams))
    }

    /// Sets every score to zero
    pub fn reset_all(&mut self) {
        self.teams.reset_all();
        tracing::info!(count = self.teams.len(), "scores reset");
    }

    /// Moves to the next round
    ///
    /// # Errors
    ///
    /// * `Error::RoundAtMaximum` - Already at the last round
    pub fn advance_round(&mut self) -> Result<u32, Error> {
        let round = self.round.advance()?;
        tracing::info!(round, max = self.round.max(), "round advanced");
        Ok(round)
    }

    /// Arms the final reveal, discarding any progress
    ///
    /// # Returns
    ///
    /// The number of teams that will be revealed
    ///
    /// # Errors
    ///
    /// * `Error::EmptyTeamSet` - No team exists; the reveal is left as it was
    pub fn arm_reveal(&mut self) -> Result<usize, Error> {
        if self.teams.is_empty() {
            tracing::warn!("final reveal requested without teams");
            return Err(Error::EmptyTeamSet);
        }

        self.reveal.start();
        tracing::info!(teams = self.teams.len(), "final reveal armed");
        Ok(self.teams.len())
    }

    /// Reveals the next team of the final
    ///
    /// The ranking is captured on the first step after arming.
    ///
    /// # Errors
    ///
    /// See [`RevealSequencer::step`].
    pub fn step_reveal(&mut self) -> Result<RevealStep, Error> {
        let teams = &self.teams;
        self.reveal.step(|| leaderboard::ranking(teams))
    }

    /// Starts the round animation
    ///
    /// # Arguments
    ///
    /// * `schedule_message` - Function to schedule the alarm that ends the animation
    ///
    /// # Returns
    ///
    /// The current round
    pub fn trigger_animation<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        schedule_message: S,
    ) -> u32 {
        self.animation.trigger(schedule_message);
        self.round.current()
    }

    /// Handles an alarm scheduled by an earlier operation
    ///
    /// # Returns
    ///
    /// `true` if the alarm changed any state, `false` if it was stale
    pub fn receive_alarm(&mut self, message: &AlarmMessage) -> bool {
        match message {
            AlarmMessage::Animation(message) => self.animation.receive_alarm(message),
        }
    }

    /// Dashboard state
    pub fn scores_view(&self) -> ScoresView {
        ScoresView {
            round: self.round.current(),
            max_rounds: self.round.max(),
            trigger_round: self.animation.is_active(),
            teams: self.teams.teams().iter().map(TeamView::from).collect(),
        }
    }

    /// Dashboard final reveal state
    pub fn final_view(&self) -> FinalView {
        FinalView {
            final_index: self.reveal.final_index(),
            revealed: self.reveal.last_revealed(),
        }
    }

    /// Executes a command
    ///
    /// # Arguments
    ///
    /// * `command` - The decoded operator command
    /// * `schedule_message` - Function to schedule delayed alarms
    ///
    /// # Errors
    ///
    /// Whatever condition the underlying operation reports.
    pub fn execute<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        command: Command,
        schedule_message: S,
    ) -> Result<UpdateMessage, Error> {
        Ok(match command {
            Command::Help => UpdateMessage::Help(command::USAGE),
            Command::SetupTeams(definitions) => {
                self.create_teams(definitions)?;
                UpdateMessage::TeamsCreated(self.scores_view().teams)
            }
            Command::AddPoints { team, points } => {
                UpdateMessage::ScoreChanged(self.adjust_score(&team, points)?)
            }
            Command::Ranking => UpdateMessage::Ranking(self.ranking()?),
            Command::Reset => {
                self.reset_all();
                UpdateMessage::ScoresReset
            }
            Command::TriggerAnimation => UpdateMessage::RoundAnimation {
                round: self.trigger_animation(schedule_message),
            },
            Command::AdvanceRound => UpdateMessage::RoundAdvanced {
                round: self.advance_round()?,
                max_rounds: self.round.max(),
            },
            Command::ArmReveal => UpdateMessage::RevealArmed {
                team_count: self.arm_reveal()?,
            },
            Command::StepReveal => UpdateMessage::Revealed(self.step_reveal()?),
        })
    }

    /// Executes a command and reports the outcome through `tunnel`
    ///
    /// # Arguments
    ///
    /// * `command` - The decoded operator command
    /// * `schedule_message` - Function to schedule delayed alarms
    /// * `tunnel` - Reply channel to the operator
    pub fn receive_command<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        command: Command,
        schedule_message: S,
        tunnel: &T,
    ) {
        match self.execute(command, schedule_message) {
            Ok(message) => tunnel.send_message(&message),
            Err(error) => tunnel.send_error(&error),
        }
    }

    /// Decodes operator text and executes it
    ///
    /// Text that does not decode is reported through `tunnel` and changes
    /// nothing.
    pub fn receive_text<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        text: &str,
        schedule_message: S,
        tunnel: &T,
    ) {
        match text.parse::<Command>() {
            Ok(command) => self.receive_command(command, schedule_message, tunnel),
            Err(error) => tunnel.send_error(&error),
        }
    }
}
