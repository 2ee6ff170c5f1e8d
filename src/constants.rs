//! Configuration constants for the scoreboard
//!
//! This module contains the limits and defaults used throughout the
//! scoreboard to keep operator input bounded and to give the event
//! consistent behavior when no explicit options are supplied.

/// Team setup constants
pub mod teams {
    /// Maximum number of teams in a single setup
    pub const MAX_TEAM_COUNT: usize = 64;
    /// Maximum length of a team name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
    /// Maximum number of aliases a single team may carry
    pub const MAX_ALIAS_COUNT: usize = 16;
    /// Maximum length of a single alias in characters
    pub const MAX_ALIAS_LENGTH: usize = 30;
}

/// Round counter constants
pub mod round {
    /// Number of rounds in an event unless configured otherwise
    pub const DEFAULT_MAX_ROUNDS: u32 = 11;
    /// Smallest configurable number of rounds
    pub const MIN_MAX_ROUNDS: u32 = 1;
    /// Largest configurable number of rounds
    pub const MAX_MAX_ROUNDS: u32 = 99;
}

/// Animation latch constants
pub mod animation {
    /// Length in milliseconds of the window during which the latch stays active
    pub const DEFAULT_WINDOW_MILLIS: u64 = 5_000;
    /// Shortest configurable window in milliseconds
    pub const MIN_WINDOW_MILLIS: u64 = 1;
    /// Longest configurable window in milliseconds
    pub const MAX_WINDOW_MILLIS: u64 = 60_000;
}

/// Reveal read model constants
pub mod reveal {
    /// `final_index` reported while no reveal is running
    pub const INDEX_INACTIVE: i64 = -1;
    /// `final_index` reported while a reveal is armed but nothing is shown yet
    pub const INDEX_ARMED: i64 = -2;
}
