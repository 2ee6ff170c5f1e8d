//! Round animation latch
//!
//! The dashboard polls a boolean that tells it a round animation should play.
//! Triggering the latch raises the flag and schedules an alarm that lowers it
//! once the animation window has passed. Every trigger bumps a generation
//! counter and the alarm carries the generation it was scheduled for, so an
//! alarm from an earlier trigger is ignored and only the most recent one can
//! lower the flag.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Alarm messages for the animation latch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Lowers the flag if no trigger happened since this alarm was scheduled
    ClearAnimation {
        /// Trigger generation the alarm belongs to
        generation: u64,
    },
}

/// Self-clearing "animation in progress" flag
#[derive(Debug, Clone)]
pub struct AnimationLatch {
    active: bool,
    generation: u64,
    window: Duration,
}

impl Default for AnimationLatch {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::constants::animation::DEFAULT_WINDOW_MILLIS,
        ))
    }
}

impl AnimationLatch {
    /// Creates an inactive latch that stays raised for `window` once triggered
    pub fn new(window: Duration) -> Self {
        Self {
            active: false,
            generation: 0,
            window,
        }
    }

    /// Raises the flag and schedules it to be lowered after the window
    ///
    /// An alarm scheduled by a previous trigger becomes stale, so triggering
    /// again restarts the window instead of stacking a second clear.
    ///
    /// # Arguments
    ///
    /// * `schedule_message` - Function to schedule the clearing alarm
    pub fn trigger<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
    ) {
        self.generation += 1;
        self.active = true;

        tracing::info!(generation = self.generation, "animation latch raised");

        schedule_message(
            AlarmMessage::ClearAnimation {
                generation: self.generation,
            }
            .into(),
            self.window,
        );
    }

    /// Handles a scheduled alarm
    ///
    /// # Returns
    ///
    /// `true` if the alarm lowered the flag, `false` if it was stale
    pub fn receive_alarm(&mut self, message: &AlarmMessage) -> bool {
        let AlarmMessage::ClearAnimation { generation } = message;

        if *generation != self.generation || !self.active {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "ignoring stale animation alarm"
            );
            return false;
        }

        self.active = false;
        tracing::info!(generation, "animation latch cleared");
        true
    }

    /// Whether an animation should currently play
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Length of the window the flag stays raised
    pub fn window(&self) -> Duration {
        self.window
    }
}
