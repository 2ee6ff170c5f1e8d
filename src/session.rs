//! Operator reply channel
//!
//! This module defines the trait for tunneling command outcomes back to the
//! operator. The tunnel abstraction lets the scoreboard answer through a
//! chat bot, a terminal or a test double without knowing which.

use super::{Error, scoreboard::UpdateMessage};

/// Trait for sending command outcomes to the operator
pub trait Tunnel {
    /// Sends the outcome of a successful command
    ///
    /// # Arguments
    ///
    /// * `message` - The outcome to report
    fn send_message(&self, message: &UpdateMessage);

    /// Sends a condition that stopped or short-circuited a command
    ///
    /// Informational conditions (see [`Error::is_informational`]) arrive
    /// here too; formatting them differently is up to the implementation.
    ///
    /// # Arguments
    ///
    /// * `error` - The condition to report
    fn send_error(&self, error: &Error);
}
