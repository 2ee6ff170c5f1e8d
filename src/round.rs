//! Bounded round counter

use serde::Serialize;

use crate::Error;

/// Tracks the current round of the event
///
/// Rounds count from 1 up to a fixed maximum. Advancing past the maximum is
/// refused and leaves the counter where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundCounter {
    current: u32,
    max: u32,
}

impl Default for RoundCounter {
    fn default() -> Self {
        Self::new(crate::constants::round::DEFAULT_MAX_ROUNDS)
    }
}

impl RoundCounter {
    /// Creates a counter at round 1 with at least one round
    pub fn new(max: u32) -> Self {
        Self {
            current: 1,
            max: max.max(1),
        }
    }

    /// Moves to the next round
    ///
    /// # Returns
    ///
    /// The new current round
    ///
    /// # Errors
    ///
    /// * `Error::RoundAtMaximum` - The counter is already at the last round
    pub fn advance(&mut self) -> Result<u32, Error> {
        if self.current >= self.max {
            return Err(Error::RoundAtMaximum { max: self.max });
        }

        self.current += 1;
        Ok(self.current)
    }

    /// Current round
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Last round
    pub fn max(&self) -> u32 {
        self.max
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_counter() {
        let counter = RoundCounter::default();

        assert_eq!(counter.current(), 1);
        assert_eq!(counter.max(), 11);
    }

    #[test]
    fn test_advance() {
        let mut counter = RoundCounter::new(3);

        assert_eq!(counter.advance(), Ok(2));
        assert_eq!(counter.advance(), Ok(3));
        assert_eq!(counter.advance(), Err(Error::RoundAtMaximum { max: 3 }));
        assert_eq!(counter.current(), 3);
    }

    #[test]
    fn test_advance_never_exceeds_max() {
        let mut counter = RoundCounter::default();

        for _ in 0..counter.max() + 5 {
            let _ = counter.advance();
        }

        assert_eq!(counter.current(), counter.max());
    }

    #[test]
    fn test_zero_max_is_one_round() {
        let mut counter = RoundCounter::new(0);

        assert_eq!(counter.max(), 1);
        assert!(counter.advance().is_err());
        assert_eq!(counter.current(), 1);
    }
}
