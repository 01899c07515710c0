//! Player reputation and the narrow capability interactions use to touch it.
use std::fmt;

use bevy::prelude::*;

const MIN_REPUTATION: i32 = 0;
const MAX_REPUTATION: i32 = 100;
const DEFAULT_REPUTATION: i32 = 10;
const CHAOTIC_CEILING: i32 = 25;
const LAWFUL_FLOOR: i32 = 75;

/// Read and adjust a reputation value without owning the player.
pub trait ReputationLedger {
    fn value(&self) -> i32;
    fn modify(&mut self, delta: i32);
}

/// Coarse standing derived from the reputation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationStanding {
    Chaotic,
    Neutral,
    Lawful,
}

impl ReputationStanding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chaotic => "Chaotic",
            Self::Neutral => "Neutral",
            Self::Lawful => "Lawful",
        }
    }
}

impl fmt::Display for ReputationStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Player reputation, kept within `0..=100`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reputation {
    value: i32,
}

impl Reputation {
    pub fn new(value: i32) -> Self {
        Self {
            value: value.clamp(MIN_REPUTATION, MAX_REPUTATION),
        }
    }

    /// Share of the maximum, for gauges.
    pub fn fraction(&self) -> f32 {
        self.value as f32 / MAX_REPUTATION as f32
    }

    /// Red at zero, blue at the maximum, greenest around the middle.
    pub fn gauge_color(&self) -> Color {
        let fraction = self.fraction();
        let middle = self.value.min(MAX_REPUTATION - self.value) as f32 / 50.0;
        Color::srgb(1.0 - fraction, 0.5 * middle, fraction)
    }

    pub fn standing(&self) -> ReputationStanding {
        if self.value <= CHAOTIC_CEILING {
            ReputationStanding::Chaotic
        } else if self.value >= LAWFUL_FLOOR {
            ReputationStanding::Lawful
        } else {
            ReputationStanding::Neutral
        }
    }
}

impl Default for Reputation {
    fn default() -> Self {
        Self::new(DEFAULT_REPUTATION)
    }
}

impl ReputationLedger for Reputation {
    fn value(&self) -> i32 {
        self.value
    }

    fn modify(&mut self, delta: i32) {
        self.value = self
            .value
            .saturating_add(delta)
            .clamp(MIN_REPUTATION, MAX_REPUTATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_clamps_to_bounds() {
        let mut reputation = Reputation::default();
        assert_eq!(reputation.value(), DEFAULT_REPUTATION);

        reputation.modify(-20);
        assert_eq!(reputation.value(), MIN_REPUTATION);

        reputation.modify(500);
        assert_eq!(reputation.value(), MAX_REPUTATION);
    }

    #[test]
    fn standing_follows_thresholds() {
        assert_eq!(Reputation::new(25).standing(), ReputationStanding::Chaotic);
        assert_eq!(Reputation::new(50).standing(), ReputationStanding::Neutral);
        assert_eq!(Reputation::new(75).standing(), ReputationStanding::Lawful);
        assert_eq!(Reputation::new(-4).value(), MIN_REPUTATION);
    }

    #[test]
    fn gauge_runs_from_red_to_blue() {
        assert_eq!(Reputation::new(0).gauge_color(), Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(Reputation::new(100).gauge_color(), Color::srgb(0.0, 0.0, 1.0));
        assert_eq!(Reputation::new(50).gauge_color(), Color::srgb(0.5, 0.5, 0.5));
    }
}
