//! Score and lives bookkeeping
//!
//! The collision pass reports what was destroyed; this module turns those
//! reports into points and lives and decides at the end of a tick whether
//! the run is over.

use serde::{Deserialize, Serialize};

use super::state::AsteroidSize;
use crate::consts::STARTING_LIVES;

/// Bonus for destroying a saucer with a bullet
pub const SAUCER_SCORE: u64 = 500;

/// Something that awards points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    AsteroidDestroyed(AsteroidSize),
    SaucerDestroyed,
}

impl ScoreEvent {
    pub fn points(self) -> u64 {
        match self {
            ScoreEvent::AsteroidDestroyed(size) => size.score(),
            ScoreEvent::SaucerDestroyed => SAUCER_SCORE,
        }
    }
}

/// Score and remaining lives for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    lives: u8,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
        }
    }
}

impl ScoreTracker {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Add the event's points, returning the delta
    pub fn award(&mut self, event: ScoreEvent) -> u64 {
        let points = event.points();
        self.score = self.score.saturating_add(points);
        points
    }

    /// Remove one life (clamped at zero); returns lives left
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_exhausted(&self) -> bool {
        self.lives == 0
    }
}

/// How a tick ended for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Play continues
    Continue,
    /// The last life was lost this tick
    LivesExhausted { final_score: u64 },
}

/// End-of-tick settlement: award the tick's points and report the outcome
pub fn settle(tracker: &mut ScoreTracker, events: &[ScoreEvent]) -> (u64, RunOutcome) {
    let gained: u64 = events.iter().map(|e| tracker.award(*e)).sum();
    let outcome = if tracker.is_exhausted() {
        RunOutcome::LivesExhausted {
            final_score: tracker.score(),
        }
    } else {
        RunOutcome::Continue
    };
    (gained, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_points_table() {
        assert_eq!(ScoreEvent::AsteroidDestroyed(AsteroidSize::Large).points(), 20);
        assert_eq!(ScoreEvent::AsteroidDestroyed(AsteroidSize::Medium).points(), 50);
        assert_eq!(ScoreEvent::AsteroidDestroyed(AsteroidSize::Small).points(), 100);
        assert_eq!(ScoreEvent::SaucerDestroyed.points(), 500);
    }

    #[test]
    fn test_lives_clamp_at_zero() {
        let mut tracker = ScoreTracker::default();
        assert_eq!(tracker.lives(), 3);
        tracker.lose_life();
        tracker.lose_life();
        assert_eq!(tracker.lose_life(), 0);
        assert_eq!(tracker.lose_life(), 0);
        assert!(tracker.is_exhausted());
    }

    #[test]
    fn test_settle_reports_exhaustion_with_final_score() {
        let mut tracker = ScoreTracker::default();
        for _ in 0..3 {
            tracker.lose_life();
        }
        let (gained, outcome) = settle(&mut tracker, &[ScoreEvent::SaucerDestroyed]);
        assert_eq!(gained, 500);
        assert_eq!(outcome, RunOutcome::LivesExhausted { final_score: 500 });
    }

    fn any_event() -> impl Strategy<Value = ScoreEvent> {
        prop_oneof![
            Just(ScoreEvent::AsteroidDestroyed(AsteroidSize::Large)),
            Just(ScoreEvent::AsteroidDestroyed(AsteroidSize::Medium)),
            Just(ScoreEvent::AsteroidDestroyed(AsteroidSize::Small)),
            Just(ScoreEvent::SaucerDestroyed),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_deltas_are_exact(events in prop::collection::vec(any_event(), 0..64)) {
            let mut tracker = ScoreTracker::default();
            for event in events {
                let before = tracker.score();
                let delta = tracker.award(event);
                let expected = match event {
                    ScoreEvent::AsteroidDestroyed(AsteroidSize::Large) => 20,
                    ScoreEvent::AsteroidDestroyed(AsteroidSize::Medium) => 50,
                    ScoreEvent::AsteroidDestroyed(AsteroidSize::Small) => 100,
                    ScoreEvent::SaucerDestroyed => 500,
                };
                prop_assert_eq!(delta, expected);
                prop_assert_eq!(tracker.score() - before, expected);
            }
        }
    }
}
