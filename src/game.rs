//! Screen flow around the simulation
//!
//! `Game` owns the `World` and routes each frame's intents to the current
//! screen only. A frame that changes screen does not also tick.

use serde::{Deserialize, Serialize};

use crate::highscores::ScoreBoard;
use crate::persistence::{INITIALS_LEN, ScoreStore};
use crate::platform::{HeldIntents, Intent, IntentFrame, ShipPose};
use crate::renderer::{Overlays, RenderSnapshot};
use crate::sim::{AudioCue, Field, RunOutcome, World, tick};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Attract screen with the leaderboard
    #[default]
    ShowingScores,
    Playing,
    /// Typing initials for a qualifying score
    HighScoreEntry,
    GameOver,
}

/// One engine instance: world, leaderboard client and screen flow
pub struct Game<S: ScoreStore> {
    world: World,
    board: ScoreBoard<S>,
    screen: Screen,
    initials: String,
    /// Holds carried over from the frame that started the run
    masked: HeldIntents,
    final_score: u64,
}

impl<S: ScoreStore> Game<S> {
    /// Create a game on the attract screen and load the leaderboard
    pub fn new(field: Field, seed: u64, store: S) -> Self {
        let mut board = ScoreBoard::new(store);
        board.refresh();
        Self {
            world: World::new(field, seed),
            board,
            screen: Screen::ShowingScores,
            initials: String::new(),
            masked: HeldIntents::empty(),
            final_score: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn board(&self) -> &ScoreBoard<S> {
        &self.board
    }

    /// Initials typed so far on the entry screen
    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Score of the last finished run
    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    /// Ship position and heading for the gesture classifier
    pub fn ship_pose(&self) -> ShipPose {
        ShipPose {
            pos: self.world.ship.pos,
            heading: self.world.ship.heading,
        }
    }

    /// Run one frame callback; returns the audio cues it produced
    pub fn frame(&mut self, input: &IntentFrame) -> Vec<AudioCue> {
        match self.screen {
            Screen::ShowingScores => {
                if input.has_edge(Intent::Confirm) {
                    self.start_run(input.held);
                }
            }
            Screen::Playing => self.play(input),
            Screen::HighScoreEntry => self.edit_initials(input),
            Screen::GameOver => {
                if input.has_edge(Intent::Confirm) {
                    self.show_scores();
                }
            }
        }
        self.world.drain_events()
    }

    fn start_run(&mut self, held: HeldIntents) {
        self.world.reset_run();
        self.masked = held;
        self.initials.clear();
        self.final_score = 0;
        self.screen = Screen::Playing;
    }

    fn play(&mut self, input: &IntentFrame) {
        // A hold stays masked until it is released once
        self.masked = self.masked.intersect(input.held);
        let mut controls = input.clone();
        controls.held = input.held.without(self.masked);

        let report = tick(&mut self.world, &controls.to_tick_input());
        if let RunOutcome::LivesExhausted { final_score } = report.outcome {
            self.end_run(final_score);
        }
    }

    fn end_run(&mut self, final_score: u64) {
        self.world.stop_siren();
        self.final_score = final_score;
        self.initials.clear();
        self.screen = if self.board.qualifies(final_score) {
            log::info!("Score {} qualifies for the leaderboard", final_score);
            Screen::HighScoreEntry
        } else {
            Screen::GameOver
        };
    }

    fn edit_initials(&mut self, input: &IntentFrame) {
        for intent in &input.edges {
            match intent {
                Intent::Letter(c) if c.is_ascii_alphabetic() => {
                    if self.initials.len() < INITIALS_LEN {
                        self.initials.push(c.to_ascii_uppercase());
                    }
                }
                Intent::Backspace => {
                    self.initials.pop();
                }
                Intent::Confirm if self.initials.len() == INITIALS_LEN => {
                    self.board.submit(&self.initials, self.final_score);
                    self.show_scores();
                    return;
                }
                _ => {}
            }
        }
    }

    fn show_scores(&mut self) {
        self.board.refresh();
        self.screen = Screen::ShowingScores;
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let run = &self.world.run;
        let overlays = match self.screen {
            Screen::ShowingScores => Overlays {
                board_rows: self.board.scores().rows(),
                ..Default::default()
            },
            Screen::Playing => Overlays {
                level_banner: (run.level_banner_ticks > 0).then_some(run.level),
                respawn_seconds: run.is_invulnerable().then(|| run.respawn_seconds()),
                ..Default::default()
            },
            Screen::HighScoreEntry => Overlays {
                initials: Some(format!("{:_<width$}", self.initials, width = INITIALS_LEN)),
                ..Default::default()
            },
            Screen::GameOver => Overlays {
                game_over_score: Some(self.final_score),
                ..Default::default()
            },
        };
        RenderSnapshot::capture(&self.world, self.screen, overlays)
    }
}
