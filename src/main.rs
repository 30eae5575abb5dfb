//! Vector Rocks entry point
//!
//! Native headless host: loads settings, opens the score store and drives the
//! engine with one tick per frame callback under a simple autopilot.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use vector_rocks::audio::{AudioManager, CueLog};
    use vector_rocks::consts::TICKS_PER_SECOND;
    use vector_rocks::persistence::{JsonFileStore, MemoryScoreStore, ScoreStore};
    use vector_rocks::platform::{GestureClassifier, KeyboardMapper};
    use vector_rocks::{Game, Screen, Settings};

    const SETTINGS_PATH: &str = "settings.json";
    const DEFAULT_FRAMES: u64 = 120 * TICKS_PER_SECOND as u64;

    /// Scripted player: presses keys and taps the screen on a fixed rhythm
    struct Autopilot {
        keys: KeyboardMapper,
        touch: GestureClassifier,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                keys: KeyboardMapper::new(),
                touch: GestureClassifier::new(),
            }
        }

        /// Press or release keys for this frame
        fn drive<S: ScoreStore>(&mut self, game: &Game<S>, frame: u64) {
            let time_ms = frame * 1000 / TICKS_PER_SECOND as u64;
            match game.screen() {
                Screen::ShowingScores | Screen::GameOver => {
                    self.release_all();
                    if frame % 30 == 0 {
                        self.tap_key("Space");
                    }
                }
                Screen::HighScoreEntry => {
                    self.release_all();
                    let code = if game.initials().len() < 3 { "KeyR" } else { "Enter" };
                    self.tap_key(code);
                }
                Screen::Playing => {
                    // Sweep the turret, fire constantly, nudge forward now and then
                    self.hold("ArrowLeft", frame % 240 < 120);
                    self.hold("ArrowRight", frame % 240 >= 200);
                    self.hold("Space", true);
                    self.hold("ArrowUp", frame % 180 < 15);
                    self.hold("ArrowDown", frame % 900 == 899);

                    // A quick tap away from the ship every few seconds
                    let pose = game.ship_pose();
                    if frame % 300 == 0 {
                        self.touch.pointer_down(pose.pos + Vec2::new(120.0, 0.0), time_ms, pose);
                    } else if frame % 300 == 3 {
                        self.touch.pointer_up(time_ms);
                    }
                }
            }
        }

        fn hold(&mut self, code: &str, down: bool) {
            if down {
                self.keys.key_down(code);
            } else {
                self.keys.key_up(code);
            }
        }

        fn tap_key(&mut self, code: &str) {
            self.keys.key_down(code);
            self.keys.key_up(code);
        }

        fn release_all(&mut self) {
            for code in ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "Space"] {
                self.keys.key_up(code);
            }
            self.touch.cancel();
        }
    }

    fn run<S: ScoreStore>(settings: &Settings, store: S, seed: u64, frames: u64) {
        let mut game = Game::new(settings.field(), seed, store);
        let mut audio = AudioManager::new(CueLog::default());
        audio.set_master_volume(settings.master_volume);
        audio.set_enabled(settings.sound_enabled);

        let mut pilot = Autopilot::new();
        let mut runs = 0u32;
        let mut best = 0u64;

        for frame in 0..frames {
            pilot.drive(&game, frame);
            let mut input = pilot.keys.take_frame();
            input.merge(pilot.touch.take_frame());

            let before = game.screen();
            let cues = game.frame(&input);
            audio.dispatch(&cues);

            if before == Screen::Playing && game.screen() != Screen::Playing {
                runs += 1;
                best = best.max(game.final_score());
                log::info!("Run {} ended with {} points", runs, game.final_score());
            }
        }

        let snap = game.snapshot();
        log::info!(
            "Stopped after {} frames on {:?}: score {}, level {}, {} lives, {} entities",
            frames,
            snap.screen,
            snap.score,
            snap.level,
            snap.lives,
            snap.drawables.len()
        );
        log::info!(
            "{} runs finished, best {}, {} cues voiced",
            runs,
            best,
            audio.sink().played.len()
        );
        for row in game.board().scores().rows() {
            log::info!("{}", row);
        }
    }

    pub fn main() {
        env_logger::init();
        log::info!("Vector Rocks (native) starting...");

        let settings = Settings::load(Path::new(SETTINGS_PATH));
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        let frames = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        log::info!("Seed {}, {} frames", seed, frames);

        match JsonFileStore::open(&settings.high_score_path) {
            Ok(store) => run(&settings, store, seed, frames),
            Err(e) => {
                log::warn!(
                    "Score file {} unavailable, keeping scores in memory: {}",
                    settings.high_score_path.display(),
                    e
                );
                run(&settings, MemoryScoreStore::new(), seed, frames);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts embed the library directly
}
