//! Trash Crash headless runner
//!
//! Plays one session at 60 Hz with the autopilot at the wheel and prints the
//! final HUD as JSON. Useful for soak-testing world generation and the
//! collision rules without a renderer.
//!
//! Usage: `trash-crash [--seed N] [--seconds S] [--variant NAME] [--settings JSON]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::Parser;

    use trash_crash::consts::MAX_FRAME_DT;
    use trash_crash::platform::InputState;
    use trash_crash::sim::{GameEvent, GamePhase, GameState, tick};
    use trash_crash::{GameVariant, Settings};

    pub const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SEED: u64 = 0x5EED;
    const DEFAULT_SECONDS: f32 = 120.0;

    fn parse_seconds(s: &str) -> Result<f32, String> {
        let seconds = s.parse::<f32>().map_err(|e| format!("invalid duration: {e}"))?;
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(format!("duration must be positive, got {seconds}"));
        }
        Ok(seconds)
    }

    fn parse_variant(s: &str) -> Result<GameVariant, String> {
        GameVariant::from_str(s).ok_or_else(|| format!("unknown variant '{s}' (expected classic or trash-crash)"))
    }

    fn parse_settings(s: &str) -> Result<Settings, String> {
        Settings::from_json(s).ok_or_else(|| "settings must be a JSON object of Settings fields".to_string())
    }

    /// Command-line options
    #[derive(Debug, Parser)]
    #[command(about = "Play one autopilot session of Trash Crash and print the final HUD")]
    pub struct Options {
        /// World seed.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        pub seed: u64,

        /// Simulated seconds to run before stopping.
        #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_SECONDS, value_parser = parse_seconds)]
        pub seconds: f32,

        /// Ruleset (classic or trash-crash); overrides the settings JSON.
        #[arg(long, value_parser = parse_variant)]
        pub variant: Option<GameVariant>,

        /// Partial settings override as JSON, e.g. '{"tree_count": 200}'.
        #[arg(long, value_name = "JSON", value_parser = parse_settings)]
        pub settings: Option<Settings>,
    }

    impl Options {
        /// Settings for the session with the variant override applied
        pub fn resolved_settings(&self) -> Settings {
            let mut settings = self.settings.clone().unwrap_or_default();
            if let Some(variant) = self.variant {
                settings.variant = variant;
            }
            settings
        }
    }

    /// Session driver: owns the state and the keyboard snapshot
    pub struct Game {
        pub state: GameState,
        input: InputState,
    }

    impl Game {
        pub fn new(settings: Settings, seed: u64) -> Self {
            let mut input = InputState::new();
            input.autopilot = true;
            Self {
                state: GameState::new(settings, seed),
                input,
            }
        }

        /// Run one frame
        pub fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            let input = self.input.to_tick_input();
            tick(&mut self.state, &input, dt);

            let events = self.state.drain_events();
            self.input.observe(&events);
            for event in &events {
                match event {
                    GameEvent::Started => log::info!("Session {} running", self.state.seed),
                    GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
                    GameEvent::Win { score } => log::info!("Win, score {}", score),
                    GameEvent::ObjectSmashed { .. } | GameEvent::TrafficCollision { .. } => {}
                }
            }
        }

        pub fn is_finished(&self) -> bool {
            matches!(self.state.phase, GamePhase::GameOver | GamePhase::Win)
        }
    }

    pub fn run() {
        let options = Options::parse();
        let settings = options.resolved_settings();
        log::info!(
            "Trash Crash (headless) seed {} for {}s, variant {}",
            options.seed,
            options.seconds,
            settings.variant.as_str()
        );

        let mut game = Game::new(settings, options.seed);
        let frames = (options.seconds / FRAME_DT).ceil() as u64;
        for _ in 0..frames {
            game.update(FRAME_DT);
            if game.is_finished() {
                break;
            }
        }

        match serde_json::to_string_pretty(&game.state.hud()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize HUD: {}", e),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner is native-only; the library is what a web host links
}
