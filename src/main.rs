//! Flappy Core entry point
//!
//! Native builds run a headless autopilot over a few sessions and log the
//! results. The web build is driven from JS through `WebFlight`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_core::consts::*;
    use flappy_core::platform::{default_slot, run_seed};
    use flappy_core::sim::{
        FlightController, GameEvent, KinematicPhysics, Physics, SessionSignal, SessionState,
        Viewport,
    };
    use flappy_core::{FlightConfig, KeyValueSlot, Preset};

    /// Frame time the autopilot pretends the display runs at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// A session that survives this long is stopped
    const SESSION_LIMIT_SECS: f32 = 60.0;

    /// Flap when the bird sinks below the middle of the next gap
    fn wants_flap(state: &SessionState) -> bool {
        let bird = &state.bird;
        if bird.velocity_y < 0.0 {
            return false;
        }
        let target = state
            .pipes
            .iter()
            .filter(|p| p.right() >= bird.pos.x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|p| (p.gap_top() + p.gap_bottom()) / 2.0)
            .unwrap_or(state.viewport.height / 2.0);
        bird.pos.y + bird.size.y > target + bird.size.y / 2.0
    }

    /// Play one session; returns the final score
    fn play_session<P: Physics, S: KeyValueSlot>(controller: &mut FlightController<P, S>) -> u64 {
        controller.handle(GameEvent::PointerDown);

        let mut accumulator = 0.0;
        let mut elapsed = 0.0;
        while elapsed < SESSION_LIMIT_SECS {
            accumulator += FRAME_DT;
            elapsed += FRAME_DT;

            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if wants_flap(controller.state()) {
                    controller.handle(GameEvent::PointerDown);
                }
                for signal in controller.handle(GameEvent::Frame { dt: SIM_DT }) {
                    if let SessionSignal::SessionEnded { score, .. } = signal {
                        return score;
                    }
                }
                accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        log::info!("Session hit the {}s limit", SESSION_LIMIT_SECS);
        let score = controller.state().score;
        controller.handle(GameEvent::Collision);
        score
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let preset = args
            .next()
            .map(|name| {
                Preset::from_str(&name).unwrap_or_else(|| {
                    log::warn!("Unknown preset {:?}, using default", name);
                    Preset::default()
                })
            })
            .unwrap_or_default();
        let sessions: u32 = args.next().and_then(|n| n.parse().ok()).unwrap_or(3);

        let config = FlightConfig::from_preset(preset);
        let physics = KinematicPhysics::new(config.gravity);
        let seed = run_seed();
        log::info!("Seed {}", seed);

        let mut controller = FlightController::new(
            config,
            Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            physics,
            default_slot(),
            seed,
        );

        for n in 1..=sessions {
            let score = play_session(&mut controller);
            log::info!(
                "Session {}/{}: score {} ({})",
                n,
                sessions,
                score,
                controller.state().high_score_text()
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy core (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is WebFlight / wasm_start in the library
}
