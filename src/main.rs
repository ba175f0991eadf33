//! Sandy Shore entry point
//!
//! Native headless runner: plays one run on autopilot at the fixed frame
//! rate, hands every frame's sprites to an instance buffer and logs how the
//! run went.
//!
//! Usage: `sandy-shore [settings.json] [seed] [pierce|single]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use sandy_shore::{HitPolicy, Settings};
use sandy_shore::assets::HandleRegistry;
use sandy_shore::renderer::InstanceBuffer;
use sandy_shore::sim::{Catalog, GameEvent, GameState, TickInput, draw, tick};

/// Longest run the demo plays, in seconds of game time
const DEMO_SECONDS: u64 = 5 * 60;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sandy Shore (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {arg:?}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default(),
    };
    if let Some(arg) = args.next() {
        let Some(policy) = HitPolicy::from_str(&arg) else {
            log::error!("Unknown hit policy {arg:?}, expected pierce or single");
            return ExitCode::FAILURE;
        };
        settings.hit_policy = policy;
    }
    log::info!("Hit policy: {}", settings.hit_policy.as_str());

    let mut textures = HandleRegistry::new();
    let catalog = Catalog::new(&settings, &mut textures);
    log::info!("Loaded {} textures", textures.len());

    let mut state = GameState::new(seed, &settings);
    log::info!("Game initialized with seed: {seed}");

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut buffer = InstanceBuffer::with_capacity(settings.pools.total() + 1);
    let total_frames = DEMO_SECONDS * u64::from(settings.fps);
    let mut waves = 0u32;

    while state.frame < total_frames && !state.is_over() {
        tick(&mut state, &catalog, &input);

        for event in &state.events {
            match event {
                GameEvent::WaveSpawned(report) if report.new_wave => waves += 1,
                GameEvent::TierChanged(tier) => {
                    log::info!("{}s: tier {tier:?}", state.elapsed_secs())
                }
                GameEvent::PlayerHit { damage, health } => {
                    log::debug!("Hit for {damage}, {health} left")
                }
                GameEvent::PowerUpCollected(kind) => log::debug!("Collected {kind:?}"),
                _ => {}
            }
        }

        buffer.clear();
        draw(&state, &catalog, &mut buffer);
        log::trace!(
            "Frame {}: {} sprites ({} bytes)",
            state.frame,
            buffer.len(),
            buffer.as_bytes().len()
        );
    }

    log::info!(
        "Run finished after {}s: {} waves, score {}, health {}{}",
        state.elapsed_secs(),
        waves,
        state.score,
        state.player.health,
        if state.is_over() { " (game over)" } else { "" }
    );
    ExitCode::SUCCESS
}
