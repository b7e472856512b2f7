#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! # Blockscape
//!
//! A streaming voxel-world renderer: an infinite Perlin terrain split into
//! 16×255×16 chunks, generated and meshed around a free-flying camera and
//! culled against its view frustum.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input and the per-frame loop
//! * `engine_state` - Camera, voxels, meshing, streaming and the render backend seam
//!
//! ## Architecture
//!
//! Drawing goes through the `RenderBackend` trait, so the engine itself owns
//! no GPU state. `HeadlessBackend` records uploads and draws in memory, which
//! is what `run()` and the tests use.
//!
//! ## Usage
//!
//! ```ignore
//! fn main() {
//!     if let Err(err) = blockscape::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::env;

use application_state::{
    config::{ConfigError, EngineConfig},
    input_state::Key,
    ApplicationState,
};
use engine_state::rendering::{headless::HeadlessBackend, texture::GeneratedAtlas};
use log::{info, warn};
use web_time::{Duration, Instant};

pub mod application_state;
pub mod engine_state;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "BLOCKSCAPE_CONFIG";

const SESSION_FRAMES: u32 = 600;
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Runs a headless session: streams the world while walking and turning the
/// camera along a fixed script, then logs what the backend saw.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG");
    if log_builder.try_init().is_err() {
        warn!("Logger was already initialized");
    }
    info!("Logger initialized");

    let mut config = match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => EngineConfig::load(path)?,
        None => {
            let config = EngineConfig::default();
            config.validate()?;
            config
        }
    };

    let seed = config.pin_seed();
    let atlas = GeneratedAtlas::new(u64::from(seed));
    let mut app = ApplicationState::new(&config, HeadlessBackend::new(), &atlas);

    let started = Instant::now();
    let mut totals = application_state::FrameStats::default();
    for frame in 0..SESSION_FRAMES {
        script_input(&mut app, frame);
        let stats = app.frame_with_delta(FRAME_TIME);

        totals.report.generated += stats.report.generated;
        totals.report.meshed += stats.report.meshed;
        totals.report.unloaded += stats.report.unloaded;
        totals.report.evicted += stats.report.evicted;
        totals.drawn += stats.drawn;
    }

    let engine = &app.engine_state;
    let analytics = engine.backend().analytics();
    info!(
        "Session of {} frames finished in {:?}",
        SESSION_FRAMES,
        started.elapsed()
    );
    info!(
        "Generated {} chunks, meshed {}, unloaded {}, evicted {}",
        totals.report.generated, totals.report.meshed, totals.report.unloaded, totals.report.evicted
    );
    info!(
        "Camera ended at {:?} in chunk {:?}; {} chunks retained, {} meshes live",
        engine.camera_state.camera.position(),
        engine.player_chunk(),
        engine.world.len(),
        engine.backend().live_meshes()
    );
    info!(
        "Backend: {} uploads, {} releases, peak {} bytes, {:.1} chunks drawn per frame",
        analytics.uploads,
        analytics.releases,
        analytics.peak_memory,
        totals.drawn as f64 / f64::from(SESSION_FRAMES)
    );

    Ok(())
}

/// Walks forward for the whole session, turning right during the middle third.
fn script_input(app: &mut ApplicationState<HeadlessBackend>, frame: u32) {
    if frame == 0 {
        app.input_manager.intake_key(Key::W, true);
    }
    if (SESSION_FRAMES / 3..2 * SESSION_FRAMES / 3).contains(&frame) {
        app.input_manager.intake_mouse_motion((20.0, 0.0));
    }
}
