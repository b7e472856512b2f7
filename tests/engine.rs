use std::sync::Arc;

use blockscape::{
    application_state::{config::EngineConfig, input_state::Key, ApplicationState},
    engine_state::{
        rendering::{headless::HeadlessBackend, texture::GeneratedAtlas, RenderBackend},
        voxels::{chunk::ChunkCoord, noise::ConstantNoise},
        EngineState,
    },
};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(100);

fn config(render_distance: u32) -> EngineConfig {
    let mut config = EngineConfig::from_json_str(&format!(
        r#"{{ "render_distance": {render_distance}, "camera": {{ "move_speed": 40.0 }} }}"#
    ))
    .unwrap();
    config.camera.start_position = [8.0, 60.0, 8.0];
    config
}

fn flat_app(render_distance: u32) -> ApplicationState<HeadlessBackend> {
    let engine = EngineState::with_noise_source(
        &config(render_distance),
        HeadlessBackend::new(),
        &GeneratedAtlas::new(3),
        Arc::new(ConstantNoise(0.3)),
    );
    ApplicationState::from_engine(engine)
}

#[test]
fn walking_forward_streams_new_chunks() {
    let mut app = flat_app(1);
    app.frame_with_delta(FRAME);
    assert_eq!(app.engine_state.player_chunk(), ChunkCoord::new(0, 0));

    app.input_manager.intake_key(Key::W, true);
    for _ in 0..5 {
        app.frame_with_delta(FRAME);
    }

    let engine = &app.engine_state;
    assert_eq!(engine.player_chunk(), ChunkCoord::new(0, -1));
    assert!(engine.streamer.is_converged());
    assert!(engine.streamer.is_rendered(ChunkCoord::new(0, -2)));
    assert!(!engine.streamer.is_rendered(ChunkCoord::new(0, 1)));
    assert!(engine.world.contains(ChunkCoord::new(0, 1)));
    assert_eq!(engine.backend().live_meshes(), 9);
}

#[test]
fn turning_changes_what_is_drawn() {
    let mut app = flat_app(2);
    let facing_north = app.frame_with_delta(FRAME).drawn;
    let north_draws = app.engine_state.backend().last_draws().to_vec();

    // Half a turn at the default sensitivity.
    app.input_manager
        .intake_mouse_motion((std::f64::consts::PI * 4000.0, 0.0));
    let facing_south = app.frame_with_delta(FRAME).drawn;
    let south_draws = app.engine_state.backend().last_draws().to_vec();

    assert!(facing_north > 0 && facing_south > 0);
    assert!(north_draws.iter().any(|draw| draw.coord == ChunkCoord::new(0, -2)));
    assert!(south_draws.iter().any(|draw| draw.coord == ChunkCoord::new(0, 2)));
    assert!(!south_draws.iter().any(|draw| draw.coord == ChunkCoord::new(0, -2)));
}

#[test]
fn seeded_engine_uploads_atlas_and_transform() {
    let mut config = config(1);
    config.seed = Some(42);
    let mut engine = EngineState::new(&config, HeadlessBackend::new(), &GeneratedAtlas::new(42));
    assert_eq!(engine.seed(), 42);

    engine.update();
    let drawn = engine.render();

    let backend = engine.backend();
    assert_eq!(backend.atlas_size(), Some((80, 96)));
    assert_eq!(backend.transform(), engine.camera_state.camera.transform());
    assert_eq!(backend.last_draws().len(), drawn);

    engine.backend_mut().release_mesh(blockscape::engine_state::rendering::MeshHandle(u64::MAX));
    assert_eq!(engine.backend().analytics().invalid_releases, 1);
}

#[test]
fn pinned_random_seed_reaches_engine() {
    let mut config = config(0);
    config.seed = None;
    let seed = config.pin_seed();

    let engine = EngineState::new(&config, HeadlessBackend::new(), &GeneratedAtlas::new(u64::from(seed)));
    assert_eq!(engine.seed(), seed);
}

#[test]
fn resize_updates_transform_while_idle() {
    let mut app = flat_app(1);
    app.frame_with_delta(FRAME);
    let before = *app.engine_state.backend().transform();

    app.engine_state.resize(800, 800);
    app.frame_with_delta(FRAME);

    assert_ne!(*app.engine_state.backend().transform(), before);
}
