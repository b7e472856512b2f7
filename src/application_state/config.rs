//! # Engine Configuration
//!
//! Settings loaded from a JSON file. Every field has a default, so a file
//! only needs to name what it changes:
//!
//! ```json
//! { "render_distance": 4, "camera": { "fov_degrees": 70.0 } }
//! ```

use std::{fmt, fs, io, num::NonZeroUsize, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Failure to load or accept a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(io::Error),
    /// The file is not valid configuration JSON
    Parse(serde_json::Error),
    /// A value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read configuration: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse configuration: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Largest accepted `render_distance`, in chunks.
pub const MAX_RENDER_DISTANCE: u32 = 64;

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chebyshev radius, in chunks, of the rendered square
    pub render_distance: u32,
    /// Terrain seed; `None` picks one at random
    pub seed: Option<u32>,
    /// Worker threads for chunk generation; 0 generates on the calling thread
    pub worker_threads: usize,
    /// Generation plus meshing operations allowed per frame; `None` is unbounded
    pub chunk_operations_per_frame: Option<usize>,
    /// Chunks whose block data is retained; `None` retains all of them
    pub retained_chunk_capacity: Option<usize>,
    /// Camera and controller settings
    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_distance: 10,
            seed: Some(1234),
            worker_threads: 0,
            chunk_operations_per_frame: None,
            retained_chunk_capacity: None,
            camera: CameraConfig::default(),
        }
    }
}

/// Camera projection and controller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width over height
    pub aspect_ratio: f32,
    /// Near clip distance
    pub z_near: f32,
    /// Far clip distance
    pub z_far: f32,
    /// Starting position in world space
    pub start_position: [f32; 3],
    /// World units per second
    pub move_speed: f32,
    /// Radians per unit of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            aspect_ratio: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 1000.0,
            start_position: [0.0, 40.0, 0.01],
            move_speed: 6.0,
            mouse_sensitivity: 1.0 / 4000.0,
        }
    }
}

impl EngineConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    /// Number of chunks in the rendered square.
    pub fn rendered_chunk_count(&self) -> usize {
        let side = 2 * self.render_distance as usize + 1;
        side * side
    }

    /// Checks every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_distance > MAX_RENDER_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "render_distance {} exceeds the maximum of {MAX_RENDER_DISTANCE}",
                self.render_distance
            )));
        }
        if let Some(capacity) = self.retained_chunk_capacity {
            let required = self.rendered_chunk_count();
            if capacity < required {
                return Err(ConfigError::Invalid(format!(
                    "retained_chunk_capacity {capacity} is smaller than the {required} chunks in view"
                )));
            }
        }
        if self.chunk_operations_per_frame == Some(0) {
            return Err(ConfigError::Invalid(
                "chunk_operations_per_frame must be positive".to_string(),
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees {} must lie strictly between 0 and 180",
                camera.fov_degrees
            )));
        }
        if !(camera.aspect_ratio > 0.0) {
            return Err(ConfigError::Invalid("aspect_ratio must be positive".to_string()));
        }
        if !(camera.z_near > 0.0 && camera.z_near < camera.z_far) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < z_near < z_far, got {} and {}",
                camera.z_near, camera.z_far
            )));
        }
        if !(camera.move_speed >= 0.0) || !(camera.mouse_sensitivity >= 0.0) {
            return Err(ConfigError::Invalid(
                "move_speed and mouse_sensitivity must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured seed, or a random one.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| fastrand::u32(..))
    }

    /// Resolves the seed once and stores it, so every later reader agrees.
    pub fn pin_seed(&mut self) -> u32 {
        let seed = self.resolve_seed();
        self.seed = Some(seed);
        seed
    }

    /// Retention capacity for the world's chunk cache.
    pub fn retained_capacity(&self) -> Option<NonZeroUsize> {
        self.retained_chunk_capacity.and_then(NonZeroUsize::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.render_distance, 10);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.camera.fov_degrees, 90.0);
    }

    #[test]
    fn partial_camera_keeps_other_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{ "render_distance": 2, "camera": { "z_far": 500.0 } }"#).unwrap();
        assert_eq!(config.render_distance, 2);
        assert_eq!(config.camera.z_far, 500.0);
        assert_eq!(config.camera.z_near, 0.1);
        assert_eq!(config.rendered_chunk_count(), 25);
    }

    #[test]
    fn capacity_below_view_is_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "render_distance": 1, "retained_chunk_capacity": 8 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config =
            EngineConfig::from_json_str(r#"{ "render_distance": 1, "retained_chunk_capacity": 9 }"#).unwrap();
        assert_eq!(config.retained_capacity().map(NonZeroUsize::get), Some(9));
    }

    #[test]
    fn bad_clip_planes_are_rejected() {
        let mut config = EngineConfig::default();
        config.camera.z_near = 10.0;
        config.camera.z_far = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.camera.z_near = 0.0;
        config.camera.z_far = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ render_distance: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("/nonexistent/blockscape.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn pinned_random_seed_is_stable() {
        let mut config = EngineConfig::from_json_str(r#"{ "seed": null }"#).unwrap();
        assert_eq!(config.seed, None);

        let seed = config.pin_seed();
        assert_eq!(config.seed, Some(seed));
        assert_eq!(config.resolve_seed(), seed);
        assert_eq!(config.pin_seed(), seed);
    }

    #[test]
    fn render_distance_is_bounded() {
        let at_limit = format!(r#"{{ "render_distance": {MAX_RENDER_DISTANCE} }}"#);
        assert!(EngineConfig::from_json_str(&at_limit).is_ok());

        let huge = EngineConfig::from_json_str(r#"{ "render_distance": 4294967295 }"#);
        assert!(matches!(huge, Err(ConfigError::Invalid(_))));
    }
}
