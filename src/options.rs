use crate::{sk_error::SkError, types::PARALLEL_MIN_VERTICES};
use serde::{Deserialize, Serialize};

/// Per instance playback settings
///
/// Missing fields take their default value when deserializing, so a YAML
/// document only needs to list what it changes:
/// ```yaml
/// speed: 0.5
/// max_delta: 0.1
/// ```
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Loop clips started through a `Rig`
    pub repeat: bool,
    /// Setting this false shows the bind pose
    pub animated: bool,
    /// Multiplier for the caller's time step
    pub speed: f32,
    /// Upper limit for a (scaled) time step. There is no limit by default, so
    /// a long stall skips keyframes.
    pub max_delta: Option<f32>,
    /// Vertex count from which bulk skinning goes parallel. Only used with
    /// the `rayon` feature.
    pub parallel_skinning: usize,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            repeat: true,
            animated: true,
            speed: 1.0_f32,
            max_delta: None,
            parallel_skinning: PARALLEL_MIN_VERTICES,
        }
    }
}

impl PlaybackOptions {
    /// # Errors
    /// May return `SkError`
    pub fn from_yaml(yaml: &str) -> Result<Self, SkError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// # Errors
    /// May return `SkError`
    pub fn to_yaml(&self) -> Result<String, SkError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Applies speed and the optional limit to a caller's time step
    #[must_use]
    pub fn frame_delta(&self, timestep: f32) -> f32 {
        let scaled = timestep * self.speed;
        self.max_delta.map_or(scaled, |m| scaled.min(m))
    }
}
