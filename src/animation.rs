mod clip;
mod player;
mod types;
pub mod util;

// Re-exports
pub use {
    clip::AnimationClip,
    player::Animator,
    types::{Channel, Interpolation, Property, Sampler},
};
