use super::clip::AnimationClip;
use crate::{sk_error::SkError, skeleton::Skeleton};
use log::info;

/// The clips of one model instance and which of them is playing
///
/// Each instance of an animated model gets its own `Animator` (cloned from a
/// template if needed) since clips carry their playback clock.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    clips: Vec<AnimationClip>,
    active: Option<usize>,
}

impl Animator {
    #[must_use]
    pub const fn new(clips: Vec<AnimationClip>) -> Self {
        Self {
            clips,
            active: None,
        }
    }

    /// Adds a clip and returns its index
    pub fn add(&mut self, clip: AnimationClip) -> usize {
        self.clips.push(clip);
        self.clips.len() - 1
    }

    /// Starts the first clip called `name` from its beginning
    ///
    /// # Errors
    /// Returns `SkError::ClipNotFound` if there is no such clip
    pub fn play(&mut self, name: &str) -> Result<(), SkError> {
        let index = self
            .clips
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| SkError::ClipNotFound(name.to_string()))?;
        self.play_index(index)
    }

    /// Starts the clip at `index` from its beginning
    ///
    /// # Errors
    /// Returns `SkError::NoClip` if `index` is out of range
    pub fn play_index(&mut self, index: usize) -> Result<(), SkError> {
        let clip = self.clips.get_mut(index).ok_or(SkError::NoClip(index))?;
        info!("Playing animation {}", clip.name());
        clip.start();
        self.active = Some(index);
        Ok(())
    }

    /// Stops the active clip, if any
    pub fn stop(&mut self) {
        if let Some(clip) = self.active_mut() {
            clip.stop();
        }
        self.active = None;
    }

    /// Advances the active clip. Does nothing if no clip is playing.
    pub fn update(&mut self, timestep: f32, skeleton: &mut Skeleton) {
        if let Some(clip) = self.active_mut() {
            clip.update(timestep, skeleton);
        }
    }

    /// Sets repeat on the active clip
    pub fn set_repeat(&mut self, repeat: bool) {
        if let Some(clip) = self.active_mut() {
            clip.set_repeat(repeat);
        }
    }

    /// True while the active clip is running
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active().is_some_and(AnimationClip::is_running)
    }

    #[must_use]
    pub fn active(&self) -> Option<&AnimationClip> {
        self.active.and_then(|i| self.clips.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut AnimationClip> {
        self.active.and_then(|i| self.clips.get_mut(i))
    }

    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    pub fn clip_mut(&mut self, index: usize) -> Option<&mut AnimationClip> {
        self.clips.get_mut(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(AnimationClip::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Interpolation, Sampler};
    use nalgebra_glm as glm;

    fn clip(name: &str) -> AnimationClip {
        let sampler = Sampler::from_vec3(
            vec![0.0, 1.0],
            &[glm::Vec3::zeros(), glm::Vec3::zeros()],
            Interpolation::Linear,
        );
        AnimationClip::new(name, vec![sampler], vec![]).unwrap()
    }

    #[test]
    fn play_by_name() {
        let mut animator = Animator::new(vec![clip("idle"), clip("walk")]);
        assert!(!animator.is_playing());
        animator.play("walk").unwrap();
        assert_eq!(animator.active().unwrap().name(), "walk");
        assert!(animator.is_playing());
        assert!(matches!(
            animator.play("run"),
            Err(SkError::ClipNotFound(_))
        ));
        // A failed play leaves the current clip alone
        assert_eq!(animator.active().unwrap().name(), "walk");
        assert!(matches!(animator.play_index(2), Err(SkError::NoClip(2))));
        animator.stop();
        assert!(animator.active().is_none());
        assert_eq!(animator.names().collect::<Vec<_>>(), vec!["idle", "walk"]);
    }
}
