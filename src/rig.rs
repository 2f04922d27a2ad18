use crate::{
    animation::{AnimationClip, Animator},
    options::PlaybackOptions,
    sk_error::SkError,
    skeleton::Skeleton,
    skinning::{self, SkinningInput},
    types::JointMatrix,
};
use log::debug;
use nalgebra_glm as glm;

/// One instance of a skinned model: its own skeleton, its own clips and its
/// playback settings
///
/// Nothing mutable is shared between rigs, so several instances of the same
/// asset (each built from a clone of the skeleton and clips) can be updated
/// independently, on different threads if desired.
#[derive(Clone, Debug)]
pub struct Rig {
    skeleton: Skeleton,
    animator: Animator,
    options: PlaybackOptions,
}

impl Rig {
    #[must_use]
    pub fn new(
        mut skeleton: Skeleton,
        clips: Vec<AnimationClip>,
        options: PlaybackOptions,
    ) -> Self {
        skeleton.set_animated(options.animated);
        Self {
            skeleton,
            animator: Animator::new(clips),
            options,
        }
    }

    /// Plays a clip by name using the rig's repeat setting
    ///
    /// # Errors
    /// Returns `SkError` if there is no such clip, or if the clip drives
    /// joints the skeleton does not have.
    pub fn play(&mut self, name: &str) -> Result<(), SkError> {
        if let Some(clip) =
            self.animator.clips().iter().find(|c| c.name() == name)
        {
            clip.validate_for(&self.skeleton)?;
        }
        self.animator.play(name)?;
        self.animator.set_repeat(self.options.repeat);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Runs one frame: the active clip poses the joints, then the skeleton
    /// recalculates its final matrices. `timestep` is scaled and limited
    /// according to the options first.
    pub fn update(&mut self, timestep: f32) {
        let delta = self.options.frame_delta(timestep);
        if self.options.max_delta.is_some_and(|m| delta >= m) {
            debug!("time step {} limited to {}", timestep, delta);
        }
        self.animator.update(delta, &mut self.skeleton);
        self.skeleton.update();
    }

    /// Skins vertices with the matrices from the last `update`
    #[must_use]
    pub fn skin(&self, inputs: &[SkinningInput]) -> Vec<glm::Vec3> {
        skinning::skin_vertex_buffer(
            inputs,
            self.skeleton.final_joint_matrices(),
            self.options.parallel_skinning,
        )
    }

    #[must_use]
    pub fn final_joint_matrices(&self) -> &[glm::Mat4] {
        self.skeleton.final_joint_matrices()
    }

    #[must_use]
    pub fn joint_matrices(&self) -> Vec<JointMatrix> {
        self.skeleton.joint_matrices()
    }

    #[must_use]
    pub const fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    #[must_use]
    pub const fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    #[must_use]
    pub const fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Replaces the options. Repeat is applied to the active clip straight
    /// away.
    pub fn set_options(&mut self, options: PlaybackOptions) {
        self.skeleton.set_animated(options.animated);
        self.animator.set_repeat(options.repeat);
        self.options = options;
    }
}
