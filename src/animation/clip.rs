use super::{
    types::{Channel, Interpolation, Property, Sampler},
    util,
};
use crate::{sk_error::SkError, skeleton::Skeleton};
use log::{debug, trace, warn};

/// A named set of curves driving joints of a skeleton
///
/// The clip keeps its own clock. `start` rewinds it to the first keyframe and
/// each `update` advances it and writes the sampled values into the joints.
/// A clip does not hold on to a skeleton; one is lent to every `update`.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    name: String,
    repeat: bool,
    stopped: bool,
    first_time: f32,
    last_time: f32,
    current_time: f32,
    samplers: Vec<Sampler>,
    channels: Vec<Channel>,
}

impl AnimationClip {
    /// Creates a clip. The clip's time span covers the keyframes of every
    /// sampler. Repeat is off.
    ///
    /// # Errors
    /// Returns `SkError` if a sampler is malformed or a channel refers to a
    /// sampler that does not exist.
    pub fn new(
        name: &str,
        samplers: Vec<Sampler>,
        channels: Vec<Channel>,
    ) -> Result<Self, SkError> {
        for (index, sampler) in samplers.iter().enumerate() {
            sampler.validate(index)?;
            if sampler.interpolation() == Interpolation::CubicSpline {
                warn!(
                    "animation {} sampler {} uses unsupported cubic spline \
                     interpolation and will be ignored",
                    name, index
                );
            }
        }
        for (index, channel) in channels.iter().enumerate() {
            if channel.sampler >= samplers.len() {
                return Err(SkError::SamplerOutOfRange {
                    channel: index,
                    sampler: channel.sampler,
                });
            }
        }

        // Timestamps are validated as increasing, so the first and last of
        // each sampler are its extremes
        let mut span: Option<(f32, f32)> = None;
        for sampler in &samplers {
            if let (Some(first), Some(last)) =
                (sampler.timestamps().first(), sampler.timestamps().last())
            {
                span = Some(span.map_or((*first, *last), |(f, l)| {
                    (f.min(*first), l.max(*last))
                }));
            }
        }
        let (first_time, last_time) = span.unwrap_or((0.0_f32, 0.0_f32));
        debug!(
            "animation name={} samplers={} channels={} first={} last={}",
            name,
            samplers.len(),
            channels.len(),
            first_time,
            last_time
        );

        Ok(Self {
            name: name.to_string(),
            repeat: false,
            stopped: false,
            first_time,
            last_time,
            current_time: first_time,
            samplers,
            channels,
        })
    }

    /// Rewinds to the first keyframe and resumes a stopped clip
    pub fn start(&mut self) {
        self.current_time = self.first_time;
        self.stopped = false;
    }

    /// Stops the clip until the next `start`
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// A repeating clip runs forever. Otherwise the clip runs until its
    /// clock passes the last keyframe.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.stopped && (self.repeat || self.current_time <= self.last_time)
    }

    /// True if an `update` with `timestep` will end the clip
    #[must_use]
    pub fn will_expire(&self, timestep: f32) -> bool {
        !self.repeat && self.current_time + timestep > self.last_time
    }

    /// Advances the clock and poses the joints driven by this clip
    ///
    /// Past the last keyframe a repeating clip jumps back to the first
    /// keyframe. This happens once per call: the time is not wrapped modulo
    /// the duration, so the overshoot is dropped.
    ///
    /// Channels whose curve does not cover the current time, whose
    /// interpolation is unsupported, or whose joint is not in `skeleton`
    /// leave the joint as it was.
    pub fn update(&mut self, timestep: f32, skeleton: &mut Skeleton) {
        if !self.is_running() {
            trace!("animation {} expired", self.name);
            return;
        }
        self.current_time += timestep;
        if self.repeat && self.current_time > self.last_time {
            self.current_time = self.first_time;
        }

        let time = self.current_time;
        for (index, channel) in self.channels.iter().enumerate() {
            let sampler = &self.samplers[channel.sampler];
            if sampler.interpolation() == Interpolation::CubicSpline {
                trace!("animation {} channel {} skipped", self.name, index);
                continue;
            }
            let Some(joint) = skeleton.joint_mut(channel.target) else {
                debug!(
                    "animation {} channel {} joint {} not in skeleton",
                    self.name, index, channel.target
                );
                continue;
            };
            match channel.property {
                Property::Translation => {
                    if let Some(v) = util::sample_vec3(sampler, time) {
                        joint.deformed_translation = v;
                    }
                }
                Property::Rotation => {
                    if let Some(q) = util::sample_rotation(sampler, time) {
                        joint.deformed_rotation = q;
                    }
                }
                Property::Scale => {
                    if let Some(v) = util::sample_vec3(sampler, time) {
                        joint.deformed_scale = v;
                    }
                }
            }
        }
    }

    /// Checks that every channel targets a joint of `skeleton`
    ///
    /// # Errors
    /// Returns `SkError::TargetOutOfRange` for the first channel that does not
    pub fn validate_for(&self, skeleton: &Skeleton) -> Result<(), SkError> {
        for (index, channel) in self.channels.iter().enumerate() {
            if channel.target >= skeleton.len() {
                return Err(SkError::TargetOutOfRange {
                    channel: index,
                    joint: channel.target,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.last_time - self.first_time
    }

    /// Clock position relative to the first keyframe
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time - self.first_time
    }

    #[must_use]
    pub const fn first_keyframe_time(&self) -> f32 {
        self.first_time
    }

    #[must_use]
    pub const fn last_keyframe_time(&self) -> f32 {
        self.last_time
    }

    #[must_use]
    pub fn samplers(&self) -> &[Sampler] {
        &self.samplers
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}
