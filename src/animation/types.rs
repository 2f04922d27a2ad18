use crate::{sk_error::SkError, skeleton::Skeleton};
use nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interpolation {
    Linear,
    Step,
    /// Accepted so that files using it still load, but never evaluated.
    /// Channels using it leave their joint untouched.
    CubicSpline,
}

/// Which part of a joint's deformed pose a channel writes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Property {
    Translation,
    Rotation,
    Scale,
}

/// Time indexed curve
///
/// Each value is a `Vec4`. Translation and scale use `xyz` and ignore `w`.
/// Rotation stores a quaternion as `xyzw`. Samplers are checked when they are
/// put into an `AnimationClip`.
#[derive(Clone, Debug)]
pub struct Sampler {
    timestamps: Vec<f32>,
    values: Vec<glm::Vec4>,
    interpolation: Interpolation,
}

impl Sampler {
    #[must_use]
    pub const fn new(
        timestamps: Vec<f32>,
        values: Vec<glm::Vec4>,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            timestamps,
            values,
            interpolation,
        }
    }

    /// Convenience for translation or scale curves
    #[must_use]
    pub fn from_vec3(
        timestamps: Vec<f32>,
        values: &[glm::Vec3],
        interpolation: Interpolation,
    ) -> Self {
        let values = values
            .iter()
            .map(|v| glm::vec4(v.x, v.y, v.z, 0.0))
            .collect();
        Self::new(timestamps, values, interpolation)
    }

    /// Convenience for rotation curves
    #[must_use]
    pub fn from_quat(
        timestamps: Vec<f32>,
        values: &[glm::Quat],
        interpolation: Interpolation,
    ) -> Self {
        let values = values.iter().map(|q| q.coords).collect();
        Self::new(timestamps, values, interpolation)
    }

    #[must_use]
    pub fn timestamps(&self) -> &[f32] {
        &self.timestamps
    }

    #[must_use]
    pub fn values(&self) -> &[glm::Vec4] {
        &self.values
    }

    #[must_use]
    pub const fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Checks the sampler. `index` is only used for reporting.
    ///
    /// Cubic spline data is allowed to carry tangents (three values per
    /// timestamp) since it is never evaluated anyway.
    ///
    /// # Errors
    /// Returns `SkError` if the value count does not match the timestamp count
    /// or the timestamps are not strictly increasing.
    pub(super) fn validate(&self, index: usize) -> Result<(), SkError> {
        let count = self.timestamps.len();
        let counts_match = self.values.len() == count
            || (self.interpolation == Interpolation::CubicSpline
                && self.values.len() == count * 3);
        if !counts_match {
            return Err(SkError::ValueCountMismatch {
                sampler: index,
                timestamps: count,
                values: self.values.len(),
            });
        }
        // Written so that NaN fails too
        if !self.timestamps.windows(2).all(|w| w[1] > w[0]) {
            return Err(SkError::TimestampsNotIncreasing(index));
        }
        Ok(())
    }
}

/// Binds one sampler to one property of one joint
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Channel {
    pub sampler: usize,
    pub target: usize,
    pub property: Property,
}

impl Channel {
    #[must_use]
    pub const fn new(sampler: usize, target: usize, property: Property) -> Self {
        Self {
            sampler,
            target,
            property,
        }
    }

    /// Creates a channel for a joint identified by its source node id, as
    /// animation data from an importer usually is.
    ///
    /// # Errors
    /// Returns `SkError::UnknownNode` if the node is not one of the skeleton's
    /// joints.
    pub fn for_node(
        sampler: usize,
        node_id: usize,
        property: Property,
        skeleton: &Skeleton,
    ) -> Result<Self, SkError> {
        let target = skeleton
            .joint_index_for_node(node_id)
            .ok_or(SkError::UnknownNode(node_id))?;
        Ok(Self::new(sampler, target, property))
    }
}
