//! Linear blend skinning on the CPU
//!
//! Each vertex is moved by a weighted sum of up to `MAX_INFLUENCES` final
//! joint matrices. The matrices themselves are blended, not decomposed
//! transforms. Weights are used as they come: a vertex whose weights do not
//! add up to 1 ends up scaled, which points at a problem in the imported data
//! rather than something to correct here.
use crate::{
    sk_error::SkError,
    skeleton::Skeleton,
    types::{MAX_INFLUENCES, PARALLEL_MIN_VERTICES},
};
use itertools::izip;
use log::trace;
use nalgebra_glm as glm;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Skinning data of one vertex, as provided by an importer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkinningInput {
    pub joint_indices: [u16; MAX_INFLUENCES],
    pub joint_weights: [f32; MAX_INFLUENCES],
    pub position: glm::Vec3,
}

impl SkinningInput {
    /// Zips the importer's parallel per vertex arrays
    ///
    /// # Errors
    /// Returns `SkError::CountMismatch` if the arrays differ in length
    pub fn from_arrays(
        joint_indices: &[[u16; MAX_INFLUENCES]],
        joint_weights: &[[f32; MAX_INFLUENCES]],
        positions: &[glm::Vec3],
    ) -> Result<Vec<Self>, SkError> {
        if joint_indices.len() != positions.len()
            || joint_weights.len() != positions.len()
        {
            return Err(SkError::CountMismatch);
        }
        Ok(izip!(joint_indices, joint_weights, positions)
            .map(|(i, w, p)| Self {
                joint_indices: *i,
                joint_weights: *w,
                position: *p,
            })
            .collect())
    }

    #[must_use]
    pub fn skin(&self, matrices: &[glm::Mat4]) -> glm::Vec3 {
        skin_vertex(
            &self.position,
            &self.joint_indices,
            &self.joint_weights,
            matrices,
        )
    }
}

/// Weighted sum of the influencing joint matrices. An index with no matching
/// matrix contributes nothing.
#[must_use]
pub fn blend_matrix(
    joint_indices: &[u16; MAX_INFLUENCES],
    joint_weights: &[f32; MAX_INFLUENCES],
    matrices: &[glm::Mat4],
) -> glm::Mat4 {
    let mut blended = glm::Mat4::zeros();
    for (index, weight) in joint_indices.iter().zip(joint_weights) {
        if let Some(m) = matrices.get(usize::from(*index)) {
            blended += m * *weight;
        } else {
            trace!("joint index {} out of range, ignored", index);
        }
    }
    blended
}

/// Moves a bind pose position by its joints' final matrices
#[must_use]
pub fn skin_vertex(
    position: &glm::Vec3,
    joint_indices: &[u16; MAX_INFLUENCES],
    joint_weights: &[f32; MAX_INFLUENCES],
    matrices: &[glm::Mat4],
) -> glm::Vec3 {
    let blended = blend_matrix(joint_indices, joint_weights, matrices);
    (blended * glm::vec4(position.x, position.y, position.z, 1.0_f32)).xyz()
}

/// Turns a bind pose normal with the same blend as `skin_vertex`. The result
/// is unit length, or zero if the blend collapses it.
#[must_use]
pub fn skin_normal(
    normal: &glm::Vec3,
    joint_indices: &[u16; MAX_INFLUENCES],
    joint_weights: &[f32; MAX_INFLUENCES],
    matrices: &[glm::Mat4],
) -> glm::Vec3 {
    let blended = blend_matrix(joint_indices, joint_weights, matrices);
    (blended * glm::vec4(normal.x, normal.y, normal.z, 0.0_f32))
        .xyz()
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(glm::Vec3::zeros)
}

/// Skins a whole vertex buffer. Vertices are independent so with the `rayon`
/// feature, buffers of at least `parallel_min` vertices are split across
/// threads.
#[must_use]
#[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
pub fn skin_vertex_buffer(
    inputs: &[SkinningInput],
    matrices: &[glm::Mat4],
    parallel_min: usize,
) -> Vec<glm::Vec3> {
    #[cfg(feature = "rayon")]
    {
        if inputs.len() >= parallel_min {
            return inputs.par_iter().map(|v| v.skin(matrices)).collect();
        }
    }
    inputs.iter().map(|v| v.skin(matrices)).collect()
}

/// Skins a vertex buffer with a skeleton's latest final matrices
#[must_use]
pub fn skin_mesh(
    inputs: &[SkinningInput],
    skeleton: &Skeleton,
) -> Vec<glm::Vec3> {
    skin_vertex_buffer(
        inputs,
        skeleton.final_joint_matrices(),
        PARALLEL_MIN_VERTICES,
    )
}
