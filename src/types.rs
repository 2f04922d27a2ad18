use bytemuck::{Pod, Zeroable};
use nalgebra_glm as glm;

/// Parent index used by importers for a joint without a parent
pub const NO_PARENT: i32 = -1;

/// Joint influences per vertex. Vertex data from the importer always carries
/// exactly this many indices and weights, with unused slots weighted 0.
pub const MAX_INFLUENCES: usize = 4;

/// Buffers with at least this many vertices are skinned in parallel when the
/// `rayon` feature is enabled
pub const PARALLEL_MIN_VERTICES: usize = 4096;

/// Final joint matrix in a GPU friendly layout: four columns of four floats,
/// column major, the same layout as a GLSL or WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct JointMatrix(pub [[f32; 4]; 4]);

impl From<&glm::Mat4> for JointMatrix {
    fn from(m: &glm::Mat4) -> Self {
        Self((*m).into())
    }
}

impl From<JointMatrix> for glm::Mat4 {
    fn from(m: JointMatrix) -> Self {
        m.0.into()
    }
}
