use nalgebra_glm as glm;
use smallvec::SmallVec;

/// One joint of a skeleton
///
/// The deformed fields hold the joint's current local pose. They are written
/// by animation clips (or directly, for a fixed pose) and read once per frame
/// by `Skeleton::update`. The inverse bind matrix and the links to other
/// joints are fixed when the skeleton is built.
#[derive(Clone, Debug)]
pub struct Joint {
    name: String,
    inverse_bind: glm::Mat4,
    pub deformed_translation: glm::Vec3,
    pub deformed_rotation: glm::Quat,
    pub deformed_scale: glm::Vec3,
    pub(super) parent: Option<usize>,
    pub(super) children: SmallVec<[usize; 4]>,
}

impl Joint {
    pub(super) fn new(
        name: String,
        inverse_bind: glm::Mat4,
        parent: Option<usize>,
    ) -> Self {
        Self {
            name,
            inverse_bind,
            deformed_translation: glm::Vec3::zeros(),
            deformed_rotation: glm::Quat::identity(),
            deformed_scale: glm::vec3(1.0_f32, 1.0_f32, 1.0_f32),
            parent,
            children: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn inverse_bind(&self) -> &glm::Mat4 {
        &self.inverse_bind
    }

    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Local matrix of the deformed pose. Scale is applied first, then
    /// rotation, then translation (read right to left). Any other order gives
    /// wrong results as soon as scale is non-uniform or rotation and
    /// translation are combined.
    #[must_use]
    pub fn deformed_local(&self) -> glm::Mat4 {
        glm::translation(&self.deformed_translation)
            * glm::quat_to_mat4(&self.deformed_rotation)
            * glm::scaling(&self.deformed_scale)
    }

    /// Puts the deformation back to identity
    pub fn reset_pose(&mut self) {
        self.deformed_translation = glm::Vec3::zeros();
        self.deformed_rotation = glm::Quat::identity();
        self.deformed_scale = glm::vec3(1.0_f32, 1.0_f32, 1.0_f32);
    }
}
