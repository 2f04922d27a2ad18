use super::{import::ImportJoint, joint::Joint};
use crate::{
    sk_error::SkError,
    types::{JointMatrix, NO_PARENT},
};
use ahash::{HashMap, HashMapExt};
use log::{debug, info};
use nalgebra_glm as glm;

/// A validated joint tree plus the per joint output matrices
///
/// The joints always form a single rooted tree. This is checked by `new`, so
/// `update` never has to guard against cycles or bad indices.
#[derive(Clone, Debug)]
pub struct Skeleton {
    name: String,
    joints: Vec<Joint>,
    node_to_joint: HashMap<usize, usize>,
    final_matrices: Vec<glm::Mat4>,
    order: Vec<usize>, // Every parent comes before its children
    root: usize,
    animated: bool,
}

impl Skeleton {
    /// Builds a skeleton from importer joint records. Children of each joint
    /// are derived from the parent links, in joint index order.
    ///
    /// # Errors
    /// Returns `SkError` if the joints do not form exactly one tree, or if two
    /// joints claim the same source node.
    pub fn new(name: &str, import: Vec<ImportJoint>) -> Result<Self, SkError> {
        let count = import.len();

        // Resolve the parent links
        let mut root = None;
        let mut parents = Vec::with_capacity(count);
        for (index, joint) in import.iter().enumerate() {
            if joint.parent == NO_PARENT {
                if let Some(other) = root {
                    return Err(SkError::MultipleRootJoints(other, index));
                }
                root = Some(index);
                parents.push(None);
            } else {
                let parent = usize::try_from(joint.parent)
                    .ok()
                    .filter(|p| *p < count)
                    .ok_or(SkError::ParentOutOfRange {
                        joint: index,
                        parent: joint.parent,
                    })?;
                if parent == index {
                    return Err(SkError::SelfParent(index));
                }
                parents.push(Some(parent));
            }
        }
        let root = root.ok_or(SkError::NoRootJoint)?;

        let mut node_to_joint = HashMap::with_capacity(count);
        let mut joints = Vec::with_capacity(count);
        for ((index, joint), parent) in import.into_iter().enumerate().zip(&parents)
        {
            if node_to_joint.insert(joint.node_id, index).is_some() {
                return Err(SkError::DuplicateNode(joint.node_id));
            }
            joints.push(Joint::new(joint.name, joint.inverse_bind, *parent));
        }
        for (index, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                joints[*parent].children.push(index);
            }
        }

        // Walk down from the root. Each joint other than the root has exactly
        // one parent, so the walk reaches every joint once at most. Anything
        // it misses hangs off a cycle.
        let mut order = Vec::with_capacity(count);
        let mut reached = vec![false; count];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            order.push(index);
            reached[index] = true;
            stack.extend(joints[index].children.iter().rev());
        }
        if let Some(missed) = reached.iter().position(|r| !r) {
            return Err(SkError::JointCycle(missed));
        }

        debug!(
            "skeleton name={} joints={} root={}",
            name,
            joints.len(),
            root
        );
        Ok(Self {
            name: name.to_string(),
            joints,
            node_to_joint,
            final_matrices: vec![glm::Mat4::identity(); count],
            order,
            root,
            animated: true,
        })
    }

    /// Recalculates every final joint matrix from the joints' deformed poses
    ///
    /// When the skeleton is not animated all outputs are identity, which
    /// leaves skinned vertices in their bind pose.
    pub fn update(&mut self) {
        if !self.animated {
            for m in &mut self.final_matrices {
                *m = glm::Mat4::identity();
            }
            return;
        }

        // Local deformation of each joint
        for (m, joint) in self.final_matrices.iter_mut().zip(&self.joints) {
            *m = joint.deformed_local();
        }

        // Accumulate down the tree. `order` has every parent ahead of its
        // children so the parent is already final when a child reads it.
        for &index in &self.order {
            if let Some(parent) = self.joints[index].parent {
                self.final_matrices[index] =
                    self.final_matrices[parent] * self.final_matrices[index];
            }
        }

        // Back into model space
        for (m, joint) in self.final_matrices.iter_mut().zip(&self.joints) {
            *m = *m * joint.inverse_bind();
        }
    }

    /// Output of the last `update`, one matrix per joint in joint order
    #[must_use]
    pub fn final_joint_matrices(&self) -> &[glm::Mat4] {
        &self.final_matrices
    }

    /// Output of the last `update` in a layout ready for a GPU buffer
    #[must_use]
    pub fn joint_matrices(&self) -> Vec<JointMatrix> {
        self.final_matrices.iter().map(JointMatrix::from).collect()
    }

    #[must_use]
    pub fn joint_index_for_node(&self, node_id: usize) -> Option<usize> {
        self.node_to_joint.get(&node_id).copied()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn joint_mut(&mut self, index: usize) -> Option<&mut Joint> {
        self.joints.get_mut(index)
    }

    /// Number of joints. A skeleton always has at least its root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// Puts every joint back to an identity deformation
    pub fn reset_pose(&mut self) {
        for joint in &mut self.joints {
            joint.reset_pose();
        }
    }

    /// Logs the joint tree
    pub fn traverse_log(&self) {
        info!("Skeleton: {}", self.name);
        let mut stack = vec![(self.root, 1_usize)];
        while let Some((index, depth)) = stack.pop() {
            let joint = &self.joints[index];
            info!(
                "{:indent$}name: {}, parent: {:?}, children: {:?}",
                "",
                joint.name(),
                joint.parent(),
                joint.children(),
                indent = depth
            );
            stack.extend(joint.children().iter().rev().map(|c| (*c, depth + 1)));
        }
    }
}
