use super::tree::Skeleton;
use crate::{hierarchy::Hierarchy, sk_error::SkError, types::NO_PARENT};
use ahash::{HashMap, HashMapExt};
use log::debug;
use nalgebra_glm as glm;
use std::{fmt::Debug, hash::Hash};

/// Joint as delivered by an importer
///
/// `parent` is a joint index, or `NO_PARENT` for the root. `node_id` is the
/// index of the node in the source scene that this joint was made from;
/// animation channels from the same source refer to joints by that id.
#[derive(Clone, Debug)]
pub struct ImportJoint {
    pub name: String,
    pub inverse_bind: glm::Mat4,
    pub parent: i32,
    pub node_id: usize,
}

impl Skeleton {
    /// Builds a skeleton from the joints of a skin that lives in a hierarchy
    /// graph. `skin_nodes[i]` is the graph node of joint `i` and
    /// `inverse_binds[i]` its inverse bind matrix. The first skin node is the
    /// root. Each other joint's parent is its nearest ancestor in the graph
    /// that is also a skin node, so plain (non joint) nodes in between are
    /// skipped. Joint names are taken from the graph.
    ///
    /// # Errors
    /// Returns `SkError::CountMismatch` if the two slices differ in length,
    /// `SkError::UnknownNode` if a skin node is not below the first one in the
    /// graph, or any error from `Skeleton::new`.
    pub fn from_hierarchy<H>(
        name: &str,
        graph: &Hierarchy<H>,
        skin_nodes: &[usize],
        inverse_binds: &[glm::Mat4],
    ) -> Result<Self, SkError>
    where
        H: Copy + Eq + Hash + Debug,
    {
        if skin_nodes.len() != inverse_binds.len() {
            return Err(SkError::CountMismatch);
        }
        let Some(&root_node) = skin_nodes.first() else {
            return Err(SkError::NoRootJoint);
        };

        let mut node_to_joint = HashMap::with_capacity(skin_nodes.len());
        for (joint, node) in skin_nodes.iter().enumerate() {
            if node_to_joint.insert(*node, joint).is_some() {
                return Err(SkError::DuplicateNode(*node));
            }
        }

        let mut names = vec![String::new(); skin_nodes.len()];
        let mut parents: Vec<Option<Option<usize>>> =
            vec![None; skin_nodes.len()];
        // Joints on the path from the skin root to the current node, with
        // their depth in the walk
        let mut ancestors: Vec<(usize, usize)> = Vec::new();
        graph.traverse(root_node, |node_index, depth, node| {
            while ancestors.last().is_some_and(|(d, _)| *d >= depth) {
                ancestors.pop();
            }
            if let Some(&joint) = node_to_joint.get(&node_index) {
                names[joint] = node.name().to_string();
                parents[joint] = Some(ancestors.last().map(|(_, p)| *p));
                ancestors.push((depth, joint));
            }
        });

        let mut import = Vec::with_capacity(skin_nodes.len());
        for (joint, ((node, inverse_bind), joint_name)) in
            skin_nodes.iter().zip(inverse_binds).zip(names).enumerate()
        {
            let parent = match parents[joint] {
                None => return Err(SkError::UnknownNode(*node)),
                Some(None) => NO_PARENT,
                Some(Some(p)) => parent_index(p)?,
            };
            debug!(
                "joint={} node={} name={} parent={}",
                joint, node, joint_name, parent
            );
            import.push(ImportJoint {
                name: joint_name,
                inverse_bind: *inverse_bind,
                parent,
                node_id: *node,
            });
        }
        Self::new(name, import)
    }
}

/// Importer records store parents as `i32`
fn parent_index(joint: usize) -> Result<i32, SkError> {
    i32::try_from(joint).map_err(|_| SkError::JointIndexTooLarge(joint))
}
