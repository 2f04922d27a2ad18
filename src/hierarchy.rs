//! Index based tree associating external entity handles with named nodes.
//!
//! Nodes live in a flat arena and refer to their children by index. Nodes are
//! only ever appended, and a new node can only become the child of a node
//! that already exists, so a child always has a higher index than its parent
//! and the structure can never contain a cycle.
use crate::sk_error::SkError;
use ahash::{HashMap, HashMapExt};
use log::info;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::{fmt::Debug, hash::Hash};

/// Index of the first root created in a hierarchy
pub const ROOT_NODE: usize = 0;

/// A node of the hierarchy. `H` is the opaque handle of whatever external
/// object (typically an ECS entity) the node stands for.
#[derive(Clone, Debug)]
pub struct TreeNode<H> {
    handle: H,
    name: String,
    children: SmallVec<[usize; 4]>,
}

impl<H: Copy> TreeNode<H> {
    fn new(handle: H, name: &str) -> Self {
        Self {
            handle,
            name: name.to_string(),
            children: SmallVec::new(),
        }
    }

    #[must_use]
    pub const fn handle(&self) -> H {
        self.handle
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, child_index: usize) -> Option<usize> {
        self.children.get(child_index).copied()
    }
}

struct Inner<H> {
    nodes: Vec<TreeNode<H>>,
    by_handle: HashMap<H, usize>,
}

/// Hierarchy graph that may be filled from several import threads.
/// All access goes through one `parking_lot::Mutex`. Once importing is done
/// and the owner has exclusive access, `nodes` borrows the arena without
/// taking the lock at all.
pub struct Hierarchy<H> {
    inner: Mutex<Inner<H>>,
}

impl<H: Copy + Eq + Hash + Debug> Hierarchy<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                nodes: Vec::new(),
                by_handle: HashMap::new(),
            }),
        }
    }

    /// Appends a node with no parent and returns its index. For an empty
    /// hierarchy this is always `ROOT_NODE`.
    pub fn create_root(&self, handle: H, name: &str) -> usize {
        let mut inner = self.inner.lock();
        let index = inner.nodes.len();
        inner.nodes.push(TreeNode::new(handle, name));
        inner.by_handle.insert(handle, index);
        index
    }

    /// Appends a node as the last child of `parent` and returns its index
    ///
    /// # Errors
    /// Returns `SkError::InvalidParent` if `parent` is not a node of this
    /// hierarchy. Nothing is added in that case.
    pub fn create_node(
        &self,
        parent: usize,
        handle: H,
        name: &str,
    ) -> Result<usize, SkError> {
        let mut inner = self.inner.lock();
        let index = inner.nodes.len();
        inner
            .nodes
            .get_mut(parent)
            .ok_or(SkError::InvalidParent(parent))?
            .children
            .push(index);
        inner.nodes.push(TreeNode::new(handle, name));
        inner.by_handle.insert(handle, index);
        drop(inner);
        Ok(index)
    }

    /// Returns a copy of the node at `index`
    #[must_use]
    pub fn node(&self, index: usize) -> Option<TreeNode<H>> {
        self.inner.lock().nodes.get(index).cloned()
    }

    /// Returns a copy of the node most recently created for `handle`
    #[must_use]
    pub fn node_by_handle(&self, handle: H) -> Option<TreeNode<H>> {
        let inner = self.inner.lock();
        inner
            .by_handle
            .get(&handle)
            .and_then(|index| inner.nodes.get(*index))
            .cloned()
    }

    #[must_use]
    pub fn index_of(&self, handle: H) -> Option<usize> {
        self.inner.lock().by_handle.get(&handle).copied()
    }

    #[must_use]
    pub fn root(&self) -> Option<TreeNode<H>> {
        self.node(ROOT_NODE)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().nodes.is_empty()
    }

    /// Lock free view of every node. The exclusive borrow guarantees no
    /// import thread is still writing.
    pub fn nodes(&mut self) -> &[TreeNode<H>] {
        &self.inner.get_mut().nodes
    }

    /// Visits the subtree starting at `index` depth first, each parent
    /// before its children and children in insertion order. The visitor
    /// receives the node index, its depth below `index` and the node.
    ///
    /// The lock is held for the whole walk, so the visitor must not call
    /// back into this hierarchy. An out of range `index` visits nothing.
    pub fn traverse<F>(&self, index: usize, mut visitor: F)
    where
        F: FnMut(usize, usize, &TreeNode<H>),
    {
        let inner = self.inner.lock();
        let mut stack = vec![(index, 0_usize)];
        while let Some((node_index, depth)) = stack.pop() {
            let Some(node) = inner.nodes.get(node_index) else {
                continue;
            };
            visitor(node_index, depth, node);
            // Reversed so the first child is popped first
            stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
        }
    }

    /// Logs the subtree starting at `index`
    pub fn traverse_log(&self, index: usize) {
        self.traverse(index, |_, depth, node| {
            info!(
                "{:indent$}handle `{:?}`, name: `{}`",
                "",
                node.handle,
                node.name,
                indent = depth * 4
            );
        });
    }
}

impl<H: Copy + Eq + Hash + Debug> Default for Hierarchy<H> {
    fn default() -> Self {
        Self::new()
    }
}
