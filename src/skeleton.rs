mod import;
mod joint;
mod tree;

// Re-exports
pub use {import::ImportJoint, joint::Joint, tree::Skeleton};
