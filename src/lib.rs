//! CPU side skeletal animation
//!
//! A frame runs as a strict pipeline for each skinned model instance:
//! 1. `AnimationClip::update` samples its curves into the joints' deformed
//!    poses
//! 2. `Skeleton::update` composes each joint's local pose, accumulates it
//!    down the joint tree and applies the inverse bind matrices
//! 3. `skinning` blends the resulting final matrices per vertex
//!
//! `Rig` bundles the three for one model instance. The `hierarchy` module
//! holds the scene side tree that skeletons can be built from.
pub mod animation;
pub mod hierarchy;
pub mod options;
pub mod rig;
pub mod sk_error;
pub mod skeleton;
pub mod skinning;
pub mod types;
