use std::{error, fmt};

/// Unified error type
///
/// Everything here is a construction time problem: a malformed joint tree,
/// a malformed sampler, or bad configuration. Once a `Skeleton` or
/// `AnimationClip` exists, per frame updates do not fail. Unsupported or
/// inconsistent data found at that point degrades silently (with a log
/// message) instead.
#[derive(Debug)]
pub enum SkError {
    NoRootJoint,
    MultipleRootJoints(usize, usize),
    ParentOutOfRange { joint: usize, parent: i32 },
    SelfParent(usize),
    JointCycle(usize),
    DuplicateNode(usize),
    UnknownNode(usize),
    JointIndexTooLarge(usize),
    CountMismatch,
    ValueCountMismatch {
        sampler: usize,
        timestamps: usize,
        values: usize,
    },
    TimestampsNotIncreasing(usize),
    SamplerOutOfRange { channel: usize, sampler: usize },
    TargetOutOfRange { channel: usize, joint: usize },
    InvalidParent(usize),
    ClipNotFound(String),
    NoClip(usize),
    SerdeYamlError(Box<serde_yaml::Error>),
}

impl error::Error for SkError {}

impl fmt::Display for SkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoRootJoint => write!(f, "skeleton has no root joint"),
            Self::MultipleRootJoints(a, b) => {
                write!(f, "joints {a} and {b} are both root joints")
            }
            Self::ParentOutOfRange { joint, parent } => {
                write!(f, "joint {joint} has out of range parent {parent}")
            }
            Self::SelfParent(a) => write!(f, "joint {a} is its own parent"),
            Self::JointCycle(a) => {
                write!(f, "joint {a} is part of a cycle in the hierarchy")
            }
            Self::DuplicateNode(a) => {
                write!(f, "node {a} is used by more than one joint")
            }
            Self::UnknownNode(a) => write!(f, "node {a} is not a joint"),
            Self::JointIndexTooLarge(a) => {
                write!(f, "joint index {a} does not fit a parent index")
            }
            Self::CountMismatch => {
                write!(f, "there is a mismatch in the count of elements")
            }
            Self::ValueCountMismatch {
                sampler,
                timestamps,
                values,
            } => {
                write!(
                    f,
                    "sampler {sampler} has {timestamps} timestamps but \
                     {values} values"
                )
            }
            Self::TimestampsNotIncreasing(a) => {
                write!(f, "sampler {a} timestamps are not strictly increasing")
            }
            Self::SamplerOutOfRange { channel, sampler } => {
                write!(f, "channel {channel} uses missing sampler {sampler}")
            }
            Self::TargetOutOfRange { channel, joint } => {
                write!(f, "channel {channel} targets missing joint {joint}")
            }
            Self::InvalidParent(a) => {
                write!(f, "hierarchy node {a} does not exist")
            }
            Self::ClipNotFound(name) => {
                write!(f, "no animation clip named {name:?}")
            }
            Self::NoClip(a) => write!(f, "no animation clip at index {a}"),
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
        }
    }
}

impl From<serde_yaml::Error> for SkError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}
