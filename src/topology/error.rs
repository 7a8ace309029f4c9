//! Error types for the topology layer.

use super::types::FragmentId;
use crate::membership::ProcessId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("database '{0}' does not exist")]
    DatabaseNotFound(String),

    #[error("invalid frame '{0}': not in the supported frames list")]
    InvalidFrame(String),

    #[error("frame '{0}' does not exist")]
    FrameNotFound(String),

    #[error("slice {0} does not exist")]
    SliceNotFound(u64),

    #[error("fragment {0} does not exist")]
    FragmentNotFound(FragmentId),

    #[error("no frame/slice intersect for frame '{frame}', slice {slice}")]
    FrameSliceIntersectNotFound { frame: String, slice: u64 },

    #[error("database has no slices")]
    EmptyDatabase,

    #[error("frame '{frame}', slice {slice} has no fragments")]
    NoFragments { frame: String, slice: u64 },

    #[error("ring member '{0}' is not a fragment id")]
    InvalidRingMember(String),

    #[error("fragment {fragment} is already assigned to process {process}")]
    FragmentAlreadyAssigned {
        fragment: FragmentId,
        process: ProcessId,
    },

    #[error("fragment {0} has no process assigned")]
    FragmentUnassigned(FragmentId),
}

pub type Result<T> = std::result::Result<T, TopologyError>;
