//! Topology Module
//!
//! The placement directory: given a database, frame, slice and item id, it
//! decides which fragment owns the item and which process serves that fragment.
//!
//! ## Resolution Path
//! `Cluster` -> `Database` (by name) -> `Frame` (by bitmap frame type) ->
//! `FrameSliceIntersect` (by frame and slice) -> hash ring (by item id) ->
//! `Fragment` -> `Location` (process id + fragment id).
//!
//! ## Submodules
//! - **`cluster`**: Database registry and process arena.
//! - **`database`**: Frames, slices and the frame x slice intersect invariant.
//! - **`intersect`**: Fragments of one frame/slice and their hash ring.
//! - **`fragment`**: Shard record and its one-shot process assignment.
//! - **`types`**: Value types, `SLICE_WIDTH` and slice id derivation.
//! - **`error`**: `TopologyError`.

pub mod cluster;
pub mod database;
pub mod error;
pub mod fragment;
pub mod intersect;
pub mod types;

pub use cluster::Cluster;
pub use database::Database;
pub use error::{Result, TopologyError};
pub use fragment::Fragment;
pub use intersect::FrameSliceIntersect;
pub use types::{Bitmap, Frame, FragmentId, Location, SLICE_WIDTH, Slice, compute_slice_id};
