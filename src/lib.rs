//! Bitmap Index Topology Library
//!
//! The cluster-topology and fragment-placement directory of a distributed bitmap
//! index. For a query key (database, frame, slice, item id) it answers which
//! fragment owns the data and which process serves that fragment.
//!
//! ## Architecture Modules
//! - **`config`**: The `ConfigProvider` seam and the environment/static providers
//!   that supply the allow-list of frame names.
//! - **`membership`**: Process records (identity, host, TCP and HTTP ports) and
//!   the registry that owns them.
//! - **`ring`**: Consistent-hash ring with virtual nodes, used to spread items
//!   over the fragments of a frame/slice with minimal remapping.
//! - **`topology`**: `Cluster`, `Database`, frames, slices, frame/slice
//!   intersects and fragments, plus the resolution path from a bitmap to a
//!   `Location`.

pub mod config;
pub mod membership;
pub mod ring;
pub mod topology;
