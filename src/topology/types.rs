use crate::membership::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a slice in item ids.
pub const SLICE_WIDTH: u64 = 1_048_576;

/// Ring key used when a frame/slice is served by a single fragment.
pub const SENTINEL_KEY: &str = "0";

/// Slice that owns `item_id`.
pub fn compute_slice_id(item_id: u64) -> u64 {
    item_id / SLICE_WIDTH
}

/// A named category of bitmaps inside a database (brands, demographics, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Frame {
    name: String,
}

impl Frame {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A vertical partition of the item id space, `SLICE_WIDTH` ids wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slice {
    id: u64,
}

impl Slice {
    pub(crate) fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Opaque shard identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId(pub u64);

impl FragmentId {
    /// A random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u64_pair().0)
    }

    /// Fixed-width lowercase hex, the form stored on hash rings.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        u64::from_str_radix(hex, 16).ok().map(Self)
    }
}

impl Default for FragmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Where a fragment lives: the process to talk to and the fragment to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub process_id: ProcessId,
    pub fragment_id: FragmentId,
}

/// Lookup key for a single bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    pub id: u64,
    pub frame_type: String,
    pub filter: u64,
}

impl Bitmap {
    pub fn new(id: u64, frame_type: impl Into<String>) -> Self {
        Self {
            id,
            frame_type: frame_type.into(),
            filter: 0,
        }
    }

    /// Ring key this bitmap is routed by.
    pub fn ring_key(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_id_boundaries() {
        assert_eq!(compute_slice_id(0), 0);
        assert_eq!(compute_slice_id(1_048_575), 0);
        assert_eq!(compute_slice_id(1_048_576), 1);
        assert_eq!(compute_slice_id(3 * SLICE_WIDTH + 5), 3);
    }

    #[test]
    fn fragment_id_hex_is_fixed_width() {
        let id = FragmentId(0xabc);
        assert_eq!(id.to_hex(), "0000000000000abc");
        assert_eq!(FragmentId::from_hex(&id.to_hex()), Some(id));
        assert_eq!(FragmentId::from_hex("not-hex"), None);
    }
}
