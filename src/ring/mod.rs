//! Consistent Hashing Module
//!
//! Maps lookup keys onto a changing set of members so that adding or removing one
//! of N members only moves about 1/N of the keys.
//!
//! ## Core Concepts
//! - **Virtual nodes**: Every member is hashed onto the ring `replicas` times
//!   (16 by default) to even out the share each member receives.
//! - **Clockwise resolution**: A key hashes to a position and belongs to the first
//!   virtual node at or after it, wrapping around at the end of the ring.

pub mod consistent;

pub use consistent::{ConsistentRing, DEFAULT_REPLICAS};

/// Minimal interface the topology needs from a hash ring.
pub trait HashRing {
    /// Adds `member`. Adding a member twice has no effect.
    fn add(&mut self, member: &str);

    /// Removes `member` and all of its virtual nodes.
    fn remove(&mut self, member: &str);

    /// Resolves `key` to its owning member, or `None` if the ring is empty.
    fn get(&self, key: &str) -> Option<&str>;

    /// Current members in sorted order.
    fn members(&self) -> Vec<String>;

    fn contains(&self, member: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
