use super::HashRing;

use siphasher::sip::SipHasher24;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hasher;

/// Virtual positions per member unless configured otherwise.
pub const DEFAULT_REPLICAS: usize = 16;

/// Hash ring with a fixed number of virtual nodes per member.
///
/// Positions are SipHash-2-4 values with zero keys, so the layout is identical
/// across processes and restarts.
#[derive(Debug, Clone)]
pub struct ConsistentRing {
    replicas: usize,
    circle: BTreeMap<u64, String>,
    members: BTreeSet<String>,
}

impl ConsistentRing {
    pub fn new() -> Self {
        Self::with_replicas(DEFAULT_REPLICAS)
    }

    /// A ring with `replicas` virtual nodes per member (at least one).
    pub fn with_replicas(replicas: usize) -> Self {
        Self {
            replicas: replicas.max(1),
            circle: BTreeMap::new(),
            members: BTreeSet::new(),
        }
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of occupied positions. Lower than `len() * replicas()` only on
    /// hash collisions.
    #[cfg(test)]
    pub(crate) fn positions(&self) -> usize {
        self.circle.len()
    }

    fn virtual_key(member: &str, replica: usize) -> String {
        format!("{}{}", replica, member)
    }
}

impl Default for ConsistentRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HashRing for ConsistentRing {
    fn add(&mut self, member: &str) {
        if !self.members.insert(member.to_string()) {
            return;
        }
        for replica in 0..self.replicas {
            let position = hash_key(&Self::virtual_key(member, replica));
            // First writer keeps a colliding position.
            self.circle
                .entry(position)
                .or_insert_with(|| member.to_string());
        }
    }

    fn remove(&mut self, member: &str) {
        if !self.members.remove(member) {
            return;
        }
        for replica in 0..self.replicas {
            let position = hash_key(&Self::virtual_key(member, replica));
            if self.circle.get(&position).is_some_and(|owner| owner == member) {
                self.circle.remove(&position);
            }
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        let position = hash_key(key);
        self.circle
            .range(position..)
            .next()
            .or_else(|| self.circle.iter().next())
            .map(|(_, member)| member.as_str())
    }

    fn members(&self) -> Vec<String> {
        self.members.iter().cloned().collect()
    }

    fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// Ring position of an arbitrary key.
pub fn hash_key(key: &str) -> u64 {
    let mut hasher = SipHasher24::new();
    hasher.write(key.as_bytes());
    hasher.finish()
}
