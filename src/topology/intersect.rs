//! Frame/Slice Intersect
//!
//! The join of one frame and one slice. It owns the fragments that cover that
//! partition and a consistent-hash ring over their hex-encoded ids. Both sit
//! behind one `RwLock`, so a lookup never sees the ring and the fragment list
//! out of step.

use super::error::{Result, TopologyError};
use super::fragment::Fragment;
use super::types::{Frame, FragmentId, Slice};
use crate::membership::ProcessId;
use crate::ring::{ConsistentRing, DEFAULT_REPLICAS, HashRing};

use parking_lot::RwLock;

#[derive(Debug)]
struct IntersectState {
    fragments: Vec<Fragment>,
    ring: ConsistentRing,
}

impl IntersectState {
    fn position(&self, id: FragmentId) -> Option<usize> {
        self.fragments.iter().position(|f| f.id() == id)
    }

    fn insert(&mut self, fragment: Fragment) {
        self.ring.add(&fragment.id().to_hex());
        self.fragments.push(fragment);
    }
}

#[derive(Debug)]
pub struct FrameSliceIntersect {
    frame: Frame,
    slice: Slice,
    state: RwLock<IntersectState>,
}

impl FrameSliceIntersect {
    #[cfg(test)]
    pub(crate) fn new(frame: Frame, slice: Slice) -> Self {
        Self::with_replicas(frame, slice, DEFAULT_REPLICAS)
    }

    pub(crate) fn with_replicas(frame: Frame, slice: Slice, replicas: usize) -> Self {
        Self {
            frame,
            slice,
            state: RwLock::new(IntersectState {
                fragments: Vec::new(),
                ring: ConsistentRing::with_replicas(replicas),
            }),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn slice(&self) -> Slice {
        self.slice
    }

    /// Registers `fragment` and places its id on the ring, returning the stored
    /// fragment. If the id is already registered the existing fragment is
    /// returned unchanged. Check and insert happen under one write lock.
    pub(crate) fn add_fragment(&self, fragment: Fragment) -> Fragment {
        let mut state = self.state.write();
        if let Some(idx) = state.position(fragment.id()) {
            return state.fragments[idx].clone();
        }
        tracing::debug!(
            "Adding fragment {} to frame '{}' slice {}",
            fragment.id(),
            self.frame,
            self.slice
        );
        state.insert(fragment.clone());
        fragment
    }

    pub fn get_fragments(&self) -> Vec<Fragment> {
        self.state.read().fragments.clone()
    }

    pub fn get_fragment(&self, id: FragmentId) -> Result<Fragment> {
        let state = self.state.read();
        state
            .position(id)
            .map(|idx| state.fragments[idx].clone())
            .ok_or(TopologyError::FragmentNotFound(id))
    }

    /// Hex ids currently on the ring, sorted.
    pub fn ring_members(&self) -> Vec<String> {
        self.state.read().ring.members()
    }

    pub fn len(&self) -> usize {
        self.state.read().fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves `key` to the fragment that owns it on the ring.
    pub fn route(&self, key: &str) -> Result<Fragment> {
        let state = self.state.read();
        let member = state.ring.get(key).ok_or_else(|| TopologyError::NoFragments {
            frame: self.frame.name().to_string(),
            slice: self.slice.id(),
        })?;
        let id = FragmentId::from_hex(member).ok_or_else(|| {
            tracing::error!(
                "Ring of frame '{}' slice {} holds undecodable member '{}'",
                self.frame,
                self.slice,
                member
            );
            TopologyError::InvalidRingMember(member.to_string())
        })?;
        state
            .position(id)
            .map(|idx| state.fragments[idx].clone())
            .ok_or(TopologyError::FragmentNotFound(id))
    }

    /// Assigns fragment `id` to `process` (see `Fragment::set_process`).
    pub fn assign(&self, id: FragmentId, process: ProcessId) -> Result<Fragment> {
        let mut state = self.state.write();
        let idx = state
            .position(id)
            .ok_or(TopologyError::FragmentNotFound(id))?;
        let fragment = &mut state.fragments[idx];
        let was_assigned = fragment.is_assigned();
        fragment.set_process(process)?;
        if !was_assigned {
            tracing::info!(
                "Assigned fragment {} (frame '{}' slice {}) to process {}",
                id,
                self.frame,
                self.slice,
                process
            );
        }
        Ok(fragment.clone())
    }
}
