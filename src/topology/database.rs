//! Database
//!
//! A database owns every frame, slice and frame/slice intersect of one dataset.
//! For every frame `f` and slice `s` it holds, exactly one intersect `(f, s)`
//! exists. The invariant is kept incrementally: a new frame gets an intersect
//! against each existing slice, and a new slice against each existing frame,
//! inside the same write lock that registers it.
//!
//! Lock order is always database, then intersect. Lookups release the database
//! lock before touching an intersect.

use super::error::{Result, TopologyError};
use super::fragment::Fragment;
use super::intersect::FrameSliceIntersect;
use super::types::{Bitmap, Frame, FragmentId, SENTINEL_KEY, Slice, compute_slice_id};
use crate::config::{ConfigProvider, DEFAULT_SUPPORTED_FRAMES, SUPPORTED_FRAMES_KEY};
use crate::membership::ProcessId;
use crate::ring::DEFAULT_REPLICAS;

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Default)]
struct DatabaseState {
    frames: Vec<Frame>,
    slices: BTreeMap<u64, Slice>,
    intersects: HashMap<(String, u64), Arc<FrameSliceIntersect>>,
}

impl DatabaseState {
    fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name() == name)
    }

    fn add_intersect(&mut self, frame: &Frame, slice: Slice, replicas: usize) {
        let fsi = FrameSliceIntersect::with_replicas(frame.clone(), slice, replicas);
        self.intersects
            .insert((frame.name().to_string(), slice.id()), Arc::new(fsi));
    }
}

pub struct Database {
    name: String,
    config: Arc<dyn ConfigProvider>,
    replicas: usize,
    state: RwLock<DatabaseState>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("replicas", &self.replicas)
            .field("state", &self.state)
            .finish()
    }
}

impl Database {
    pub fn new(name: &str, config: Arc<dyn ConfigProvider>) -> Self {
        Self::with_replicas(name, config, DEFAULT_REPLICAS)
    }

    /// A database whose intersect rings use `replicas` virtual nodes per fragment.
    pub fn with_replicas(name: &str, config: Arc<dyn ConfigProvider>, replicas: usize) -> Self {
        Self {
            name: name.to_string(),
            config,
            replicas,
            state: RwLock::new(DatabaseState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `name` is in the configured list of supported frames.
    pub fn is_valid_frame(&self, name: &str) -> bool {
        self.config
            .get_string_array_default(SUPPORTED_FRAMES_KEY, DEFAULT_SUPPORTED_FRAMES)
            .iter()
            .any(|supported| supported == name)
    }

    pub fn get_or_create_frame(&self, name: &str) -> Result<Frame> {
        if !self.is_valid_frame(name) {
            return Err(TopologyError::InvalidFrame(name.to_string()));
        }

        let mut state = self.state.write();
        if let Some(frame) = state.frame(name) {
            return Ok(frame.clone());
        }

        let frame = Frame::new(name);
        let slices: Vec<Slice> = state.slices.values().copied().collect();
        for slice in slices {
            state.add_intersect(&frame, slice, self.replicas);
        }
        state.frames.push(frame.clone());

        tracing::info!("Created frame '{}' in database '{}'", name, self.name);
        Ok(frame)
    }

    /// Looks up a registered frame. Names outside the supported list fail with
    /// `InvalidFrame` even if they were never requested.
    pub fn get_frame(&self, name: &str) -> Result<Frame> {
        if !self.is_valid_frame(name) {
            return Err(TopologyError::InvalidFrame(name.to_string()));
        }
        self.state
            .read()
            .frame(name)
            .cloned()
            .ok_or_else(|| TopologyError::FrameNotFound(name.to_string()))
    }

    /// Registered frames in creation order.
    pub fn frames(&self) -> Vec<Frame> {
        self.state.read().frames.clone()
    }

    pub fn get_or_create_slice(&self, id: u64) -> Slice {
        let mut state = self.state.write();
        if let Some(slice) = state.slices.get(&id) {
            return *slice;
        }

        let slice = Slice::new(id);
        let frames = state.frames.clone();
        for frame in &frames {
            state.add_intersect(frame, slice, self.replicas);
        }
        state.slices.insert(id, slice);

        tracing::info!("Created slice {} in database '{}'", id, self.name);
        slice
    }

    pub fn get_slice(&self, id: u64) -> Result<Slice> {
        self.state
            .read()
            .slices
            .get(&id)
            .copied()
            .ok_or(TopologyError::SliceNotFound(id))
    }

    /// Registered slices ordered by id.
    pub fn slices(&self) -> Vec<Slice> {
        self.state.read().slices.values().copied().collect()
    }

    pub fn num_slices(&self) -> Result<usize> {
        match self.state.read().slices.len() {
            0 => Err(TopologyError::EmptyDatabase),
            n => Ok(n),
        }
    }

    /// The slice holding `item_id`. Never creates it.
    pub fn get_slice_for_profile(&self, item_id: u64) -> Result<Slice> {
        self.get_slice(compute_slice_id(item_id))
    }

    pub fn get_frame_slice_intersect(
        &self,
        frame: &Frame,
        slice: &Slice,
    ) -> Result<Arc<FrameSliceIntersect>> {
        let state = self.state.read();
        if let Some(fsi) = state.intersects.get(&(frame.name().to_string(), slice.id())) {
            return Ok(fsi.clone());
        }

        if state.frame(frame.name()).is_some() && state.slices.contains_key(&slice.id()) {
            tracing::error!(
                "Missing frame/slice intersect in database '{}': frame '{}', slice {} (both registered)",
                self.name,
                frame,
                slice
            );
        } else {
            tracing::warn!(
                "Missing frame/slice intersect in database '{}': frame '{}', slice {}",
                self.name,
                frame,
                slice
            );
        }
        Err(TopologyError::FrameSliceIntersectNotFound {
            frame: frame.name().to_string(),
            slice: slice.id(),
        })
    }

    /// Every intersect, ordered by frame name then slice id.
    pub fn get_frame_slice_intersects(&self) -> Vec<Arc<FrameSliceIntersect>> {
        let state = self.state.read();
        let mut keys: Vec<&(String, u64)> = state.intersects.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| state.intersects[key].clone())
            .collect()
    }

    /// Returns the fragment `id` of `(frame, slice)`, adding it to the
    /// intersect's ring the first time it is seen.
    pub fn get_or_create_fragment(
        &self,
        frame: &Frame,
        slice: &Slice,
        id: FragmentId,
    ) -> Result<Fragment> {
        let fsi = self.get_frame_slice_intersect(frame, slice)?;
        Ok(fsi.add_fragment(Fragment::new(id)))
    }

    pub fn get_fragment(&self, frame: &Frame, slice: &Slice, id: FragmentId) -> Result<Fragment> {
        self.get_frame_slice_intersect(frame, slice)?.get_fragment(id)
    }

    /// Hands fragment `id` to `process`. A fragment keeps its first process.
    pub fn assign_fragment(
        &self,
        frame: &Frame,
        slice: &Slice,
        id: FragmentId,
        process: ProcessId,
    ) -> Result<Fragment> {
        self.get_frame_slice_intersect(frame, slice)?.assign(id, process)
    }

    /// Routes `bitmap` to the fragment owning its id within `slice`.
    pub fn get_fragment_for_bitmap(&self, slice: &Slice, bitmap: &Bitmap) -> Result<Fragment> {
        let frame = self.get_frame(&bitmap.frame_type).inspect_err(|e| {
            tracing::warn!(
                "Cannot route bitmap {} in database '{}', slice {}: {}",
                bitmap.id,
                self.name,
                slice,
                e
            );
        })?;
        let fsi = self.get_frame_slice_intersect(&frame, slice)?;
        let fragment = fsi.route(&bitmap.ring_key())?;
        tracing::debug!(
            "Bitmap {} ({}) in slice {} -> fragment {}",
            bitmap.id,
            frame,
            slice,
            fragment.id()
        );
        Ok(fragment)
    }

    /// Fragment serving `(frame, slice)` as a whole.
    ///
    /// Only defined when the intersect holds exactly one fragment. With several
    /// fragments the result is whichever one owns a fixed sentinel key on the
    /// ring; it is stable for a given membership but carries no other meaning.
    pub fn get_fragment_for_frame_slice(&self, frame: &Frame, slice: &Slice) -> Result<Fragment> {
        let fsi = self.get_frame_slice_intersect(frame, slice)?;
        let count = fsi.len();
        if count > 1 {
            tracing::warn!(
                "Frame-wide lookup for frame '{}' slice {} over {} fragments; result is unspecified",
                frame,
                slice,
                count
            );
        }
        fsi.route(SENTINEL_KEY)
    }
}
