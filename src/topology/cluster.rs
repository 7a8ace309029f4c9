//! Cluster
//!
//! Top-level registry of databases plus the processes fragments can be assigned
//! to. One `Cluster` is built at startup and handed to whatever serves requests.

use super::database::Database;
use super::error::{Result, TopologyError};
use super::types::{Bitmap, Location};
use crate::config::ConfigProvider;
use crate::membership::{Process, ProcessRegistry};
use crate::ring::DEFAULT_REPLICAS;

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

pub struct Cluster {
    databases: DashMap<String, Arc<Database>>,
    processes: ProcessRegistry,
    config: Arc<dyn ConfigProvider>,
    replicas: usize,
}

impl Cluster {
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self::with_replicas(config, DEFAULT_REPLICAS)
    }

    /// A cluster whose databases build rings with `replicas` virtual nodes.
    pub fn with_replicas(config: Arc<dyn ConfigProvider>, replicas: usize) -> Self {
        Self {
            databases: DashMap::new(),
            processes: ProcessRegistry::new(),
            config,
            replicas,
        }
    }

    /// Returns the database called `name`, creating it on first use.
    ///
    /// The check and the insert run under the map's entry lock, so concurrent
    /// callers always receive the same instance.
    pub fn get_or_create_database(&self, name: &str) -> Arc<Database> {
        self.databases
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::info!("Created database '{}'", name);
                Arc::new(Database::with_replicas(
                    name,
                    self.config.clone(),
                    self.replicas,
                ))
            })
            .value()
            .clone()
    }

    pub fn database(&self, name: &str) -> Result<Arc<Database>> {
        self.databases
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TopologyError::DatabaseNotFound(name.to_string()))
    }

    /// Snapshot of the registry. Databases are never removed, so every entry
    /// stays valid.
    pub fn get_databases(&self) -> HashMap<String, Arc<Database>> {
        self.databases
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn processes(&self) -> &ProcessRegistry {
        &self.processes
    }

    /// Routes `bitmap` inside database `name` all the way to a location.
    ///
    /// The slice is derived from the bitmap id; nothing is created on the way.
    pub fn locate(&self, name: &str, bitmap: &Bitmap) -> Result<Location> {
        let database = self.database(name)?;
        let slice = database.get_slice_for_profile(bitmap.id)?;
        let fragment = database.get_fragment_for_bitmap(&slice, bitmap)?;
        fragment
            .location()
            .ok_or(TopologyError::FragmentUnassigned(fragment.id()))
    }

    /// The process a location points at, if it has been registered.
    pub fn process_for(&self, location: &Location) -> Option<Arc<Process>> {
        self.processes.get(&location.process_id)
    }
}
