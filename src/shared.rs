//! Thread-safe graph handle.
//!
//! Mutations take the write lock, so they are applied one at a time. Queries
//! take the read lock and see the graph frozen for the duration of the call.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{Identity, Timestamp};
use crate::storage::MemoryGraph;
use crate::traversal::{Neighborhood, Trend};
use crate::{Graph, Result};

/// Cloneable, lock-guarded handle to an in-memory [`Graph`].
#[derive(Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph<MemoryGraph>>>,
}

impl SharedGraph {
    pub fn new(graph: Graph<MemoryGraph>) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }

    pub fn add_identity(&self, identity: Identity) -> bool {
        self.inner.write().add_identity(identity)
    }

    pub fn establish_edge(&self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        self.inner.write().establish_edge(a, b, date)
    }

    pub fn tear_down_edge(&self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        self.inner.write().tear_down_edge(a, b, date)
    }

    pub fn is_edge_active(&self, a: &str, b: &str, date: Timestamp) -> bool {
        self.inner.read().is_edge_active(a, b, date)
    }

    pub fn neighborhood(
        &self,
        origin: &str,
        date: Timestamp,
        max_distance: Option<i64>,
    ) -> Result<Neighborhood> {
        self.inner.read().neighborhood(origin, date, max_distance)
    }

    pub fn neighborhood_trend(&self, origin: &str) -> Result<Trend> {
        self.inner.read().neighborhood_trend(origin)
    }

    /// Run `f` against a consistent snapshot of the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Graph<MemoryGraph>) -> R) -> R {
        f(&*self.inner.read())
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}
