//! # socialgraph — Temporal Social Graph
//!
//! Identities connected by relationship timelines. Every relationship keeps
//! an append-only log of the instants it was established and torn down, so
//! the graph can be queried as of any moment in its history.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphStore` is the contract between traversal and storage
//! 2. **Outcomes are values**: every operation returns a `Result`; [`Status`]
//!    turns it into a status code
//! 3. **Timelines in an arena**: identities refer to timelines by index, never
//!    by pointer
//! 4. **History is immutable**: event logs only ever grow, in time order
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use socialgraph::{Graph, Identity, Status};
//!
//! # fn main() -> socialgraph::Result<()> {
//! let mut graph = Graph::new();
//! graph.add_identity(Identity::with_id("ada")?);
//! graph.add_identity(Identity::with_id("grace")?);
//!
//! let monday = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
//! graph.establish_edge("ada", "grace", monday)?;
//! assert!(graph.is_edge_active("grace", "ada", monday));
//!
//! let again = graph.establish_edge("ada", "grace", monday);
//! assert_eq!(Status::of(&again), Some(Status::AlreadyActive));
//!
//! let friends = graph.neighborhood("ada", monday, None)?;
//! assert_eq!(friends.distance_of("grace"), Some(0));
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod traversal;
pub mod clock;
pub mod shared;

use std::sync::Arc;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Identity, Timeline, TimelineState, Pair, Friend, Status, Timestamp,
};
pub use storage::{GraphStore, GraphConfig, MemoryGraph, TimelineId};
pub use traversal::{Neighborhood, Trend};
pub use clock::{Clock, SystemClock, FixedClock};
pub use shared::SharedGraph;

// ============================================================================
// Top-level Graph handle
// ============================================================================

/// The primary entry point. A `Graph` wraps a store together with the
/// clock and configuration used by its queries.
pub struct Graph<B: GraphStore = MemoryGraph> {
    store: B,
    clock: Arc<dyn Clock>,
    config: GraphConfig,
}

impl Graph<MemoryGraph> {
    /// Empty in-memory graph on the system clock.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let store = MemoryGraph::with_config(&config);
        Self { store, clock: Arc::new(SystemClock), config }
    }
}

impl Default for Graph<MemoryGraph> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: GraphStore> Graph<B> {
    /// Wrap an existing store.
    pub fn with_store(store: B) -> Self {
        Self { store, clock: Arc::new(SystemClock), config: GraphConfig::default() }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Access the underlying store (for advanced use).
    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut B {
        &mut self.store
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn add_identity(&mut self, identity: Identity) -> bool {
        self.store.add_identity(identity)
    }

    pub fn establish_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        self.store.establish_edge(a, b, date)
    }

    pub fn tear_down_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        self.store.tear_down_edge(a, b, date)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn identity(&self, id: &str) -> Option<&Identity> {
        self.store.identity(id)
    }

    pub fn is_edge_active(&self, a: &str, b: &str, date: Timestamp) -> bool {
        self.store.is_edge_active(a, b, date)
    }

    /// Neighborhood of `origin` at `date`. Without an explicit limit the
    /// configured `max_distance` applies.
    pub fn neighborhood(
        &self,
        origin: &str,
        date: Timestamp,
        max_distance: Option<i64>,
    ) -> Result<Neighborhood> {
        let limit = max_distance.or(self.config.max_distance);
        traversal::neighborhood(&self.store, origin, date, limit)
    }

    /// Size of `origin`'s unbounded neighborhood at every relevant date,
    /// anchored at the clock's current instant.
    pub fn neighborhood_trend(&self, origin: &str) -> Result<Trend> {
        traversal::trend(&self.store, origin, self.clock.now())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Everything an operation can report instead of succeeding.
///
/// The first six variants are ordinary outcomes with a [`Status`] code.
/// `MissingValue`, `Uninitialized` and `InvalidValue` are contract
/// violations: the caller passed an empty or malformed value, or used an
/// entity before initializing it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Relationship is already active")]
    AlreadyActive,

    #[error("Relationship is already inactive")]
    AlreadyInactive,

    #[error("Already assigned: {0}")]
    AlreadyValid(String),

    #[error("Invalid users: {0}")]
    InvalidUsers(String),

    #[error("Invalid date: {date} precedes the latest event at {latest}")]
    InvalidDate { date: Timestamp, latest: Timestamp },

    #[error("Invalid distance: {0}")]
    InvalidDistance(i64),

    #[error("Required value missing: {0}")]
    MissingValue(&'static str),

    #[error("Use of uninitialized {0}")]
    Uninitialized(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: &'static str },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Status code of an expected outcome; `None` for anything else.
    pub fn status(&self) -> Option<Status> {
        match self {
            Error::AlreadyActive => Some(Status::AlreadyActive),
            Error::AlreadyInactive => Some(Status::AlreadyInactive),
            Error::AlreadyValid(_) => Some(Status::AlreadyValid),
            Error::InvalidUsers(_) => Some(Status::InvalidUsers),
            Error::InvalidDate { .. } => Some(Status::InvalidDate),
            Error::InvalidDistance(_) => Some(Status::InvalidDistance),
            Error::MissingValue(_)
            | Error::Uninitialized(_)
            | Error::InvalidValue { .. }
            | Error::Config(_) => None,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::MissingValue(_) | Error::Uninitialized(_) | Error::InvalidValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
