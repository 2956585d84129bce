//! # Graph Store Trait
//!
//! The contract between the traversal engine and whatever holds the graph.
//! The traversal engine only needs membership, adjacency, and timeline
//! lookups; mutations go through the same trait so that the [`crate::Graph`]
//! handle can drive any store.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory registry with a timeline arena |

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::Result;

pub use memory::{MemoryGraph, TimelineId};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a graph and its store.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use socialgraph::GraphConfig;
///
/// let config = GraphConfig::from_json(r#"{ "max_distance": 2 }"#).unwrap();
/// assert_eq!(config.max_distance, Some(2));
/// assert_eq!(config.identity_capacity, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of identities to pre-allocate room for.
    pub identity_capacity: usize,
    /// Number of timelines to pre-allocate room for.
    pub timeline_capacity: usize,
    /// Hop limit used by neighborhood queries that pass none.
    pub max_distance: Option<i64>,
}

impl GraphConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// GraphStore Trait
// ============================================================================

/// The registry contract.
///
/// Edge operations take the two identity ids in either order. They report
/// `InvalidUsers` when the ids are equal or either one is not a member.
pub trait GraphStore {
    // ========================================================================
    // Identities
    // ========================================================================

    /// Register a valid identity. Returns `false` if it is invalid or its id
    /// is already taken.
    fn add_identity(&mut self, identity: Identity) -> bool;

    /// Look up a member by id.
    fn identity(&self, id: &str) -> Option<&Identity>;

    fn contains(&self, id: &str) -> bool {
        self.identity(id).is_some()
    }

    fn identity_count(&self) -> usize;

    // ========================================================================
    // Edges
    // ========================================================================

    /// Establish the relationship between `a` and `b` at `date`, creating
    /// its timeline on first use.
    fn establish_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()>;

    /// Tear down the relationship between `a` and `b` at `date`.
    /// A pair that was never linked reports `AlreadyInactive`.
    fn tear_down_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()>;

    /// Whether `a` and `b` were linked at `date`. Unknown pairs are inactive.
    fn is_edge_active(&self, a: &str, b: &str, date: Timestamp) -> bool;

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Timeline between `a` and `b`, if one was ever created.
    fn timeline_between(&self, a: &str, b: &str) -> Option<&Timeline>;

    /// Timelines `id` participates in, in creation order.
    fn timelines_of(&self, id: &str) -> Vec<&Timeline>;

    fn timeline_count(&self) -> usize;
}
