//! In-memory graph registry.
//!
//! This is the reference implementation of `GraphStore`.
//!
//! Timelines live in an arena and are addressed by [`TimelineId`]; each
//! identity keeps the ids of the timelines it participates in, and a pair
//! index maps every linked pair to its timeline. Nothing is ever removed:
//! identities stay registered and timelines only grow their event log.
//!
//! ## Limitations
//!
//! - **Single writer**: mutations take `&mut self`. Wrap the graph in
//!   [`crate::SharedGraph`] to share it between threads.
//! - **No persistence**: everything is lost when the graph is dropped.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::model::*;
use crate::{Error, Result};
use super::{GraphConfig, GraphStore};

/// Index of a timeline in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub usize);

impl std::fmt::Display for TimelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory social graph.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    identities: HashMap<String, Identity>,
    timelines: Vec<Timeline>,
    /// identity id → timelines it participates in
    adjacency: HashMap<String, SmallVec<[TimelineId; 4]>>,
    /// linked pair → its timeline
    pairs: HashMap<Pair, TimelineId>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self {
            identities: HashMap::with_capacity(config.identity_capacity),
            timelines: Vec::with_capacity(config.timeline_capacity),
            adjacency: HashMap::with_capacity(config.identity_capacity),
            pairs: HashMap::with_capacity(config.timeline_capacity),
        }
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id.0)
    }

    /// All members, in no particular order.
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.values()
    }

    /// All timelines, in creation order.
    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter()
    }

    /// Validate an edge request: distinct ids, both registered.
    fn member_pair(&self, a: &str, b: &str) -> Result<Pair> {
        if a == b {
            return Err(Error::InvalidUsers(format!("{a} cannot be linked to itself")));
        }
        for id in [a, b] {
            if !self.identities.contains_key(id) {
                return Err(Error::InvalidUsers(format!("unknown identity {id:?}")));
            }
        }
        Pair::new(a, b)
    }

    /// Timeline for `pair`, creating and assigning it if needed.
    fn timeline_for(&mut self, pair: Pair) -> Result<TimelineId> {
        if let Some(&id) = self.pairs.get(&pair) {
            return Ok(id);
        }

        let first = self.identities.get(pair.first())
            .ok_or_else(|| Error::InvalidUsers(format!("unknown identity {:?}", pair.first())))?;
        let second = self.identities.get(pair.second())
            .ok_or_else(|| Error::InvalidUsers(format!("unknown identity {:?}", pair.second())))?;
        let mut link = Timeline::new();
        link.assign(&[first, second])?;

        let id = TimelineId(self.timelines.len());
        self.timelines.push(link);
        self.adjacency.entry(pair.first().to_string()).or_default().push(id);
        self.adjacency.entry(pair.second().to_string()).or_default().push(id);
        debug!(timeline = %id, pair = %pair, "created timeline");
        self.pairs.insert(pair, id);

        Ok(id)
    }
}

// ============================================================================
// GraphStore impl
// ============================================================================

impl GraphStore for MemoryGraph {
    fn add_identity(&mut self, identity: Identity) -> bool {
        let Some(id) = identity.id() else {
            debug!("rejected invalid identity");
            return false;
        };
        if self.identities.contains_key(id) {
            debug!(id, "rejected duplicate identity");
            return false;
        }
        let id = id.to_string();
        debug!(id = %id, "registered identity");
        self.adjacency.insert(id.clone(), SmallVec::new());
        self.identities.insert(id, identity);
        true
    }

    fn identity(&self, id: &str) -> Option<&Identity> {
        self.identities.get(id)
    }

    fn identity_count(&self) -> usize {
        self.identities.len()
    }

    fn establish_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        let pair = self.member_pair(a, b)?;
        let id = self.timeline_for(pair)?;
        let result = self.timelines[id.0].establish(date);
        match &result {
            Ok(()) => debug!(timeline = %id, a, b, %date, "established"),
            Err(e) => debug!(timeline = %id, a, b, %date, status = ?e.status(), error = %e, "establish rejected"),
        }
        result
    }

    fn tear_down_edge(&mut self, a: &str, b: &str, date: Timestamp) -> Result<()> {
        let pair = self.member_pair(a, b)?;
        let Some(&id) = self.pairs.get(&pair) else {
            debug!(a, b, %date, status = ?Status::AlreadyInactive, "tear down of unlinked pair");
            return Err(Error::AlreadyInactive);
        };
        let result = self.timelines[id.0].tear_down(date);
        match &result {
            Ok(()) => debug!(timeline = %id, a, b, %date, "torn down"),
            Err(e) => debug!(timeline = %id, a, b, %date, status = ?e.status(), error = %e, "tear down rejected"),
        }
        result
    }

    fn is_edge_active(&self, a: &str, b: &str, date: Timestamp) -> bool {
        self.timeline_between(a, b)
            .is_some_and(|link| matches!(link.is_active(date), Ok(true)))
    }

    fn timeline_between(&self, a: &str, b: &str) -> Option<&Timeline> {
        let pair = self.member_pair(a, b).ok()?;
        self.pairs.get(&pair).and_then(|id| self.timelines.get(id.0))
    }

    fn timelines_of(&self, id: &str) -> Vec<&Timeline> {
        self.adjacency
            .get(id)
            .map(|ids| ids.iter().filter_map(|t| self.timelines.get(t.0)).collect())
            .unwrap_or_default()
    }

    fn timeline_count(&self) -> usize {
        self.timelines.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
