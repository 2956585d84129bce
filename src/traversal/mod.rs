//! # Neighborhood Traversal
//!
//! Distance-limited, time-filtered breadth-first search over a
//! [`GraphStore`].
//!
//! ```text
//! origin ──(active at date)── friend@0 ──(active at date)── friend@1 ── ...
//! ```
//!
//! Distances count from zero: direct neighbors of the origin are at
//! distance 0, their neighbors at 1, and so on. Only timelines that are
//! active at the query date are crossed. The first time an identity is
//! reached fixes its distance; the level-by-level order guarantees no later
//! path is shorter.

pub mod trend;

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{Friend, Timestamp};
use crate::storage::GraphStore;
use crate::{Error, Result};

pub use trend::{trend, Trend};

// ============================================================================
// Neighborhood
// ============================================================================

/// Result of a neighborhood query, in admission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    origin: String,
    date: Timestamp,
    friends: Vec<Friend>,
}

impl Neighborhood {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The instant the neighborhood was evaluated at.
    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.friends.iter().any(|f| f.id() == id)
    }

    pub fn distance_of(&self, id: &str) -> Option<u32> {
        self.friends.iter().find(|f| f.id() == id).map(|f| f.distance())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Friend> {
        self.friends.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.friends.iter().map(|f| f.id())
    }

    /// The friends at distance `limit` or less.
    pub fn within(&self, limit: u32) -> Neighborhood {
        Neighborhood {
            origin: self.origin.clone(),
            date: self.date,
            friends: self.friends.iter().filter(|f| f.distance() <= limit).cloned().collect(),
        }
    }

    pub fn into_friends(self) -> Vec<Friend> {
        self.friends
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a Friend;
    type IntoIter = std::slice::Iter<'a, Friend>;

    fn into_iter(self) -> Self::IntoIter {
        self.friends.iter()
    }
}

// ============================================================================
// BFS
// ============================================================================

/// Identities reachable from `origin` over timelines active at `date`.
///
/// `max_distance` bounds the recorded distance (inclusive); `None` means
/// unbounded. Reports `InvalidUsers` for an unknown origin and
/// `InvalidDistance` for a negative limit.
pub fn neighborhood<S: GraphStore + ?Sized>(
    store: &S,
    origin: &str,
    date: Timestamp,
    max_distance: Option<i64>,
) -> Result<Neighborhood> {
    if !store.contains(origin) {
        return Err(Error::InvalidUsers(format!("unknown identity {origin:?}")));
    }
    let limit = match max_distance {
        Some(d) if d < 0 => return Err(Error::InvalidDistance(d)),
        Some(d) => Some(u32::try_from(d).unwrap_or(u32::MAX)),
        None => None,
    };

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(origin);
    let mut friends = Vec::new();

    // (parent, distance its newly found neighbors get)
    let mut queue: VecDeque<(&str, u32)> = VecDeque::new();
    queue.push_back((origin, 0));

    while let Some((parent, distance)) = queue.pop_front() {
        if limit.is_some_and(|l| distance > l) {
            continue;
        }
        for link in store.timelines_of(parent) {
            let Some(other) = link.other_participant(parent)? else {
                continue;
            };
            if seen.contains(other) || !link.is_active(date)? {
                continue;
            }
            seen.insert(other);
            trace!(origin, id = other, distance, "admitted");
            friends.push(Friend::new(other, distance));
            queue.push_back((other, distance + 1));
        }
    }

    debug!(origin, %date, ?limit, size = friends.len(), "neighborhood computed");
    Ok(Neighborhood {
        origin: origin.to_string(),
        date,
        friends,
    })
}

// ============================================================================
// Tests
// ============================================================================
