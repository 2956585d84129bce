//! Neighborhood size over time.
//!
//! The trend is recomputed from scratch: one unbounded traversal per
//! distinct event date found on the timelines of the current neighborhood.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::Timestamp;
use crate::storage::GraphStore;
use crate::Result;
use super::neighborhood;

/// Neighborhood size at each relevant date, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    sizes: BTreeMap<Timestamp, usize>,
}

impl Trend {
    pub fn get(&self, date: Timestamp) -> Option<usize> {
        self.sizes.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, usize)> + '_ {
        self.sizes.iter().map(|(d, n)| (*d, *n))
    }

    /// The most recent date and its size.
    pub fn latest(&self) -> Option<(Timestamp, usize)> {
        self.sizes.last_key_value().map(|(d, n)| (*d, *n))
    }

    pub fn into_map(self) -> BTreeMap<Timestamp, usize> {
        self.sizes
    }
}

/// Trend of `origin`'s neighborhood, anchored at `now`.
///
/// The dates sampled are every event on every timeline attached to a member
/// of the unbounded neighborhood as of `now`.
pub fn trend<S: GraphStore + ?Sized>(store: &S, origin: &str, now: Timestamp) -> Result<Trend> {
    let current = neighborhood(store, origin, now, None)?;

    let mut dates = BTreeSet::new();
    for friend in &current {
        for link in store.timelines_of(friend.id()) {
            dates.extend(link.events().iter().copied());
        }
    }
    info!(origin, %now, members = current.len(), dates = dates.len(), "computing trend");

    let mut sizes = BTreeMap::new();
    for date in dates {
        sizes.insert(date, neighborhood(store, origin, date, None)?.len());
    }

    info!(origin, points = sizes.len(), "trend computed");
    Ok(Trend { sizes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Identity;
    use crate::storage::MemoryGraph;
    use chrono::{TimeZone, Utc};

    fn t(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_trend_tracks_growth_and_shrink() {
        let mut g = MemoryGraph::new();
        for id in ["1", "2", "3"] {
            g.add_identity(Identity::with_id(id).unwrap());
        }
        g.establish_edge("1", "2", t(10)).unwrap();
        g.establish_edge("2", "3", t(20)).unwrap();
        g.tear_down_edge("2", "3", t(30)).unwrap();
        g.establish_edge("2", "3", t(40)).unwrap();

        let trend = trend(&g, "1", t(50)).unwrap();
        assert_eq!(
            trend.iter().collect::<Vec<_>>(),
            vec![(t(10), 1), (t(20), 2), (t(30), 1), (t(40), 2)]
        );
        assert_eq!(trend.latest(), Some((t(40), 2)));
    }

    #[test]
    fn test_isolated_origin_has_empty_trend() {
        let mut g = MemoryGraph::new();
        g.add_identity(Identity::with_id("1").unwrap());
        assert!(trend(&g, "1", t(0)).unwrap().is_empty());
    }
}
