//! Property tests for timelines and traversal.
//!
//! Random sequences of establish / tear-down requests are applied to small
//! graphs; the invariants below must hold whatever was accepted or rejected.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use socialgraph::{
    Error, Graph, GraphStore, Identity, MemoryGraph, Timeline, TimelineState, Timestamp,
};

fn t(secs: i64) -> Timestamp {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn assigned() -> Timeline {
    let a = Identity::with_id("a").unwrap();
    let b = Identity::with_id("b").unwrap();
    let mut link = Timeline::new();
    link.assign(&[&a, &b]).unwrap();
    link
}

/// (establish?, date) requests.
fn requests() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec((any::<bool>(), 0i64..50), 0..40)
}

/// (establish?, a, b, date) requests over identities "0".."5".
fn edge_requests() -> impl Strategy<Value = Vec<(bool, u8, u8, i64)>> {
    prop::collection::vec((any::<bool>(), 0u8..6, 0u8..6, 0i64..30), 0..60)
}

fn build_graph(requests: &[(bool, u8, u8, i64)]) -> MemoryGraph {
    let mut g = MemoryGraph::new();
    for i in 0..6 {
        g.add_identity(Identity::with_id(&i.to_string()).unwrap());
    }
    for &(establish, a, b, date) in requests {
        let (a, b) = (a.to_string(), b.to_string());
        let _ = if establish {
            g.establish_edge(&a, &b, t(date))
        } else {
            g.tear_down_edge(&a, &b, t(date))
        };
    }
    g
}

proptest! {
    #[test]
    fn events_stay_sorted_and_parity_matches(reqs in requests()) {
        let mut link = assigned();
        for (establish, date) in reqs {
            let before = link.events().to_vec();
            let state = link.state();
            let r = if establish { link.establish(t(date)) } else { link.tear_down(t(date)) };
            match r {
                Ok(()) => {
                    prop_assert_eq!(link.events().len(), before.len() + 1);
                    prop_assert_ne!(link.state(), state);
                }
                Err(e) => {
                    prop_assert!(!e.is_contract_violation());
                    prop_assert_eq!(link.events(), &before[..]);
                }
            }
        }

        prop_assert!(link.events().windows(2).all(|w| w[0] <= w[1]));
        for probe in -1..51 {
            let count = link.events().iter().filter(|e| **e <= t(probe)).count();
            prop_assert_eq!(link.events_until(t(probe)).unwrap(), count);
            prop_assert_eq!(link.is_active(t(probe)).unwrap(), count % 2 == 1);
        }
        let expected = if link.events().len() % 2 == 1 { TimelineState::Active } else { TimelineState::Inactive };
        prop_assert_eq!(link.state(), expected);
    }

    #[test]
    fn set_id_never_changes_a_valid_id(first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let mut identity = Identity::new();
        prop_assert!(identity.set_id(&first).unwrap());
        let r = identity.set_id(&second);
        prop_assert!(matches!(r, Ok(false)));
        let r = identity.set_id("");
        prop_assert!(matches!(r, Err(Error::MissingValue("id"))));
        prop_assert_eq!(identity.id(), Some(first.as_str()));
    }

    #[test]
    fn bounded_neighborhood_is_subset(reqs in edge_requests(), date in 0i64..30, limit in 0i64..4) {
        let g = build_graph(&reqs);
        let graph = Graph::with_store(g);
        let all = graph.neighborhood("0", t(date), None).unwrap();
        let some = graph.neighborhood("0", t(date), Some(limit)).unwrap();

        for friend in &some {
            prop_assert_eq!(all.distance_of(friend.id()), Some(friend.distance()));
            prop_assert!(i64::from(friend.distance()) <= limit);
        }
        prop_assert_eq!(some.len(), all.within(limit as u32).len());

        let distances: Vec<u32> = all.iter().map(|f| f.distance()).collect();
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(!all.contains("0"));
    }

    #[test]
    fn neighbors_at_distance_zero_have_active_edges(reqs in edge_requests(), date in 0i64..30) {
        let g = build_graph(&reqs);
        let graph = Graph::with_store(g);
        let n = graph.neighborhood("0", t(date), None).unwrap();
        for i in 1..6 {
            let id = i.to_string();
            let direct = graph.is_edge_active("0", &id, t(date));
            prop_assert_eq!(n.distance_of(&id) == Some(0), direct);
        }
    }

    #[test]
    fn trend_points_match_recomputed_neighborhoods(reqs in edge_requests()) {
        let g = build_graph(&reqs);
        let now = t(1_000);
        let trend = socialgraph::traversal::trend(&g, "0", now).unwrap();
        let current = socialgraph::traversal::neighborhood(&g, "0", now, None).unwrap();

        let mut dates: Vec<Timestamp> = current
            .ids()
            .flat_map(|id| g.timelines_of(id))
            .flat_map(|link| link.events().iter().copied())
            .collect();
        dates.sort();
        dates.dedup();
        prop_assert_eq!(trend.iter().map(|(d, _)| d).collect::<Vec<_>>(), dates);

        for (date, size) in trend.iter() {
            let n = socialgraph::traversal::neighborhood(&g, "0", date, None).unwrap();
            prop_assert_eq!(size, n.len());
        }
    }

    #[test]
    fn registry_rejections_leave_no_timeline(a in 0u8..6, date in 0i64..30) {
        let mut g = build_graph(&[]);
        let id = a.to_string();
        let r = g.establish_edge(&id, &id, t(date));
        prop_assert!(matches!(r, Err(Error::InvalidUsers(_))));
        let r = g.tear_down_edge(&id, "9", t(date));
        prop_assert!(matches!(r, Err(Error::InvalidUsers(_))));
        prop_assert_eq!(g.timeline_count(), 0);
    }
}
