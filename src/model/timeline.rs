//! Relationship timeline — the activity record of one unordered pair.
//!
//! The event log is append-only and non-decreasing. It never stores what
//! kind of transition an event was: the first event establishes the
//! relationship, the second tears it down, and so on. The number of events
//! at or before an instant therefore decides whether the relationship was
//! active at that instant (odd = active, even = inactive).

use serde::{Deserialize, Serialize};

use super::{Identity, Timestamp};
use crate::{Error, Result};

/// Unordered pair of two distinct identity ids.
///
/// Stored in canonical order so that `{a, b}` and `{b, a}` compare and hash
/// the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PairRecord")]
pub struct Pair {
    lo: String,
    hi: String,
}

impl Pair {
    /// Build a pair. Equal ids are rejected with `InvalidUsers`.
    pub fn new(a: &str, b: &str) -> Result<Self> {
        if a.is_empty() || b.is_empty() {
            return Err(Error::MissingValue("participant id"));
        }
        if a == b {
            return Err(Error::InvalidUsers(format!("{a} cannot be linked to itself")));
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { lo: lo.to_string(), hi: hi.to_string() })
    }

    pub fn first(&self) -> &str { &self.lo }
    pub fn second(&self) -> &str { &self.hi }

    pub fn contains(&self, id: &str) -> bool {
        self.lo == id || self.hi == id
    }

    /// The participant that is not `id`, or `None` if `id` is neither.
    pub fn other(&self, id: &str) -> Option<&str> {
        if id == self.lo { Some(&self.hi) }
        else if id == self.hi { Some(&self.lo) }
        else { None }
    }
}

#[derive(Deserialize)]
struct PairRecord {
    lo: String,
    hi: String,
}

impl TryFrom<PairRecord> for Pair {
    type Error = Error;

    fn try_from(record: PairRecord) -> Result<Self> {
        Pair::new(&record.lo, &record.hi)
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}, {}}}", self.lo, self.hi)
    }
}

/// Current position of a timeline in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineState {
    Unassigned,
    Inactive,
    Active,
}

/// Time-ordered activity record of a single relationship.
///
/// A deserialized timeline must have participants if it has events, and its
/// events must be in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "TimelineRecord")]
pub struct Timeline {
    participants: Option<Pair>,
    events: Vec<Timestamp>,
}

impl Timeline {
    /// An unassigned timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the two participants. Legal exactly once.
    pub fn assign(&mut self, pair: &[&Identity]) -> Result<()> {
        if let Some(p) = &self.participants {
            return Err(Error::AlreadyValid(format!("timeline {p}")));
        }
        let [a, b] = pair else {
            return Err(Error::InvalidUsers(format!(
                "a timeline needs exactly two participants, got {}",
                pair.len()
            )));
        };
        let (Some(a), Some(b)) = (a.id(), b.id()) else {
            return Err(Error::InvalidUsers("participants must be valid identities".into()));
        };
        self.participants = Some(Pair::new(a, b)?);
        Ok(())
    }

    pub fn is_assigned(&self) -> bool {
        self.participants.is_some()
    }

    pub fn participants(&self) -> Result<&Pair> {
        self.participants.as_ref().ok_or(Error::Uninitialized("timeline"))
    }

    pub fn state(&self) -> TimelineState {
        match (&self.participants, self.events.len() % 2) {
            (None, _) => TimelineState::Unassigned,
            (Some(_), 0) => TimelineState::Inactive,
            (Some(_), _) => TimelineState::Active,
        }
    }

    /// The full event log, oldest first.
    pub fn events(&self) -> &[Timestamp] {
        &self.events
    }

    pub fn last_event(&self) -> Option<Timestamp> {
        self.events.last().copied()
    }

    /// Record the relationship being established at `date`.
    ///
    /// An out-of-order date is reported before the activity check.
    pub fn establish(&mut self, date: Timestamp) -> Result<()> {
        self.participants()?;
        if self.events.is_empty() {
            self.events.push(date);
            return Ok(());
        }
        self.check_order(date)?;
        if self.is_active(date)? {
            return Err(Error::AlreadyActive);
        }
        self.events.push(date);
        Ok(())
    }

    /// Record the relationship being torn down at `date`.
    pub fn tear_down(&mut self, date: Timestamp) -> Result<()> {
        self.participants()?;
        if self.events.is_empty() {
            return Err(Error::AlreadyInactive);
        }
        self.check_order(date)?;
        if !self.is_active(date)? {
            return Err(Error::AlreadyInactive);
        }
        self.events.push(date);
        Ok(())
    }

    /// Number of events at or before `date`.
    ///
    /// An event exactly at `date` counts as having happened.
    pub fn events_until(&self, date: Timestamp) -> Result<usize> {
        self.participants()?;
        Ok(self.events.partition_point(|e| *e <= date))
    }

    /// Whether the relationship was active at `date`.
    pub fn is_active(&self, date: Timestamp) -> Result<bool> {
        Ok(self.events_until(date)? % 2 == 1)
    }

    pub fn first_event(&self) -> Result<Option<Timestamp>> {
        self.participants()?;
        Ok(self.events.first().copied())
    }

    /// First event strictly after `date`.
    pub fn next_event(&self, date: Timestamp) -> Result<Option<Timestamp>> {
        let idx = self.events_until(date)?;
        Ok(self.events.get(idx).copied())
    }

    pub fn other_participant(&self, id: &str) -> Result<Option<&str>> {
        Ok(self.participants()?.other(id))
    }

    fn check_order(&self, date: Timestamp) -> Result<()> {
        match self.events.last() {
            Some(&latest) if date < latest => Err(Error::InvalidDate { date, latest }),
            _ => Ok(()),
        }
    }
}

#[derive(Deserialize)]
struct TimelineRecord {
    #[serde(default)]
    participants: Option<Pair>,
    #[serde(default)]
    events: Vec<Timestamp>,
}

impl TryFrom<TimelineRecord> for Timeline {
    type Error = Error;

    fn try_from(record: TimelineRecord) -> Result<Self> {
        if record.participants.is_none() && !record.events.is_empty() {
            return Err(Error::Uninitialized("timeline"));
        }
        if let Some(w) = record.events.windows(2).find(|w| w[1] < w[0]) {
            return Err(Error::InvalidDate { date: w[1], latest: w[0] });
        }
        Ok(Self { participants: record.participants, events: record.events })
    }
}

/// Timelines are equal when they link the same pair, whatever their history.
impl PartialEq for Timeline {
    fn eq(&self, other: &Self) -> bool {
        self.participants == other.participants
    }
}

impl Eq for Timeline {}

impl std::fmt::Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(pair) = &self.participants else {
            return f.write_str("Invalid link");
        };
        write!(f, "Link {pair} [")?;
        for (i, e) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e.to_rfc3339())?;
        }
        f.write_str("]")
    }
}
