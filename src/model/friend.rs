//! Friend — an identity reached by a neighborhood query, with its distance.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// `(identity id, distance)` produced by a traversal.
///
/// Distance 0 is a direct neighbor of the origin. Two friends with the same
/// id are equal regardless of distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    id: String,
    distance: u32,
}

impl Friend {
    pub fn new(id: impl Into<String>, distance: u32) -> Self {
        Self { id: id.into(), distance }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }
}

impl PartialEq for Friend {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Friend {}

impl Hash for Friend {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Friend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.id, self.distance)
    }
}
