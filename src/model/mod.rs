//! # Social Graph Model
//!
//! Plain data types shared by the registry and the traversal engine.
//!
//! Design rule: this module is pure data — no I/O, no logging, no locks.

pub mod identity;
pub mod timeline;
pub mod friend;
pub mod status;

pub use identity::Identity;
pub use timeline::{Pair, Timeline, TimelineState};
pub use friend::Friend;
pub use status::Status;

/// An instant on the graph's time axis.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
