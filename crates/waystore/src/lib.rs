//! SQLite-backed persistence of last known positions.
//!
//! One row per (user, zone) pair, overwritten atomically on every save.
//! The store owns a single lazily-opened connection and transparently
//! reopens it if it has been closed, so callers never manage connection
//! state themselves.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waystore::{LocationStore, Position};
//!
//! let store = LocationStore::open("~/.local/share/waymark/locations.db");
//!
//! let position = Position::new(10.5, 64.0, -3.25, 90.0, 0.0);
//! store.save("8f14e45f-ceea-4a67-aaaa-111111111111", "overworld", position);
//!
//! if let Some(record) = store.load("8f14e45f-ceea-4a67-aaaa-111111111111", "overworld") {
//!     println!("Last seen at {}", record.position);
//! }
//! ```
//!
//! # Failure Semantics
//!
//! Nothing at this boundary returns an error. Malformed input (a user id
//! that is not a UUID, a blank zone name) is logged at warn level and
//! dropped; storage faults are logged with their full cause chain and
//! mapped to `false` / `None` for that single call. The next call's
//! ensure-open guard repairs a broken connection.

pub mod store;
pub mod types;

pub use store::LocationStore;
pub use types::{LocationRecord, Position};
