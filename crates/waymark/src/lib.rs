//! Waymark: restore users to their last known position when they re-enter
//! a zone.
//!
//! The hosting environment delivers leave/enter events and administrative
//! commands; everything durable lives in two places it owns in turn:
//! the location database ([`waystore::LocationStore`]) and the config file
//! ([`wayconf::ConfigFile`], holding the zone exclusion list and the
//! notification templates).
//!
//! - [`policy`] — which zones are excluded from tracking
//! - [`service`] — the leave/enter orchestration itself
//! - [`messages`] — notification template catalog
//! - [`admin`] — administrative commands and completion suggestions

pub mod admin;
pub mod messages;
pub mod policy;
pub mod service;

pub use policy::{AddOutcome, RemoveOutcome, ZonePolicy};
pub use service::{Arrival, Departure, Host, LocationService};
