//! Leave/enter orchestration.
//!
//! The hosting environment calls [`LocationService::on_leave`] and
//! [`LocationService::on_enter`] with plain event data plus a [`Host`]
//! capability handle. The service holds no state of its own: positions live
//! in the [`LocationStore`], the exclusion list in the [`ZonePolicy`].

use wayconf::{ConfigFile, MessagesConfig};
use waystore::{LocationStore, Position};

use crate::messages;
use crate::policy::ZonePolicy;

/// Capabilities the hosting environment lends the service for the duration
/// of an enter event.
pub trait Host {
    /// Move the user to `position` within their current zone.
    fn relocate(&mut self, position: Position);

    /// Show the user a notification.
    fn notify(&mut self, text: &str);
}

/// A user leaving their current zone.
#[derive(Debug, Clone, Copy)]
pub struct Departure<'a> {
    pub user_id: &'a str,
    pub zone: &'a str,
    pub position: Position,
}

/// A user entering a zone.
#[derive(Debug, Clone, Copy)]
pub struct Arrival<'a> {
    pub user_id: &'a str,
    pub zone: &'a str,
}

/// Orchestrates saves on leave and restores on enter, gated by the zone
/// exclusion policy on both sides.
pub struct LocationService {
    store: LocationStore,
    policy: ZonePolicy,
    messages: MessagesConfig,
}

impl LocationService {
    pub fn new(store: LocationStore, policy: ZonePolicy, messages: MessagesConfig) -> Self {
        Self {
            store,
            policy,
            messages,
        }
    }

    /// Wire up the whole service from one loaded config file.
    pub fn from_config(file: ConfigFile) -> Self {
        let store = LocationStore::open(file.config.paths.db_path());
        let messages = file.config.messages.clone();
        Self::new(store, ZonePolicy::new(file), messages)
    }

    /// Record the user's position as they leave, unless their zone is
    /// excluded from tracking.
    pub fn on_leave(&self, departure: Departure) {
        if self.policy.is_excluded(departure.zone) {
            tracing::debug!("not saving position: zone {:?} is excluded", departure.zone);
            return;
        }

        self.store
            .save(departure.user_id, departure.zone, departure.position);
    }

    /// Restore the user's stored position as they enter, or tell them why
    /// not.
    pub fn on_enter(&self, arrival: Arrival, host: &mut dyn Host) {
        if self.policy.is_excluded(arrival.zone) {
            host.notify(&messages::render(&self.messages.zone_excluded, arrival.zone));
            return;
        }

        match self.store.load(arrival.user_id, arrival.zone) {
            Some(record) => {
                tracing::debug!(
                    "restoring {} in {:?} to {}",
                    arrival.user_id,
                    arrival.zone,
                    record.position
                );
                host.relocate(record.position);
                host.notify(&messages::render(&self.messages.restored, arrival.zone));
            }
            None => {
                host.notify(&messages::render(
                    &self.messages.no_prior_location,
                    arrival.zone,
                ));
            }
        }
    }

    pub fn policy(&self) -> &ZonePolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut ZonePolicy {
        &mut self.policy
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    /// Release the database connection, e.g. on host shutdown. The next
    /// event transparently reopens it.
    pub fn close(&self) {
        self.store.close();
    }
}
