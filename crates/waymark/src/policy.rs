//! Zone exclusion policy.
//!
//! An ordered, duplicate-free list of zone names for which positions are
//! neither saved nor restored. Every effective mutation rewrites the whole
//! config file, so the on-disk list is always current.

use anyhow::{Context, Result};
use wayconf::ConfigFile;

/// Outcome of [`ZonePolicy::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Outcome of [`ZonePolicy::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

/// Mutable, persisted set of excluded zones.
pub struct ZonePolicy {
    file: ConfigFile,
}

impl ZonePolicy {
    pub fn new(file: ConfigFile) -> Self {
        Self { file }
    }

    /// Exact, case-sensitive membership test.
    pub fn is_excluded(&self, zone: &str) -> bool {
        self.file.config.zones.excluded.iter().any(|z| z == zone)
    }

    /// Append `zone` if absent and persist the updated list.
    ///
    /// A persist failure propagates; the host surfaces its own error for
    /// config writes.
    pub fn add(&mut self, zone: &str) -> Result<AddOutcome> {
        if self.is_excluded(zone) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.file.config.zones.excluded.push(zone.to_string());
        self.persist()?;
        tracing::info!("zone {:?} added to the exclusion list", zone);
        Ok(AddOutcome::Added)
    }

    /// Remove `zone` if present and persist the updated list.
    pub fn remove(&mut self, zone: &str) -> Result<RemoveOutcome> {
        let before = self.file.config.zones.excluded.len();
        self.file.config.zones.excluded.retain(|z| z != zone);
        if self.file.config.zones.excluded.len() == before {
            return Ok(RemoveOutcome::NotPresent);
        }

        self.persist()?;
        tracing::info!("zone {:?} removed from the exclusion list", zone);
        Ok(RemoveOutcome::Removed)
    }

    /// The current exclusion list, verbatim.
    pub fn list(&self) -> &[String] {
        &self.file.config.zones.excluded
    }

    fn persist(&self) -> Result<()> {
        self.file.save().with_context(|| {
            format!("persisting exclusion list to {}", self.file.path().display())
        })
    }
}
