//! Sqlite store layer: validated upsert and point lookup with lazy reconnect.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::types::{LocationRecord, Position};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS player_locations (
    uuid  TEXT NOT NULL,
    world TEXT NOT NULL,
    x DOUBLE NOT NULL,
    y DOUBLE NOT NULL,
    z DOUBLE NOT NULL,
    yaw FLOAT NOT NULL,
    pitch FLOAT NOT NULL,
    PRIMARY KEY (uuid, world)
);
";

/// Durable store of last known positions, one row per (user, zone).
///
/// Owns a single connection behind a mutex. The connection is opened
/// lazily and reopened by the next operation whenever it is found absent,
/// so the store self-heals across restarts of the storage subsystem.
pub struct LocationStore {
    db_path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl LocationStore {
    /// Bind a store to `db_path` and attempt the first open eagerly.
    ///
    /// Never fails: an open failure here is logged and retried by the next
    /// save/load, keeping the host process alive on a broken data dir.
    pub fn open(db_path: impl Into<PathBuf>) -> Self {
        let store = Self {
            db_path: db_path.into(),
            conn: Mutex::new(None),
        };

        match store.lock_conn() {
            Ok(mut slot) => {
                if let Err(err) = ensure_open(&store.db_path, &mut slot) {
                    log_fault("open", &store.db_path.display().to_string(), &err);
                }
            }
            Err(err) => log_fault("open", &store.db_path.display().to_string(), &err),
        }

        store
    }

    /// Upsert the position for (user, zone). Returns whether a row was
    /// written.
    ///
    /// Invalid input (non-UUID user id, blank zone) is logged and dropped;
    /// storage faults are logged and mapped to `false` for this call.
    pub fn save(&self, user_id: &str, zone: &str, position: Position) -> bool {
        if parse_user_id(user_id).is_none() || !zone_is_valid(zone) {
            return false;
        }

        match self.try_save(user_id, zone, position) {
            Ok(()) => true,
            Err(err) => {
                log_fault("save", &format!("{}/{}", user_id, zone), &err);
                false
            }
        }
    }

    /// Fetch the stored position for (user, zone), if any.
    ///
    /// `None` covers all of: invalid input, no matching row, and storage
    /// faults (the latter logged with full context).
    pub fn load(&self, user_id: &str, zone: &str) -> Option<LocationRecord> {
        let parsed = parse_user_id(user_id)?;
        if !zone_is_valid(zone) {
            return None;
        }

        match self.try_load(user_id, zone) {
            Ok(position) => position.map(|position| LocationRecord {
                user_id: parsed,
                zone: zone.to_string(),
                position,
            }),
            Err(err) => {
                log_fault("load", &format!("{}/{}", user_id, zone), &err);
                None
            }
        }
    }

    /// Close the connection if open. Idempotent; the next operation
    /// reopens transparently.
    pub fn close(&self) {
        match self.try_close() {
            Ok(()) => {}
            Err(err) => log_fault("close", &self.db_path.display().to_string(), &err),
        }
    }

    fn try_save(&self, user_id: &str, zone: &str, position: Position) -> Result<()> {
        let mut slot = self.lock_conn()?;
        let conn = ensure_open(&self.db_path, &mut slot)?;

        // Single-statement upsert: no committed state ever lacks a row for
        // an existing key.
        conn.execute(
            "INSERT INTO player_locations (uuid, world, x, y, z, yaw, pitch)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(uuid, world) DO UPDATE SET
                x = excluded.x, y = excluded.y, z = excluded.z,
                yaw = excluded.yaw, pitch = excluded.pitch",
            params![
                user_id,
                zone,
                position.x,
                position.y,
                position.z,
                position.yaw,
                position.pitch,
            ],
        )
        .context("upserting location row")?;

        Ok(())
    }

    fn try_load(&self, user_id: &str, zone: &str) -> Result<Option<Position>> {
        let mut slot = self.lock_conn()?;
        let conn = ensure_open(&self.db_path, &mut slot)?;

        let mut stmt = conn.prepare(
            "SELECT x, y, z, yaw, pitch FROM player_locations
             WHERE uuid = ?1 AND world = ?2",
        )?;

        let result = stmt.query_row(params![user_id, zone], |row| {
            Ok(Position {
                x: row.get(0)?,
                y: row.get(1)?,
                z: row.get(2)?,
                yaw: row.get(3)?,
                pitch: row.get(4)?,
            })
        });

        match result {
            Ok(position) => Ok(Some(position)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("querying location row"),
        }
    }

    fn try_close(&self) -> Result<()> {
        let mut slot = self.lock_conn()?;
        if let Some(conn) = slot.take() {
            conn.close()
                .map_err(|(_, err)| err)
                .context("closing location db")?;
        }
        Ok(())
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("location store mutex poisoned"))
    }
}

/// Open the connection if the slot is empty, then hand it back.
///
/// Invoked at the top of every store operation; this is the whole
/// reconnection policy.
fn ensure_open<'a>(db_path: &Path, slot: &'a mut Option<Connection>) -> Result<&'a Connection> {
    if slot.is_none() {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("creating data directory")?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("opening location db {}", db_path.display()))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        conn.execute_batch(SCHEMA)
            .context("creating player_locations table")?;

        tracing::debug!("location db open at {}", db_path.display());
        *slot = Some(conn);
    }

    slot.as_ref()
        .ok_or_else(|| anyhow::anyhow!("connection slot empty after open"))
}

fn parse_user_id(user_id: &str) -> Option<Uuid> {
    match Uuid::parse_str(user_id) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("rejected location operation: user id {:?} is not a UUID", user_id);
            None
        }
    }
}

fn zone_is_valid(zone: &str) -> bool {
    if zone.trim().is_empty() {
        tracing::warn!("rejected location operation: blank zone name");
        return false;
    }
    true
}

/// Log a storage fault with its full cause chain, one frame per line.
fn log_fault(operation: &str, key: &str, err: &anyhow::Error) {
    tracing::error!("location store {} failed for {}: {}", operation, key, err);
    for (depth, cause) in err.chain().enumerate().skip(1) {
        tracing::warn!("  [{}] caused by: {}", depth, cause);
    }
}
