//! Storage engine lifecycle
//!
//! The engine is an explicitly constructed, passed-down handle (no
//! process-wide globals): it owns the backing-store location and the payload
//! store, applies migrations and seeding on startup, and hands out scoped
//! units of work. Re-pointing the engine at a different store is a rare
//! administrative operation serialized against all in-flight units of work.

use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use hrsdb_core::config::{Config, PayloadBackend};
use hrsdb_core::errors::{HrsError, Result};
use rusqlite::Connection;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db;
use crate::errors::from_rusqlite;
use crate::migrations;
use crate::payload::{FsPayloadStore, InlinePayloadStore, PayloadStore};
use crate::seed;
use crate::session::UnitOfWork;

/// Where the relational rows live
enum Location {
    /// SQLite database file on disk
    Disk(PathBuf),
    /// Named shared-cache in-memory database (test isolation); every
    /// connection to the same name observes one database
    Memory(String),
}

impl Location {
    fn connect(&self) -> Result<Connection> {
        match self {
            Location::Disk(path) => db::open(path),
            Location::Memory(name) => {
                db::open_uri(&format!("file:{}?mode=memory&cache=shared", name))
            }
        }
    }
}

struct EngineShared {
    location: Location,
    payloads: Box<dyn PayloadStore>,
    /// Keeps shared in-memory databases alive for the engine's lifetime;
    /// unused for disk databases
    _anchor: Option<Mutex<Connection>>,
}

/// Storage engine owning the connection lifecycle
///
/// Units of work hold the engine's reader lock for their duration, so
/// [`reinit`](StorageEngine::reinit) (writer lock) drains every in-flight
/// unit of work before the old store is released.
pub struct StorageEngine {
    shared: RwLock<EngineShared>,
}

impl StorageEngine {
    /// Open the engine over the configured database file
    ///
    /// Applies schema migrations and seeds the biometric type table;
    /// both are idempotent, so opening an already-initialized store is safe.
    pub fn open(config: &Config) -> Result<Self> {
        let shared = Self::build(config, Location::Disk(config.database_path.clone()))?;
        Ok(Self {
            shared: RwLock::new(shared),
        })
    }

    /// Open an engine over a fresh in-memory database
    ///
    /// Every engine gets an independent database; intended for tests.
    pub fn open_in_memory(config: &Config) -> Result<Self> {
        let name = format!("hrsdb-{}", Uuid::new_v4());
        let shared = Self::build(config, Location::Memory(name))?;
        Ok(Self {
            shared: RwLock::new(shared),
        })
    }

    /// Re-point the engine at a different backing store
    ///
    /// Waits for all in-flight units of work to finish, then closes the old
    /// store and initializes the new one.
    pub fn reinit(&self, config: &Config) -> Result<()> {
        let mut shared = self.shared.write().map_err(|_| lock_poisoned())?;
        info!(path = %config.database_path.display(), "re-pointing storage engine");
        *shared = Self::build(config, Location::Disk(config.database_path.clone()))?;
        Ok(())
    }

    fn build(config: &Config, location: Location) -> Result<EngineShared> {
        let mut setup = location.connect()?;
        db::configure(&setup)?;
        migrations::apply_migrations(&mut setup)?;
        let seeded = seed::seed_biometric_types(&setup)?;
        debug!(seeded, "storage engine initialized");

        let payloads: Box<dyn PayloadStore> = match config.payload_backend {
            PayloadBackend::Files => Box::new(FsPayloadStore::new(&config.upload_root)),
            PayloadBackend::Inline => Box::new(InlinePayloadStore),
        };

        let _anchor = match &location {
            Location::Memory(_) => Some(Mutex::new(setup)),
            Location::Disk(_) => None,
        };

        Ok(EngineShared {
            location,
            payloads,
            _anchor,
        })
    }

    /// Run a unit of work: open a connection, begin a transaction, run the
    /// body, commit on success, roll back on failure
    ///
    /// The transaction's drop behavior rolls back on the error path and on
    /// panic, and the connection is released on every exit path. Nesting is
    /// prevented by construction: the handle passed to `body` cannot open
    /// another unit of work.
    pub fn unit_of_work<T>(
        &self,
        body: impl FnOnce(&UnitOfWork<'_>) -> Result<T>,
    ) -> Result<T> {
        let shared = self.shared.read().map_err(|_| lock_poisoned())?;

        let mut conn = shared.location.connect()?;
        db::configure(&conn)?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        let uow = UnitOfWork::new(tx, shared.payloads.as_ref());

        match body(&uow) {
            Ok(value) => {
                uow.commit()?;
                Ok(value)
            }
            Err(err) => {
                // Dropping the handle rolls the transaction back
                drop(uow);
                warn!(error = %err, "unit of work rolled back");
                Err(err)
            }
        }
    }
}

fn lock_poisoned() -> HrsError {
    HrsError::Storage {
        op: "engine_lock".to_string(),
        message: "engine lock poisoned".to_string(),
    }
}
