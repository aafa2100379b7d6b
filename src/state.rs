use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::Session;
use crate::services::catalog::VenueCatalog;
use crate::services::store::sqlite::SqliteStore;
use crate::services::store::VenueSource;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub store: SqliteStore,
    pub config: AppConfig,
    pub catalog: RwLock<VenueCatalog>,
    /// Booking sessions keyed by user id.
    pub sessions: Mutex<HashMap<String, Session>>,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> anyhow::Result<Self> {
        let db = Arc::new(Mutex::new(conn));
        let store = SqliteStore::new(Arc::clone(&db));
        let catalog = VenueCatalog::load(&store)?;

        Ok(Self {
            db,
            store,
            config,
            catalog: RwLock::new(catalog),
            sessions: Mutex::new(HashMap::new()),
        })
    }

    pub fn refresh_catalog(&self) -> Result<usize, AppError> {
        self.reload_catalog(&self.store)
    }

    /// Reloads venues from `source` and swaps the snapshot. On failure the
    /// previous snapshot stays in place.
    pub fn reload_catalog(&self, source: &dyn VenueSource) -> Result<usize, AppError> {
        let fresh = VenueCatalog::load(source).map_err(|e| {
            tracing::warn!(error = %e, "venue catalog refresh failed, keeping stale snapshot");
            AppError::Upstream(e.to_string())
        })?;
        let count = fresh.len();

        *self
            .catalog
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("catalog lock poisoned")))? = fresh;
        Ok(count)
    }

    pub fn catalog(&self) -> Result<RwLockReadGuard<'_, VenueCatalog>, AppError> {
        self.catalog
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("catalog lock poisoned")))
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session lock poisoned")))
    }

    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("database lock poisoned")))
    }
}
