//! Service layer orchestrating database mutations with the activity feed.
//!
//! `MomentoService` wraps `MomentoDb` (raw database access) together with the
//! display settings used for momento log lines. All repo methods are
//! implemented as `impl MomentoService` blocks under `repos/`.

use momento_core::time::DisplayOptions;

use crate::MomentoDb;
use crate::error::DatabaseError;

const DEFAULT_ACTIVITY_LIMIT: u32 = 100;

/// Orchestrates database mutations with the activity feed.
///
/// Every mutation method follows this protocol:
/// 1. Validate input (nothing is written on rejection)
/// 2. Execute SQL (delete runs inside a transaction)
/// 3. Record one activity entry, best effort
pub struct MomentoService {
    db: MomentoDb,
    display: DisplayOptions,
    default_limit: u32,
}

impl MomentoService {
    /// Create a new service wrapping a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = MomentoDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `MomentoDb`.
    #[must_use]
    pub fn from_db(db: MomentoDb) -> Self {
        Self {
            db,
            display: DisplayOptions::default(),
            default_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Render momento log lines with these display settings.
    #[must_use]
    pub const fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    /// Row limit applied when an activity query names none.
    #[must_use]
    pub const fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &MomentoDb {
        &self.db
    }

    #[must_use]
    pub const fn display(&self) -> &DisplayOptions {
        &self.display
    }

    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.default_limit
    }
}
