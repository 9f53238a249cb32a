use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::{DatabaseConnection, DatabaseTransaction, SqlxSqliteConnector, TransactionTrait};

use crate::seed::{self, SeedReport};

/// Handle to the catalog store. Constructed once at startup and shared through `Arc`.
pub struct Database {
    pub(crate) conn: DatabaseConnection,
    open_sessions: Arc<AtomicUsize>,
}

impl Database {
    /// Open the store at `path`, bootstrapping it when the file does not exist yet.
    ///
    /// The existence of the file is the only signal used: an existing file is opened as-is
    /// and neither migrated nor seeded.
    pub async fn open(path: &Path) -> Result<Self> {
        let needs_bootstrap = !path.exists();
        log::debug!(
            "Opening store at: {} (bootstrap: {})",
            path.display(),
            needs_bootstrap
        );

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create store directory: {}",
                parent.display()
            ))?;
        }

        // Options built from the path itself; a URL would percent-decode it and split at `?`
        let connect_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(16)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(8))
            .connect_with(connect_options)
            .await
            .context(format!("Failed to open store: {}", path.display()))?;

        let conn = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        let database = Self::from_connection(conn);

        if needs_bootstrap {
            let report = database
                .bootstrap()
                .await
                .wrap_err_with(|| format!("Failed to initialize store at {}", path.display()))?;
            log::info!(
                "Store initialized at {} ({} seed rows)",
                path.display(),
                report.inserted_rows()
            );
        } else {
            log::info!("Store ready at: {}", path.display());
        }

        Ok(database)
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create every table and insert the seed rows in a single transaction.
    ///
    /// Nothing is committed unless both the schema and all seed steps succeed.
    pub async fn bootstrap(&self) -> Result<SeedReport> {
        let session = self.session().await?;

        log::debug!("Creating catalog tables");
        migration::Migrator::up(&*session, None)
            .await
            .context("Failed to create catalog tables")?;

        let report = seed::run(&*session)
            .await
            .context("Failed to seed catalog")?;

        session.commit().await?;
        Ok(report)
    }

    /// Acquire a session. It is released when dropped, whether or not the caller's work
    /// succeeded; uncommitted work is rolled back.
    pub async fn session(&self) -> Result<Session> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to start store session")?;

        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Session {
            txn,
            _lease: SessionLease(self.open_sessions.clone()),
        })
    }

    /// Number of sessions currently held by callers.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

/// A unit of work against the store, backed by one pooled connection.
pub struct Session {
    txn: DatabaseTransaction,
    _lease: SessionLease,
}

impl Session {
    pub async fn commit(self) -> Result<()> {
        let Session { txn, _lease } = self;
        txn.commit().await.context("Failed to commit store session")
    }
}

impl Deref for Session {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &Self::Target {
        &self.txn
    }
}

struct SessionLease(Arc<AtomicUsize>);

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

    use super::*;
    use crate::entities;
    use crate::test_utils::{test_db, unmigrated_test_db};

    async fn count_genres(db: &Database) -> Result<u64> {
        let session = db.session().await?;
        let count = entities::genre::Entity::find().count(&*session).await?;
        Ok(count)
    }

    async fn failing_lookup(db: &Database) -> Result<u64> {
        let session = db.session().await?;
        entities::genre::Entity::find().count(&*session).await?;
        Err(color_eyre::eyre::eyre!("lookup failed after reading"))
    }

    #[tokio::test]
    async fn test_open_bootstraps_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog").join("contenidos.db");

        let db = Database::open(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(count_genres(&db).await.unwrap(), 1);
        assert_eq!(
            entities::content::Entity::find().count(&db.conn).await.unwrap(),
            7
        );
    }

    #[tokio::test]
    async fn test_open_existing_file_skips_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contenidos.db");

        {
            let db = Database::open(&path).await.unwrap();
            entities::subtitle::Entity::delete_many()
                .exec(&db.conn)
                .await
                .unwrap();
            db.conn.close().await.unwrap();
        }

        // Seeding would refill the emptied table
        let db = Database::open(&path).await.unwrap();
        assert_eq!(
            entities::subtitle::Entity::find().count(&db.conn).await.unwrap(),
            0
        );
        assert_eq!(count_genres(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_open_uses_path_verbatim() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["a%20b.db", "q?x.db", "hash#1.db"] {
            let path = dir.path().join(name);

            let db = Database::open(&path).await.unwrap();
            assert!(path.exists(), "store not created at {}", path.display());
            assert_eq!(count_genres(&db).await.unwrap(), 1);
            db.conn.close().await.unwrap();

            // Reopening finds the file and leaves it alone
            let db = Database::open(&path).await.unwrap();
            assert_eq!(count_genres(&db).await.unwrap(), 1);
            db.conn.close().await.unwrap();
        }

        assert!(!dir.path().join("a b.db").exists());
        assert!(!dir.path().join("q").exists());
    }

    #[tokio::test]
    async fn test_failed_bootstrap_commits_nothing() {
        let db = unmigrated_test_db().await;
        db.conn
            .execute_unprepared("CREATE TABLE subtitles (id TEXT NOT NULL PRIMARY KEY)")
            .await
            .unwrap();

        assert!(db.bootstrap().await.is_err());
        assert_eq!(db.open_sessions(), 0);

        // Tables created earlier in the same transaction are gone
        let genres = entities::genre::Entity::find().count(&db.conn).await;
        assert!(genres.is_err());
        let subtitles = entities::subtitle::Entity::find().count(&db.conn).await;
        assert!(subtitles.is_err());
    }

    #[tokio::test]
    async fn test_open_existing_empty_file_is_not_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contenidos.db");
        std::fs::File::create(&path).unwrap();

        let db = Database::open(&path).await.unwrap();

        // No tables were created, so the query itself fails
        assert!(count_genres(&db).await.is_err());
    }

    #[tokio::test]
    async fn test_session_released_after_success() {
        let db = test_db().await;

        assert_eq!(count_genres(&db).await.unwrap(), 1);
        assert_eq!(db.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_session_released_when_operation_fails() {
        let db = test_db().await;

        assert!(failing_lookup(&db).await.is_err());
        assert_eq!(db.open_sessions(), 0);

        // The in-memory pool holds a single connection; a leaked session would block here
        let next = tokio::time::timeout(Duration::from_secs(2), db.session()).await;
        assert!(matches!(next, Ok(Ok(_))));
    }

    #[tokio::test]
    async fn test_session_released_when_task_panics() {
        let db = test_db().await;

        let task_db = db.clone();
        let result = tokio::spawn(async move {
            let _session = task_db.session().await.unwrap();
            panic!("handler blew up while holding a session");
        })
        .await;

        assert!(result.unwrap_err().is_panic());
        assert_eq!(db.open_sessions(), 0);
        assert_eq!(count_genres(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() {
        let db = test_db().await;

        {
            let session = db.session().await.unwrap();
            entities::cast_member::Entity::delete_many()
                .exec(&*session)
                .await
                .unwrap();
        }

        assert_eq!(
            entities::cast_member::Entity::find()
                .count(&db.conn)
                .await
                .unwrap(),
            4
        );
    }
}
