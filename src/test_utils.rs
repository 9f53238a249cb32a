use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database as SeaDatabase};

use crate::database::Database;

async fn memory_database() -> Database {
    // One connection: every new in-memory connection would be a separate, empty store
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = SeaDatabase::connect(opt).await.unwrap();
    Database::from_connection(conn)
}

/// In-memory store with the schema and seed rows in place.
pub async fn test_db() -> Arc<Database> {
    let db = memory_database().await;
    db.bootstrap().await.unwrap();
    Arc::new(db)
}

/// In-memory store with no tables at all.
pub async fn unmigrated_test_db() -> Arc<Database> {
    Arc::new(memory_database().await)
}

/// In-memory store with the schema only.
pub async fn empty_test_db() -> Arc<Database> {
    let db = memory_database().await;
    migration::Migrator::up(&db.conn, None).await.unwrap();
    Arc::new(db)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve_stub(router: axum::Router) -> url::Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    url::Url::parse(&format!("http://{addr}/")).unwrap()
}
