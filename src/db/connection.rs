//! Database connection management and migrations.

use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::r2d2::Pool;
use diesel_migrations::embed_migrations;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::prelude::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Database connection pool wrapper.
#[derive(Debug, Clone)]
pub struct DbConnection {
    /// PostgreSQL connection pool.
    pub pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbConnection {
    /// Create a new database connection pool.
    ///
    /// Fails when no connection can be established.
    pub fn new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use.
    pub fn lazy(database_url: &str) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().min_idle(Some(0)).build_unchecked(manager);
        Self { pool }
    }

    /// Run pending migrations and return the connection.
    pub fn setup(self) -> Result<Self> {
        info!("Running Database Migrations");
        self.pool
            .get()?
            .run_pending_migrations(MIGRATIONS)
            .map_err(Error::Migration)?;
        Ok(self)
    }
}
