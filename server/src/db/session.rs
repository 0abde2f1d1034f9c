//! One unit of work against the database.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use crate::utils::error::{AppError, AppResult};

/// A scoped database session.
///
/// Work runs inside a transaction that is opened lazily, so nothing is
/// persisted until [`Session::commit`]. Dropping the session on any path
/// (early return, `?`, panic) rolls back whatever is still open and hands the
/// connection back to the pool.
pub struct Session {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl Session {
    /// Open a session, failing with [`AppError::ConnectionError`] when the
    /// pool cannot supply a connection.
    pub(crate) async fn begin(pool: &PgPool) -> AppResult<Self> {
        let tx = open(pool).await?;
        debug!("Session acquired");
        Ok(Self {
            pool: pool.clone(),
            tx: Some(tx),
        })
    }

    /// Connection for running typed queries, starting a new transaction if
    /// the previous one was committed or rolled back.
    pub async fn connection(&mut self) -> AppResult<&mut PgConnection> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => open(&self.pool).await?,
        };
        Ok(&mut **self.tx.insert(tx))
    }

    /// Run a raw statement and return the number of affected rows.
    pub async fn execute(&mut self, sql: &str) -> AppResult<u64> {
        let conn = self.connection().await?;
        let result = sqlx::query(sql).execute(conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn commit(&mut self) -> AppResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
            debug!("Session committed");
        }
        Ok(())
    }

    pub async fn rollback(&mut self) -> AppResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
            debug!("Session rolled back");
        }
        Ok(())
    }

    /// Roll back uncommitted work and release the connection.
    pub async fn close(mut self) -> AppResult<()> {
        self.rollback().await?;
        debug!("Session closed");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.tx.is_some() {
            debug!("Session dropped with an open transaction; rolling back");
        }
    }
}

async fn open(pool: &PgPool) -> AppResult<Transaction<'static, Postgres>> {
    pool.begin().await.map_err(|e| {
        warn!(error = %e, "Failed to acquire database session");
        AppError::ConnectionError(e)
    })
}
