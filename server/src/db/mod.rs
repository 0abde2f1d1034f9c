//! Database layer: connection pool, scoped sessions and repositories.
//!
//! Repositories are free functions over `&mut PgConnection`, so they run
//! inside whichever session the caller has open:
//!
//! ```ignore
//! let mut session = db.acquire_session().await?;
//! let play = repos::plays::insert(session.connection().await?, &create).await?;
//! session.commit().await?;
//! ```

pub mod pool;
pub mod records;
pub mod repos;
pub mod session;

pub use pool::ConnectionProvider;
pub use session::Session;
