use sqlx::PgConnection;
use tracing::debug;

use crate::db::records::UserRecord;
use crate::models::{UserCreate, UserId, UserOut, Validate};
use crate::utils::error::{AppError, AppResult};

/// Store a new user. Hashing `user.password` is the auth layer's job; only
/// the resulting hash is persisted.
pub async fn insert(
    conn: &mut PgConnection,
    user: &UserCreate,
    password_hash: &str,
) -> AppResult<UserOut> {
    user.validate()?;

    let record = sqlx::query_as::<_, UserRecord>(
        r#"
        INSERT INTO users (username, role, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, role, password_hash
        "#,
    )
    .bind(&user.user.username)
    .bind(user.user.role)
    .bind(password_hash)
    .fetch_one(conn)
    .await?;

    debug!(user_id = record.id, "User created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: UserId) -> AppResult<UserOut> {
    sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, role, password_hash FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .map(UserOut::from)
    .ok_or_else(|| AppError::not_found("user", id))
}

/// Full row including the password hash, for credential checks.
pub async fn find_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> AppResult<Option<UserRecord>> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, role, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;
    Ok(record)
}
