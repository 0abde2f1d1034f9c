use sqlx::PgConnection;
use tracing::debug;

use crate::db::records::DirectorRecord;
use crate::models::{DirectorCreate, DirectorId, DirectorOut, PlayId, Validate};
use crate::utils::error::{AppError, AppResult};

pub async fn insert(conn: &mut PgConnection, director: &DirectorCreate) -> AppResult<DirectorOut> {
    director.validate()?;

    let record = sqlx::query_as::<_, DirectorRecord>(
        r#"
        INSERT INTO directors (play_id, name)
        VALUES ($1, $2)
        RETURNING id, play_id, name
        "#,
    )
    .bind(director.play_id)
    .bind(&director.director.name)
    .fetch_one(conn)
    .await?;

    debug!(director_id = record.id, play_id = record.play_id, "Director created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: DirectorId) -> AppResult<DirectorOut> {
    sqlx::query_as::<_, DirectorRecord>("SELECT id, play_id, name FROM directors WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(DirectorOut::from)
        .ok_or_else(|| AppError::not_found("director", id))
}

pub async fn list_for_play(
    conn: &mut PgConnection,
    play_id: PlayId,
) -> AppResult<Vec<DirectorOut>> {
    let records = sqlx::query_as::<_, DirectorRecord>(
        "SELECT id, play_id, name FROM directors WHERE play_id = $1 ORDER BY id",
    )
    .bind(play_id)
    .fetch_all(conn)
    .await?;
    Ok(records.into_iter().map(DirectorOut::from).collect())
}
