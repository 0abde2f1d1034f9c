use sqlx::PgConnection;
use tracing::debug;

use crate::db::records::ShowTimeRecord;
use crate::models::{PlayId, ShowTimeCreate, ShowTimeId, ShowTimeOut, Validate};
use crate::utils::error::{AppError, AppResult};

pub async fn insert(conn: &mut PgConnection, showtime: &ShowTimeCreate) -> AppResult<ShowTimeOut> {
    showtime.validate()?;

    let record = sqlx::query_as::<_, ShowTimeRecord>(
        r#"
        INSERT INTO showtimes (play_id, date_and_time)
        VALUES ($1, $2)
        RETURNING id, play_id, date_and_time
        "#,
    )
    .bind(showtime.play_id)
    .bind(showtime.showtime.date_and_time)
    .fetch_one(conn)
    .await?;

    debug!(showtime_id = record.id, play_id = record.play_id, "Showtime created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: ShowTimeId) -> AppResult<ShowTimeOut> {
    sqlx::query_as::<_, ShowTimeRecord>(
        "SELECT id, play_id, date_and_time FROM showtimes WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .map(ShowTimeOut::from)
    .ok_or_else(|| AppError::not_found("showtime", id))
}

/// Showtimes for a play in chronological order.
pub async fn list_for_play(
    conn: &mut PgConnection,
    play_id: PlayId,
) -> AppResult<Vec<ShowTimeOut>> {
    let records = sqlx::query_as::<_, ShowTimeRecord>(
        r#"
        SELECT id, play_id, date_and_time
        FROM showtimes
        WHERE play_id = $1
        ORDER BY date_and_time, id
        "#,
    )
    .bind(play_id)
    .fetch_all(conn)
    .await?;
    Ok(records.into_iter().map(ShowTimeOut::from).collect())
}
