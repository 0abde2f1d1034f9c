use sqlx::PgConnection;
use tracing::debug;

use super::{actors, directors, showtimes};
use crate::db::records::PlayRecord;
use crate::models::{
    PlayCreate, PlayId, PlayListOut, PlayOut, PlaySearch, PlayUpdate, PlayWithDetails, Validate,
};
use crate::utils::error::{AppError, AppResult};

pub async fn insert(conn: &mut PgConnection, play: &PlayCreate) -> AppResult<PlayOut> {
    play.validate()?;

    let record = sqlx::query_as::<_, PlayRecord>(
        r#"
        INSERT INTO plays (title, genre, synopsis, duration)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, genre, synopsis, duration
        "#,
    )
    .bind(&play.play.title)
    .bind(&play.play.genre)
    .bind(&play.play.synopsis)
    .bind(&play.play.duration)
    .fetch_one(conn)
    .await?;

    debug!(play_id = record.id, "Play created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: PlayId) -> AppResult<PlayOut> {
    sqlx::query_as::<_, PlayRecord>(
        "SELECT id, title, genre, synopsis, duration FROM plays WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .map(PlayOut::from)
    .ok_or_else(|| AppError::not_found("play", id))
}

/// One page of plays whose title or genre contains the search term, ordered
/// by id, with the total number of matches.
pub async fn search(conn: &mut PgConnection, search: &PlaySearch) -> AppResult<PlayListOut> {
    let pattern = search.term().map(|term| format!("%{}%", escape_like(term)));

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM plays
        WHERE $1::text IS NULL OR title ILIKE $1 OR genre ILIKE $1
        "#,
    )
    .bind(&pattern)
    .fetch_one(&mut *conn)
    .await?;

    let records = sqlx::query_as::<_, PlayRecord>(
        r#"
        SELECT id, title, genre, synopsis, duration
        FROM plays
        WHERE $1::text IS NULL OR title ILIKE $1 OR genre ILIKE $1
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(i64::from(search.limit()))
    .bind(search.offset() as i64)
    .fetch_all(&mut *conn)
    .await?;

    Ok(PlayListOut {
        total,
        items: records.into_iter().map(PlayOut::from).collect(),
    })
}

/// Apply a partial update; fields absent from `update` keep their value.
pub async fn update(conn: &mut PgConnection, id: PlayId, update: &PlayUpdate) -> AppResult<PlayOut> {
    update.validate()?;
    if update.is_empty() {
        return get(conn, id).await;
    }

    let record = sqlx::query_as::<_, PlayRecord>(
        r#"
        UPDATE plays
        SET title = COALESCE($2, title),
            genre = COALESCE($3, genre),
            synopsis = COALESCE($4, synopsis),
            duration = COALESCE($5, duration)
        WHERE id = $1
        RETURNING id, title, genre, synopsis, duration
        "#,
    )
    .bind(id)
    .bind(&update.title)
    .bind(&update.genre)
    .bind(&update.synopsis)
    .bind(&update.duration)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::not_found("play", id))?;

    debug!(play_id = id, "Play updated");
    Ok(record.into())
}

/// Delete a play together with the actors, directors and showtimes it owns.
/// Fails while tickets still reference it.
pub async fn delete(conn: &mut PgConnection, id: PlayId) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM plays WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("play", id));
    }
    debug!(play_id = id, "Play deleted");
    Ok(())
}

pub async fn with_details(conn: &mut PgConnection, id: PlayId) -> AppResult<PlayWithDetails> {
    let play = get(&mut *conn, id).await?;
    let mut details = PlayWithDetails::new(play);
    details.actors = actors::list_for_play(&mut *conn, id).await?;
    details.directors = directors::list_for_play(&mut *conn, id).await?;
    details.showtimes = showtimes::list_for_play(&mut *conn, id).await?;
    Ok(details)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like("Hamlet"), "Hamlet");
    }
}
