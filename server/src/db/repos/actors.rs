use sqlx::PgConnection;
use tracing::debug;

use crate::db::records::ActorRecord;
use crate::models::{ActorCreate, ActorId, ActorOut, PlayId, Validate};
use crate::utils::error::{AppError, AppResult};

pub async fn insert(conn: &mut PgConnection, actor: &ActorCreate) -> AppResult<ActorOut> {
    actor.validate()?;

    let record = sqlx::query_as::<_, ActorRecord>(
        r#"
        INSERT INTO actors (play_id, name, gender, date_of_birth)
        VALUES ($1, $2, $3, $4)
        RETURNING id, play_id, name, gender, date_of_birth
        "#,
    )
    .bind(actor.play_id)
    .bind(&actor.actor.name)
    .bind(&actor.actor.gender)
    .bind(actor.actor.date_of_birth)
    .fetch_one(conn)
    .await?;

    debug!(actor_id = record.id, play_id = record.play_id, "Actor created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: ActorId) -> AppResult<ActorOut> {
    sqlx::query_as::<_, ActorRecord>(
        "SELECT id, play_id, name, gender, date_of_birth FROM actors WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .map(ActorOut::from)
    .ok_or_else(|| AppError::not_found("actor", id))
}

pub async fn list_for_play(conn: &mut PgConnection, play_id: PlayId) -> AppResult<Vec<ActorOut>> {
    let records = sqlx::query_as::<_, ActorRecord>(
        r#"
        SELECT id, play_id, name, gender, date_of_birth
        FROM actors
        WHERE play_id = $1
        ORDER BY id
        "#,
    )
    .bind(play_id)
    .fetch_all(conn)
    .await?;
    Ok(records.into_iter().map(ActorOut::from).collect())
}
