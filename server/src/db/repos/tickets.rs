use sqlx::PgConnection;
use tracing::debug;

use super::{customers, plays, showtimes};
use crate::db::records::TicketRecord;
use crate::models::{CustomerId, TicketCreate, TicketId, TicketOut, TicketWithRelations, Validate};
use crate::utils::error::{AppError, AppResult};

const TICKET_COLUMNS: &str =
    "id, seat_row_no, seat_no, ticket_no, price, showtime_id, play_id, customer_id";

/// Book a seat. Whether the referenced showtime, play and customer exist is
/// left to the database's foreign keys.
pub async fn insert(conn: &mut PgConnection, ticket: &TicketCreate) -> AppResult<TicketOut> {
    ticket.validate()?;

    let sql = format!(
        r#"
        INSERT INTO tickets (seat_row_no, seat_no, ticket_no, price, showtime_id, play_id, customer_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {TICKET_COLUMNS}
        "#
    );
    let record = sqlx::query_as::<_, TicketRecord>(&sql)
        .bind(ticket.ticket.seat_row_no)
        .bind(ticket.ticket.seat_no)
        .bind(&ticket.ticket.ticket_no)
        .bind(ticket.ticket.price)
        .bind(ticket.showtime_id)
        .bind(ticket.play_id)
        .bind(ticket.customer_id)
        .fetch_one(conn)
        .await?;

    debug!(
        ticket_id = record.id,
        showtime_id = record.showtime_id,
        customer_id = record.customer_id,
        "Ticket created"
    );
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: TicketId) -> AppResult<TicketOut> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");
    sqlx::query_as::<_, TicketRecord>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(TicketOut::from)
        .ok_or_else(|| AppError::not_found("ticket", id))
}

pub async fn list_for_customer(
    conn: &mut PgConnection,
    customer_id: CustomerId,
) -> AppResult<Vec<TicketOut>> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE customer_id = $1 ORDER BY id");
    let records = sqlx::query_as::<_, TicketRecord>(&sql)
        .bind(customer_id)
        .fetch_all(conn)
        .await?;
    Ok(records.into_iter().map(TicketOut::from).collect())
}

pub async fn with_relations(
    conn: &mut PgConnection,
    id: TicketId,
) -> AppResult<TicketWithRelations> {
    let ticket = get(&mut *conn, id).await?;
    let play = plays::get(&mut *conn, ticket.play_id).await?;
    let showtime = showtimes::get(&mut *conn, ticket.showtime_id).await?;
    let customer = customers::get(&mut *conn, ticket.customer_id).await?;
    Ok(TicketWithRelations {
        ticket,
        play,
        showtime,
        customer,
    })
}
