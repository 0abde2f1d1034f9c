use sqlx::PgConnection;
use tracing::debug;

use super::tickets;
use crate::db::records::CustomerRecord;
use crate::models::{CustomerCreate, CustomerId, CustomerOut, CustomerWithTickets, Validate};
use crate::utils::error::{AppError, AppResult};

pub async fn insert(conn: &mut PgConnection, customer: &CustomerCreate) -> AppResult<CustomerOut> {
    customer.validate()?;

    let fields = &customer.customer;
    let record = sqlx::query_as::<_, CustomerRecord>(
        r#"
        INSERT INTO customers (name, phone_number, email, address)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, phone_number, email, address
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.phone_number)
    .bind(fields.email.as_ref().map(|e| e.as_str()))
    .bind(&fields.address)
    .fetch_one(conn)
    .await?;

    debug!(customer_id = record.id, "Customer created");
    Ok(record.into())
}

pub async fn get(conn: &mut PgConnection, id: CustomerId) -> AppResult<CustomerOut> {
    sqlx::query_as::<_, CustomerRecord>(
        "SELECT id, name, phone_number, email, address FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .map(CustomerOut::from)
    .ok_or_else(|| AppError::not_found("customer", id))
}

pub async fn with_tickets(
    conn: &mut PgConnection,
    id: CustomerId,
) -> AppResult<CustomerWithTickets> {
    let customer = get(&mut *conn, id).await?;
    let tickets = tickets::list_for_customer(&mut *conn, id).await?;
    Ok(CustomerWithTickets { customer, tickets })
}
