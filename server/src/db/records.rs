//! Rows as stored in the database, and the mapping from each row to the
//! output shape returned to callers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::models::validation::Email;
use crate::models::{
    ActorBase, ActorOut, CustomerBase, CustomerOut, DirectorBase, DirectorOut, PlayBase, PlayOut,
    Role, ShowTimeBase, ShowTimeOut, TicketBase, TicketOut, UserBase, UserOut,
};

#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// Produced by the auth layer; never leaves this crate in an output shape.
    pub password_hash: String,
}

impl From<UserRecord> for UserOut {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            user: UserBase {
                username: record.username,
                role: record.role,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PlayRecord {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub duration: Option<String>,
}

impl From<PlayRecord> for PlayOut {
    fn from(record: PlayRecord) -> Self {
        Self {
            id: record.id,
            play: PlayBase {
                title: record.title,
                genre: record.genre,
                synopsis: record.synopsis,
                duration: record.duration,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ActorRecord {
    pub id: i64,
    pub play_id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
}

impl From<ActorRecord> for ActorOut {
    fn from(record: ActorRecord) -> Self {
        Self {
            id: record.id,
            actor: ActorBase {
                name: record.name,
                gender: record.gender,
                date_of_birth: record.date_of_birth,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DirectorRecord {
    pub id: i64,
    pub play_id: i64,
    pub name: String,
}

impl From<DirectorRecord> for DirectorOut {
    fn from(record: DirectorRecord) -> Self {
        Self {
            id: record.id,
            director: DirectorBase { name: record.name },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ShowTimeRecord {
    pub id: i64,
    pub play_id: i64,
    pub date_and_time: DateTime<Utc>,
}

impl From<ShowTimeRecord> for ShowTimeOut {
    fn from(record: ShowTimeRecord) -> Self {
        Self {
            id: record.id,
            showtime: ShowTimeBase {
                date_and_time: record.date_and_time,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: String,
}

impl From<CustomerRecord> for CustomerOut {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            customer: CustomerBase {
                name: record.name,
                phone_number: record.phone_number,
                email: record.email.map(Email::from_stored),
                address: record.address,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TicketRecord {
    pub id: i64,
    pub seat_row_no: i32,
    pub seat_no: i32,
    pub ticket_no: Option<String>,
    pub price: Decimal,
    pub showtime_id: i64,
    pub play_id: i64,
    pub customer_id: i64,
}

impl From<TicketRecord> for TicketOut {
    fn from(record: TicketRecord) -> Self {
        Self {
            id: record.id,
            ticket: TicketBase {
                seat_row_no: record.seat_row_no,
                seat_no: record.seat_no,
                ticket_no: record.ticket_no,
                price: record.price,
            },
            showtime_id: record.showtime_id,
            play_id: record.play_id,
            customer_id: record.customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_output_drops_password_hash() {
        let out = UserOut::from(UserRecord {
            id: 1,
            username: "box-office".to_string(),
            role: Role::Admin,
            password_hash: "$argon2id$...".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({ "id": 1, "username": "box-office", "role": "admin" })
        );
    }

    #[test]
    fn test_ticket_output_keeps_foreign_keys() {
        let out = TicketOut::from(TicketRecord {
            id: 9,
            seat_row_no: 3,
            seat_no: 12,
            ticket_no: Some("A-0009".to_string()),
            price: Decimal::new(2550, 2),
            showtime_id: 1,
            play_id: 1,
            customer_id: 1,
        });
        assert_eq!(out.id, 9);
        assert_eq!((out.showtime_id, out.play_id, out.customer_id), (1, 1, 1));
        assert_eq!(out.ticket.ticket_no.as_deref(), Some("A-0009"));
    }

    #[test]
    fn test_stored_email_is_carried_over() {
        let out = CustomerOut::from(CustomerRecord {
            id: 4,
            name: "Fatmata".to_string(),
            phone_number: Some("+232 76 000000".to_string()),
            email: Some("alice@example.com".to_string()),
            address: "Freetown".to_string(),
        });
        assert_eq!(
            out.customer.email.map(String::from).as_deref(),
            Some("alice@example.com")
        );
    }
}
