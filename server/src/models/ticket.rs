use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Fields, FromFields, Validate, ValidationError, ValidationErrors};
use super::{CustomerId, CustomerOut, PlayId, PlayOut, ShowTimeId, ShowTimeOut, TicketId};

/// Prices are stored as `NUMERIC(10, 2)`.
const PRICE_SCALE: u32 = 2;
const PRICE_INTEGER_DIGITS: u32 = 8;

fn max_price() -> Decimal {
    Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketBase {
    pub seat_row_no: i32,
    pub seat_no: i32,
    pub ticket_no: Option<String>,
    /// Serialized as a JSON number.
    pub price: Decimal,
}

impl FromFields for TicketBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            seat_row_no: fields.required("seat_row_no"),
            seat_no: fields.required("seat_no"),
            ticket_no: fields.optional("ticket_no"),
            price: fields.required("price"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct TicketCreate {
    #[serde(flatten)]
    pub ticket: TicketBase,
    pub showtime_id: ShowTimeId,
    pub play_id: PlayId,
    pub customer_id: CustomerId,
}

impl FromFields for TicketCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            ticket: TicketBase::from_fields(fields),
            showtime_id: fields.required("showtime_id"),
            play_id: fields.required("play_id"),
            customer_id: fields.required("customer_id"),
        }
    }
}

impl Validate for TicketCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let price = self.ticket.price;
        if price < Decimal::ZERO {
            errors.push(ValidationError::InvalidFormat {
                field: "price",
                reason: "must not be negative",
            });
        } else if price.normalize().scale() > PRICE_SCALE {
            errors.push(ValidationError::InvalidFormat {
                field: "price",
                reason: "must have at most two decimal places",
            });
        } else if price >= max_price() {
            errors.push(ValidationError::InvalidFormat {
                field: "price",
                reason: "is too large",
            });
        }
        errors.into_result()
    }
}

impl TryFrom<Value> for TicketCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketOut {
    pub id: TicketId,
    #[serde(flatten)]
    pub ticket: TicketBase,
    pub showtime_id: ShowTimeId,
    pub play_id: PlayId,
    pub customer_id: CustomerId,
}

/// A ticket with the play, showtime and customer it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketWithRelations {
    #[serde(flatten)]
    pub ticket: TicketOut,
    pub play: PlayOut,
    pub showtime: ShowTimeOut,
    pub customer: CustomerOut,
}
