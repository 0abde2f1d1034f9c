use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Email, Fields, FromFields, Validate, ValidationErrors};
use super::{CustomerId, TicketOut};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBase {
    pub name: String,
    pub phone_number: Option<String>,
    /// Used for booking notifications.
    pub email: Option<Email>,
    pub address: String,
}

impl FromFields for CustomerBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            name: fields.required("name"),
            phone_number: fields.optional("phone_number"),
            email: fields.optional("email"),
            address: fields.required("address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct CustomerCreate {
    #[serde(flatten)]
    pub customer: CustomerBase,
}

impl FromFields for CustomerCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            customer: CustomerBase::from_fields(fields),
        }
    }
}

impl Validate for CustomerCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.customer.name);
        errors.require_text("address", &self.customer.address);
        errors.into_result()
    }
}

impl TryFrom<Value> for CustomerCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOut {
    pub id: CustomerId,
    #[serde(flatten)]
    pub customer: CustomerBase,
}

/// A customer and every ticket they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerWithTickets {
    #[serde(flatten)]
    pub customer: CustomerOut,
    #[serde(default)]
    pub tickets: Vec<TicketOut>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::ValidationError;
    use serde_json::json;

    #[test]
    fn test_email_is_optional() {
        let customer = CustomerCreate::try_from(json!({
            "name": "Fatmata",
            "address": "12 Siaka Stevens St, Freetown"
        }))
        .unwrap();
        assert_eq!(customer.customer.email, None);
        assert_eq!(customer.customer.phone_number, None);
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let errors = CustomerCreate::try_from(json!({
            "name": "Fatmata",
            "email": "not-an-email",
            "address": "12 Siaka Stevens St, Freetown"
        }))
        .unwrap_err();
        assert_eq!(errors.fields(), vec!["email"]);
        assert!(matches!(
            errors.errors()[0],
            ValidationError::InvalidFormat { field: "email", .. }
        ));
    }

    #[test]
    fn test_missing_name_and_address_are_both_reported() {
        let errors = CustomerCreate::try_from(json!({ "email": "alice@example.com" })).unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "address"]);
    }

    #[test]
    fn test_tickets_default_to_empty() {
        let parsed: CustomerWithTickets = serde_json::from_value(json!({
            "id": 2,
            "name": "Fatmata",
            "phone_number": null,
            "email": "alice@example.com",
            "address": "Freetown"
        }))
        .unwrap();
        assert!(parsed.tickets.is_empty());
        assert_eq!(
            parsed.customer.customer.email.as_ref().map(Email::as_str),
            Some("alice@example.com")
        );
    }
}
