use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{
    self, FieldValue, Fields, FromFields, Validate, ValidationError, ValidationErrors,
};
use super::UserId;

/// Account role, stored as the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(ValidationError::InvalidVariant {
                field: "role",
                value: s.to_owned(),
            }),
        }
    }
}

impl FieldValue for Role {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        let raw = value.as_str().ok_or(ValidationError::InvalidType {
            field,
            expected: "a string",
        })?;
        raw.parse().map_err(|_| ValidationError::InvalidVariant {
            field,
            value: raw.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBase {
    pub username: String,
    pub role: Role,
}

impl FromFields for UserBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            username: fields.required("username"),
            role: fields.required("role"),
        }
    }
}

/// Registration input. The password is accepted but never serialized or
/// printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct UserCreate {
    #[serde(flatten)]
    pub user: UserBase,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FromFields for UserCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            user: UserBase::from_fields(fields),
            password: fields.required("password"),
        }
    }
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("username", &self.user.username);
        errors.require_text("password", &self.password);
        errors.into_result()
    }
}

impl TryFrom<Value> for UserCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub id: UserId,
    #[serde(flatten)]
    pub user: UserBase,
}

/// Claims carried in an access token, as decoded by the auth layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenData {
    pub username: Option<String>,
    pub role: Option<Role>,
}
