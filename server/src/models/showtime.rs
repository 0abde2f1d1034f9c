use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Fields, FromFields, Validate, ValidationErrors};
use super::{PlayId, ShowTimeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowTimeBase {
    pub date_and_time: DateTime<Utc>,
}

impl FromFields for ShowTimeBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            date_and_time: fields.required("date_and_time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ShowTimeCreate {
    #[serde(flatten)]
    pub showtime: ShowTimeBase,
    pub play_id: PlayId,
}

impl FromFields for ShowTimeCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            showtime: ShowTimeBase::from_fields(fields),
            play_id: fields.required("play_id"),
        }
    }
}

// Structure is the only rule for showtimes.
impl Validate for ShowTimeCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl TryFrom<Value> for ShowTimeCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowTimeOut {
    pub id: ShowTimeId,
    #[serde(flatten)]
    pub showtime: ShowTimeBase,
}
