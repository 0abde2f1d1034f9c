use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Fields, FromFields, Validate, ValidationErrors};
use super::{ActorId, PlayId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorBase {
    pub name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
}

impl FromFields for ActorBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            name: fields.required("name"),
            gender: fields.optional("gender"),
            date_of_birth: fields.optional("date_of_birth"),
        }
    }
}

/// Cast member to add to an existing play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ActorCreate {
    #[serde(flatten)]
    pub actor: ActorBase,
    pub play_id: PlayId,
}

impl FromFields for ActorCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            actor: ActorBase::from_fields(fields),
            play_id: fields.required("play_id"),
        }
    }
}

impl Validate for ActorCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.actor.name);
        errors.into_result()
    }
}

impl TryFrom<Value> for ActorCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorOut {
    pub id: ActorId,
    #[serde(flatten)]
    pub actor: ActorBase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_reads_optional_birth_date() {
        let actor = ActorCreate::try_from(json!({
            "name": "Ada Kamara",
            "gender": "female",
            "date_of_birth": "1990-04-12T00:00:00Z",
            "play_id": 3
        }))
        .unwrap();
        assert_eq!(actor.play_id, 3);
        assert_eq!(
            actor.actor.date_of_birth,
            Some(Utc.with_ymd_and_hms(1990, 4, 12, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_date_only_birth_date_is_midnight_utc() {
        let actor = ActorCreate::try_from(json!({
            "name": "Ada",
            "date_of_birth": "1990-04-12",
            "play_id": 1
        }))
        .unwrap();
        assert_eq!(
            actor.actor.date_of_birth,
            Some(Utc.with_ymd_and_hms(1990, 4, 12, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_play_id_must_be_an_integer() {
        let errors = ActorCreate::try_from(json!({ "name": "Ada", "play_id": "3" })).unwrap_err();
        assert_eq!(errors.fields(), vec!["play_id"]);
    }

    #[test]
    fn test_malformed_birth_date_is_reported() {
        let errors = ActorCreate::try_from(json!({
            "name": "Ada",
            "date_of_birth": "twelfth of April",
            "play_id": 3
        }))
        .unwrap_err();
        assert_eq!(errors.fields(), vec!["date_of_birth"]);
    }
}
