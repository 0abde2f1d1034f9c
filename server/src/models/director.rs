use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Fields, FromFields, Validate, ValidationErrors};
use super::{DirectorId, PlayId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorBase {
    pub name: String,
}

impl FromFields for DirectorBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            name: fields.required("name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct DirectorCreate {
    #[serde(flatten)]
    pub director: DirectorBase,
    pub play_id: PlayId,
}

impl FromFields for DirectorCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            director: DirectorBase::from_fields(fields),
            play_id: fields.required("play_id"),
        }
    }
}

impl Validate for DirectorCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.director.name);
        errors.into_result()
    }
}

impl TryFrom<Value> for DirectorCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorOut {
    pub id: DirectorId,
    #[serde(flatten)]
    pub director: DirectorBase,
}
