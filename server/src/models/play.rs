use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, Fields, FromFields, Validate, ValidationErrors};
use super::{ActorOut, DirectorOut, PlayId, ShowTimeOut};

/// Maximum plays returned by one search page.
const MAX_PER_PAGE: u32 = 100;

const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayBase {
    pub title: String,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub duration: Option<String>,
}

impl FromFields for PlayBase {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            title: fields.required("title"),
            genre: fields.optional("genre"),
            synopsis: fields.optional("synopsis"),
            duration: fields.optional("duration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct PlayCreate {
    #[serde(flatten)]
    pub play: PlayBase,
}

impl FromFields for PlayCreate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            play: PlayBase::from_fields(fields),
        }
    }
}

impl Validate for PlayCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.play.title);
        errors.into_result()
    }
}

impl TryFrom<Value> for PlayCreate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct PlayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl PlayUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.synopsis.is_none()
            && self.duration.is_none()
    }
}

impl FromFields for PlayUpdate {
    fn from_fields(fields: &mut Fields<'_>) -> Self {
        Self {
            title: fields.optional("title"),
            genre: fields.optional("genre"),
            synopsis: fields.optional("synopsis"),
            duration: fields.optional("duration"),
        }
    }
}

impl Validate for PlayUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(title) = &self.title {
            errors.require_text("title", title);
        }
        errors.into_result()
    }
}

impl TryFrom<Value> for PlayUpdate {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validation::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOut {
    pub id: PlayId,
    #[serde(flatten)]
    pub play: PlayBase,
}

/// One page of search results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayListOut {
    pub total: i64,
    pub items: Vec<PlayOut>,
}

/// Search and pagination parameters for listing plays.
///
/// `search` matches title or genre, case-insensitively. Out-of-range paging
/// values are clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaySearch {
    pub search: Option<String>,
    /// 1-indexed
    pub page: u32,
    pub per_page: u32,
}

impl PlaySearch {
    pub fn new(search: Option<String>, page: u32, per_page: u32) -> Self {
        Self {
            search,
            page,
            per_page,
        }
    }

    /// Trimmed search term, or `None` when there is nothing to match on.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit())
    }
}

impl Default for PlaySearch {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A play together with its cast, directors and scheduled showtimes.
///
/// Read-only view; the child lists are always present, empty when the play
/// has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayWithDetails {
    #[serde(flatten)]
    pub play: PlayOut,
    #[serde(default)]
    pub actors: Vec<ActorOut>,
    #[serde(default)]
    pub directors: Vec<DirectorOut>,
    #[serde(default)]
    pub showtimes: Vec<ShowTimeOut>,
}

impl PlayWithDetails {
    pub fn new(play: PlayOut) -> Self {
        Self {
            play,
            actors: Vec::new(),
            directors: Vec::new(),
            showtimes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hamlet() -> PlayOut {
        PlayOut {
            id: 7,
            play: PlayBase {
                title: "Hamlet".to_string(),
                genre: Some("Tragedy".to_string()),
                synopsis: None,
                duration: Some("3h".to_string()),
            },
        }
    }

    #[test]
    fn test_create_keeps_inputs_verbatim() {
        let play = PlayCreate::try_from(json!({
            "title": "Hamlet",
            "genre": "Tragedy",
            "duration": "3h"
        }))
        .unwrap();
        assert_eq!(play.play.title, "Hamlet");
        assert_eq!(play.play.genre.as_deref(), Some("Tragedy"));
        assert_eq!(play.play.synopsis, None);
        assert_eq!(play.play.duration.as_deref(), Some("3h"));
    }

    #[test]
    fn test_create_reports_wrong_types_per_field() {
        let errors = PlayCreate::try_from(json!({ "title": 12, "genre": false })).unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "genre"]);
    }

    #[test]
    fn test_update_accepts_partial_input() {
        let update: PlayUpdate = serde_json::from_value(json!({ "genre": "Comedy" })).unwrap();
        assert_eq!(update.genre.as_deref(), Some("Comedy"));
        assert!(update.title.is_none());
        assert!(!update.is_empty());
        assert!(PlayUpdate::default().is_empty());
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let errors = PlayUpdate::try_from(json!({ "title": "" })).unwrap_err();
        assert!(errors.contains_field("title"));
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = PlayUpdate {
            synopsis: Some("A prince hesitates".to_string()),
            ..PlayUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "synopsis": "A prince hesitates" })
        );
    }

    #[test]
    fn test_output_flattens_base_fields() {
        assert_eq!(
            serde_json::to_value(hamlet()).unwrap(),
            json!({
                "id": 7,
                "title": "Hamlet",
                "genre": "Tragedy",
                "synopsis": null,
                "duration": "3h"
            })
        );
    }

    #[test]
    fn test_details_without_children_serialize_empty_lists() {
        let details = PlayWithDetails::new(hamlet());
        let wire = serde_json::to_value(&details).unwrap();
        assert_eq!(wire["actors"], json!([]));
        assert_eq!(wire["directors"], json!([]));
        assert_eq!(wire["showtimes"], json!([]));

        let back: PlayWithDetails = serde_json::from_value(json!({
            "id": 7,
            "title": "Hamlet",
            "genre": "Tragedy",
            "synopsis": null,
            "duration": "3h"
        }))
        .unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn test_search_clamps_paging() {
        let search = PlaySearch::new(Some("  ".to_string()), 0, 1000);
        assert_eq!(search.term(), None);
        assert_eq!(search.limit(), 100);
        assert_eq!(search.offset(), 0);

        let search = PlaySearch::new(Some(" ham ".to_string()), 3, 20);
        assert_eq!(search.term(), Some("ham"));
        assert_eq!(search.offset(), 40);
    }

    #[test]
    fn test_search_defaults_when_query_is_empty() {
        let search: PlaySearch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(search, PlaySearch::default());
        assert_eq!(search.limit(), 20);
    }
}
