use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde_derive::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{errors::ServerError, schema::notes};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    #[default]
    Others,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CATEGORY_MESSAGE: &str = "\"category\" must be one of [Work, Personal, Others]";

impl FromStr for Category {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ServerError::UserError(String::from(CATEGORY_MESSAGE)))
    }
}

/// A stored row, every column.
#[derive(Clone, Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = notes)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// What create and update answer with: the accepted fields, not a re-read row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteInfo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Category,
}

/// Body of create and update requests. The outer `Option` is the key being
/// present, the inner one is an explicit JSON `null`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteInput {
    #[serde(default, deserialize_with = "explicit")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub category: Option<Option<String>>,
}

fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

/// Length rules for the text fields, checked once nulls and empties are ruled out.
#[derive(Validate)]
struct NoteRules {
    #[validate(
        required(message = "\"title\" is required"),
        length(min = 3, message = "\"title\" length must be at least 3 characters long")
    )]
    title: Option<String>,
    #[validate(
        required(message = "\"description\" is required"),
        length(min = 5, message = "\"description\" length must be at least 5 characters long")
    )]
    description: Option<String>,
}

fn message_of(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => err.code.to_string(),
    }
}

/// Input that passed validation, category resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteFields {
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl NoteInput {
    /// First broken rule, fields checked in order title, description, category.
    fn first_violation(&self) -> Option<String> {
        let rules = NoteRules {
            title: self.title.clone().flatten(),
            description: self.description.clone().flatten(),
        };
        let errors = rules.validate().err();
        let field_errors = errors
            .as_ref()
            .map(ValidationErrors::field_errors)
            .unwrap_or_default();

        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            match value {
                Some(None) => return Some(format!("\"{field}\" must be a string")),
                Some(Some(text)) if text.is_empty() => {
                    return Some(format!("\"{field}\" is not allowed to be empty"))
                }
                _ => {}
            }
            if let Some(err) = field_errors.get(field).and_then(|errs| errs.first()) {
                return Some(message_of(err));
            }
        }

        match &self.category {
            Some(None) => Some(String::from(CATEGORY_MESSAGE)),
            Some(Some(c)) => c.parse::<Category>().err().map(|e| e.to_string()),
            None => None,
        }
    }

    pub fn into_fields(self) -> Result<NoteFields, ServerError> {
        if let Some(message) = self.first_violation() {
            return Err(ServerError::UserError(message));
        }

        let category = match self.category.flatten() {
            Some(c) => c.parse::<Category>()?,
            None => Category::default(),
        };

        match (self.title.flatten(), self.description.flatten()) {
            (Some(title), Some(description)) => Ok(NoteFields {
                title,
                description,
                category,
            }),
            _ => Err(ServerError::UserError(String::from("invalid note"))),
        }
    }
}

impl NoteFields {
    pub fn into_info(self, id: i32) -> NoteInfo {
        NoteInfo {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct InsertNote<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
}

impl<'a> From<&'a NoteFields> for InsertNote<'a> {
    fn from(fields: &'a NoteFields) -> Self {
        InsertNote {
            title: &fields.title,
            description: &fields.description,
            category: fields.category.as_str(),
        }
    }
}

/// Query string of the list route.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Predicates to apply when listing; `None` means unfiltered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteFilter {
    pub category: Option<String>,
    pub title_like: Option<String>,
}

pub const LIKE_ESCAPE: char = '\\';

/// Pattern matching `needle` anywhere in the column, wildcards taken literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl From<ListQuery> for NoteFilter {
    fn from(query: ListQuery) -> Self {
        NoteFilter {
            category: query.category.filter(|c| !c.is_empty()),
            title_like: query
                .search
                .filter(|s| !s.is_empty())
                .map(|s| contains_pattern(&s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str, category: Option<&str>) -> NoteInput {
        NoteInput {
            title: Some(Some(title.to_string())),
            description: Some(Some(description.to_string())),
            category: category.map(|c| Some(c.to_string())),
        }
    }

    fn rejection(input: NoteInput) -> String {
        match input.into_fields() {
            Err(ServerError::UserError(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_note_and_defaults_category() {
        let fields = input("Buy milk", "2% milk, 1 gal", None).into_fields().unwrap();
        assert_eq!(fields.category, Category::Others);
        assert_eq!(fields.title, "Buy milk");

        let fields = input("Buy milk", "2% milk, 1 gal", Some("Personal"))
            .into_fields()
            .unwrap();
        assert_eq!(fields.category, Category::Personal);
    }

    #[test]
    fn accepts_minimum_lengths() {
        assert!(input("abc", "abcde", Some("Work")).into_fields().is_ok());
    }

    #[test]
    fn short_title_is_rejected() {
        assert_eq!(
            rejection(input("ab", "long enough", None)),
            "\"title\" length must be at least 3 characters long"
        );
    }

    #[test]
    fn short_description_is_rejected() {
        assert_eq!(
            rejection(input("Title", "abcd", Some("Work"))),
            "\"description\" length must be at least 5 characters long"
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let missing_title = NoteInput {
            description: Some(Some("a description".into())),
            ..NoteInput::default()
        };
        assert_eq!(rejection(missing_title), "\"title\" is required");

        let missing_description = NoteInput {
            title: Some(Some("Title".into())),
            ..NoteInput::default()
        };
        assert_eq!(rejection(missing_description), "\"description\" is required");
    }

    #[test]
    fn title_is_reported_before_other_fields() {
        assert_eq!(
            rejection(input("ab", "", Some("Nope"))),
            "\"title\" length must be at least 3 characters long"
        );
        assert_eq!(
            rejection(input("Title", "abc", Some("Nope"))),
            "\"description\" length must be at least 5 characters long"
        );
    }

    #[test]
    fn empty_text_has_its_own_message() {
        assert_eq!(
            rejection(input("", "a description", None)),
            "\"title\" is not allowed to be empty"
        );
        assert_eq!(
            rejection(input("Title", "", None)),
            "\"description\" is not allowed to be empty"
        );
    }

    #[test]
    fn null_differs_from_a_missing_key() {
        let parsed: NoteInput = serde_json::from_str(
            r#"{"title": "Title", "description": "a description", "category": null}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, Some(None));
        assert_eq!(
            rejection(parsed),
            "\"category\" must be one of [Work, Personal, Others]"
        );

        let parsed: NoteInput =
            serde_json::from_str(r#"{"title": null, "description": "a description"}"#).unwrap();
        assert_eq!(rejection(parsed), "\"title\" must be a string");

        let parsed: NoteInput =
            serde_json::from_str(r#"{"title": "Title", "description": null}"#).unwrap();
        assert_eq!(rejection(parsed), "\"description\" must be a string");

        let parsed: NoteInput =
            serde_json::from_str(r#"{"title": "Title", "description": "a description"}"#)
                .unwrap();
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.into_fields().unwrap().category, Category::Others);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            rejection(input("Title", "a description", Some("work"))),
            "\"category\" must be one of [Work, Personal, Others]"
        );
    }

    #[test]
    fn length_counts_characters() {
        assert!(input("日本語", "ü ö ä ß é", None).into_fields().is_ok());
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("foo"), "%foo%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn empty_query_values_do_not_filter() {
        let filter = NoteFilter::from(ListQuery {
            category: Some(String::new()),
            search: Some(String::new()),
        });
        assert_eq!(filter, NoteFilter::default());

        let filter = NoteFilter::from(ListQuery {
            category: Some("Work".into()),
            search: Some("foo".into()),
        });
        assert_eq!(filter.category.as_deref(), Some("Work"));
        assert_eq!(filter.title_like.as_deref(), Some("%foo%"));
    }
}
