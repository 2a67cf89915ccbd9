//! Input shapes for creating and updating todos, and their validation.
//!
//! Adapters build a [`CreateTodo`] or [`UpdateTodo`] from whatever their wire
//! format is. Converting those into [`NewTodo`] / [`TodoPatch`] is the only way
//! to obtain values the repositories accept, so nothing reaches the store
//! without passing the checks below.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use miette::Diagnostic;
use thiserror::Error;

use super::models::Priority;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

const DUE_YEAR_MIN: i32 = 1;
const DUE_YEAR_MAX: i32 = 9999;

/// Naive formats accepted for due dates, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Rejected input, naming the offending field.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
#[diagnostic(code(todo_app::db::validation_error))]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unvalidated create input.
#[derive(Debug, Clone, Default)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    /// One of `low`, `medium`, `high`; defaults to `medium`.
    pub priority: Option<String>,
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl CreateTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Unvalidated partial update. `None` leaves a field untouched.
///
/// `description` and `due_date` are doubly optional: `Some(None)` clears the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due_date: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// A validated todo ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) completed: bool,
    pub(crate) priority: Priority,
    pub(crate) due_date: Option<DateTime<Utc>>,
    pub(crate) tags: Vec<String>,
}

impl NewTodo {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl TryFrom<CreateTodo> for NewTodo {
    type Error = ValidationError;

    fn try_from(input: CreateTodo) -> Result<Self, Self::Error> {
        validate_title(&input.title)?;
        if let Some(description) = &input.description {
            validate_description(description)?;
        }

        let priority = match input.priority.as_deref() {
            Some(p) => parse_priority(p)?,
            None => Priority::default(),
        };

        let due_date = match input.due_date.as_deref() {
            Some(s) if !s.trim().is_empty() => Some(parse_due_date(s)?),
            _ => None,
        };

        Ok(NewTodo {
            title: input.title,
            description: input.description,
            completed: input.completed.unwrap_or(false),
            priority,
            due_date,
            tags: input.tags.unwrap_or_default(),
        })
    }
}

/// A validated set of field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<Option<String>>,
    pub(crate) completed: Option<bool>,
    pub(crate) priority: Option<Priority>,
    pub(crate) due_date: Option<Option<DateTime<Utc>>>,
    pub(crate) tags: Option<Vec<String>>,
}

impl TodoPatch {
    /// A patch that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// True when no field would change (only `updated_at` is refreshed).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.tags.is_none()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(|d| d.as_deref())
    }

    pub fn completion(&self) -> Option<bool> {
        self.completed
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn due_date(&self) -> Option<Option<DateTime<Utc>>> {
        self.due_date
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Apply the changes to an in-memory todo (timestamps are left alone).
    pub fn apply_to(&self, todo: &mut super::Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(tags) = &self.tags {
            todo.tags = tags.clone();
        }
    }
}

impl TryFrom<UpdateTodo> for TodoPatch {
    type Error = ValidationError;

    fn try_from(input: UpdateTodo) -> Result<Self, Self::Error> {
        if let Some(title) = &input.title {
            validate_title(title)?;
        }
        if let Some(Some(description)) = &input.description {
            validate_description(description)?;
        }

        let priority = input.priority.as_deref().map(parse_priority).transpose()?;

        let due_date = match input.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(s)) if s.trim().is_empty() => Some(None),
            Some(Some(s)) => Some(Some(parse_due_date(&s)?)),
        };

        Ok(TodoPatch {
            title: input.title,
            description: input.description,
            completed: input.completed,
            priority,
            due_date,
            tags: input.tags,
        })
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "must not be empty"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::new(
            "title",
            format!("must be at most {} characters", TITLE_MAX_LEN),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(ValidationError::new(
            "description",
            format!("must be at most {} characters", DESCRIPTION_MAX_LEN),
        ));
    }
    Ok(())
}

/// Parse a priority name, reporting failures against the `priority` field.
pub fn parse_priority(value: &str) -> Result<Priority, ValidationError> {
    value
        .parse::<Priority>()
        .map_err(|e| ValidationError::new("priority", e))
}

/// Parse a due date in any of the accepted forms.
///
/// The instant must fall in years 1 through 9999 once converted to UTC, the
/// range that stored RFC 3339 text can represent.
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    let due = parse_due_date_forms(value).ok_or_else(|| {
        ValidationError::new(
            "due_date",
            format!(
                "'{}' is not a valid date; use YYYY-MM-DD or an RFC 3339 timestamp",
                value
            ),
        )
    })?;

    if !(DUE_YEAR_MIN..=DUE_YEAR_MAX).contains(&due.year()) {
        return Err(ValidationError::new(
            "due_date",
            format!(
                "'{}' is out of range; the year must be between {} and {}",
                value, DUE_YEAR_MIN, DUE_YEAR_MAX
            ),
        ));
    }

    Ok(due)
}

fn parse_due_date_forms(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
