use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id, assigned from the state's `next_id` counter
    pub id: u64,
    /// Task text (trimmed, never empty)
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Optional due date-time, stored as UTC
    #[serde(
        default,
        serialize_with = "serialize_due",
        deserialize_with = "deserialize_due"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: u64, text: impl Into<String>, due_date: Option<DateTime<Utc>>) -> Self {
        Task {
            id,
            text: text.into(),
            completed: false,
            due_date,
        }
    }
}

/// Which subset of tasks is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Label for the header tab
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Next filter in tab order (wraps)
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Does this filter admit the given task?
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2024-03-05T00:00:00.000Z`
fn serialize_due<S>(due: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match due {
        Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        None => serializer.serialize_none(),
    }
}

/// Accepts `null`, any RFC 3339 timestamp, or a bare `YYYY-MM-DD` (UTC midnight)
fn deserialize_due<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_stored_due(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {}", s))),
    }
}

fn parse_stored_due(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
