use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Allowed values of [`Task::status`]
///
/// Statuses travel as plain strings on the wire and in storage; this enum is
/// the closed set they are checked against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr, ToSchema,
)]
pub enum TaskStatus {
    /// Task not started
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Whether `value` names one of the statuses, matching case exactly
    pub fn is_valid(value: &str) -> bool {
        value.parse::<TaskStatus>().is_ok()
    }
}

/// Task entity
///
/// Every field is optional when decoding: missing fields (and explicit
/// `null` strings) take their zero value, so validation happens in the
/// service instead of the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Task {
    /// Database-assigned identifier, `0` until created
    pub id: i64,

    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,

    /// One of `Pending`, `InProgress`, `Completed`
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "Pending")]
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A not-yet-persisted task with zero id and epoch timestamps
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
            ..Self::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
