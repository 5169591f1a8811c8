//! Wire types of the petcare API.

mod comment;
mod pet;
mod schedule;
mod user;

pub use comment::{Comment, LikeRequest, NewComment};
pub use pet::{Pet, PetDraft, ScheduleEntry};
pub use schedule::{RawScheduleItem, ScheduleItem, SchedulePayload, ScheduleType};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};

use serde::{Deserialize, Deserializer};

/// Identifiers arrive as strings from some endpoints and as numbers from
/// others; keep them as strings everywhere.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

/// Treat a blank form field as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
