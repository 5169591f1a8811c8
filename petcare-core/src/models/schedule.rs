//! Care schedule items.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{DisplayZone, parse_date, to_iso};
use crate::error::PetcareResult;
use crate::models::de_id;

/// Kind of care task. Free-form on the wire; the usual tags get variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScheduleType {
    Vet,
    Walk,
    Meds,
    Feed,
    Other(String),
}

impl ScheduleType {
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleType::Vet => "vet",
            ScheduleType::Walk => "walk",
            ScheduleType::Meds => "meds",
            ScheduleType::Feed => "feed",
            ScheduleType::Other(tag) => tag,
        }
    }
}

impl From<&str> for ScheduleType {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_lowercase().as_str() {
            "vet" => ScheduleType::Vet,
            "walk" => ScheduleType::Walk,
            "meds" => ScheduleType::Meds,
            "feed" => ScheduleType::Feed,
            _ => ScheduleType::Other(tag.to_string()),
        }
    }
}

impl From<String> for ScheduleType {
    fn from(tag: String) -> Self {
        ScheduleType::from(tag.as_str())
    }
}

impl From<ScheduleType> for String {
    fn from(kind: ScheduleType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule item as the server sends it, date not yet normalized.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleItem {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_id")]
    pub pet_id: String,
    #[serde(rename = "type")]
    pub kind: ScheduleType,
    pub date: String,
}

impl RawScheduleItem {
    pub fn canonicalize(self, zone: DisplayZone) -> PetcareResult<ScheduleItem> {
        let date = parse_date(&self.date, zone)?;
        Ok(ScheduleItem {
            id: self.id,
            pet_id: self.pet_id,
            kind: self.kind,
            date,
        })
    }
}

/// A dated care task belonging to one pet, with a canonical date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub pet_id: String,
    #[serde(rename = "type")]
    pub kind: ScheduleType,
    pub date: NaiveDate,
}

impl ScheduleItem {
    pub fn iso_date(&self) -> String {
        to_iso(self.date)
    }
}

/// Body of `POST /api/schedules` and `PUT /api/schedules/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub pet_id: String,
    #[serde(rename = "type")]
    pub kind: ScheduleType,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_from_mongo_shape() {
        let raw: RawScheduleItem = serde_json::from_str(
            r#"{"_id": "s1", "petId": "p1", "type": "Vet", "date": "2024-06-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(raw.kind, ScheduleType::Vet);

        let item = raw
            .canonicalize(DisplayZone::Named(chrono_tz::UTC))
            .unwrap();
        assert_eq!(item.iso_date(), "2024-06-01");
        assert_eq!(item.pet_id, "p1");
    }

    #[test]
    fn free_form_type_survives() {
        let kind = ScheduleType::from("Grooming");
        assert_eq!(kind, ScheduleType::Other("Grooming".into()));
        assert_eq!(String::from(kind), "Grooming");
    }

    #[test]
    fn payload_uses_wire_names() {
        let payload = SchedulePayload {
            pet_id: "p1".into(),
            kind: ScheduleType::Walk,
            date: "2024-06-01".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"petId": "p1", "type": "walk", "date": "2024-06-01"})
        );
    }
}
