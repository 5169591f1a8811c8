//! The single event shape used by calendar views.
//!
//! Schedule items are the authoritative source. Events saved by the older
//! browser-local calendar (`{id, title, date, time, color}`) are read through
//! [`LegacyEvent`] and converted here; nothing else handles that shape.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::date::{DisplayZone, parse_date};
use crate::error::{PetcareError, PetcareResult};
use crate::models::{SchedulePayload, ScheduleItem, ScheduleType};

/// Colors handed out to events that carry no color of their own.
pub const EVENT_COLORS: [&str; 7] = [
    "#EDA35A", "#4CAF50", "#2196F3", "#9C27B0", "#F44336", "#FF9800", "#3F51B5",
];

/// Color for the `position`-th event of a day when it has none.
pub fn default_color(position: usize) -> &'static str {
    EVENT_COLORS[position % EVENT_COLORS.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub display_date: NaiveDate,
    pub category: String,
    /// Pet the event belongs to, if any.
    pub owner: Option<String>,
    pub display_time: Option<NaiveTime>,
    pub color_tag: Option<String>,
}

impl From<&ScheduleItem> for CalendarEvent {
    fn from(item: &ScheduleItem) -> Self {
        CalendarEvent {
            id: item.id.clone(),
            display_date: item.date,
            category: item.kind.to_string(),
            owner: Some(item.pet_id.clone()),
            display_time: None,
            color_tag: None,
        }
    }
}

/// An event from the superseded local calendar store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEvent {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:mm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LegacyEvent {
    pub fn to_calendar_event(&self, zone: DisplayZone) -> PetcareResult<CalendarEvent> {
        let display_date = parse_date(&self.date, zone)?;
        let display_time = match self.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) => Some(
                NaiveTime::parse_from_str(t, "%H:%M")
                    .map_err(|_| PetcareError::Validation(format!("Invalid time '{}'", t)))?,
            ),
        };

        Ok(CalendarEvent {
            id: self.id.clone(),
            display_date,
            category: self.title.clone(),
            owner: None,
            display_time,
            color_tag: self.color.clone(),
        })
    }
}

impl CalendarEvent {
    /// Request body that recreates this event as a schedule item of `pet_id`.
    pub fn to_schedule_payload(&self, pet_id: &str) -> SchedulePayload {
        SchedulePayload {
            pet_id: pet_id.to_string(),
            kind: ScheduleType::from(self.category.as_str()),
            date: crate::date::to_iso(self.display_date),
        }
    }
}
