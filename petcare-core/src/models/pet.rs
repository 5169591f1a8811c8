//! Pet profiles.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{DisplayZone, normalize_date, normalize_date_in, parse_date};
use crate::error::{PetcareError, PetcareResult};
use crate::models::schedule::ScheduleType;
use crate::models::{de_id, non_blank};

/// Schedule entry embedded in a pet document (early API shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "type")]
    pub kind: ScheduleType,
    pub date: String,
}

/// Parses `TYPE:DATE`, e.g. `vet:2024-06-10`.
impl FromStr for ScheduleEntry {
    type Err = PetcareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || PetcareError::Validation(format!("Invalid schedule entry '{}'. Expected TYPE:DATE", s));
        let (kind, date) = s.split_once(':').ok_or_else(invalid)?;
        if kind.trim().is_empty() || date.trim().is_empty() {
            return Err(invalid());
        }
        Ok(ScheduleEntry {
            kind: ScheduleType::from(kind),
            date: normalize_date(date)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_id")]
    pub owner_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microchip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
}

impl Pet {
    /// Date part of `dob`, whatever shape the server stored it in.
    pub fn dob_date(&self) -> Option<String> {
        let dob = self.dob.as_deref()?;
        Some(dob.split('T').next().unwrap_or(dob).to_string())
    }

    /// Earliest embedded schedule date of `kind` on or after `today`.
    pub fn next_scheduled(
        &self,
        kind: &ScheduleType,
        today: NaiveDate,
        zone: DisplayZone,
    ) -> Option<NaiveDate> {
        self.schedule
            .iter()
            .flatten()
            .filter(|entry| &entry.kind == kind)
            .filter_map(|entry| parse_date(&entry.date, zone).ok())
            .filter(|date| *date >= today)
            .min()
    }
}

/// Form data for creating or editing a pet. Blank fields are left out of
/// the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microchip_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleEntry>,
}

impl PetDraft {
    /// Start an edit form from the pet's current values.
    pub fn from_pet(pet: &Pet) -> Self {
        PetDraft {
            owner_id: non_blank(Some(pet.owner_id.clone())),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            dob: pet.dob_date(),
            microchip_id: pet.microchip_id.clone(),
            emergency_contact: pet.emergency_contact.clone(),
            photos: pet.photos.clone(),
            schedule: pet.schedule.clone().unwrap_or_default(),
        }
    }

    /// Trim fields, drop blank ones and canonicalize `dob`, reading
    /// timestamps in `zone`.
    pub fn validated(self, zone: DisplayZone) -> PetcareResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(PetcareError::Validation("Pet name is required".into()));
        }

        let dob = match non_blank(self.dob) {
            Some(dob) => Some(normalize_date_in(&dob, zone)?),
            None => None,
        };

        let schedule = self
            .schedule
            .into_iter()
            .filter(|entry| !entry.kind.as_str().is_empty() && !entry.date.trim().is_empty())
            .collect();

        Ok(PetDraft {
            owner_id: non_blank(self.owner_id),
            name,
            species: non_blank(self.species),
            breed: non_blank(self.breed),
            dob,
            microchip_id: non_blank(self.microchip_id),
            emergency_contact: non_blank(self.emergency_contact),
            photos: self.photos.into_iter().filter(|p| !p.trim().is_empty()).collect(),
            schedule,
        })
    }
}
