//! Create/edit form state shared between the controller and the view.

use chrono::NaiveDate;

use crate::date::{DisplayZone, normalize_date_in, to_iso};
use crate::error::{PetcareError, PetcareResult};
use crate::models::{SchedulePayload, ScheduleItem, ScheduleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Creating {
        date: NaiveDate,
    },
    Editing {
        item: ScheduleItem,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn mode(&self) -> Option<ModalMode> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating { .. } => Some(ModalMode::Create),
            ModalState::Editing { .. } => Some(ModalMode::Edit),
        }
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating { date } => Some(*date),
            ModalState::Editing { item } => Some(item.date),
        }
    }

    pub fn editing(&self) -> Option<&ScheduleItem> {
        match self {
            ModalState::Editing { item } => Some(item),
            _ => None,
        }
    }
}

/// What the user typed into the schedule form: `{type, date, petId}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleForm {
    pub kind: String,
    pub date: String,
    pub pet_id: String,
}

impl ScheduleForm {
    /// Initial form values for an open modal.
    pub fn initial(modal: &ModalState, default_pet: Option<&str>) -> Option<Self> {
        match modal {
            ModalState::Closed => None,
            ModalState::Creating { date } => Some(ScheduleForm {
                kind: String::new(),
                date: to_iso(*date),
                pet_id: default_pet.unwrap_or_default().to_string(),
            }),
            ModalState::Editing { item } => Some(ScheduleForm {
                kind: item.kind.to_string(),
                date: item.iso_date(),
                pet_id: item.pet_id.clone(),
            }),
        }
    }

    /// Check required fields and build the request body.
    pub fn to_payload(&self, zone: DisplayZone) -> PetcareResult<SchedulePayload> {
        let kind = self.kind.trim();
        if kind.is_empty() {
            return Err(PetcareError::Validation("Schedule type is required".into()));
        }
        let pet_id = self.pet_id.trim();
        if pet_id.is_empty() {
            return Err(PetcareError::Validation("Pick a pet for this schedule".into()));
        }
        if self.date.trim().is_empty() {
            return Err(PetcareError::Validation("Date is required".into()));
        }

        Ok(SchedulePayload {
            pet_id: pet_id.to_string(),
            kind: ScheduleType::from(kind),
            date: normalize_date_in(&self.date, zone)?,
        })
    }
}
