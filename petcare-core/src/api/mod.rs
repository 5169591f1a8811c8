//! Access to the petcare server.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::PetcareResult;
use crate::models::{RawScheduleItem, SchedulePayload};

/// Schedule endpoints the calendar controller depends on.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// GET /api/schedules
    async fn list_schedules(&self) -> PetcareResult<Vec<RawScheduleItem>>;

    /// GET /api/schedules/pets/:petId
    async fn list_schedules_for_pet(&self, pet_id: &str) -> PetcareResult<Vec<RawScheduleItem>>;

    /// GET /api/schedules/:id
    async fn get_schedule(&self, id: &str) -> PetcareResult<RawScheduleItem>;

    /// POST /api/schedules
    async fn create_schedule(&self, payload: &SchedulePayload) -> PetcareResult<RawScheduleItem>;

    /// PUT /api/schedules/:id
    async fn update_schedule(
        &self,
        id: &str,
        payload: &SchedulePayload,
    ) -> PetcareResult<RawScheduleItem>;

    /// DELETE /api/schedules/:id
    async fn delete_schedule(&self, id: &str) -> PetcareResult<()>;
}
