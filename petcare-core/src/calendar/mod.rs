//! Month-view calendar controller.
//!
//! Owns the displayed month, the schedule items of the active pets, the
//! date index derived from them and the state of the create/edit form.
//! Remote calls go through [`ScheduleApi`]; local state only changes after
//! the server has confirmed a change.
//!
//! Loads are split in three steps so a caller can keep navigating while a
//! request is in flight: [`CalendarController::begin_load`] hands out a
//! ticket, [`CalendarController::fetch_items`] runs the request without
//! borrowing the controller, and [`CalendarController::complete_load`]
//! applies the reply only if its ticket is still the newest one and was
//! issued for the month on screen.

mod index;
mod modal;

pub use index::DateIndex;
pub use modal::{ModalMode, ModalState, ScheduleForm};

use chrono::NaiveDate;
use futures::future::try_join_all;

use crate::api::ScheduleApi;
use crate::date::DisplayZone;
use crate::error::{PetcareError, PetcareResult};
use crate::event::CalendarEvent;
use crate::grid::{MonthGrid, YearMonth};
use crate::models::{RawScheduleItem, ScheduleItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    Today,
}

/// Identifies one schedule fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    period: YearMonth,
    pets: Vec<String>,
}

impl LoadTicket {
    pub fn period(&self) -> YearMonth {
        self.period
    }

    pub fn pets(&self) -> &[String] {
        &self.pets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The item list was replaced with this many items.
    Applied(usize),
    /// A newer load was issued, or the month changed; nothing was touched.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Declined,
}

pub struct CalendarController {
    zone: DisplayZone,
    displayed: YearMonth,
    active_pets: Vec<String>,
    items: Vec<ScheduleItem>,
    index: DateIndex,
    modal: ModalState,
    modal_error: Option<String>,
    generation: u64,
}

impl CalendarController {
    pub fn new(zone: DisplayZone, displayed: YearMonth) -> Self {
        CalendarController {
            zone,
            displayed,
            active_pets: Vec::new(),
            items: Vec::new(),
            index: DateIndex::default(),
            modal: ModalState::Closed,
            modal_error: None,
            generation: 0,
        }
    }

    /// A controller showing the current month.
    pub fn starting_today(zone: DisplayZone) -> Self {
        Self::new(zone, YearMonth::current(zone))
    }

    /// Select the pets whose schedules are loaded. An empty list loads
    /// every schedule the server returns.
    pub fn set_active_pets(&mut self, pets: Vec<String>) {
        self.active_pets = pets;
    }

    pub fn active_pets(&self) -> &[String] {
        &self.active_pets
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.displayed)
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    /// Items on `date` if it lies in the displayed month.
    pub fn items_on(&self, date: NaiveDate) -> &[ScheduleItem] {
        self.index.get(date)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.items_on(date).iter().map(CalendarEvent::from).collect()
    }

    pub fn find_item(&self, id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Message of the last failed submit or delete while the form was open.
    pub fn modal_error(&self) -> Option<&str> {
        self.modal_error.as_deref()
    }

    // NAVIGATION:

    /// Move the displayed month. Does not fetch.
    pub fn navigate(&mut self, nav: Navigation) -> YearMonth {
        self.displayed = match nav {
            Navigation::Prev => self.displayed.prev(),
            Navigation::Next => self.displayed.next(),
            Navigation::Today => YearMonth::current(self.zone),
        };
        self.reindex();
        self.displayed
    }

    pub fn show(&mut self, period: YearMonth) {
        self.displayed = period;
        self.reindex();
    }

    // LOADING:

    /// Issue a ticket for a new fetch. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        LoadTicket {
            generation: self.generation,
            period: self.displayed,
            pets: self.active_pets.clone(),
        }
    }

    /// Fetch and normalize the schedule items a ticket asks for.
    ///
    /// Items whose date cannot be read are dropped with a warning rather
    /// than failing the whole calendar.
    pub async fn fetch_items<A>(
        api: &A,
        ticket: &LoadTicket,
        zone: DisplayZone,
    ) -> PetcareResult<Vec<ScheduleItem>>
    where
        A: ScheduleApi + ?Sized,
    {
        let raw: Vec<RawScheduleItem> = if ticket.pets.is_empty() {
            api.list_schedules().await?
        } else {
            try_join_all(ticket.pets.iter().map(|pet| api.list_schedules_for_pet(pet)))
                .await?
                .into_iter()
                .flatten()
                .collect()
        };

        Ok(raw
            .into_iter()
            .filter_map(|item| {
                let id = item.id.clone();
                match item.canonicalize(zone) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        log::warn!("Skipping schedule {}: {}", id, e);
                        None
                    }
                }
            })
            .collect())
    }

    /// Apply the result of a fetch.
    ///
    /// A stale ticket is ignored whatever its result. A failed current fetch
    /// leaves the previous items in place and returns the error.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: PetcareResult<Vec<ScheduleItem>>,
    ) -> PetcareResult<LoadOutcome> {
        if ticket.generation != self.generation || ticket.period != self.displayed {
            log::warn!(
                "Discarding schedule reply for {} (request {}, latest {})",
                ticket.period,
                ticket.generation,
                self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let items = result?;
        let count = items.len();
        self.items = items;
        self.reindex();
        log::debug!("Loaded {} schedule items for {}", count, self.displayed);
        Ok(LoadOutcome::Applied(count))
    }

    /// Fetch the active pets' schedules and replace the item list.
    pub async fn load_items_for_active_pets<A>(&mut self, api: &A) -> PetcareResult<LoadOutcome>
    where
        A: ScheduleApi + ?Sized,
    {
        let ticket = self.begin_load();
        let result = Self::fetch_items(api, &ticket, self.zone).await;
        self.complete_load(ticket, result)
    }

    // FORM:

    pub fn open_create(&mut self, date: NaiveDate) {
        self.modal = ModalState::Creating { date };
        self.modal_error = None;
    }

    pub fn open_edit(&mut self, item: &ScheduleItem) {
        self.modal = ModalState::Editing { item: item.clone() };
        self.modal_error = None;
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.modal_error = None;
    }

    /// Save the open form. Creates or updates depending on the modal mode.
    ///
    /// On failure the form stays open with [`Self::modal_error`] set and the
    /// item list is unchanged.
    pub async fn submit<A>(&mut self, api: &A, form: &ScheduleForm) -> PetcareResult<ScheduleItem>
    where
        A: ScheduleApi + ?Sized,
    {
        let result = self.try_submit(api, form).await;
        match &result {
            Ok(_) => self.close_modal(),
            Err(PetcareError::InvalidState(_)) => {}
            Err(e) => self.modal_error = Some(e.to_string()),
        }
        result
    }

    async fn try_submit<A>(&mut self, api: &A, form: &ScheduleForm) -> PetcareResult<ScheduleItem>
    where
        A: ScheduleApi + ?Sized,
    {
        let editing = match &self.modal {
            ModalState::Closed => {
                return Err(PetcareError::InvalidState(
                    "No schedule form is open".into(),
                ));
            }
            ModalState::Creating { .. } => None,
            ModalState::Editing { item } => Some(item.id.clone()),
        };
        let payload = form.to_payload(self.zone)?;

        match editing {
            None => {
                let created = api.create_schedule(&payload).await?.canonicalize(self.zone)?;
                self.items.push(created.clone());
                self.reindex();
                Ok(created)
            }
            Some(id) => {
                let updated = api
                    .update_schedule(&id, &payload)
                    .await?
                    .canonicalize(self.zone)?;
                match self.items.iter_mut().find(|i| i.id == id) {
                    Some(slot) => *slot = updated.clone(),
                    None => self.items.push(updated.clone()),
                }
                self.reindex();
                Ok(updated)
            }
        }
    }

    /// Delete `item` after `confirm` agrees to it.
    pub async fn remove<A, F>(
        &mut self,
        api: &A,
        item: &ScheduleItem,
        confirm: F,
    ) -> PetcareResult<RemoveOutcome>
    where
        A: ScheduleApi + ?Sized,
        F: FnOnce(&ScheduleItem) -> bool,
    {
        if !confirm(item) {
            return Ok(RemoveOutcome::Declined);
        }

        if let Err(e) = api.delete_schedule(&item.id).await {
            if self.modal.is_open() {
                self.modal_error = Some(e.to_string());
            }
            return Err(e);
        }

        self.items.retain(|i| i.id != item.id);
        self.reindex();
        if self.modal.editing().is_some_and(|editing| editing.id == item.id) {
            self.close_modal();
        }
        Ok(RemoveOutcome::Removed)
    }

    fn reindex(&mut self) {
        self.index = DateIndex::build(&self.items, self.displayed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SchedulePayload, ScheduleType};
    use async_trait::async_trait;
    use futures::stream::{FuturesUnordered, StreamExt};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::time::Duration;

    /// In-memory schedule server.
    #[derive(Default)]
    struct FakeApi {
        store: Mutex<Vec<RawScheduleItem>>,
        next_id: AtomicU64,
        fail: AtomicBool,
        /// Per-pet replies that override the store once, after a delay.
        scripted: Mutex<HashMap<String, (Duration, Vec<RawScheduleItem>)>>,
        deleted: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_items(items: Vec<RawScheduleItem>) -> Self {
            FakeApi {
                store: Mutex::new(items),
                ..Default::default()
            }
        }

        fn script(&self, pet: &str, delay_ms: u64, items: Vec<RawScheduleItem>) {
            self.scripted
                .lock()
                .unwrap()
                .insert(pet.to_string(), (Duration::from_millis(delay_ms), items));
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn check(&self) -> PetcareResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(PetcareError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }

        async fn list(&self, pet: Option<&str>) -> PetcareResult<Vec<RawScheduleItem>> {
            self.check()?;
            let scripted = pet.and_then(|p| self.scripted.lock().unwrap().remove(p));
            if let Some((delay, items)) = scripted {
                tokio::time::sleep(delay).await;
                return Ok(items);
            }
            let store = self.store.lock().unwrap();
            Ok(store
                .iter()
                .filter(|i| pet.is_none_or(|p| i.pet_id == p))
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl ScheduleApi for FakeApi {
        async fn list_schedules(&self) -> PetcareResult<Vec<RawScheduleItem>> {
            self.list(None).await
        }

        async fn list_schedules_for_pet(&self, pet_id: &str) -> PetcareResult<Vec<RawScheduleItem>> {
            self.list(Some(pet_id)).await
        }

        async fn get_schedule(&self, id: &str) -> PetcareResult<RawScheduleItem> {
            self.check()?;
            self.store
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or(PetcareError::Api {
                    status: 404,
                    message: "Schedule not found".into(),
                })
        }

        async fn create_schedule(&self, payload: &SchedulePayload) -> PetcareResult<RawScheduleItem> {
            self.check()?;
            let id = format!("s{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 100);
            let item = RawScheduleItem {
                id,
                pet_id: payload.pet_id.clone(),
                kind: payload.kind.clone(),
                date: format!("{}T00:00:00", payload.date),
            };
            self.store.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn update_schedule(
            &self,
            id: &str,
            payload: &SchedulePayload,
        ) -> PetcareResult<RawScheduleItem> {
            self.check()?;
            let mut store = self.store.lock().unwrap();
            let slot = store.iter_mut().find(|i| i.id == id).ok_or(PetcareError::Api {
                status: 404,
                message: "Schedule not found".into(),
            })?;
            slot.pet_id = payload.pet_id.clone();
            slot.kind = payload.kind.clone();
            slot.date = payload.date.clone();
            Ok(slot.clone())
        }

        async fn delete_schedule(&self, id: &str) -> PetcareResult<()> {
            self.check()?;
            self.store.lock().unwrap().retain(|i| i.id != id);
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    fn raw(id: &str, pet: &str, kind: &str, date: &str) -> RawScheduleItem {
        RawScheduleItem {
            id: id.into(),
            pet_id: pet.into(),
            kind: ScheduleType::from(kind),
            date: date.into(),
        }
    }

    fn utc() -> DisplayZone {
        DisplayZone::Named(chrono_tz::UTC)
    }

    fn june_2024() -> CalendarController {
        CalendarController::new(utc(), YearMonth::new(2024, 5).unwrap())
    }

    fn day(d: &str) -> NaiveDate {
        NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()
    }

    fn sample_items() -> Vec<RawScheduleItem> {
        vec![
            raw("s1", "p1", "vet", "2024-06-03T00:00:00.000Z"),
            raw("s2", "p1", "walk", "2024-06-03"),
            raw("s3", "p2", "meds", "2024-06-10T08:30:00"),
            raw("s4", "p1", "feed", "2024-07-01"),
        ]
    }

    #[tokio::test]
    async fn load_normalizes_every_date() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();

        let outcome = cal.load_items_for_active_pets(&api).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied(4));
        for item in cal.items() {
            assert_eq!(crate::date::normalize_date(&item.iso_date()).unwrap(), item.iso_date());
            assert_eq!(item.iso_date().len(), 10);
        }
        assert_eq!(cal.items_on(day("2024-06-03")).len(), 2);
        assert_eq!(cal.items_on(day("2024-06-10")).len(), 1);
    }

    #[tokio::test]
    async fn load_filters_active_pets() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.set_active_pets(vec!["p2".into()]);

        cal.load_items_for_active_pets(&api).await.unwrap();

        let ids: Vec<_> = cal.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["s3"]);
    }

    #[tokio::test]
    async fn load_skips_unreadable_dates() {
        let mut items = sample_items();
        items.push(raw("bad", "p1", "walk", "whenever"));
        let api = FakeApi::with_items(items);
        let mut cal = june_2024();

        assert_eq!(
            cal.load_items_for_active_pets(&api).await.unwrap(),
            LoadOutcome::Applied(4)
        );
        assert!(cal.find_item("bad").is_none());
    }

    #[tokio::test]
    async fn items_outside_month_stay_in_state_but_not_in_index() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();

        assert!(cal.find_item("s4").is_some());
        assert!(cal.items_on(day("2024-07-01")).is_empty());

        cal.navigate(Navigation::Next);
        assert_eq!(cal.items_on(day("2024-07-01")).len(), 1);
        assert!(cal.items_on(day("2024-06-03")).is_empty());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();
        let before = cal.items().to_vec();

        api.set_failing(true);
        let result = cal.load_items_for_active_pets(&api).await;

        assert!(matches!(result, Err(PetcareError::Network(_))));
        assert_eq!(cal.items(), before.as_slice());
        assert_eq!(cal.index().item_count(), 3);
    }

    #[tokio::test]
    async fn slow_reply_from_earlier_navigation_is_discarded() {
        let api = FakeApi::default();
        let mut cal = june_2024();

        api.script("slow", 40, vec![raw("old", "slow", "walk", "2024-07-02")]);
        api.script("fast", 0, vec![raw("new", "fast", "vet", "2024-08-05")]);

        cal.set_active_pets(vec!["slow".into()]);
        cal.navigate(Navigation::Next);
        let first = cal.begin_load();

        cal.set_active_pets(vec!["fast".into()]);
        cal.navigate(Navigation::Next);
        let second = cal.begin_load();

        async fn run(
            api: &FakeApi,
            ticket: LoadTicket,
            zone: DisplayZone,
        ) -> (LoadTicket, PetcareResult<Vec<ScheduleItem>>) {
            let result = CalendarController::fetch_items(api, &ticket, zone).await;
            (ticket, result)
        }

        let mut in_flight = FuturesUnordered::new();
        in_flight.push(run(&api, first, utc()));
        in_flight.push(run(&api, second, utc()));

        let mut outcomes = Vec::new();
        while let Some((ticket, result)) = in_flight.next().await {
            outcomes.push(cal.complete_load(ticket, result).unwrap());
        }

        assert_eq!(outcomes, [LoadOutcome::Applied(1), LoadOutcome::Stale]);
        assert_eq!(cal.displayed(), YearMonth::new(2024, 7).unwrap());
        let ids: Vec<_> = cal.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["new"]);
    }

    #[tokio::test]
    async fn reply_for_a_month_no_longer_shown_is_discarded() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();

        let ticket = cal.begin_load();
        let result = CalendarController::fetch_items(&api, &ticket, utc()).await;
        cal.navigate(Navigation::Prev);

        assert_eq!(cal.complete_load(ticket, result).unwrap(), LoadOutcome::Stale);
        assert!(cal.items().is_empty());
    }

    #[tokio::test]
    async fn stale_failure_is_not_reported() {
        let mut cal = june_2024();
        let ticket = cal.begin_load();
        cal.begin_load();

        let outcome = cal
            .complete_load(ticket, Err(PetcareError::Network("reset".into())))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
    }

    #[tokio::test]
    async fn create_appends_and_indexes() {
        let api = FakeApi::default();
        let mut cal = june_2024();
        cal.open_create(day("2024-06-01"));

        let form = ScheduleForm {
            kind: "walk".into(),
            date: "2024-06-01".into(),
            pet_id: "p1".into(),
        };
        let created = cal.submit(&api, &form).await.unwrap();

        assert_eq!(cal.items().len(), 1);
        let item = &cal.items()[0];
        assert_eq!(item, &created);
        assert_eq!(item.kind, ScheduleType::Walk);
        assert_eq!(item.pet_id, "p1");
        assert_eq!(item.iso_date(), "2024-06-01");
        assert!(!item.id.is_empty());

        let bucket = cal.index().get_iso("2024-06-01");
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].id, item.id);
        assert!(!cal.modal().is_open());
    }

    #[tokio::test]
    async fn edit_replaces_in_place() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();

        let target = cal.find_item("s2").unwrap().clone();
        cal.open_edit(&target);
        let mut form = ScheduleForm::initial(cal.modal(), None).unwrap();
        form.date = "2024-06-20".into();

        cal.submit(&api, &form).await.unwrap();

        let ids: Vec<_> = cal.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "s3", "s4"]);
        assert_eq!(cal.find_item("s2").unwrap().iso_date(), "2024-06-20");
        assert_eq!(cal.items_on(day("2024-06-03")).len(), 1);
        assert_eq!(cal.items_on(day("2024-06-20")).len(), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_modal_open() {
        let api = FakeApi::default();
        let mut cal = june_2024();
        cal.open_create(day("2024-06-01"));
        api.set_failing(true);

        let form = ScheduleForm {
            kind: "vet".into(),
            date: "2024-06-01".into(),
            pet_id: "p1".into(),
        };
        assert!(cal.submit(&api, &form).await.is_err());

        assert!(cal.items().is_empty());
        assert_eq!(cal.modal().mode(), Some(ModalMode::Create));
        assert!(cal.modal_error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_dispatch() {
        let api = FakeApi::default();
        let mut cal = june_2024();
        cal.open_create(day("2024-06-01"));

        let form = ScheduleForm {
            kind: "walk".into(),
            date: "2024-06-01".into(),
            pet_id: String::new(),
        };
        let err = cal.submit(&api, &form).await.unwrap_err();

        assert!(err.is_local());
        assert!(api.store.lock().unwrap().is_empty());
        assert!(cal.modal().is_open());
    }

    #[tokio::test]
    async fn submit_without_open_form() {
        let api = FakeApi::default();
        let mut cal = june_2024();

        let err = cal.submit(&api, &ScheduleForm::default()).await.unwrap_err();
        assert!(matches!(err, PetcareError::InvalidState(_)));
        assert!(cal.modal_error().is_none());
    }

    #[tokio::test]
    async fn declined_remove_changes_nothing() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();
        let before = cal.items().to_vec();
        let target = cal.find_item("s1").unwrap().clone();

        let outcome = cal.remove(&api, &target, |_| false).await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Declined);
        assert_eq!(cal.items(), before.as_slice());
        assert!(api.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmed_remove_deletes_only_that_item() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();
        let target = cal.find_item("s1").unwrap().clone();
        cal.open_edit(&target);

        let outcome = cal.remove(&api, &target, |item| item.id == "s1").await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Removed);
        let ids: Vec<_> = cal.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["s2", "s3", "s4"]);
        assert_eq!(api.deleted.lock().unwrap().as_slice(), ["s1"]);
        assert!(!cal.modal().is_open());
    }

    #[tokio::test]
    async fn failed_remove_keeps_item() {
        let api = FakeApi::with_items(sample_items());
        let mut cal = june_2024();
        cal.load_items_for_active_pets(&api).await.unwrap();
        let target = cal.find_item("s3").unwrap().clone();
        api.set_failing(true);

        assert!(cal.remove(&api, &target, |_| true).await.is_err());
        assert!(cal.find_item("s3").is_some());
    }

    #[test]
    fn today_returns_to_current_month() {
        let mut cal = june_2024();
        cal.navigate(Navigation::Prev);
        assert_eq!(cal.displayed(), YearMonth::new(2024, 4).unwrap());
        assert_eq!(cal.navigate(Navigation::Today), YearMonth::current(utc()));
    }

    #[test]
    fn modal_transitions() {
        let mut cal = june_2024();
        cal.open_create(day("2024-06-12"));
        assert_eq!(cal.modal().target_date(), Some(day("2024-06-12")));
        assert!(cal.modal().editing().is_none());

        cal.close_modal();
        assert!(!cal.modal().is_open());
    }
}
