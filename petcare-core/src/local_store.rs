//! Read access to the old browser-local calendar store.
//!
//! Before the schedule API existed, calendar events were kept as one JSON
//! list under the `calendar_events_v1` key. The file is only read and, after
//! its events have been imported into the server, pruned.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::PetcareConfig;
use crate::date::{DisplayZone, parse_date};
use crate::error::PetcareResult;
use crate::event::LegacyEvent;
use crate::grid::YearMonth;

pub const LEGACY_STORE_KEY: &str = "calendar_events_v1";

pub struct LocalEventStore {
    path: PathBuf,
    zone: DisplayZone,
}

impl LocalEventStore {
    pub fn open(config: &PetcareConfig) -> PetcareResult<Self> {
        let path = config
            .data_path()?
            .join(format!("{}.json", LEGACY_STORE_KEY));
        Ok(Self::at(path, config.zone()?))
    }

    pub fn at(path: PathBuf, zone: DisplayZone) -> Self {
        LocalEventStore { path, zone }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored events. Missing or corrupt data reads as empty.
    pub fn read(&self) -> Vec<LegacyEvent> {
        self.load().unwrap_or_else(|e| {
            log::warn!("Ignoring corrupt event store {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    /// Stored events, failing on unparsable content. A missing file is empty.
    fn load(&self) -> PetcareResult<Vec<LegacyEvent>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn list_by_month(&self, period: YearMonth) -> Vec<LegacyEvent> {
        self.read()
            .into_iter()
            .filter(|e| {
                parse_date(&e.date, self.zone)
                    .map(|d| period.contains(d))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn list_for_date(&self, date: NaiveDate) -> Vec<LegacyEvent> {
        self.read()
            .into_iter()
            .filter(|e| parse_date(&e.date, self.zone).ok() == Some(date))
            .collect()
    }

    /// Keep only the events for which `keep` returns true. A file that
    /// cannot be parsed is left untouched and reported.
    pub fn retain<F>(&self, keep: F) -> PetcareResult<()>
    where
        F: Fn(&LegacyEvent) -> bool,
    {
        if !self.path.exists() {
            return Ok(());
        }
        let remaining: Vec<LegacyEvent> = self.load()?.into_iter().filter(|e| keep(e)).collect();
        self.write(&remaining)
    }

    fn write(&self, events: &[LegacyEvent]) -> PetcareResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, serde_json::to_string(events)?)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
