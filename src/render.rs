//! TUI rendering traits for petcare types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to petcare-core types using owo_colors.

use std::collections::HashMap;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use petcare_core::calendar::CalendarController;
use petcare_core::date::DisplayZone;
use petcare_core::event::{CalendarEvent, default_color};
use petcare_core::grid::WEEKDAY_LABELS;
use petcare_core::models::{Comment, Pet, ScheduleItem, ScheduleType, User};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the schedule type
fn colorize_kind(kind: &ScheduleType, text: &str) -> String {
    match kind {
        ScheduleType::Vet => text.red().to_string(),
        ScheduleType::Walk => text.green().to_string(),
        ScheduleType::Meds => text.magenta().to_string(),
        ScheduleType::Feed => text.yellow().to_string(),
        ScheduleType::Other(_) => text.cyan().to_string(),
    }
}

/// Parse `#RRGGBB`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn swatch(color: &str) -> String {
    match hex_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!("{} {}", self.name.bold(), format!("<{}>", self.email).dimmed())
    }
}

impl Render for Pet {
    fn render(&self) -> String {
        let details: Vec<&str> = [self.species.as_deref(), self.breed.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if details.is_empty() {
            format!("{} {}", self.name.bold(), self.id.dimmed())
        } else {
            format!(
                "{} ({}) {}",
                self.name.bold(),
                details.join(", "),
                self.id.dimmed()
            )
        }
    }
}

/// Full profile of a pet with its next vet visit and walk.
pub struct PetCard<'a> {
    pub pet: &'a Pet,
    pub today: NaiveDate,
    pub zone: DisplayZone,
}

impl Render for PetCard<'_> {
    fn render(&self) -> String {
        let pet = self.pet;
        let mut lines = vec![format!("🐾 {}", pet.render())];

        let field = |label: &str, value: Option<&str>| {
            format!(
                "   {} {}",
                format!("{:<18}", label).dimmed(),
                value.unwrap_or("-")
            )
        };
        lines.push(field("Species", pet.species.as_deref()));
        lines.push(field("Breed", pet.breed.as_deref()));
        lines.push(field("Date of birth", pet.dob_date().as_deref()));
        lines.push(field("Microchip", pet.microchip_id.as_deref()));
        lines.push(field("Emergency contact", pet.emergency_contact.as_deref()));

        for kind in [ScheduleType::Vet, ScheduleType::Walk] {
            let next = pet.next_scheduled(&kind, self.today, self.zone);
            let value = match next {
                Some(date) => colorize_kind(&kind, &date.to_string()),
                None => "Not scheduled".dimmed().to_string(),
            };
            lines.push(format!(
                "   {} {}",
                format!("{:<18}", format!("Next {}", kind)).dimmed(),
                value
            ));
        }

        if !pet.photos.is_empty() {
            lines.push(format!("   {}", "Photos".dimmed()));
            for photo in &pet.photos {
                lines.push(format!("     {}", photo));
            }
        }

        lines.join("\n")
    }
}

impl Render for ScheduleItem {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            self.iso_date(),
            colorize_kind(&self.kind, &format!("{:<6}", self.kind)),
            self.pet_id.dimmed(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let color = self.color_tag.as_deref().unwrap_or(default_color(0));
        let time = self
            .display_time
            .map(|t| format!("{} ", t.format("%H:%M")))
            .unwrap_or_default();
        format!("{} {}{} {}", swatch(color), time, self.category, self.id.dimmed())
    }
}

impl Render for Comment {
    fn render(&self) -> String {
        format!(
            "{} {}  {}",
            format!("♥ {:>3}", self.likes_count).red(),
            self.comment_text,
            format!("{} [{}]", self.user_id, self.id).dimmed()
        )
    }
}

/// Month grid plus the list of scheduled items below it.
pub struct MonthView<'a> {
    pub calendar: &'a CalendarController,
    pub today: NaiveDate,
    /// Pet id -> name, for labelling items.
    pub pet_names: &'a HashMap<String, String>,
}

impl MonthView<'_> {
    fn render_cell(&self, date: NaiveDate, day: u32, in_month: bool) -> String {
        let has_items = !self.calendar.items_on(date).is_empty();
        let marker = if has_items { "•" } else { " " };
        let text = format!("{:>3}{}", day, marker);

        if !in_month {
            text.dimmed().to_string()
        } else if date == self.today {
            text.reversed().to_string()
        } else if has_items {
            text.yellow().bold().to_string()
        } else {
            text
        }
    }

    fn pet_label<'b>(&'b self, pet_id: &'b str) -> &'b str {
        self.pet_names.get(pet_id).map(String::as_str).unwrap_or(pet_id)
    }
}

impl Render for MonthView<'_> {
    fn render(&self) -> String {
        let grid = self.calendar.grid();
        let mut lines = vec![format!("📅 {}", grid.period().bold())];

        let header: String = WEEKDAY_LABELS.iter().map(|l| format!("{:>4}", l)).collect();
        lines.push(header.dimmed().to_string());

        for week in grid.weeks() {
            let row: String = week
                .iter()
                .map(|cell| self.render_cell(cell.date, cell.day, cell.is_in_current_month))
                .collect();
            lines.push(row);
        }

        let days: Vec<_> = grid
            .cells()
            .iter()
            .filter(|cell| cell.is_in_current_month)
            .filter(|cell| !self.calendar.items_on(cell.date).is_empty())
            .collect();

        lines.push(String::new());
        if days.is_empty() {
            lines.push("   Nothing scheduled".dimmed().to_string());
        }

        for cell in days {
            let label = cell.date.format("%a %d").to_string();
            let label = if cell.date == self.today {
                label.reversed().to_string()
            } else {
                label.bold().to_string()
            };
            lines.push(format!("   {}", label));

            for (pos, item) in self.calendar.items_on(cell.date).iter().enumerate() {
                let event = CalendarEvent::from(item);
                let color = event.color_tag.as_deref().unwrap_or(default_color(pos));
                lines.push(format!(
                    "     {} {} {} {}",
                    swatch(color),
                    colorize_kind(&item.kind, &format!("{:<6}", item.kind)),
                    self.pet_label(&item.pet_id),
                    format!("[{}]", item.id).dimmed()
                ));
            }
        }

        lines.join("\n")
    }
}
