use std::collections::HashMap;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use petcare_core::PetcareResult;
use petcare_core::api::{ApiClient, ScheduleApi};
use petcare_core::calendar::{CalendarController, Navigation, RemoveOutcome, ScheduleForm};
use petcare_core::date::parse_date;
use petcare_core::grid::YearMonth;
use petcare_core::local_store::LocalEventStore;
use petcare_core::models::{Pet, ScheduleItem};

use super::Context;
use crate::render::{MonthView, Render};
use crate::utils::tui;

const KIND_CHOICES: [&str; 5] = ["vet", "walk", "meds", "feed", "other"];

/// Optional values for the schedule form given on the command line.
#[derive(Debug, Default)]
pub struct FormArgs {
    pub date: Option<String>,
    pub kind: Option<String>,
    pub pet: Option<String>,
}

impl FormArgs {
    fn is_empty(&self) -> bool {
        self.date.is_none() && self.kind.is_none() && self.pet.is_none()
    }

    fn apply(self, form: &mut ScheduleForm) {
        if let Some(date) = self.date {
            form.date = date;
        }
        if let Some(kind) = self.kind {
            form.kind = kind;
        }
        if let Some(pet) = self.pet {
            form.pet_id = pet;
        }
    }
}

/// `--pet` values, falling back to the configured default pet.
fn active_pets(ctx: &Context, pets: Vec<String>) -> Vec<String> {
    if pets.is_empty() {
        ctx.config.default_pet.clone().into_iter().collect()
    } else {
        pets
    }
}

fn pet_names(result: PetcareResult<Vec<Pet>>) -> HashMap<String, String> {
    match result {
        Ok(pets) => pets.into_iter().map(|p| (p.id, p.name)).collect(),
        Err(e) => {
            log::warn!("Could not fetch pet names: {}", e);
            HashMap::new()
        }
    }
}

/// Load the controller's month together with pet names for labels.
async fn load(cal: &mut CalendarController, client: &ApiClient) -> Result<HashMap<String, String>> {
    let spinner = tui::create_spinner(format!("📅 {}", cal.displayed()));
    let ticket = cal.begin_load();
    let (items, pets) = tokio::join!(
        CalendarController::fetch_items(client, &ticket, cal.zone()),
        client.list_pets()
    );
    spinner.finish_and_clear();

    cal.complete_load(ticket, items)
        .context("Failed to load schedules")?;
    Ok(pet_names(pets))
}

pub async fn show(
    ctx: &Context,
    pets: Vec<String>,
    month: Option<YearMonth>,
    prev: u32,
    next: u32,
) -> Result<()> {
    let client = ctx.client()?;
    let mut cal = match month {
        Some(month) => CalendarController::new(ctx.zone, month),
        None => CalendarController::starting_today(ctx.zone),
    };
    cal.set_active_pets(active_pets(ctx, pets));

    for _ in 0..prev {
        cal.navigate(Navigation::Prev);
    }
    for _ in 0..next {
        cal.navigate(Navigation::Next);
    }

    let names = load(&mut cal, &client).await?;

    let view = MonthView {
        calendar: &cal,
        today: ctx.zone.today(),
        pet_names: &names,
    };
    println!("{}", view.render());

    let legacy = LocalEventStore::open(&ctx.config)?.list_by_month(cal.displayed());
    if !legacy.is_empty() {
        println!(
            "\n{}",
            format!(
                "   {} more in the old local calendar. Import them with `petcare import-legacy --pet <id>`",
                legacy.len()
            )
            .dimmed()
        );
    }

    Ok(())
}

pub async fn day(ctx: &Context, date: &str, pets: Vec<String>) -> Result<()> {
    let date = parse_date(date, ctx.zone)?;
    let client = ctx.client()?;

    let mut cal = CalendarController::new(ctx.zone, YearMonth::of(date));
    cal.set_active_pets(active_pets(ctx, pets));
    let names = load(&mut cal, &client).await?;

    println!("📅 {}", date.format("%A, %B %-d %Y").bold());

    let items = cal.items_on(date);
    let legacy = LocalEventStore::open(&ctx.config)?.list_for_date(date);

    if items.is_empty() && legacy.is_empty() {
        println!("   {}", "Nothing scheduled".dimmed());
        return Ok(());
    }

    for item in items {
        let name = names.get(&item.pet_id).map(String::as_str).unwrap_or("");
        println!("   {} {}", item.render(), name);
    }

    for event in &legacy {
        match event.to_calendar_event(ctx.zone) {
            Ok(event) => println!("   {} {}", event.render(), "(local)".dimmed()),
            Err(e) => log::warn!("Skipping local event {}: {}", event.id, e),
        }
    }

    Ok(())
}

pub async fn add(ctx: &Context, args: FormArgs) -> Result<()> {
    let client = ctx.client()?;
    let interactive = args.kind.is_none() || args.date.is_none();

    let date = match &args.date {
        Some(date) => parse_date(date, ctx.zone)?,
        None => prompt_date(ctx, None)?,
    };

    let mut cal = CalendarController::new(ctx.zone, YearMonth::of(date));
    cal.open_create(date);
    let mut form = ScheduleForm::initial(cal.modal(), ctx.config.default_pet.as_deref())
        .context("Schedule form did not open")?;
    args.apply(&mut form);

    if form.kind.trim().is_empty() {
        form.kind = prompt_kind(None)?;
    }
    if form.pet_id.trim().is_empty() {
        form.pet_id = prompt_pet(ctx, &client, None).await?;
    }

    let item = submit_until_saved(ctx, &mut cal, &client, form, interactive).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Scheduled: {} on {}", item.kind, item.iso_date()).green());
    Ok(())
}

pub async fn edit(ctx: &Context, id: &str, args: FormArgs) -> Result<()> {
    let client = ctx.client()?;
    let item = fetch_item(ctx, &client, id).await?;
    let interactive = args.is_empty();

    let mut cal = CalendarController::new(ctx.zone, YearMonth::of(item.date));
    cal.open_edit(&item);
    let mut form = ScheduleForm::initial(cal.modal(), None)
        .context("Schedule form did not open")?;

    if interactive {
        prompt_form(ctx, &client, &mut form).await?;
    } else {
        args.apply(&mut form);
    }

    let item = submit_until_saved(ctx, &mut cal, &client, form, interactive).await?;
    println!("{}", format!("  Updated: {}", item.render()).green());
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let client = ctx.client()?;
    let item = fetch_item(ctx, &client, id).await?;

    let mut cal = CalendarController::new(ctx.zone, YearMonth::of(item.date));
    let mut prompt_error = None;

    let outcome = cal
        .remove(&client, &item, |item| {
            if yes {
                return true;
            }
            let question = format!("Delete {} on {}?", item.kind, item.iso_date());
            tui::confirm(question).unwrap_or_else(|e| {
                prompt_error = Some(e);
                false
            })
        })
        .await?;

    if let Some(e) = prompt_error {
        return Err(e);
    }

    match outcome {
        RemoveOutcome::Removed => {
            println!("{}", format!("  Deleted: {} on {}", item.kind, item.iso_date()).red())
        }
        RemoveOutcome::Declined => println!("{}", "Nothing deleted".dimmed()),
    }
    Ok(())
}

async fn fetch_item(ctx: &Context, client: &ApiClient, id: &str) -> Result<ScheduleItem> {
    let raw = client.get_schedule(id).await?;
    Ok(raw.canonicalize(ctx.zone)?)
}

/// Submit the form, letting the user correct it after a failure when
/// running interactively.
async fn submit_until_saved(
    ctx: &Context,
    cal: &mut CalendarController,
    client: &ApiClient,
    mut form: ScheduleForm,
    interactive: bool,
) -> Result<ScheduleItem> {
    loop {
        let spinner = tui::create_spinner("Saving".to_string());
        let result = cal.submit(client, &form).await;
        spinner.finish_and_clear();

        match result {
            Ok(item) => return Ok(item),
            Err(e) if interactive && cal.modal().is_open() => {
                let message = cal.modal_error().map(str::to_string).unwrap_or(e.to_string());
                eprintln!("  {}", message.red());
                if !tui::confirm("Edit and try again?".to_string())? {
                    return Err(e.into());
                }
                prompt_form(ctx, client, &mut form).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn prompt_form(ctx: &Context, client: &ApiClient, form: &mut ScheduleForm) -> Result<()> {
    form.kind = prompt_kind(Some(&form.kind))?;
    form.date = prompt_date(ctx, Some(&form.date))?.to_string();
    form.pet_id = prompt_pet(ctx, client, Some(&form.pet_id)).await?;
    Ok(())
}

fn prompt_kind(current: Option<&str>) -> Result<String> {
    let default = current
        .and_then(|c| KIND_CHOICES.iter().position(|k| *k == c))
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("  What?")
        .items(&KIND_CHOICES)
        .default(default)
        .interact()?;

    if KIND_CHOICES[choice] == "other" {
        let current = current.filter(|c| !KIND_CHOICES.contains(c));
        tui::prompt_required("Type", current)
    } else {
        Ok(KIND_CHOICES[choice].to_string())
    }
}

/// Prompt the user for a date, retrying on parse errors.
fn prompt_date(ctx: &Context, current: Option<&str>) -> Result<NaiveDate> {
    loop {
        let mut input = Input::<String>::new().with_prompt("  When? (YYYY-MM-DD)");
        if let Some(current) = current.filter(|c| !c.is_empty()) {
            input = input.default(current.to_string());
        }
        let answer = input.interact_text()?;
        match parse_date(&answer, ctx.zone) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Pick one of the user's pets, or type an id when that list is unavailable.
async fn prompt_pet(ctx: &Context, client: &ApiClient, current: Option<&str>) -> Result<String> {
    let pets = match ctx.session.user() {
        Some(user) => client.list_pets_by_owner(&user.id).await.unwrap_or_else(|e| {
            log::warn!("Could not fetch your pets: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    if pets.is_empty() {
        return tui::prompt_required("Pet ID", current.filter(|c| !c.is_empty()));
    }

    let labels: Vec<String> = pets.iter().map(|p| p.render()).collect();
    let default = current
        .and_then(|c| pets.iter().position(|p| p.id == c))
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("  Which pet?")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(pets[choice].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petcare_core::models::ScheduleType;

    #[test]
    fn form_args_override_initial_values() {
        let mut form = ScheduleForm {
            kind: "vet".into(),
            date: "2024-06-01".into(),
            pet_id: "p1".into(),
        };
        FormArgs {
            kind: Some("walk".into()),
            ..Default::default()
        }
        .apply(&mut form);

        assert_eq!(form.kind, "walk");
        assert_eq!(form.date, "2024-06-01");
        assert_eq!(form.pet_id, "p1");
    }

    #[test]
    fn kind_choices_cover_known_types() {
        for kind in &KIND_CHOICES[..4] {
            assert!(!matches!(ScheduleType::from(*kind), ScheduleType::Other(_)));
        }
    }
}
