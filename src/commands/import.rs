use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use petcare_core::api::ScheduleApi;
use petcare_core::local_store::LocalEventStore;

use super::Context;
use crate::render::Render;
use crate::utils::tui;

/// Move events of the old local calendar into `pet_id`'s schedule.
pub async fn run(ctx: &Context, pet_id: &str, file: Option<PathBuf>, keep: bool) -> Result<()> {
    let store = match file {
        Some(path) => LocalEventStore::at(path, ctx.zone),
        None => LocalEventStore::open(&ctx.config)?,
    };

    let events = store.read();
    if events.is_empty() {
        println!("{}", format!("Nothing to import from {}", store.path().display()).dimmed());
        return Ok(());
    }

    let client = ctx.client()?;
    let pet = client.get_pet(pet_id).await?;
    println!("Importing {} events into {}", events.len(), pet.render());

    let mut imported = HashSet::new();
    let mut failed = 0;

    for legacy in &events {
        let event = match legacy.to_calendar_event(ctx.zone) {
            Ok(event) => event,
            Err(e) => {
                println!("   {} {} {}", "!".red(), legacy.title, e.to_string().red());
                failed += 1;
                continue;
            }
        };

        let spinner = tui::create_spinner(format!("   {}", event.render()));
        let result = client.create_schedule(&event.to_schedule_payload(&pet.id)).await;
        spinner.finish_and_clear();

        match result {
            Ok(_) => {
                println!("   {} {}", "+".green(), event.render());
                imported.insert(legacy.id.clone());
            }
            Err(e) => {
                println!("   {} {} {}", "!".red(), event.render(), e.to_string().red());
                failed += 1;
            }
        }
    }

    if !keep && !imported.is_empty() {
        store.retain(|e| !imported.contains(&e.id))?;
        log::debug!("Pruned {} events from {}", imported.len(), store.path().display());
    }

    println!("\nImported {}, failed {}", imported.len(), failed);
    if failed > 0 {
        anyhow::bail!("{} events could not be imported and were left in place", failed);
    }
    Ok(())
}
