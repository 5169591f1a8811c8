use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use petcare_core::models::{Pet, PetDraft, ScheduleEntry};

use super::Context;
use crate::render::{PetCard, Render};
use crate::utils::tui;

/// Pet form fields. Anything left out is prompted for (add) or kept (edit).
#[derive(Args, Debug, Default)]
pub struct PetFields {
    /// Pet name
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(long)]
    pub species: Option<String>,

    #[arg(long)]
    pub breed: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,

    #[arg(long)]
    pub microchip: Option<String>,

    #[arg(long)]
    pub emergency_contact: Option<String>,

    /// Photo URL (repeatable)
    #[arg(long = "photo")]
    pub photos: Vec<String>,

    /// Schedule entry as TYPE:DATE, e.g. vet:2024-06-10 (repeatable, replaces the list)
    #[arg(long = "schedule", value_name = "TYPE:DATE")]
    pub schedule: Vec<ScheduleEntry>,
}

impl PetFields {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.dob.is_none()
            && self.microchip.is_none()
            && self.emergency_contact.is_none()
            && self.photos.is_empty()
            && self.schedule.is_empty()
    }

    /// Overlay the given fields onto `draft`. An empty value clears a field.
    fn apply(self, draft: &mut PetDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(species) = self.species {
            draft.species = Some(species);
        }
        if let Some(breed) = self.breed {
            draft.breed = Some(breed);
        }
        if let Some(dob) = self.dob {
            draft.dob = Some(dob);
        }
        if let Some(microchip) = self.microchip {
            draft.microchip_id = Some(microchip);
        }
        if let Some(contact) = self.emergency_contact {
            draft.emergency_contact = Some(contact);
        }
        if !self.photos.is_empty() {
            draft.photos = self.photos;
        }
        if !self.schedule.is_empty() {
            draft.schedule = self.schedule;
        }
    }
}

/// Ask for every field, pre-filled with the draft's current values.
fn prompt_draft(draft: &mut PetDraft) -> Result<()> {
    draft.name = tui::prompt_required("Name", non_empty(&draft.name))?;
    draft.species = tui::prompt_optional("Species (skip)", draft.species.as_deref())?;
    draft.breed = tui::prompt_optional("Breed (skip)", draft.breed.as_deref())?;
    draft.dob = tui::prompt_optional("Date of birth, YYYY-MM-DD (skip)", draft.dob.as_deref())?;
    draft.microchip_id =
        tui::prompt_optional("Microchip ID (skip)", draft.microchip_id.as_deref())?;
    draft.emergency_contact = tui::prompt_optional(
        "Emergency contact (skip)",
        draft.emergency_contact.as_deref(),
    )?;
    Ok(())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

pub async fn list(ctx: &Context, mine: bool) -> Result<()> {
    let client = ctx.client()?;

    let spinner = tui::create_spinner("Fetching pets".to_string());
    let result = if mine {
        let user = ctx.require_user()?;
        client.list_pets_by_owner(&user.id).await
    } else {
        client.list_pets().await
    };
    spinner.finish_and_clear();
    let pets = result?;

    if pets.is_empty() {
        println!("{}", "No pets yet".dimmed());
        return Ok(());
    }

    for pet in &pets {
        let marker = if ctx.config.default_pet.as_deref() == Some(pet.id.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, pet.render());
    }

    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client()?;
    let spinner = tui::create_spinner("Fetching pet".to_string());
    let result = client.get_pet(id).await;
    spinner.finish_and_clear();
    let pet = result?;

    print_card(ctx, &pet);
    Ok(())
}

fn print_card(ctx: &Context, pet: &Pet) {
    let card = PetCard {
        pet,
        today: ctx.zone.today(),
        zone: ctx.zone,
    };
    println!("{}", card.render());
}

pub async fn add(ctx: &Context, fields: PetFields) -> Result<()> {
    let user = ctx.require_user()?;
    let interactive = fields.name.is_none();

    let mut draft = PetDraft {
        owner_id: Some(user.id.clone()),
        ..Default::default()
    };
    fields.apply(&mut draft);
    if interactive {
        prompt_draft(&mut draft)?;
    }

    let client = ctx.client()?;
    let spinner = tui::create_spinner("Adding pet".to_string());
    let result = client.create_pet(draft).await;
    spinner.finish_and_clear();
    let pet = result?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Added: {}", pet.name).green());
    print_card(ctx, &pet);
    Ok(())
}

pub async fn edit(ctx: &Context, id: &str, fields: PetFields) -> Result<()> {
    let client = ctx.client()?;
    let pet = client.get_pet(id).await?;

    let mut draft = PetDraft::from_pet(&pet);
    if fields.is_empty() {
        prompt_draft(&mut draft)?;
    } else {
        fields.apply(&mut draft);
    }

    let spinner = tui::create_spinner(format!("Saving {}", pet.name));
    let result = client.update_pet(id, draft).await;
    spinner.finish_and_clear();
    let pet = result?;

    println!("{}", format!("  Updated: {}", pet.name).green());
    print_card(ctx, &pet);
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let client = ctx.client()?;
    let pet = client.get_pet(id).await?;

    if !yes && !tui::confirm(format!("Delete {}? This cannot be undone", pet.name))? {
        return Ok(());
    }

    client.delete_pet(id).await?;
    println!("{}", format!("  Deleted: {}", pet.name).red());
    Ok(())
}

/// Make `id` the pet the calendar shows by default.
pub async fn use_pet(ctx: &mut Context, id: &str) -> Result<()> {
    let pet = ctx.client()?.get_pet(id).await?;

    ctx.config.default_pet = Some(pet.id.clone());
    ctx.config.save()?;
    println!("Calendar now defaults to {}", pet.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use petcare_core::models::ScheduleType;

    #[derive(Parser)]
    struct ScheduleCli {
        #[command(flatten)]
        fields: PetFields,
    }

    #[test]
    fn fields_overlay_only_what_was_given() {
        let mut draft = PetDraft {
            name: "Rex".into(),
            species: Some("Dog".into()),
            breed: Some("Beagle".into()),
            ..Default::default()
        };

        PetFields {
            breed: Some("Collie".into()),
            photos: vec!["https://img/rex.jpg".into()],
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.name, "Rex");
        assert_eq!(draft.species.as_deref(), Some("Dog"));
        assert_eq!(draft.breed.as_deref(), Some("Collie"));
        assert_eq!(draft.photos, ["https://img/rex.jpg"]);
    }

    #[test]
    fn schedule_flag_replaces_draft_schedule() {
        let cli = ScheduleCli::try_parse_from([
            "add",
            "--name",
            "Rex",
            "--schedule",
            "vet:2024-06-10",
            "--schedule",
            "walk:2024-06-11",
        ])
        .unwrap();

        let mut draft = PetDraft {
            schedule: vec!["feed:2024-01-01".parse().unwrap()],
            ..Default::default()
        };
        cli.fields.apply(&mut draft);

        assert_eq!(draft.name, "Rex");
        assert_eq!(draft.schedule.len(), 2);
        assert_eq!(draft.schedule[0].kind, ScheduleType::Vet);
        assert_eq!(draft.schedule[1].date, "2024-06-11");
    }

    #[test]
    fn schedule_flag_needs_type_and_date() {
        assert!(ScheduleCli::try_parse_from(["add", "--schedule", "vet"]).is_err());
    }

    #[test]
    fn empty_fields_mean_interactive_edit() {
        assert!(PetFields::default().is_empty());
        assert!(
            !PetFields {
                schedule: vec!["walk:2024-06-11".parse().unwrap()],
                ..Default::default()
            }
            .is_empty()
        );
        assert!(
            !PetFields {
                dob: Some("2020-01-01".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
