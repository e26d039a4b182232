//! Animal command handlers.

use chrono::{Datelike, Utc};
use tabled::Tabled;

use fourpaws_core::model::labels;
use fourpaws_core::{
    AGE_RANGE_DEFAULT, Animal, AnimalFilter, AnimalId, Gender, NewAnimal, Platform, Size,
};

use crate::cli::{AnimalListArgs, AnimalRegisterArgs, AnimalsArgs, AnimalsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AnimalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Adopted")]
    adopted: String,
}

impl From<&Animal> for AnimalRow {
    fn from(a: &Animal) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            species: a.species.to_string(),
            breed: a.breed.clone(),
            age: a
                .age_in(Utc::now().year())
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".into()),
            gender: a
                .gender
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into()),
            size: a
                .size
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into()),
            location: if a.location.is_empty() {
                "-".into()
            } else {
                a.location.clone()
            },
            adopted: if a.adopted { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(a: &Animal) -> String {
    let mut lines = vec![
        format!("ID:          {}", a.id),
        format!("Name:        {}", a.name),
        format!("Species:     {}", a.species),
        format!("Breed:       {}", a.breed),
        format!(
            "Age:         {}",
            a.age_in(Utc::now().year())
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".into())
        ),
        format!(
            "Gender:      {}",
            a.gender
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into())
        ),
        format!(
            "Size:        {}",
            a.size
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into())
        ),
        format!("Location:    {}", if a.location.is_empty() { "-" } else { &a.location }),
        format!("Adopted:     {}", if a.adopted { "yes" } else { "no" }),
        format!("Image:       {}", a.image_url),
    ];
    if let Some(ref owner) = a.owner {
        lines.push(format!("Owner:       {} (id {})", owner.username, owner.id));
    }
    if !a.description.is_empty() {
        lines.push(format!("Description: {}", a.description));
    }
    lines.join("\n")
}

// ── Filter construction ─────────────────────────────────────────────

/// Lower the list flags onto the core filter. Flags left at their
/// defaults leave the matching gate inactive.
fn build_filter(args: &AnimalListArgs) -> AnimalFilter {
    let mut filter = AnimalFilter::default();

    if let Some(ref query) = args.query {
        filter.query = query.clone();
    }
    filter.species = args.species.into();

    if args.min_age.is_some() || args.max_age.is_some() {
        filter.age_range = (
            args.min_age.unwrap_or(AGE_RANGE_DEFAULT.0),
            args.max_age.unwrap_or(AGE_RANGE_DEFAULT.1),
        );
    }

    filter.genders.extend(
        args.gender
            .iter()
            .filter_map(|g| labels::gender_label(&Gender::from(*g)))
            .map(String::from),
    );
    filter.sizes.extend(
        args.size
            .iter()
            .filter_map(|s| labels::size_label(&Size::from(*s)))
            .map(String::from),
    );
    filter.locations.extend(args.location.iter().cloned());

    filter
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    platform: &Platform,
    args: AnimalsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AnimalsCommand::List(list) => {
            let filter = build_filter(&list);
            let snap = platform.animals().animals().await?;
            let narrowed = filter.apply(&snap, Utc::now().year());

            let out = output::render_list(
                &global.output,
                &narrowed,
                |a| AnimalRow::from(a.as_ref()),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Get { id } => {
            let animal = platform.animals().animal(AnimalId::new(id)).await?;
            let out = output::render_single(&global.output, &animal, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Register(register) => {
            let animal = build_new_animal(register)?;
            let created = platform.animals().register(animal).await?;
            output::status(
                &format!("Animal {} registered with id {}", created.name, created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AnimalsCommand::Adopt { id } => {
            let updated = platform.animals().mark_adopted(AnimalId::new(id)).await?;
            output::status(
                &format!("{} marked as adopted", updated.name),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AnimalsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete animal {id}?"), global.yes)? {
                return Ok(());
            }
            platform.animals().remove(AnimalId::new(id)).await?;
            output::status("Animal deleted", &global.color, global.quiet);
            Ok(())
        }

        AnimalsCommand::Similar { id } => {
            let similar = platform.animals().similar(AnimalId::new(id)).await;
            let out = output::render_list(
                &global.output,
                &similar,
                AnimalRow::from,
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn build_new_animal(args: AnimalRegisterArgs) -> Result<NewAnimal, CliError> {
    let image = args.image.as_deref().map(util::read_image).transpose()?;
    Ok(NewAnimal {
        name: args.name,
        species: args.species.into(),
        breed: args.breed,
        description: args.description,
        birth_date: args.birth_date,
        gender: args.gender.into(),
        size: args.size.into(),
        location: args.location,
        contact_phone: args.phone,
        image,
    })
}
