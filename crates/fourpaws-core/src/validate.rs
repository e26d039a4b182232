// ── Registration validation ──
//
// Pre-dispatch checks for animal registration and adoption listings.
// Stores run these before any network call so a bad form never leaves
// the process. Each failure names the offending field and the rule it
// broke.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::CoreError;
use crate::model::{AdoptionListing, Gender, NewAnimal, Size, Species};

/// Minimum length of an animal description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Oldest accepted age, in whole years, derived from the birth date.
pub const MAX_AGE_YEARS: i32 = 30;

/// Validate a registration payload against the form rules.
///
/// Checks run in field order and stop at the first violation.
pub fn new_animal(animal: &NewAnimal) -> Result<(), CoreError> {
    require_non_empty("name", &animal.name)?;
    require_species(&animal.species)?;
    require_non_empty("breed", &animal.breed)?;
    require_birth_date(animal.birth_date)?;
    require_gender(&animal.gender)?;
    require_size(&animal.size)?;
    require_non_empty("location", &animal.location)?;
    require_phone("contact_phone", &animal.contact_phone)?;
    require_description(&animal.description)?;
    Ok(())
}

/// Validate an adoption listing: the nested animal plus the listing's
/// own fields.
pub fn adoption_listing(listing: &AdoptionListing) -> Result<(), CoreError> {
    new_animal(&listing.animal)?;
    require_non_empty("reason", &listing.reason)?;
    require_non_empty("location", &listing.location)?;
    require_phone("contact_phone", &listing.contact_phone)?;
    Ok(())
}

// ── Field rules ──

fn require_non_empty(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_species(species: &Species) -> Result<(), CoreError> {
    match species {
        Species::Dog | Species::Cat => Ok(()),
        Species::Other(_) => Err(CoreError::validation(
            "species",
            "must be either a dog or a cat",
        )),
    }
}

fn require_gender(gender: &Gender) -> Result<(), CoreError> {
    match gender {
        Gender::Male | Gender::Female => Ok(()),
        Gender::Other(_) => Err(CoreError::validation(
            "gender",
            "must be either male or female",
        )),
    }
}

fn require_size(size: &Size) -> Result<(), CoreError> {
    match size {
        Size::Small | Size::Medium | Size::Large => Ok(()),
        Size::Other(_) => Err(CoreError::validation(
            "size",
            "must be small, medium, or large",
        )),
    }
}

/// Only an upper bound is enforced: a birth date in the future derives
/// a negative age, which still sits below the cap.
fn require_birth_date(birth_date: NaiveDate) -> Result<(), CoreError> {
    let age = Utc::now().year() - birth_date.year();
    if age > MAX_AGE_YEARS {
        return Err(CoreError::validation(
            "birth_date",
            "age must be 30 years or less",
        ));
    }
    Ok(())
}

/// Optional leading `+`, then 6 to 15 digits, nothing else.
fn require_phone(field: &'static str, phone: &str) -> Result<(), CoreError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let valid = (6..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(CoreError::validation(
            field,
            "must be a phone number of 6 to 15 digits",
        ));
    }
    Ok(())
}

fn require_description(description: &str) -> Result<(), CoreError> {
    if description.len() < MIN_DESCRIPTION_LEN {
        return Err(CoreError::validation(
            "description",
            "must be at least 10 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn valid_animal() -> NewAnimal {
        NewAnimal {
            name: "Rex".into(),
            species: Species::Dog,
            breed: "Labrador".into(),
            description: "A very good boy looking for a home".into(),
            birth_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            gender: Gender::Male,
            size: Size::Large,
            location: "Madrid".into(),
            contact_phone: "+34600111222".into(),
            image: None,
        }
    }

    fn field_of(err: CoreError) -> String {
        match err {
            CoreError::Validation { field, .. } => field,
            other => panic!("expected a validation error, got {other}"),
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        new_animal(&valid_animal()).unwrap();
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut animal = valid_animal();
        animal.name = "   ".into();
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "name");

        let mut animal = valid_animal();
        animal.breed = String::new();
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "breed");

        let mut animal = valid_animal();
        animal.location = String::new();
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "location");
    }

    #[test]
    fn rejects_species_outside_the_form() {
        let mut animal = valid_animal();
        animal.species = Species::Other("parrot".into());
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "species");
    }

    #[test]
    fn rejects_implausible_ages() {
        let mut animal = valid_animal();
        animal.birth_date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "birth_date");
    }

    #[test]
    fn future_birth_dates_pass_the_age_cap() {
        let mut animal = valid_animal();
        let next_year = Utc::now().year() + 1;
        animal.birth_date = NaiveDate::from_ymd_opt(next_year, 1, 1).unwrap();
        new_animal(&animal).unwrap();
    }

    #[test]
    fn phone_accepts_optional_plus_prefix() {
        let mut animal = valid_animal();
        animal.contact_phone = "600111222".into();
        new_animal(&animal).unwrap();

        animal.contact_phone = "+600111222".into();
        new_animal(&animal).unwrap();
    }

    #[test]
    fn phone_rejects_wrong_shape() {
        for bad in ["12345", "1234567890123456", "600-111-222", "+34 600", "++600111222"] {
            let mut animal = valid_animal();
            animal.contact_phone = (*bad).into();
            assert_eq!(
                field_of(new_animal(&animal).unwrap_err()),
                "contact_phone",
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_short_descriptions() {
        let mut animal = valid_animal();
        animal.description = "too short".into(); // 9 bytes
        assert_eq!(field_of(new_animal(&animal).unwrap_err()), "description");
    }

    #[test]
    fn adoption_listing_checks_its_own_fields_too() {
        let listing = AdoptionListing {
            owner_id: 7,
            animal: valid_animal(),
            reason: String::new(),
            location: "Madrid".into(),
            contact_phone: "+34600111222".into(),
        };
        assert_eq!(field_of(adoption_listing(&listing).unwrap_err()), "reason");
    }
}
