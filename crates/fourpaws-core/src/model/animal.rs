// ── Animal domain types ──

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ids::AnimalId;
use super::user::OwnerSummary;

/// Animal species. The listing vocabulary is dogs and cats; anything
/// else the backend sends is carried verbatim in `Other` so the
/// "others" species tab can still match it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    #[strum(default)]
    Other(String),
}

impl From<String> for Species {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Species::Other(raw))
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.to_string()
    }
}

/// Animal gender. Parsed case-insensitively; unrecognized values are
/// preserved in `Other` and never match a filter label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
    #[strum(default)]
    Other(String),
}

impl From<String> for Gender {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Gender::Other(raw))
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.to_string()
    }
}

/// Animal size class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Size {
    Small,
    Medium,
    Large,
    #[strum(default)]
    Other(String),
}

impl From<String> for Size {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Size::Other(raw))
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.to_string()
    }
}

/// An adoptable (or adopted) animal.
///
/// `image_url` is always usable as-is: the adapter layer rewrites
/// relative upload paths to absolute URLs and substitutes a placeholder
/// when the record has no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub birth_date: Option<NaiveDate>,
    pub location: String,
    pub description: String,
    pub adopted: bool,
    pub image_url: String,
    /// Owning-user summary, display-only. Present on detail reads.
    pub owner: Option<OwnerSummary>,
}

impl Animal {
    /// Whole-year age approximation: `year - birth year`. Day and month
    /// are ignored on purpose, matching how ages are shown in listings.
    pub fn age_in(&self, year: i32) -> Option<i32> {
        self.birth_date.map(|d| year - d.year())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn species_parses_exact_vocabulary() {
        assert_eq!(Species::from("dog".to_string()), Species::Dog);
        assert_eq!(Species::from("cat".to_string()), Species::Cat);
        // Casing is significant for species: "Dog" is not in the vocabulary.
        assert_eq!(
            Species::from("Dog".to_string()),
            Species::Other("Dog".into())
        );
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::from("MALE".to_string()), Gender::Male);
        assert_eq!(Gender::from("Female".to_string()), Gender::Female);
        assert_eq!(
            Gender::from("unknown".to_string()),
            Gender::Other("unknown".into())
        );
    }

    #[test]
    fn size_displays_lowercase() {
        assert_eq!(Size::Small.to_string(), "small");
        assert_eq!(Size::Other("huge".into()).to_string(), "huge");
    }

    #[test]
    fn age_is_year_difference() {
        let animal = Animal {
            id: AnimalId::new(1),
            name: "Rex".into(),
            species: Species::Dog,
            breed: String::new(),
            gender: None,
            size: None,
            birth_date: NaiveDate::from_ymd_opt(2019, 12, 31),
            location: String::new(),
            description: String::new(),
            adopted: false,
            image_url: String::new(),
            owner: None,
        };
        // Month and day are ignored: born December 2019, age 6 in 2025.
        assert_eq!(animal.age_in(2025), Some(6));
    }
}
