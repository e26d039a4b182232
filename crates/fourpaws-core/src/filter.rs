// ── Animal listing filter ──
//
// Pure, side-effect-free narrowing of an in-memory animal collection.
// Never mutates the source and never touches the network. All
// predicates are conjunctive: an animal must satisfy every active
// gate to remain in the result.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::labels;
use crate::model::{Animal, Species};

/// The inclusive age bounds that mean "no age restriction".
pub const AGE_RANGE_DEFAULT: (i32, i32) = (0, 15);

/// Species tab above the listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpeciesTab {
    #[default]
    All,
    Dogs,
    Cats,
    /// Neither dog nor cat.
    Others,
}

impl SpeciesTab {
    fn admits(self, species: &Species) -> bool {
        match self {
            SpeciesTab::All => true,
            SpeciesTab::Dogs => *species == Species::Dog,
            SpeciesTab::Cats => *species == Species::Cat,
            SpeciesTab::Others => *species != Species::Dog && *species != Species::Cat,
        }
    }
}

/// A compound filter over the animal listing, all gates conjunctive.
///
/// Gender, size, and location gates are sets of display labels (see
/// [`labels`]); an empty set means the gate is inactive. The age gate
/// is inactive exactly when the bounds equal [`AGE_RANGE_DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalFilter {
    pub query: String,
    pub species: SpeciesTab,
    /// Inclusive age bounds in whole years.
    pub age_range: (i32, i32),
    pub genders: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub locations: BTreeSet<String>,
}

impl Default for AnimalFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            species: SpeciesTab::All,
            age_range: AGE_RANGE_DEFAULT,
            genders: BTreeSet::new(),
            sizes: BTreeSet::new(),
            locations: BTreeSet::new(),
        }
    }
}

impl AnimalFilter {
    /// True when every gate is at its documented default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Restore every field to its exact default. This is the only
    /// defined "clear" operation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Decide whether one animal passes every active gate.
    ///
    /// `current_year` feeds the whole-year age approximation; callers
    /// pass the wall-clock year, tests pass a fixed one.
    pub fn matches(&self, animal: &Animal, current_year: i32) -> bool {
        if !self.species.admits(&animal.species) {
            return false;
        }

        // Age gate, active only away from the default bounds. Animals
        // without a birth date pass: no age can be derived for them.
        if self.age_range != AGE_RANGE_DEFAULT {
            if let Some(age) = animal.age_in(current_year) {
                if age < self.age_range.0 || age > self.age_range.1 {
                    return false;
                }
            }
        }

        // Label-set gates skip animals whose field is absent; a present
        // value outside the vocabulary never matches.
        if !self.genders.is_empty() {
            if let Some(gender) = &animal.gender {
                match labels::gender_label(gender) {
                    Some(label) if self.genders.contains(label) => {}
                    _ => return false,
                }
            }
        }

        if !self.sizes.is_empty() {
            if let Some(size) = &animal.size {
                match labels::size_label(size) {
                    Some(label) if self.sizes.contains(label) => {}
                    _ => return false,
                }
            }
        }

        // Location is exact-match-against-set; empty locations pass.
        if !self.locations.is_empty()
            && !animal.location.is_empty()
            && !self.locations.contains(&animal.location)
        {
            return false;
        }

        self.matches_query(animal)
    }

    /// Narrow a snapshot, preserving its order.
    pub fn apply(&self, animals: &[Arc<Animal>], current_year: i32) -> Vec<Arc<Animal>> {
        animals
            .iter()
            .filter(|a| self.matches(a, current_year))
            .map(Arc::clone)
            .collect()
    }

    /// Case-insensitive substring match over name, breed, and
    /// location. An empty query matches everything.
    fn matches_query(&self, animal: &Animal) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        animal.name.to_lowercase().contains(&query)
            || animal.breed.to_lowercase().contains(&query)
            || animal.location.to_lowercase().contains(&query)
    }
}
