// ── Display vocabulary for filter labels ──
//
// The canonical enum-to-label mapping used everywhere a gender or size
// appears as a filter chip or table cell. Keeping it in one table is
// what makes set-membership filtering against labels well defined.

use super::animal::{Gender, Size};

/// Display label for a gender, or `None` when the value is outside the
/// vocabulary. Out-of-vocabulary values never match an active filter.
pub fn gender_label(gender: &Gender) -> Option<&'static str> {
    match gender {
        Gender::Male => Some("Macho"),
        Gender::Female => Some("Hembra"),
        Gender::Other(_) => None,
    }
}

/// Display label for a size class, or `None` outside the vocabulary.
pub fn size_label(size: &Size) -> Option<&'static str> {
    match size {
        Size::Small => Some("Pequeño"),
        Size::Medium => Some("Mediano"),
        Size::Large => Some("Grande"),
        Size::Other(_) => None,
    }
}

/// All gender labels, in display order.
pub fn gender_labels() -> [&'static str; 2] {
    ["Macho", "Hembra"]
}

/// All size labels, in display order.
pub fn size_labels() -> [&'static str; 3] {
    ["Pequeño", "Mediano", "Grande"]
}
