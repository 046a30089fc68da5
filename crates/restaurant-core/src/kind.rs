//! Entity kinds and the `Named` capability shared by every entity.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying one of the five registry collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Dish,
    Category,
    Allergen,
    Menu,
    Restaurant,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Dish,
        EntityKind::Category,
        EntityKind::Allergen,
        EntityKind::Menu,
        EntityKind::Restaurant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Dish => "dish",
            EntityKind::Category => "category",
            EntityKind::Allergen => "allergen",
            EntityKind::Menu => "menu",
            EntityKind::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything identified by a unique name inside its collection.
pub trait Named {
    const KIND: EntityKind;

    fn name(&self) -> &str;
}

/// Trims `value` and rejects blank names.
pub(crate) fn clean_name(value: &str) -> crate::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::RestaurantError::empty("name"));
    }
    Ok(trimmed.to_string())
}
