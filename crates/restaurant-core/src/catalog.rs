//! Category, Allergen and Menu: the entities that own dish relation lists.
//!
//! All three carry the same shape (a name and a free-text description), so
//! they are generated from one definition.

use crate::error::{RestaurantError, Result};
use crate::kind::{clean_name, EntityKind, Named};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire form shared by the described entities.
#[derive(Deserialize)]
struct RawDescribed {
    name: String,
    #[serde(default)]
    description: String,
}

macro_rules! described_entity {
    ($(#[$meta:meta])* $ty:ident, $kind:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "RawDescribed")]
        pub struct $ty {
            name: String,
            description: String,
        }

        impl TryFrom<RawDescribed> for $ty {
            type Error = RestaurantError;

            fn try_from(raw: RawDescribed) -> Result<Self> {
                Ok($ty::new(&raw.name)?.with_description(raw.description))
            }
        }

        impl $ty {
            pub fn new(name: &str) -> Result<Self> {
                Ok(Self {
                    name: clean_name(name)?,
                    description: String::new(),
                })
            }

            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.description = description.into();
                self
            }

            pub fn description(&self) -> &str {
                &self.description
            }

            pub fn set_name(&mut self, value: &str) -> Result<()> {
                self.name = clean_name(value)?;
                Ok(())
            }

            pub fn set_description(&mut self, value: impl Into<String>) {
                self.description = value.into();
            }
        }

        impl Named for $ty {
            const KIND: EntityKind = $kind;

            fn name(&self) -> &str {
                &self.name
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!($label, " name: {}, Description: {}"),
                    self.name, self.description
                )
            }
        }
    };
}

described_entity!(
    /// A grouping of dishes (starters, mains, desserts...).
    Category,
    EntityKind::Category,
    "Category"
);

described_entity!(
    /// An allergen present in one or more dishes.
    Allergen,
    EntityKind::Allergen,
    "Allergen"
);

described_entity!(
    /// A menu offering an explicitly ordered list of dishes.
    Menu,
    EntityKind::Menu,
    "Menu"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        let category = Category::new("Categoria")
            .unwrap()
            .with_description("Descripción de la categoría");
        assert_eq!(
            category.to_string(),
            "Category name: Categoria, Description: Descripción de la categoría"
        );
    }

    #[test]
    fn test_allergen_display() {
        let allergen = Allergen::new("Alérgeno")
            .unwrap()
            .with_description("Descripción del alérgeno");
        assert_eq!(
            allergen.to_string(),
            "Allergen name: Alérgeno, Description: Descripción del alérgeno"
        );
    }

    #[test]
    fn test_empty_names_rejected() {
        assert_eq!(Category::new(""), Err(RestaurantError::empty("name")));
        assert_eq!(Allergen::new(" \t"), Err(RestaurantError::empty("name")));
        assert_eq!(Menu::new("\n"), Err(RestaurantError::empty("name")));
    }

    #[test]
    fn test_menu_setters() {
        let mut menu = Menu::new("Menu del día").unwrap();
        menu.set_description("Primero, segundo y postre");
        menu.set_name(" Menu degustación ").unwrap();
        assert_eq!(menu.name(), "Menu degustación");
        assert_eq!(menu.description(), "Primero, segundo y postre");
        assert_eq!(Menu::KIND, EntityKind::Menu);
    }

    #[test]
    fn test_deserialize_applies_name_rule() {
        let category: Category = serde_json::from_str(r#"{"name":"  Postres "}"#).unwrap();
        assert_eq!(category.name(), "Postres");
        assert_eq!(category.description(), "");

        for json in [r#"{"name":"   "}"#, r#"{"name":""}"#] {
            assert!(serde_json::from_str::<Category>(json).is_err());
            assert!(serde_json::from_str::<Allergen>(json).is_err());
            assert!(serde_json::from_str::<Menu>(json).is_err());
        }
    }

    #[test]
    fn test_deserialize_keeps_description() {
        let json = r#"{"name":"Gluten","description":"Trigo, cebada"}"#;
        let allergen: Allergen = serde_json::from_str(json).unwrap();
        assert_eq!(allergen.description(), "Trigo, cebada");
    }
}
