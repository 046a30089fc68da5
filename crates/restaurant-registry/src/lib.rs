//! Restaurant Registry: relationship management over the menu taxonomy
//!
//! [`RestaurantsManager`] keeps five name-unique collections (categories,
//! allergens, menus, dishes, restaurants) sorted by case-insensitive name,
//! and links dishes to categories, allergens and menus.
//!
//! # Example
//!
//! ```
//! use restaurant_core::{Category, Dish, Named};
//! use restaurant_registry::{RegistryConfig, RestaurantsManager};
//!
//! let mut manager = RestaurantsManager::new(RegistryConfig::default());
//! let mains = Category::new("Principales").unwrap();
//!
//! manager
//!     .assign_category_to_dish(
//!         mains.clone(),
//!         [Dish::new("Tortilla de patatas").unwrap(), Dish::new("Pollo asado").unwrap()],
//!     )
//!     .unwrap();
//!
//! let names: Vec<_> = manager
//!     .dishes_in_category(&mains)
//!     .unwrap()
//!     .map(|d| d.name().to_string())
//!     .collect();
//! assert_eq!(names, ["Pollo asado", "Tortilla de patatas"]);
//! ```
//!
//! # Removal does not cascade
//!
//! Removing a dish from the dish collection leaves it linked wherever it was
//! assigned. Unassign it first if it should disappear from its owners too.

pub mod collection;
pub mod config;
mod global;
pub mod manager;
pub mod ordering;
mod relations;
pub mod snapshot;

pub use collection::{Collection, Entry, Keyed, OwnerEntry};
pub use config::RegistryConfig;
pub use global::{GlobalRegistry, RegistryGuard};
pub use manager::{Catalogued, DishOwner, RestaurantsManager};
pub use ordering::{by_name, cmp_names};
pub use snapshot::{OwnerSnapshot, RegistrySnapshot};
