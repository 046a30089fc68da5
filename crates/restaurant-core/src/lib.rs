//! Restaurant Core: entity value objects and the unified error model
//!
//! Dishes, categories, allergens, menus and restaurants. Every entity is
//! identified by a trimmed, non-empty name; the registry built on top of this
//! crate relies on that and never re-validates the other fields.

pub mod catalog;
pub mod dish;
pub mod entity;
pub mod error;
pub mod kind;
pub mod restaurant;
pub mod validation;

pub use catalog::{Allergen, Category, Menu};
pub use dish::Dish;
pub use entity::Entity;
pub use error::{RestaurantError, Result};
pub use kind::{EntityKind, Named};
pub use restaurant::{Coordinate, Restaurant};
