//! Entity: a tagged handle over any of the five concrete kinds.
//!
//! Handles are `Arc`s so the registry can hand out the same instance from
//! every collection that references it.

use crate::catalog::{Allergen, Category, Menu};
use crate::dish::Dish;
use crate::error::{RestaurantError, Result};
use crate::kind::{EntityKind, Named};
use crate::restaurant::Restaurant;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Dish(Arc<Dish>),
    Category(Arc<Category>),
    Allergen(Arc<Allergen>),
    Menu(Arc<Menu>),
    Restaurant(Arc<Restaurant>),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Dish(_) => EntityKind::Dish,
            Entity::Category(_) => EntityKind::Category,
            Entity::Allergen(_) => EntityKind::Allergen,
            Entity::Menu(_) => EntityKind::Menu,
            Entity::Restaurant(_) => EntityKind::Restaurant,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Dish(d) => d.name(),
            Entity::Category(c) => c.name(),
            Entity::Allergen(a) => a.name(),
            Entity::Menu(m) => m.name(),
            Entity::Restaurant(r) => r.name(),
        }
    }

    /// Whether both handles point at the very same instance.
    pub fn same_instance(&self, other: &Entity) -> bool {
        match (self, other) {
            (Entity::Dish(a), Entity::Dish(b)) => Arc::ptr_eq(a, b),
            (Entity::Category(a), Entity::Category(b)) => Arc::ptr_eq(a, b),
            (Entity::Allergen(a), Entity::Allergen(b)) => Arc::ptr_eq(a, b),
            (Entity::Menu(a), Entity::Menu(b)) => Arc::ptr_eq(a, b),
            (Entity::Restaurant(a), Entity::Restaurant(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn mismatch(&self, expected: EntityKind) -> RestaurantError {
        RestaurantError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn into_dish(self) -> Result<Arc<Dish>> {
        match self {
            Entity::Dish(d) => Ok(d),
            other => Err(other.mismatch(EntityKind::Dish)),
        }
    }

    pub fn into_category(self) -> Result<Arc<Category>> {
        match self {
            Entity::Category(c) => Ok(c),
            other => Err(other.mismatch(EntityKind::Category)),
        }
    }

    pub fn into_allergen(self) -> Result<Arc<Allergen>> {
        match self {
            Entity::Allergen(a) => Ok(a),
            other => Err(other.mismatch(EntityKind::Allergen)),
        }
    }

    pub fn into_menu(self) -> Result<Arc<Menu>> {
        match self {
            Entity::Menu(m) => Ok(m),
            other => Err(other.mismatch(EntityKind::Menu)),
        }
    }

    pub fn into_restaurant(self) -> Result<Arc<Restaurant>> {
        match self {
            Entity::Restaurant(r) => Ok(r),
            other => Err(other.mismatch(EntityKind::Restaurant)),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Dish(d) => write!(f, "{}", d),
            Entity::Category(c) => write!(f, "{}", c),
            Entity::Allergen(a) => write!(f, "{}", a),
            Entity::Menu(m) => write!(f, "{}", m),
            Entity::Restaurant(r) => write!(f, "{}", r),
        }
    }
}

impl EntityKind {
    /// Construct a fresh entity of this kind carrying only `name`.
    pub fn build(self, name: &str) -> Result<Entity> {
        Ok(match self {
            EntityKind::Dish => Entity::Dish(Arc::new(Dish::new(name)?)),
            EntityKind::Category => Entity::Category(Arc::new(Category::new(name)?)),
            EntityKind::Allergen => Entity::Allergen(Arc::new(Allergen::new(name)?)),
            EntityKind::Menu => Entity::Menu(Arc::new(Menu::new(name)?)),
            EntityKind::Restaurant => Entity::Restaurant(Arc::new(Restaurant::new(name)?)),
        })
    }
}

macro_rules! entity_from {
    ($($ty:ident),*) => {
        $(
            impl From<Arc<$ty>> for Entity {
                fn from(value: Arc<$ty>) -> Self {
                    Entity::$ty(value)
                }
            }

            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Entity::$ty(Arc::new(value))
                }
            }
        )*
    };
}

entity_from!(Dish, Category, Allergen, Menu, Restaurant);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_each_kind() {
        for kind in EntityKind::ALL {
            let entity = kind.build("Nombre").unwrap();
            assert_eq!(entity.kind(), kind);
            assert_eq!(entity.name(), "Nombre");
        }
    }

    #[test]
    fn test_build_rejects_empty_name() {
        assert_eq!(
            EntityKind::Menu.build(" "),
            Err(RestaurantError::empty("name"))
        );
    }

    #[test]
    fn test_typed_conversion() {
        let entity: Entity = Category::new("Postres").unwrap().into();
        assert_eq!(
            entity.clone().into_dish(),
            Err(RestaurantError::TypeMismatch {
                expected: EntityKind::Dish,
                found: EntityKind::Category,
            })
        );
        assert_eq!(entity.into_category().unwrap().name(), "Postres");
    }

    #[test]
    fn test_same_instance() {
        let dish = Arc::new(Dish::new("Cocido").unwrap());
        let a = Entity::from(dish.clone());
        let b = Entity::from(dish);
        let c: Entity = Dish::new("Cocido").unwrap().into();
        assert!(a.same_instance(&b));
        assert!(!a.same_instance(&c));
        assert_eq!(a, c);
    }
}
