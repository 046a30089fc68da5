//! Keyed collections and the entries stored in them.
//!
//! One generic collection serves all five kinds. Entries are kept in a vector
//! sorted by case-insensitive name; lookups are by exact name.

use crate::ordering::sort_by_name;
use restaurant_core::{Dish, Named, RestaurantError, Result};
use std::slice;
use std::sync::Arc;

/// An entry that wraps a named entity.
pub trait Keyed {
    type Item: Named;

    fn item(&self) -> &Arc<Self::Item>;

    fn name(&self) -> &str {
        self.item().name()
    }
}

/// Entry for kinds without a relation list (dishes and restaurants).
#[derive(Debug, Clone)]
pub struct Entry<T> {
    item: Arc<T>,
}

impl<T> Entry<T> {
    pub fn new(item: Arc<T>) -> Self {
        Self { item }
    }
}

impl<T: Named> Keyed for Entry<T> {
    type Item = T;

    fn item(&self) -> &Arc<T> {
        &self.item
    }
}

/// Entry for an owner (category, allergen or menu) with its linked dishes.
///
/// Linked dishes are the same `Arc`s held by the top-level dish collection.
#[derive(Debug, Clone)]
pub struct OwnerEntry<T> {
    item: Arc<T>,
    dishes: Vec<Arc<Dish>>,
    // set once dishes have been swapped by hand; new links then append
    custom_order: bool,
}

impl<T: Named> OwnerEntry<T> {
    pub fn new(item: Arc<T>) -> Self {
        Self {
            item,
            dishes: Vec::new(),
            custom_order: false,
        }
    }

    /// Linked dishes in their current order.
    pub fn dishes(&self) -> &[Arc<Dish>] {
        &self.dishes
    }

    /// Whether the list order has been set by hand.
    pub fn has_custom_order(&self) -> bool {
        self.custom_order
    }

    pub fn position(&self, dish: &str) -> Option<usize> {
        self.dishes.iter().position(|d| d.name() == dish)
    }

    pub fn contains(&self, dish: &str) -> bool {
        self.position(dish).is_some()
    }

    fn relation_exists(&self, dish: &str) -> RestaurantError {
        RestaurantError::RelationAlreadyExists {
            kind: T::KIND,
            owner: self.item.name().to_string(),
            dish: dish.to_string(),
        }
    }

    fn relation_missing(&self, dish: &str) -> RestaurantError {
        RestaurantError::RelationNotFound {
            kind: T::KIND,
            owner: self.item.name().to_string(),
            dish: dish.to_string(),
        }
    }

    pub(crate) fn link(&mut self, dish: Arc<Dish>) -> Result<()> {
        if self.contains(dish.name()) {
            return Err(self.relation_exists(dish.name()));
        }
        self.dishes.push(dish);
        if !self.custom_order {
            sort_by_name(&mut self.dishes, |d| d.name());
        }
        Ok(())
    }

    pub(crate) fn unlink(&mut self, dish: &str) -> Result<Arc<Dish>> {
        match self.position(dish) {
            Some(index) => Ok(self.dishes.remove(index)),
            None => Err(self.relation_missing(dish)),
        }
    }

    pub(crate) fn swap(&mut self, first: &str, second: &str) -> Result<()> {
        let a = self.position(first).ok_or_else(|| self.relation_missing(first))?;
        let b = self.position(second).ok_or_else(|| self.relation_missing(second))?;
        self.dishes.swap(a, b);
        self.custom_order = true;
        Ok(())
    }
}

impl<T: Named> Keyed for OwnerEntry<T> {
    type Item = T;

    fn item(&self) -> &Arc<T> {
        &self.item
    }
}

pub type DishEntry = Entry<Dish>;
pub type RestaurantEntry = Entry<restaurant_core::Restaurant>;
pub type CategoryEntry = OwnerEntry<restaurant_core::Category>;
pub type AllergenEntry = OwnerEntry<restaurant_core::Allergen>;
pub type MenuEntry = OwnerEntry<restaurant_core::Menu>;

/// Name-unique collection kept sorted by case-insensitive name.
#[derive(Debug, Clone)]
pub struct Collection<E> {
    entries: Vec<E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Keyed> Collection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry whose name matches exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut E> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    /// Like [`get_mut`](Self::get_mut) but fails with `NotFound`.
    pub(crate) fn require_mut(&mut self, name: &str) -> Result<&mut E> {
        self.get_mut(name).ok_or_else(|| not_found::<E>(name))
    }

    pub(crate) fn require(&self, name: &str) -> Result<&E> {
        self.get(name).ok_or_else(|| not_found::<E>(name))
    }

    /// Insert and re-sort. Fails if the name is taken.
    pub(crate) fn insert(&mut self, entry: E) -> Result<()> {
        if self.contains(entry.name()) {
            return Err(RestaurantError::AlreadyExists {
                kind: <E::Item as Named>::KIND,
                name: entry.name().to_string(),
            });
        }
        self.entries.push(entry);
        sort_by_name(&mut self.entries, |e| e.name());
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<E> {
        match self.position(name) {
            Some(index) => Ok(self.entries.remove(index)),
            None => Err(not_found::<E>(name)),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// The wrapped entities, in collection order.
    pub fn items(&self) -> impl Iterator<Item = Arc<E::Item>> + '_ {
        self.entries.iter().map(|e| Arc::clone(e.item()))
    }
}

fn not_found<E: Keyed>(name: &str) -> RestaurantError {
    RestaurantError::NotFound {
        kind: <E::Item as Named>::KIND,
        name: name.to_string(),
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
