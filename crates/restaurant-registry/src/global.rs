//! Process-wide registry instance.
//!
//! Built lazily from [`RegistryConfig::from_env`] on first access and shared
//! behind one lock: every caller, reader or writer, goes through the same
//! mutex. Code that can take the registry by reference should prefer an
//! explicit [`RestaurantsManager::new`] instead.
//!
//! The instance itself is fixed once built. A [`RegistryGuard`] derefs to the
//! manager for reads and forwards only the registry operations, so the
//! collections change through those operations and the manager is never
//! replaced:
//!
//! ```compile_fail
//! use restaurant_registry::{RegistryConfig, RestaurantsManager};
//!
//! RestaurantsManager::with_global(|m| {
//!     **m = RestaurantsManager::new(RegistryConfig::default());
//! });
//! ```

use crate::config::RegistryConfig;
use crate::manager::{Catalogued, DishOwner, RestaurantsManager};
use once_cell::sync::Lazy;
use restaurant_core::{Allergen, Category, Dish, Entity, EntityKind, Menu, Restaurant, Result};
use std::borrow::Borrow;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The lock around the one process-wide manager.
pub struct GlobalRegistry {
    inner: Mutex<RestaurantsManager>,
}

static INSTANCE: Lazy<GlobalRegistry> = Lazy::new(|| {
    let config = RegistryConfig::from_env();
    tracing::info!(name = %config.name, "global restaurants manager initialized");
    GlobalRegistry {
        inner: Mutex::new(RestaurantsManager::new(config)),
    }
});

impl GlobalRegistry {
    /// Take the lock. A poisoned lock is recovered: every operation leaves
    /// the collections structurally valid even when it fails halfway.
    pub fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            guard: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Exclusive access to the process-wide manager.
pub struct RegistryGuard<'a> {
    guard: MutexGuard<'a, RestaurantsManager>,
}

impl Deref for RegistryGuard<'_> {
    type Target = RestaurantsManager;

    fn deref(&self) -> &RestaurantsManager {
        &self.guard
    }
}

impl RegistryGuard<'_> {
    pub fn add_all<T, I>(&mut self, items: I) -> Result<&mut Self>
    where
        T: Catalogued,
        I: IntoIterator,
        I::Item: Into<Arc<T>>,
    {
        self.guard.add_all::<T, I>(items)?;
        Ok(self)
    }

    pub fn remove_all<T, I>(&mut self, items: I) -> Result<&mut Self>
    where
        T: Catalogued,
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.guard.remove_all::<T, I>(items)?;
        Ok(self)
    }

    pub fn create_with<T, F>(&mut self, name: &str, configure: F) -> Result<Arc<T>>
    where
        T: Catalogued,
        F: FnOnce(T) -> Result<T>,
    {
        self.guard.create_with(name, configure)
    }

    pub fn add<I>(&mut self, kind: EntityKind, entities: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Entity>,
    {
        self.guard.add(kind, entities)?;
        Ok(self)
    }

    pub fn remove<I>(&mut self, kind: EntityKind, entities: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Entity>,
    {
        self.guard.remove(kind, entities)?;
        Ok(self)
    }

    pub fn create(&mut self, name: &str, kind: EntityKind) -> Result<Entity> {
        self.guard.create(name, kind)
    }

    pub fn add_categories<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Category>>,
    {
        self.add_all::<Category, I>(items)
    }

    pub fn add_allergens<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Allergen>>,
    {
        self.add_all::<Allergen, I>(items)
    }

    pub fn add_menus<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Menu>>,
    {
        self.add_all::<Menu, I>(items)
    }

    pub fn add_dishes<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        self.add_all::<Dish, I>(items)
    }

    pub fn add_restaurants<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Restaurant>>,
    {
        self.add_all::<Restaurant, I>(items)
    }

    pub fn remove_categories<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Category>,
    {
        self.remove_all::<Category, I>(items)
    }

    pub fn remove_allergens<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Allergen>,
    {
        self.remove_all::<Allergen, I>(items)
    }

    pub fn remove_menus<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Menu>,
    {
        self.remove_all::<Menu, I>(items)
    }

    pub fn remove_dishes<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        self.remove_all::<Dish, I>(items)
    }

    pub fn remove_restaurants<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Restaurant>,
    {
        self.remove_all::<Restaurant, I>(items)
    }

    pub fn create_dish(&mut self, name: &str) -> Result<Arc<Dish>> {
        self.guard.create_dish(name)
    }

    pub fn create_category(&mut self, name: &str) -> Result<Arc<Category>> {
        self.guard.create_category(name)
    }

    pub fn create_allergen(&mut self, name: &str) -> Result<Arc<Allergen>> {
        self.guard.create_allergen(name)
    }

    pub fn create_menu(&mut self, name: &str) -> Result<Arc<Menu>> {
        self.guard.create_menu(name)
    }

    pub fn create_restaurant(&mut self, name: &str) -> Result<Arc<Restaurant>> {
        self.guard.create_restaurant(name)
    }

    pub fn assign<T, D, I>(&mut self, owner: D, dishes: I) -> Result<&mut Self>
    where
        T: DishOwner,
        D: Into<Arc<T>>,
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        self.guard.assign::<T, D, I>(owner, dishes)?;
        Ok(self)
    }

    pub fn unassign<T, I>(&mut self, owner: &T, dishes: I) -> Result<&mut Self>
    where
        T: DishOwner,
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        self.guard.unassign(owner, dishes)?;
        Ok(self)
    }

    pub fn assign_category_to_dish<D, I>(&mut self, category: D, dishes: I) -> Result<&mut Self>
    where
        D: Into<Arc<Category>>,
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        self.assign::<Category, D, I>(category, dishes)
    }

    pub fn unassign_category_from_dish<I>(
        &mut self,
        category: &Category,
        dishes: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        self.unassign(category, dishes)
    }

    pub fn assign_allergen_to_dish<D, I>(&mut self, allergen: D, dishes: I) -> Result<&mut Self>
    where
        D: Into<Arc<Allergen>>,
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        self.assign::<Allergen, D, I>(allergen, dishes)
    }

    pub fn unassign_allergen_from_dish<I>(
        &mut self,
        allergen: &Allergen,
        dishes: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        self.unassign(allergen, dishes)
    }

    pub fn assign_dish_to_menu<D, I>(&mut self, menu: D, dishes: I) -> Result<&mut Self>
    where
        D: Into<Arc<Menu>>,
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        self.assign::<Menu, D, I>(menu, dishes)
    }

    pub fn unassign_dish_from_menu<I>(&mut self, menu: &Menu, dishes: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        self.unassign(menu, dishes)
    }

    pub fn change_dishes_positions_in_menu(
        &mut self,
        menu: &Menu,
        first: &Dish,
        second: &Dish,
    ) -> Result<&mut Self> {
        self.guard.change_dishes_positions_in_menu(menu, first, second)?;
        Ok(self)
    }
}

impl RestaurantsManager {
    /// The single process-wide registry.
    pub fn global() -> &'static GlobalRegistry {
        &INSTANCE
    }

    /// Lock the process-wide registry.
    pub fn lock_global() -> RegistryGuard<'static> {
        INSTANCE.lock()
    }

    /// Run `f` with exclusive access to the process-wide registry.
    pub fn with_global<R, F>(f: F) -> R
    where
        F: FnOnce(&mut RegistryGuard<'static>) -> R,
    {
        let mut guard = Self::lock_global();
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_core::Named;
    use std::thread;

    #[test]
    fn test_global_is_single_instance() {
        let a = RestaurantsManager::global() as *const _;
        let b = RestaurantsManager::global() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_global_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    RestaurantsManager::with_global(|m| {
                        m.create_category("global::Compartida").map(|c| c.name().to_string())
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "global::Compartida");
        }
        let guard = RestaurantsManager::lock_global();
        assert!(guard.category("global::Compartida").is_some());
    }

    #[test]
    fn test_guard_chains_operations() {
        let mut guard = RestaurantsManager::lock_global();
        let menu = Menu::new("global::Menu encadenado").unwrap();
        let a = Arc::new(Dish::new("global::Encadenado A").unwrap());
        let b = Arc::new(Dish::new("global::Encadenado B").unwrap());
        guard
            .assign_dish_to_menu(menu.clone(), [Arc::clone(&a), Arc::clone(&b)])
            .unwrap()
            .change_dishes_positions_in_menu(&menu, &a, &b)
            .unwrap();

        let names: Vec<_> = guard
            .dishes_in_menu(&menu)
            .unwrap()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["global::Encadenado B", "global::Encadenado A"]);
    }
}
