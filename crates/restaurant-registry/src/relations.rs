//! Dish relations: category, allergen and menu membership.
//!
//! Assigning auto-registers both the owner and the dishes. Every linked dish
//! is the canonical `Arc` from the dish collection, never a copy. Reads
//! return sorted copies and leave the relation lists as they are.

use crate::collection::Keyed;
use crate::manager::{DishOwner, RestaurantsManager};
use crate::ordering::by_name;
use restaurant_core::{Allergen, Category, Dish, Menu, Named, Result};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;
use std::vec;
use tracing::{debug, trace};

impl RestaurantsManager {
    /// Registered instance of `dish`, registering it first if needed.
    fn canonical_dish(&mut self, dish: Arc<Dish>) -> Result<Arc<Dish>> {
        if let Some(existing) = self.find::<Dish>(dish.name()) {
            return Ok(existing);
        }
        self.add_all::<Dish, _>([Arc::clone(&dish)])?;
        Ok(dish)
    }

    /// Link `dishes` to `owner`, registering the owner and any new dish.
    pub fn assign<T, D, I>(&mut self, owner: D, dishes: I) -> Result<&mut Self>
    where
        T: DishOwner,
        D: Into<Arc<T>>,
        I: IntoIterator,
        I::Item: Into<Arc<Dish>>,
    {
        let owner: Arc<T> = owner.into();
        let owner_name = owner.name().to_string();
        if !T::collection(self).contains(&owner_name) {
            self.add_all::<T, _>([owner])?;
        }
        for dish in dishes {
            let dish = self.canonical_dish(dish.into())?;
            let dish_name = dish.name().to_string();
            T::collection_mut(self)
                .require_mut(&owner_name)?
                .link(dish)?;
            debug!(kind = %T::KIND, owner = %owner_name, dish = %dish_name, "dish linked");
        }
        Ok(self)
    }

    /// Unlink `dishes` from an already registered `owner`.
    pub fn unassign<T, I>(&mut self, owner: &T, dishes: I) -> Result<&mut Self>
    where
        T: DishOwner,
        I: IntoIterator,
        I::Item: Borrow<Dish>,
    {
        let entry = T::collection_mut(self).require_mut(owner.name())?;
        for dish in dishes {
            let dish: &Dish = dish.borrow();
            entry.unlink(dish.name())?;
            debug!(kind = %T::KIND, owner = owner.name(), dish = dish.name(), "dish unlinked");
        }
        Ok(self)
    }

    /// Sorted copy of the dishes linked to `owner`.
    pub fn dishes_of<T, F>(&self, owner: &T, compare: F) -> Result<vec::IntoIter<Arc<Dish>>>
    where
        T: DishOwner,
        F: FnMut(&Dish, &Dish) -> Ordering,
    {
        let mut compare = compare;
        let entry = T::collection(self).require(owner.name())?;
        let mut dishes = entry.dishes().to_vec();
        dishes.sort_by(|a, b| compare(a, b));
        trace!(kind = %T::KIND, owner = owner.name(), count = dishes.len(), "dishes listed");
        Ok(dishes.into_iter())
    }

    /// Owners of kind `T` whose relation list contains `dish`. Scans every
    /// owner; no back-references are kept on the dish.
    pub fn owners_of<T: DishOwner>(&self, dish: &Dish) -> Vec<Arc<T>> {
        T::collection(self)
            .iter()
            .filter(|entry| entry.contains(dish.name()))
            .map(|entry| Arc::clone(entry.item()))
            .collect()
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

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

    /// Dishes in `category`, by name.
    pub fn dishes_in_category(&self, category: &Category) -> Result<vec::IntoIter<Arc<Dish>>> {
        self.dishes_of(category, by_name::<Dish>)
    }

    pub fn dishes_in_category_by<F>(
        &self,
        category: &Category,
        compare: F,
    ) -> Result<vec::IntoIter<Arc<Dish>>>
    where
        F: FnMut(&Dish, &Dish) -> Ordering,
    {
        self.dishes_of(category, compare)
    }

    pub fn dish_categories(&self, dish: &Dish) -> Vec<Arc<Category>> {
        self.owners_of(dish)
    }

    // ========================================================================
    // ALLERGENS
    // ========================================================================

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

    /// Dishes containing `allergen`, by name.
    pub fn dishes_with_allergen(&self, allergen: &Allergen) -> Result<vec::IntoIter<Arc<Dish>>> {
        self.dishes_of(allergen, by_name::<Dish>)
    }

    pub fn dishes_with_allergen_by<F>(
        &self,
        allergen: &Allergen,
        compare: F,
    ) -> Result<vec::IntoIter<Arc<Dish>>>
    where
        F: FnMut(&Dish, &Dish) -> Ordering,
    {
        self.dishes_of(allergen, compare)
    }

    pub fn dish_allergens(&self, dish: &Dish) -> Vec<Arc<Allergen>> {
        self.owners_of(dish)
    }

    // ========================================================================
    // MENUS
    // ========================================================================

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

    /// Swap two dishes of `menu`. From then on the menu keeps the order set
    /// by hand and new dishes are appended.
    pub fn change_dishes_positions_in_menu(
        &mut self,
        menu: &Menu,
        first: &Dish,
        second: &Dish,
    ) -> Result<&mut Self> {
        self.menus
            .require_mut(menu.name())?
            .swap(first.name(), second.name())?;
        debug!(
            menu = menu.name(),
            first = first.name(),
            second = second.name(),
            "menu dishes swapped"
        );
        Ok(self)
    }

    /// Dishes of `menu` in the menu's own order.
    pub fn dishes_in_menu(&self, menu: &Menu) -> Result<vec::IntoIter<Arc<Dish>>> {
        let entry = self.menus.require(menu.name())?;
        Ok(entry.dishes().to_vec().into_iter())
    }

    pub fn dish_menus(&self, dish: &Dish) -> Vec<Arc<Menu>> {
        self.owners_of(dish)
    }

    // ========================================================================
    // INGREDIENTS
    // ========================================================================

    /// Ingredients of `dish` starting with the configured prefix, sorted.
    pub fn find_dishes(&self, dish: &Dish) -> vec::IntoIter<String> {
        let prefix = self.config().ingredient_prefix.as_str();
        self.find_dishes_by(dish, |a, b| a.cmp(b), |i| i.starts_with(prefix))
    }

    /// Ingredients of `dish` kept by `filter`, sorted with `compare`.
    pub fn find_dishes_by<C, P>(&self, dish: &Dish, compare: C, filter: P) -> vec::IntoIter<String>
    where
        C: FnMut(&String, &String) -> Ordering,
        P: FnMut(&String) -> bool,
    {
        let mut filter = filter;
        let mut ingredients: Vec<String> = dish
            .ingredients()
            .iter()
            .filter(|i| filter(i))
            .cloned()
            .collect();
        ingredients.sort_by(compare);
        ingredients.into_iter()
    }
}
