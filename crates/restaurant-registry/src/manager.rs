//! RestaurantsManager: the five collections and their add/remove/create paths.
//!
//! Multi-item calls are not transactional: items are processed in order and
//! the first failure is returned with the earlier items already applied.

use crate::collection::{
    AllergenEntry, CategoryEntry, Collection, DishEntry, Entry, Keyed, MenuEntry, OwnerEntry,
    RestaurantEntry,
};
use crate::config::RegistryConfig;
use restaurant_core::{
    Allergen, Category, Dish, Entity, EntityKind, Menu, Named, Restaurant, RestaurantError,
    Result,
};
use std::borrow::Borrow;
use std::sync::Arc;
use tracing::debug;

/// An entity kind stored in its own registry collection.
pub trait Catalogued: Named + Clone + Sized {
    type Entry: Keyed<Item = Self>;

    fn entry(item: Arc<Self>) -> Self::Entry;

    fn collection(manager: &RestaurantsManager) -> &Collection<Self::Entry>;

    fn collection_mut(manager: &mut RestaurantsManager) -> &mut Collection<Self::Entry>;

    /// Unwrap an [`Entity`] holding this kind.
    fn from_entity(entity: Entity) -> Result<Arc<Self>>;
}

/// A kind whose entries hold a dish relation list.
pub trait DishOwner: Catalogued<Entry = OwnerEntry<Self>> {}

macro_rules! catalogued {
    ($ty:ident, $field:ident, $entry:ident, $into:ident) => {
        impl Catalogued for $ty {
            type Entry = $entry;

            fn entry(item: Arc<Self>) -> Self::Entry {
                $entry::new(item)
            }

            fn collection(manager: &RestaurantsManager) -> &Collection<Self::Entry> {
                &manager.$field
            }

            fn collection_mut(manager: &mut RestaurantsManager) -> &mut Collection<Self::Entry> {
                &mut manager.$field
            }

            fn from_entity(entity: Entity) -> Result<Arc<Self>> {
                entity.$into()
            }
        }
    };
}

catalogued!(Dish, dishes, DishEntry, into_dish);
catalogued!(Restaurant, restaurants, RestaurantEntry, into_restaurant);
catalogued!(Category, categories, CategoryEntry, into_category);
catalogued!(Allergen, allergens, AllergenEntry, into_allergen);
catalogued!(Menu, menus, MenuEntry, into_menu);

impl DishOwner for Category {}
impl DishOwner for Allergen {}
impl DishOwner for Menu {}

/// In-memory registry of a restaurant's menu taxonomy.
#[derive(Debug, Clone)]
pub struct RestaurantsManager {
    config: RegistryConfig,
    pub(crate) categories: Collection<CategoryEntry>,
    pub(crate) allergens: Collection<AllergenEntry>,
    pub(crate) menus: Collection<MenuEntry>,
    pub(crate) dishes: Collection<DishEntry>,
    pub(crate) restaurants: Collection<RestaurantEntry>,
}

impl Default for RestaurantsManager {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl RestaurantsManager {
    pub fn new(config: RegistryConfig) -> Self {
        debug!(name = %config.name, "restaurants manager created");
        Self {
            config,
            categories: Collection::new(),
            allergens: Collection::new(),
            menus: Collection::new(),
            dishes: Collection::new(),
            restaurants: Collection::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ========================================================================
    // GENERIC OPERATIONS
    // ========================================================================

    /// Register each item, failing on the first name already present.
    pub fn add_all<T, I>(&mut self, items: I) -> Result<&mut Self>
    where
        T: Catalogued,
        I: IntoIterator,
        I::Item: Into<Arc<T>>,
    {
        for item in items {
            let item: Arc<T> = item.into();
            T::collection_mut(self).insert(T::entry(Arc::clone(&item)))?;
            debug!(kind = %T::KIND, name = item.name(), "entity added");
        }
        Ok(self)
    }

    /// Remove each item by name. Relation lists still referencing a removed
    /// entry are left untouched.
    pub fn remove_all<T, I>(&mut self, items: I) -> Result<&mut Self>
    where
        T: Catalogued,
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for item in items {
            let item: &T = item.borrow();
            let name = item.name();
            T::collection_mut(self).remove(name)?;
            debug!(kind = %T::KIND, name, "entity removed");
        }
        Ok(self)
    }

    /// Return the registered entity named `name`, or build, register and
    /// return a new one. `configure` only runs when a new entity is built.
    pub fn create_with<T, F>(&mut self, name: &str, configure: F) -> Result<Arc<T>>
    where
        T: Catalogued,
        F: FnOnce(T) -> Result<T>,
    {
        if let Some(existing) = self.find::<T>(name.trim()) {
            return Ok(existing);
        }
        let built = T::from_entity(T::KIND.build(name)?)?;
        let fresh = Arc::try_unwrap(built).unwrap_or_else(|shared| (*shared).clone());
        let item = Arc::new(configure(fresh)?);
        T::collection_mut(self).insert(T::entry(Arc::clone(&item)))?;
        debug!(kind = %T::KIND, name = item.name(), "entity created");
        Ok(item)
    }

    /// Registered entity by exact name.
    pub fn find<T: Catalogued>(&self, name: &str) -> Option<Arc<T>> {
        T::collection(self).get(name).map(|e| Arc::clone(e.item()))
    }

    pub fn contains<T: Catalogued>(&self, name: &str) -> bool {
        T::collection(self).contains(name)
    }

    /// Lazy pass over a collection in name order.
    pub fn iter<'a, T>(&'a self) -> impl Iterator<Item = Arc<T>> + 'a
    where
        T: Catalogued + 'a,
        T::Entry: 'a,
    {
        T::collection(self).items()
    }

    // ========================================================================
    // DYNAMIC OPERATIONS
    // ========================================================================

    /// Add entities that must all be of `kind`.
    pub fn add<I>(&mut self, kind: EntityKind, entities: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Entity>,
    {
        for entity in entities {
            check_kind(kind, &entity)?;
            match entity {
                Entity::Dish(d) => self.add_all::<Dish, _>([d])?,
                Entity::Category(c) => self.add_all::<Category, _>([c])?,
                Entity::Allergen(a) => self.add_all::<Allergen, _>([a])?,
                Entity::Menu(m) => self.add_all::<Menu, _>([m])?,
                Entity::Restaurant(r) => self.add_all::<Restaurant, _>([r])?,
            };
        }
        Ok(self)
    }

    /// Remove entities that must all be of `kind`.
    pub fn remove<I>(&mut self, kind: EntityKind, entities: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Entity>,
    {
        for entity in entities {
            check_kind(kind, &entity)?;
            match entity {
                Entity::Dish(d) => self.remove_all::<Dish, _>([d])?,
                Entity::Category(c) => self.remove_all::<Category, _>([c])?,
                Entity::Allergen(a) => self.remove_all::<Allergen, _>([a])?,
                Entity::Menu(m) => self.remove_all::<Menu, _>([m])?,
                Entity::Restaurant(r) => self.remove_all::<Restaurant, _>([r])?,
            };
        }
        Ok(self)
    }

    /// Registered entity of `kind` named `name`.
    pub fn get(&self, kind: EntityKind, name: &str) -> Option<Entity> {
        match kind {
            EntityKind::Dish => self.find::<Dish>(name).map(Entity::from),
            EntityKind::Category => self.find::<Category>(name).map(Entity::from),
            EntityKind::Allergen => self.find::<Allergen>(name).map(Entity::from),
            EntityKind::Menu => self.find::<Menu>(name).map(Entity::from),
            EntityKind::Restaurant => self.find::<Restaurant>(name).map(Entity::from),
        }
    }

    /// Create-or-fetch by kind tag. Same name and kind always yield the
    /// same instance.
    pub fn create(&mut self, name: &str, kind: EntityKind) -> Result<Entity> {
        if let Some(existing) = self.get(kind, name.trim()) {
            return Ok(existing);
        }
        let entity = kind.build(name)?;
        self.add(kind, [entity.clone()])?;
        Ok(entity)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Dish => self.dishes.len(),
            EntityKind::Category => self.categories.len(),
            EntityKind::Allergen => self.allergens.len(),
            EntityKind::Menu => self.menus.len(),
            EntityKind::Restaurant => self.restaurants.len(),
        }
    }

    // ========================================================================
    // TYPED OPERATIONS
    // ========================================================================

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
        self.create_with(name, Ok)
    }

    pub fn create_category(&mut self, name: &str) -> Result<Arc<Category>> {
        self.create_with(name, Ok)
    }

    pub fn create_allergen(&mut self, name: &str) -> Result<Arc<Allergen>> {
        self.create_with(name, Ok)
    }

    pub fn create_menu(&mut self, name: &str) -> Result<Arc<Menu>> {
        self.create_with(name, Ok)
    }

    pub fn create_restaurant(&mut self, name: &str) -> Result<Arc<Restaurant>> {
        self.create_with(name, Ok)
    }

    pub fn dish(&self, name: &str) -> Option<Arc<Dish>> {
        self.find(name)
    }

    pub fn category(&self, name: &str) -> Option<Arc<Category>> {
        self.find(name)
    }

    pub fn allergen(&self, name: &str) -> Option<Arc<Allergen>> {
        self.find(name)
    }

    pub fn menu(&self, name: &str) -> Option<Arc<Menu>> {
        self.find(name)
    }

    pub fn restaurant(&self, name: &str) -> Option<Arc<Restaurant>> {
        self.find(name)
    }

    pub fn restaurants(&self) -> impl Iterator<Item = Arc<Restaurant>> + '_ {
        self.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = Arc<Category>> + '_ {
        self.iter()
    }

    pub fn allergens(&self) -> impl Iterator<Item = Arc<Allergen>> + '_ {
        self.iter()
    }

    pub fn menus(&self) -> impl Iterator<Item = Arc<Menu>> + '_ {
        self.iter()
    }

    pub fn dishes(&self) -> impl Iterator<Item = Arc<Dish>> + '_ {
        self.iter()
    }

    /// Entry of an owner, with its relation list.
    pub fn owner_entry<T: DishOwner>(&self, name: &str) -> Option<&OwnerEntry<T>> {
        T::collection(self).get(name)
    }

    /// Entry of a dish or restaurant.
    pub fn entry<T>(&self, name: &str) -> Option<&Entry<T>>
    where
        T: Catalogued<Entry = Entry<T>>,
    {
        T::collection(self).get(name)
    }
}

fn check_kind(expected: EntityKind, entity: &Entity) -> Result<()> {
    if entity.kind() != expected {
        return Err(RestaurantError::TypeMismatch {
            expected,
            found: entity.kind(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> RestaurantsManager {
        RestaurantsManager::default()
    }

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn names<T: Named>(items: impl Iterator<Item = Arc<T>>) -> Vec<String> {
        items.map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn test_add_is_chainable_and_sorted() {
        let mut m = manager();
        m.add_categories([category("Postres"), category("carnes")])
            .unwrap()
            .add_categories([category("Arroces")])
            .unwrap();
        assert_eq!(names(m.categories()), vec!["Arroces", "carnes", "Postres"]);
    }

    #[test]
    fn test_add_duplicate_keeps_size() {
        let mut m = manager();
        m.add_categories([category("Postres")]).unwrap();
        let err = m.add_categories([category("Postres")]).unwrap_err();
        assert_eq!(
            err,
            RestaurantError::AlreadyExists {
                kind: EntityKind::Category,
                name: "Postres".to_string(),
            }
        );
        assert_eq!(m.count(EntityKind::Category), 1);
    }

    #[test]
    fn test_partial_failure_is_not_rolled_back() {
        let mut m = manager();
        m.add_categories([category("B")]).unwrap();
        let result = m.add_categories([category("A"), category("B"), category("C")]);
        assert!(result.is_err());
        assert_eq!(names(m.categories()), vec!["A", "B"]);
    }

    #[test]
    fn test_remove() {
        let mut m = manager();
        let postres = Arc::new(category("Postres"));
        m.add_categories([Arc::clone(&postres)]).unwrap();
        m.remove_categories([&*postres]).unwrap();
        assert_eq!(m.count(EntityKind::Category), 0);

        let err = m.remove_categories([postres]).unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound { kind: EntityKind::Category, .. }));
    }

    #[test]
    fn test_dynamic_add_rejects_wrong_kind() {
        let mut m = manager();
        let err = m
            .add(EntityKind::Dish, [Entity::from(category("Postres"))])
            .unwrap_err();
        assert_eq!(
            err,
            RestaurantError::TypeMismatch {
                expected: EntityKind::Dish,
                found: EntityKind::Category,
            }
        );
        assert_eq!(m.count(EntityKind::Dish), 0);
        assert_eq!(m.count(EntityKind::Category), 0);
    }

    #[test]
    fn test_dynamic_remove() {
        let mut m = manager();
        let menu = m.create("Menu del día", EntityKind::Menu).unwrap();
        assert!(m.remove(EntityKind::Restaurant, [menu.clone()]).is_err());
        m.remove(EntityKind::Menu, [menu]).unwrap();
        assert_eq!(m.count(EntityKind::Menu), 0);
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut m = manager();
        let first = m.create_dish("Cocido").unwrap();
        let second = m.create_dish("Cocido").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(m.count(EntityKind::Dish), 1);
    }

    #[test]
    fn test_create_by_kind_is_idempotent() {
        let mut m = manager();
        for kind in EntityKind::ALL {
            let first = m.create("Nombre", kind).unwrap();
            let second = m.create(" Nombre ", kind).unwrap();
            assert!(first.same_instance(&second), "{} not idempotent", kind);
            assert_eq!(first.kind(), kind);
            assert_eq!(m.count(kind), 1);
        }
    }

    #[test]
    fn test_create_with_ignores_configure_for_existing() {
        let mut m = manager();
        let created = m
            .create_with("Cocido", |d: Dish| Ok(d.with_description("Madrileño")))
            .unwrap();
        assert_eq!(created.description(), "Madrileño");

        let fetched = m
            .create_with("Cocido", |d: Dish| Ok(d.with_description("Otro")))
            .unwrap();
        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(fetched.description(), "Madrileño");
    }

    #[test]
    fn test_create_empty_name() {
        let mut m = manager();
        assert_eq!(
            m.create_menu("  ").unwrap_err(),
            RestaurantError::empty("name")
        );
    }

    #[test]
    fn test_create_returns_previously_added_instance() {
        let mut m = manager();
        let restaurant = Arc::new(Restaurant::new("Casa Lucio").unwrap());
        m.add_restaurants([Arc::clone(&restaurant)]).unwrap();
        let fetched = m.create_restaurant("Casa Lucio").unwrap();
        assert!(Arc::ptr_eq(&restaurant, &fetched));
    }

    #[test]
    fn test_lookups() {
        let mut m = manager();
        m.create_allergen("Gluten").unwrap();
        assert!(m.allergen("Gluten").is_some());
        assert!(m.allergen("gluten").is_none());
        assert!(m.contains::<Allergen>("Gluten"));
        assert!(m.owner_entry::<Allergen>("Gluten").unwrap().dishes().is_empty());
        assert!(m.entry::<Dish>("Gluten").is_none());
    }
}
