//! Serializable read-only view of the registry, for diagnostics.
use crate::collection::{Collection, Keyed, OwnerEntry};
use crate::manager::RestaurantsManager;
use restaurant_core::Named;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OwnerSnapshot {
    pub name: String,
    pub description: String,
    /// Linked dish names, in list order
    pub dishes: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub custom_order: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub name: String,
    pub categories: Vec<OwnerSnapshot>,
    pub allergens: Vec<OwnerSnapshot>,
    pub menus: Vec<OwnerSnapshot>,
    pub dishes: Vec<String>,
    pub restaurants: Vec<String>,
}

fn names<E: Keyed>(collection: &Collection<E>) -> Vec<String> {
    collection.iter().map(|entry| entry.name().to_string()).collect()
}

fn owners<T, F>(collection: &Collection<OwnerEntry<T>>, description: F) -> Vec<OwnerSnapshot>
where
    T: Named,
    F: Fn(&T) -> &str,
{
    collection
        .iter()
        .map(|entry| OwnerSnapshot {
            name: entry.name().to_string(),
            description: description(entry.item()).to_string(),
            dishes: entry.dishes().iter().map(|d| d.name().to_string()).collect(),
            custom_order: entry.has_custom_order(),
        })
        .collect()
}

impl RestaurantsManager {
    /// Capture names and relation lists of every collection.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            name: self.name().to_string(),
            categories: owners(&self.categories, |c| c.description()),
            allergens: owners(&self.allergens, |a| a.description()),
            menus: owners(&self.menus, |m| m.description()),
            dishes: names(&self.dishes),
            restaurants: names(&self.restaurants),
        }
    }

    /// Snapshot rendered as pretty JSON.
    pub fn to_json(&self) -> restaurant_core::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| restaurant_core::RestaurantError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_core::{Category, Dish, Menu};
    use std::sync::Arc;

    #[test]
    fn test_snapshot_contents() {
        let mut m = RestaurantsManager::default();
        let menu = Menu::new("Menu del día").unwrap();
        let a = Arc::new(Dish::new("Gazpacho").unwrap());
        let b = Arc::new(Dish::new("Paella").unwrap());
        m.assign_dish_to_menu(menu.clone(), [Arc::clone(&a), Arc::clone(&b)])
            .unwrap()
            .assign_category_to_dish(
                Category::new("Arroces").unwrap().with_description("Con arroz"),
                [Arc::clone(&b)],
            )
            .unwrap()
            .change_dishes_positions_in_menu(&menu, &a, &b)
            .unwrap();

        let snapshot = m.snapshot();
        assert_eq!(snapshot.name, "Restaurants Manager");
        assert_eq!(snapshot.categories[0].description, "Con arroz");
        assert_eq!(snapshot.menus[0].dishes, vec!["Paella", "Gazpacho"]);
        assert!(snapshot.menus[0].custom_order);
        assert_eq!(snapshot.dishes, vec!["Gazpacho", "Paella"]);
    }

    #[test]
    fn test_to_json() {
        let mut m = RestaurantsManager::default();
        m.create_restaurant("Casa Lucio").unwrap();
        let json = m.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["restaurants"][0], "Casa Lucio");
        assert!(value["categories"].as_array().unwrap().is_empty());
    }
}
