use criterion::{black_box, criterion_group, criterion_main, Criterion};
use restaurant_core::{Category, Dish, Menu};
use restaurant_registry::{RegistryConfig, RestaurantsManager};
use std::sync::Arc;

fn dishes(count: usize) -> Vec<Arc<Dish>> {
    (0..count)
        .map(|i| Arc::new(Dish::new(&format!("Plato {:04}", count - i)).unwrap()))
        .collect()
}

fn bench_add_dishes(c: &mut Criterion) {
    let input = dishes(200);
    c.bench_function("add_dishes_200", |b| {
        b.iter(|| {
            let mut m = RestaurantsManager::new(RegistryConfig::default());
            m.add_dishes(input.iter().cloned()).unwrap();
            black_box(m.count(restaurant_core::EntityKind::Dish))
        })
    });
}

fn bench_assign_and_query(c: &mut Criterion) {
    let input = dishes(200);
    c.bench_function("assign_category_200", |b| {
        b.iter(|| {
            let mut m = RestaurantsManager::new(RegistryConfig::default());
            let category = Category::new("Principales").unwrap();
            m.assign_category_to_dish(category, input.iter().cloned()).unwrap();
            black_box(m)
        })
    });

    let mut m = RestaurantsManager::new(RegistryConfig::default());
    let category = Category::new("Principales").unwrap();
    m.assign_category_to_dish(category.clone(), input.iter().cloned())
        .unwrap();
    c.bench_function("dishes_in_category_200", |b| {
        b.iter(|| black_box(m.dishes_in_category(&category).unwrap().count()))
    });
}

fn bench_menu_swap(c: &mut Criterion) {
    let input = dishes(50);
    let mut m = RestaurantsManager::new(RegistryConfig::default());
    let menu = Menu::new("Degustación").unwrap();
    m.assign_dish_to_menu(menu.clone(), input.iter().cloned()).unwrap();
    let (first, last) = (&input[0], &input[input.len() - 1]);
    c.bench_function("menu_swap_50", |b| {
        b.iter(|| {
            m.change_dishes_positions_in_menu(&menu, first, last).unwrap();
        })
    });
}

criterion_group!(benches, bench_add_dishes, bench_assign_and_query, bench_menu_swap);
criterion_main!(benches);
