//! Ordering helpers shared by every collection and relation list.
use restaurant_core::Named;
use std::cmp::Ordering;

/// Case-insensitive name comparison. Lower-cases both sides and compares
/// them as plain strings; no locale collation.
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Default comparator for any named entity.
pub fn by_name<T: Named + ?Sized>(a: &T, b: &T) -> Ordering {
    cmp_names(a.name(), b.name())
}

/// Sort `items` by name. Stable, so case-insensitive ties keep their
/// relative insertion order.
pub(crate) fn sort_by_name<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| cmp_names(name_of(a), name_of(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_names_ignores_case() {
        assert_eq!(cmp_names("pollo", "Pollo"), Ordering::Equal);
        assert_eq!(cmp_names("arroz", "Berenjena"), Ordering::Less);
        assert_eq!(cmp_names("Zanahoria", "apio"), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut names = vec!["b", "Apple", "apple", "APPLE", "a"];
        sort_by_name(&mut names, |n| *n);
        assert_eq!(names, vec!["a", "Apple", "apple", "APPLE", "b"]);
    }
}
