//! Field validation shared by the entity setters.
//!
//! Images are accepted either as absolute HTTP(S) URLs or as relative paths,
//! optionally followed by a `?key=value&key=value` query.

use crate::error::{RestaurantError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Absolute http(s) URL with optional port, path and query
    static ref ABSOLUTE_URL: Regex = Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@%._+~#=]{2,256}(:\d{2,4})?(/[a-zA-Z0-9_.$%+~#]+)*(\?\w+=.*(&\w+=.+)*)?$"
    ).unwrap();

    /// Relative path, optionally rooted
    static ref RELATIVE_PATH: Regex = Regex::new(
        r"^(/?[a-zA-Z0-9_.$%+~#]+)*(\?\w+=.*(&\w+=.+)*)?$"
    ).unwrap();
}

/// Validate an image reference.
pub fn validate_image(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(RestaurantError::empty("image"));
    }
    if ABSOLUTE_URL.is_match(url) || RELATIVE_PATH.is_match(url) {
        Ok(())
    } else {
        Err(RestaurantError::invalid("image", url))
    }
}

/// Validate a latitude/longitude pair.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(RestaurantError::invalid("latitude", latitude.to_string()));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(RestaurantError::invalid("longitude", longitude.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls() {
        for url in [
            "http://example.com",
            "https://www.example.com/img/cocido.jpg",
            "https://cdn.example.com:8080/a/b.png",
            "https://example.com/img.png?size=large&format=webp",
        ] {
            assert!(validate_image(url).is_ok(), "rejected {}", url);
        }
    }

    #[test]
    fn test_relative_paths() {
        for url in ["img/cocido.jpg", "/static/dish_1.png", "cocido.jpg?v=2"] {
            assert!(validate_image(url).is_ok(), "rejected {}", url);
        }
    }

    #[test]
    fn test_invalid_images() {
        for url in ["ftp://example.com/a.png", "img/with space.png", "a//b", "<script>"] {
            assert_eq!(
                validate_image(url),
                Err(RestaurantError::invalid("image", url)),
                "accepted {}",
                url
            );
        }
    }

    #[test]
    fn test_blank_image() {
        assert_eq!(validate_image("  "), Err(RestaurantError::empty("image")));
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_coordinate(40.4168, -3.7038).is_ok());
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(91.0, 0.0).is_err());
        assert!(validate_coordinate(0.0, -180.5).is_err());
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
    }
}
