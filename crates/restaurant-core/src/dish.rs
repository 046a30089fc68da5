//! Dish: the only entity with ingredients and an image.
use crate::error::{RestaurantError, Result};
use crate::kind::{clean_name, EntityKind, Named};
use crate::validation::validate_image;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDish")]
pub struct Dish {
    name: String,
    description: String,
    ingredients: Vec<String>,
    image: String,
}

/// Wire form of a dish; only becomes a `Dish` through the field rules.
#[derive(Deserialize)]
struct RawDish {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    image: String,
}

impl TryFrom<RawDish> for Dish {
    type Error = RestaurantError;

    fn try_from(raw: RawDish) -> Result<Self> {
        let mut dish = Dish::new(&raw.name)?
            .with_description(raw.description)
            .with_ingredients(raw.ingredients);
        // an absent image stays empty; anything else must be a valid reference
        if !raw.image.is_empty() {
            dish.set_image(&raw.image)?;
        }
        Ok(dish)
    }
}

impl Dish {
    /// Create a dish. Only the name is mandatory.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: clean_name(name)?,
            description: String::new(),
            ingredients: Vec::new(),
            image: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, url: &str) -> Result<Self> {
        self.set_image(url)?;
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ingredients in the order they were given.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn set_name(&mut self, value: &str) -> Result<()> {
        self.name = clean_name(value)?;
        Ok(())
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_ingredients<I, S>(&mut self, ingredients: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
    }

    /// Replace the image. Must be an http(s) URL or a relative path.
    pub fn set_image(&mut self, url: &str) -> Result<()> {
        validate_image(url)?;
        self.image = url.to_string();
        Ok(())
    }
}

impl Named for Dish {
    const KIND: EntityKind = EntityKind::Dish;

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dish name: {}, Description: {}, Image: {}, Ingredients: {}",
            self.name,
            self.description,
            self.image,
            self.ingredients.join(",")
        )
    }
}
