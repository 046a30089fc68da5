//! Unified Error Model
use crate::kind::EntityKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RestaurantError {
    /// A required field was missing or blank.
    #[error("EMPTY/{field}: the value cannot be empty")]
    EmptyValue { field: &'static str },

    /// A field failed format validation.
    #[error("INVALID/{field}: '{value}' is not a valid value")]
    InvalidValue { field: &'static str, value: String },

    #[error("TYPE/{found}: the object is not a {expected}")]
    TypeMismatch { expected: EntityKind, found: EntityKind },

    #[error("EXISTS/{kind}: '{name}' already exists")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("MISSING/{kind}: '{name}' does not exist")]
    NotFound { kind: EntityKind, name: String },

    #[error("EXISTS/dish: '{dish}' already exists in {kind} '{owner}'")]
    RelationAlreadyExists {
        kind: EntityKind,
        owner: String,
        dish: String,
    },

    #[error("MISSING/dish: '{dish}' does not exist in {kind} '{owner}'")]
    RelationNotFound {
        kind: EntityKind,
        owner: String,
        dish: String,
    },

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),
}

impl RestaurantError {
    pub fn empty(field: &'static str) -> Self {
        Self::EmptyValue { field }
    }

    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RestaurantError>;
