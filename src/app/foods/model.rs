//! Food data model

use std::{fmt, str::FromStr};

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

/// Store-assigned identity of a food record, rendered as a 24-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoodId(ObjectId);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid food id `{0}`")]
pub struct InvalidFoodId(pub String);

impl FoodId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for FoodId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for FoodId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for FoodId {
    type Err = InvalidFoodId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidFoodId(s.to_string()))
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for FoodId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for FoodId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A stored food record as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    #[serde(rename = "_id")]
    pub id: FoodId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
}

impl Food {
    pub fn new(id: FoodId, fields: NewFood) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            category: fields.category,
            description: fields.description,
        }
    }

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &FoodPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }

    /// Case-insensitive substring match over name, category and description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Create request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewFood {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

/// Update request body. Only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FoodPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
}

impl FoodPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

impl From<NewFood> for FoodPatch {
    fn from(food: NewFood) -> Self {
        Self {
            name: Some(food.name),
            price: Some(food.price),
            category: Some(food.category),
            description: Some(food.description),
        }
    }
}
