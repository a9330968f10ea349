//! Success response bodies

use serde::{Deserialize, Serialize};

use crate::app::foods::model::{FoodId, FoodPatch};

pub const FOOD_DELETED: &str = "Food deleted";

/// Plain acknowledgement, e.g. `{"message": "Food deleted"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Update acknowledgement: the id plus the submitted fields only, not the
/// merged document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedFood {
    #[serde(rename = "_id")]
    pub id: FoodId,
    #[serde(flatten)]
    pub fields: FoodPatch,
}
