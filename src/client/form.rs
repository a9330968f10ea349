//! Create/edit form state
//!
//! The form is bound to at most one record. Its state is derived from the
//! fields, the selected record and whether a submission is in flight:
//!
//! - `Idle`: empty, nothing selected
//! - `Composing`: some text typed, nothing selected
//! - `Editing`: a record loaded via selection
//! - `Submitting`: request in flight, edits refused

use std::fmt;

use crate::app::foods::model::{Food, FoodId, FoodPatch, NewFood};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Category,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Category => "category",
            Field::Description => "description",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Composing,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("{0} is required")]
    Missing(Field),

    #[error("price `{0}` is not a number")]
    InvalidPrice(String),
}

/// Raw text inputs. Price stays text until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
}

impl FormFields {
    fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.price.is_empty()
            && self.category.is_empty()
            && self.description.is_empty()
    }

    fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Category => &self.category,
            Field::Description => &self.description,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Category => &mut self.category,
            Field::Description => &mut self.description,
        }
    }
}

impl From<&Food> for FormFields {
    fn from(food: &Food) -> Self {
        Self {
            name: food.name.clone(),
            price: food.price.to_string(),
            category: food.category.clone(),
            description: food.description.clone(),
        }
    }
}

/// What a submission should send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewFood),
    Update(FoodId, FoodPatch),
}

#[derive(Debug, Clone, Default)]
pub struct FoodForm {
    fields: FormFields,
    editing: Option<FoodId>,
    submitting: bool,
}

impl FoodForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        if self.submitting {
            FormState::Submitting
        } else if self.editing.is_some() {
            FormState::Editing
        } else if self.fields.is_blank() {
            FormState::Idle
        } else {
            FormState::Composing
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn editing(&self) -> Option<FoodId> {
        self.editing
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_idle()?;
        *self.fields.get_mut(field) = value.into();
        Ok(())
    }

    /// Loads `food` into the form for editing.
    pub fn edit(&mut self, food: &Food) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.fields = FormFields::from(food);
        self.editing = Some(food.id);
        Ok(())
    }

    /// Drops the selection and clears the fields.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.reset();
        Ok(())
    }

    /// Checks the fields and enters `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        self.ensure_idle()?;

        for field in [Field::Name, Field::Price, Field::Category, Field::Description] {
            if self.fields.get(field).trim().is_empty() {
                return Err(FormError::Missing(field));
            }
        }
        let price = self
            .fields
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.fields.price.clone()))?;

        let food = NewFood {
            name: self.fields.name.clone(),
            price,
            category: self.fields.category.clone(),
            description: self.fields.description.clone(),
        };
        self.submitting = true;

        Ok(match self.editing {
            Some(id) => Submission::Update(id, FoodPatch::from(food)),
            None => Submission::Create(food),
        })
    }

    /// Leaves `Submitting`. Success clears the form; failure keeps it for a retry.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.editing = None;
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        if self.submitting {
            Err(FormError::Busy)
        } else {
            Ok(())
        }
    }
}
