use std::collections::BTreeSet;

use crate::contact::{ContactInput, Field};
use crate::validation::{self, FieldErrors};

/// Caller-owned state of the contact form. Decides when errors are shown;
/// all checks go through [`validation::validate`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: ContactInput,
    touched: BTreeSet<Field>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_input(values: ContactInput) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// A keystroke. Hides a stale error for the edited field.
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.remove(&field);
    }

    /// Focus left `field`: surface its error, if any.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        if let Some(err) = validation::validate(&self.values).remove(&field) {
            self.errors.insert(field, err);
        }
    }

    /// Populates the full error set. Returns the values only if they may be sent.
    pub fn submit(&mut self) -> Option<ContactInput> {
        self.errors = validation::validate(&self.values);
        self.touched.extend(Field::REQUIRED);

        validation::is_valid(&self.errors).then(|| self.values.clone())
    }

    pub fn current_errors(&self) -> FieldErrors {
        validation::validate(&self.values)
    }

    /// Submit button gating, recomputed from the current values.
    pub fn can_submit(&self) -> bool {
        validation::is_valid(&self.current_errors())
            && Field::REQUIRED
                .iter()
                .all(|f| !self.values.get(*f).trim().is_empty())
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
