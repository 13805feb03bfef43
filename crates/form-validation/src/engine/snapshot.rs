//! Immutable views of form state delivered to subscribers.

use crate::field_map::{FieldErrors, FieldMap, FieldValues};

/// Handle returned by [`super::FormValidation::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(super) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Derived form state captured at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    values: FieldValues,
    errors: FieldErrors,
    touched: FieldMap<bool>,
    is_valid: bool,
}

impl FormSnapshot {
    pub(super) const fn new(
        values: FieldValues,
        errors: FieldErrors,
        touched: FieldMap<bool>,
        is_valid: bool,
    ) -> Self {
        Self {
            values,
            errors,
            touched,
            is_valid,
        }
    }

    /// Field values.
    #[must_use]
    pub const fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Field errors.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Touched flag per field.
    #[must_use]
    pub const fn touched(&self) -> &FieldMap<bool> {
        &self.touched
    }

    /// Aggregate validity.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Value of `field`, when declared.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Error of `field`; `None` when valid or undeclared.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(|error| error.as_deref())
    }
}
