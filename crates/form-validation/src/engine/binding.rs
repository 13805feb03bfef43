//! Field bindings handed to input controls.

use super::{FormValidation, StateChange};
use crate::rule::ValidationRule;

/// Raw input change delivered by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    value: String,
}

impl ChangeEvent {
    /// Wrap the control's new raw value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// New raw value carried by the event.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    fn into_value(self) -> String {
        self.value
    }
}

impl From<&str> for ChangeEvent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ChangeEvent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Value plus change/blur handlers for one field, as returned by
/// [`FormValidation::register`].
///
/// `value` is captured when the binding is created; re-register after a
/// mutation to observe the new value.
///
/// # Examples
/// ```
/// use form_validation::{FormValidation, ValidationRule};
///
/// let mut form = FormValidation::new([
///     ("password", vec![ValidationRule::new().required().min_length(6)]),
///     ("confirmPassword", vec![ValidationRule::new().required().equals("password")]),
/// ])
/// .expect("valid configuration");
///
/// let password = form
///     .register("password", vec![ValidationRule::new().required().min_length(6)])
///     .expect("declared field");
/// let _ = password.on_change(&mut form, "password123");
/// let _ = password.on_blur(&mut form);
///
/// assert_eq!(form.value("password"), Some("password123"));
/// assert!(form.is_touched("password"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldBinding {
    field: String,
    value: String,
    rules: Vec<ValidationRule>,
}

impl FieldBinding {
    pub(super) fn new(field: &str, value: &str, rules: Vec<ValidationRule>) -> Self {
        Self {
            field: field.to_owned(),
            value: value.to_owned(),
            rules,
        }
    }

    /// Name of the bound field.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Field value at registration time.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Apply a raw input change, validating with the binding's rules.
    pub fn on_change(
        &self,
        form: &mut FormValidation,
        event: impl Into<ChangeEvent>,
    ) -> StateChange {
        let value = event.into().into_value();
        form.apply_value(&self.field, value, &self.rules)
    }

    /// Mark the bound field as touched.
    pub fn on_blur(&self, form: &mut FormValidation) -> StateChange {
        form.touch(&self.field)
    }
}
