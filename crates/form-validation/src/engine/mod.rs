//! Stateful form validation engine.
//!
//! A [`FormValidation`] owns the state of one form: for every declared field
//! it tracks the raw value, the last computed error, and whether the field has
//! been blurred. Mutations report a [`StateChange`] and notify subscribers with
//! an immutable [`FormSnapshot`] whenever state actually changed.
//!
//! ## Invariants
//! - Field names are unique and keep declaration order.
//! - A value change re-validates only the changed field, against the values of
//!   all fields with the new value substituted.
//! - Repeating an identical change, blur, or reset leaves state untouched and
//!   signals nothing.

mod binding;
mod snapshot;

pub use binding::{ChangeEvent, FieldBinding};
pub use snapshot::{FormSnapshot, SubscriptionId};

use tracing::{debug, warn};

use crate::error::FormConfigError;
use crate::field_map::{FieldErrors, FieldMap, FieldValues};
use crate::rule::ValidationRule;
use crate::validator::validate_field;

type Listener = Box<dyn FnMut(&FormSnapshot) + Send>;

/// Outcome of a mutating engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum StateChange {
    /// Form state differs from before the call.
    Changed,
    /// The call had no effect.
    Unchanged,
}

impl StateChange {
    /// Whether the call altered form state.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// How the touched flags take part in aggregate validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityPolicy {
    /// Valid when no field has an error and at least one field was touched.
    #[default]
    AnyTouched,
    /// Valid when no field has an error and every field was touched.
    AllTouched,
    /// Valid when no field has an error, regardless of touched state.
    ErrorsOnly,
}

/// State tracked for one field.
#[derive(Debug, Clone)]
pub struct FieldState {
    value: String,
    error: Option<String>,
    touched: bool,
    rules: Vec<ValidationRule>,
}

impl FieldState {
    fn new(rules: Vec<ValidationRule>) -> Self {
        Self {
            value: String::new(),
            error: None,
            touched: false,
            rules,
        }
    }

    /// Current raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Last computed error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the field has been blurred at least once.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// Rules declared for the field.
    #[must_use]
    pub fn rules(&self) -> &[ValidationRule] {
        self.rules.as_slice()
    }

    fn is_reset(&self) -> bool {
        self.value.is_empty() && self.error.is_none() && !self.touched
    }
}

/// Validation engine for a single form instance.
///
/// # Examples
/// ```
/// use form_validation::{FormValidation, ValidationRule};
///
/// let mut form = FormValidation::new([
///     ("email", vec![ValidationRule::new().required().email()]),
///     ("password", vec![ValidationRule::new().required()]),
/// ])
/// .expect("valid configuration");
///
/// let _ = form.set_value("email", "a@b.com");
/// let _ = form.set_value("password", "x");
/// let _ = form.touch("email");
/// let _ = form.touch("password");
/// assert!(form.is_valid());
///
/// let _ = form.set_value("email", "");
/// assert!(!form.is_valid());
/// assert_eq!(form.error("email"), Some("This field is required"));
/// ```
pub struct FormValidation {
    fields: FieldMap<FieldState>,
    policy: ValidityPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FormValidation {
    /// Build an engine from `(field, rules)` pairs using the default
    /// [`ValidityPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`FormConfigError::DuplicateField`] when a name repeats and
    /// [`FormConfigError::UnknownEqualsTarget`] when an `equals` rule names a
    /// field that is not declared.
    pub fn new<I, K>(fields: I) -> Result<Self, FormConfigError>
    where
        I: IntoIterator<Item = (K, Vec<ValidationRule>)>,
        K: Into<String>,
    {
        Self::with_policy(fields, ValidityPolicy::default())
    }

    /// Build an engine with an explicit validity policy.
    ///
    /// # Errors
    ///
    /// See [`FormValidation::new`].
    pub fn with_policy<I, K>(fields: I, policy: ValidityPolicy) -> Result<Self, FormConfigError>
    where
        I: IntoIterator<Item = (K, Vec<ValidationRule>)>,
        K: Into<String>,
    {
        let mut declared = FieldMap::new();
        for (name, rules) in fields {
            let name = name.into();
            if declared.contains(&name) {
                return Err(FormConfigError::DuplicateField { field: name });
            }
            declared.insert(name, FieldState::new(rules));
        }

        for (name, state) in declared.iter() {
            ensure_targets_exist(&declared, name, state.rules())?;
        }

        Ok(Self {
            fields: declared,
            policy,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Create a binding for wiring `field` to an input control.
    ///
    /// The binding captures the field's current value and validates later
    /// changes with `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`FormConfigError::UnknownField`] when `field` is not declared
    /// and [`FormConfigError::UnknownEqualsTarget`] when `rules` compare
    /// against an undeclared field.
    pub fn register(
        &self,
        field: &str,
        rules: Vec<ValidationRule>,
    ) -> Result<FieldBinding, FormConfigError> {
        let state = self
            .fields
            .get(field)
            .ok_or_else(|| FormConfigError::UnknownField {
                field: field.to_owned(),
            })?;
        ensure_targets_exist(&self.fields, field, &rules)?;
        Ok(FieldBinding::new(field, state.value(), rules))
    }

    /// Set `field` to `value` and re-validate it with its declared rules.
    ///
    /// Unknown fields leave state unchanged.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> StateChange {
        let Some(rules) = self.fields.get(field).map(|state| state.rules.clone()) else {
            warn!(field, "ignoring value for undeclared form field");
            return StateChange::Unchanged;
        };
        self.apply_value(field, value.into(), &rules)
    }

    /// Mark `field` as touched, as on focus loss.
    pub fn touch(&mut self, field: &str) -> StateChange {
        let Some(state) = self.field_state_mut(field) else {
            warn!(field, "ignoring blur for undeclared form field");
            return StateChange::Unchanged;
        };
        if state.touched {
            return StateChange::Unchanged;
        }
        state.touched = true;
        self.changed()
    }

    /// Clear every field's value, error, and touched flag. Rules are kept.
    pub fn reset(&mut self) -> StateChange {
        if self.is_pristine() {
            return StateChange::Unchanged;
        }
        for state in self.field_states_mut() {
            state.value.clear();
            state.error = None;
            state.touched = false;
        }
        self.changed()
    }

    /// Current value of every field.
    #[must_use]
    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|(name, state)| (name, state.value.clone()))
            .collect()
    }

    /// Current error of every field.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.fields
            .iter()
            .map(|(name, state)| (name, state.error.clone()))
            .collect()
    }

    /// Aggregate validity according to the engine's [`ValidityPolicy`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.fields.iter().any(|(_, state)| state.error.is_some()) {
            return false;
        }
        let mut states = self.fields.iter().map(|(_, state)| state);
        match self.policy {
            ValidityPolicy::AnyTouched => states.any(FieldState::is_touched),
            ValidityPolicy::AllTouched => states.all(FieldState::is_touched),
            ValidityPolicy::ErrorsOnly => true,
        }
    }

    /// Immutable copy of the derived form state.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(
            self.values(),
            self.errors(),
            self.fields
                .iter()
                .map(|(name, state)| (name, state.touched))
                .collect(),
            self.is_valid(),
        )
    }

    /// State of `field`, when declared.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&FieldState> {
        self.fields.get(field)
    }

    /// Current value of `field`, when declared.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.field(field).map(FieldState::value)
    }

    /// Current error of `field`; `None` when valid or undeclared.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.field(field).and_then(FieldState::error)
    }

    /// Whether `field` has been touched.
    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.field(field).is_some_and(FieldState::is_touched)
    }

    /// Whether every field is empty, error-free, and untouched.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.fields.iter().all(|(_, state)| state.is_reset())
    }

    /// Declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.names()
    }

    /// Validity policy in effect.
    #[must_use]
    pub const fn policy(&self) -> ValidityPolicy {
        self.policy
    }

    /// Call `listener` with a fresh snapshot after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FormSnapshot) + Send + 'static,
    {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn apply_value(
        &mut self,
        field: &str,
        value: String,
        rules: &[ValidationRule],
    ) -> StateChange {
        let mut hypothetical = self.values();
        if !hypothetical.contains(field) {
            warn!(field, "ignoring value for undeclared form field");
            return StateChange::Unchanged;
        }
        hypothetical.insert(field, value.clone());
        let error = validate_field(&value, rules, &hypothetical);

        let Some(state) = self.field_state_mut(field) else {
            return StateChange::Unchanged;
        };
        if state.value == value && state.error == error {
            return StateChange::Unchanged;
        }
        debug!(field, has_error = error.is_some(), "form field updated");
        state.value = value;
        state.error = error;
        self.changed()
    }

    fn field_state_mut(&mut self, field: &str) -> Option<&mut FieldState> {
        self.fields.get_mut(field)
    }

    fn field_states_mut(&mut self) -> impl Iterator<Item = &mut FieldState> {
        self.fields.values_mut()
    }

    fn changed(&mut self) -> StateChange {
        if !self.listeners.is_empty() {
            let snapshot = self.snapshot();
            for (_, listener) in &mut self.listeners {
                listener(&snapshot);
            }
        }
        StateChange::Changed
    }
}

impl std::fmt::Debug for FormValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidation")
            .field("fields", &self.fields)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn ensure_targets_exist(
    declared: &FieldMap<FieldState>,
    field: &str,
    rules: &[ValidationRule],
) -> Result<(), FormConfigError> {
    match rules
        .iter()
        .filter_map(ValidationRule::equals_field)
        .find(|target| !declared.contains(target))
    {
        Some(target) => Err(FormConfigError::UnknownEqualsTarget {
            field: field.to_owned(),
            target: target.to_owned(),
        }),
        None => Ok(()),
    }
}
