//! Field declarations for the sign-in, sign-up, and user forms.

use form_validation::{FormConfigError, FormValidation, StateChange, ValidationRule};

use super::{NewUser, User};

/// Given name field.
pub const FIRST_NAME: &str = "first_name";
/// Family name field.
pub const LAST_NAME: &str = "last_name";
/// Email field.
pub const EMAIL: &str = "email";
/// Password field.
pub const PASSWORD: &str = "password";
/// Password confirmation field.
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

const SIGN_UP_MIN_PASSWORD_LENGTH: usize = 6;

fn required() -> ValidationRule {
    ValidationRule::new().required()
}

fn required_email() -> ValidationRule {
    ValidationRule::new().required().email()
}

/// `email: [required, email]`, `password: [required]`.
pub fn sign_in_form() -> Result<FormValidation, FormConfigError> {
    FormValidation::new([
        (EMAIL, vec![required_email()]),
        (PASSWORD, vec![required()]),
    ])
}

/// Names, email, a password of at least six characters, and a matching
/// confirmation.
pub fn sign_up_form() -> Result<FormValidation, FormConfigError> {
    FormValidation::new([
        (FIRST_NAME, vec![required()]),
        (LAST_NAME, vec![required()]),
        (EMAIL, vec![required_email()]),
        (
            PASSWORD,
            vec![ValidationRule::new()
                .required()
                .min_length(SIGN_UP_MIN_PASSWORD_LENGTH)],
        ),
        (
            CONFIRM_PASSWORD,
            vec![ValidationRule::new().required().equals(PASSWORD)],
        ),
    ])
}

/// Names and email for creating or editing a user.
pub fn user_form() -> Result<FormValidation, FormConfigError> {
    FormValidation::new([
        (FIRST_NAME, vec![required()]),
        (LAST_NAME, vec![required()]),
        (EMAIL, vec![required_email()]),
    ])
}

/// Whether the user form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy)]
pub enum UserFormMode<'a> {
    /// Blank form.
    Create,
    /// Form pre-populated from `user`.
    Edit(&'a User),
}

/// Reset the user form for creation or pre-populate it for editing.
///
/// Pre-populated fields are not marked touched. Reports
/// [`StateChange::Changed`] when any field value or flag moved.
pub fn prepare_user_form(form: &mut FormValidation, mode: UserFormMode<'_>) -> StateChange {
    match mode {
        UserFormMode::Create => form.reset(),
        UserFormMode::Edit(user) => {
            let changes = [
                form.set_value(FIRST_NAME, user.first_name.as_str()),
                form.set_value(LAST_NAME, user.last_name.as_str()),
                form.set_value(EMAIL, user.email.as_str()),
            ];
            if changes.iter().any(|change| change.is_changed()) {
                StateChange::Changed
            } else {
                StateChange::Unchanged
            }
        }
    }
}

/// Type `value` into `field` and leave it, as an input control would.
///
/// The change is validated with the field's declared rules and the field is
/// marked touched.
pub fn enter(
    form: &mut FormValidation,
    field: &str,
    value: &str,
) -> Result<StateChange, FormConfigError> {
    let rules = form
        .field(field)
        .map(|state| state.rules().to_vec())
        .unwrap_or_default();
    let binding = form.register(field, rules)?;
    let changed = binding.on_change(form, value);
    let touched = binding.on_blur(form);
    Ok(if changed.is_changed() || touched.is_changed() {
        StateChange::Changed
    } else {
        StateChange::Unchanged
    })
}

/// Current user form values as a new record.
pub fn new_user_from(form: &FormValidation) -> NewUser {
    let value = |field| form.value(field).unwrap_or_default().trim().to_owned();
    NewUser::new(value(EMAIL), value(FIRST_NAME), value(LAST_NAME))
}

/// Per-field errors in declaration order, skipping valid fields.
pub fn field_errors(form: &FormValidation) -> Vec<(String, String)> {
    form.errors()
        .into_iter()
        .filter_map(|(field, error)| error.map(|message| (field, message)))
        .collect()
}
