//! Declarative client-side form validation.
//!
//! The crate has three layers:
//!
//! - [`ValidationRule`]: pure data describing the constraints of one field.
//! - [`validate_field`]: a pure function returning the first failing rule's
//!   message for a value.
//! - [`FormValidation`]: a stateful engine tracking value, error, and touched
//!   flag per field, with an aggregate validity flag for gating submission.
//!
//! Nothing here performs I/O or suspends, so the engine can be driven
//! directly from input handlers.
//!
//! # Example
//!
//! ```
//! use form_validation::{FormValidation, ValidationRule};
//!
//! let mut form = FormValidation::new([
//!     ("password", vec![ValidationRule::new().required().min_length(6)]),
//!     ("confirmPassword", vec![ValidationRule::new().required().equals("password")]),
//! ])
//! .expect("valid configuration");
//!
//! let _ = form.set_value("password", "password123");
//! let _ = form.set_value("confirmPassword", "password456");
//!
//! assert_eq!(form.error("confirmPassword"), Some("Passwords do not match"));
//! assert!(!form.is_valid());
//! ```

mod engine;
mod error;
mod field_map;
mod rule;
mod validator;

pub use engine::{
    ChangeEvent, FieldBinding, FieldState, FormSnapshot, FormValidation, StateChange,
    SubscriptionId, ValidityPolicy,
};
pub use error::FormConfigError;
pub use field_map::{FieldErrors, FieldMap, FieldValues, ValueLookup};
pub use rule::{CustomCheck, ValidationRule};
pub use validator::{
    EMAIL_MESSAGE, EQUALS_MESSAGE, REQUIRED_MESSAGE, is_email_shaped, max_length_message,
    min_length_message, validate_field,
};
