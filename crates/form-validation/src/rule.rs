//! Declarative constraints attached to a single form field.
//!
//! A [`ValidationRule`] may carry any subset of the supported checks. When a
//! rule combines several checks they run in a fixed order: required, email,
//! minimum length, maximum length, equality with another field, then the
//! custom predicate.

use std::fmt;
use std::sync::Arc;

/// Predicate used by [`ValidationRule::custom`].
///
/// Returns `Some(message)` when the value is rejected.
pub type CustomCheck = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// One declarative constraint for a field.
///
/// # Examples
/// ```
/// use form_validation::ValidationRule;
///
/// let rule = ValidationRule::new().required().min_length(6);
/// assert!(rule.is_required());
/// assert_eq!(rule.min_length_limit(), Some(6));
/// assert_eq!(rule.equals_field(), None);
/// ```
#[derive(Clone, Default)]
pub struct ValidationRule {
    required: bool,
    email: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    equals: Option<String>,
    custom: Option<CustomCheck>,
}

impl ValidationRule {
    /// Create a rule with no checks enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values that are empty once whitespace is trimmed.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Reject non-empty values that do not look like `local@domain.tld`.
    #[must_use]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Reject values shorter than `min` characters.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Reject values longer than `max` characters.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require the value to match the current value of `field`.
    #[must_use]
    pub fn equals(mut self, field: impl Into<String>) -> Self {
        self.equals = Some(field.into());
        self
    }

    /// Attach an arbitrary predicate returning an error message on failure.
    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Whether the required check is enabled.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the email shape check is enabled.
    #[must_use]
    pub const fn checks_email(&self) -> bool {
        self.email
    }

    /// Minimum length, when configured.
    #[must_use]
    pub const fn min_length_limit(&self) -> Option<usize> {
        self.min_length
    }

    /// Maximum length, when configured.
    #[must_use]
    pub const fn max_length_limit(&self) -> Option<usize> {
        self.max_length
    }

    /// Name of the field this rule compares against, when configured.
    #[must_use]
    pub fn equals_field(&self) -> Option<&str> {
        self.equals.as_deref()
    }

    /// Custom predicate, when configured.
    #[must_use]
    pub fn custom_check(&self) -> Option<&CustomCheck> {
        self.custom.as_ref()
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("email", &self.email)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("equals", &self.equals)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_rule_has_no_checks() {
        let rule = ValidationRule::new();
        assert!(!rule.is_required());
        assert!(!rule.checks_email());
        assert!(rule.min_length_limit().is_none());
        assert!(rule.max_length_limit().is_none());
        assert!(rule.equals_field().is_none());
        assert!(rule.custom_check().is_none());
    }

    #[rstest]
    fn builder_combines_checks() {
        let rule = ValidationRule::new()
            .required()
            .email()
            .max_length(64)
            .equals("password");
        assert!(rule.is_required());
        assert!(rule.checks_email());
        assert_eq!(rule.max_length_limit(), Some(64));
        assert_eq!(rule.equals_field(), Some("password"));
    }

    #[rstest]
    fn debug_hides_custom_closure() {
        let rule = ValidationRule::new().custom(|_| None);
        let rendered = format!("{rule:?}");
        assert!(rendered.contains("<fn>"), "rendered: {rendered}");
    }
}
