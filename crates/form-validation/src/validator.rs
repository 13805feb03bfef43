//! Pure field validation.
//!
//! [`validate_field`] evaluates a field's rules in declaration order and
//! returns the message of the first failing check. It has no side effects and
//! can be exercised without a form engine.

use std::sync::OnceLock;

use regex::Regex;

use crate::field_map::ValueLookup;
use crate::rule::ValidationRule;

/// Message returned when a required value is blank.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Message returned when a value is not shaped like an email address.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Message returned when an `equals` rule does not match its target field.
pub const EQUALS_MESSAGE: &str = "Passwords do not match";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` looks like `local@domain.tld`.
///
/// # Examples
/// ```
/// use form_validation::is_email_shaped;
///
/// assert!(is_email_shaped("ada@example.com"));
/// assert!(!is_email_shaped("ada@example"));
/// assert!(!is_email_shaped("ada lovelace@example.com"));
/// ```
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Message returned when a value is shorter than `min` characters.
#[must_use]
pub fn min_length_message(min: usize) -> String {
    format!("Must be at least {min} characters")
}

/// Message returned when a value is longer than `max` characters.
#[must_use]
pub fn max_length_message(max: usize) -> String {
    format!("Must be no more than {max} characters")
}

/// Validate `value` against `rules`, resolving cross-field rules through
/// `all_values`.
///
/// Returns the first failing message or `None` when every rule passes.
///
/// # Examples
/// ```
/// use form_validation::{ValidationRule, validate_field};
///
/// let rules = [ValidationRule::new().equals("b")];
/// assert_eq!(validate_field("abc", &rules, &[("b", "abc")]), None);
/// assert_eq!(
///     validate_field("abc", &rules, &[("b", "xyz")]).as_deref(),
///     Some("Passwords do not match"),
/// );
/// ```
#[must_use]
pub fn validate_field<L>(value: &str, rules: &[ValidationRule], all_values: &L) -> Option<String>
where
    L: ValueLookup + ?Sized,
{
    rules
        .iter()
        .find_map(|rule| check_rule(value, rule, all_values))
}

fn check_rule<L>(value: &str, rule: &ValidationRule, all_values: &L) -> Option<String>
where
    L: ValueLookup + ?Sized,
{
    if rule.is_required() && value.trim().is_empty() {
        return Some(REQUIRED_MESSAGE.to_owned());
    }

    if rule.checks_email() && !value.is_empty() && !is_email_shaped(value) {
        return Some(EMAIL_MESSAGE.to_owned());
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length_limit().filter(|min| length < *min) {
        return Some(min_length_message(min));
    }
    if let Some(max) = rule.max_length_limit().filter(|max| length > *max) {
        return Some(max_length_message(max));
    }

    // An unknown target never matches; the engine rejects such configurations
    // before they reach this point.
    if rule
        .equals_field()
        .is_some_and(|target| all_values.value_of(target) != Some(value))
    {
        return Some(EQUALS_MESSAGE.to_owned());
    }

    rule.custom_check()
        .and_then(|check| check(value))
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const NO_VALUES: [(&str, &str); 0] = [];

    #[rstest]
    #[case("", Some(REQUIRED_MESSAGE))]
    #[case("   ", Some(REQUIRED_MESSAGE))]
    #[case("x", None)]
    fn required_trims_whitespace(#[case] value: &str, #[case] expected: Option<&str>) {
        let rules = [ValidationRule::new().required()];
        assert_eq!(
            validate_field(value, &rules, &NO_VALUES).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case("", None)]
    #[case("a@b.com", None)]
    #[case("a@b", Some(EMAIL_MESSAGE))]
    #[case("not-an-email", Some(EMAIL_MESSAGE))]
    #[case("a b@c.com", Some(EMAIL_MESSAGE))]
    fn email_is_skipped_when_empty(#[case] value: &str, #[case] expected: Option<&str>) {
        let rules = [ValidationRule::new().email()];
        assert_eq!(
            validate_field(value, &rules, &NO_VALUES).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case("abcde", Some("Must be at least 6 characters"))]
    #[case("abcdef", None)]
    #[case("ééééé", Some("Must be at least 6 characters"))]
    fn min_length_counts_characters(#[case] value: &str, #[case] expected: Option<&str>) {
        let rules = [ValidationRule::new().min_length(6)];
        assert_eq!(
            validate_field(value, &rules, &NO_VALUES).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case("abc", None)]
    #[case("abcd", Some("Must be no more than 3 characters"))]
    fn max_length_is_inclusive(#[case] value: &str, #[case] expected: Option<&str>) {
        let rules = [ValidationRule::new().max_length(3)];
        assert_eq!(
            validate_field(value, &rules, &NO_VALUES).as_deref(),
            expected
        );
    }

    #[rstest]
    fn equals_compares_against_sibling_value() {
        let rules = [ValidationRule::new().equals("b")];
        assert_eq!(validate_field("abc", &rules, &[("b", "abc")]), None);
        assert_eq!(
            validate_field("abc", &rules, &[("b", "xyz")]).as_deref(),
            Some(EQUALS_MESSAGE)
        );
    }

    #[rstest]
    fn equals_never_matches_unknown_target() {
        let rules = [ValidationRule::new().equals("missing")];
        assert_eq!(
            validate_field("", &rules, &NO_VALUES).as_deref(),
            Some(EQUALS_MESSAGE)
        );
    }

    #[rstest]
    fn custom_message_is_returned() {
        let rules = [ValidationRule::new()
            .custom(|value| (value == "root").then(|| "Reserved name".to_owned()))];
        assert_eq!(
            validate_field("root", &rules, &NO_VALUES).as_deref(),
            Some("Reserved name")
        );
        assert_eq!(validate_field("ada", &rules, &NO_VALUES), None);
    }

    #[rstest]
    fn custom_empty_message_passes() {
        let rules = [ValidationRule::new().custom(|_| Some(String::new()))];
        assert_eq!(validate_field("anything", &rules, &NO_VALUES), None);
    }

    #[rstest]
    fn checks_within_one_rule_run_in_fixed_order() {
        let rules = [ValidationRule::new().min_length(10).email().required()];
        assert_eq!(
            validate_field("", &rules, &NO_VALUES).as_deref(),
            Some(REQUIRED_MESSAGE)
        );
        assert_eq!(
            validate_field("nope", &rules, &NO_VALUES).as_deref(),
            Some(EMAIL_MESSAGE)
        );
        assert_eq!(
            validate_field("a@b.co", &rules, &NO_VALUES).as_deref(),
            Some("Must be at least 10 characters")
        );
    }

    #[rstest]
    fn first_failing_rule_wins() {
        let rules = [
            ValidationRule::new().min_length(3),
            ValidationRule::new().custom(|_| Some("second".to_owned())),
        ];
        assert_eq!(
            validate_field("ab", &rules, &NO_VALUES).as_deref(),
            Some("Must be at least 3 characters")
        );
        assert_eq!(
            validate_field("abc", &rules, &NO_VALUES).as_deref(),
            Some("second")
        );
    }

    proptest! {
        #[test]
        fn validation_is_deterministic(value in ".{0,24}", min in 0_usize..12, max in 0_usize..24) {
            let rules = [
                ValidationRule::new().required().email(),
                ValidationRule::new().min_length(min).max_length(max),
            ];
            let first = validate_field(&value, &rules, &NO_VALUES);
            let second = validate_field(&value, &rules, &NO_VALUES);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn rules_after_a_failure_do_not_matter(value in ".{0,16}") {
            let failing = ValidationRule::new().custom(|_| Some("first".to_owned()));
            let with_tail = [failing.clone(), ValidationRule::new().required().min_length(99)];
            let alone = [failing];
            prop_assert_eq!(
                validate_field(&value, &with_tail, &NO_VALUES),
                validate_field(&value, &alone, &NO_VALUES)
            );
        }
    }
}
