//! Pure input validation predicates.

use validator::Validate;

use crate::user::NewUser;

/// Largest id accepted in decimal notation (2^53 - 1). From 2^53 on, distinct
/// integers round to the same `f64`.
const MAX_SAFE_FLOAT_ID: f64 = 9_007_199_254_740_991.0;

/// Parse a raw user id.
///
/// Accepts anything that reads as a whole number greater than zero, so
/// `"12"` and `"12.0"` are both id 12. Decimals, zero, negatives, `NaN`,
/// infinities and non-numeric text yield `None`. Plain integers keep full
/// `i64` range; decimal notation is only accepted below 2^53.
pub fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(id) = raw.parse::<i64>() {
        return (id > 0).then_some(id);
    }

    let value: f64 = raw.parse().ok()?;
    if value.is_nan() || value.fract() != 0.0 || value <= 0.0 || value > MAX_SAFE_FLOAT_ID {
        return None;
    }

    Some(value as i64)
}

/// Check whether `raw` is a valid user id.
pub fn is_valid_id(raw: &str) -> bool {
    parse_id(raw).is_some()
}

/// Check whether a string is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check that every required field of a user payload is present.
pub fn is_valid_object(user: &NewUser) -> bool {
    user.validate().is_ok()
        && ![
            &user.username,
            &user.password,
            &user.first_name,
            &user.last_name,
        ]
        .iter()
        .any(|field| is_blank(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_integers_are_valid_ids() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("9999"), Some(9999));
        assert_eq!(parse_id(" 42 "), Some(42));
        assert_eq!(parse_id("5.0"), Some(5));
        assert_eq!(parse_id("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_id("9007199254740993"), Some(9_007_199_254_740_993));
        assert_eq!(parse_id("9007199254740991.0"), Some(9_007_199_254_740_991));
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for raw in [
            "3.14",
            "0",
            "NaN",
            "-2",
            "",
            "abc",
            "inf",
            "-0",
            "1e400",
            "9007199254740992.0",
            "9007199254740993.0",
            "1e19",
        ] {
            assert!(!is_valid_id(raw), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_complete_object_is_valid() {
        let user = NewUser::new("jdoe", "p4ssword", "John", "Doe");
        assert!(is_valid_object(&user));
    }

    #[test]
    fn test_missing_fields_are_invalid() {
        let mut user = NewUser::new("jdoe", "p4ssword", "John", "Doe");
        user.username.clear();
        assert!(!is_valid_object(&user));

        let user = NewUser::new("jdoe", "p4ssword", "   ", "Doe");
        assert!(!is_valid_object(&user));

        let user = NewUser::new("jdoe", "", "John", "Doe");
        assert!(!is_valid_object(&user));
    }

    #[test]
    fn test_caller_supplied_id_does_not_affect_validity() {
        let mut user = NewUser::new("jdoe", "p4ssword", "John", "Doe");
        user.id = Some(-5);
        assert!(is_valid_object(&user));
    }
}
