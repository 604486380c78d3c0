use proptest::prelude::*;
use serde_json::{Value, json};

use joblaunch::cast::{self, collection, relaxed};
use joblaunch::types::TypeKind;

proptest! {
    #[test]
    fn test_string_cast_is_identity(s in "\\PC*") {
        let once = cast::try_parse_as(&s, TypeKind::String);
        prop_assert_eq!(once.clone(), Some(Value::String(s.clone())));

        // Casting the cast value again changes nothing.
        let again = once
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|v| cast::try_parse_as(v, TypeKind::String));
        prop_assert_eq!(again, once);
    }

    #[test]
    fn test_integer_round_trips_any_i64(n in any::<i64>()) {
        let text = n.to_string();
        prop_assert!(cast::validate(&text, TypeKind::Integer));
        prop_assert_eq!(cast::try_parse_as(&text, TypeKind::Integer), Some(json!(n)));
    }

    #[test]
    fn test_integer_validation_matches_cast(s in "[+-]?[0-9]{1,18}|[a-z0-9.+-]{0,6}") {
        let validated = cast::validate(&s, TypeKind::Integer);
        let parsed = cast::try_parse_as(&s, TypeKind::Integer);
        // Up to 18 digits always fits in an i64.
        prop_assert_eq!(validated, parsed.is_some());
    }

    #[test]
    fn test_every_integer_is_a_number(s in "[+-]?[0-9]{1,12}") {
        prop_assert!(cast::validate(&s, TypeKind::Number));
        let parsed = cast::try_parse_as(&s, TypeKind::Number);
        prop_assert!(parsed.is_some_and(|v| v.is_f64()));
    }

    #[test]
    fn test_boolean_accepts_only_four_spellings(s in "\\PC{0,6}") {
        let parsed = cast::try_parse_as(&s, TypeKind::Boolean);
        let expected = match s.as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        };
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn test_collections_never_panic(s in "[\\[\\]{}:,'\" a-z0-9=>.-]{0,24}") {
        // Any outcome is fine as long as the cast agrees with the shape check.
        if let Some(v) = cast::try_parse_as(&s, TypeKind::Array) {
            prop_assert!(collection::is_array(&s) && v.is_array());
        }
        if let Some(v) = cast::try_parse_as(&s, TypeKind::Hash) {
            prop_assert!(collection::is_hash(&s) && v.is_object());
        }
    }

    #[test]
    fn test_relaxed_accepts_strict_json(items in proptest::collection::vec(any::<i32>(), 0..8)) {
        let strict = serde_json::to_string(&items).expect("serialize");
        let parsed = relaxed::parse(&strict);
        prop_assert_eq!(parsed, Ok(json!(items)));
    }
}
