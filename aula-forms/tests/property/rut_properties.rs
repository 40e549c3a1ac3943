use proptest::prelude::*;

use aula_forms::rut;
use aula_forms::FieldRule;

proptest! {
    #[test]
    fn computed_check_digit_always_validates(body in 1u32..100_000_000) {
        let dv = rut::check_digit(body);
        let plain = format!("{body}-{dv}");
        prop_assert!(rut::validate(&plain));
        let formatted = rut::format(&plain);
        prop_assert!(formatted.is_some());
        prop_assert!(rut::validate(&formatted.unwrap_or_default()));
    }

    #[test]
    fn any_other_check_digit_is_rejected(body in 1u32..100_000_000, wrong in prop::sample::select(vec!['0','1','2','3','4','5','6','7','8','9','K'])) {
        prop_assume!(wrong != rut::check_digit(body));
        let input = format!("{body}-{wrong}");
        prop_assert!(!rut::validate(&input));
    }

    #[test]
    fn arbitrary_input_never_panics(input in any::<String>()) {
        let valid = rut::validate(&input);
        prop_assert_eq!(rut::format(&input).is_some(), valid);
        let _ = FieldRule::Rut.check(&input);
    }

    #[test]
    fn trailing_multibyte_char_is_rejected(body in 1u32..100_000_000, tail in "[ñéÑ€😀]") {
        let input = format!("{body}{tail}");
        prop_assert!(!rut::validate(&input));
        prop_assert!(FieldRule::Rut.check(&input).is_some());
    }
}
