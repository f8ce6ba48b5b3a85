//! Property-based tests for the field validators.

use crm_api::validators::{check_price, check_stock, is_valid_phone};
use proptest::prelude::*;

proptest! {
    /// `+` followed by 7 to 15 digits is always accepted.
    #[test]
    fn international_numbers_accepted(digits in "[0-9]{7,15}") {
        let phone = format!("+{digits}");
        prop_assert!(is_valid_phone(&phone));
    }

    /// Too few or too many digits after `+` is rejected.
    #[test]
    fn international_length_bounds(digits in "[0-9]{1,6}|[0-9]{16,20}") {
        let phone = format!("+{digits}");
        prop_assert!(!is_valid_phone(&phone));
    }

    #[test]
    fn dashed_numbers_accepted(a in "[0-9]{3}", b in "[0-9]{3}", c in "[0-9]{4}") {
        let phone = format!("{a}-{b}-{c}");
        prop_assert!(is_valid_phone(&phone));
    }

    /// Anything containing an ASCII letter is rejected.
    #[test]
    fn letters_rejected(prefix in "[0-9+-]{0,8}", letter in "[a-zA-Z]", suffix in "[0-9-]{0,8}") {
        let phone = format!("{prefix}{letter}{suffix}");
        prop_assert!(!is_valid_phone(&phone));
    }

    #[test]
    fn positive_prices_accepted(price in 0.000_001f64..1.0e12) {
        prop_assert!(check_price(price).is_ok());
    }

    #[test]
    fn non_positive_prices_rejected(price in -1.0e12f64..=0.0) {
        prop_assert!(check_price(price).is_err());
    }

    #[test]
    fn stock_sign_decides(stock in any::<i64>()) {
        prop_assert_eq!(check_stock(stock).is_ok(), stock >= 0);
    }
}
