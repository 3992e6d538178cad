//! Comprehensive unit tests for the Money module
//!
//! Tests cover rupee amounts, co-pay style percentage arithmetic,
//! currency guards and display formatting.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;

mod creation {
    use super::*;

    #[test]
    fn test_inr_defaults_to_rupees() {
        let m = Money::inr(dec!(12000));
        assert_eq!(m.currency(), Currency::INR);
        assert_eq!(Currency::default(), Currency::INR);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::inr(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_major_whole_rupees() {
        let m = Money::from_major(25000, Currency::INR);
        assert_eq!(m.amount(), dec!(25000));
    }

    #[test]
    fn test_from_minor_converts_paise() {
        let m = Money::from_minor(1250, Currency::INR);
        assert_eq!(m.amount(), dec!(12.50));
    }

    #[test]
    fn test_zero() {
        let m = Money::zero(Currency::INR);
        assert!(m.is_zero());
        assert!(!m.is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_sub_same_currency() {
        let a = Money::inr(dec!(20000));
        let b = Money::inr(dec!(4000));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(16000));
    }

    #[test]
    fn test_checked_add_rejects_mixed_currency() {
        let a = Money::inr(dec!(1));
        let b = Money::new(dec!(1), Currency::EUR);
        assert_eq!(
            a.checked_add(&b),
            Err(MoneyError::CurrencyMismatch("INR".to_string(), "EUR".to_string()))
        );
    }

    #[test]
    fn test_checked_min_picks_sublimit() {
        let estimated = Money::inr(dec!(35000));
        let sublimit = Money::inr(dec!(20000));
        assert_eq!(estimated.checked_min(&sublimit).unwrap(), sublimit);
    }

    #[test]
    fn test_checked_cmp_equal() {
        let a = Money::inr(dec!(12000));
        let b = Money::inr(dec!(12000.00));
        assert_eq!(a.checked_cmp(&b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_percentage_twenty_of_twenty_thousand() {
        let base = Money::inr(dec!(20000));
        assert_eq!(base.percentage(dec!(20)).unwrap().amount(), dec!(4000));
    }

    #[test]
    fn test_percentage_fractional_then_floor() {
        let base = Money::inr(dec!(12345));
        let copay = base.percentage(dec!(15)).unwrap();
        assert_eq!(copay.amount(), dec!(1851.75));
        assert_eq!(copay.floor().amount(), dec!(1851));
    }

    #[test]
    fn test_percentage_boundaries() {
        let base = Money::inr(dec!(500));
        assert!(base.percentage(Decimal::ZERO).unwrap().is_zero());
        assert_eq!(base.percentage(dec!(100)).unwrap(), base);
        assert!(matches!(
            base.percentage(dec!(100.01)),
            Err(MoneyError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn test_percentage_of_huge_amount_does_not_overflow() {
        let huge = Money::inr(dec!(10000000000000000000000000000));
        let copay = huge.percentage(dec!(10)).unwrap();
        assert_eq!(copay.amount(), dec!(1000000000000000000000000000));
    }

    #[test]
    fn test_overflowing_add_is_an_error() {
        let max = Money::inr(Decimal::MAX);
        assert!(matches!(max.checked_add(&max), Err(MoneyError::InvalidAmount(_))));
        assert!(matches!(
            Money::inr(Decimal::MIN).checked_sub(&max),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_round_to_currency_half_away_from_zero() {
        let m = Money::inr(dec!(10.005));
        assert_eq!(m.round_to_currency().amount(), dec!(10.01));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_rupee_symbol_without_trailing_zeros() {
        assert_eq!(Money::inr(dec!(25000.00)).to_string(), "₹25000");
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(Currency::INR.to_string(), "INR");
        assert_eq!(Currency::USD.symbol(), "$");
    }

    #[test]
    fn test_serde_uppercase_currency() {
        let json = serde_json::to_string(&Currency::INR).unwrap();
        assert_eq!(json, "\"INR\"");
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn copay_never_exceeds_amount(rupees in 0i64..10_000_000, percent in 0u32..=100) {
            let amount = Money::from_major(rupees, Currency::INR);
            let copay = amount.percentage(Decimal::from(percent)).unwrap();

            prop_assert!(copay.checked_cmp(&amount).unwrap() != Ordering::Greater);
            prop_assert!(!copay.is_negative());
        }

        #[test]
        fn checked_min_picks_an_operand(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let (x, y) = (Money::from_major(a, Currency::INR), Money::from_major(b, Currency::INR));
            let min = x.checked_min(&y).unwrap();

            prop_assert_eq!(min.amount(), Decimal::from(a.min(b)));
        }
    }
}
