//! Tests for the core domain types in opsdash-common.
//!
//! This test suite covers:
//! - `Money` parsing, formatting and arithmetic laws
//! - `Record` invariants
//! - `Table` read-only access

use chrono::NaiveDate;
use opsdash_common::types::*;
use opsdash_common::{format_currency, RecordError};
use proptest::prelude::*;
use std::collections::HashMap;

fn nine_am() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod money_trait_tests {
    use super::*;

    #[test]
    fn test_money_implements_expected_traits() {
        let amount = Money::from_minor(1999);

        assert_eq!(format!("{amount:?}"), "Money(1999)");
        assert_eq!(format!("{amount}"), "19.99");

        let copied = amount;
        assert_eq!(amount, copied);
        assert!(Money::from_minor(1) > Money::ZERO);

        let mut map = HashMap::new();
        map.insert(amount, "price");
        assert_eq!(map.get(&Money::from_minor(1999)), Some(&"price"));
    }

    #[test]
    fn test_money_sum_and_add_assign() {
        let amounts = [Money::from_major(100), Money::from_major(50), Money::from_minor(5)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_minor(15_005));

        let mut running = Money::ZERO;
        for amount in amounts {
            running += amount;
        }
        assert_eq!(running, total);
    }

    #[test]
    fn test_money_percent_of() {
        let part = Money::from_major(25);
        assert!((part.percent_of(Money::from_major(100)) - 25.0).abs() < f64::EPSILON);
        assert!(part.percent_of(Money::ZERO).abs() < f64::EPSILON);
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let record = Record::new("Camden", nine_am(), "Haircut", Money::from_major(25), 2).unwrap();
        assert_eq!(record.branch(), "Camden");
        assert_eq!(record.service(), "Haircut");
        assert_eq!(record.revenue(), Money::from_major(25));
        assert_eq!(record.appointments(), 2);
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.hour(), 9);
    }

    #[test]
    fn test_zero_revenue_is_allowed() {
        assert!(Record::new("A", nine_am(), "consult", Money::ZERO, 1).is_ok());
    }

    #[test]
    fn test_record_error_messages() {
        let err = Record::new("A", nine_am(), "cut", Money::from_minor(-250), 1).unwrap_err();
        assert_eq!(err, RecordError::NegativeRevenue("-2.50".to_string()));
        assert_eq!(err.to_string(), "revenue -2.50 is negative");
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn test_table_preserves_order() {
        let table: Table = ["B", "A", "C"]
            .into_iter()
            .map(|b| Record::new(b, nine_am(), "cut", Money::ZERO, 1).unwrap())
            .collect();

        let branches: Vec<&str> = table.iter().map(Record::branch).collect();
        assert_eq!(branches, vec!["B", "A", "C"]);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert!(Table::default().is_empty());
    }
}

proptest! {
    #[test]
    fn test_property_money_display_parses_back(minor in -10_000_000_000i64..10_000_000_000i64) {
        let amount = Money::from_minor(minor);
        let parsed: Money = amount.to_string().parse().unwrap();
        prop_assert_eq!(parsed, amount);
    }

    #[test]
    fn test_property_currency_format_keeps_cents(minor in 0i64..1_000_000_000i64) {
        let formatted = format_currency(Money::from_minor(minor), "£");
        let expected_cents = format!(".{:02}", minor % 100);
        prop_assert!(formatted.starts_with('£'));
        prop_assert!(formatted.ends_with(&expected_cents));
    }
}
