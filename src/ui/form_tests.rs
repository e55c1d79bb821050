#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::form::*;
use crate::models::TransactionType;

fn form() -> TransactionForm {
    TransactionForm::with_date(
        TransactionType::Expense,
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
    )
}

#[test]
fn test_new_form_defaults() {
    let f = form();
    assert_eq!(f.field(), FormField::Kind);
    assert_eq!(f.date, "2024-06-02");
    assert!(!f.is_submittable());
}

#[test]
fn test_field_navigation_is_clamped() {
    let mut f = form();
    f.prev_field();
    assert_eq!(f.field(), FormField::Kind);
    for _ in 0..10 {
        f.next_field();
    }
    assert_eq!(f.field(), FormField::Date);
}

#[test]
fn test_set_and_read_values() {
    let mut f = form();
    f.set_value(FormField::Amount, "40,000".into());
    f.set_value(FormField::Category, "Food".into());
    f.set_value(FormField::Kind, "income".into());
    assert_eq!(f.value(FormField::Amount), "40,000");
    assert_eq!(f.value(FormField::Kind), "income");

    f.set_value(FormField::Kind, "bogus".into());
    assert_eq!(f.kind, TransactionType::Income);
}

#[test]
fn test_to_input_valid() {
    let mut f = form();
    f.amount = "40,000".into();
    f.category = " Food ".into();
    f.description = "  ".into();
    let input = f.to_input().unwrap();
    assert_eq!(input.amount, dec!(40000));
    assert_eq!(input.category, "Food");
    assert!(input.description.is_none());
    assert_eq!(input.kind, TransactionType::Expense);
    assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
}

#[test]
fn test_to_input_rejects_bad_fields() {
    let mut f = form();
    f.category = "Food".into();

    f.amount = "abc".into();
    assert!(f.to_input().unwrap_err().contains("Invalid amount"));

    f.amount = "0".into();
    assert!(f.to_input().is_err());

    f.amount = "5".into();
    f.date = "02/06/2024".into();
    assert!(f.to_input().unwrap_err().contains("Invalid date"));

    f.date = "2024-06-02".into();
    f.category = "   ".into();
    assert!(f.to_input().is_err());
}

#[test]
fn test_cycle_category_wraps() {
    let mut f = form();
    f.cycle_category(1);
    assert_eq!(f.category, "Food");
    f.cycle_category(-1);
    assert_eq!(f.category, "Other");
    f.cycle_category(1);
    assert_eq!(f.category, "Food");
}

#[test]
fn test_toggle_kind_clears_quick_pick() {
    let mut f = form();
    f.category = "Food".into();
    f.toggle_kind();
    assert_eq!(f.kind, TransactionType::Income);
    assert!(f.category.is_empty());

    f.category = "Side gig".into();
    f.toggle_kind();
    assert_eq!(f.category, "Side gig");
}
