#![allow(clippy::unwrap_used)]

use chrono::{Datelike, NaiveDate};
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::ledger::Ledger;
use crate::store::Store;

fn setup() -> (App, Ledger) {
    let ledger = Ledger::load(Store::open_in_memory().unwrap()).unwrap();
    let app = App::new(&ledger);
    (app, ledger)
}

fn run(input: &str, app: &mut App, ledger: &mut Ledger) {
    handle_command(input, app, ledger).unwrap();
}

#[test]
fn test_budget_command_sets_budget() {
    let (mut app, mut ledger) = setup();
    run("budget 5,000", &mut app, &mut ledger);
    assert_eq!(ledger.monthly_budget(), dec!(5000));
    assert_eq!(app.screen, Screen::Budget);
    assert_eq!(app.summary.budget, dec!(5000));
    assert_eq!(app.status_message, "monthly budget set to 5000");
}

#[test]
fn test_budget_command_rejects_negative() {
    let (mut app, mut ledger) = setup();
    run("b -20", &mut app, &mut ledger);
    assert_eq!(ledger.monthly_budget(), dec!(0));
    assert!(app.status_message.starts_with("Budget not set"));
}

#[test]
fn test_expense_command_adds_to_current_month() {
    let (mut app, mut ledger) = setup();
    run("expense 12.50 Food team lunch", &mut app, &mut ledger);

    assert_eq!(ledger.transactions().len(), 1);
    let txn = &ledger.transactions()[0];
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.description.as_deref(), Some("team lunch"));
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.totals.expense, dec!(12.50));
    assert_eq!(app.status_message, "expense of 12.5 added");
}

#[test]
fn test_income_command_needs_category() {
    let (mut app, mut ledger) = setup();
    run("income 5000", &mut app, &mut ledger);
    assert!(ledger.transactions().is_empty());
    assert!(app.status_message.starts_with("Usage: :income"));
}

#[test]
fn test_quick_add_reports_rejection() {
    let (mut app, mut ledger) = setup();
    run("expense 0 Food", &mut app, &mut ledger);
    assert!(ledger.transactions().is_empty());
    assert!(app.status_message.starts_with("Not added"));

    run("expense lots Food", &mut app, &mut ledger);
    assert_eq!(app.status_message, "Invalid amount: lots");
}

#[test]
fn test_month_command() {
    let (mut app, mut ledger) = setup();
    run("month 2024-06", &mut app, &mut ledger);
    assert_eq!(app.current_month, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    run("next-month", &mut app, &mut ledger);
    assert_eq!(app.current_month.month(), 7);
    run("prev-month", &mut app, &mut ledger);
    run("prev-month", &mut app, &mut ledger);
    assert_eq!(app.current_month.month(), 5);

    run("month June", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Invalid month"));
    assert_eq!(app.current_month.month(), 5);
}

#[test]
fn test_delete_command_asks_for_confirmation() {
    let (mut app, mut ledger) = setup();
    run("expense 3 Coffee", &mut app, &mut ledger);
    run("dashboard", &mut app, &mut ledger);
    run("delete", &mut app, &mut ledger);

    assert_eq!(app.input_mode, InputMode::Confirm);
    match &app.pending_action {
        Some(PendingAction::DeleteTransaction { id, .. }) => {
            assert_eq!(id, &ledger.transactions()[0].id);
        }
        None => panic!("expected a pending delete"),
    }
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn test_delete_command_without_selection() {
    let (mut app, mut ledger) = setup();
    run("delete", &mut app, &mut ledger);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_add_command_opens_form() {
    let (mut app, mut ledger) = setup();
    run("add income", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::AddTransaction);
    assert_eq!(app.form.kind, crate::models::TransactionType::Income);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut ledger) = setup();
    run("expnse 5 Food", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Unknown command: :expnse. Did you mean :expense?"
    );
}

#[test]
fn test_quit() {
    let (mut app, mut ledger) = setup();
    run("q", &mut app, &mut ledger);
    assert!(!app.running);
}

#[test]
fn test_registry_descriptions_present() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), "missing description for {name}");
    }
}

#[test]
fn test_help_entries_skip_aliases() {
    let entries = help_entries();
    let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"budget"));
    assert!(names.contains(&"next-month"));
    assert!(!names.contains(&"b"));
    assert!(!names.contains(&"q"));
}
