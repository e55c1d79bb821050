use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Local;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_amount, parse_amount, parse_month};
use crate::ledger::Ledger;
use crate::models::{TransactionInput, TransactionType};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!(
        "budget",
        "Set monthly budget, or open Budget (e.g. :budget 5000)",
        cmd_budget,
        r
    );
    register_command!("b", "Set monthly budget (e.g. :b 5000)", cmd_budget, r);
    register_command!("add", "Open the add-transaction form", cmd_add, r);
    register_command!("a", "Open the add-transaction form", cmd_add, r);
    register_command!(
        "income",
        "Record income (e.g. :income 5000 Salary June pay)",
        cmd_income,
        r
    );
    register_command!(
        "expense",
        "Record expense (e.g. :expense 12.50 Food lunch)",
        cmd_expense,
        r
    );
    register_command!(
        "delete",
        "Delete selected transaction",
        cmd_delete,
        r
    );
    register_command!("month", "Set month (e.g. :month 2024-06)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-06)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

/// Long command names with their descriptions, sorted. Short aliases are left out.
pub(crate) fn help_entries() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&'static str, &'static str)> = COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    entries.sort_unstable_by_key(|&(name, _)| name);
    entries
}

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger);
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Budget;
    if args.is_empty() {
        app.refresh(ledger);
        return Ok(());
    }

    let Some(amount) = parse_amount(args) else {
        app.set_status(format!("Invalid amount: {args}"));
        return Ok(());
    };
    if let Err(e) = ledger.set_monthly_budget(amount) {
        app.set_status(format!("Budget not set: {e}"));
        return Ok(());
    }
    app.refresh(ledger);
    app.drain_events(ledger);
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    let kind = TransactionType::parse(args).unwrap_or(TransactionType::Expense);
    app.open_form(kind);
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    quick_add(TransactionType::Income, args, app, ledger)
}

fn cmd_expense(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    quick_add(TransactionType::Expense, args, app, ledger)
}

/// `<amount> <category> [description...]`, dated today.
fn quick_add(kind: TransactionType, args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut parts = args.splitn(3, ' ');
    let (Some(amount_str), Some(category)) = (parts.next(), parts.next()) else {
        app.set_status(format!("Usage: :{kind} <amount> <category> [description]"));
        return Ok(());
    };
    let description = parts.next().unwrap_or("");

    let Some(amount) = parse_amount(amount_str) else {
        app.set_status(format!("Invalid amount: {amount_str}"));
        return Ok(());
    };

    let input = TransactionInput::new(kind, amount, category, Local::now().date_naive())
        .with_description(description);
    if let Err(e) = ledger.add_transaction(input) {
        app.set_status(format!("Not added: {e}"));
        return Ok(());
    }
    app.refresh(ledger);
    app.drain_events(ledger);
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Dashboard || app.transactions.is_empty() {
        app.set_status("Go to the Dashboard and select a transaction first");
        return Ok(());
    }

    let selected = app
        .selected_transaction()
        .map(|t| (t.id.clone(), format!("{} {}", t.category, format_amount(t.amount))));
    if let Some((id, label)) = selected {
        app.confirm_message = format!("Delete {label}?");
        app.pending_action = Some(PendingAction::DeleteTransaction { id, label });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_month(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        let today = Local::now().date_naive();
        app.set_month(ledger, today);
        return Ok(());
    }

    match parse_month(args) {
        Some(month) => app.set_month(ledger, month),
        None => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-06)"),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.shift_month(ledger, 1);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.shift_month(ledger, -1);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
