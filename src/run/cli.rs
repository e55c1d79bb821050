use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};

use crate::ledger::Ledger;
use crate::models::{date_format::parse_date, TransactionInput, TransactionType};
use crate::ui::util::{format_amount, parse_amount, parse_month, truncate};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let result = match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "budget" | "b" => cli_budget(&args[2..], ledger),
        "summary" | "s" => cli_summary(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    };

    for event in ledger.take_events() {
        println!("{event}");
    }
    result
}

fn print_usage() {
    println!("Budgetrack - local-only monthly budget tracker");
    println!();
    println!("Usage: budgetrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  add <income|expense> <amount> <category>");
    println!("    --date <YYYY-MM-DD>                   Transaction date (default: today)");
    println!("    --note <text>                         Optional description");
    println!("  delete <id>                             Delete a transaction");
    println!("  budget <amount>                         Set the monthly budget");
    println!("  summary [YYYY-MM]                       Print a monthly summary");
    println!("  list [YYYY-MM]                          List a month's transactions with ids");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

/// Value following `name`. A trailing flag with nothing after it is an error.
fn flag<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == name) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow::anyhow!("{name} needs a value")),
    }
}

/// Positional arguments with `--flag value` pairs removed.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn month_arg(args: &[String]) -> Result<NaiveDate> {
    match positional(args).first() {
        Some(raw) => parse_month(raw).ok_or_else(|| anyhow::anyhow!("Invalid month '{raw}'. Use YYYY-MM")),
        None => {
            let today = Local::now().date_naive();
            today
                .with_day(1)
                .ok_or_else(|| anyhow::anyhow!("Could not determine current month"))
        }
    }
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    const USAGE: &str =
        "Usage: budgetrack add <income|expense> <amount> <category> [--date YYYY-MM-DD] [--note TEXT]";

    let pos = positional(args);
    if pos.len() < 3 {
        anyhow::bail!(USAGE);
    }

    let kind = TransactionType::parse(pos[0])
        .ok_or_else(|| anyhow::anyhow!("Unknown type '{}'. {USAGE}", pos[0]))?;
    let amount = parse_amount(pos[1]).ok_or_else(|| anyhow::anyhow!("Invalid amount: {}", pos[1]))?;
    let category = pos[2..].join(" ");
    let note = flag(args, "--note")?;
    let date = match flag(args, "--date")? {
        Some(raw) => parse_date(raw).ok_or_else(|| anyhow::anyhow!("Invalid date: {raw}"))?,
        None => Local::now().date_naive(),
    };

    let mut input = TransactionInput::new(kind, amount, category, date);
    if let Some(note) = note {
        input = input.with_description(note);
    }

    let txn = ledger.add_transaction(input).context("Could not add transaction")?;
    println!("id: {}", txn.id);
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: budgetrack delete <id>");
    };
    if ledger.find(id).is_none() {
        println!("No transaction with id {id}");
    }
    ledger.delete_transaction(id)
}

fn cli_budget(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(raw) = args.first() else {
        println!("Monthly budget: {}", format_amount(ledger.monthly_budget()));
        return Ok(());
    };
    let amount = parse_amount(raw).ok_or_else(|| anyhow::anyhow!("Invalid amount: {raw}"))?;
    ledger
        .set_monthly_budget(amount)
        .context("Could not set budget")
}

fn cli_summary(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let month = month_arg(args)?;
    let summary = ledger.summary(month.month(), month.year());

    println!(
        "Budgetrack: {} ({:04}-{:02})",
        month.format("%B %Y"),
        summary.year,
        summary.month
    );
    println!("{}", "─".repeat(44));
    println!("  Income:       {}", format_amount(summary.totals.income));
    println!("  Expenses:     {}", format_amount(summary.totals.expense));
    println!("  Balance:      {}", format_amount(summary.totals.balance));
    println!("  Transactions: {}", summary.transaction_count);

    println!();
    if summary.budget > rust_decimal::Decimal::ZERO {
        println!("  Budget:       {}", format_amount(summary.budget));
        println!("  Remaining:    {}", format_amount(summary.progress.remaining));
        println!(
            "  Used:         {:.1}% ({})",
            summary.progress.used_percentage, summary.tier
        );
    } else {
        println!("  No monthly budget set. Use: budgetrack budget <amount>");
    }

    if !summary.top_expenses.is_empty() {
        println!();
        println!("Top spending categories:");
        for ranked in &summary.top_expenses {
            println!(
                "  {:<22} {:>16}  {:>5.1}%",
                truncate(&ranked.category, 22),
                format_amount(ranked.total),
                ranked.percent
            );
        }
    }

    Ok(())
}

fn cli_list(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let month = month_arg(args)?;
    let txns = crate::ledger::aggregate::month_filter(ledger.transactions(), month.month(), month.year());
    if txns.is_empty() {
        println!("No transactions for {}", month.format("%Y-%m"));
        return Ok(());
    }

    println!(
        "{:<36}  {:<10}  {:<7}  {:<18}  {:>14}",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(93));
    for t in txns {
        println!(
            "{:<36}  {:<10}  {:<7}  {:<18}  {:>14}",
            t.id,
            t.date.format("%Y-%m-%d"),
            t.kind.as_str(),
            truncate(&t.category, 18),
            format_amount(t.signed_amount()),
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
