//! Figures derived from the transaction list and the monthly budget.
//!
//! Everything here is a pure function of its arguments. Screens call these on
//! every refresh; nothing is cached between calls.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Transaction, TransactionType};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Usage at or below this percentage is `Normal`.
pub(crate) const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Number of expense categories ranked on the budget screen.
pub(crate) const TOP_CATEGORY_LIMIT: usize = 5;

/// Number of category cards shown on the dashboard.
pub(crate) const CATEGORY_CARD_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BudgetProgress {
    /// Negative once spending passes the budget.
    pub(crate) remaining: Decimal,
    pub(crate) used_percentage: Decimal,
}

impl BudgetProgress {
    pub(crate) fn tier(&self) -> UsageTier {
        UsageTier::from_percentage(self.used_percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UsageTier {
    Normal,
    Warning,
    Exceeded,
}

impl UsageTier {
    /// `<= 80` is normal, `(80, 100]` is a warning, `> 100` is exceeded.
    pub(crate) fn from_percentage(pct: Decimal) -> Self {
        if pct > HUNDRED {
            Self::Exceeded
        } else if pct > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "On track",
            Self::Warning => "Close to limit",
            Self::Exceeded => "Over budget",
        }
    }
}

impl std::fmt::Display for UsageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryGroup {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    /// Type of the first transaction seen in this category.
    pub(crate) kind: TransactionType,
}

/// Transactions whose date falls in the given calendar month (1-12) and year.
pub(crate) fn month_filter<'a, I>(transactions: I, month: u32, year: i32) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
        .collect()
}

pub(crate) fn of_type<'a, I>(transactions: I, kind: TransactionType) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().filter(|t| t.kind == kind).collect()
}

pub(crate) fn compute_totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = transactions.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), t| match t.kind {
            TransactionType::Income => (income.saturating_add(t.amount), expense),
            TransactionType::Expense => (income, expense.saturating_add(t.amount)),
        },
    );
    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

pub(crate) fn compute_budget_progress(total_expense: Decimal, budget: Decimal) -> BudgetProgress {
    BudgetProgress {
        remaining: budget.saturating_sub(total_expense),
        used_percentage: percent_of_total(total_expense, budget),
    }
}

/// Groups by exact category string, in the order categories are first seen.
pub(crate) fn group_by_category<'a, I>(transactions: I) -> Vec<CategoryGroup>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions {
        match index.get(t.category.as_str()) {
            Some(&i) => {
                groups[i].total = groups[i].total.saturating_add(t.amount);
                groups[i].count += 1;
            }
            None => {
                index.insert(t.category.as_str(), groups.len());
                groups.push(CategoryGroup {
                    category: t.category.clone(),
                    total: t.amount,
                    count: 1,
                    kind: t.kind,
                });
            }
        }
    }

    groups
}

/// Largest totals first. Equal totals keep their grouping order.
pub(crate) fn top_categories(grouped: &[CategoryGroup], limit: usize) -> Vec<(String, Decimal)> {
    let mut ranked: Vec<(String, Decimal)> = grouped
        .iter()
        .map(|g| (g.category.clone(), g.total))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Sums in this module saturate at `Decimal::MAX`, and so does a share
/// too large to represent.
pub(crate) fn percent_of_total(part: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        part.checked_div(total)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// One ranked expense category on the budget screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankedCategory {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) percent: Decimal,
}

/// Everything the screens show for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthSummary {
    pub(crate) month: u32,
    pub(crate) year: i32,
    pub(crate) totals: Totals,
    pub(crate) budget: Decimal,
    pub(crate) progress: BudgetProgress,
    pub(crate) tier: UsageTier,
    pub(crate) top_expenses: Vec<RankedCategory>,
    pub(crate) category_cards: Vec<CategoryGroup>,
    pub(crate) transaction_count: usize,
}

impl MonthSummary {
    pub(crate) fn compute(transactions: &[Transaction], budget: Decimal, month: u32, year: i32) -> Self {
        let in_month = month_filter(transactions, month, year);
        let totals = compute_totals(in_month.iter().copied());
        let progress = compute_budget_progress(totals.expense, budget);

        let expense_groups = group_by_category(of_type(in_month.iter().copied(), TransactionType::Expense));
        let top_expenses = top_categories(&expense_groups, TOP_CATEGORY_LIMIT)
            .into_iter()
            .map(|(category, total)| RankedCategory {
                percent: percent_of_total(total, totals.expense),
                category,
                total,
            })
            .collect();

        let mut category_cards = group_by_category(in_month.iter().copied());
        category_cards.truncate(CATEGORY_CARD_LIMIT);

        Self {
            month,
            year,
            totals,
            budget,
            tier: progress.tier(),
            progress,
            top_expenses,
            category_cards,
            transaction_count: in_month.len(),
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod aggregate_tests;
