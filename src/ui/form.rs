//! State of the add-transaction screen. Raw strings are kept as typed and
//! only parsed on submit.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::util::parse_amount;
use crate::models::{date_format::parse_date, TransactionInput, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Kind,
    Amount,
    Category,
    Description,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Kind,
            Self::Amount,
            Self::Category,
            Self::Description,
            Self::Date,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Date => "Date",
        }
    }
}

/// Quick picks offered per type. Any other label may be typed.
pub(crate) fn suggested_categories(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => &["Salary", "Freelance", "Investment", "Gift", "Other"],
        TransactionType::Expense => &[
            "Food",
            "Transport",
            "Shopping",
            "Bills",
            "Entertainment",
            "Health",
            "Other",
        ],
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TransactionForm {
    pub(crate) kind: TransactionType,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: String,
    pub(crate) field_index: usize,
}

impl TransactionForm {
    pub(crate) fn new(kind: TransactionType) -> Self {
        Self::with_date(kind, Local::now().date_naive())
    }

    pub(crate) fn with_date(kind: TransactionType, date: NaiveDate) -> Self {
        Self {
            kind,
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            field_index: 0,
        }
    }

    pub(crate) fn field(&self) -> FormField {
        FormField::all()[self.field_index.min(FormField::all().len() - 1)]
    }

    pub(crate) fn next_field(&mut self) {
        self.field_index = (self.field_index + 1).min(FormField::all().len() - 1);
    }

    pub(crate) fn prev_field(&mut self) {
        self.field_index = self.field_index.saturating_sub(1);
    }

    pub(crate) fn value(&self, field: FormField) -> String {
        match field {
            FormField::Kind => self.kind.as_str().to_string(),
            FormField::Amount => self.amount.clone(),
            FormField::Category => self.category.clone(),
            FormField::Description => self.description.clone(),
            FormField::Date => self.date.clone(),
        }
    }

    pub(crate) fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Kind => {
                if let Some(kind) = TransactionType::parse(&value) {
                    self.kind = kind;
                }
            }
            FormField::Amount => self.amount = value,
            FormField::Category => self.category = value,
            FormField::Description => self.description = value,
            FormField::Date => self.date = value,
        }
    }

    /// Cycles the category through the quick picks for the current type.
    pub(crate) fn cycle_category(&mut self, delta: isize) {
        let picks = suggested_categories(self.kind);
        let len = picks.len() as isize;
        let next = match picks.iter().position(|c| *c == self.category) {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.category = picks[next as usize].to_string();
    }

    pub(crate) fn toggle_kind(&mut self) {
        let was_pick = suggested_categories(self.kind).contains(&self.category.as_str());
        self.kind = self.kind.toggled();
        if was_pick && !suggested_categories(self.kind).contains(&self.category.as_str()) {
            self.category.clear();
        }
    }

    /// Submit is only offered once amount and category are filled in.
    pub(crate) fn is_submittable(&self) -> bool {
        !self.amount.trim().is_empty() && !self.category.trim().is_empty()
    }

    pub(crate) fn to_input(&self) -> Result<TransactionInput, String> {
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| format!("Invalid amount: '{}'", self.amount))?;
        if amount <= Decimal::ZERO {
            return Err("Amount must be greater than zero".into());
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err("Category is required".into());
        }
        let date = parse_date(&self.date)
            .ok_or_else(|| format!("Invalid date: '{}'. Use YYYY-MM-DD", self.date))?;

        Ok(TransactionInput::new(self.kind, amount, category, date)
            .with_description(self.description.trim()))
    }
}
