use chrono::{Datelike, Local, Months, NaiveDate};

use super::form::TransactionForm;
use crate::ledger::aggregate::month_filter;
use crate::ledger::{Ledger, MonthSummary};
use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Budget,
    AddTransaction,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Budget, Self::AddTransaction]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Budget => write!(f, "Budget"),
            Self::AddTransaction => write!(f, "Add"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// First day of the month being viewed.
    pub(crate) current_month: NaiveDate,

    // Derived from the ledger on every refresh
    pub(crate) summary: MonthSummary,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Add screen
    pub(crate) form: TransactionForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: &Ledger) -> Self {
        let today = Local::now().date_naive();
        let current_month = today.with_day(1).unwrap_or(today);

        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month,

            summary: ledger.summary(current_month.month(), current_month.year()),
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            form: TransactionForm::new(TransactionType::Expense),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh(ledger);
        app
    }

    /// Recompute everything shown for `current_month`.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let (month, year) = (self.current_month.month(), self.current_month.year());
        self.summary = ledger.summary(month, year);
        self.transactions = month_filter(ledger.transactions(), month, year)
            .into_iter()
            .cloned()
            .collect();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    /// Show whatever the ledger wants the user to know about.
    pub(crate) fn drain_events(&mut self, ledger: &mut Ledger) {
        let messages: Vec<String> = ledger
            .take_events()
            .into_iter()
            .map(|e| e.to_string())
            .collect();
        if !messages.is_empty() {
            self.set_status(messages.join(" · "));
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn shift_month(&mut self, ledger: &Ledger, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.current_month.checked_add_months(months)
        } else {
            self.current_month.checked_sub_months(months)
        };
        if let Some(m) = shifted {
            self.set_month(ledger, m);
        }
    }

    pub(crate) fn set_month(&mut self, ledger: &Ledger, month: NaiveDate) {
        self.current_month = month.with_day(1).unwrap_or(month);
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh(ledger);
        self.set_status(format!("Month: {}", self.current_month.format("%B %Y")));
    }

    pub(crate) fn open_form(&mut self, kind: TransactionType) {
        self.form = TransactionForm::new(kind);
        self.screen = Screen::AddTransaction;
    }

    /// Save the add form. On success the dashboard shows the month the
    /// new transaction landed in.
    pub(crate) fn submit_form(&mut self, ledger: &mut Ledger) {
        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(msg) => {
                self.set_status(msg);
                return;
            }
        };
        let date = input.date;
        if let Err(e) = ledger.add_transaction(input) {
            self.set_status(format!("Not added: {e}"));
            return;
        }

        self.form = TransactionForm::new(self.form.kind);
        self.screen = Screen::Dashboard;
        self.current_month = date.with_day(1).unwrap_or(date);
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh(ledger);
        self.drain_events(ledger);
    }

    /// Run the action waiting on a `y` from the user.
    pub(crate) fn confirm_pending(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, label } => {
                    ledger.delete_transaction(&id)?;
                    self.refresh(ledger);
                    self.set_status(format!("Deleted: {label}"));
                    self.drain_events(ledger);
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
