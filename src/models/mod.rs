pub(crate) mod date_format;
mod transaction;

pub use transaction::{Transaction, TransactionInput, TransactionType};
