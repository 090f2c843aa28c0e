//! Finance summary computes the dashboard of a personal finance app from a
//! user's stored transactions.
//!
//! The transactions are read from a key-value store, totalled per
//! transaction type and formatted for display: three highlight cards
//! (entries, expenses and total) and the transaction list.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use finance_summary::{SummaryConfig, UserID, load_summary, transactions_key};
//!
//! let user_id = UserID::new("42");
//! let store = HashMap::from([(
//!     transactions_key("@gofinances", &user_id),
//!     r#"[{"id": "1", "type": "positive", "amount": 1000, "category": "salary",
//!          "date": "2023-05-10T12:00:00.000Z"}]"#.to_owned(),
//! )]);
//!
//! let summary = load_summary(&store, &user_id, &SummaryConfig::default()).unwrap();
//!
//! assert_eq!(summary.highlights.entries.amount, "R$ 1.000,00");
//! assert_eq!(summary.highlights.expenses.last_transaction, "Não há transações");
//! ```

#![warn(missing_docs)]

mod config;
mod dashboard;
mod error;
mod locale;
mod refresh;
mod store;
mod timezone;
mod user;

pub use config::{
    DEFAULT_CURRENCY, DEFAULT_LOCALE, DEFAULT_NAMESPACE, DEFAULT_TIMEZONE, RecordPolicy,
    SummaryConfig,
};
pub use dashboard::{
    AggregationResult, DisplayRecord, Highlight, HighlightSummary, LoadedTransactions, Summary,
    TransactionRecord, TransactionType, aggregate, compute_summary, load_summary,
    load_transactions, parse_transactions,
};
pub use error::Error;
pub use locale::{Currency, Locale};
pub use refresh::SummaryRefresher;
pub use store::{KeyValueStore, SQLiteKeyValueStore, create_key_value_table, transactions_key};
pub use timezone::get_timezone;
pub use user::{UserID, UserProfile};
