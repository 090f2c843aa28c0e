//! Transaction totals and most recent activity per transaction type.

use time::OffsetDateTime;

use crate::dashboard::transaction::{TransactionRecord, TransactionType};

/// Totals and latest dates computed from a list of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregationResult {
    /// Sum of the amounts of all entries.
    pub entries_total: f64,
    /// Sum of the amounts of all expenses.
    pub expenses_total: f64,
    /// The latest date among entries, `None` if there are no entries.
    pub last_entry_date: Option<OffsetDateTime>,
    /// The latest date among expenses, `None` if there are no expenses.
    pub last_expense_date: Option<OffsetDateTime>,
}

impl AggregationResult {
    /// Entries minus expenses. May be negative.
    pub fn net_total(&self) -> f64 {
        self.entries_total - self.expenses_total
    }
}

/// Sums amounts and finds the latest date for each transaction type in a
/// single pass.
///
/// Dates are compared as instants, so records stored with different UTC
/// offsets are ordered correctly.
pub fn aggregate(transactions: &[TransactionRecord]) -> AggregationResult {
    let mut result = AggregationResult::default();

    for transaction in transactions {
        let (total, last_date) = match transaction.transaction_type {
            TransactionType::Positive => (&mut result.entries_total, &mut result.last_entry_date),
            TransactionType::Negative => {
                (&mut result.expenses_total, &mut result.last_expense_date)
            }
        };

        *total += transaction.amount;
        *last_date = Some(match *last_date {
            Some(latest) => latest.max(transaction.date),
            None => transaction.date,
        });
    }

    tracing::debug!(
        "Aggregated {} transactions: entries {}, expenses {}",
        transactions.len(),
        result.entries_total,
        result.expenses_total
    );

    result
}
