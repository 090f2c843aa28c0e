//! The formatted transaction list shown below the highlight cards.

use serde::Serialize;

use crate::{
    config::SummaryConfig,
    dashboard::{
        cards::to_local_date,
        transaction::{TransactionRecord, TransactionType},
    },
};

/// A transaction with its amount and date formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// The title the user gave the transaction.
    pub name: String,
    /// Entry or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The formatted amount, without a sign, e.g. "R$ 59,90".
    pub amount: String,
    /// Classification label.
    pub category: String,
    /// The formatted local date, e.g. "15/05/23".
    pub date: String,
}

/// Format each transaction for display, keeping the stored order.
pub(crate) fn format_transactions(
    transactions: &[TransactionRecord],
    config: &SummaryConfig,
) -> Vec<DisplayRecord> {
    transactions
        .iter()
        .map(|transaction| DisplayRecord {
            id: transaction.id.clone(),
            name: transaction.name.clone(),
            transaction_type: transaction.transaction_type,
            amount: config
                .locale
                .format_currency(transaction.amount, &config.currency),
            category: transaction.category.clone(),
            date: config
                .locale
                .format_short_date(to_local_date(transaction.date, config)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, macros::datetime};

    use super::format_transactions;
    use crate::{
        config::SummaryConfig,
        dashboard::transaction::{TransactionRecord, TransactionType},
    };

    fn create_test_transaction(id: &str, amount: f64, date: OffsetDateTime) -> TransactionRecord {
        TransactionRecord {
            id: id.to_owned(),
            name: format!("Transaction {id}"),
            transaction_type: TransactionType::Negative,
            amount,
            category: "food".to_owned(),
            date,
        }
    }

    #[test]
    fn preserves_order_and_passes_fields_through() {
        let transactions = vec![
            create_test_transaction("3", 10.0, datetime!(2023-01-05 12:00 UTC)),
            create_test_transaction("1", 20.0, datetime!(2023-03-20 12:00 UTC)),
            create_test_transaction("2", 30.0, datetime!(2023-02-14 12:00 UTC)),
        ];

        let records = format_transactions(&transactions, &SummaryConfig::default());

        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(records[0].name, "Transaction 3");
        assert_eq!(records[0].category, "food");
        assert_eq!(records[0].transaction_type, TransactionType::Negative);
    }

    #[test]
    fn formats_amount_and_local_date() {
        let transactions = vec![create_test_transaction(
            "1",
            1234.5,
            datetime!(2023-05-16 02:00 UTC),
        )];

        let records = format_transactions(&transactions, &SummaryConfig::default());

        assert_eq!(records[0].amount, "R$ 1.234,50");
        assert_eq!(records[0].date, "15/05/23");
    }

    #[test]
    fn serializes_type_field_name() {
        let transactions = vec![create_test_transaction(
            "1",
            1.0,
            datetime!(2023-05-10 12:00 UTC),
        )];

        let records = format_transactions(&transactions, &SummaryConfig::default());
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["type"], "negative");
        assert_eq!(json["amount"], "R$ 1,00");
        assert_eq!(json["date"], "10/05/23");
    }
}
