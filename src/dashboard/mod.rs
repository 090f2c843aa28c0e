//! Dashboard module
//!
//! Turns a user's stored transactions into the dashboard summary: the
//! entries, expenses and total highlight cards plus the formatted
//! transaction list. Everything is recomputed from scratch on every load.

mod aggregation;
mod cards;
mod list;
mod transaction;

use serde::Serialize;

pub use aggregation::{AggregationResult, aggregate};
pub use cards::{Highlight, HighlightSummary};
pub use list::DisplayRecord;
pub use transaction::{
    LoadedTransactions, TransactionRecord, TransactionType, load_transactions, parse_transactions,
};

use crate::{Error, config::SummaryConfig, store::KeyValueStore, user::UserID};

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The entries, expenses and total cards.
    pub highlights: HighlightSummary,
    /// The transactions in stored order.
    pub transactions: Vec<DisplayRecord>,
    /// How many stored records were skipped because they were invalid.
    pub skipped: usize,
}

/// Compute the dashboard summary for `transactions`.
///
/// This is a pure function of its inputs, calling it twice with the same
/// arguments gives identical output.
pub fn compute_summary(transactions: &[TransactionRecord], config: &SummaryConfig) -> Summary {
    let aggregation = aggregate(transactions);

    Summary {
        highlights: cards::highlight_summary(&aggregation, config),
        transactions: list::format_transactions(transactions, config),
        skipped: 0,
    }
}

/// Load the transactions of `user_id` from `store` and compute the summary.
///
/// # Errors
///
/// Returns any error from [load_transactions]. No partial summary is
/// produced.
pub fn load_summary<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &UserID,
    config: &SummaryConfig,
) -> Result<Summary, Error> {
    let loaded = load_transactions(store, user_id, config)?;

    Ok(Summary {
        skipped: loaded.skipped,
        ..compute_summary(&loaded.records, config)
    })
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;

    use super::{compute_summary, load_summary, parse_transactions};
    use crate::{
        Error,
        config::{RecordPolicy, SummaryConfig},
        store::{SQLiteKeyValueStore, transactions_key},
        user::UserID,
    };

    const SCENARIO: &str = r#"[
        {"id": "1", "name": "Salary", "type": "positive", "amount": "1000", "category": "salary", "date": "2023-05-10T12:00:00.000Z"},
        {"id": "2", "name": "Rent", "type": "negative", "amount": "300", "category": "house", "date": "2023-05-15T12:00:00.000Z"}
    ]"#;

    fn store_with(user_id: &UserID, payload: &str) -> HashMap<String, String> {
        HashMap::from([(
            transactions_key("@gofinances", user_id),
            payload.to_owned(),
        )])
    }

    #[test]
    fn brazilian_scenario() {
        let user_id = UserID::new("user-1");
        let store = store_with(&user_id, SCENARIO);

        let summary = load_summary(&store, &user_id, &SummaryConfig::default()).unwrap();

        let highlights = &summary.highlights;
        assert_eq!(highlights.entries.amount, "R$ 1.000,00");
        assert_eq!(highlights.expenses.amount, "R$ 300,00");
        assert_eq!(highlights.total.amount, "R$ 700,00");
        assert_eq!(highlights.entries.last_transaction, "Última entrada dia 10 de Maio");
        assert_eq!(highlights.expenses.last_transaction, "Última saída dia 15 de Maio");
        assert_eq!(highlights.total.last_transaction, "01 a 15 de Maio");

        assert_eq!(summary.transactions.len(), 2);
        assert_eq!(summary.transactions[0].amount, "R$ 1.000,00");
        assert_eq!(summary.transactions[0].date, "10/05/23");
        assert_eq!(summary.transactions[1].date, "15/05/23");
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn empty_store_shows_placeholders_everywhere() {
        let store: HashMap<String, String> = HashMap::new();

        let summary = load_summary(&store, &UserID::new("1"), &SummaryConfig::default()).unwrap();

        assert!(summary.transactions.is_empty());
        assert_eq!(summary.highlights.entries.amount, "R$ 0,00");
        assert_eq!(summary.highlights.expenses.amount, "R$ 0,00");
        assert_eq!(summary.highlights.total.amount, "R$ 0,00");
        assert_eq!(summary.highlights.entries.last_transaction, "Não há transações");
        assert_eq!(summary.highlights.expenses.last_transaction, "Não há transações");
        assert_eq!(summary.highlights.total.last_transaction, "Não há transações");
    }

    #[test]
    fn entries_only_matches_empty_placeholders_for_expenses() {
        let user_id = UserID::new("1");
        let store = store_with(
            &user_id,
            r#"[
                {"id": "1", "type": "positive", "amount": 10, "category": "c", "date": "2023-01-05"},
                {"id": "2", "type": "positive", "amount": 20, "category": "c", "date": "2023-03-20"},
                {"id": "3", "type": "positive", "amount": 30, "category": "c", "date": "2023-02-14"}
            ]"#,
        );
        let empty = load_summary(
            &HashMap::<String, String>::new(),
            &user_id,
            &SummaryConfig::default(),
        )
        .unwrap();

        let summary = load_summary(&store, &user_id, &SummaryConfig::default()).unwrap();

        assert_eq!(summary.highlights.expenses.amount, "R$ 0,00");
        assert_eq!(summary.highlights.expenses, empty.highlights.expenses);
        assert_eq!(
            summary.highlights.total.last_transaction,
            empty.highlights.total.last_transaction
        );
        assert_eq!(
            summary.highlights.entries.last_transaction,
            "Última entrada dia 20 de Março"
        );
        assert_eq!(summary.highlights.total.amount, "R$ 60,00");
    }

    #[test]
    fn is_idempotent() {
        let user_id = UserID::new("1");
        let store = store_with(&user_id, SCENARIO);
        let config = SummaryConfig::default();

        let first = load_summary(&store, &user_id, &config).unwrap();
        let second = load_summary(&store, &user_id, &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn compute_summary_matches_load_summary() {
        let config = SummaryConfig::default();
        let user_id = UserID::new("1");
        let store = store_with(&user_id, SCENARIO);
        let loaded = parse_transactions(SCENARIO, config.timezone, config.record_policy).unwrap();

        assert_eq!(
            compute_summary(&loaded.records, &config),
            load_summary(&store, &user_id, &config).unwrap()
        );
    }

    #[test]
    fn malformed_payload_produces_no_summary() {
        let user_id = UserID::new("1");
        let store = store_with(&user_id, "[{\"id\": ");

        let result = load_summary(&store, &user_id, &SummaryConfig::default());

        assert!(matches!(result, Err(Error::MalformedPayload(_))));
    }

    #[test]
    fn skipped_records_are_reported() {
        let user_id = UserID::new("1");
        let store = store_with(
            &user_id,
            r#"[
                {"id": "1", "type": "positive", "amount": 10, "category": "c", "date": "2023-01-05"},
                {"id": "2", "type": "positive", "amount": "ten", "category": "c", "date": "2023-01-06"}
            ]"#,
        );
        let config = SummaryConfig::default().with_record_policy(RecordPolicy::SkipInvalid);

        let summary = load_summary(&store, &user_id, &config).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.transactions.len(), 1);
        assert_eq!(summary.highlights.entries.amount, "R$ 10,00");
    }

    #[test]
    fn loads_from_sqlite_store() {
        let store =
            SQLiteKeyValueStore::new(Arc::new(Mutex::new(Connection::open_in_memory().unwrap())))
                .unwrap();
        let user_id = UserID::new("42");
        store
            .set(&transactions_key("@gofinances", &user_id), SCENARIO)
            .unwrap();

        let summary = load_summary(&store, &user_id, &SummaryConfig::default()).unwrap();

        assert_eq!(summary.highlights.total.amount, "R$ 700,00");
    }

    #[test]
    fn serializes_as_camel_case() {
        let summary = compute_summary(&[], &SummaryConfig::default());

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["highlights"]["entries"]["amount"], "R$ 0,00");
        assert_eq!(
            json["highlights"]["total"]["lastTransaction"],
            "Não há transações"
        );
        assert_eq!(json["transactions"], serde_json::json!([]));
        assert_eq!(json["skipped"], 0);
    }
}
