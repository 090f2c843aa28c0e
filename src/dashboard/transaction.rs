//! Loading and parsing the stored transactions of a user.
//!
//! Transactions are stored as a JSON array of objects under a per-user key.
//! A missing key means the user has no transactions yet.

use std::cmp::min_by_key;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use time_tz::Tz;

use crate::{
    Error,
    config::{RecordPolicy, SummaryConfig},
    store::{KeyValueStore, transactions_key},
    timezone::get_offset_at,
    user::UserID,
};

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received, an entry.
    Positive,
    /// Money spent, an expense.
    Negative,
}

/// A transaction as loaded from storage.
///
/// The amount is always a non-negative magnitude, the direction is carried
/// by `transaction_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// The title the user gave the transaction.
    pub name: String,
    /// Entry or expense.
    pub transaction_type: TransactionType,
    /// The non-negative amount of money.
    pub amount: f64,
    /// Classification label, passed through untouched.
    pub category: String,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

/// The records read in one load along with how many invalid records were
/// dropped under [RecordPolicy::SkipInvalid].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedTransactions {
    /// Valid records in stored order.
    pub records: Vec<TransactionRecord>,
    /// Number of records that were skipped because they were invalid.
    pub skipped: usize,
}

#[derive(Deserialize)]
struct StoredTransaction {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: StoredAmount,
    category: String,
    date: String,
}

/// Amounts may have been saved as numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(f64),
    Text(String),
}

const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Read the transactions of `user_id` from `store`.
///
/// A missing key yields an empty list.
///
/// # Errors
///
/// Returns [Error::MalformedPayload] if the stored value is not a JSON array
/// of objects, [Error::InvalidRecord] if a record is invalid and the
/// configured policy is [RecordPolicy::FailFast], or any error the store
/// returns when reading.
pub fn load_transactions<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &UserID,
    config: &SummaryConfig,
) -> Result<LoadedTransactions, Error> {
    let key = transactions_key(&config.namespace, user_id);
    tracing::debug!("Loading transactions from \"{key}\"");

    match store.get(&key)? {
        Some(payload) => parse_transactions(&payload, config.timezone, config.record_policy),
        None => {
            tracing::debug!("No transactions stored under \"{key}\"");
            Ok(LoadedTransactions::default())
        }
    }
}

/// Parse a serialized transaction collection.
///
/// Dates without an offset are interpreted as wall clock time in `timezone`.
///
/// # Errors
///
/// Returns [Error::MalformedPayload] if `payload` is not a JSON array of
/// objects, or [Error::InvalidRecord] for the first invalid record when
/// `policy` is [RecordPolicy::FailFast].
pub fn parse_transactions(
    payload: &str,
    timezone: &Tz,
    policy: RecordPolicy,
) -> Result<LoadedTransactions, Error> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(payload)
        .map_err(|error| Error::MalformedPayload(error.to_string()))?;

    let mut loaded = LoadedTransactions {
        records: Vec::with_capacity(objects.len()),
        skipped: 0,
    };

    for (index, object) in objects.into_iter().enumerate() {
        match parse_record(object, timezone) {
            Ok(record) => loaded.records.push(record),
            Err(reason) => match policy {
                RecordPolicy::FailFast => return Err(Error::InvalidRecord { index, reason }),
                RecordPolicy::SkipInvalid => {
                    tracing::warn!("Skipping invalid transaction record {index}: {reason}");
                    loaded.skipped += 1;
                }
            },
        }
    }

    tracing::debug!(
        "Parsed {} transaction records, skipped {}",
        loaded.records.len(),
        loaded.skipped
    );

    Ok(loaded)
}

fn parse_record(object: Map<String, Value>, timezone: &Tz) -> Result<TransactionRecord, String> {
    let stored: StoredTransaction =
        serde_json::from_value(Value::Object(object)).map_err(|error| error.to_string())?;

    let amount = match stored.amount {
        StoredAmount::Number(amount) => amount,
        // A blank string counts as zero, like an empty form field.
        StoredAmount::Text(text) if text.trim().is_empty() => 0.0,
        StoredAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("amount \"{text}\" is not a number"))?,
    };

    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount {amount} must be a non-negative number"));
    }

    Ok(TransactionRecord {
        id: stored.id,
        name: stored.name,
        transaction_type: stored.transaction_type,
        amount,
        category: stored.category,
        date: parse_date(&stored.date, timezone)?,
    })
}

/// Parse an RFC 3339 timestamp, or a date or date-time without an offset
/// which is taken to be local time in `timezone`.
fn parse_date(text: &str, timezone: &Tz) -> Result<OffsetDateTime, String> {
    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time);
    }

    let local = if let Ok(date_time) = PrimitiveDateTime::parse(text, DATE_TIME_FORMAT) {
        date_time
    } else if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        date.midnight()
    } else {
        return Err(format!("date \"{text}\" is not a valid timestamp"));
    };

    // The offset depends on the instant, which in turn depends on the offset.
    // Starting from UTC and refining once settles outside of DST transitions.
    let guess = local.assume_offset(get_offset_at(timezone, &local.assume_utc()));
    let resolved = local.assume_offset(get_offset_at(timezone, &guess));

    let offset = get_offset_at(timezone, &resolved);
    if offset == resolved.offset() {
        return Ok(resolved);
    }

    // The local time was skipped by a DST transition. Moving the clock forward
    // by the size of the gap is the same as reading it with the smaller offset
    // that was in effect before the transition.
    let earlier_offset = min_by_key(offset, resolved.offset(), |candidate| {
        candidate.whole_seconds()
    });
    Ok(local.assume_offset(earlier_offset))
}
