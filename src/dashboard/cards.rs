//! The three highlight cards: entries, expenses and the overall total.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{config::SummaryConfig, dashboard::aggregation::AggregationResult, timezone::to_local};

/// The formatted contents of one highlight card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// The formatted total, e.g. "R$ 1.000,00".
    pub amount: String,
    /// The most recent activity, or a placeholder if there was none.
    pub last_transaction: String,
}

/// The highlight cards shown above the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSummary {
    /// Money received.
    pub entries: Highlight,
    /// Money spent.
    pub expenses: Highlight,
    /// Entries minus expenses.
    pub total: Highlight,
}

/// Format the aggregated totals and latest dates as highlight cards.
///
/// The total's period label ends at the most recent expense, so it shows the
/// no transactions label whenever there are no expenses, even if there are
/// entries.
pub(crate) fn highlight_summary(
    aggregation: &AggregationResult,
    config: &SummaryConfig,
) -> HighlightSummary {
    let locale = config.locale;
    let last_entry = aggregation
        .last_entry_date
        .map(|date| to_local_date(date, config));
    let last_expense = aggregation
        .last_expense_date
        .map(|date| to_local_date(date, config));

    HighlightSummary {
        entries: Highlight {
            amount: locale.format_currency(aggregation.entries_total, &config.currency),
            last_transaction: label_or_placeholder(last_entry, config, |date| {
                locale.last_entry_label(date)
            }),
        },
        expenses: Highlight {
            amount: locale.format_currency(aggregation.expenses_total, &config.currency),
            last_transaction: label_or_placeholder(last_expense, config, |date| {
                locale.last_expense_label(date)
            }),
        },
        total: Highlight {
            amount: locale.format_currency(aggregation.net_total(), &config.currency),
            last_transaction: label_or_placeholder(last_expense, config, |date| {
                locale.interval_label(date)
            }),
        },
    }
}

fn label_or_placeholder(
    date: Option<Date>,
    config: &SummaryConfig,
    label: impl FnOnce(Date) -> String,
) -> String {
    match date {
        Some(date) => label(date),
        None => config.locale.no_transactions_label().to_owned(),
    }
}

/// The calendar date of `date_time` in the configured timezone.
pub(crate) fn to_local_date(date_time: OffsetDateTime, config: &SummaryConfig) -> Date {
    to_local(date_time, config.timezone).date()
}
