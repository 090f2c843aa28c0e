use std::{
    error::Error,
    io::{self, BufRead},
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_summary::{
    DEFAULT_CURRENCY, DEFAULT_LOCALE, DEFAULT_NAMESPACE, DEFAULT_TIMEZONE, RecordPolicy,
    SQLiteKeyValueStore, Summary, SummaryConfig, SummaryRefresher, UserID, UserProfile,
};

/// Prints the dashboard summary of a user's stored transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite key-value store.
    #[arg(long)]
    db_path: String,

    /// The ID of the user whose transactions are summarised.
    #[arg(long)]
    user_id: String,

    /// The prefix of the storage key.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// The locale to format amounts, dates and labels in, e.g. "pt-BR".
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// The ISO 4217 currency code amounts are displayed in.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// The canonical timezone dates are displayed in.
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Skip invalid transaction records instead of failing.
    #[arg(long)]
    skip_invalid: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Print the summary again every time a line is read from stdin.
    #[arg(long)]
    watch: bool,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let record_policy = if args.skip_invalid {
        RecordPolicy::SkipInvalid
    } else {
        RecordPolicy::FailFast
    };
    let config = SummaryConfig::new(&args.locale, &args.currency, &args.timezone)?
        .with_namespace(&args.namespace)
        .with_record_policy(record_policy);

    let conn = Connection::open(&args.db_path)?;
    let store = SQLiteKeyValueStore::new(Arc::new(Mutex::new(conn)))?;
    let user = UserProfile::new(UserID::new(&args.user_id), "");
    let refresher = SummaryRefresher::new(store, user, config);

    if let Some(summary) = refresher.refresh()? {
        print_summary(&summary, args.json)?;
    }

    if args.watch {
        for line in io::stdin().lock().lines() {
            line?;

            match refresher.refresh() {
                Ok(Some(summary)) => print_summary(&summary, args.json)?,
                Ok(None) => {}
                Err(error) => tracing::error!("Could not refresh the summary: {error}"),
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &Summary, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    let highlights = &summary.highlights;
    for (title, highlight) in [
        ("Entries", &highlights.entries),
        ("Expenses", &highlights.expenses),
        ("Total", &highlights.total),
    ] {
        println!(
            "{title:<10}{:>18}  {}",
            highlight.amount, highlight.last_transaction
        );
    }

    println!();

    for transaction in &summary.transactions {
        println!(
            "{}  {:<24}{:>16}  {}",
            transaction.date, transaction.name, transaction.amount, transaction.category
        );
    }

    if summary.skipped > 0 {
        println!("\nSkipped {} invalid transaction(s).", summary.skipped);
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        filter::LevelFilter::DEBUG
    } else {
        filter::LevelFilter::WARN
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();
}
