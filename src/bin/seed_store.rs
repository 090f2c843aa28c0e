use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use serde_json::json;

use finance_summary::{DEFAULT_NAMESPACE, SQLiteKeyValueStore, UserID, transactions_key};

/// A utility for creating a key-value store with sample transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user the sample transactions belong to.
    #[arg(long, short, default_value = "1")]
    user_id: String,

    /// The prefix of the storage key.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
}

/// Create and populate a key-value store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let store = SQLiteKeyValueStore::new(Arc::new(Mutex::new(conn)))?;

    println!("Creating sample transactions...");

    let transactions = json!([
        {
            "id": "1",
            "name": "Salário",
            "type": "positive",
            "amount": "1000",
            "category": "salary",
            "date": "2023-05-10T12:00:00.000Z"
        },
        {
            "id": "2",
            "name": "Aluguel",
            "type": "negative",
            "amount": "300",
            "category": "house",
            "date": "2023-05-15T12:00:00.000Z"
        },
        {
            "id": "3",
            "name": "Pizza",
            "type": "negative",
            "amount": "59.9",
            "category": "food",
            "date": "2023-05-03T23:30:00.000Z"
        }
    ]);

    let key = transactions_key(&args.namespace, &UserID::new(args.user_id));
    store.set(&key, &transactions.to_string())?;

    println!("Success! Transactions stored under \"{key}\".");

    Ok(())
}
