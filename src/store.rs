//! Key-value storage that holds each user's serialized transactions.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, user::UserID};

/// Read access to a key-value store of serialized payloads.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if the key is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
}

/// The key under which the transactions of `user_id` are stored, e.g.
/// "@gofinances:transactions_user:42".
pub fn transactions_key(namespace: &str, user_id: &UserID) -> String {
    format!("{namespace}:transactions_user:{user_id}")
}

impl KeyValueStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(HashMap::get(self, key).cloned())
    }
}

/// Create the key-value table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// A key-value store backed by a SQLite table.
#[derive(Debug, Clone)]
pub struct SQLiteKeyValueStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteKeyValueStore {
    /// Create a store using `connection`, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::SqlError] if the table could not be created, or
    /// [Error::DatabaseLockError] if the connection lock is poisoned.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, Error> {
        {
            let connection = connection.lock().map_err(|_| Error::DatabaseLockError)?;
            create_key_value_table(&connection)?;
        }

        Ok(Self { connection })
    }

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [Error::SqlError] if the value could not be written, or
    /// [Error::DatabaseLockError] if the connection lock is poisoned.
    pub fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

impl KeyValueStore for SQLiteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                (key,),
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;

    use super::{KeyValueStore, SQLiteKeyValueStore, transactions_key};
    use crate::user::UserID;

    fn get_test_store() -> SQLiteKeyValueStore {
        let conn = Connection::open_in_memory().unwrap();
        SQLiteKeyValueStore::new(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn builds_namespaced_key() {
        let key = transactions_key("@gofinances", &UserID::new("42"));

        assert_eq!(key, "@gofinances:transactions_user:42");
    }

    #[test]
    fn missing_key_is_none() {
        let store = get_test_store();

        assert_eq!(store.get("nope"), Ok(None));
    }

    #[test]
    fn set_then_get() {
        let store = get_test_store();

        store.set("a", "[]").unwrap();

        assert_eq!(store.get("a"), Ok(Some("[]".to_owned())));
    }

    #[test]
    fn set_replaces_existing_value() {
        let store = get_test_store();

        store.set("a", "first").unwrap();
        store.set("a", "second").unwrap();

        assert_eq!(store.get("a"), Ok(Some("second".to_owned())));
    }

    #[test]
    fn new_keeps_existing_rows() {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        SQLiteKeyValueStore::new(conn.clone())
            .unwrap()
            .set("a", "kept")
            .unwrap();

        let store = SQLiteKeyValueStore::new(conn).unwrap();

        assert_eq!(store.get("a"), Ok(Some("kept".to_owned())));
    }

    #[test]
    fn hash_map_store() {
        let store = HashMap::from([("k".to_owned(), "v".to_owned())]);

        assert_eq!(KeyValueStore::get(&store, "k"), Ok(Some("v".to_owned())));
        assert_eq!(KeyValueStore::get(&store, "x"), Ok(None));
    }
}
