pub mod errors;

use std::sync::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use crate::manager_db::errors::DBError;

const API_KEY: &str = "api_key";

/// Durable storage of the one credential the weather service needs
pub trait CredentialStore {
    /// Returns the stored credential, None if nothing or an empty value is stored
    fn get_credential(&self) -> Result<Option<String>, DBError>;

    /// Stores the credential, replacing any previous one
    fn set_credential(&self, api_key: &str) -> Result<(), DBError>;
}

pub struct CredentialDB {
    db_conn: Mutex<Connection>,
}

impl CredentialDB {

    /// Creates a new instance of CredentialDB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
           "CREATE TABLE IF NOT EXISTS credential (
                name text primary key,
                value text not null
           )",
           [],
        )?;

        Ok(CredentialDB { db_conn: Mutex::new(db_conn) })
    }
}

impl CredentialStore for CredentialDB {
    fn get_credential(&self) -> Result<Option<String>, DBError> {
        let db_conn = self.db_conn.lock()?;
        let value: Option<String> = db_conn
            .query_row(
                "SELECT value FROM credential WHERE name = ?1;",
                params![API_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value.filter(|v| !v.is_empty()))
    }

    /// Surrounding whitespace is removed before the credential is stored
    ///
    /// # Arguments
    ///
    /// * 'api_key' - the credential to store
    fn set_credential(&self, api_key: &str) -> Result<(), DBError> {
        let db_conn = self.db_conn.lock()?;
        db_conn.execute(
            "INSERT INTO credential (name, value) values (?1, ?2)
                ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            params![API_KEY, api_key.trim()],
        )?;

        Ok(())
    }
}
