//! Implements a SQLite backed expense store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, OptionalExtension, Row, params_from_iter, types::Value};
use rust_decimal::Decimal;

use crate::{
    Error, Expense, StoredExpense,
    db::{CreateTable, MapRow},
    stores::{ExpenseQuery, ExpenseStore},
};

/// Stores expenses in a SQLite database.
///
/// Amounts are stored as decimal text so that no precision is lost to floating point.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The expense table is created if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the lock for `connection` is poisoned or the table
    /// could not be created.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, Error> {
        let store = Self { connection };
        Self::create_table(&*store.lock()?)?;

        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Create a new expense in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn insert(&self, expense: &Expense) -> Result<StoredExpense, Error> {
        let connection = self.lock()?;

        let stored = connection
            .prepare(
                "INSERT INTO expense (amount, date, category, description)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, amount, date, category, description",
            )?
            .query_row(
                (
                    expense.amount.to_string(),
                    expense.date,
                    expense.category,
                    expense.description.as_deref(),
                ),
                Self::map_row,
            )?;

        Ok(stored)
    }

    /// Get the expense with the largest ID.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn most_recent(&self) -> Result<Option<StoredExpense>, Error> {
        let expense = self
            .lock()?
            .prepare(
                "SELECT id, amount, date, category, description FROM expense
                 ORDER BY id DESC LIMIT 1",
            )?
            .query_row([], Self::map_row)
            .optional()?;

        Ok(expense)
    }

    /// Get the total number of expenses in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        let count: i64 = self
            .lock()?
            .query_row("SELECT COUNT(id) FROM expense", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    /// Query for expenses in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn query(&self, query: &ExpenseQuery) -> Result<Vec<StoredExpense>, Error> {
        let mut query_string_parts =
            vec!["SELECT id, amount, date, category, description FROM expense".to_string()];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(from_date) = query.from_date {
            query_parameters.push(Value::Text(from_date.to_string()));
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len()));
        }

        if let Some(to_date) = query.to_date {
            query_parameters.push(Value::Text(to_date.to_string()));
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len()));
        }

        if let Some(category) = query.category {
            query_parameters.push(Value::Text(category.as_str().to_owned()));
            where_clause_parts.push(format!("category = ?{}", query_parameters.len()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY id ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.lock()?
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expense (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount TEXT NOT NULL,
                    date TEXT NOT NULL,
                    category TEXT NOT NULL,
                    description TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = StoredExpense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let raw_amount: String = row.get(offset + 1)?;
        let amount = Decimal::from_str(&raw_amount).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 1,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;
        let date = row.get(offset + 2)?;
        let category = row.get(offset + 3)?;
        let description = row.get(offset + 4)?;

        Ok(StoredExpense {
            id,
            amount,
            date,
            category,
            description,
        })
    }
}
