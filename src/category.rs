//! Defines the fixed set of labels used to classify expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was spent on.
///
/// The set of categories is closed. The label of each category is the
/// variant name, e.g. `"Food"`, and it is what gets stored in the database
/// and sent over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    Food,
    /// Public transport, fuel, taxis.
    Transport,
    /// Rent, mortgage, utilities.
    Housing,
    /// Doctors, pharmacy, insurance.
    Health,
    /// Courses, books, tuition.
    Education,
    /// Movies, games, concerts.
    Entertainment,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Health,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    /// The label for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its exact, case-sensitive label.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `label` is not the label of any category.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
            .ok_or_else(|| Error::InvalidCategory(label.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;

        label
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
