//! Defines the filter used to query expenses.

use time::Date;

use crate::Category;

/// Selects which expenses [ExpenseService::query](crate::ExpenseService::query) returns.
///
/// Every field is optional and unset fields impose no constraint. Date bounds
/// are inclusive. A filter is only checked when it is used, so it is possible
/// to build one with `from_date` after `to_date`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Only include expenses on or after this date.
    pub from_date: Option<Date>,
    /// Only include expenses on or before this date.
    pub to_date: Option<Date>,
    /// Only include expenses in this category.
    pub category: Option<Category>,
}
