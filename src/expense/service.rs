//! Validates new expenses and translates filters into store queries.

use rust_decimal::Decimal;

use crate::{
    Error, Expense, ExpenseFilter, StoredExpense,
    clock::Clock,
    expense::MAX_DESCRIPTION_LENGTH,
    stores::{ExpenseQuery, ExpenseStore},
};

/// The entry point for creating and querying expenses.
///
/// The service holds no state of its own: the current time comes from the
/// [Clock] and all records live in the [ExpenseStore].
#[derive(Debug, Clone)]
pub struct ExpenseService<C, S> {
    clock: C,
    store: S,
}

impl<C, S> ExpenseService<C, S>
where
    C: Clock,
    S: ExpenseStore,
{
    /// Create a service that reads the time from `clock` and saves expenses to `store`.
    pub fn new(clock: C, store: S) -> Self {
        Self { clock, store }
    }

    /// The store that expenses are saved to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `expense` and save it to the store.
    ///
    /// Nothing is written to the store unless every check passes.
    ///
    /// # Errors
    /// This function will return, checked in this order:
    /// - [Error::InvalidAmount] if the amount is zero or negative,
    /// - [Error::FutureDate] if the date is after today according to the clock,
    /// - [Error::DescriptionTooLong] if the description is over [MAX_DESCRIPTION_LENGTH] characters,
    /// - or any error from the store.
    pub fn create(&self, expense: Expense) -> Result<StoredExpense, Error> {
        if let Err(error) = self.validate(&expense) {
            tracing::debug!("rejected expense {expense:?}: {error}");
            return Err(error);
        }

        let stored = self.store.insert(&expense)?;
        tracing::info!("created expense {}", stored.id);

        Ok(stored)
    }

    /// Get the expenses that match `filter`, in the order the store returns them.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidDateRange] if both dates are
    /// set and `from_date` is after `to_date`, or any error from the store.
    pub fn query(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        if let (Some(from_date), Some(to_date)) = (filter.from_date, filter.to_date)
            && from_date > to_date
        {
            return Err(Error::InvalidDateRange { from_date, to_date });
        }

        let query = ExpenseQuery {
            from_date: filter.from_date,
            to_date: filter.to_date,
            category: filter.category,
        };

        let expenses = self
            .store
            .query(&query)?
            .into_iter()
            .map(Expense::from)
            .collect();

        Ok(expenses)
    }

    fn validate(&self, expense: &Expense) -> Result<(), Error> {
        if expense.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(expense.amount));
        }

        if expense.date > self.clock.now().date() {
            return Err(Error::FutureDate(expense.date));
        }

        if let Some(description) = &expense.description {
            let length = description.chars().count();

            if length > MAX_DESCRIPTION_LENGTH {
                return Err(Error::DescriptionTooLong(length));
            }
        }

        // Unknown category labels are rejected when the input is parsed.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Date, macros::date, macros::datetime};

    use crate::{
        Category, Error, Expense, ExpenseFilter, ExpenseService,
        clock::FixedClock,
        expense::MAX_DESCRIPTION_LENGTH,
        stores::{ExpenseStore, InMemoryExpenseStore, sqlite::SQLiteExpenseStore},
    };

    const TODAY: Date = date!(2024 - 10 - 10);
    const EXPENSE_DATE: Date = date!(2023 - 04 - 15);

    fn clock() -> FixedClock {
        FixedClock(datetime!(2024-10-10 08:00 UTC))
    }

    fn in_memory_service() -> ExpenseService<FixedClock, InMemoryExpenseStore> {
        ExpenseService::new(clock(), InMemoryExpenseStore::new())
    }

    fn sqlite_service() -> ExpenseService<FixedClock, SQLiteExpenseStore> {
        let connection = Connection::open_in_memory().unwrap();
        let store = SQLiteExpenseStore::new(Arc::new(Mutex::new(connection))).unwrap();
        ExpenseService::new(clock(), store)
    }

    /// Run `test` once against each store implementation.
    macro_rules! for_each_store {
        ($test:ident) => {
            $test(in_memory_service());
            $test(sqlite_service());
        };
    }

    fn expense(amount: &str, date: Date, category: Category, description: &str) -> Expense {
        Expense::new(amount.parse().unwrap(), date, category).description(description)
    }

    #[track_caller]
    fn assert_last_expense<S: ExpenseStore>(store: &S, want: &Expense) {
        assert!(
            store.count().unwrap() > 0,
            "No expense was inserted into the store"
        );
        let last = store.most_recent().unwrap().expect("store is empty");
        assert_eq!(&Expense::from(last), want);
    }

    #[track_caller]
    fn assert_no_expense_inserted<S: ExpenseStore>(store: &S) {
        assert_eq!(
            store.count().unwrap(),
            0,
            "An unexpected expense was inserted into the store"
        );
    }

    fn create_succeeds_for_every_category<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        for category in Category::ALL {
            let want = expense(
                "50.00",
                EXPENSE_DATE,
                category,
                &format!("{category} expense"),
            );

            service.create(want.clone()).unwrap();

            assert_last_expense(service.store(), &want);
        }
    }

    #[test]
    fn create_expense_success() {
        for_each_store!(create_succeeds_for_every_category);
    }

    fn rejects_non_positive_amounts<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        for amount in ["-10.00", "0", "0.00", "-0.01"] {
            let result = service.create(expense(amount, EXPENSE_DATE, Category::Food, "Invalid"));

            assert_eq!(result, Err(Error::InvalidAmount(amount.parse().unwrap())));
        }

        assert_no_expense_inserted(service.store());
    }

    #[test]
    fn create_expense_non_positive_amount() {
        for_each_store!(rejects_non_positive_amounts);
    }

    fn rejects_future_date<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let tomorrow = date!(2024 - 10 - 11);

        let result = service.create(expense("30.00", tomorrow, Category::Transport, "Future"));

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
        assert_no_expense_inserted(service.store());
    }

    #[test]
    fn create_expense_future_date() {
        for_each_store!(rejects_future_date);
    }

    fn accepts_today<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let want = expense("30.00", TODAY, Category::Transport, "Bus");

        service.create(want.clone()).unwrap();

        assert_last_expense(service.store(), &want);
    }

    #[test]
    fn create_expense_dated_today() {
        for_each_store!(accepts_today);
    }

    fn accepts_empty_description<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let want = expense("25.00", EXPENSE_DATE, Category::Entertainment, "");

        service.create(want.clone()).unwrap();

        assert_last_expense(service.store(), &want);
    }

    #[test]
    fn create_expense_empty_description() {
        for_each_store!(accepts_empty_description);
    }

    fn accepts_missing_description<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let want = Expense::new(Decimal::new(2500, 2), EXPENSE_DATE, Category::Other);

        service.create(want.clone()).unwrap();

        assert_last_expense(service.store(), &want);
    }

    #[test]
    fn create_expense_without_description() {
        for_each_store!(accepts_missing_description);
    }

    fn description_length_limit<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let longest = "A".repeat(MAX_DESCRIPTION_LENGTH);
        let too_long = "A".repeat(MAX_DESCRIPTION_LENGTH + 1);

        let result = service.create(expense("75.00", EXPENSE_DATE, Category::Other, &too_long));
        assert_eq!(
            result,
            Err(Error::DescriptionTooLong(MAX_DESCRIPTION_LENGTH + 1))
        );
        assert_no_expense_inserted(service.store());

        let want = expense("75.00", EXPENSE_DATE, Category::Other, &longest);
        service.create(want.clone()).unwrap();
        assert_last_expense(service.store(), &want);
    }

    #[test]
    fn create_expense_long_description() {
        for_each_store!(description_length_limit);
    }

    #[test]
    fn description_length_counts_characters_not_bytes() {
        let service = in_memory_service();
        let description = "é".repeat(MAX_DESCRIPTION_LENGTH);

        let result = service.create(expense("1.00", EXPENSE_DATE, Category::Food, &description));

        assert!(result.is_ok(), "got {result:?}");
    }

    #[test]
    fn amount_is_checked_before_date() {
        let service = in_memory_service();

        let result = service.create(expense(
            "-1.00",
            date!(2030 - 01 - 01),
            Category::Food,
            &"A".repeat(300),
        ));

        assert_eq!(result, Err(Error::InvalidAmount(Decimal::NEGATIVE_ONE)));
    }

    fn insert_test_data<S: ExpenseStore>(service: &ExpenseService<FixedClock, S>) {
        for (amount, category) in [
            ("50.00", Category::Food),
            ("100.00", Category::Transport),
            ("150.00", Category::Food),
        ] {
            service
                .create(expense(
                    amount,
                    EXPENSE_DATE,
                    category,
                    &format!("{category} expense"),
                ))
                .unwrap();
        }
    }

    fn query_count<S: ExpenseStore>(
        service: &ExpenseService<FixedClock, S>,
        filter: ExpenseFilter,
    ) -> usize {
        service.query(&filter).unwrap().len()
    }

    fn filters_by_date_and_category<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        insert_test_data(&service);
        let day_before = date!(2023 - 04 - 14);
        let day_after = date!(2023 - 04 - 16);

        let cases = [
            (ExpenseFilter::default(), 3),
            (
                ExpenseFilter {
                    from_date: Some(EXPENSE_DATE),
                    to_date: Some(EXPENSE_DATE),
                    category: None,
                },
                3,
            ),
            (
                ExpenseFilter {
                    from_date: Some(EXPENSE_DATE),
                    ..Default::default()
                },
                3,
            ),
            (
                ExpenseFilter {
                    to_date: Some(EXPENSE_DATE),
                    ..Default::default()
                },
                3,
            ),
            (
                ExpenseFilter {
                    from_date: Some(day_after),
                    ..Default::default()
                },
                0,
            ),
            (
                ExpenseFilter {
                    to_date: Some(day_before),
                    ..Default::default()
                },
                0,
            ),
            (
                ExpenseFilter {
                    category: Some(Category::Food),
                    ..Default::default()
                },
                2,
            ),
            (
                ExpenseFilter {
                    category: Some(Category::Other),
                    ..Default::default()
                },
                0,
            ),
            (
                ExpenseFilter {
                    from_date: Some(EXPENSE_DATE),
                    to_date: Some(EXPENSE_DATE),
                    category: Some(Category::Transport),
                },
                1,
            ),
        ];

        for (filter, want) in cases {
            let got = query_count(&service, filter.clone());
            assert_eq!(got, want, "got {got} expenses for {filter:?}, want {want}");
        }
    }

    #[test]
    fn list_expenses_with_filters() {
        for_each_store!(filters_by_date_and_category);
    }

    fn rejects_inverted_date_range<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        insert_test_data(&service);
        let day_before = date!(2023 - 04 - 14);

        let result = service.query(&ExpenseFilter {
            from_date: Some(EXPENSE_DATE),
            to_date: Some(day_before),
            category: None,
        });
        assert_eq!(
            result,
            Err(Error::InvalidDateRange {
                from_date: EXPENSE_DATE,
                to_date: day_before
            })
        );

        let swapped = service.query(&ExpenseFilter {
            from_date: Some(day_before),
            to_date: Some(EXPENSE_DATE),
            category: None,
        });
        assert_eq!(swapped.map(|expenses| expenses.len()), Ok(3));
    }

    #[test]
    fn list_expenses_invalid_date_range() {
        for_each_store!(rejects_inverted_date_range);
    }

    fn created_expense_round_trips<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        let want = expense("12.345", EXPENSE_DATE, Category::Education, "Textbook");
        service.create(want.clone()).unwrap();

        let got = service
            .query(&ExpenseFilter {
                from_date: Some(EXPENSE_DATE),
                to_date: Some(EXPENSE_DATE),
                category: Some(Category::Education),
            })
            .unwrap();

        assert_eq!(got, vec![want]);
        assert_eq!(got[0].amount.to_string(), "12.345");
    }

    #[test]
    fn create_then_query_round_trip() {
        for_each_store!(created_expense_round_trips);
    }

    fn query_is_idempotent<S: ExpenseStore>(service: ExpenseService<FixedClock, S>) {
        insert_test_data(&service);
        let filter = ExpenseFilter {
            category: Some(Category::Food),
            ..Default::default()
        };

        let first = service.query(&filter).unwrap();
        let second = service.query(&filter).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn repeated_queries_return_same_result() {
        for_each_store!(query_is_idempotent);
    }
}
