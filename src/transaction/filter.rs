//! Describes which transactions a search should return.

use rust_decimal::Decimal;
use time::Date;

use crate::{
    transaction::{Transaction, TransactionId, TransactionStatus, TransactionType},
    user::UserID,
};

/// Constrains a transaction search.
///
/// Every field that is `Some` must match. The description matches if it
/// contains the filter text, ignoring case. Every other field must be equal.
/// A filter with no fields set matches every transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only the transaction with this ID.
    pub id: Option<TransactionId>,
    /// Text the description must contain, ignoring case.
    pub description: Option<String>,
    /// Only transactions for this month.
    pub month: Option<u32>,
    /// Only transactions for this year.
    pub year: Option<i32>,
    /// Only transactions owned by this user.
    pub user_id: Option<UserID>,
    /// Only transactions with exactly this value.
    pub value: Option<Decimal>,
    /// Only transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only transactions with this status.
    pub status: Option<TransactionStatus>,
    /// Only transactions recorded on this date.
    pub registration_date: Option<Date>,
}

impl TransactionFilter {
    /// A filter that matches every transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match descriptions containing `text`, ignoring case.
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_owned());
        self
    }

    /// Match transactions for `month`.
    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Match transactions for `year`.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Match transactions owned by `user_id`.
    pub fn user_id(mut self, user_id: UserID) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Match transactions with exactly `value`.
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Match transactions of `transaction_type`.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Match transactions with `status`.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether `transaction` satisfies every constraint in the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        fn equal_or_unset<T: PartialEq>(want: &Option<T>, got: &T) -> bool {
            want.as_ref().is_none_or(|want| want == got)
        }

        let description_matches = self.description.as_ref().is_none_or(|text| {
            transaction
                .description
                .to_lowercase()
                .contains(&text.to_lowercase())
        });

        description_matches
            && self.id.is_none_or(|id| transaction.id == Some(id))
            && equal_or_unset(&self.month, &transaction.month)
            && equal_or_unset(&self.year, &transaction.year)
            && self.user_id.is_none_or(|id| transaction.user_id == Some(id))
            && self.value.is_none_or(|value| transaction.value == Some(value))
            && self
                .transaction_type
                .is_none_or(|kind| transaction.transaction_type == Some(kind))
            && equal_or_unset(&self.status, &transaction.status)
            && equal_or_unset(&self.registration_date, &transaction.registration_date)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{
        transaction::{Transaction, TransactionStatus, TransactionType},
        user::UserID,
    };

    use super::TransactionFilter;

    fn salary() -> Transaction {
        Transaction::build("Monthly Salary")
            .id(1)
            .month(3)
            .year(2024)
            .user_id(UserID::new(7))
            .value(Decimal::new(250050, 2))
            .transaction_type(TransactionType::Income)
            .finalize()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(TransactionFilter::new().matches(&salary()));
    }

    #[test]
    fn description_matches_substring_ignoring_case() {
        assert!(TransactionFilter::new().description("salary").matches(&salary()));
        assert!(TransactionFilter::new().description("HLY SAL").matches(&salary()));
        assert!(!TransactionFilter::new().description("rent").matches(&salary()));
    }

    #[test]
    fn description_ignores_case_outside_ascii() {
        let transaction = Transaction::build("SALÁRIO").finalize();

        assert!(
            TransactionFilter::new()
                .description("salário")
                .matches(&transaction)
        );
    }

    #[test]
    fn other_fields_must_be_equal() {
        let transaction = salary();

        assert!(TransactionFilter::new().month(3).year(2024).matches(&transaction));
        assert!(!TransactionFilter::new().month(4).matches(&transaction));
        assert!(!TransactionFilter::new().user_id(UserID::new(8)).matches(&transaction));
        assert!(
            !TransactionFilter::new()
                .transaction_type(TransactionType::Expense)
                .matches(&transaction)
        );
        assert!(
            !TransactionFilter::new()
                .status(TransactionStatus::Confirmed)
                .matches(&transaction)
        );
    }

    #[test]
    fn value_is_compared_numerically() {
        let transaction = salary();

        assert!(
            TransactionFilter::new()
                .value(Decimal::new(25005000, 4))
                .matches(&transaction)
        );
        assert!(
            !TransactionFilter::new()
                .value(Decimal::from(2500))
                .matches(&transaction)
        );
    }
}
