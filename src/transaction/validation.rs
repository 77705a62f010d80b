//! The rules a transaction must satisfy before it can be stored.

use rust_decimal::Decimal;

use crate::{BusinessRule, Error, transaction::Transaction, user::UserID};

/// Check that `transaction` may be stored.
///
/// The checks run in a fixed order and stop at the first failure:
/// description, month, year, owner, value and finally type.
///
/// # Errors
///
/// Returns an [Error::BusinessRule] describing the first field that failed.
pub fn validate(transaction: &Transaction) -> Result<(), Error> {
    if transaction.description.trim().is_empty() {
        return Err(BusinessRule::InvalidDescription.into());
    }

    if !(1..=12).contains(&transaction.month) {
        return Err(BusinessRule::InvalidMonth.into());
    }

    if !(1000..=9999).contains(&transaction.year) {
        return Err(BusinessRule::InvalidYear.into());
    }

    if !transaction
        .user_id
        .as_ref()
        .is_some_and(UserID::can_own_transactions)
    {
        return Err(BusinessRule::InvalidUser.into());
    }

    if !transaction.value.is_some_and(|value| value > Decimal::ZERO) {
        return Err(BusinessRule::InvalidValue.into());
    }

    if transaction.transaction_type.is_none() {
        return Err(BusinessRule::MissingType.into());
    }

    Ok(())
}
