//! Stores backed by a SQLite database.
//!
//! The stores borrow a [Connection] rather than owning it, so a user store
//! and a transaction store can be built over the same connection. Each store
//! opens its own storage transaction per unit of work; units of work cannot be
//! nested or shared between stores.

mod transaction;
mod user;

pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use rusqlite::Connection;

use crate::Error;

/// Run `work` inside a SQLite transaction on `connection`.
///
/// The transaction is rolled back when it is dropped without being committed,
/// i.e. when `work` returns an error.
fn run_atomically<S, T>(
    connection: &Connection,
    store: &S,
    work: impl FnOnce(&S) -> Result<T, Error>,
) -> Result<T, Error> {
    let transaction = connection.unchecked_transaction()?;
    let value = work(store)?;
    transaction.commit()?;

    Ok(value)
}

#[cfg(test)]
mod service_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        AuthenticationError, BusinessRule, Error, PasswordHash, Transaction, TransactionFilter,
        TransactionService, TransactionStatus, TransactionType, User, UserID, UserService,
        db::initialize,
    };

    use super::{SQLiteTransactionStore, SQLiteUserStore};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
    }

    fn register_test_user(connection: &Connection) -> User {
        UserService::new(SQLiteUserStore::new(connection))
            .register(User::build(
                "name",
                "email@email.com",
                PasswordHash::new("senha", 4).unwrap(),
            ))
            .unwrap()
    }

    fn salary(user_id: UserID) -> Transaction {
        Transaction::build("Salary")
            .month(1)
            .year(2020)
            .user_id(user_id)
            .value(Decimal::from(10))
            .transaction_type(TransactionType::Income)
            .finalize()
    }

    #[test]
    fn save_salary_generates_id_with_pending_status() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = TransactionService::new(SQLiteTransactionStore::new(&connection));

        let saved = service.save(salary(user.id)).unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.status, TransactionStatus::Pending);
        assert_eq!(service.get_by_id(1), Ok(Some(saved)));
    }

    #[test]
    fn invalid_transaction_is_not_stored() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = TransactionService::new(SQLiteTransactionStore::new(&connection));
        let mut transaction = salary(user.id);
        transaction.year = 20;

        let result = service.save(transaction);

        assert_eq!(result, Err(Error::BusinessRule(BusinessRule::InvalidYear)));
        assert_eq!(service.search(&TransactionFilter::new()), Ok(vec![]));
    }

    #[test]
    fn status_change_is_persisted() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = TransactionService::new(SQLiteTransactionStore::new(&connection));
        let mut saved = service.save(salary(user.id)).unwrap();

        service
            .update_status(&mut saved, TransactionStatus::Cancelled)
            .unwrap();

        let stored = service.get_by_id(1).unwrap().unwrap();
        assert_eq!(stored.status, TransactionStatus::Cancelled);
    }

    #[test]
    fn search_by_user_and_description() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = TransactionService::new(SQLiteTransactionStore::new(&connection));
        let saved = service.save(salary(user.id)).unwrap();

        let found = service
            .search(&TransactionFilter::new().user_id(user.id).description("salary"))
            .unwrap();
        let not_found = service
            .search(&TransactionFilter::new().user_id(UserID::new(2)))
            .unwrap();

        assert_eq!(found, vec![saved]);
        assert!(not_found.is_empty());
    }

    #[test]
    fn deleted_transaction_is_gone() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = TransactionService::new(SQLiteTransactionStore::new(&connection));
        let saved = service.save(salary(user.id)).unwrap();

        service.delete(&saved).unwrap();

        assert_eq!(service.get_by_id(1), Ok(None));
        assert_eq!(service.delete(&saved), Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn registered_user_can_log_in() {
        let connection = get_test_connection();
        let user = register_test_user(&connection);
        let service = UserService::new(SQLiteUserStore::new(&connection));

        assert_eq!(service.authenticate("email@email.com", "senha"), Ok(user));
        assert_eq!(
            service.authenticate("email@email.com", "Senha"),
            Err(Error::Authentication(AuthenticationError::InvalidPassword))
        );
        assert_eq!(
            service.authenticate("other@email.com", "senha"),
            Err(Error::Authentication(AuthenticationError::UserNotFound))
        );
    }

    #[test]
    fn register_twice_fails_with_duplicate_email() {
        let connection = get_test_connection();
        register_test_user(&connection);
        let service = UserService::new(SQLiteUserStore::new(&connection));

        let result = service.register(User::build(
            "other",
            "email@email.com",
            PasswordHash::new_unchecked("hunter2"),
        ));

        assert_eq!(result, Err(Error::BusinessRule(BusinessRule::DuplicateEmail)));
    }
}
