//! Implements a SQLite backed user store.

use rusqlite::{Connection, Row};

use crate::{
    Error, PasswordHash,
    db::{CreateTable, MapRow},
    stores::{Atomic, UserStore, sqlite::run_atomically},
    user::{User, UserBuilder, UserID},
};

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone, Copy)]
pub struct SQLiteUserStore<'c> {
    connection: &'c Connection,
}

impl<'c> SQLiteUserStore<'c> {
    /// Create a new user store.
    pub fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore<'_> {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns a [BusinessRule::DuplicateEmail](crate::BusinessRule::DuplicateEmail)
    /// error if the email is taken, or [Error::SqlError] if an SQL related error occurred.
    fn create(&self, builder: UserBuilder) -> Result<User, Error> {
        self.connection.execute(
            "INSERT INTO user (name, email, password) VALUES (?1, ?2, ?3)",
            (
                &builder.name,
                &builder.email,
                builder.password_hash.as_ref(),
            ),
        )?;

        let id = UserID::new(self.connection.last_insert_rowid());

        Ok(builder.finalize(id))
    }

    /// Get the user from the database that has the specified `id`, or return [Error::NotFound] if such user does not exist.
    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .prepare("SELECT id, name, email, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|e| e.into())
    }

    /// Get the user from the database that has the specified `email` address, or return [Error::NotFound] if such user does not exist.
    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        self.connection
            .prepare("SELECT id, name, email, password FROM user WHERE email = :email")?
            .query_row(&[(":email", email)], SQLiteUserStore::map_row)
            .map_err(|e| e.into())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, Error> {
        self.connection
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM user WHERE email = ?1)",
                (email,),
                |row| row.get(0),
            )
            .map_err(|e| e.into())
    }
}

impl Atomic for SQLiteUserStore<'_> {
    fn atomically<T>(&self, work: impl FnOnce(&Self) -> Result<T, Error>) -> Result<T, Error> {
        run_atomically(self.connection, self, work)
    }
}

impl CreateTable for SQLiteUserStore<'_> {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore<'_> {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let email = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;

        Ok(User {
            id: UserID::new(raw_id),
            name,
            email,
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        BusinessRule, Error, PasswordHash,
        db::initialize,
        stores::{Atomic, UserStore},
        user::{User, UserID},
    };

    use super::SQLiteUserStore;

    fn get_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
    }

    #[test]
    fn insert_user_succeeds() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user = store
            .create(User::build("name", "hello@world.com", password_hash.clone()))
            .unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.name, "name");
        assert_eq!(inserted_user.email, "hello@world.com");
        assert_eq!(inserted_user.password_hash, password_hash);
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);

        assert!(
            store
                .create(User::build(
                    "name",
                    "hello@world.com",
                    PasswordHash::new_unchecked("hunter2")
                ))
                .is_ok()
        );

        assert_eq!(
            store.create(User::build(
                "other",
                "hello@world.com",
                PasswordHash::new_unchecked("hunter3")
            )),
            Err(Error::BusinessRule(BusinessRule::DuplicateEmail))
        );
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);

        assert_eq!(store.get(UserID::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);
        let test_user = store
            .create(User::build(
                "name",
                "foo@bar.baz",
                PasswordHash::new_unchecked("hunter2"),
            ))
            .unwrap();

        let retrieved_user = store.get(test_user.id).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_by_email_succeeds_with_existing_email() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);
        let test_user = store
            .create(User::build(
                "name",
                "foo@bar.baz",
                PasswordHash::new_unchecked("hunter2"),
            ))
            .unwrap();

        let retrieved_user = store.get_by_email("foo@bar.baz").unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_by_email_fails_with_unknown_email() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);

        assert_eq!(store.get_by_email("notavalidemail@foo.bar"), Err(Error::NotFound));
    }

    #[test]
    fn exists_by_email() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);
        store
            .create(User::build(
                "name",
                "foo@bar.baz",
                PasswordHash::new_unchecked("hunter2"),
            ))
            .unwrap();

        assert_eq!(store.exists_by_email("foo@bar.baz"), Ok(true));
        assert_eq!(store.exists_by_email("bar@baz.qux"), Ok(false));
    }

    #[test]
    fn failed_unit_of_work_is_rolled_back() {
        let connection = get_connection();
        let store = SQLiteUserStore::new(&connection);

        let result: Result<(), Error> = store.atomically(|store| {
            store.create(User::build(
                "name",
                "foo@bar.baz",
                PasswordHash::new_unchecked("hunter2"),
            ))?;

            Err(Error::NotFound)
        });

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(store.exists_by_email("foo@bar.baz"), Ok(false));
    }
}
