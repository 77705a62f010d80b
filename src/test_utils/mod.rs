//! In-memory stores that record how the services call them.

#![allow(missing_docs)]

use std::cell::{Cell, RefCell};

use crate::{
    BusinessRule, Error,
    stores::{Atomic, TransactionStore, UserStore},
    transaction::{Transaction, TransactionFilter, TransactionId},
    user::{User, UserBuilder, UserID},
};

/// A store operation recorded by the spy stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    Begin,
    Create,
    Update,
    Delete,
    Get,
    Find,
    GetByEmail,
    ExistsByEmail,
}

#[derive(Debug, Default)]
pub struct SpyTransactionStore {
    transactions: RefCell<Vec<Transaction>>,
    calls: RefCell<Vec<StoreCall>>,
    next_id: Cell<TransactionId>,
}

impl SpyTransactionStore {
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn was_called(&self, call: StoreCall) -> bool {
        self.calls.borrow().contains(&call)
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl TransactionStore for SpyTransactionStore {
    fn create(&self, transaction: &Transaction) -> Result<Transaction, Error> {
        self.record(StoreCall::Create);

        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let mut stored = transaction.clone();
        stored.id = Some(id);
        self.transactions.borrow_mut().push(stored.clone());

        Ok(stored)
    }

    fn update(&self, transaction: &Transaction) -> Result<Transaction, Error> {
        self.record(StoreCall::Update);

        let id = transaction.id.ok_or(Error::MissingId)?;
        let mut transactions = self.transactions.borrow_mut();
        let stored = transactions
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(Error::UpdateMissingTransaction)?;
        *stored = transaction.clone();

        Ok(stored.clone())
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.record(StoreCall::Delete);

        let mut transactions = self.transactions.borrow_mut();
        let count_before = transactions.len();
        transactions.retain(|stored| stored.id != Some(id));

        if transactions.len() == count_before {
            Err(Error::DeleteMissingTransaction)
        } else {
            Ok(())
        }
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.record(StoreCall::Get);

        self.transactions
            .borrow()
            .iter()
            .find(|stored| stored.id == Some(id))
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        self.record(StoreCall::Find);

        Ok(self
            .transactions
            .borrow()
            .iter()
            .filter(|stored| filter.matches(stored))
            .cloned()
            .collect())
    }
}

impl Atomic for SpyTransactionStore {
    fn atomically<T>(&self, work: impl FnOnce(&Self) -> Result<T, Error>) -> Result<T, Error> {
        self.record(StoreCall::Begin);

        let snapshot = self.transactions();
        let result = work(self);

        if result.is_err() {
            *self.transactions.borrow_mut() = snapshot;
        }

        result
    }
}

#[derive(Debug, Default)]
pub struct SpyUserStore {
    users: RefCell<Vec<User>>,
    calls: RefCell<Vec<StoreCall>>,
}

impl SpyUserStore {
    /// A store that already holds `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RefCell::new(users),
            calls: RefCell::default(),
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    pub fn was_called(&self, call: StoreCall) -> bool {
        self.calls.borrow().contains(&call)
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl UserStore for SpyUserStore {
    fn create(&self, builder: UserBuilder) -> Result<User, Error> {
        self.record(StoreCall::Create);

        let mut users = self.users.borrow_mut();
        if users.iter().any(|user| user.email == builder.email) {
            return Err(BusinessRule::DuplicateEmail.into());
        }

        let user = builder.finalize(UserID::new(users.len() as i64 + 1));
        users.push(user.clone());

        Ok(user)
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.record(StoreCall::Get);

        self.users
            .borrow()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        self.record(StoreCall::GetByEmail);

        self.users
            .borrow()
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, Error> {
        self.record(StoreCall::ExistsByEmail);

        Ok(self.users.borrow().iter().any(|user| user.email == email))
    }
}

impl Atomic for SpyUserStore {
    fn atomically<T>(&self, work: impl FnOnce(&Self) -> Result<T, Error>) -> Result<T, Error> {
        self.record(StoreCall::Begin);

        let snapshot = self.users();
        let result = work(self);

        if result.is_err() {
            *self.users.borrow_mut() = snapshot;
        }

        result
    }
}
