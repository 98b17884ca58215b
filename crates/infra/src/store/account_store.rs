use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use ledger_accounts::Account;
use ledger_core::{AccountNumber, DomainError, DomainResult};

/// An account behind its own lock: at most one mutation in flight per account.
pub type SharedAccount = Arc<Mutex<Account>>;

/// Keyed account storage abstraction.
pub trait AccountStore: Send + Sync {
    /// Insert a new account; fails with `Conflict` if the number is taken.
    fn insert(&self, account: Account) -> DomainResult<SharedAccount>;
    fn get(&self, number: &AccountNumber) -> Option<SharedAccount>;
    fn list(&self) -> Vec<SharedAccount>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn insert(&self, account: Account) -> DomainResult<SharedAccount> {
        (**self).insert(account)
    }

    fn get(&self, number: &AccountNumber) -> Option<SharedAccount> {
        (**self).get(number)
    }

    fn list(&self) -> Vec<SharedAccount> {
        (**self).list()
    }
}

/// In-memory account store for tests/dev.
///
/// The map lock is only held for lookups and inserts; mutations lock the
/// individual account, so different accounts never wait on each other.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<HashMap<AccountNumber, SharedAccount>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert(&self, account: Account) -> DomainResult<SharedAccount> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(account.number()) {
            return Err(DomainError::conflict(format!(
                "account {} already exists",
                account.number()
            )));
        }

        let number = account.number().clone();
        let shared = Arc::new(Mutex::new(account));
        map.insert(number, Arc::clone(&shared));
        Ok(shared)
    }

    fn get(&self, number: &AccountNumber) -> Option<SharedAccount> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(number).cloned()
    }

    fn list(&self) -> Vec<SharedAccount> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn account(number: &str) -> Account {
        Account::open_current(Some(number.parse().unwrap()), Decimal::ZERO, today()).unwrap()
    }

    #[test]
    fn insert_then_get_returns_same_handle() {
        let store = InMemoryAccountStore::new();
        let inserted = store.insert(account("A-1")).unwrap();
        let fetched = store.get(&"A-1".parse().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert!(store.get(&"A-2".parse().unwrap()).is_none());
    }

    #[test]
    fn duplicate_number_is_a_conflict() {
        let store = InMemoryAccountStore::new();
        store.insert(account("A-1")).unwrap();
        let err = store.insert(account("A-1")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn concurrent_deposits_on_one_account_are_serialized() {
        let store = Arc::new(InMemoryAccountStore::new());
        store.insert(account("A-1")).unwrap();
        let number: AccountNumber = "A-1".parse().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let number = number.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let shared = store.get(&number).unwrap();
                        let mut guard = shared.lock().unwrap();
                        guard.deposit(today(), Decimal::ONE).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let shared = store.get(&number).unwrap();
        let guard = shared.lock().unwrap();
        assert_eq!(guard.balance(), Decimal::new(400, 0));
        assert_eq!(guard.operations().len(), 400);
    }
}
