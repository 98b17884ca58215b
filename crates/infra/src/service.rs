//! Account service: the entry point adapters call.
//!
//! Looks accounts up in the store, fills in missing dates from the clock,
//! serializes mutations per account through the account's lock, and logs
//! every outcome. All domain rules stay in `ledger-accounts`.

use std::sync::PoisonError;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use ledger_accounts::{Account, MonthlyReview};
use ledger_core::{AccountNumber, Clock, DomainError, DomainResult};

use crate::config::LedgerConfig;
use crate::store::AccountStore;

pub struct AccountService<S, C> {
    store: S,
    clock: C,
    config: LedgerConfig,
}

impl<S, C> AccountService<S, C>
where
    S: AccountStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, config: LedgerConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Open a current account with the configured default overdraw limit.
    pub fn open_current_account(
        &self,
        number: Option<AccountNumber>,
        initial_balance: Decimal,
    ) -> DomainResult<AccountNumber> {
        let mut account = Account::open_current(number, initial_balance, self.clock.today())?;
        if !self.config.default_authorized_overdraw.is_zero() {
            account.set_authorized_overdraw(self.config.default_authorized_overdraw)?;
        }
        self.register(account)
    }

    /// Open a savings account; `max_balance` defaults to the configured ceiling.
    pub fn open_saving_account(
        &self,
        number: Option<AccountNumber>,
        max_balance: Option<Decimal>,
        initial_balance: Decimal,
    ) -> DomainResult<AccountNumber> {
        let max_balance = max_balance.unwrap_or(self.config.default_max_balance);
        let account =
            Account::open_saving(number, max_balance, initial_balance, self.clock.today())?;
        self.register(account)
    }

    fn register(&self, account: Account) -> DomainResult<AccountNumber> {
        let number = account.number().clone();
        let account_type = account.account_type();
        let balance = account.balance();
        self.store.insert(account).inspect_err(|e| {
            tracing::warn!(account_number = %number, reason = %e, "account opening rejected");
        })?;
        tracing::info!(
            account_number = %number,
            account_type = %account_type,
            balance = %balance,
            "account opened"
        );
        Ok(number)
    }

    /// Deposit `amount`; a missing `date` means today.
    pub fn deposit(
        &self,
        number: &AccountNumber,
        date: Option<NaiveDate>,
        amount: Decimal,
    ) -> DomainResult<Decimal> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let result = self.with_account(number, |account| account.deposit(date, amount));
        match &result {
            Ok(balance) => tracing::info!(
                account_number = %number,
                amount = %amount,
                balance = %balance,
                "deposit made successfully"
            ),
            Err(e) => tracing::warn!(
                account_number = %number,
                amount = %amount,
                reason = %e,
                "deposit rejected"
            ),
        }
        result
    }

    /// Withdraw `amount` under `label`; a missing `date` means today.
    pub fn withdraw(
        &self,
        number: &AccountNumber,
        date: Option<NaiveDate>,
        amount: Decimal,
        label: &str,
    ) -> DomainResult<Decimal> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let result = self.with_account(number, |account| account.withdraw(date, amount, label));
        match &result {
            Ok(balance) => tracing::info!(
                account_number = %number,
                amount = %amount,
                label,
                balance = %balance,
                "withdrawal made successfully"
            ),
            Err(e) => tracing::warn!(
                account_number = %number,
                amount = %amount,
                reason = %e,
                "withdrawal rejected"
            ),
        }
        result
    }

    /// Replace the overdraw limit, returning the limit now in force.
    pub fn set_authorized_overdraw(
        &self,
        number: &AccountNumber,
        limit: Decimal,
    ) -> DomainResult<Decimal> {
        let result = self.with_account(number, |account| {
            account.set_authorized_overdraw(limit)?;
            Ok(account.authorized_overdraw())
        });
        match &result {
            Ok(_) => tracing::info!(
                account_number = %number,
                limit = %limit,
                "authorized overdraw updated"
            ),
            Err(e) => tracing::warn!(
                account_number = %number,
                limit = %limit,
                reason = %e,
                "authorized overdraw update rejected"
            ),
        }
        result
    }

    pub fn balance(&self, number: &AccountNumber) -> DomainResult<Decimal> {
        self.with_account(number, |account| Ok(account.balance()))
    }

    pub fn authorized_overdraw(&self, number: &AccountNumber) -> DomainResult<Decimal> {
        self.with_account(number, |account| Ok(account.authorized_overdraw()))
    }

    /// Review of the 30 days before the clock's today.
    pub fn monthly_review(&self, number: &AccountNumber) -> DomainResult<MonthlyReview> {
        let today = self.clock.today();
        let review = self.with_account(number, |account| Ok(account.monthly_review(today)))?;
        tracing::debug!(
            account_number = %number,
            operations = review.operations().len(),
            "monthly review computed"
        );
        Ok(review)
    }

    /// Account numbers with their balances, highest balance first.
    pub fn accounts_by_balance(&self) -> Vec<(AccountNumber, Decimal)> {
        let mut listed: Vec<(AccountNumber, Decimal)> = self
            .store
            .list()
            .iter()
            .map(|shared| {
                let account = shared.lock().unwrap_or_else(PoisonError::into_inner);
                (account.number().clone(), account.balance())
            })
            .collect();
        listed.sort_by(|a, b| b.1.cmp(&a.1));
        listed
    }

    fn with_account<T>(
        &self,
        number: &AccountNumber,
        f: impl FnOnce(&mut Account) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let shared = self.store.get(number).ok_or_else(DomainError::not_found)?;
        let mut account = shared.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *account)
    }
}
