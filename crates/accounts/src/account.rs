use core::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledger_core::{AccountNumber, Aggregate, AggregateRoot, DomainError, DomainResult};

use crate::operation::Operation;
use crate::review::{AccountType, MonthlyReview};

/// Account variant and its variant-specific limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    /// Current account: balance may go down to `-authorized_overdraw`.
    Current { authorized_overdraw: Decimal },
    /// Savings account: `0 <= balance <= max_balance`, never overdrawn.
    Saving { max_balance: Decimal },
}

impl AccountKind {
    pub fn current() -> Self {
        AccountKind::Current {
            authorized_overdraw: Decimal::ZERO,
        }
    }

    pub fn saving(max_balance: Decimal) -> Self {
        AccountKind::Saving { max_balance }
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Current { .. } => AccountType::CurrentAccount,
            AccountKind::Saving { .. } => AccountType::SavingAccount,
        }
    }

    /// Always zero for savings accounts.
    pub fn authorized_overdraw(&self) -> Decimal {
        match self {
            AccountKind::Current {
                authorized_overdraw,
            } => *authorized_overdraw,
            AccountKind::Saving { .. } => Decimal::ZERO,
        }
    }

    pub fn max_balance(&self) -> Option<Decimal> {
        match self {
            AccountKind::Current { .. } => None,
            AccountKind::Saving { max_balance } => Some(*max_balance),
        }
    }
}

/// Aggregate root: a single account and its append-only operation log.
///
/// Identity is the account number: two `Account`s are equal iff their numbers
/// match, whatever their balances.
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    kind: AccountKind,
    balance: Decimal,
    operations: Vec<Operation>,
    version: u64,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Account {}

impl Account {
    /// Empty aggregate (zero balance, no operations) for rehydration.
    ///
    /// Performs no validation; use `open_current` / `open_saving` for new accounts.
    pub fn empty(number: AccountNumber, kind: AccountKind) -> Self {
        Self {
            number,
            kind,
            balance: Decimal::ZERO,
            operations: Vec::new(),
            version: 0,
        }
    }

    /// Open a current account with no overdraw allowance.
    ///
    /// A positive `initial_balance` is recorded as an opening deposit dated
    /// `today`; a negative one is rejected.
    pub fn open_current(
        number: Option<AccountNumber>,
        initial_balance: Decimal,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        let account = Self::empty(
            number.unwrap_or_else(AccountNumber::generate),
            AccountKind::current(),
        );
        account.with_initial_balance(initial_balance, today)
    }

    /// Open a savings account capped at `max_balance`.
    pub fn open_saving(
        number: Option<AccountNumber>,
        max_balance: Decimal,
        initial_balance: Decimal,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        if max_balance <= Decimal::ZERO {
            return Err(DomainError::invalid_amount(
                "maximum balance must be positive",
            ));
        }
        let account = Self::empty(
            number.unwrap_or_else(AccountNumber::generate),
            AccountKind::saving(max_balance),
        );
        account.with_initial_balance(initial_balance, today)
    }

    fn with_initial_balance(mut self, initial_balance: Decimal, today: NaiveDate) -> DomainResult<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(DomainError::invalid_amount(
                "initial balance must not be negative",
            ));
        }
        if initial_balance > Decimal::ZERO {
            self.deposit(today, initial_balance)?;
        }
        Ok(self)
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn authorized_overdraw(&self) -> Decimal {
        self.kind.authorized_overdraw()
    }

    pub fn max_balance(&self) -> Option<Decimal> {
        self.kind.max_balance()
    }

    /// Operation log in call order (not necessarily date order).
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Credit `amount`, returning the new balance.
    pub fn deposit(&mut self, date: NaiveDate, amount: Decimal) -> DomainResult<Decimal> {
        self.execute(&AccountCommand::Deposit(Deposit { date, amount }))?;
        Ok(self.balance)
    }

    /// Debit `amount` under `label`, returning the new (possibly negative) balance.
    pub fn withdraw(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        label: impl Into<String>,
    ) -> DomainResult<Decimal> {
        self.execute(&AccountCommand::Withdraw(Withdraw {
            date,
            amount,
            label: label.into(),
        }))?;
        Ok(self.balance)
    }

    pub fn set_authorized_overdraw(&mut self, limit: Decimal) -> DomainResult<()> {
        self.execute(&AccountCommand::SetAuthorizedOverdraw(
            SetAuthorizedOverdraw { limit },
        ))?;
        Ok(())
    }

    pub fn set_max_balance(&mut self, limit: Decimal) -> DomainResult<()> {
        self.execute(&AccountCommand::SetMaxBalance(SetMaxBalance { limit }))?;
        Ok(())
    }

    /// Operations of the 30 days before `today`, newest first, with the
    /// current balance. Does not reorder the stored log.
    pub fn monthly_review(&self, today: NaiveDate) -> MonthlyReview {
        MonthlyReview::compute(&self.operations, self.balance, self.account_type(), today)
    }

    /// Highest balance first.
    pub fn cmp_by_balance_desc(a: &Account, b: &Account) -> Ordering {
        b.balance.cmp(&a.balance)
    }
}

impl AggregateRoot for Account {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Command: Withdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub label: String,
}

/// Command: SetAuthorizedOverdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAuthorizedOverdraw {
    pub limit: Decimal,
}

/// Command: SetMaxBalance (savings accounts only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMaxBalance {
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCommand {
    Deposit(Deposit),
    Withdraw(Withdraw),
    SetAuthorizedOverdraw(SetAuthorizedOverdraw),
    SetMaxBalance(SetMaxBalance),
}

/// Event: Deposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub account_number: AccountNumber,
    pub operation: Operation,
}

/// Event: Withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub account_number: AccountNumber,
    pub operation: Operation,
}

/// Event: AuthorizedOverdrawChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedOverdrawChanged {
    pub account_number: AccountNumber,
    pub limit: Decimal,
}

/// Event: MaxBalanceChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxBalanceChanged {
    pub account_number: AccountNumber,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    AuthorizedOverdrawChanged(AuthorizedOverdrawChanged),
    MaxBalanceChanged(MaxBalanceChanged),
}

impl Aggregate for Account {
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            // `handle` only emits operations whose result fits; saturate on
            // replayed history rather than panic.
            AccountEvent::Deposited(e) => {
                self.balance = self.balance.saturating_add(e.operation.amount());
                self.operations.push(e.operation.clone());
            }
            AccountEvent::Withdrawn(e) => {
                self.balance = self.balance.saturating_sub(e.operation.amount());
                self.operations.push(e.operation.clone());
            }
            AccountEvent::AuthorizedOverdrawChanged(e) => {
                if let AccountKind::Current {
                    authorized_overdraw,
                } = &mut self.kind
                {
                    *authorized_overdraw = e.limit;
                }
            }
            AccountEvent::MaxBalanceChanged(e) => {
                if let AccountKind::Saving { max_balance } = &mut self.kind {
                    *max_balance = e.limit;
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::Deposit(cmd) => self.handle_deposit(cmd),
            AccountCommand::Withdraw(cmd) => self.handle_withdraw(cmd),
            AccountCommand::SetAuthorizedOverdraw(cmd) => self.handle_set_overdraw(cmd),
            AccountCommand::SetMaxBalance(cmd) => self.handle_set_max_balance(cmd),
        }
    }
}

impl Account {
    fn handle_deposit(&self, cmd: &Deposit) -> Result<Vec<AccountEvent>, DomainError> {
        if cmd.amount <= Decimal::ZERO {
            return Err(DomainError::invalid_amount("deposit amount must be positive"));
        }
        let new_balance = self.balance.checked_add(cmd.amount).ok_or_else(|| {
            DomainError::invalid_amount("deposit would overflow the balance")
        })?;
        if let AccountKind::Saving { max_balance } = self.kind {
            if new_balance > max_balance {
                return Err(DomainError::invalid_amount(
                    "deposit would exceed maximum balance",
                ));
            }
        }

        Ok(vec![AccountEvent::Deposited(Deposited {
            account_number: self.number.clone(),
            operation: Operation::deposit(cmd.date, cmd.amount),
        })])
    }

    fn handle_withdraw(&self, cmd: &Withdraw) -> Result<Vec<AccountEvent>, DomainError> {
        // Overflowing available funds exceed any representable amount.
        let available = self
            .balance
            .checked_add(self.kind.authorized_overdraw())
            .unwrap_or(Decimal::MAX);
        if cmd.amount <= Decimal::ZERO
            || cmd.amount > available
            || self.balance.checked_sub(cmd.amount).is_none()
        {
            return Err(DomainError::invalid_amount(
                "withdraw amount must be positive and not exceed available funds",
            ));
        }

        Ok(vec![AccountEvent::Withdrawn(Withdrawn {
            account_number: self.number.clone(),
            operation: Operation::withdrawal(cmd.date, cmd.amount, cmd.label.clone()),
        })])
    }

    fn handle_set_overdraw(
        &self,
        cmd: &SetAuthorizedOverdraw,
    ) -> Result<Vec<AccountEvent>, DomainError> {
        match self.kind {
            AccountKind::Current { .. } => {
                if cmd.limit < Decimal::ZERO {
                    return Err(DomainError::invalid_amount(
                        "overdraw limit must be non-negative",
                    ));
                }
                Ok(vec![AccountEvent::AuthorizedOverdrawChanged(
                    AuthorizedOverdrawChanged {
                        account_number: self.number.clone(),
                        limit: cmd.limit,
                    },
                )])
            }
            // Zero is already the only allowed value: nothing to record.
            AccountKind::Saving { .. } if cmd.limit.is_zero() => Ok(Vec::new()),
            AccountKind::Saving { .. } => Err(DomainError::invalid_amount(
                "no overdraw permitted on a savings account",
            )),
        }
    }

    fn handle_set_max_balance(&self, cmd: &SetMaxBalance) -> Result<Vec<AccountEvent>, DomainError> {
        match self.kind {
            AccountKind::Current { .. } => Err(DomainError::invalid_amount(
                "maximum balance only applies to savings accounts",
            )),
            AccountKind::Saving { .. } => {
                if cmd.limit <= Decimal::ZERO || cmd.limit < self.balance {
                    return Err(DomainError::invalid_amount(
                        "maximum balance must be positive and cover the current balance",
                    ));
                }
                Ok(vec![AccountEvent::MaxBalanceChanged(MaxBalanceChanged {
                    account_number: self.number.clone(),
                    limit: cmd.limit,
                })])
            }
        }
    }
}
