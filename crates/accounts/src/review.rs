//! Monthly review: a read-only snapshot of the trailing 30 days.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledger_core::ValueObject;

use crate::operation::Operation;

/// Length of the review window. An operation dated exactly this many days
/// before today falls outside it.
pub const REVIEW_WINDOW_DAYS: u64 = 30;

/// Account discriminator reported in a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    CurrentAccount,
    SavingAccount,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountType::CurrentAccount => f.write_str("CURRENT_ACCOUNT"),
            AccountType::SavingAccount => f.write_str("SAVING_ACCOUNT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReview {
    operations: Vec<Operation>,
    balance: Decimal,
    account_type: AccountType,
}

impl ValueObject for MonthlyReview {}

impl MonthlyReview {
    /// Build a review from an operation log.
    ///
    /// The log is copied, sorted by date descending (stable, so same-day
    /// operations keep their insertion order) and filtered to dates strictly
    /// after `today - 30 days`. The log itself is never reordered.
    pub fn compute(
        log: &[Operation],
        balance: Decimal,
        account_type: AccountType,
        today: NaiveDate,
    ) -> Self {
        let cutoff = today.checked_sub_days(Days::new(REVIEW_WINDOW_DAYS));

        let mut operations = log.to_vec();
        operations.sort_by(|a, b| b.date().cmp(&a.date()));
        operations.retain(|op| cutoff.is_none_or(|c| op.date() > c));

        Self {
            operations,
            balance,
            account_type,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}
