use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledger_core::ValueObject;

/// Label recorded on every deposit.
pub const DEPOSIT_LABEL: &str = "New deposit";

/// Direction of a recorded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Deposit,
    Withdrawal,
}

/// One recorded deposit or withdrawal (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    date: NaiveDate,
    kind: OperationKind,
    /// Positive magnitude; the direction lives in `kind`.
    amount: Decimal,
    label: String,
}

impl ValueObject for Operation {}

impl Operation {
    pub fn new(
        date: NaiveDate,
        kind: OperationKind,
        amount: Decimal,
        label: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount,
            label: label.into(),
        }
    }

    pub fn deposit(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(date, OperationKind::Deposit, amount, DEPOSIT_LABEL)
    }

    pub fn withdrawal(date: NaiveDate, amount: Decimal, label: impl Into<String>) -> Self {
        Self::new(date, OperationKind::Withdrawal, amount, label)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Effect of this operation on the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            OperationKind::Deposit => self.amount,
            OperationKind::Withdrawal => -self.amount,
        }
    }
}
