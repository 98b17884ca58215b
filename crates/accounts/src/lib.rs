//! Accounts module (single-account ledger).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Dates are
//! always supplied by the caller; nothing here reads the wall clock.

pub mod account;
pub mod operation;
pub mod review;

pub use account::{
    Account, AccountCommand, AccountEvent, AccountKind, AuthorizedOverdrawChanged, Deposit,
    Deposited, MaxBalanceChanged, SetAuthorizedOverdraw, SetMaxBalance, Withdraw, Withdrawn,
};
pub use operation::{DEPOSIT_LABEL, Operation, OperationKind};
pub use review::{AccountType, MonthlyReview, REVIEW_WINDOW_DAYS};
