//! Walks one current account through a month of activity and prints its
//! monthly review as JSON.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use ledger_core::{Clock, SystemClock};
use ledger_infra::{AccountService, InMemoryAccountStore, LedgerConfig};
use ledger_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    match std::env::var("LEDGER_LOG_FORMAT") {
        Ok(raw) => {
            ledger_observability::tracing::init(LogFormat::parse(&raw).unwrap_or_default(), "info")
        }
        Err(_) => ledger_observability::init(),
    }

    let config = LedgerConfig::from_env().context("loading ledger configuration")?;
    let clock = SystemClock;
    let today = clock.today();
    let service = AccountService::new(Arc::new(InMemoryAccountStore::new()), clock, config);

    let number = service.open_current_account(None, Decimal::ZERO)?;
    let days_ago = |n: u64| -> anyhow::Result<NaiveDate> {
        today
            .checked_sub_days(Days::new(n))
            .context("date out of range")
    };

    service.deposit(&number, Some(days_ago(35)?), Decimal::new(50, 0))?;
    service.deposit(&number, Some(days_ago(33)?), Decimal::new(40, 0))?;
    service.deposit(&number, Some(days_ago(25)?), Decimal::new(20, 0))?;
    service.withdraw(&number, Some(days_ago(23)?), Decimal::new(10, 0), "Starbucks")?;
    service.deposit(&number, Some(days_ago(22)?), Decimal::new(30, 0))?;
    service.withdraw(&number, Some(days_ago(15)?), Decimal::new(22, 0), "Bookshop")?;
    service.deposit(&number, None, Decimal::new(500, 0))?;

    // Rejections are logged by the service and leave the account untouched.
    let _ = service.withdraw(&number, None, Decimal::new(10_000, 0), "Car");

    let review = service.monthly_review(&number)?;
    tracing::info!(account_number = %number, "monthly review ready");
    println!("{}", serde_json::to_string_pretty(&review)?);

    Ok(())
}
