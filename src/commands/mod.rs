//! Подкоманды `cinema`. Каждая группа живёт в своём файле и печатает
//! результат либо таблицей, либо JSON (`--json`).

mod account;
mod admin;
mod booking;
mod catalog;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;

use cinema_client::forms::parse_date_param;
use cinema_client::AppContext;

pub use account::AccountCommand;
pub use admin::AdminCommand;
pub use booking::BookingCommand;
pub use catalog::CatalogCommand;

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Catalog(CatalogCommand),

    #[command(flatten)]
    Booking(BookingCommand),

    #[command(flatten)]
    Account(AccountCommand),

    /// Back-office operations (admin token required)
    #[command(subcommand)]
    Admin(AdminCommand),
}

pub async fn run(ctx: &mut AppContext, command: Command, out: Output) -> Result<()> {
    match command {
        Command::Catalog(cmd) => catalog::run(ctx, cmd, out).await,
        Command::Booking(cmd) => booking::run(ctx, cmd, out).await,
        Command::Account(cmd) => account::run(ctx, cmd, out).await,
        Command::Admin(cmd) => admin::run(ctx, cmd, out).await,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Печатает значение как JSON или через `human`.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    pub fn done(&self, message: &str) -> Result<()> {
        self.emit(&serde_json::json!({ "ok": true, "message": message }), |_| {
            println!("{message}")
        })
    }
}

/// Разбор даты из аргумента: `YYYYMMDD` или `YYYY-MM-DD`.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_param(value).ok_or_else(|| format!("expected YYYYMMDD or YYYY-MM-DD, got {value:?}"))
}

fn money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped} KRW")
    } else {
        format!("{grouped} KRW")
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}
