//! Database seeder for Tillbook development and testing.
//!
//! Seeds a demo ledger with the default UK small-business chart of
//! accounts so the posting roles (Trade Debtors, VAT Output, ...) resolve
//! out of the box.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use tillbook_core::accounts::{AccountInput, AccountType};
use tillbook_db::AccountRepository;
use tillbook_db::entities::ledgers;
use tillbook_shared::types::LedgerId;

/// Demo ledger ID (consistent for all seeds).
const DEMO_LEDGER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// The default chart of accounts: (code, name, type, is_bank).
const DEFAULT_ACCOUNTS: &[(i32, &str, AccountType, bool)] = &[
    (1000, "Bank Account", AccountType::Asset, true),
    (1200, "Stock", AccountType::Asset, false),
    (1400, "Trade Debtors", AccountType::Asset, false),
    (1450, "Undeposited Funds", AccountType::Asset, false),
    (1500, "VAT Input", AccountType::Asset, false),
    (2100, "Trade Creditors", AccountType::Liability, false),
    (2200, "VAT Output", AccountType::Liability, false),
    (3000, "Owner's Equity", AccountType::Equity, false),
    (4000, "Sales", AccountType::Income, false),
    (5000, "Cost of Sales", AccountType::Expense, false),
    (5100, "General Expenses", AccountType::Expense, false),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    tracing::info!("connecting to database");
    let db = tillbook_db::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    let ledger_id = seed_demo_ledger(&db).await?;
    seed_chart_of_accounts(&db, ledger_id).await?;

    tracing::info!("seeding complete");
    Ok(())
}

fn demo_ledger_id() -> anyhow::Result<Uuid> {
    Uuid::parse_str(DEMO_LEDGER_ID).context("invalid demo ledger id")
}

/// Seeds the demo ledger row.
async fn seed_demo_ledger(db: &DatabaseConnection) -> anyhow::Result<LedgerId> {
    let id = demo_ledger_id()?;

    if ledgers::Entity::find_by_id(id).one(db).await?.is_some() {
        tracing::info!("demo ledger already exists, skipping");
        return Ok(LedgerId::from_uuid(id));
    }

    ledgers::ActiveModel {
        id: Set(id),
        name: Set("Demo Books".to_string()),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(db)
    .await
    .context("failed to insert demo ledger")?;

    tracing::info!("demo ledger created");
    Ok(LedgerId::from_uuid(id))
}

/// Seeds the default chart of accounts, skipping codes that already exist.
async fn seed_chart_of_accounts(
    db: &DatabaseConnection,
    ledger_id: LedgerId,
) -> anyhow::Result<()> {
    let repository = AccountRepository::new(db.clone());
    let existing: Vec<i32> = repository
        .list(ledger_id)
        .await?
        .into_iter()
        .map(|entry| entry.account.code)
        .collect();

    for (code, name, account_type, is_bank) in DEFAULT_ACCOUNTS {
        if existing.contains(code) {
            tracing::info!(code, "account already exists, skipping");
            continue;
        }

        repository
            .create(
                ledger_id,
                AccountInput {
                    code: *code,
                    name: (*name).to_string(),
                    account_type: *account_type,
                    opening_balance: Decimal::ZERO,
                    is_bank: *is_bank,
                },
            )
            .await
            .with_context(|| format!("failed to seed account {code} {name}"))?;
        tracing::info!(code, name, "account seeded");
    }

    Ok(())
}
