//! Initial database migration.
//!
//! Creates the enums and core tables: ledgers, chart of accounts, journal,
//! invoices and line items on both the supplier and customer side, payments,
//! and the two allocation tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: LEDGERS & CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(LEDGERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;

        // ============================================================
        // PART 4: SUPPLIER DOCUMENTS & ALLOCATIONS
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_ITEMS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(PAYMENT_ALLOCATIONS_SQL).await?;

        // ============================================================
        // PART 5: CUSTOMER DOCUMENTS & ALLOCATIONS
        // ============================================================
        db.execute_unprepared(SALES_INVOICES_SQL).await?;
        db.execute_unprepared(SALES_INVOICE_ITEMS_SQL).await?;
        db.execute_unprepared(CUSTOMER_PAYMENTS_SQL).await?;
        db.execute_unprepared(CUSTOMER_PAYMENT_ALLOCATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Nominal account classification
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense'
);

-- Journal entry classification
CREATE TYPE transaction_kind AS ENUM (
    'journal',
    'transfer',
    'sales_invoice',
    'supplier_invoice',
    'customer_payment',
    'supplier_payment',
    'stock_adjustment',
    'reversal'
);

-- Invoice lifecycle status
CREATE TYPE invoice_status AS ENUM (
    'draft',
    'finalized',
    'paid',
    'cancelled'
);

-- Payment method
CREATE TYPE payment_method AS ENUM (
    'cash',
    'card',
    'cheque',
    'bacs'
);
";

const LEDGERS_SQL: &str = r"
CREATE TABLE ledgers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    code INTEGER NOT NULL,
    name TEXT NOT NULL,
    account_type account_type NOT NULL,
    opening_balance NUMERIC(14, 2) NOT NULL DEFAULT 0,
    is_bank BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_accounts_ledger_code UNIQUE (ledger_id, code)
);

CREATE INDEX idx_accounts_ledger ON accounts(ledger_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES accounts(id),
    credit_account_id UUID NOT NULL REFERENCES accounts(id),
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    reference TEXT,
    transaction_kind transaction_kind,
    journal_number TEXT,
    stakeholder TEXT,
    posting_group_id UUID NOT NULL,
    reverses_group_id UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_journal_distinct_accounts
        CHECK (debit_account_id <> credit_account_id)
);

CREATE INDEX idx_journal_ledger_date ON journal_entries(ledger_id, entry_date DESC);
CREATE INDEX idx_journal_debit_account ON journal_entries(debit_account_id);
CREATE INDEX idx_journal_credit_account ON journal_entries(credit_account_id);
CREATE INDEX idx_journal_posting_group ON journal_entries(posting_group_id);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    invoice_number TEXT NOT NULL,
    invoice_date DATE NOT NULL,
    total NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_invoices_ledger_date ON invoices(ledger_id, invoice_date);
";

const INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE invoice_items (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    quantity NUMERIC(14, 3) NOT NULL,
    unit_price NUMERIC(14, 2) NOT NULL,
    line_total NUMERIC(14, 2) NOT NULL,
    vat_code TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_invoice_items_invoice ON invoice_items(invoice_id);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    payment_date DATE NOT NULL,
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    reference TEXT,
    method payment_method NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_payments_ledger ON payments(ledger_id);
";

const PAYMENT_ALLOCATIONS_SQL: &str = r"
CREATE TABLE payment_allocations (
    id UUID PRIMARY KEY,
    payment_id UUID NOT NULL REFERENCES payments(id) ON DELETE CASCADE,
    invoice_id UUID NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    amount_allocated NUMERIC(14, 2) NOT NULL CHECK (amount_allocated > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_payment_allocations_pair UNIQUE (payment_id, invoice_id)
);

CREATE INDEX idx_payment_allocations_invoice ON payment_allocations(invoice_id);
";

const SALES_INVOICES_SQL: &str = r"
CREATE TABLE sales_invoices (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    document_number TEXT NOT NULL,
    document_date DATE NOT NULL,
    total NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_sales_invoices_ledger_date ON sales_invoices(ledger_id, document_date);
";

const SALES_INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE sales_invoice_items (
    id UUID PRIMARY KEY,
    sales_invoice_id UUID NOT NULL REFERENCES sales_invoices(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    quantity NUMERIC(14, 3) NOT NULL,
    unit_price NUMERIC(14, 2) NOT NULL,
    line_total NUMERIC(14, 2) NOT NULL,
    vat_code TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_sales_invoice_items_invoice ON sales_invoice_items(sales_invoice_id);
";

const CUSTOMER_PAYMENTS_SQL: &str = r"
CREATE TABLE customer_payments (
    id UUID PRIMARY KEY,
    ledger_id UUID NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
    payment_date DATE NOT NULL,
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    reference TEXT,
    method payment_method NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_customer_payments_ledger ON customer_payments(ledger_id);
";

const CUSTOMER_PAYMENT_ALLOCATIONS_SQL: &str = r"
CREATE TABLE customer_payment_allocations (
    id UUID PRIMARY KEY,
    payment_id UUID NOT NULL REFERENCES customer_payments(id) ON DELETE CASCADE,
    invoice_id UUID NOT NULL REFERENCES sales_invoices(id) ON DELETE CASCADE,
    amount_allocated NUMERIC(14, 2) NOT NULL CHECK (amount_allocated > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_customer_payment_allocations_pair UNIQUE (payment_id, invoice_id)
);

CREATE INDEX idx_customer_payment_allocations_invoice
    ON customer_payment_allocations(invoice_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS customer_payment_allocations;
DROP TABLE IF EXISTS customer_payments;
DROP TABLE IF EXISTS sales_invoice_items;
DROP TABLE IF EXISTS sales_invoices;
DROP TABLE IF EXISTS payment_allocations;
DROP TABLE IF EXISTS payments;
DROP TABLE IF EXISTS invoice_items;
DROP TABLE IF EXISTS invoices;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS ledgers;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS transaction_kind;
DROP TYPE IF EXISTS account_type;
";
