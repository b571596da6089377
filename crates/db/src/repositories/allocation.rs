//! Allocation repositories: linking payments to invoices.
//!
//! Two parallel repositories cover the supplier side (payments against
//! purchase invoices) and the customer side (customer payments against
//! sales invoices). Each operation runs in one database transaction: the
//! conservation checks read both sums, the core planner validates, the
//! row is written, and the invoice's paid status is rechecked. A declined
//! operation leaves no partial state.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, Set, TransactionTrait,
};
use tillbook_shared::types::{AllocationId, InvoiceId, LedgerId, PaymentId};

use crate::entities::{
    customer_payment_allocations, customer_payments, invoices, payment_allocations, payments,
    sales_invoices,
};
use tillbook_core::allocation::{
    AllocationError, AllocationPlan, AllocationService, AllocationSnapshot,
};

/// Error types for allocation operations.
#[derive(Debug, thiserror::Error)]
pub enum AllocationRepoError {
    /// Domain validation failure (over-allocation, non-positive amount).
    #[error(transparent)]
    Domain(#[from] AllocationError),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

// ============================================================================
// Supplier side
// ============================================================================

/// Repository allocating supplier payments to purchase invoices.
pub struct PaymentAllocationRepository {
    db: DatabaseConnection,
}

impl PaymentAllocationRepository {
    /// Creates a new payment allocation repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates `amount` of a payment to an invoice.
    ///
    /// When the (payment, invoice) pair already has an allocation, the
    /// amount merges into it; the pair stays unique. On success the
    /// invoice's paid status is rechecked.
    ///
    /// # Errors
    ///
    /// Declines with the limiting figure when the amount exceeds the
    /// payment's unallocated amount or the invoice's outstanding balance.
    pub async fn allocate(
        &self,
        ledger_id: LedgerId,
        payment_id: PaymentId,
        invoice_id: InvoiceId,
        amount: Decimal,
    ) -> Result<payment_allocations::Model, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(payment_id.into_inner())
            .filter(payments::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;
        let invoice = invoices::Entity::find_by_id(invoice_id.into_inner())
            .filter(invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let snapshot = snapshot_supplier(&txn, &payment, &invoice).await?;
        let plan = AllocationService::plan_allocation(&snapshot, amount)?;

        let allocation = match plan {
            AllocationPlan::Insert { amount } => {
                payment_allocations::ActiveModel {
                    id: Set(AllocationId::new().into_inner()),
                    payment_id: Set(payment.id),
                    invoice_id: Set(invoice.id),
                    amount_allocated: Set(amount),
                    created_at: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await?
            }
            AllocationPlan::Merge { new_total } => {
                let existing = payment_allocations::Entity::find()
                    .filter(payment_allocations::Column::PaymentId.eq(payment.id))
                    .filter(payment_allocations::Column::InvoiceId.eq(invoice.id))
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        DbErr::RecordNotFound("allocation pair row".to_string())
                    })?;
                let mut active: payment_allocations::ActiveModel = existing.into();
                active.amount_allocated = Set(new_total);
                active.update(&txn).await?
            }
        };

        refresh_supplier_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(
            payment_id = %payment_id,
            invoice_id = %invoice_id,
            amount = %amount,
            "payment allocated"
        );
        Ok(allocation)
    }

    /// Replaces an allocation's amount.
    ///
    /// # Errors
    ///
    /// Declines with the limiting figure when the new amount exceeds what
    /// the payment or invoice has available once the current amount is
    /// released.
    pub async fn update(
        &self,
        allocation_id: AllocationId,
        new_amount: Decimal,
    ) -> Result<payment_allocations::Model, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let allocation = payment_allocations::Entity::find_by_id(allocation_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(AllocationError::NotFound(allocation_id))?;
        let payment_id = PaymentId::from_uuid(allocation.payment_id);
        let invoice_id = InvoiceId::from_uuid(allocation.invoice_id);

        let payment = payments::Entity::find_by_id(allocation.payment_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;
        let invoice = invoices::Entity::find_by_id(allocation.invoice_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let snapshot = snapshot_supplier(&txn, &payment, &invoice).await?;
        let validated = AllocationService::plan_update(&snapshot, new_amount)?;

        let mut active: payment_allocations::ActiveModel = allocation.into();
        active.amount_allocated = Set(validated);
        let updated = active.update(&txn).await?;

        refresh_supplier_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(allocation_id = %allocation_id, amount = %validated, "allocation updated");
        Ok(updated)
    }

    /// Removes an allocation and rechecks the invoice's paid status.
    ///
    /// Returns the invoice the allocation was applied to.
    ///
    /// # Errors
    ///
    /// Returns an error when the allocation does not exist.
    pub async fn delete(
        &self,
        allocation_id: AllocationId,
    ) -> Result<InvoiceId, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let allocation = payment_allocations::Entity::find_by_id(allocation_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(AllocationError::NotFound(allocation_id))?;
        let invoice_id = InvoiceId::from_uuid(allocation.invoice_id);

        let invoice = invoices::Entity::find_by_id(allocation.invoice_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        allocation.delete(&txn).await?;
        refresh_supplier_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(allocation_id = %allocation_id, "allocation deleted");
        Ok(invoice_id)
    }

    /// The payment's amount not yet allocated to any invoice.
    ///
    /// # Errors
    ///
    /// Returns an error when the payment does not exist in the ledger.
    pub async fn unallocated_amount(
        &self,
        ledger_id: LedgerId,
        payment_id: PaymentId,
    ) -> Result<Decimal, AllocationRepoError> {
        let payment = payments::Entity::find_by_id(payment_id.into_inner())
            .filter(payments::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;

        let allocated: Decimal = payment_allocations::Entity::find()
            .filter(payment_allocations::Column::PaymentId.eq(payment.id))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.amount_allocated)
            .sum();
        Ok(payment.amount - allocated)
    }

    /// The invoice's total minus everything allocated to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the invoice does not exist in the ledger.
    pub async fn outstanding_balance(
        &self,
        ledger_id: LedgerId,
        invoice_id: InvoiceId,
    ) -> Result<Decimal, AllocationRepoError> {
        let invoice = invoices::Entity::find_by_id(invoice_id.into_inner())
            .filter(invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let allocated: Decimal = payment_allocations::Entity::find()
            .filter(payment_allocations::Column::InvoiceId.eq(invoice.id))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.amount_allocated)
            .sum();
        Ok(invoice.total - allocated)
    }
}

/// Conservation snapshot for one supplier-side operation, read inside the
/// operation's transaction.
async fn snapshot_supplier(
    txn: &DatabaseTransaction,
    payment: &payments::Model,
    invoice: &invoices::Model,
) -> Result<AllocationSnapshot, DbErr> {
    let payment_rows = payment_allocations::Entity::find()
        .filter(payment_allocations::Column::PaymentId.eq(payment.id))
        .all(txn)
        .await?;
    let invoice_rows = payment_allocations::Entity::find()
        .filter(payment_allocations::Column::InvoiceId.eq(invoice.id))
        .all(txn)
        .await?;

    Ok(AllocationSnapshot {
        payment_amount: payment.amount,
        payment_allocated: payment_rows.iter().map(|row| row.amount_allocated).sum(),
        invoice_total: invoice.total,
        invoice_allocated: invoice_rows.iter().map(|row| row.amount_allocated).sum(),
        existing_pair: payment_rows
            .iter()
            .find(|row| row.invoice_id == invoice.id)
            .map(|row| row.amount_allocated),
    })
}

/// Recomputes the invoice's outstanding balance and flips its status when
/// it crosses the settlement tolerance.
async fn refresh_supplier_status(
    txn: &DatabaseTransaction,
    invoice: invoices::Model,
) -> Result<(), DbErr> {
    let allocated: Decimal = payment_allocations::Entity::find()
        .filter(payment_allocations::Column::InvoiceId.eq(invoice.id))
        .all(txn)
        .await?
        .iter()
        .map(|row| row.amount_allocated)
        .sum();
    let outstanding = invoice.total - allocated;

    if let Some(next) = AllocationService::settled_status(invoice.status.into(), outstanding) {
        tracing::info!(invoice_id = %invoice.id, status = %next, "invoice status changed");
        let mut active: invoices::ActiveModel = invoice.into();
        active.status = Set(next.into());
        active.updated_at = Set(Utc::now().into());
        active.update(txn).await?;
    }
    Ok(())
}

// ============================================================================
// Customer side
// ============================================================================

/// Customer-side counterpart of [`PaymentAllocationRepository`]: customer
/// payments allocated to sales invoices, with identical semantics.
pub struct CustomerAllocationRepository {
    db: DatabaseConnection,
}

impl CustomerAllocationRepository {
    /// Creates a new customer allocation repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates `amount` of a customer payment to a sales invoice.
    ///
    /// # Errors
    ///
    /// Declines with the limiting figure on over-allocation.
    pub async fn allocate(
        &self,
        ledger_id: LedgerId,
        payment_id: PaymentId,
        invoice_id: InvoiceId,
        amount: Decimal,
    ) -> Result<customer_payment_allocations::Model, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let payment = customer_payments::Entity::find_by_id(payment_id.into_inner())
            .filter(customer_payments::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;
        let invoice = sales_invoices::Entity::find_by_id(invoice_id.into_inner())
            .filter(sales_invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let snapshot = snapshot_customer(&txn, &payment, &invoice).await?;
        let plan = AllocationService::plan_allocation(&snapshot, amount)?;

        let allocation = match plan {
            AllocationPlan::Insert { amount } => {
                customer_payment_allocations::ActiveModel {
                    id: Set(AllocationId::new().into_inner()),
                    payment_id: Set(payment.id),
                    invoice_id: Set(invoice.id),
                    amount_allocated: Set(amount),
                    created_at: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await?
            }
            AllocationPlan::Merge { new_total } => {
                let existing = customer_payment_allocations::Entity::find()
                    .filter(customer_payment_allocations::Column::PaymentId.eq(payment.id))
                    .filter(customer_payment_allocations::Column::InvoiceId.eq(invoice.id))
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        DbErr::RecordNotFound("allocation pair row".to_string())
                    })?;
                let mut active: customer_payment_allocations::ActiveModel = existing.into();
                active.amount_allocated = Set(new_total);
                active.update(&txn).await?
            }
        };

        refresh_customer_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(
            payment_id = %payment_id,
            invoice_id = %invoice_id,
            amount = %amount,
            "customer payment allocated"
        );
        Ok(allocation)
    }

    /// Replaces an allocation's amount.
    ///
    /// # Errors
    ///
    /// Declines with the limiting figure on over-allocation.
    pub async fn update(
        &self,
        allocation_id: AllocationId,
        new_amount: Decimal,
    ) -> Result<customer_payment_allocations::Model, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let allocation =
            customer_payment_allocations::Entity::find_by_id(allocation_id.into_inner())
                .one(&txn)
                .await?
                .ok_or(AllocationError::NotFound(allocation_id))?;
        let payment_id = PaymentId::from_uuid(allocation.payment_id);
        let invoice_id = InvoiceId::from_uuid(allocation.invoice_id);

        let payment = customer_payments::Entity::find_by_id(allocation.payment_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;
        let invoice = sales_invoices::Entity::find_by_id(allocation.invoice_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let snapshot = snapshot_customer(&txn, &payment, &invoice).await?;
        let validated = AllocationService::plan_update(&snapshot, new_amount)?;

        let mut active: customer_payment_allocations::ActiveModel = allocation.into();
        active.amount_allocated = Set(validated);
        let updated = active.update(&txn).await?;

        refresh_customer_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(allocation_id = %allocation_id, amount = %validated, "allocation updated");
        Ok(updated)
    }

    /// Removes an allocation and rechecks the invoice's paid status.
    ///
    /// # Errors
    ///
    /// Returns an error when the allocation does not exist.
    pub async fn delete(
        &self,
        allocation_id: AllocationId,
    ) -> Result<InvoiceId, AllocationRepoError> {
        let txn = self.db.begin().await?;

        let allocation =
            customer_payment_allocations::Entity::find_by_id(allocation_id.into_inner())
                .one(&txn)
                .await?
                .ok_or(AllocationError::NotFound(allocation_id))?;
        let invoice_id = InvoiceId::from_uuid(allocation.invoice_id);

        let invoice = sales_invoices::Entity::find_by_id(allocation.invoice_id)
            .one(&txn)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        allocation.delete(&txn).await?;
        refresh_customer_status(&txn, invoice).await?;
        txn.commit().await?;

        tracing::info!(allocation_id = %allocation_id, "allocation deleted");
        Ok(invoice_id)
    }

    /// The payment's amount not yet allocated to any sales invoice.
    ///
    /// # Errors
    ///
    /// Returns an error when the payment does not exist in the ledger.
    pub async fn unallocated_amount(
        &self,
        ledger_id: LedgerId,
        payment_id: PaymentId,
    ) -> Result<Decimal, AllocationRepoError> {
        let payment = customer_payments::Entity::find_by_id(payment_id.into_inner())
            .filter(customer_payments::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AllocationRepoError::PaymentNotFound(payment_id))?;

        let allocated: Decimal = customer_payment_allocations::Entity::find()
            .filter(customer_payment_allocations::Column::PaymentId.eq(payment.id))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.amount_allocated)
            .sum();
        Ok(payment.amount - allocated)
    }

    /// The sales invoice's total minus everything allocated to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the invoice does not exist in the ledger.
    pub async fn outstanding_balance(
        &self,
        ledger_id: LedgerId,
        invoice_id: InvoiceId,
    ) -> Result<Decimal, AllocationRepoError> {
        let invoice = sales_invoices::Entity::find_by_id(invoice_id.into_inner())
            .filter(sales_invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AllocationRepoError::InvoiceNotFound(invoice_id))?;

        let allocated: Decimal = customer_payment_allocations::Entity::find()
            .filter(customer_payment_allocations::Column::InvoiceId.eq(invoice.id))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.amount_allocated)
            .sum();
        Ok(invoice.total - allocated)
    }
}

/// Customer-side conservation snapshot.
async fn snapshot_customer(
    txn: &DatabaseTransaction,
    payment: &customer_payments::Model,
    invoice: &sales_invoices::Model,
) -> Result<AllocationSnapshot, DbErr> {
    let payment_rows = customer_payment_allocations::Entity::find()
        .filter(customer_payment_allocations::Column::PaymentId.eq(payment.id))
        .all(txn)
        .await?;
    let invoice_rows = customer_payment_allocations::Entity::find()
        .filter(customer_payment_allocations::Column::InvoiceId.eq(invoice.id))
        .all(txn)
        .await?;

    Ok(AllocationSnapshot {
        payment_amount: payment.amount,
        payment_allocated: payment_rows.iter().map(|row| row.amount_allocated).sum(),
        invoice_total: invoice.total,
        invoice_allocated: invoice_rows.iter().map(|row| row.amount_allocated).sum(),
        existing_pair: payment_rows
            .iter()
            .find(|row| row.invoice_id == invoice.id)
            .map(|row| row.amount_allocated),
    })
}

/// Customer-side status recheck.
async fn refresh_customer_status(
    txn: &DatabaseTransaction,
    invoice: sales_invoices::Model,
) -> Result<(), DbErr> {
    let allocated: Decimal = customer_payment_allocations::Entity::find()
        .filter(customer_payment_allocations::Column::InvoiceId.eq(invoice.id))
        .all(txn)
        .await?
        .iter()
        .map(|row| row.amount_allocated)
        .sum();
    let outstanding = invoice.total - allocated;

    if let Some(next) = AllocationService::settled_status(invoice.status.into(), outstanding) {
        tracing::info!(invoice_id = %invoice.id, status = %next, "invoice status changed");
        let mut active: sales_invoices::ActiveModel = invoice.into();
        active.status = Set(next.into());
        active.updated_at = Set(Utc::now().into());
        active.update(txn).await?;
    }
    Ok(())
}
