//! Planning of compound postings and reversals.
//!
//! One business event maps to a fixed, canonical set of balanced journal
//! legs. The planner is pure: it validates the event against the resolved
//! posting accounts and returns the full group, which the caller inserts
//! all-or-nothing. Any missing account or invalid amount declines the
//! whole event; no partial group is ever produced.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tillbook_shared::types::{AccountId, PostingGroupId};

use super::error::PostingError;
use super::types::{AccountRole, BusinessEvent, PostingAccounts, PostingGroup};
use super::vat::posting_vat;
use crate::journal::{EntryInput, JournalEntry, TransactionKind};

/// Stateless service mapping business events to journal legs.
pub struct PostingService;

impl PostingService {
    /// Plan the journal legs for a business event.
    ///
    /// # Errors
    ///
    /// Returns `PostingError` when an amount is not positive or an account
    /// role required by one of the event's legs is not configured.
    pub fn plan_event(
        date: NaiveDate,
        event: &BusinessEvent,
        accounts: &PostingAccounts,
    ) -> Result<PostingGroup, PostingError> {
        let group_id = PostingGroupId::new();
        let mut entries = Vec::new();

        match event {
            BusinessEvent::SalesLine {
                invoice_number,
                customer,
                description,
                quantity,
                unit_price,
                vat_code,
                tracked_product,
                unit_cost,
            } => {
                let net = quantity * unit_price;
                if net <= Decimal::ZERO {
                    return Err(PostingError::NonPositiveAmount);
                }
                let debtors = require(AccountRole::TradeDebtors, accounts.trade_debtors)?;
                let sales = require(AccountRole::Sales, accounts.sales)?;

                entries.push(leg(
                    date,
                    description.clone(),
                    debtors,
                    sales,
                    net,
                    invoice_number,
                    TransactionKind::SalesInvoice,
                    customer,
                ));

                let vat = posting_vat(vat_code.as_deref(), net);
                if vat > Decimal::ZERO {
                    let vat_output = require(AccountRole::VatOutput, accounts.vat_output)?;
                    entries.push(leg(
                        date,
                        format!("VAT Output: {description}"),
                        debtors,
                        vat_output,
                        vat,
                        invoice_number,
                        TransactionKind::SalesInvoice,
                        customer,
                    ));
                }

                if *tracked_product {
                    // No cost_price is tracked for products; the sale's unit
                    // price stands in when the caller knows nothing better.
                    let cost = quantity * unit_cost.unwrap_or(*unit_price);
                    if cost > Decimal::ZERO {
                        let cost_of_sales =
                            require(AccountRole::CostOfSales, accounts.cost_of_sales)?;
                        let stock = require(AccountRole::Stock, accounts.stock)?;
                        entries.push(leg(
                            date,
                            format!("Cost of Sales: {description}"),
                            cost_of_sales,
                            stock,
                            cost,
                            invoice_number,
                            TransactionKind::SalesInvoice,
                            customer,
                        ));
                    }
                }
            }

            BusinessEvent::SupplierLine {
                invoice_number,
                supplier,
                description,
                quantity,
                unit_price,
                vat_code,
                charge_account,
            } => {
                let net = quantity * unit_price;
                if net <= Decimal::ZERO {
                    return Err(PostingError::NonPositiveAmount);
                }
                let creditors = require(AccountRole::TradeCreditors, accounts.trade_creditors)?;

                entries.push(leg(
                    date,
                    description.clone(),
                    *charge_account,
                    creditors,
                    net,
                    invoice_number,
                    TransactionKind::SupplierInvoice,
                    supplier,
                ));

                let vat = posting_vat(vat_code.as_deref(), net);
                if vat > Decimal::ZERO {
                    let vat_input = require(AccountRole::VatInput, accounts.vat_input)?;
                    entries.push(leg(
                        date,
                        format!("VAT Input: {description}"),
                        vat_input,
                        creditors,
                        vat,
                        invoice_number,
                        TransactionKind::SupplierInvoice,
                        supplier,
                    ));
                }
            }

            BusinessEvent::CustomerPaymentReceived {
                reference,
                customer,
                method,
                amount,
            } => {
                if *amount <= Decimal::ZERO {
                    return Err(PostingError::NonPositiveAmount);
                }
                let receiving = if method.settles_direct_to_bank() {
                    require(AccountRole::Bank, accounts.bank)?
                } else {
                    require(AccountRole::UndepositedFunds, accounts.undeposited_funds)?
                };
                let debtors = require(AccountRole::TradeDebtors, accounts.trade_debtors)?;

                entries.push(leg(
                    date,
                    format!("Payment from {customer}"),
                    receiving,
                    debtors,
                    *amount,
                    reference,
                    TransactionKind::CustomerPayment,
                    customer,
                ));
            }

            BusinessEvent::SupplierPaymentMade {
                reference,
                supplier,
                method,
                amount,
            } => {
                if *amount <= Decimal::ZERO {
                    return Err(PostingError::NonPositiveAmount);
                }
                let creditors = require(AccountRole::TradeCreditors, accounts.trade_creditors)?;
                let paying = if method.settles_direct_to_bank() {
                    require(AccountRole::Bank, accounts.bank)?
                } else {
                    require(AccountRole::UndepositedFunds, accounts.undeposited_funds)?
                };

                entries.push(leg(
                    date,
                    format!("Payment to {supplier}"),
                    creditors,
                    paying,
                    *amount,
                    reference,
                    TransactionKind::SupplierPayment,
                    supplier,
                ));
            }

            BusinessEvent::StockAdjustment {
                reference,
                description,
                amount,
                adjustment_account,
            } => {
                if amount.is_zero() {
                    return Err(PostingError::NonPositiveAmount);
                }
                let stock = require(AccountRole::Stock, accounts.stock)?;
                let (debit, credit) = if *amount > Decimal::ZERO {
                    (stock, *adjustment_account)
                } else {
                    (*adjustment_account, stock)
                };

                entries.push(leg(
                    date,
                    description.clone(),
                    debit,
                    credit,
                    amount.abs(),
                    reference,
                    TransactionKind::StockAdjustment,
                    "",
                ));
            }
        }

        Ok(PostingGroup {
            id: group_id,
            reverses: None,
            entries,
        })
    }

    /// Plan the reversal of a previously posted group.
    ///
    /// `original` must be the complete set of entries stamped with one
    /// posting group ID. Each reversing leg swaps debit and credit, keeps
    /// the amount, takes the new date, prefixes the description with
    /// `"Reversal: "`, and prefixes the reference with `"REV-"`.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::EmptyGroup` for an empty set and
    /// `PostingError::MixedGroups` when entries span several groups.
    pub fn plan_reversal(
        original: &[JournalEntry],
        date: NaiveDate,
    ) -> Result<PostingGroup, PostingError> {
        let first = original.first().ok_or(PostingError::EmptyGroup)?;
        let reversed_group = first.posting_group_id;
        if original
            .iter()
            .any(|entry| entry.posting_group_id != reversed_group)
        {
            return Err(PostingError::MixedGroups);
        }

        let entries = original
            .iter()
            .map(|entry| EntryInput {
                entry_date: date,
                description: format!("Reversal: {}", entry.description),
                debit_account_id: entry.credit_account_id,
                credit_account_id: entry.debit_account_id,
                amount: entry.amount,
                reference: entry.reference.as_ref().map(|r| format!("REV-{r}")),
                kind: Some(TransactionKind::Reversal),
                journal_number: None,
                stakeholder: entry.stakeholder.clone(),
            })
            .collect();

        Ok(PostingGroup {
            id: PostingGroupId::new(),
            reverses: Some(reversed_group),
            entries,
        })
    }
}

fn require(role: AccountRole, account: Option<AccountId>) -> Result<AccountId, PostingError> {
    account.ok_or(PostingError::MissingAccount(role))
}

#[allow(clippy::too_many_arguments)]
fn leg(
    date: NaiveDate,
    description: String,
    debit: AccountId,
    credit: AccountId,
    amount: Decimal,
    reference: &str,
    kind: TransactionKind,
    stakeholder: &str,
) -> EntryInput {
    EntryInput {
        entry_date: date,
        description,
        debit_account_id: debit,
        credit_account_id: credit,
        amount,
        reference: Some(reference.to_string()),
        kind: Some(kind),
        journal_number: None,
        stakeholder: if stakeholder.is_empty() {
            None
        } else {
            Some(stakeholder.to_string())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::types::PaymentMethod;
    use rust_decimal_macros::dec;
    use tillbook_shared::types::{EntryId, LedgerId};

    fn accounts() -> PostingAccounts {
        PostingAccounts {
            trade_debtors: Some(AccountId::new()),
            trade_creditors: Some(AccountId::new()),
            sales: Some(AccountId::new()),
            vat_output: Some(AccountId::new()),
            vat_input: Some(AccountId::new()),
            bank: Some(AccountId::new()),
            undeposited_funds: Some(AccountId::new()),
            cost_of_sales: Some(AccountId::new()),
            stock: Some(AccountId::new()),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
    }

    fn sales_line(vat_code: &str, tracked: bool) -> BusinessEvent {
        BusinessEvent::SalesLine {
            invoice_number: "SI-0042".to_string(),
            customer: "Hartley Motors".to_string(),
            description: "205/55R16 tyre".to_string(),
            quantity: dec!(2),
            unit_price: dec!(45.00),
            vat_code: Some(vat_code.to_string()),
            tracked_product: tracked,
            unit_cost: None,
        }
    }

    #[test]
    fn test_sales_line_standard_vat_tracked_product() {
        let accounts = accounts();
        let group = PostingService::plan_event(date(), &sales_line("S", true), &accounts).unwrap();

        assert_eq!(group.entries.len(), 3);

        let net = &group.entries[0];
        assert_eq!(net.debit_account_id, accounts.trade_debtors.unwrap());
        assert_eq!(net.credit_account_id, accounts.sales.unwrap());
        assert_eq!(net.amount, dec!(90.00));
        assert_eq!(net.reference.as_deref(), Some("SI-0042"));
        assert_eq!(net.stakeholder.as_deref(), Some("Hartley Motors"));

        let vat = &group.entries[1];
        assert_eq!(vat.debit_account_id, accounts.trade_debtors.unwrap());
        assert_eq!(vat.credit_account_id, accounts.vat_output.unwrap());
        assert_eq!(vat.amount, dec!(18.0000));
        assert_eq!(vat.description, "VAT Output: 205/55R16 tyre");

        let cost = &group.entries[2];
        assert_eq!(cost.debit_account_id, accounts.cost_of_sales.unwrap());
        assert_eq!(cost.credit_account_id, accounts.stock.unwrap());
        assert_eq!(cost.amount, dec!(90.00));
        assert_eq!(cost.description, "Cost of Sales: 205/55R16 tyre");
    }

    #[test]
    fn test_sales_line_exempt_no_vat_leg() {
        let group =
            PostingService::plan_event(date(), &sales_line("E", false), &accounts()).unwrap();
        assert_eq!(group.entries.len(), 1);
    }

    #[test]
    fn test_sales_line_unknown_code_charges_no_vat() {
        let group =
            PostingService::plan_event(date(), &sales_line("X", false), &accounts()).unwrap();
        assert_eq!(group.entries.len(), 1);
    }

    #[test]
    fn test_sales_line_missing_vat_output_declines_whole_event() {
        let mut accounts = accounts();
        accounts.vat_output = None;
        let result = PostingService::plan_event(date(), &sales_line("S", false), &accounts);
        assert!(matches!(
            result,
            Err(PostingError::MissingAccount(AccountRole::VatOutput))
        ));
    }

    #[test]
    fn test_sales_line_zero_quantity_rejected() {
        let event = BusinessEvent::SalesLine {
            invoice_number: "SI-0001".to_string(),
            customer: "A".to_string(),
            description: "Nothing".to_string(),
            quantity: dec!(0),
            unit_price: dec!(10),
            vat_code: Some("S".to_string()),
            tracked_product: false,
            unit_cost: None,
        };
        let result = PostingService::plan_event(date(), &event, &accounts());
        assert!(matches!(result, Err(PostingError::NonPositiveAmount)));
    }

    #[test]
    fn test_supplier_line_with_vat() {
        let accounts = accounts();
        let charge = AccountId::new();
        let event = BusinessEvent::SupplierLine {
            invoice_number: "PI-0007".to_string(),
            supplier: "Tyre Wholesale Ltd".to_string(),
            description: "Stock purchase".to_string(),
            quantity: dec!(10),
            unit_price: dec!(30.00),
            vat_code: Some("S".to_string()),
            charge_account: charge,
        };
        let group = PostingService::plan_event(date(), &event, &accounts).unwrap();

        assert_eq!(group.entries.len(), 2);
        assert_eq!(group.entries[0].debit_account_id, charge);
        assert_eq!(
            group.entries[0].credit_account_id,
            accounts.trade_creditors.unwrap()
        );
        assert_eq!(group.entries[0].amount, dec!(300.00));
        assert_eq!(
            group.entries[1].debit_account_id,
            accounts.vat_input.unwrap()
        );
        assert_eq!(
            group.entries[1].credit_account_id,
            accounts.trade_creditors.unwrap()
        );
        assert_eq!(group.entries[1].description, "VAT Input: Stock purchase");
    }

    #[test]
    fn test_customer_payment_bacs_goes_to_bank() {
        let accounts = accounts();
        let event = BusinessEvent::CustomerPaymentReceived {
            reference: "PAY-100".to_string(),
            customer: "Hartley Motors".to_string(),
            method: PaymentMethod::Bacs,
            amount: dec!(108.00),
        };
        let group = PostingService::plan_event(date(), &event, &accounts).unwrap();

        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.entries[0].debit_account_id, accounts.bank.unwrap());
        assert_eq!(
            group.entries[0].credit_account_id,
            accounts.trade_debtors.unwrap()
        );
        assert_eq!(group.entries[0].description, "Payment from Hartley Motors");
    }

    #[test]
    fn test_customer_payment_cash_goes_to_undeposited_funds() {
        let accounts = accounts();
        let event = BusinessEvent::CustomerPaymentReceived {
            reference: "PAY-101".to_string(),
            customer: "Walk-in".to_string(),
            method: PaymentMethod::Cash,
            amount: dec!(45.00),
        };
        let group = PostingService::plan_event(date(), &event, &accounts).unwrap();
        assert_eq!(
            group.entries[0].debit_account_id,
            accounts.undeposited_funds.unwrap()
        );
    }

    #[test]
    fn test_supplier_payment_sides() {
        let accounts = accounts();
        let event = BusinessEvent::SupplierPaymentMade {
            reference: "PAY-200".to_string(),
            supplier: "Tyre Wholesale Ltd".to_string(),
            method: PaymentMethod::Bacs,
            amount: dec!(300.00),
        };
        let group = PostingService::plan_event(date(), &event, &accounts).unwrap();
        assert_eq!(
            group.entries[0].debit_account_id,
            accounts.trade_creditors.unwrap()
        );
        assert_eq!(group.entries[0].credit_account_id, accounts.bank.unwrap());
        assert_eq!(
            group.entries[0].description,
            "Payment to Tyre Wholesale Ltd"
        );
    }

    #[test]
    fn test_stock_adjustment_signs() {
        let accounts = accounts();
        let adjustment = AccountId::new();

        let write_up = BusinessEvent::StockAdjustment {
            reference: "ADJ-1".to_string(),
            description: "Stocktake gain".to_string(),
            amount: dec!(50.00),
            adjustment_account: adjustment,
        };
        let group = PostingService::plan_event(date(), &write_up, &accounts).unwrap();
        assert_eq!(group.entries[0].debit_account_id, accounts.stock.unwrap());
        assert_eq!(group.entries[0].credit_account_id, adjustment);
        assert_eq!(group.entries[0].amount, dec!(50.00));

        let write_down = BusinessEvent::StockAdjustment {
            reference: "ADJ-2".to_string(),
            description: "Stocktake loss".to_string(),
            amount: dec!(-30.00),
            adjustment_account: adjustment,
        };
        let group = PostingService::plan_event(date(), &write_down, &accounts).unwrap();
        assert_eq!(group.entries[0].debit_account_id, adjustment);
        assert_eq!(group.entries[0].credit_account_id, accounts.stock.unwrap());
        assert_eq!(group.entries[0].amount, dec!(30.00));
    }

    fn posted_entry(
        group: PostingGroupId,
        debit: AccountId,
        credit: AccountId,
        amount: Decimal,
        description: &str,
        reference: &str,
    ) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            ledger_id: LedgerId::new(),
            entry_date: date(),
            description: description.to_string(),
            debit_account_id: debit,
            credit_account_id: credit,
            amount,
            reference: Some(reference.to_string()),
            kind: Some(TransactionKind::SalesInvoice),
            journal_number: None,
            stakeholder: None,
            posting_group_id: group,
        }
    }

    #[test]
    fn test_plan_reversal_swaps_sides() {
        let group_id = PostingGroupId::new();
        let debtors = AccountId::new();
        let sales = AccountId::new();
        let original = vec![
            posted_entry(group_id, debtors, sales, dec!(90), "Tyres", "SI-0042"),
            posted_entry(
                group_id,
                debtors,
                sales,
                dec!(18),
                "VAT Output: Tyres",
                "SI-0042",
            ),
        ];

        let reversal_date = NaiveDate::from_ymd_opt(2026, 4, 9).unwrap();
        let reversal = PostingService::plan_reversal(&original, reversal_date).unwrap();

        assert_eq!(reversal.reverses, Some(group_id));
        assert_ne!(reversal.id, group_id);
        assert_eq!(reversal.entries.len(), 2);

        let first = &reversal.entries[0];
        assert_eq!(first.debit_account_id, sales);
        assert_eq!(first.credit_account_id, debtors);
        assert_eq!(first.amount, dec!(90));
        assert_eq!(first.entry_date, reversal_date);
        assert_eq!(first.description, "Reversal: Tyres");
        assert_eq!(first.reference.as_deref(), Some("REV-SI-0042"));
        assert_eq!(first.kind, Some(TransactionKind::Reversal));

        assert_eq!(
            reversal.entries[1].description,
            "Reversal: VAT Output: Tyres"
        );
    }

    #[test]
    fn test_plan_reversal_empty_group() {
        let result = PostingService::plan_reversal(&[], date());
        assert!(matches!(result, Err(PostingError::EmptyGroup)));
    }

    #[test]
    fn test_plan_reversal_mixed_groups() {
        let a = AccountId::new();
        let b = AccountId::new();
        let original = vec![
            posted_entry(PostingGroupId::new(), a, b, dec!(10), "One", "R1"),
            posted_entry(PostingGroupId::new(), a, b, dec!(20), "Two", "R1"),
        ];
        let result = PostingService::plan_reversal(&original, date());
        assert!(matches!(result, Err(PostingError::MixedGroups)));
    }
}
