//! The sales ledger for one business day.
//!
//! An append-only sequence of [`SalesTransaction`] records, owned
//! exclusively by the business date it was opened for. The report
//! generator consumes the ledger; nothing ever mutates or deletes an
//! appended transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SalesTransaction;

/// The append-only transaction record for a single business day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLedger {
    date: NaiveDate,
    transactions: Vec<SalesTransaction>,
}

impl SalesLedger {
    /// Creates an empty ledger for the given business date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            transactions: Vec::new(),
        }
    }

    /// Returns the business date this ledger belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Appends a transaction to the day's sequence.
    pub fn append(&mut self, transaction: SalesTransaction) {
        self.transactions.push(transaction);
    }

    /// Returns the day's transactions in append order.
    pub fn transactions(&self) -> &[SalesTransaction] {
        &self.transactions
    }

    /// Returns the number of recorded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true when no transactions have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sums the amounts of all recorded transactions.
    pub fn total_revenue(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BikeCategory, TransactionKind};
    use chrono::NaiveDateTime;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_transaction(amount: &str, kind: TransactionKind) -> SalesTransaction {
        SalesTransaction {
            id: Uuid::new_v4(),
            kind,
            category: BikeCategory::Adult,
            unit_id: "A001".to_string(),
            unit_price: dec("8"),
            billing_unit_label: "per hour".to_string(),
            timestamp: NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            amount: dec(amount),
            contact: Some("91234567".to_string()),
        }
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = SalesLedger::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_revenue(), Decimal::ZERO);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = SalesLedger::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        ledger.append(make_transaction("16", TransactionKind::Rental));
        ledger.append(make_transaction("8", TransactionKind::ExcessCharge));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0].kind, TransactionKind::Rental);
        assert_eq!(ledger.transactions()[1].kind, TransactionKind::ExcessCharge);
    }

    #[test]
    fn test_total_revenue_sums_all_kinds() {
        let mut ledger = SalesLedger::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        ledger.append(make_transaction("16", TransactionKind::Rental));
        ledger.append(make_transaction("13", TransactionKind::Rental));
        ledger.append(make_transaction("8", TransactionKind::ExcessCharge));

        assert_eq!(ledger.total_revenue(), dec("37"));
    }

    #[test]
    fn test_ledger_serialization_round_trip() {
        let mut ledger = SalesLedger::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        ledger.append(make_transaction("16", TransactionKind::Rental));

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: SalesLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.date(), ledger.date());
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.total_revenue(), dec("16"));
    }
}
