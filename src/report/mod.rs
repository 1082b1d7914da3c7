//! Daily sales report generation.
//!
//! Aggregates the day's ledger into revenue, popularity, and hourly
//! distributions, renders them as a plain-text report with bar charts,
//! and writes the report to a non-clobbering `SALES_REPORT_<date>.txt`
//! file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::ShopMetadata;
use crate::error::{EngineError, EngineResult};
use crate::ledger::SalesLedger;
use crate::models::BikeCategory;

/// Width of the widest bar in the rendered charts.
const BAR_WIDTH: u32 = 40;

/// Revenue and transaction count for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// The category.
    pub category: BikeCategory,
    /// Revenue attributed to the category.
    pub revenue: Decimal,
    /// Share of total revenue (0 to 1; 0 when the day had no revenue).
    pub revenue_share: Decimal,
    /// Number of transactions for the category.
    pub transactions: usize,
    /// Share of the total transaction count (0 to 1).
    pub transaction_share: Decimal,
}

/// Aggregated sales figures for one business day.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    /// The business date being reported.
    pub date: NaiveDate,
    /// Currency symbol from the shop configuration.
    pub currency: String,
    /// Sum of all transaction amounts.
    pub total_revenue: Decimal,
    /// Total number of transactions.
    pub total_transactions: usize,
    /// Per-category figures, in pricing-table order.
    pub categories: Vec<CategoryBreakdown>,
    /// Revenue per hour of day, indexed 0..24.
    pub hourly_revenue: [Decimal; 24],
    /// Up to three highest-revenue hours, descending.
    pub top_hours: Vec<(u32, Decimal)>,
}

impl SalesReport {
    /// Aggregates a day's ledger into report figures.
    pub fn from_ledger(ledger: &SalesLedger, shop: &ShopMetadata) -> Self {
        let total_revenue = ledger.total_revenue();
        let total_transactions = ledger.len();

        let categories = BikeCategory::ALL
            .iter()
            .map(|&category| {
                let mut revenue = Decimal::ZERO;
                let mut transactions = 0usize;
                for t in ledger.transactions() {
                    if t.category == category {
                        revenue += t.amount;
                        transactions += 1;
                    }
                }
                CategoryBreakdown {
                    category,
                    revenue,
                    revenue_share: share(revenue, total_revenue),
                    transactions,
                    transaction_share: share(
                        Decimal::from(transactions as u64),
                        Decimal::from(total_transactions as u64),
                    ),
                }
            })
            .collect();

        let mut hourly_revenue = [Decimal::ZERO; 24];
        for t in ledger.transactions() {
            hourly_revenue[t.timestamp.hour() as usize] += t.amount;
        }

        let mut ranked: Vec<(u32, Decimal)> = hourly_revenue
            .iter()
            .enumerate()
            .filter(|(_, amount)| **amount > Decimal::ZERO)
            .map(|(hour, amount)| (hour as u32, *amount))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(3);

        Self {
            date: ledger.date(),
            currency: shop.currency.clone(),
            total_revenue,
            total_transactions,
            categories,
            hourly_revenue,
            top_hours: ranked,
        }
    }

    /// Renders the report as plain text with `#` revenue bars and `*`
    /// hourly bars.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "SALES REPORT     Date: {}", self.date.format("%Y%m%d"));
        let _ = writeln!(out);

        let _ = writeln!(out, "I. Total Revenue");
        let _ = writeln!(
            out,
            "The total revenue: {}{:.2}",
            self.currency, self.total_revenue
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Bike Type\tRevenue\tProportion");
        let _ = writeln!(out, "-----------------------------------");
        for row in &self.categories {
            let _ = writeln!(
                out,
                "{:<6}\t{}{:>6.2}\t{:.2}%",
                row.category,
                self.currency,
                row.revenue,
                row.revenue_share * Decimal::from(100)
            );
        }
        let _ = writeln!(out, "-----------------------------------");
        let _ = writeln!(out);
        let _ = writeln!(out, "Revenue Ranking");
        let _ = writeln!(out);
        for row in ranked_by(&self.categories, |r| r.revenue_share) {
            let _ = writeln!(
                out,
                "{:<6} | {}  {:.2}%",
                row.category,
                bar('#', row.revenue_share),
                row.revenue_share * Decimal::from(100)
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "II. Popularity");
        let _ = writeln!(
            out,
            "The total number of bicycles rented: {}",
            self.total_transactions
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Bike Type\tNumber\tProportion");
        let _ = writeln!(out, "-----------------------------------");
        for row in &self.categories {
            let _ = writeln!(
                out,
                "{:<6}\t{:>6}\t{:.2}%",
                row.category,
                row.transactions,
                row.transaction_share * Decimal::from(100)
            );
        }
        let _ = writeln!(out, "-----------------------------------");
        let _ = writeln!(out);
        let _ = writeln!(out, "Popularity Ranking");
        let _ = writeln!(out);
        for row in ranked_by(&self.categories, |r| r.transaction_share) {
            let _ = writeln!(
                out,
                "{:<6} | {}  {:.2}%",
                row.category,
                bar('#', row.transaction_share),
                row.transaction_share * Decimal::from(100)
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "III. Hourly revenue");
        if self.top_hours.is_empty() {
            let _ = writeln!(out, "Hourly revenue data is empty.");
        } else {
            let _ = writeln!(out, "Top 3 Hours of Revenue:");
            let _ = writeln!(out);
            for (hour, amount) in &self.top_hours {
                let _ = writeln!(
                    out,
                    "Hour {:02}:00 - {:02}:00: {}{:.2}",
                    hour,
                    hour + 1,
                    self.currency,
                    amount
                );
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Hourly Revenue Plot");
        let max_revenue = self
            .hourly_revenue
            .iter()
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO);
        for (hour, amount) in self.hourly_revenue.iter().enumerate() {
            if *amount > Decimal::ZERO {
                let _ = writeln!(
                    out,
                    "{:02}:00 - {:02}:00 | {} {}{:.2}",
                    hour,
                    hour + 1,
                    bar('*', share(*amount, max_revenue)),
                    self.currency,
                    amount
                );
            }
        }

        out
    }

    /// Writes the rendered report under `dir` and returns the path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StorageFailure`] when the file cannot be
    /// written.
    pub fn write_to(&self, dir: &Path) -> EngineResult<PathBuf> {
        let path = output_path(dir, self.date);
        std::fs::write(&path, self.render()).map_err(|e| EngineError::StorageFailure {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(path)
    }
}

/// Picks the first free `SALES_REPORT_<yyyymmdd>.txt` name under `dir`,
/// adding `_1`, `_2`, ... suffixes while the name is taken. Existing
/// reports are never overwritten.
pub fn output_path(dir: &Path, date: NaiveDate) -> PathBuf {
    let stamp = date.format("%Y%m%d").to_string();
    let mut path = dir.join(format!("SALES_REPORT_{stamp}.txt"));
    let mut attempt = 1;
    while path.exists() {
        path = dir.join(format!("SALES_REPORT_{stamp}_{attempt}.txt"));
        attempt += 1;
    }
    path
}

fn share(part: Decimal, whole: Decimal) -> Decimal {
    if whole == Decimal::ZERO {
        Decimal::ZERO
    } else {
        part / whole
    }
}

fn bar(symbol: char, proportion: Decimal) -> String {
    let scaled = (proportion * Decimal::from(BAR_WIDTH))
        .floor()
        .to_usize()
        .unwrap_or(0);
    std::iter::repeat(symbol).take(scaled).collect()
}

fn ranked_by(
    categories: &[CategoryBreakdown],
    key: impl Fn(&CategoryBreakdown) -> Decimal,
) -> Vec<&CategoryBreakdown> {
    let mut ranked: Vec<&CategoryBreakdown> = categories.iter().collect();
    ranked.sort_by(|a, b| key(b).cmp(&key(a)));
    ranked
}
