//! Rental and fee engine for a single-shop bicycle rental business
//!
//! This crate tracks a shop's bicycle inventory, rents bicycles out and
//! takes them back with time-based fees (ceiling rounding per billing
//! unit, surcharges for overdue returns), keeps an append-only daily
//! sales ledger, and renders the day's sales report.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod models;
pub mod report;
pub mod storage;
