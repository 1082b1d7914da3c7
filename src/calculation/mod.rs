//! Fee calculation for rentals and returns.
//!
//! One file per rule: duration rounding, the rental engine, and the
//! return engine. Fees are exact decimal arithmetic throughout; no
//! floating point touches a price.

pub mod rental;
pub mod returns;
pub mod rounding;

pub use rental::{RentalRequest, rent};
pub use returns::return_unit;
pub use rounding::{RoundedDuration, overdue_units, round_duration};
