//! Change detection and the monitoring loop.
//!
//! This module provides:
//! - [`classify`] and [`Change`]: comparison of a new observation with the last one
//! - [`Monitor`]: one check cycle, single-shot runs and the continuous loop

mod change;
mod cycle;


pub use change::{AddressChange, Change, OriginChange, classify};
pub use cycle::{CheckReport, Monitor, RATE_LIMIT_FLOOR, RunSummary};
