//! ipwatch: public IP and location change monitor
//!
//! A library for looking up the public address of the current machine
//! through a list of fallback providers, resolving its geographic origin,
//! and recording every change in an append-only history.

pub mod config;
pub mod fetch;
pub mod history;
pub mod lookup;
pub mod monitor;
pub mod observation;
pub mod time;
