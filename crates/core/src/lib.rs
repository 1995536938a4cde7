//! Domain logic for the field monitoring dashboard: sensor simulation,
//! threshold evaluation, advisory fallback and the per-crop tick loop.
//!
//! Nothing here performs I/O beyond the [`advisory`] traits, which the
//! `campo-advisor` crate implements against the hosted generation service.

pub mod advisory;
pub mod alert;
pub mod comparison;
pub mod config;
pub mod crop;
pub mod error;
pub mod history;
pub mod monitor;
pub mod reading;
pub mod seed;
pub mod session;
pub mod simulation;
pub mod thresholds;
pub mod types;
