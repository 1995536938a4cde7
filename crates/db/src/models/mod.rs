//! Row structs and save DTOs for the admin tables.
//!
//! Rust fields use English names; repositories alias the Portuguese
//! column names onto them.

pub mod alert_criterion;
pub mod crop;
pub mod property;
pub mod quantity;
pub mod sensor;
pub mod station;
