//! Campo API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! background simulation, live feed) so integration tests and the binary
//! entrypoint can both access them.

pub mod background;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
