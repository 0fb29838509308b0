//! Blitz wave planner API server library.
//!
//! Exposes the core building blocks (config, state, error handling, planner
//! session, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod planner;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
