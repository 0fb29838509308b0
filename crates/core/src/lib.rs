//! Domain logic for the blitz outreach wave planner.
//!
//! This crate has no internal dependencies so the DB, API, and any future
//! client tooling can share the same wave table, timezone inference, board
//! invariants, and drag resolution.

pub mod board;
pub mod drag;
pub mod error;
pub mod graph_layout;
pub mod outreach;
pub mod paging;
pub mod timezone;
pub mod types;
pub mod waves;
