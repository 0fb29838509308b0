//! Wave planner session.
//!
//! A [`WavePlanner`] is built per request from a [`PlannerStore`]: it loads
//! the campaign day for a date, the available target pool, and the day's
//! assignments into a [`blitz_core::board::WaveBoard`], then applies
//! assign / move / remove / progress mutations by writing through the store
//! first and patching the board only after the write succeeds.

mod session;
mod store;

#[cfg(test)]
mod memory;

pub use session::{
    CollisionInput, DropOutcome, DropRequest, Notice, NoticeLevel, PlannerBoard, PlannerView,
    WaveColumn, WavePlanner,
};
pub use store::{PgPlannerStore, PlannerStore};
