//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod campaign_day_repo;
pub mod target_repo;
pub mod wave_assignment_repo;

pub use campaign_day_repo::CampaignDayRepo;
pub use target_repo::TargetRepo;
pub use wave_assignment_repo::WaveAssignmentRepo;
