pub mod assignments;
pub mod campaign_days;
pub mod graph;
pub mod planner;
pub mod targets;
pub mod waves;
