pub mod analytics;
pub mod drill;
pub mod review;
pub mod schedule;
