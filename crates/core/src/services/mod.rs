pub mod schedule_creator;
pub mod upload;
