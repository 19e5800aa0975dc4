pub mod appointment;
pub mod health;
pub mod program;
pub mod report;
pub mod upload;
pub mod vip;
