pub mod appointment;
pub mod department;
pub mod program;
pub mod questionnaire;
pub mod schedule;
pub mod student;
pub mod upload;
pub mod vip;
