pub mod appointment;
pub mod batch;
pub mod department;
pub mod program;
pub mod questionnaire;
pub mod report;
pub mod student;
pub mod vip;
