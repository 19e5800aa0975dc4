//! # Visit Day Core
//!
//! Domain types and storage-independent logic for the visit day scheduling
//! service: the appointment state machine, schedule planning, spreadsheet
//! uploads and CSV reports.
//!
//! Services in this crate are written against the traits in [`store`]; the
//! `visitday-db` crate provides the PostgreSQL implementations.

pub mod errors;
pub mod models;
pub mod parsing;
pub mod reports;
pub mod scheduling;
pub mod services;
pub mod spreadsheet;
pub mod store;
