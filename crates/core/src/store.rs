//! Storage seams used by the batch services.
//!
//! A batch is a unit of work: rows are written through the writer traits and
//! the whole batch is then committed or rolled back. Writers distinguish a
//! row the store refused ([`WriteError::Rejected`]), which only fails that
//! row, from a broken store ([`WriteError::Fatal`]), which aborts the batch.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    appointment::{Appointment, NewAppointment},
    student::{NewStudent, Student},
    vip::{NewVip, Vip},
};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Fatal(#[from] eyre::Report),
}

#[async_trait]
pub trait AppointmentWriter: Send {
    async fn insert_appointment(&mut self, appointment: &NewAppointment) -> Result<Appointment, WriteError>;
}

#[async_trait]
pub trait RosterWriter: Send {
    /// Returns the program's student with this email, creating it if needed.
    async fn find_or_create_student(&mut self, student: &NewStudent) -> Result<Student, WriteError>;

    /// Returns the program's VIP with this name, creating it if needed.
    async fn find_or_create_vip(&mut self, vip: &NewVip) -> Result<Vip, WriteError>;
}

#[async_trait]
pub trait UnitOfWork: Send + Sized {
    async fn commit(self) -> eyre::Result<()>;

    async fn rollback(self) -> eyre::Result<()>;
}
