use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Whether a slot can still be claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Available,
    Booked,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Available => "available",
            AppointmentStatus::Booked => "booked",
        }
    }
}

/// A bookable slot with one VIP.
///
/// Availability is encoded by `student_id`: `None` means the slot is open.
/// The only mutations are [`Appointment::claim`] and [`Appointment::release`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub program_id: Uuid,
    pub vip_id: Uuid,
    pub student_id: Option<Uuid>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Appointment {0} is already booked")]
    AlreadyBooked(Uuid),

    #[error("Appointment {0} is not booked")]
    NotBooked(Uuid),
}

impl Appointment {
    pub fn status(&self) -> AppointmentStatus {
        if self.student_id.is_some() {
            AppointmentStatus::Booked
        } else {
            AppointmentStatus::Available
        }
    }

    pub fn is_available(&self) -> bool {
        self.status() == AppointmentStatus::Available
    }

    /// Books the slot for `student_id`, returning the audit record to append.
    ///
    /// The appointment is left untouched when it is already booked.
    pub fn claim(&mut self, student_id: Uuid) -> Result<NewSelection, TransitionError> {
        if self.student_id.is_some() {
            return Err(TransitionError::AlreadyBooked(self.id));
        }

        self.student_id = Some(student_id);
        Ok(NewSelection {
            appointment_id: self.id,
            user_id: student_id,
            action: SelectionAction::Selected,
        })
    }

    /// Frees the slot, returning the audit record to append.
    ///
    /// The record names the student who held the slot.
    pub fn release(&mut self) -> Result<NewSelection, TransitionError> {
        let student_id = self
            .student_id
            .take()
            .ok_or(TransitionError::NotBooked(self.id))?;

        Ok(NewSelection {
            appointment_id: self.id,
            user_id: student_id,
            action: SelectionAction::Deleted,
        })
    }
}

/// A slot that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub program_id: Uuid,
    pub vip_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), String> {
        if self.end_time <= self.start_time {
            return Err(format!(
                "End time {} must be after start time {}",
                self.end_time, self.start_time
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    Selected,
    Deleted,
}

impl SelectionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionAction::Selected => "selected",
            SelectionAction::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "selected" => Some(SelectionAction::Selected),
            "deleted" => Some(SelectionAction::Deleted),
            _ => None,
        }
    }
}

/// Append-only audit record of a claim or release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSelection {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub user_id: Uuid,
    pub action: SelectionAction,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSelection {
    pub appointment_id: Uuid,
    pub user_id: Uuid,
    pub action: SelectionAction,
}

/// Result of a claim or release that reached the appointment row
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Applied {
        appointment: Appointment,
        selection: AppointmentSelection,
    },
    Rejected(TransitionError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAppointmentRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub program_id: Uuid,
    pub vip_id: Uuid,
    pub student_id: Option<Uuid>,
    pub status: AppointmentStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            status: appointment.status(),
            id: appointment.id,
            program_id: appointment.program_id,
            vip_id: appointment.vip_id,
            student_id: appointment.student_id,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub appointment: AppointmentResponse,
    pub selection: AppointmentSelection,
}
