use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use visitday_core::models::{
    appointment::{Appointment, AppointmentSelection, SelectionAction},
    department::Department,
    program::Program,
    questionnaire::{Answer, Question, Questionnaire},
    student::Student,
    vip::Vip,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDepartment {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgram {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub default_appointment_length: i32,
    pub held_on_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVip {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub profile_url: Option<String>,
    pub ranking: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: Uuid,
    pub program_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub umid: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub program_id: Uuid,
    pub vip_id: Uuid,
    pub student_id: Option<Uuid>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentSelection {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbQuestionnaire {
    pub id: Uuid,
    pub program_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbQuestion {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub position: i32,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAnswer {
    pub question_id: Uuid,
    pub student_id: Uuid,
    pub response: String,
}

/// A booked slot joined with its VIP's name
#[derive(Debug, Clone, FromRow)]
pub struct DbBooking {
    pub student_id: Uuid,
    pub vip_name: String,
    pub start_time: NaiveDateTime,
}

/// An appointment joined with its VIP and, when booked, its student
#[derive(Debug, Clone, FromRow)]
pub struct DbAppointmentReportRow {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub vip_name: String,
    pub student_email: Option<String>,
    pub student_first_name: Option<String>,
    pub student_last_name: Option<String>,
    pub student_umid: Option<String>,
    pub student_created_at: Option<DateTime<Utc>>,
}

impl From<DbDepartment> for Department {
    fn from(row: DbDepartment) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<DbProgram> for Program {
    fn from(row: DbProgram) -> Self {
        Self {
            id: row.id,
            department_id: row.department_id,
            name: row.name,
            default_appointment_length: row.default_appointment_length,
            held_on_dates: row.held_on_dates,
            created_at: row.created_at,
        }
    }
}

impl From<DbVip> for Vip {
    fn from(row: DbVip) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            name: row.name,
            title: row.title,
            profile_url: row.profile_url,
            ranking: row.ranking,
            created_at: row.created_at,
        }
    }
}

impl From<DbStudent> for Student {
    fn from(row: DbStudent) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            umid: row.umid,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            vip_id: row.vip_id,
            student_id: row.student_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbAppointmentSelection> for AppointmentSelection {
    type Error = eyre::Report;

    fn try_from(row: DbAppointmentSelection) -> Result<Self> {
        let action = SelectionAction::parse(&row.action)
            .ok_or_else(|| eyre!("Unknown selection action '{}'", row.action))?;

        Ok(Self {
            id: row.id,
            appointment_id: row.appointment_id,
            user_id: row.user_id,
            action,
            created_at: row.created_at,
        })
    }
}

impl From<DbQuestionnaire> for Questionnaire {
    fn from(row: DbQuestionnaire) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

impl From<DbQuestion> for Question {
    fn from(row: DbQuestion) -> Self {
        Self {
            id: row.id,
            questionnaire_id: row.questionnaire_id,
            position: row.position,
            prompt: row.prompt,
        }
    }
}

impl From<DbAnswer> for Answer {
    fn from(row: DbAnswer) -> Self {
        Self {
            question_id: row.question_id,
            student_id: row.student_id,
            response: row.response,
        }
    }
}
