//! CSV exports of a program's students and appointments.
//!
//! The database layer gathers the rows; this module only lays them out.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{appointment::Appointment, questionnaire::Question, student::Student};

pub const NOT_ANSWERED: &str = "Not answered";

pub const STUDENT_REPORT_COLUMNS: &[&str] =
    &["Last Name", "First Name", "Email", "UMID", "Booked Appointments"];

pub const APPOINTMENT_REPORT_COLUMNS: &[&str] = &[
    "VIP",
    "Start Time",
    "End Time",
    "Status",
    "Student Last Name",
    "Student First Name",
    "Student Email",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct BookedSlot {
    pub vip_name: String,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct StudentReportRow {
    pub student: Student,
    pub bookings: Vec<BookedSlot>,
    /// Responses keyed by question id
    pub answers: HashMap<Uuid, String>,
}

#[derive(Debug, Clone)]
pub struct AppointmentReportRow {
    pub appointment: Appointment,
    pub vip_name: String,
    pub student: Option<Student>,
}

/// One line per student, with a trailing column per questionnaire question.
pub fn render_student_report(questions: &[Question], rows: &[StudentReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header = STUDENT_REPORT_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(questions.iter().map(|q| q.prompt.clone()));
    writer.write_record(header)?;

    for row in rows {
        let student = &row.student;
        let bookings = row
            .bookings
            .iter()
            .map(|b| format!("{} ({})", b.vip_name, b.start_time.format(TIMESTAMP_FORMAT)))
            .collect::<Vec<_>>()
            .join("; ");

        let mut record = vec![
            student.last_name.clone().unwrap_or_default(),
            student.first_name.clone().unwrap_or_default(),
            student.email.clone(),
            student.umid.clone().unwrap_or_default(),
            bookings,
        ];
        record.extend(questions.iter().map(|q| {
            row.answers
                .get(&q.id)
                .cloned()
                .unwrap_or_else(|| NOT_ANSWERED.to_string())
        }));
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// One line per appointment slot, booked or not.
pub fn render_appointment_report(rows: &[AppointmentReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(APPOINTMENT_REPORT_COLUMNS)?;

    for row in rows {
        let appointment = &row.appointment;
        let (last_name, first_name, email) = match &row.student {
            Some(s) => (
                s.last_name.clone().unwrap_or_default(),
                s.first_name.clone().unwrap_or_default(),
                s.email.clone(),
            ),
            None => Default::default(),
        };

        writer.write_record([
            row.vip_name.clone(),
            appointment.start_time.format(TIMESTAMP_FORMAT).to_string(),
            appointment.end_time.format(TIMESTAMP_FORMAT).to_string(),
            appointment.status().as_str().to_string(),
            last_name,
            first_name,
            email,
        ])?;
    }

    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
