//! Read-side queries feeding the CSV exports.

use std::collections::HashMap;

use crate::models::{DbAnswer, DbAppointmentReportRow, DbBooking};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use visitday_core::models::{appointment::Appointment, questionnaire::Question, student::Student};
use visitday_core::reports::{AppointmentReportRow, BookedSlot, StudentReportRow};

use super::{questionnaire::get_questions_by_program_id, student::get_students_by_program_id};

pub async fn student_report(
    pool: &Pool<Postgres>,
    program_id: Uuid,
) -> Result<(Vec<Question>, Vec<StudentReportRow>)> {
    let questions: Vec<Question> = get_questions_by_program_id(pool, program_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let students = get_students_by_program_id(pool, program_id).await?;

    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT a.student_id, v.name AS vip_name, a.start_time
        FROM appointments a
        JOIN vips v ON v.id = a.vip_id
        WHERE a.program_id = $1 AND a.student_id IS NOT NULL
        ORDER BY a.start_time ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    let answers = sqlx::query_as::<_, DbAnswer>(
        r#"
        SELECT an.question_id, an.student_id, an.response
        FROM answers an
        JOIN questions q ON q.id = an.question_id
        JOIN questionnaires qn ON qn.id = q.questionnaire_id
        WHERE qn.program_id = $1
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    let mut bookings_by_student: HashMap<Uuid, Vec<BookedSlot>> = HashMap::new();
    for booking in bookings {
        bookings_by_student
            .entry(booking.student_id)
            .or_default()
            .push(BookedSlot {
                vip_name: booking.vip_name,
                start_time: booking.start_time,
            });
    }

    let mut answers_by_student: HashMap<Uuid, HashMap<Uuid, String>> = HashMap::new();
    for answer in answers {
        answers_by_student
            .entry(answer.student_id)
            .or_default()
            .insert(answer.question_id, answer.response);
    }

    let rows = students
        .into_iter()
        .map(|student| StudentReportRow {
            bookings: bookings_by_student.remove(&student.id).unwrap_or_default(),
            answers: answers_by_student.remove(&student.id).unwrap_or_default(),
            student: Student::from(student),
        })
        .collect();

    Ok((questions, rows))
}

pub async fn appointment_report(pool: &Pool<Postgres>, program_id: Uuid) -> Result<Vec<AppointmentReportRow>> {
    let rows = sqlx::query_as::<_, DbAppointmentReportRow>(
        r#"
        SELECT a.id, a.program_id, a.vip_id, a.student_id, a.start_time, a.end_time, a.created_at,
               v.name AS vip_name,
               s.email AS student_email,
               s.first_name AS student_first_name,
               s.last_name AS student_last_name,
               s.umid AS student_umid,
               s.created_at AS student_created_at
        FROM appointments a
        JOIN vips v ON v.id = a.vip_id
        LEFT JOIN students s ON s.id = a.student_id
        WHERE a.program_id = $1
        ORDER BY a.start_time ASC, v.name ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(report_row).collect())
}

fn report_row(row: DbAppointmentReportRow) -> AppointmentReportRow {
    let appointment = Appointment::from(row.appointment);
    let student = match (appointment.student_id, row.student_email, row.student_created_at) {
        (Some(id), Some(email), Some(created_at)) => Some(Student {
            id,
            program_id: appointment.program_id,
            email,
            first_name: row.student_first_name,
            last_name: row.student_last_name,
            umid: row.student_umid,
            created_at,
        }),
        _ => None,
    };

    AppointmentReportRow {
        appointment,
        vip_name: row.vip_name,
        student,
    }
}
