//! Spreadsheet imports of appointments, students and VIPs.
//!
//! Each import runs every row through one batch. Rows that fail to parse or
//! that the store rejects are counted and described; a fatal store error
//! rolls back the whole batch.

use eyre::Result;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::schedule_creator::rollback_quietly;
use crate::models::{
    appointment::NewAppointment,
    student::{format_umid, NewStudent},
    upload::{UploadKind, UploadResult},
    vip::{NewVip, Vip},
};
use crate::parsing::parse_datetime;
use crate::spreadsheet::{Sheet, SheetRow};
use crate::store::{AppointmentWriter, RosterWriter, UnitOfWork, WriteError};

/// Checks that a sheet has at least a header row.
pub fn check_sheet(sheet: &Sheet, kind: UploadKind) -> Result<(), String> {
    match sheet.header() {
        Some(header) if !header.is_empty() => Ok(()),
        _ => Err(format!(
            "The file is empty. Expected a header row with columns: {}",
            kind.expected_columns().join(", ")
        )),
    }
}

pub async fn import_appointments<B>(mut batch: B, vip: &Vip, sheet: &Sheet) -> UploadResult
where
    B: AppointmentWriter + UnitOfWork,
{
    let outcome = async {
        let mut result = UploadResult::default();
        for row in sheet.data_rows() {
            let written = match appointment_from_row(vip, &row) {
                Ok(appointment) => batch.insert_appointment(&appointment).await.map(|_| ()),
                Err(reason) => Err(WriteError::Rejected(reason)),
            };
            record(&mut result, &row, written)?;
        }
        Ok::<_, eyre::Report>(result)
    }
    .await;

    finish(batch, UploadKind::Appointments, outcome).await
}

pub async fn import_students<B>(mut batch: B, program_id: Uuid, sheet: &Sheet) -> UploadResult
where
    B: RosterWriter + UnitOfWork,
{
    let outcome = async {
        let mut result = UploadResult::default();
        for row in sheet.data_rows() {
            let written = match student_from_row(program_id, &row) {
                Ok(student) => batch.find_or_create_student(&student).await.map(|_| ()),
                Err(reason) => Err(WriteError::Rejected(reason)),
            };
            record(&mut result, &row, written)?;
        }
        Ok::<_, eyre::Report>(result)
    }
    .await;

    finish(batch, UploadKind::Students, outcome).await
}

pub async fn import_vips<B>(mut batch: B, program_id: Uuid, sheet: &Sheet) -> UploadResult
where
    B: RosterWriter + UnitOfWork,
{
    let outcome = async {
        let mut result = UploadResult::default();
        for row in sheet.data_rows() {
            let written = match vip_from_row(program_id, &row) {
                Ok(vip) => batch.find_or_create_vip(&vip).await.map(|_| ()),
                Err(reason) => Err(WriteError::Rejected(reason)),
            };
            record(&mut result, &row, written)?;
        }
        Ok::<_, eyre::Report>(result)
    }
    .await;

    finish(batch, UploadKind::Vips, outcome).await
}

fn record(result: &mut UploadResult, row: &SheetRow, written: Result<(), WriteError>) -> Result<()> {
    match written {
        Ok(()) => result.record_success(),
        Err(WriteError::Rejected(reason)) => {
            warn!("{} skipped: {}", row.describe(), reason);
            result.record_failure(format!("{}: {}", row.describe(), reason));
        }
        Err(WriteError::Fatal(e)) => return Err(e),
    }
    Ok(())
}

async fn finish<B: UnitOfWork>(batch: B, kind: UploadKind, outcome: Result<UploadResult>) -> UploadResult {
    match outcome {
        Ok(result) => match batch.commit().await {
            Ok(()) => {
                info!(
                    "{:?} upload finished: {} succeeded, {} failed",
                    kind, result.success_count, result.failure_count
                );
                result
            }
            Err(e) => UploadResult::aborted(e.to_string()),
        },
        Err(e) => {
            error!("{:?} upload aborted: {}", kind, e);
            rollback_quietly(batch).await;
            UploadResult::aborted(e.to_string())
        }
    }
}

fn required<'r>(row: &'r SheetRow, index: usize, column: &str) -> Result<&'r str, String> {
    row.cell(index).ok_or_else(|| format!("{} is required", column))
}

fn appointment_from_row(vip: &Vip, row: &SheetRow) -> Result<NewAppointment, String> {
    let start = parse_datetime(required(row, 0, "Start Time")?).map_err(|e| e.to_string())?;
    let end = parse_datetime(required(row, 1, "End Time")?).map_err(|e| e.to_string())?;

    let appointment = NewAppointment {
        program_id: vip.program_id,
        vip_id: vip.id,
        start_time: start,
        end_time: end,
    };
    appointment.validate()?;
    Ok(appointment)
}

fn student_from_row(program_id: Uuid, row: &SheetRow) -> Result<NewStudent, String> {
    let email = required(row, 0, "Email")?.to_lowercase();
    if !email.contains('@') {
        return Err(format!("'{}' is not a valid email address", email));
    }

    Ok(NewStudent {
        program_id,
        email,
        last_name: row.cell(1).map(str::to_string),
        first_name: row.cell(2).map(str::to_string),
        umid: format_umid(row.cell(3)),
    })
}

fn vip_from_row(program_id: Uuid, row: &SheetRow) -> Result<NewVip, String> {
    let name = required(row, 0, "Name")?.to_string();
    let ranking = row
        .cell(3)
        .map(|value| {
            value
                .strip_suffix(".0")
                .unwrap_or(value)
                .parse::<i32>()
                .map_err(|_| format!("Ranking '{}' is not a whole number", value))
        })
        .transpose()?;

    Ok(NewVip {
        program_id,
        name,
        profile_url: row.cell(1).map(str::to_string),
        title: row.cell(2).map(str::to_string),
        ranking,
    })
}
