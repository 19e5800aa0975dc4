use eyre::Result;
use tracing::{info, warn};

use crate::models::{
    appointment::NewAppointment,
    program::Program,
    schedule::{DayDescriptor, ScheduleResult},
    vip::Vip,
};
use crate::scheduling::{expand_day, validate_days, DayPlan};
use crate::store::{AppointmentWriter, UnitOfWork, WriteError};

/// Validates `days` and creates one open appointment per planned slot.
///
/// Nothing is written unless the whole request validates. Slots the store
/// rejects are reported in `errors` while the rest are still created. A fatal
/// store error rolls the batch back and becomes the only reported error.
pub async fn create_schedule<B>(
    mut batch: B,
    program: &Program,
    vip: &Vip,
    days: &[DayDescriptor],
) -> ScheduleResult
where
    B: AppointmentWriter + UnitOfWork,
{
    let plans = if vip.program_id != program.id {
        Err(vec![format!(
            "VIP '{}' does not belong to program '{}'",
            vip.name, program.name
        )])
    } else {
        validate_days(program, days)
    };

    let plans = match plans {
        Ok(plans) => plans,
        Err(errors) => {
            rollback_quietly(batch).await;
            return ScheduleResult::failed(errors);
        }
    };

    match generate(&mut batch, program, vip, &plans).await {
        Ok(result) => match batch.commit().await {
            Ok(()) => {
                info!(
                    "Created {} appointments for VIP {} ({} rejected)",
                    result.appointments.len(),
                    vip.id,
                    result.errors.len()
                );
                result
            }
            Err(e) => ScheduleResult::failed(vec![e.to_string()]),
        },
        Err(e) => {
            warn!("Schedule generation for VIP {} aborted: {}", vip.id, e);
            rollback_quietly(batch).await;
            ScheduleResult::failed(vec![e.to_string()])
        }
    }
}

async fn generate<B: AppointmentWriter>(
    batch: &mut B,
    program: &Program,
    vip: &Vip,
    plans: &[DayPlan],
) -> Result<ScheduleResult> {
    let duration = program.slot_duration();
    let mut result = ScheduleResult::default();

    for day in plans {
        for slot in expand_day(day, duration) {
            let appointment = NewAppointment {
                program_id: program.id,
                vip_id: vip.id,
                start_time: slot.start,
                end_time: slot.end,
            };
            let label = format!(
                "Slot {} {}-{}",
                slot.start.format("%Y-%m-%d"),
                slot.start.format("%H:%M"),
                slot.end.format("%H:%M")
            );

            if let Err(reason) = appointment.validate() {
                result.errors.push(format!("{}: {}", label, reason));
                continue;
            }

            match batch.insert_appointment(&appointment).await {
                Ok(created) => result.appointments.push(created.into()),
                Err(WriteError::Rejected(reason)) => {
                    warn!("{} rejected: {}", label, reason);
                    result.errors.push(format!("{}: {}", label, reason));
                }
                Err(WriteError::Fatal(e)) => return Err(e),
            }
        }
    }

    result.success = !result.appointments.is_empty();
    Ok(result)
}

pub(crate) async fn rollback_quietly<B: UnitOfWork>(batch: B) {
    if let Err(e) = batch.rollback().await {
        warn!("Rollback failed: {}", e);
    }
}
