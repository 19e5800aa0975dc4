use serde::{Deserialize, Serialize};

use super::appointment::AppointmentResponse;

/// One block of time on a scheduled day, as typed by an admin.
///
/// Times are kept as raw strings; they are parsed during validation so every
/// malformed entry can be reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A single slot starting at `start`
    Single { start: String },
    /// Back-to-back slots from `start` until `end`
    Range { start: String, end: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescriptor {
    pub date: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub days: Vec<DayDescriptor>,
}

/// Outcome of running the schedule creator.
///
/// `success` is true when at least one slot was created, even if some rows
/// were rejected along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub success: bool,
    pub appointments: Vec<AppointmentResponse>,
    pub errors: Vec<String>,
}

impl ScheduleResult {
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            appointments: Vec::new(),
            errors,
        }
    }
}
