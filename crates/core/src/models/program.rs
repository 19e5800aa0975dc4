use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visit program run by a department.
///
/// `held_on_dates` is the allow-list of calendar dates the program takes
/// place on. An empty list places no restriction on scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    /// Length of a generated appointment slot, in minutes
    pub default_appointment_length: i32,
    #[serde(default)]
    pub held_on_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.default_appointment_length))
    }

    pub fn is_held_on(&self, date: NaiveDate) -> bool {
        self.held_on_dates.is_empty() || self.held_on_dates.contains(&date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProgramRequest {
    pub name: String,
    pub default_appointment_length: i32,
    #[serde(default)]
    pub held_on_dates: Vec<NaiveDate>,
}
