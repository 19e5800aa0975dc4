use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A faculty or staff member that appointment slots are booked with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vip {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub profile_url: Option<String>,
    pub ranking: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVip {
    pub program_id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub profile_url: Option<String>,
    pub ranking: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVipRequest {
    pub name: String,
    pub title: Option<String>,
    pub profile_url: Option<String>,
    pub ranking: Option<i32>,
}
