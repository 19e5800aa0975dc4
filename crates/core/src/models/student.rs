use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width UMIDs are zero-padded to
pub const UMID_WIDTH: usize = 8;

/// A prospective student enrolled in a program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub program_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub umid: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub program_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub umid: Option<String>,
}

/// Zero-pads a numeric UMID to eight digits.
pub fn format_umid_number(umid: u64) -> String {
    format!("{:0width$}", umid, width = UMID_WIDTH)
}

/// Normalizes a UMID as entered by an admin or read from a spreadsheet.
///
/// Integer values (including spreadsheet floats such as `1234567.0`) are
/// zero-padded to eight digits. Anything else is returned trimmed but
/// otherwise unchanged. Blank input yields `None`.
pub fn format_umid(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    let integral = value.strip_suffix(".0").unwrap_or(value);
    if !integral.is_empty() && integral.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = integral.parse::<u64>() {
            return Some(format_umid_number(number));
        }
    }

    Some(value.to_string())
}
