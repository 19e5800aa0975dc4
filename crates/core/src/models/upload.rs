use serde::{Deserialize, Serialize};

/// Outcome of a spreadsheet upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<String>,
}

impl UploadResult {
    /// Result of a batch that was rolled back: nothing persisted, one error.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            errors: vec![message.into()],
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, error: String) {
        self.failure_count += 1;
        self.errors.push(error);
    }
}

/// Which entity an upload creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Appointments,
    Students,
    Vips,
}

impl UploadKind {
    pub fn expected_columns(self) -> &'static [&'static str] {
        match self {
            UploadKind::Appointments => &["Start Time", "End Time"],
            UploadKind::Students => &["Email", "Last Name", "First Name", "UMID"],
            UploadKind::Vips => &["Name", "Profile URL", "Title", "Ranking"],
        }
    }
}
