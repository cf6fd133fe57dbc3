use serde::{Deserialize, Serialize};

/// Review status reported by the status API for a single homework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
    /// Any status string the API sends that we have no verdict for.
    Unknown(String),
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
            HomeworkStatus::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for HomeworkStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "approved" => HomeworkStatus::Approved,
            "reviewing" => HomeworkStatus::Reviewing,
            "rejected" => HomeworkStatus::Rejected,
            other => HomeworkStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for HomeworkStatus {
    fn from(raw: String) -> Self {
        HomeworkStatus::from(raw.as_str())
    }
}

impl From<HomeworkStatus> for String {
    fn from(status: HomeworkStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `homeworks` array returned by the status API.
///
/// Upstream returns the newest entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRecord {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: HomeworkStatus,
}
