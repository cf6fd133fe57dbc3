use herald_common::types::{HomeworkStatus, WorkItemRecord};

/// Human-readable verdict for a review status. Total over all statuses.
pub fn verdict(status: &HomeworkStatus) -> String {
    match status {
        HomeworkStatus::Approved => "reviewed, no issues".to_string(),
        HomeworkStatus::Reviewing => "under review".to_string(),
        HomeworkStatus::Rejected => "reviewed, issues found".to_string(),
        HomeworkStatus::Unknown(raw) => format!("unrecognized status \"{}\"", raw),
    }
}

/// Notification text for a record whose status just changed.
pub fn format(record: &WorkItemRecord) -> String {
    format!(
        "Changed status of \"{}\": {}",
        record.name,
        verdict(&record.status)
    )
}
