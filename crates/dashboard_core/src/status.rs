//! Raw backend status strings to display labels.

/// Shown when the backend sends an empty status.
pub const STATUS_PLACEHOLDER: &str = "-";

const STATUS_LABELS: &[(&str, &str)] = &[
    ("applied", "Applied"),
    ("interview_scheduled", "Interview Scheduled"),
    ("interview_pending", "Interview Scheduled"),
    ("interview_in_progress", "Interview In Progress"),
    ("no_answer", "No Answer"),
    ("busy", "Busy"),
    ("failed", "Failed"),
    ("shortlisted", "Shortlisted"),
    ("rejected", "Rejected"),
    ("selected", "Selected"),
    ("hired", "Hired"),
];

/// Statuses that keep the refresh timer running.
const POLLING_STATUSES: &[&str] = &[
    "interview_scheduled",
    "interview_pending",
    "interview_in_progress",
];

/// Human-readable label for a raw status.
///
/// Lookup is case-insensitive. Unknown statuses are returned unchanged and an
/// empty status yields [`STATUS_PLACEHOLDER`].
pub fn format_status(raw: &str) -> &str {
    if raw.is_empty() {
        return STATUS_PLACEHOLDER;
    }
    let key = raw.to_lowercase();
    STATUS_LABELS
        .iter()
        .find(|(status, _)| *status == key)
        .map(|(_, label)| *label)
        .unwrap_or(raw)
}

/// Whether an application in this status needs the dashboard to keep polling.
pub fn needs_polling(raw: &str) -> bool {
    let key = raw.to_lowercase();
    POLLING_STATUSES.contains(&key.as_str())
}

/// Style key for a status: lowercase, restricted to `[a-z0-9_-]`.
pub fn status_slug(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}
