use crate::ApplicationRecord;

/// Aggregate counters shown above the application list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsightCounters {
    pub all: usize,
    pub shortlisted: usize,
    pub rejected: usize,
    /// Counts both `interview_scheduled` and `interview_pending`; they share a label.
    pub interview_scheduled: usize,
}

impl InsightCounters {
    pub fn tally(applications: &[ApplicationRecord]) -> Self {
        let mut totals = Self {
            all: applications.len(),
            ..Self::default()
        };
        for application in applications {
            match application.status.to_lowercase().as_str() {
                "shortlisted" => totals.shortlisted += 1,
                "rejected" => totals.rejected += 1,
                "interview_scheduled" | "interview_pending" => totals.interview_scheduled += 1,
                _ => {}
            }
        }
        totals
    }
}
