//! Volunteer Match - event matching and reporting service for volunteer coordination
//!
//! This library ranks events for a volunteer by skill overlap, prior assignment
//! and urgency, records assignments, and exports participation history as CSV
//! or as a paginated report.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{build_history, normalize, overlaps, to_csv, to_report_pages, AssignedEvents, Matcher, ReportLayout};
pub use models::{Event, HistoryRecord, MatchResult, ScoringWeights, Urgency, Volunteer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let skills = normalize(Some("Code, deploy"));
        assert!(skills.contains("code"));
        assert!(Matcher::default().weights().prior_assignment > 0);
    }
}
