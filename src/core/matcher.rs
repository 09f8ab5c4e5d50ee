use crate::core::scoring::{score_event, shared_skills};
use crate::models::{Assignment, AssignmentStatus, Event, MatchResult, ScoringWeights, Volunteer};
use std::collections::{HashMap, HashSet};

/// Index of recorded (volunteer, event) pairs
///
/// Built from the assignment store before matching so the matcher itself
/// never reads shared state.
#[derive(Debug, Clone, Default)]
pub struct AssignedEvents {
    by_volunteer: HashMap<String, HashSet<String>>,
}

impl AssignedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancelled assignments are left out of the index
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut index = Self::new();
        for assignment in assignments {
            if assignment.status == AssignmentStatus::Cancelled {
                continue;
            }
            index.insert(assignment.volunteer_id.clone(), assignment.event_id.clone());
        }
        index
    }

    pub fn insert(&mut self, volunteer_id: impl Into<String>, event_id: impl Into<String>) {
        self.by_volunteer
            .entry(volunteer_id.into())
            .or_default()
            .insert(event_id.into());
    }

    pub fn contains(&self, volunteer_id: &str, event_id: &str) -> bool {
        self.by_volunteer
            .get(volunteer_id)
            .is_some_and(|events| events.contains(event_id))
    }

    /// Number of distinct (volunteer, event) pairs
    pub fn len(&self) -> usize {
        self.by_volunteer.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_volunteer.is_empty()
    }
}

/// Volunteer-to-event matching engine
///
/// Scores every event for a volunteer and ranks them. No event is filtered
/// out: a low score is a display concern for the caller.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank `events` for `volunteer`
    ///
    /// # Arguments
    /// * `volunteer` - The volunteer being matched
    /// * `events` - Every candidate event
    /// * `assigned` - Recorded assignments, used for the prior-assignment bonus
    ///
    /// # Returns
    /// One result per event, sorted by descending score. Equal scores keep
    /// their input order.
    pub fn match_events(
        &self,
        volunteer: &Volunteer,
        events: &[Event],
        assigned: &AssignedEvents,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = events
            .iter()
            .map(|event| {
                let already_assigned = assigned.contains(&volunteer.id, &event.id);
                let breakdown = score_event(volunteer, event, already_assigned, &self.weights);

                MatchResult {
                    event: event.clone(),
                    score: breakdown.total(),
                    breakdown,
                    matched_skills: shared_skills(volunteer, event),
                }
            })
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.score.cmp(&a.score));

        results
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skills::SkillSet;
    use crate::models::Urgency;
    use chrono::NaiveDate;

    fn create_event(id: &str, name: &str, skills: &str, urgency: &str) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            location: "Community Center".to_string(),
            required_skills: SkillSet::parse(skills),
            urgency: Urgency::parse(urgency),
            event_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        }
    }

    fn zero_noise_weights() -> ScoringWeights {
        ScoringWeights {
            noise_modulus: 0,
            ..ScoringWeights::default()
        }
    }

    #[test]
    fn test_empty_events() {
        let matcher = Matcher::with_default_weights();
        let volunteer = Volunteer::new("v1", "Volunteer", "code");

        let result = matcher.match_events(&volunteer, &[], &AssignedEvents::new());

        assert!(result.is_empty());
    }

    #[test]
    fn test_one_result_per_event() {
        let matcher = Matcher::with_default_weights();
        let volunteer = Volunteer::new("v3", "Mike Johnson", "packing, driving");
        let events = vec![
            create_event("e1", "Blood Drive", "packing, assisting", "high"),
            create_event("e2", "Donation", "sorting", "medium"),
            create_event("e3", "Gardening", "", "whenever"),
        ];

        let result = matcher.match_events(&volunteer, &events, &AssignedEvents::new());

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].event.id, "e1");
        assert_eq!(result[0].matched_skills, vec!["packing"]);
        for m in &result {
            assert!(m.score <= 100);
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_scores() {
        let matcher = Matcher::new(zero_noise_weights());
        let volunteer = Volunteer::new("v2", "Jane Smith", "");
        let events: Vec<Event> = (0..6)
            .map(|i| create_event(&format!("e{}", i), "Same", "packing", "low"))
            .collect();

        let result = matcher.match_events(&volunteer, &events, &AssignedEvents::new());

        let ids: Vec<&str> = result.iter().map(|m| m.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e0", "e1", "e2", "e3", "e4", "e5"]);
    }

    #[test]
    fn test_assigned_event_floats_to_top() {
        let matcher = Matcher::with_default_weights();
        let volunteer = Volunteer::new("v1", "Volunteer", "packing");
        let events = vec![
            create_event("e1", "Blood Drive", "packing", "critical"),
            create_event("e2", "Donation", "unrelated", "low"),
        ];
        let mut assigned = AssignedEvents::new();
        assigned.insert("v1", "e2");

        let result = matcher.match_events(&volunteer, &events, &assigned);

        assert_eq!(result[0].event.id, "e2");
        assert!(result[0].score >= 95);
        assert_eq!(result[0].breakdown.prior_assignment, 90);
    }

    #[test]
    fn test_assigned_events_index() {
        let assignments = vec![Assignment::new("v1", "e1"), Assignment::new("v2", "e1")];
        let index = AssignedEvents::from_assignments(&assignments);

        assert_eq!(index.len(), 2);
        assert!(index.contains("v1", "e1"));
        assert!(!index.contains("v1", "e2"));
    }

    #[test]
    fn test_cancelled_assignment_earns_no_bonus() {
        let matcher = Matcher::with_default_weights();
        let volunteer = Volunteer::new("v1", "Volunteer", "deploy, code");
        let events = vec![create_event("e1", "Blood Drive", "packing", "low")];

        let mut cancelled = Assignment::new("v1", "e1");
        cancelled.status = AssignmentStatus::Cancelled;
        let mut completed = Assignment::new("v1", "e2");
        completed.status = AssignmentStatus::Completed;
        let index = AssignedEvents::from_assignments(&[cancelled, completed]);

        assert!(!index.contains("v1", "e1"));
        assert!(index.contains("v1", "e2"));

        let result = matcher.match_events(&volunteer, &events, &index);
        assert_eq!(result[0].breakdown.prior_assignment, 0);
        assert_eq!(result[0].score, 15);
    }
}
