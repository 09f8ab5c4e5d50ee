use crate::models::{Assignment, Event, HistoryRecord, Volunteer};
use std::collections::HashMap;

/// Join assignments with their volunteers and events
///
/// Produces one record per assignment, in assignment order. Assignments that
/// reference an unknown volunteer or event are skipped.
pub fn build_history(
    volunteers: &[Volunteer],
    events: &[Event],
    assignments: &[Assignment],
) -> Vec<HistoryRecord> {
    let volunteers: HashMap<&str, &Volunteer> =
        volunteers.iter().map(|v| (v.id.as_str(), v)).collect();
    let events: HashMap<&str, &Event> = events.iter().map(|e| (e.id.as_str(), e)).collect();

    assignments
        .iter()
        .filter_map(|assignment| {
            let volunteer = volunteers.get(assignment.volunteer_id.as_str())?;
            let Some(event) = events.get(assignment.event_id.as_str()) else {
                tracing::debug!(
                    "Skipping assignment {} with unknown event {}",
                    assignment.id,
                    assignment.event_id
                );
                return None;
            };

            Some(HistoryRecord {
                volunteer_id: volunteer.id.clone(),
                volunteer_name: volunteer.name.clone(),
                participation_status: assignment.status.label().to_string(),
                event_name: event.name.clone(),
                event_description: event.description.clone(),
                location: event.location.clone(),
                required_skills: event.required_skills.to_vec(),
                urgency: event.urgency.label().to_string(),
                event_date: event.event_date,
            })
        })
        .collect()
}
