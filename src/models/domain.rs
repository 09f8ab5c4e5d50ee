use crate::core::skills::SkillSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volunteer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub availability: Option<NaiveDate>,
}

impl Volunteer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, skills: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: SkillSet::parse(skills),
            preferences: None,
            address: None,
            availability: None,
        }
    }
}

/// Postal address attached to a volunteer profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// Event needing volunteers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub required_skills: SkillSet,
    #[serde(default)]
    pub urgency: Urgency,
    pub event_date: NaiveDate,
}

/// Urgency tier of an event
///
/// The set of labels is open: anything not recognized is kept verbatim in
/// `Other` and scored with the default weight.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
    Extreme,
    #[default]
    Unspecified,
    Other(String),
}

impl Urgency {
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "low" => Urgency::Low,
            "medium" => Urgency::Medium,
            "high" => Urgency::High,
            "critical" => Urgency::Critical,
            "extreme" => Urgency::Extreme,
            "" => Urgency::Unspecified,
            _ => Urgency::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
            Urgency::Extreme => "extreme",
            Urgency::Unspecified => "",
            Urgency::Other(label) => label,
        }
    }
}

impl From<String> for Urgency {
    fn from(value: String) -> Self {
        Urgency::parse(&value)
    }
}

impl From<Urgency> for String {
    fn from(value: Urgency) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle tag of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "Assigned",
            AssignmentStatus::InProgress => "In Progress",
            AssignmentStatus::Completed => "Completed",
            AssignmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Recorded pairing of a volunteer with an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub volunteer_id: String,
    pub event_id: String,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(volunteer_id: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            volunteer_id: volunteer_id.into(),
            event_id: event_id.into(),
            status: AssignmentStatus::Assigned,
            assigned_at: Utc::now(),
        }
    }
}

/// Per-component contributions to a match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub prior_assignment: u32,
    pub domain_affinity: u32,
    pub skill_overlap: u32,
    pub noise: u32,
    pub urgency: u32,
}

impl ScoreBreakdown {
    /// Sum of all components, clamped to 100
    pub fn total(&self) -> u8 {
        let sum = self
            .prior_assignment
            .saturating_add(self.domain_affinity)
            .saturating_add(self.skill_overlap)
            .saturating_add(self.noise)
            .saturating_add(self.urgency);
        sum.min(100) as u8
    }
}

/// Scored event for one volunteer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub event: Event,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
}

/// One line of a volunteer's participation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub volunteer_id: String,
    pub volunteer_name: String,
    pub participation_status: String,
    pub event_name: String,
    pub event_description: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub urgency: String,
    pub event_date: NaiveDate,
}

/// Feed entry addressed to a volunteer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recipient: recipient.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Scoring weights
///
/// Defaults are the reference bonuses: 90 for a prior assignment, 70 for
/// coding affinity, 60 for general skill overlap, noise below 20 and urgency
/// weights 15/12/8/5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub prior_assignment: u32,
    pub domain_affinity: u32,
    pub skill_overlap: u32,
    pub noise_modulus: u32,
    pub urgency_critical: u32,
    pub urgency_high: u32,
    pub urgency_medium: u32,
    pub urgency_default: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            prior_assignment: 90,
            domain_affinity: 70,
            skill_overlap: 60,
            noise_modulus: 20,
            urgency_critical: 15,
            urgency_high: 12,
            urgency_medium: 8,
            urgency_default: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_parse_is_case_insensitive() {
        assert_eq!(Urgency::parse("High"), Urgency::High);
        assert_eq!(Urgency::parse(" CRITICAL "), Urgency::Critical);
        assert_eq!(Urgency::parse("whenever"), Urgency::Other("whenever".to_string()));
        assert_eq!(Urgency::parse(""), Urgency::Unspecified);
    }

    #[test]
    fn test_event_deserializes_with_missing_urgency() {
        let json = r#"{
            "id": "e9",
            "name": "Food Bank",
            "description": "Sorting",
            "location": "Warehouse",
            "requiredSkills": "Packing; Sorting",
            "eventDate": "2025-04-01"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.urgency, Urgency::Unspecified);
        assert_eq!(event.required_skills.to_vec(), vec!["packing", "sorting"]);
    }

    #[test]
    fn test_breakdown_total_is_clamped() {
        let breakdown = ScoreBreakdown {
            prior_assignment: 90,
            domain_affinity: 70,
            skill_overlap: 0,
            noise: 19,
            urgency: 15,
        };
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_breakdown_total_saturates() {
        let breakdown = ScoreBreakdown {
            prior_assignment: u32::MAX,
            domain_affinity: 70,
            skill_overlap: 0,
            noise: 10,
            urgency: u32::MAX,
        };
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_assignment_status_wire_format() {
        let json = serde_json::to_string(&AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(AssignmentStatus::InProgress.label(), "In Progress");
    }
}
