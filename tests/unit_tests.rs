// Unit tests for Volunteer Match

use chrono::NaiveDate;
use volunteer_match::core::{
    affinity_noise, normalize, overlaps, score_event, urgency_weight, AssignedEvents, SkillSet,
};
use volunteer_match::models::{Event, ScoringWeights, Urgency, Volunteer};

fn create_event(id: &str, name: &str, description: &str, skills: &str, urgency: &str) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        location: "Community Center".to_string(),
        required_skills: SkillSet::parse(skills),
        urgency: Urgency::parse(urgency),
        event_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
    }
}

#[test]
fn test_normalize_trims_and_lowercases() {
    let skills = normalize(Some(" Code ; DEPLOY,,teaching "));

    assert_eq!(skills.len(), 3);
    assert!(skills.contains("code"));
    assert!(skills.contains("deploy"));
    assert!(skills.contains("teaching"));
}

#[test]
fn test_normalize_absent_or_empty() {
    assert!(normalize(None).is_empty());
    assert!(normalize(Some("")).is_empty());
    assert!(normalize(Some(" , ; ")).is_empty());
}

#[test]
fn test_normalize_deduplicates() {
    let skills = normalize(Some("Code, code, CODE"));
    assert_eq!(skills.to_vec(), vec!["code".to_string()]);
}

#[test]
fn test_overlaps_substring_either_direction() {
    assert!(overlaps(&normalize(Some("code")), &normalize(Some("coding"))));
    assert!(overlaps(&normalize(Some("first aid")), &normalize(Some("aid"))));
    assert!(!overlaps(&normalize(Some("driving")), &normalize(Some("teaching"))));
}

#[test]
fn test_overlaps_empty_sets() {
    let skills = normalize(Some("packing"));
    assert!(!overlaps(&SkillSet::default(), &skills));
    assert!(!overlaps(&skills, &SkillSet::default()));
}

#[test]
fn test_noise_reference_value() {
    // "v1" sums to 167, "e3" to 152
    assert_eq!(affinity_noise("v1", "e3", 20), 25384 % 20);
}

#[test]
fn test_noise_is_symmetric_and_bounded() {
    for (v, e) in [("v1", "e1"), ("volunteer-42", "event-7"), ("ボランティア", "e")] {
        let noise = affinity_noise(v, e, 20);
        assert!(noise < 20);
        assert_eq!(noise, affinity_noise(e, v, 20));
    }
}

#[test]
fn test_noise_disabled_with_zero_modulus() {
    assert_eq!(affinity_noise("v1", "e3", 0), 0);
}

#[test]
fn test_urgency_weights() {
    let weights = ScoringWeights::default();

    assert_eq!(urgency_weight(&Urgency::Critical, &weights), 15);
    assert_eq!(urgency_weight(&Urgency::Extreme, &weights), 15);
    assert_eq!(urgency_weight(&Urgency::High, &weights), 12);
    assert_eq!(urgency_weight(&Urgency::Medium, &weights), 8);
    assert_eq!(urgency_weight(&Urgency::Low, &weights), 5);
    assert_eq!(urgency_weight(&Urgency::Unspecified, &weights), 5);
    assert_eq!(urgency_weight(&Urgency::parse("whenever"), &weights), 5);
}

#[test]
fn test_urgency_parse_is_case_insensitive() {
    assert_eq!(Urgency::parse("HIGH"), Urgency::High);
    assert_eq!(Urgency::parse(" Critical "), Urgency::Critical);
    assert_eq!(Urgency::parse(""), Urgency::Unspecified);
    assert_eq!(Urgency::parse("Soon"), Urgency::Other("Soon".to_string()));
}

#[test]
fn test_score_coding_volunteer_on_coding_event() {
    let volunteer = Volunteer::new("v1", "Volunteer Name", "deploy, code");
    let event = create_event("e3", "Code Workshop", "Teaching coding to kids", "code, teaching", "low");

    let breakdown = score_event(&volunteer, &event, false, &ScoringWeights::default());

    assert_eq!(breakdown.domain_affinity, 70);
    assert_eq!(breakdown.skill_overlap, 0);
    assert_eq!(breakdown.noise, 4);
    assert_eq!(breakdown.total(), 79);
}

#[test]
fn test_score_prior_assignment_clamps_to_100() {
    let volunteer = Volunteer::new("v3", "Mike Johnson", "packing, driving");
    let event = create_event("e1", "Blood Drive", "Saving lives", "packing, assisting", "high");

    let breakdown = score_event(&volunteer, &event, true, &ScoringWeights::default());

    assert_eq!(breakdown.prior_assignment, 90);
    assert_eq!(breakdown.skill_overlap, 60);
    assert_eq!(breakdown.total(), 100);
}

#[test]
fn test_score_without_skills_is_noise_plus_urgency() {
    let volunteer = Volunteer::new("v9", "No Skills", "");
    let event = create_event("e1", "Blood Drive", "Saving lives", "packing", "medium");

    let breakdown = score_event(&volunteer, &event, false, &ScoringWeights::default());

    assert_eq!(breakdown.domain_affinity + breakdown.skill_overlap, 0);
    assert_eq!(u32::from(breakdown.total()), breakdown.noise + 8);
}

#[test]
fn test_coding_keyword_needs_coding_volunteer() {
    let volunteer = Volunteer::new("v2", "Jane Smith", "design");
    let event = create_event("e5", "Hackathon", "Build things", "programming", "low");

    let breakdown = score_event(&volunteer, &event, false, &ScoringWeights::default());

    assert_eq!(breakdown.domain_affinity, 0);
    assert_eq!(breakdown.skill_overlap, 0);
}

#[test]
fn test_assigned_events_index() {
    let mut assigned = AssignedEvents::new();
    assert!(assigned.is_empty());

    assigned.insert("v1", "e1");
    assigned.insert("v1", "e1");
    assigned.insert("v2", "e3");

    assert!(assigned.contains("v1", "e1"));
    assert!(!assigned.contains("v1", "e3"));
    assert!(assigned.contains("v2", "e3"));
    assert_eq!(assigned.len(), 2);
}

#[test]
fn test_oversized_weights_clamp_to_100() {
    let weights = ScoringWeights {
        prior_assignment: u32::MAX,
        urgency_default: u32::MAX,
        ..ScoringWeights::default()
    };
    let volunteer = Volunteer::new("v1", "Volunteer Name", "deploy, code");
    let event = create_event("e1", "Blood Drive", "Saving lives", "packing", "low");

    let breakdown = score_event(&volunteer, &event, true, &weights);

    assert_eq!(breakdown.prior_assignment, u32::MAX);
    assert_eq!(breakdown.total(), 100);
}

#[test]
fn test_coding_volunteer_outscores_driver_on_code_workshop() {
    let coder = Volunteer::new("v1", "Volunteer Name", "code, deploy");
    let driver = Volunteer::new("v4", "Sam Driver", "driving");
    let workshop = create_event("e3", "Code Workshop", "Teaching coding to kids", "code, teaching", "low");
    let weights = ScoringWeights::default();

    let coder_score = score_event(&coder, &workshop, false, &weights).total();
    let driver_score = score_event(&driver, &workshop, false, &weights).total();

    assert_eq!(coder_score, 79);
    assert!(coder_score > driver_score);
    // Noise and urgency alone stay below any skill bonus
    assert!(driver_score < 25);
}
