use crate::core::skills::{matching_skills, overlaps, SkillSet};
use crate::models::{Event, ScoreBreakdown, ScoringWeights, Urgency, Volunteer};

/// Volunteer skill tokens that mark a coding background
pub const CODING_SKILLS: &[&str] = &["coding", "code", "programming", "developer"];

/// Event keywords (name or description) that mark a coding event
pub const CODING_KEYWORDS: &[&str] = &["hackathon", "coding", "programming"];

/// Calculate the score breakdown of one event for one volunteer
///
/// Scoring formula:
/// score = min(100,
///     prior_assignment          # already assigned to this event
///   + (domain_affinity          # coding volunteer, coding event
///      | skill_overlap)         # otherwise, any overlapping skill
///   + noise                     # deterministic tie-break in [0, modulus)
///   + urgency                   # tier weight
/// )
pub fn score_event(
    volunteer: &Volunteer,
    event: &Event,
    already_assigned: bool,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    if already_assigned {
        breakdown.prior_assignment = weights.prior_assignment;
    }

    if has_domain_affinity(&volunteer.skills, event) {
        breakdown.domain_affinity = weights.domain_affinity;
    } else if overlaps(&volunteer.skills, &event.required_skills) {
        breakdown.skill_overlap = weights.skill_overlap;
    }

    breakdown.noise = affinity_noise(&volunteer.id, &event.id, weights.noise_modulus);
    breakdown.urgency = urgency_weight(&event.urgency, weights);

    breakdown
}

/// Skills of the volunteer that overlap the event's requirements
pub fn shared_skills(volunteer: &Volunteer, event: &Event) -> Vec<String> {
    matching_skills(&volunteer.skills, &event.required_skills)
}

/// Coding volunteer paired with an event whose text mentions coding
pub fn has_domain_affinity(skills: &SkillSet, event: &Event) -> bool {
    if !CODING_SKILLS.iter().any(|skill| skills.contains(skill)) {
        return false;
    }

    let name = event.name.to_lowercase();
    let description = event.description.to_lowercase();

    CODING_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword) || description.contains(keyword))
}

/// Deterministic tie-break value in `[0, modulus)`
///
/// Product of the UTF-16 code-unit sums of both ids, reduced by `modulus`.
/// Multiplication keeps it independent of argument order; a zero modulus
/// disables the noise.
pub fn affinity_noise(volunteer_id: &str, event_id: &str, modulus: u32) -> u32 {
    if modulus == 0 {
        return 0;
    }

    let code_sum = |id: &str| -> u64 {
        id.encode_utf16()
            .fold(0u64, |acc, unit| acc.wrapping_add(u64::from(unit)))
    };

    let product = code_sum(volunteer_id).wrapping_mul(code_sum(event_id));
    (product % u64::from(modulus)) as u32
}

/// Baseline weight for an urgency tier
#[inline]
pub fn urgency_weight(urgency: &Urgency, weights: &ScoringWeights) -> u32 {
    match urgency {
        Urgency::Critical | Urgency::Extreme => weights.urgency_critical,
        Urgency::High => weights.urgency_high,
        Urgency::Medium => weights.urgency_medium,
        Urgency::Low | Urgency::Unspecified | Urgency::Other(_) => weights.urgency_default,
    }
}
