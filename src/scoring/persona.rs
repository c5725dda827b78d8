//! Seeker persona classification.
//!
//! The persona biases the scoring prompt: an opportunity seeker wants growth
//! and compensation weighted up, a fit seeker wants alignment and balance.

use crate::model::SeekerProfile;

const OPPORTUNITY_PRIORITIES: [&str; 3] = [
    "Company Reputation",
    "Higher Compensation",
    "Clear Promotion Pathways",
];

const SENIOR_POSITIONS: [&str; 3] = ["Director", "VP", "C-level"];
const MID_POSITIONS: [&str; 2] = ["Manager", "Senior Manager"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Opportunity,
    Fit,
    Neutral,
}

impl Persona {
    /// Label used verbatim in the scoring prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Opportunity => "Good Opportunity Seeker",
            Persona::Fit => "Good Fit Seeker",
            Persona::Neutral => "Neutral Seeker",
        }
    }
}

/// Classifies a profile into a [`Persona`].
///
/// Opportunity wins on any opportunity-flavored career priority, a senior
/// profile chasing top-band salary, or a significant position jump
/// (Manager-level aiming at Director or above). Fit wins on work-life
/// balance, combined industry+functional fit, or the absence of any
/// opportunity signal without relocation intent.
pub fn classify(profile: &SeekerProfile) -> Persona {
    let priorities = &profile.career_priorities;

    let has_opportunity_priority = OPPORTUNITY_PRIORITIES
        .iter()
        .any(|p| priorities.iter().any(|c| c == p));

    let senior_with_high_salary =
        profile.seniority == "Senior" && profile.expected_salary.as_deref() == Some("Highest");

    let significant_position_jump = match (&profile.current_position, &profile.expected_position) {
        (Some(current), Some(expected)) => {
            SENIOR_POSITIONS.iter().any(|p| p == expected)
                && MID_POSITIONS.iter().any(|p| p == current)
        }
        _ => false,
    };

    if has_opportunity_priority || senior_with_high_salary || significant_position_jump {
        return Persona::Opportunity;
    }

    let wants_balance = priorities.iter().any(|c| c == "Work-Life Balance");
    let wants_both_fits = priorities.iter().any(|c| c == "Industry Fit")
        && priorities.iter().any(|c| c == "Functional Fit");

    if wants_balance || wants_both_fits || (!has_opportunity_priority && !profile.open_to_relocate)
    {
        return Persona::Fit;
    }

    Persona::Neutral
}
