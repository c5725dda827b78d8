//! Scoring prompt construction.
//!
//! The response template is a contract with `parser`: section headers here
//! must match the headers the parser looks for.

use super::persona::Persona;
use crate::model::{Posting, SeekerProfile};

pub const SYSTEM_INSTRUCTIONS: &str = "You are a professional career advisor. You analyze how well a job posting \
     matches a candidate profile and respond strictly in the requested format.";

/// Builds the per-posting scoring prompt.
pub fn build_prompt(posting: &Posting, profile: &SeekerProfile, persona: Persona) -> String {
    let description = posting
        .full_description
        .as_deref()
        .or(posting.description.as_deref())
        .unwrap_or("Not provided");

    format!(
        "Analyze the match between the candidate's profile and this job position.\n\
         \n\
         User Type: {persona}\n\
         \n\
         Job Details:\n\
         - Title: {title}\n\
         - Company: {company}\n\
         - Location: {location}\n\
         - Description: {description}\n\
         \n\
         Candidate Profile:\n\
         - Skills: {skills}\n\
         - Location: {city}\n\
         - Seniority Level: {seniority}\n\
         - Open to Relocation: {relocate}\n\
         - Career Priorities: {priorities}\n\
         - Expected Position: {expected_position}\n\
         - Current Position: {current_position}\n\
         \n\
         Provide a match score between 0 and 100, three highlight points, a one \
         sentence list summary formatted as \"[Company Info] seeking [Position] in \
         [City]\", a detailed summary, and a matching analysis. Consider location \
         compatibility and highlight any significant location differences.\n\
         \n\
         Format your response as:\n\
         Score: [number]\n\
         \n\
         Highlights:\n\
         \u{2022} [point 1]\n\
         \u{2022} [point 2]\n\
         \u{2022} [point 3]\n\
         \n\
         List Summary:\n\
         [1 sentence summary]\n\
         \n\
         Detailed Summary:\n\
         Who we are:\n\
         [paragraph]\n\
         \n\
         Who we are looking for:\n\
         [paragraph]\n\
         \n\
         Benefits and Offerings:\n\
         [paragraph]\n\
         \n\
         Analysis:\n\
         [1-2 paragraphs assessing overall match quality]",
        persona = persona.label(),
        title = posting.title,
        company = posting.company,
        location = posting.location,
        description = description,
        skills = join_or(&profile.skills, "Not specified"),
        city = profile.city,
        seniority = profile.seniority,
        relocate = if profile.open_to_relocate { "Yes" } else { "No" },
        priorities = join_or(&profile.career_priorities, "Not specified"),
        expected_position = profile.expected_position.as_deref().unwrap_or("Not specified"),
        current_position = profile.current_position.as_deref().unwrap_or("Not specified"),
    )
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
