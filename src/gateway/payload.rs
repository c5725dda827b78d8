//! Inbound wire types.

use serde::Deserialize;

use crate::model::{SearchQuery, SeekerProfile};

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    15
}

/// Body of `POST /v1/jobs/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub job_title: String,
    pub city: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub seniority: String,
    #[serde(default)]
    pub open_to_relocate: bool,
    #[serde(default)]
    pub career_priorities: Vec<String>,
    #[serde(default)]
    pub expected_salary: Option<String>,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub expected_position: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl SearchRequest {
    /// Validates the request. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.job_title.trim().is_empty() {
            return Err("jobTitle must not be empty".to_string());
        }
        if self.city.trim().is_empty() {
            return Err("city must not be empty".to_string());
        }
        if self.page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if self.limit == 0 {
            return Err("limit must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            title: self.job_title.trim().to_string(),
            location: self.city.trim().to_string(),
            skills: self.skills.clone(),
            seniority: self.seniority.clone(),
            open_to_relocate: self.open_to_relocate,
            career_priorities: self.career_priorities.clone(),
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn to_profile(&self) -> SeekerProfile {
        SeekerProfile {
            skills: self.skills.clone(),
            city: self.city.trim().to_string(),
            seniority: self.seniority.clone(),
            open_to_relocate: self.open_to_relocate,
            career_priorities: self.career_priorities.clone(),
            expected_salary: self.expected_salary.clone(),
            current_position: self.current_position.clone(),
            expected_position: self.expected_position.clone(),
        }
    }
}

/// Body of `POST /v1/jobs/invalidate`.
///
/// Sent when search preferences change; only the cache-key fields matter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateRequest {
    pub job_title: String,
    pub city: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl InvalidateRequest {
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            title: self.job_title.trim().to_string(),
            location: self.city.trim().to_string(),
            skills: self.skills.clone(),
            seniority: String::new(),
            open_to_relocate: false,
            career_priorities: Vec::new(),
            page: 1,
            limit: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"jobTitle": "Software Engineer", "city": "Melbourne"}"#,
        )
        .expect("minimal request parses");

        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 15);
        assert!(request.skills.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_title() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"jobTitle": "  ", "city": "Melbourne"}"#).expect("parses");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"jobTitle": "Engineer", "city": "Melbourne", "limit": 0}"#,
        )
        .expect("parses");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalidate_key_matches_search_key() {
        let search: SearchRequest = serde_json::from_str(
            r#"{"jobTitle": "Engineer", "city": "Melbourne", "skills": ["Rust"], "page": 3}"#,
        )
        .expect("parses");
        let invalidate: InvalidateRequest = serde_json::from_str(
            r#"{"jobTitle": "Engineer", "city": "Melbourne", "skills": ["Rust"]}"#,
        )
        .expect("parses");

        // Pagination must not affect the cache key.
        assert_eq!(
            search.to_query().cache_key(),
            invalidate.to_query().cache_key()
        );
    }
}
