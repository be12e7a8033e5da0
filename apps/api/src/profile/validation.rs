//! Profile input validation.
//!
//! This is where physiological inputs are checked, so the nutrition calculator can
//! stay a total function: a stored profile always has finite, positive height and weight.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const GENDERS: &[&str] = &["male", "female", "other"];
pub const LEVELS_OF_PLAY: &[&str] = &["recreational", "intermediate", "advanced", "elite"];

const MIN_AGE: i32 = 1;
const MAX_AGE: i32 = 120;

/// Full set of writable profile fields (create body, and the merged result of a patch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub sport: String,
    pub position: Option<String>,
    pub level_of_play: String,
    pub preferred_match_time: String,
    pub hydration_habits: String,
    pub diet_type: Option<String>,
    pub mental_tendencies: String,
    pub performs_best_when: String,
}

/// Checks every field and reports all problems in one validation error.
pub fn validate_profile(input: &ProfileInput) -> Result<(), AppError> {
    let mut problems = Vec::new();

    for (field, value) in [
        ("name", &input.name),
        ("sport", &input.sport),
        ("preferred_match_time", &input.preferred_match_time),
        ("hydration_habits", &input.hydration_habits),
        ("mental_tendencies", &input.mental_tendencies),
        ("performs_best_when", &input.performs_best_when),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("{field} cannot be empty"));
        }
    }

    for (field, value) in [("height_cm", input.height_cm), ("weight_kg", input.weight_kg)] {
        if !value.is_finite() || value <= 0.0 {
            problems.push(format!("{field} must be a positive number"));
        }
    }

    if let Some(age) = input.age {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            problems.push(format!("age must be between {MIN_AGE} and {MAX_AGE}"));
        }
    }

    if let Some(gender) = input.gender.as_deref() {
        if !is_one_of(gender, GENDERS) {
            problems.push(format!("gender must be one of: {}", GENDERS.join(", ")));
        }
    }

    if !is_one_of(&input.level_of_play, LEVELS_OF_PLAY) {
        problems.push(format!(
            "level_of_play must be one of: {}",
            LEVELS_OF_PLAY.join(", ")
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    let value = value.trim();
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProfileInput {
        ProfileInput {
            name: "Ana".to_string(),
            height_cm: 170.0,
            weight_kg: 62.5,
            age: Some(24),
            gender: Some("Female".to_string()),
            sport: "Tennis".to_string(),
            position: None,
            level_of_play: "Advanced".to_string(),
            preferred_match_time: "morning".to_string(),
            hydration_habits: "2L a day, heavy sweater".to_string(),
            diet_type: None,
            mental_tendencies: "Overthinks early points".to_string(),
            performs_best_when: "Loose and aggressive".to_string(),
        }
    }

    fn validation_message(input: &ProfileInput) -> String {
        match validate_profile(input) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_profile(&valid_input()).is_ok());
    }

    #[test]
    fn test_non_positive_weight_is_rejected() {
        for weight in [0.0, -70.0, f64::NAN, f64::INFINITY] {
            let input = ProfileInput {
                weight_kg: weight,
                ..valid_input()
            };
            assert!(validation_message(&input).contains("weight_kg"));
        }
    }

    #[test]
    fn test_all_problems_are_reported_together() {
        let input = ProfileInput {
            name: "  ".to_string(),
            height_cm: 0.0,
            age: Some(0),
            level_of_play: "pro".to_string(),
            ..valid_input()
        };
        let msg = validation_message(&input);
        assert!(msg.contains("name cannot be empty"));
        assert!(msg.contains("height_cm"));
        assert!(msg.contains("age must be between"));
        assert!(msg.contains("level_of_play"));
    }

    #[test]
    fn test_gender_is_optional_but_closed() {
        let no_gender = ProfileInput {
            gender: None,
            ..valid_input()
        };
        assert!(validate_profile(&no_gender).is_ok());

        let unknown = ProfileInput {
            gender: Some("robot".to_string()),
            ..valid_input()
        };
        assert!(validation_message(&unknown).contains("gender"));
    }
}
