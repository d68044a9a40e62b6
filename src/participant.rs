//! Survey participant: background, experience counters and closing feedback
//!
//! Only the record itself lives here. Identity codes and persistence belong to
//! the survey application.

use crate::analyzer::ExperienceProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Self-reported gender, stored as a numeric code in survey data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    #[default]
    NotSpecified,
    Female,
    Male,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::NotSpecified, Gender::Female, Gender::Male, Gender::Other];

    pub fn code(self) -> u8 {
        match self {
            Gender::NotSpecified => 0,
            Gender::Female => 1,
            Gender::Male => 2,
            Gender::Other => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::NotSpecified => "keine Angabe",
            Gender::Female => "weiblich",
            Gender::Male => "männlich",
            Gender::Other => "divers",
        }
    }
}

/// Highest completed education
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Education {
    NoDegree,
    Hauptschule,
    SecondarySchool,
    Abitur,
    Bachelor,
    Master,
}

impl Education {
    pub const ALL: [Education; 6] = [
        Education::NoDegree,
        Education::Hauptschule,
        Education::SecondarySchool,
        Education::Abitur,
        Education::Bachelor,
        Education::Master,
    ];

    pub fn code(self) -> u8 {
        match self {
            Education::NoDegree => 0,
            Education::Hauptschule => 1,
            Education::SecondarySchool => 2,
            Education::Abitur => 3,
            Education::Bachelor => 4,
            Education::Master => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Education::NoDegree => "Kein Abschluss",
            Education::Hauptschule => "Hauptschule",
            Education::SecondarySchool => "Weiterführende Schule",
            Education::Abitur => "Abitur",
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
        }
    }
}

/// One survey participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Age bracket as offered by the survey form, e.g. "25-34"
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub experience: ExperienceProfile,
    /// Free-text feedback from the closing step; empty until submitted
    #[serde(default)]
    pub feedback: String,
}

impl Participant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_education(mut self, education: Education) -> Self {
        self.education = Some(education);
        self
    }

    pub fn with_experience(mut self, experience: ExperienceProfile) -> Self {
        self.experience = experience;
        self
    }

    /// Record the closing feedback. Surrounding whitespace is dropped; a later
    /// submission replaces an earlier one.
    pub fn submit_feedback(&mut self, feedback: &str) {
        self.feedback = feedback.trim().to_string();
    }

    pub fn has_feedback(&self) -> bool {
        !self.feedback.is_empty()
    }

    pub fn experience_score(&self) -> i64 {
        self.experience.score()
    }

    /// Read a participant record from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read participant file: {}", path.display()))?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        serde_json::from_str(content)
            .with_context(|| format!("Invalid participant record: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Participant {
        let mut participant = Participant::new()
            .with_age_group("25-34")
            .with_gender(Gender::Female)
            .with_education(Education::Bachelor)
            .with_experience(ExperienceProfile {
                online_orders: Some(3),
                reviews_read: Some(0),
                product_reviews: Some(2),
                book_reviews: Some(7),
                trip_reviews: Some(5),
                series_reviews: Some(1),
                food_reviews: None,
                self_rated_expertise: None,
            });
        participant.submit_feedback("  Die Statistik beim Schreiben war hilfreich.\n");
        participant
    }

    #[test]
    fn codes_roundtrip() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_code(gender.code()), Some(gender));
        }
        for education in Education::ALL {
            assert_eq!(Education::from_code(education.code()), Some(education));
        }
        assert_eq!(Gender::from_code(4), None);
        assert_eq!(Education::from_code(6), None);
        assert_eq!(Education::SecondarySchool.label(), "Weiterführende Schule");
    }

    #[test]
    fn new_participant_has_no_feedback() {
        let participant = Participant::new();
        assert_eq!(participant.gender, Gender::NotSpecified);
        assert_eq!(participant.education, None);
        assert!(!participant.has_feedback());
        assert_eq!(participant.experience_score(), 0);
    }

    #[test]
    fn feedback_is_trimmed_and_replaced() {
        let mut participant = sample();
        assert_eq!(participant.feedback, "Die Statistik beim Schreiben war hilfreich.");
        participant.submit_feedback("Zu viele Seiten.");
        assert_eq!(participant.feedback, "Zu viele Seiten.");
        participant.submit_feedback("   ");
        assert!(!participant.has_feedback());
    }

    #[test]
    fn score_comes_from_experience_profile() {
        // book reviews are recorded but not scored
        assert_eq!(sample().experience_score(), 11);
    }

    #[test]
    fn json_roundtrip() {
        let participant = sample();
        let json = serde_json::to_value(&participant).unwrap();
        assert_eq!(json["ageGroup"], "25-34");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["education"], "bachelor");
        assert_eq!(json["experience"]["bookReviews"], 7);
        assert_eq!(json["feedback"], "Die Statistik beim Schreiben war hilfreich.");

        let back: Participant = serde_json::from_value(json).unwrap();
        assert_eq!(back, participant);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let participant: Participant = serde_json::from_str("{}").unwrap();
        assert_eq!(participant, Participant::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(serde_json::to_string(&sample()).unwrap().as_bytes()).unwrap();
        file.flush().unwrap();
        assert_eq!(Participant::load(file.path()).unwrap(), sample());
    }

    #[test]
    fn load_invalid_file_is_error() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{ "gender": "unknown" }"#).unwrap();
        file.flush().unwrap();
        let err = Participant::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid participant record"));
    }
}
