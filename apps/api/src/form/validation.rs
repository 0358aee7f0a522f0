use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::fields::{EducationField, ExperienceField, FieldPath};
use crate::models::resume::ResumeRecord;

/// A single failing field, keyed by its dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failing field of a submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

/// Validation outcome returned by the dry-run endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, path: FieldPath, message: &str) {
        self.fields.push(FieldError {
            field: path.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message for the field at `path`, if it failed.
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == path)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.fields.len())?;
        for (i, e) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{} ({})", e.message, e.field)?;
        }
        Ok(())
    }
}

impl From<Result<(), ValidationErrors>> for ValidationReport {
    fn from(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => ValidationReport {
                passed: true,
                fields: vec![],
            },
            Err(errors) => ValidationReport {
                passed: false,
                fields: errors.fields,
            },
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `local@domain` with both parts non-empty and no whitespace.
fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Required-field validation for a submitted record.
///
/// Every field except GitHub and LinkedIn is required; whitespace-only
/// values count as empty. All failures are collected, not just the first.
pub fn validate(record: &ResumeRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if is_blank(&record.name) {
        errors.push(FieldPath::Name, "Name is required");
    }
    if is_blank(&record.email) {
        errors.push(FieldPath::Email, "Email is required");
    } else if !looks_like_email(&record.email) {
        errors.push(FieldPath::Email, "Enter a valid email address");
    }
    if is_blank(&record.phone) {
        errors.push(FieldPath::Phone, "Phone is required");
    }

    for (i, edu) in record.education.iter().enumerate() {
        let checks = [
            (&edu.degree, EducationField::Degree, "Degree is required"),
            (
                &edu.institution,
                EducationField::Institution,
                "Institution is required",
            ),
            (&edu.year, EducationField::Year, "Year is required"),
        ];
        for (value, field, message) in checks {
            if is_blank(value) {
                errors.push(FieldPath::Education(i, field), message);
            }
        }
    }

    for (i, skill) in record.skills.iter().enumerate() {
        if is_blank(skill) {
            errors.push(FieldPath::Skill(i), "Skill is required");
        }
    }

    for (i, exp) in record.experience.iter().enumerate() {
        let checks = [
            (&exp.company, ExperienceField::Company, "Company is required"),
            (
                &exp.position,
                ExperienceField::Position,
                "Position is required",
            ),
            (
                &exp.duration,
                ExperienceField::Duration,
                "Duration is required",
            ),
        ];
        for (value, field, message) in checks {
            if is_blank(value) {
                errors.push(FieldPath::Experience(i, field), message);
            }
        }
        for (j, bullet) in exp.bullets.iter().enumerate() {
            if is_blank(bullet) {
                errors.push(FieldPath::Bullet(i, j), "Bullet point is required");
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
