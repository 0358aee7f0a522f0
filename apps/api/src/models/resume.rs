use serde::{Deserialize, Serialize};

/// The complete user-entered resume.
///
/// Field names are the storage format: a stored value is exactly the JSON
/// serialization of this struct under a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

/// A labelled, non-empty contact field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactItem<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

impl EducationEntry {
    /// `"{degree}, {institution}, {year}"`, the single-line form used by both renderers.
    pub fn summary_line(&self) -> String {
        format!("{}, {}, {}", self.degree, self.institution, self.year)
    }
}

impl ExperienceEntry {
    /// A blank entry carrying one blank bullet, as appended by the form.
    pub fn blank() -> Self {
        Self {
            bullets: vec![String::new()],
            ..Default::default()
        }
    }
}

impl ResumeRecord {
    /// Contact fields in display order, skipping empty ones.
    pub fn contact_items(&self) -> Vec<ContactItem<'_>> {
        [
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("GitHub", self.github.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| ContactItem { label, value })
        .collect()
    }

    /// Total number of list items (education + skills + experience + bullets).
    pub fn item_count(&self) -> usize {
        self.education.len()
            + self.skills.len()
            + self.experience.len()
            + self.experience.iter().map(|e| e.bullets.len()).sum::<usize>()
    }

    /// The record shown when nothing has been saved yet.
    pub fn sample() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            github: "github.com/johndoe".to_string(),
            linkedin: "linkedin.com/in/johndoe".to_string(),
            education: vec![
                EducationEntry {
                    degree: "B.S. in Computer Science".to_string(),
                    institution: "University of Example".to_string(),
                    year: "2018-2022".to_string(),
                },
                EducationEntry {
                    degree: "High School Diploma".to_string(),
                    institution: "Example High School".to_string(),
                    year: "2014-2018".to_string(),
                },
            ],
            skills: ["JavaScript", "React", "Node.js", "Python", "SQL", "Git"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            experience: vec![
                ExperienceEntry {
                    company: "Tech Company Inc.".to_string(),
                    position: "Software Developer".to_string(),
                    duration: "June 2022 - Present".to_string(),
                    bullets: vec![
                        "Developed and maintained web applications using React and Node.js"
                            .to_string(),
                        "Collaborated with cross-functional teams to deliver high-quality software products"
                            .to_string(),
                        "Implemented new features and optimized existing codebase for better performance"
                            .to_string(),
                    ],
                },
                ExperienceEntry {
                    company: "Startup XYZ".to_string(),
                    position: "Intern".to_string(),
                    duration: "Summer 2021".to_string(),
                    bullets: vec![
                        "Assisted in the development of a mobile app using React Native".to_string(),
                        "Participated in code reviews and contributed to improving coding standards"
                            .to_string(),
                        "Gained hands-on experience with agile development methodologies"
                            .to_string(),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names_match_storage_format() {
        let value = serde_json::to_value(ResumeRecord::sample()).unwrap();
        for key in [
            "name",
            "email",
            "phone",
            "github",
            "linkedin",
            "education",
            "skills",
            "experience",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["education"][0]["degree"], "B.S. in Computer Science");
        assert_eq!(value["experience"][1]["bullets"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_round_trip_reproduces_record() {
        let record = ResumeRecord::sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: ResumeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: ResumeRecord = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(record.name, "Ada");
        assert!(record.email.is_empty());
        assert!(record.education.is_empty());
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_contact_items_skip_empty_fields() {
        let record = ResumeRecord {
            email: "a@b.io".to_string(),
            linkedin: "linkedin.com/in/a".to_string(),
            ..Default::default()
        };
        let items = record.contact_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Email");
        assert_eq!(items[1].label, "LinkedIn");
    }

    #[test]
    fn test_item_count_sample() {
        // 2 education + 6 skills + 2 experience + 6 bullets
        assert_eq!(ResumeRecord::sample().item_count(), 16);
    }

    #[test]
    fn test_summary_line() {
        let edu = EducationEntry {
            degree: "BSc".to_string(),
            institution: "MIT".to_string(),
            year: "2020".to_string(),
        };
        assert_eq!(edu.summary_line(), "BSc, MIT, 2020");
    }
}
