//! Dotted field paths (`education.0.degree`, `experience.1.bullets.0`) and
//! binding of submitted `(path, value)` pairs into a `ResumeForm`.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::form::draft::ResumeForm;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeRecord};

/// Upper bound on any list index accepted from a submitted field name.
/// Paths with a larger index do not parse, so `bind` ignores them.
pub const MAX_LIST_ITEMS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Position,
    Duration,
}

/// Address of a single editable value inside a `ResumeRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Name,
    Email,
    Phone,
    Github,
    Linkedin,
    Education(usize, EducationField),
    Skill(usize),
    Experience(usize, ExperienceField),
    Bullet(usize, usize),
}

impl EducationField {
    fn as_str(self) -> &'static str {
        match self {
            EducationField::Degree => "degree",
            EducationField::Institution => "institution",
            EducationField::Year => "year",
        }
    }
}

impl ExperienceField {
    fn as_str(self) -> &'static str {
        match self {
            ExperienceField::Company => "company",
            ExperienceField::Position => "position",
            ExperienceField::Duration => "duration",
        }
    }
}

impl FromStr for FieldPath {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let index = |seg: &str| match seg.parse::<usize>() {
            Ok(i) if i < MAX_LIST_ITEMS => Ok(i),
            _ => Err(()),
        };

        let path = match segments.as_slice() {
            ["name"] => FieldPath::Name,
            ["email"] => FieldPath::Email,
            ["phone"] => FieldPath::Phone,
            ["github"] => FieldPath::Github,
            ["linkedin"] => FieldPath::Linkedin,
            ["education", i, field] => {
                let field = match *field {
                    "degree" => EducationField::Degree,
                    "institution" => EducationField::Institution,
                    "year" => EducationField::Year,
                    _ => return Err(()),
                };
                FieldPath::Education(index(*i)?, field)
            }
            ["skills", i] => FieldPath::Skill(index(*i)?),
            ["experience", i, "bullets", j] => FieldPath::Bullet(index(*i)?, index(*j)?),
            ["experience", i, field] => {
                let field = match *field {
                    "company" => ExperienceField::Company,
                    "position" => ExperienceField::Position,
                    "duration" => ExperienceField::Duration,
                    _ => return Err(()),
                };
                FieldPath::Experience(index(*i)?, field)
            }
            _ => return Err(()),
        };
        Ok(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => write!(f, "name"),
            FieldPath::Email => write!(f, "email"),
            FieldPath::Phone => write!(f, "phone"),
            FieldPath::Github => write!(f, "github"),
            FieldPath::Linkedin => write!(f, "linkedin"),
            FieldPath::Education(i, field) => write!(f, "education.{i}.{}", field.as_str()),
            FieldPath::Skill(i) => write!(f, "skills.{i}"),
            FieldPath::Experience(i, field) => write!(f, "experience.{i}.{}", field.as_str()),
            FieldPath::Bullet(i, j) => write!(f, "experience.{i}.bullets.{j}"),
        }
    }
}

impl FieldPath {
    /// Returns a mutable slot for this path, growing lists as needed.
    fn slot_mut(self, record: &mut ResumeRecord) -> &mut String {
        match self {
            FieldPath::Name => &mut record.name,
            FieldPath::Email => &mut record.email,
            FieldPath::Phone => &mut record.phone,
            FieldPath::Github => &mut record.github,
            FieldPath::Linkedin => &mut record.linkedin,
            FieldPath::Education(i, field) => {
                let entry = grow_to(&mut record.education, i, EducationEntry::default);
                match field {
                    EducationField::Degree => &mut entry.degree,
                    EducationField::Institution => &mut entry.institution,
                    EducationField::Year => &mut entry.year,
                }
            }
            FieldPath::Skill(i) => grow_to(&mut record.skills, i, String::new),
            FieldPath::Experience(i, field) => {
                let entry = grow_to(&mut record.experience, i, ExperienceEntry::default);
                match field {
                    ExperienceField::Company => &mut entry.company,
                    ExperienceField::Position => &mut entry.position,
                    ExperienceField::Duration => &mut entry.duration,
                }
            }
            FieldPath::Bullet(i, j) => {
                let entry = grow_to(&mut record.experience, i, ExperienceEntry::default);
                grow_to(&mut entry.bullets, j, String::new)
            }
        }
    }
}

/// `index` is always below `MAX_LIST_ITEMS`.
fn grow_to<T>(list: &mut Vec<T>, index: usize, fill: impl FnMut() -> T) -> &mut T {
    if list.len() <= index {
        list.resize_with(index.saturating_add(1), fill);
    }
    &mut list[index]
}

/// Builds a form from submitted pairs.
///
/// Lists contain exactly the items whose fields were submitted (grown to the
/// highest index seen). Keys that are not field paths, such as `action`, are
/// skipped.
pub fn bind(pairs: &[(String, String)]) -> ResumeForm {
    let mut record = ResumeRecord::default();
    for (key, value) in pairs {
        match key.parse::<FieldPath>() {
            Ok(path) => *path.slot_mut(&mut record) = value.clone(),
            Err(()) => debug!(key = %key, "Ignoring unknown form field"),
        }
    }
    ResumeForm::from_record(record)
}
