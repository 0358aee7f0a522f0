//! Editable form state and the list operations behind the add/remove buttons.
//!
//! The form is stateless on the server: every POST carries the whole draft,
//! which is bound into a `ResumeForm`, mutated by one `FormAction`, and
//! rendered back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{list} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown form action: {0}")]
    UnknownAction(String),
}

/// The in-progress resume being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeForm {
    record: ResumeRecord,
}

impl Default for ResumeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeForm {
    /// Empty identity fields, one blank education entry, one blank skill and
    /// one blank experience entry with one blank bullet.
    pub fn new() -> Self {
        Self {
            record: ResumeRecord {
                education: vec![EducationEntry::default()],
                skills: vec![String::new()],
                experience: vec![ExperienceEntry::blank()],
                ..Default::default()
            },
        }
    }

    pub fn from_record(record: ResumeRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    pub fn into_record(self) -> ResumeRecord {
        self.record
    }

    pub fn add_education(&mut self) {
        self.record.education.push(EducationEntry::default());
    }

    pub fn remove_education(&mut self, index: usize) -> Result<EducationEntry, FormError> {
        remove_at(&mut self.record.education, index, "education")
    }

    pub fn add_skill(&mut self) {
        self.record.skills.push(String::new());
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<String, FormError> {
        remove_at(&mut self.record.skills, index, "skills")
    }

    pub fn add_experience(&mut self) {
        self.record.experience.push(ExperienceEntry::blank());
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<ExperienceEntry, FormError> {
        remove_at(&mut self.record.experience, index, "experience")
    }

    /// Appends a blank bullet to the experience entry at `index`, in place.
    pub fn add_bullet(&mut self, index: usize) -> Result<(), FormError> {
        let len = self.record.experience.len();
        let entry = self
            .record
            .experience
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange {
                list: "experience",
                index,
                len,
            })?;
        entry.bullets.push(String::new());
        Ok(())
    }

    pub fn remove_bullet(&mut self, index: usize, bullet: usize) -> Result<String, FormError> {
        let len = self.record.experience.len();
        let entry = self
            .record
            .experience
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange {
                list: "experience",
                index,
                len,
            })?;
        remove_at(&mut entry.bullets, bullet, "bullets")
    }
}

fn remove_at<T>(list: &mut Vec<T>, index: usize, name: &'static str) -> Result<T, FormError> {
    if index >= list.len() {
        return Err(FormError::IndexOutOfRange {
            list: name,
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

// ────────────────────────────────────────────────────────────────────────────
// Form actions
// ────────────────────────────────────────────────────────────────────────────

/// The value of the `action` button that submitted the form.
///
/// Wire format: `submit`, `add_education`, `remove_education:<i>`, `add_skill`,
/// `remove_skill:<i>`, `add_experience`, `remove_experience:<i>`,
/// `add_bullet:<i>`, `remove_bullet:<i>:<j>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    AddEducation,
    RemoveEducation(usize),
    AddSkill,
    RemoveSkill(usize),
    AddExperience,
    RemoveExperience(usize),
    AddBullet(usize),
    RemoveBullet(usize, usize),
}

impl FormAction {
    /// Applies a list action to the form. `Submit` is a no-op here; the
    /// caller validates and persists instead.
    pub fn apply(self, form: &mut ResumeForm) -> Result<(), FormError> {
        match self {
            FormAction::Submit => {}
            FormAction::AddEducation => form.add_education(),
            FormAction::RemoveEducation(i) => {
                form.remove_education(i)?;
            }
            FormAction::AddSkill => form.add_skill(),
            FormAction::RemoveSkill(i) => {
                form.remove_skill(i)?;
            }
            FormAction::AddExperience => form.add_experience(),
            FormAction::RemoveExperience(i) => {
                form.remove_experience(i)?;
            }
            FormAction::AddBullet(i) => form.add_bullet(i)?,
            FormAction::RemoveBullet(i, j) => {
                form.remove_bullet(i, j)?;
            }
        }
        Ok(())
    }
}

impl FromStr for FormAction {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FormError::UnknownAction(s.to_string());
        let mut parts = s.trim().split(':');
        let verb = parts.next().ok_or_else(unknown)?;
        let args = parts
            .map(|p| p.parse::<usize>().map_err(|_| unknown()))
            .collect::<Result<Vec<_>, _>>()?;

        let action = match (verb, args.as_slice()) {
            ("submit", []) => FormAction::Submit,
            ("add_education", []) => FormAction::AddEducation,
            ("remove_education", [i]) => FormAction::RemoveEducation(*i),
            ("add_skill", []) => FormAction::AddSkill,
            ("remove_skill", [i]) => FormAction::RemoveSkill(*i),
            ("add_experience", []) => FormAction::AddExperience,
            ("remove_experience", [i]) => FormAction::RemoveExperience(*i),
            ("add_bullet", [i]) => FormAction::AddBullet(*i),
            ("remove_bullet", [i, j]) => FormAction::RemoveBullet(*i, *j),
            _ => return Err(unknown()),
        };
        Ok(action)
    }
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormAction::Submit => write!(f, "submit"),
            FormAction::AddEducation => write!(f, "add_education"),
            FormAction::RemoveEducation(i) => write!(f, "remove_education:{i}"),
            FormAction::AddSkill => write!(f, "add_skill"),
            FormAction::RemoveSkill(i) => write!(f, "remove_skill:{i}"),
            FormAction::AddExperience => write!(f, "add_experience"),
            FormAction::RemoveExperience(i) => write!(f, "remove_experience:{i}"),
            FormAction::AddBullet(i) => write!(f, "add_bullet:{i}"),
            FormAction::RemoveBullet(i, j) => write!(f, "remove_bullet:{i}:{j}"),
        }
    }
}
