//! Server-side HTML for the two pages.
//!
//! Templates are compiled into the binary and autoescaped (names end in
//! `.html`). The form template never builds field names itself: every input
//! arrives as an `InputView` carrying its dotted path, value and error.

use serde::Serialize;
use tera::{Context, Tera};

use crate::form::draft::{FormAction, ResumeForm};
use crate::form::fields::{EducationField, ExperienceField, FieldPath};
use crate::form::validation::ValidationErrors;
use crate::models::resume::ResumeRecord;

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const FORM_TEMPLATE: &str = include_str!("../../templates/form.html");
const RESUME_TEMPLATE: &str = include_str!("../../templates/resume.html");

/// Where the rendered record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Stored,
    Sample,
}

// ────────────────────────────────────────────────────────────────────────────
// View models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct InputView {
    name: String,
    label: &'static str,
    placeholder: String,
    input_type: &'static str,
    value: String,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct EducationView {
    inputs: Vec<InputView>,
    remove_action: String,
}

#[derive(Debug, Serialize)]
struct SkillView {
    input: InputView,
    remove_action: String,
}

#[derive(Debug, Serialize)]
struct BulletView {
    input: InputView,
    remove_action: String,
}

#[derive(Debug, Serialize)]
struct ExperienceView {
    inputs: Vec<InputView>,
    bullets: Vec<BulletView>,
    add_bullet_action: String,
    remove_action: String,
}

struct InputBuilder<'a> {
    errors: Option<&'a ValidationErrors>,
}

impl InputBuilder<'_> {
    fn input(&self, path: FieldPath, label: &'static str, value: &str) -> InputView {
        let name = path.to_string();
        let error = self
            .errors
            .and_then(|e| e.message_for(&name))
            .map(str::to_string);
        let input_type = match path {
            FieldPath::Email => "email",
            FieldPath::Phone => "tel",
            _ => "text",
        };
        InputView {
            name,
            label,
            placeholder: label.to_string(),
            input_type,
            value: value.to_string(),
            error,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// The compiled page templates, shared through `AppState`.
pub struct Templates {
    tera: Tera,
    pdf_filename: String,
}

impl Templates {
    pub fn new(pdf_filename: &str) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("form.html", FORM_TEMPLATE),
            ("resume.html", RESUME_TEMPLATE),
        ])?;
        Ok(Self {
            tera,
            pdf_filename: pdf_filename.to_string(),
        })
    }

    /// The Form Collector page, with inline messages when `errors` is given.
    pub fn render_form(
        &self,
        form: &ResumeForm,
        errors: Option<&ValidationErrors>,
    ) -> Result<String, tera::Error> {
        let record = form.record();
        let b = InputBuilder { errors };

        let personal = vec![
            b.input(FieldPath::Name, "Name", &record.name),
            b.input(FieldPath::Email, "Email", &record.email),
            b.input(FieldPath::Phone, "Phone", &record.phone),
            b.input(FieldPath::Github, "GitHub", &record.github),
            b.input(FieldPath::Linkedin, "LinkedIn", &record.linkedin),
        ];

        let education: Vec<EducationView> = record
            .education
            .iter()
            .enumerate()
            .map(|(i, edu)| EducationView {
                inputs: vec![
                    b.input(
                        FieldPath::Education(i, EducationField::Degree),
                        "Degree",
                        &edu.degree,
                    ),
                    b.input(
                        FieldPath::Education(i, EducationField::Institution),
                        "Institution",
                        &edu.institution,
                    ),
                    b.input(
                        FieldPath::Education(i, EducationField::Year),
                        "Year",
                        &edu.year,
                    ),
                ],
                remove_action: FormAction::RemoveEducation(i).to_string(),
            })
            .collect();

        let skills: Vec<SkillView> = record
            .skills
            .iter()
            .enumerate()
            .map(|(i, skill)| SkillView {
                input: b.input(FieldPath::Skill(i), "Skill", skill),
                remove_action: FormAction::RemoveSkill(i).to_string(),
            })
            .collect();

        let experience: Vec<ExperienceView> = record
            .experience
            .iter()
            .enumerate()
            .map(|(i, exp)| ExperienceView {
                inputs: vec![
                    b.input(
                        FieldPath::Experience(i, ExperienceField::Company),
                        "Company",
                        &exp.company,
                    ),
                    b.input(
                        FieldPath::Experience(i, ExperienceField::Position),
                        "Position",
                        &exp.position,
                    ),
                    b.input(
                        FieldPath::Experience(i, ExperienceField::Duration),
                        "Duration",
                        &exp.duration,
                    ),
                ],
                bullets: exp
                    .bullets
                    .iter()
                    .enumerate()
                    .map(|(j, bullet)| {
                        let mut input = b.input(FieldPath::Bullet(i, j), "Bullet point", bullet);
                        input.placeholder = format!("Bullet point {}", j + 1);
                        BulletView {
                            input,
                            remove_action: FormAction::RemoveBullet(i, j).to_string(),
                        }
                    })
                    .collect(),
                add_bullet_action: FormAction::AddBullet(i).to_string(),
                remove_action: FormAction::RemoveExperience(i).to_string(),
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("personal", &personal);
        ctx.insert("education", &education);
        ctx.insert("skills", &skills);
        ctx.insert("experience", &experience);
        ctx.insert("error_count", &errors.map_or(0, ValidationErrors::len));
        self.tera.render("form.html", &ctx)
    }

    /// The Resume Renderer page.
    pub fn render_resume(
        &self,
        record: &ResumeRecord,
        source: RecordSource,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("resume", record);
        ctx.insert("contacts", &record.contact_items());
        ctx.insert("is_sample", &(source == RecordSource::Sample));
        ctx.insert("pdf_filename", &self.pdf_filename);
        self.tera.render("resume.html", &ctx)
    }
}
