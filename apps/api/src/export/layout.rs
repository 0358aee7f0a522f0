//! Turns a `ResumeRecord` into positioned draw operations.
//!
//! Coordinates are in points with the origin at the top-left of the page and
//! `y` measured down to the text baseline; `pdf.rs` flips them into PDF space.
//! Layout is pure and deterministic, so everything the PDF shows can be
//! asserted on here without parsing PDF bytes.

use serde::{Deserialize, Serialize};

use crate::export::font_metrics::PdfFont;
use crate::models::resume::ResumeRecord;

// ────────────────────────────────────────────────────────────────────────────
// Geometry & style
// ────────────────────────────────────────────────────────────────────────────

/// Page size and margin, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    /// US letter (8.5" × 11") with a 40 pt margin.
    pub fn letter() -> Self {
        Self {
            width_pt: 612.0,
            height_pt: 792.0,
            margin_pt: 40.0,
        }
    }

    pub fn text_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Lowest baseline allowed before starting a new page.
    fn bottom(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

const NAME_SIZE: f32 = 24.0;
const NAME_ADVANCE: f32 = 30.0;
const CONTACT_SIZE: f32 = 10.0;
const CONTACT_ADVANCE: f32 = 20.0;
const TITLE_SIZE: f32 = 14.0;
const TITLE_ADVANCE: f32 = 15.0;
const RULE_ADVANCE: f32 = 15.0;
const RULE_WIDTH: f32 = 0.5;
const SECTION_GAP: f32 = 10.0;
const BODY_SIZE: f32 = 10.0;
const ENTRY_ADVANCE: f32 = 15.0;
const WRAPPED_LINE_ADVANCE: f32 = 12.0;
const BULLET_INDENT: f32 = 10.0;
const EXPERIENCE_GAP: f32 = 5.0;

/// A section title is kept together with its rule and first content line.
const TITLE_KEEP_WITH_NEXT: f32 = TITLE_ADVANCE + RULE_ADVANCE + ENTRY_ADVANCE;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: PdfFont,
        size: f32,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
impl LaidOutDocument {
    /// Every text run in drawing order, across pages.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| &p.ops).filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }

    /// All text joined with single spaces; wrapped lines read back as prose.
    pub fn plain_text(&self) -> String {
        self.texts().collect::<Vec<_>>().join(" ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct Cursor {
    geometry: PageGeometry,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage::default()],
            y: geometry.margin_pt,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.geometry.margin_pt;
    }

    /// Starts a new page unless `height` more points fit below the cursor.
    fn ensure_room(&mut self, height: f32) {
        let on_fresh_page = self.y <= self.geometry.margin_pt;
        if !on_fresh_page && self.y + height > self.geometry.bottom() {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, font: PdfFont, size: f32, text: String, advance: f32) {
        self.ensure_room(0.0);
        let y = self.y;
        self.push(DrawOp::Text {
            x,
            y,
            font,
            size,
            text,
        });
        self.y += advance;
    }

    /// Wraps `text` to `width` and draws one line per `advance`.
    fn wrapped(&mut self, x: f32, width: f32, font: PdfFont, size: f32, text: &str, advance: f32) {
        for line in font.metrics().wrap(text, width, size) {
            self.text(x, font, size, line, advance);
        }
    }

    fn rule(&mut self) {
        let margin = self.geometry.margin_pt;
        let y = self.y;
        let x2 = self.geometry.width_pt - margin;
        self.push(DrawOp::Rule {
            x1: margin,
            x2,
            y,
            width: RULE_WIDTH,
        });
        self.y += RULE_ADVANCE;
    }

    fn section(&mut self, title: &str, body: impl FnOnce(&mut Self)) {
        self.ensure_room(TITLE_KEEP_WITH_NEXT);
        let margin = self.geometry.margin_pt;
        self.text(
            margin,
            PdfFont::Helvetica,
            TITLE_SIZE,
            title.to_string(),
            TITLE_ADVANCE,
        );
        self.rule();
        body(self);
        self.y += SECTION_GAP;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the resume: name, contact line, then Education, Skills and
/// Experience. Sections with no items are omitted.
pub fn layout_resume(record: &ResumeRecord, geometry: &PageGeometry) -> LaidOutDocument {
    let mut cursor = Cursor::new(*geometry);
    let margin = geometry.margin_pt;
    let width = geometry.text_width();

    cursor.wrapped(
        margin,
        width,
        PdfFont::Helvetica,
        NAME_SIZE,
        &record.name,
        NAME_ADVANCE,
    );

    let contact = contact_line(record);
    if !contact.is_empty() {
        cursor.wrapped(
            margin,
            width,
            PdfFont::Helvetica,
            CONTACT_SIZE,
            &contact,
            CONTACT_ADVANCE,
        );
    }

    if !record.education.is_empty() {
        cursor.section("Education", |c| {
            for edu in &record.education {
                c.wrapped(
                    margin,
                    width,
                    PdfFont::Helvetica,
                    BODY_SIZE,
                    &edu.summary_line(),
                    ENTRY_ADVANCE,
                );
            }
        });
    }

    if !record.skills.is_empty() {
        cursor.section("Skills", |c| {
            c.wrapped(
                margin,
                width,
                PdfFont::Helvetica,
                BODY_SIZE,
                &record.skills.join(", "),
                WRAPPED_LINE_ADVANCE,
            );
        });
    }

    if !record.experience.is_empty() {
        cursor.section("Experience", |c| {
            for exp in &record.experience {
                c.wrapped(
                    margin,
                    width,
                    PdfFont::HelveticaBold,
                    BODY_SIZE,
                    &format!("{} - {}", exp.position, exp.company),
                    ENTRY_ADVANCE,
                );
                c.wrapped(
                    margin,
                    width,
                    PdfFont::Helvetica,
                    BODY_SIZE,
                    &exp.duration,
                    ENTRY_ADVANCE,
                );
                for bullet in &exp.bullets {
                    c.wrapped(
                        margin + BULLET_INDENT,
                        width - BULLET_INDENT,
                        PdfFont::Helvetica,
                        BODY_SIZE,
                        &format!("\u{2022} {bullet}"),
                        WRAPPED_LINE_ADVANCE,
                    );
                }
                c.y += EXPERIENCE_GAP;
            }
        });
    }

    LaidOutDocument {
        geometry: *geometry,
        pages: cursor.pages,
    }
}

/// `Email: … | Phone: … | GitHub: … | LinkedIn: …` for the non-empty fields.
pub fn contact_line(record: &ResumeRecord) -> String {
    record
        .contact_items()
        .iter()
        .map(|item| format!("{}: {}", item.label, item.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
