//! PDF assembly from a laid-out document.
//!
//! Text is drawn with the standard Helvetica fonts in WinAnsi encoding, so no
//! font program is embedded and the output stays a few kilobytes.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::export::font_metrics::PdfFont;
use crate::export::layout::{DrawOp, LaidOutDocument};
use crate::export::ExportError;

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

const PRODUCER: &str = concat!("resume-builder ", env!("CARGO_PKG_VERSION"));

/// Serializes `doc` as a PDF file.
pub fn render_pdf(doc: &LaidOutDocument, info: &DocumentInfo) -> Result<Vec<u8>, ExportError> {
    if doc.pages.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let mut pdf = Pdf::new();
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = doc
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    for (font, id) in [(PdfFont::Helvetica, regular_id), (PdfFont::HelveticaBold, bold_id)] {
        pdf.type1_font(id)
            .base_font(Name(font.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let geometry = doc.geometry;
    for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let mut page_writer = pdf.page(*page_id);
        page_writer.media_box(Rect::new(0.0, 0.0, geometry.width_pt, geometry.height_pt));
        page_writer.parent(page_tree_id);
        page_writer.contents(*content_id);
        page_writer
            .resources()
            .fonts()
            .pair(Name(PdfFont::Helvetica.resource_name()), regular_id)
            .pair(Name(PdfFont::HelveticaBold.resource_name()), bold_id);
        page_writer.finish();

        let mut content = Content::new();
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    font,
                    size,
                    text,
                } => {
                    let encoded = encode_win_ansi(text);
                    content.begin_text();
                    content.set_font(Name(font.resource_name()), *size);
                    content.next_line(*x, geometry.height_pt - *y);
                    content.show(Str(encoded.as_slice()));
                    content.end_text();
                }
                DrawOp::Rule { x1, x2, y, width } => {
                    let pdf_y = geometry.height_pt - *y;
                    content.set_line_width(*width);
                    content.move_to(*x1, pdf_y);
                    content.line_to(*x2, pdf_y);
                    content.stroke();
                }
            }
        }
        pdf.stream(*content_id, &content.finish());
    }

    let mut info_writer = pdf.document_info(info_id);
    info_writer.title(TextStr(&info.title));
    if !info.author.is_empty() {
        info_writer.author(TextStr(&info.author));
    }
    info_writer.producer(TextStr(PRODUCER));
    info_writer.creation_date(pdf_date(&info.created));
    info_writer.finish();

    Ok(pdf.finish())
}

fn pdf_date(at: &DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{201e}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}
