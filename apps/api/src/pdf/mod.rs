//! Resume PDF generation on the builtin Helvetica fonts (A4, flowing pages).
//!
//! Works from the raw resume: sections the user left empty are skipped rather
//! than filled with preview placeholders.

use bytes::Bytes;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeData;
use crate::preview::render::date_range;

pub mod metrics;

use metrics::{wrap_text, MM_PER_PT};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const LINE_SPACING: f32 = 1.3;

const NAME_PT: f32 = 22.0;
const HEADING_PT: f32 = 13.0;
const ENTRY_TITLE_PT: f32 = 11.0;
const BODY_PT: f32 = 10.0;
const META_PT: f32 = 9.0;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF backend error: {0}")]
    Backend(#[from] printpdf::Error),
}

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Bytes,
    pub pages: usize,
}

/// Cursor-based writer: text is placed top-down and flows onto a new page when
/// the bottom margin is reached.
struct PageWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    /// Distance of the next baseline from the bottom edge.
    cursor_mm: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, PdfError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        })
    }

    fn line_height(size_pt: f32) -> f32 {
        size_pt * MM_PER_PT * LINE_SPACING
    }

    fn ensure_space(&mut self, height_mm: f32) {
        if self.cursor_mm - height_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
            self.pages += 1;
            debug!("PDF flowed onto page {}", self.pages);
        }
    }

    fn text(&mut self, text: &str, size_pt: f32, bold: bool, indent_mm: f32) {
        let height = Self::line_height(size_pt);
        for line in wrap_text(text, size_pt, TEXT_WIDTH_MM - indent_mm, bold) {
            self.ensure_space(height);
            self.cursor_mm -= height;
            let font = if bold { &self.bold } else { &self.regular };
            self.layer.use_text(
                line,
                size_pt,
                Mm(MARGIN_MM + indent_mm),
                Mm(self.cursor_mm),
                font,
            );
        }
    }

    fn bullet(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.text(&format!("- {}", text.trim()), BODY_PT, false, 4.0);
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn heading(&mut self, title: &str) {
        // keep a heading together with at least two lines of its section
        self.ensure_space(Self::line_height(HEADING_PT) + 2.0 * Self::line_height(BODY_PT));
        self.gap(3.0);
        self.text(title, HEADING_PT, true, 0.0);
        self.gap(1.0);
    }

    fn finish(self) -> Result<RenderedPdf, PdfError> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes()?;
        Ok(RenderedPdf {
            bytes: Bytes::from(bytes),
            pages,
        })
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Builtin fonts only carry WinAnsi glyphs, so the en dash is flattened.
fn dates(start: &str, end: &str, current: bool) -> String {
    date_range(start, end, current).replace('–', "-")
}

pub fn render_resume_pdf(data: &ResumeData) -> Result<RenderedPdf, PdfError> {
    let info = &data.personal_info;
    let title = if info.full_name.trim().is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", info.full_name.trim())
    };
    let mut w = PageWriter::new(&title)?;

    w.text(&info.full_name, NAME_PT, true, 0.0);
    w.text(&info.title, ENTRY_TITLE_PT, false, 0.0);
    w.text(
        &join_non_empty(
            &[
                &info.email,
                &info.phone,
                &info.location,
                &info.website,
                &info.linkedin,
            ],
            " | ",
        ),
        META_PT,
        false,
        0.0,
    );

    if !info.summary.trim().is_empty() {
        w.heading("Summary");
        w.text(&info.summary, BODY_PT, false, 0.0);
    }

    if !data.experience.is_empty() {
        w.heading("Experience");
        for e in &data.experience {
            w.text(
                &join_non_empty(&[&e.position, &e.company], " - "),
                ENTRY_TITLE_PT,
                true,
                0.0,
            );
            w.text(
                &join_non_empty(
                    &[&dates(&e.start_date, &e.end_date, e.current), &e.location],
                    " | ",
                ),
                META_PT,
                false,
                0.0,
            );
            w.text(&e.description, BODY_PT, false, 0.0);
            for a in &e.achievements {
                w.bullet(a);
            }
            w.gap(2.0);
        }
    }

    if !data.education.is_empty() {
        w.heading("Education");
        for e in &data.education {
            w.text(
                &join_non_empty(&[&e.degree, &e.field], ", "),
                ENTRY_TITLE_PT,
                true,
                0.0,
            );
            let gpa = if e.gpa.trim().is_empty() {
                String::new()
            } else {
                format!("GPA {}", e.gpa.trim())
            };
            w.text(
                &join_non_empty(
                    &[
                        &e.institution,
                        &dates(&e.start_date, &e.end_date, false),
                        &gpa,
                    ],
                    " | ",
                ),
                META_PT,
                false,
                0.0,
            );
            w.text(&e.description, BODY_PT, false, 0.0);
            w.gap(2.0);
        }
    }

    let skills = data.skills.names();
    if !skills.is_empty() {
        w.heading("Skills");
        w.text(&skills.join(", "), BODY_PT, false, 0.0);
    }

    if !data.projects.is_empty() {
        w.heading("Projects");
        for p in &data.projects {
            w.text(&p.name, ENTRY_TITLE_PT, true, 0.0);
            w.text(
                &join_non_empty(&[&p.technologies.join(", "), &p.url], " | "),
                META_PT,
                false,
                0.0,
            );
            w.text(&p.description, BODY_PT, false, 0.0);
            w.gap(2.0);
        }
    }

    if !data.certifications.is_empty() {
        w.heading("Certifications");
        for c in &data.certifications {
            w.text(
                &join_non_empty(&[&c.name, &c.issuer, &c.date], " - "),
                BODY_PT,
                false,
                0.0,
            );
        }
    }

    if !data.languages.is_empty() {
        w.heading("Languages");
        let languages: Vec<String> = data
            .languages
            .iter()
            .filter(|l| !l.language.trim().is_empty())
            .map(|l| match l.proficiency.trim() {
                "" => l.language.trim().to_string(),
                level => format!("{} ({level})", l.language.trim()),
            })
            .collect();
        w.text(&languages.join(", "), BODY_PT, false, 0.0);
    }

    if !data.references.is_empty() {
        w.heading("References");
        for r in &data.references {
            w.text(&r.name, BODY_PT, true, 0.0);
            w.text(
                &join_non_empty(&[&r.position, &r.company, &r.email, &r.phone], " | "),
                META_PT,
                false,
                0.0,
            );
        }
    }

    if !data.interests.is_empty() {
        w.heading("Interests");
        w.text(&data.interests.join(", "), BODY_PT, false, 0.0);
    }

    w.finish()
}

/// Attachment file name derived from the candidate's name.
pub fn attachment_name(data: &ResumeData) -> String {
    let name: Vec<String> = data
        .personal_info
        .full_name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect();

    if name.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{}_Resume.pdf", name.join("_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Language, PersonalInfo, Skills};

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".into(),
                title: "Analyst".into(),
                email: "ada@example.com".into(),
                summary: "First programmer.".into(),
                ..Default::default()
            },
            experience: vec![Experience {
                id: 1,
                company: "Analytical Engines".into(),
                position: "Programmer".into(),
                start_date: "1842".into(),
                end_date: "1843".into(),
                description: "Wrote the first published algorithm.".into(),
                achievements: vec!["Computed Bernoulli numbers".into()],
                ..Default::default()
            }],
            languages: vec![Language {
                id: 2,
                language: "French".into(),
                proficiency: "Fluent".into(),
            }],
            skills: Skills::Names(vec!["Mathematics".into()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let pdf = render_resume_pdf(&sample()).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert_eq!(pdf.pages, 1);
    }

    #[test]
    fn test_empty_resume_still_renders() {
        let pdf = render_resume_pdf(&ResumeData::default()).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_resume_flows_onto_more_pages() {
        let mut data = sample();
        data.experience = (0..40)
            .map(|i| Experience {
                id: i,
                company: format!("Company {i}"),
                position: "Engineer".into(),
                description: "Designed, built and operated services. ".repeat(6),
                achievements: vec!["Shipped a feature".into(); 3],
                ..Default::default()
            })
            .collect();
        let pdf = render_resume_pdf(&data).unwrap();
        assert!(pdf.pages > 1);
    }

    #[test]
    fn test_attachment_name() {
        assert_eq!(attachment_name(&sample()), "Ada_Lovelace_Resume.pdf");
        assert_eq!(attachment_name(&ResumeData::default()), "Resume.pdf");

        let mut odd = sample();
        odd.personal_info.full_name = " Jean-Luc  O'Brien/ ".into();
        assert_eq!(attachment_name(&odd), "Jean-Luc_OBrien_Resume.pdf");
    }
}
