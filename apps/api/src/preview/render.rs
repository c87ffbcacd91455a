//! Renders a composed preview as a standalone HTML document.

use std::fmt::Write;

use crate::models::resume::ResumeData;
use crate::preview::compose::{Layout, Preview};

/// Escapes the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// "2020-01 – Present" style range. Blank ends are dropped.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { "Present" } else { end.trim() };
    match (start.trim(), end) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} – {e}"),
    }
}

pub fn render_html(preview: &Preview) -> String {
    let c = &preview.colors;
    let grid = match preview.template.layout {
        Layout::SingleColumn => "1fr",
        Layout::TwoColumn => "2fr 1fr",
        Layout::Sidebar => "1fr 2fr",
    };

    let (main, side) = sections(&preview.data);
    let body = match preview.template.layout {
        Layout::SingleColumn => format!("<main>{main}{side}</main>"),
        Layout::TwoColumn => format!("<main>{main}</main><aside>{side}</aside>"),
        Layout::Sidebar => format!("<aside>{side}</aside><main>{main}</main>"),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: Helvetica, Arial, sans-serif; color: {text}; background: {background}; }}
header {{ background: {primary}; color: #ffffff; padding: 24px 32px; }}
header h1 {{ margin: 0; font-size: 28px; }}
header p {{ margin: 4px 0 0; }}
.content {{ display: grid; grid-template-columns: {grid}; gap: 24px; padding: 24px 32px; }}
h2 {{ color: {secondary}; border-bottom: 2px solid {accent}; padding-bottom: 4px; font-size: 16px; text-transform: uppercase; }}
.entry {{ margin-bottom: 12px; }}
.meta {{ color: {secondary}; font-size: 13px; }}
.tags span {{ display: inline-block; background: {accent}; color: {text}; border-radius: 4px; padding: 2px 8px; margin: 2px; font-size: 13px; }}
</style>
</head>
<body class="template-{template_id}">
{header}
<div class="content">{body}</div>
</body>
</html>
"#,
        title = escape_html(&preview.data.personal_info.full_name),
        text = c.text,
        background = c.background,
        primary = c.primary,
        secondary = c.secondary,
        accent = c.accent,
        template_id = preview.template.id,
        header = header(&preview.data),
    )
}

fn header(data: &ResumeData) -> String {
    let p = &data.personal_info;
    let contact: Vec<String> = [&p.email, &p.phone, &p.location, &p.website, &p.linkedin]
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| escape_html(v))
        .collect();

    format!(
        "<header><h1>{}</h1><p>{}</p><p>{}</p></header>",
        escape_html(&p.full_name),
        escape_html(&p.title),
        contact.join(" · ")
    )
}

/// Returns (main column, side column) markup.
fn sections(data: &ResumeData) -> (String, String) {
    let mut main = String::new();
    let mut side = String::new();

    let _ = write!(
        main,
        "<section><h2>Summary</h2><p>{}</p></section>",
        escape_html(&data.personal_info.summary)
    );

    main.push_str("<section><h2>Experience</h2>");
    for e in &data.experience {
        let _ = write!(
            main,
            "<div class=\"entry\"><strong>{}</strong> — {}<div class=\"meta\">{} {}</div><p>{}</p>",
            escape_html(&e.position),
            escape_html(&e.company),
            escape_html(&date_range(&e.start_date, &e.end_date, e.current)),
            escape_html(&e.location),
            escape_html(&e.description)
        );
        if !e.achievements.is_empty() {
            main.push_str("<ul>");
            for a in &e.achievements {
                let _ = write!(main, "<li>{}</li>", escape_html(a));
            }
            main.push_str("</ul>");
        }
        main.push_str("</div>");
    }
    main.push_str("</section>");

    main.push_str("<section><h2>Education</h2>");
    for e in &data.education {
        let _ = write!(
            main,
            "<div class=\"entry\"><strong>{}</strong>, {}<div class=\"meta\">{} {}</div></div>",
            escape_html(&e.degree),
            escape_html(&e.field),
            escape_html(&e.institution),
            escape_html(&date_range(&e.start_date, &e.end_date, false))
        );
    }
    main.push_str("</section>");

    main.push_str("<section><h2>Projects</h2>");
    for p in &data.projects {
        let _ = write!(
            main,
            "<div class=\"entry\"><strong>{}</strong><p>{}</p><div class=\"meta\">{}</div></div>",
            escape_html(&p.name),
            escape_html(&p.description),
            escape_html(&p.technologies.join(", "))
        );
    }
    main.push_str("</section>");

    side.push_str("<section><h2>Skills</h2><div class=\"tags\">");
    for s in data.skills.names() {
        let _ = write!(side, "<span>{}</span>", escape_html(&s));
    }
    side.push_str("</div></section>");

    side.push_str("<section><h2>Certifications</h2>");
    for c in &data.certifications {
        let _ = write!(
            side,
            "<div class=\"entry\"><strong>{}</strong><div class=\"meta\">{} {}</div></div>",
            escape_html(&c.name),
            escape_html(&c.issuer),
            escape_html(&c.date)
        );
    }
    side.push_str("</section>");

    side.push_str("<section><h2>Languages</h2><ul>");
    for l in &data.languages {
        let _ = write!(
            side,
            "<li>{} — {}</li>",
            escape_html(&l.language),
            escape_html(&l.proficiency)
        );
    }
    side.push_str("</ul></section>");

    side.push_str("<section><h2>Interests</h2><div class=\"tags\">");
    for i in &data.interests {
        let _ = write!(side, "<span>{}</span>", escape_html(i));
    }
    side.push_str("</div></section>");

    side.push_str("<section><h2>References</h2>");
    for r in &data.references {
        let _ = write!(
            side,
            "<div class=\"entry\"><strong>{}</strong><div class=\"meta\">{}</div></div>",
            escape_html(&r.name),
            escape_html(
                &[r.position.as_str(), r.company.as_str(), r.email.as_str()]
                    .into_iter()
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        );
    }
    side.push_str("</section>");

    (main, side)
}
