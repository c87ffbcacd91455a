//! HTML and plain-text bodies for a tracked resume e-mail.

use crate::preview::render::escape_html;

pub struct TrackingLinks {
    pub pixel_url: String,
    pub download_url: String,
}

impl TrackingLinks {
    pub fn new(tracking_url: &str, tracking_id: &str) -> Self {
        let base = tracking_url.trim().trim_end_matches('/');
        Self {
            pixel_url: format!("{base}/open/{tracking_id}"),
            download_url: format!("{base}/download/{tracking_id}"),
        }
    }
}

pub struct EmailBody<'a> {
    pub recipient_name: Option<&'a str>,
    pub sender_name: &'a str,
    pub message: &'a str,
    pub links: &'a TrackingLinks,
}

fn greeting(recipient_name: Option<&str>) -> String {
    match recipient_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Dear {name},"),
        None => "Hello,".to_string(),
    }
}

/// User text is escaped and its newlines become `<br>`.
fn message_html(message: &str) -> String {
    message
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn render_html(body: &EmailBody<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Helvetica, Arial, sans-serif; color: #1f2937; line-height: 1.5;">
<p>{greeting}</p>
<p>{message}</p>
<p>Please find my resume attached. You can also <a href="{download}">download it here</a>.</p>
<p>Best regards,<br>{sender}</p>
<img src="{pixel}" width="1" height="1" alt="" style="display:block;border:0;" />
</body>
</html>
"#,
        greeting = escape_html(&greeting(body.recipient_name)),
        message = message_html(body.message),
        download = escape_html(&body.links.download_url),
        sender = escape_html(body.sender_name),
        pixel = escape_html(&body.links.pixel_url),
    )
}

pub fn render_text(body: &EmailBody<'_>) -> String {
    format!(
        "{}\n\n{}\n\nPlease find my resume attached. You can also download it here: {}\n\nBest regards,\n{}\n",
        greeting(body.recipient_name),
        body.message.trim(),
        body.links.download_url,
        body.sender_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> TrackingLinks {
        TrackingLinks::new("https://track.example.com/", "abc-123")
    }

    #[test]
    fn test_tracking_links() {
        let links = links();
        assert_eq!(links.pixel_url, "https://track.example.com/open/abc-123");
        assert_eq!(
            links.download_url,
            "https://track.example.com/download/abc-123"
        );
    }

    #[test]
    fn test_html_escapes_message_and_keeps_line_breaks() {
        let links = links();
        let html = render_html(&EmailBody {
            recipient_name: Some("Grace"),
            sender_name: "Ada",
            message: "Line <one>\nLine & two",
            links: &links,
        });
        assert!(html.contains("Dear Grace,"));
        assert!(html.contains("Line &lt;one&gt;<br>Line &amp; two"));
        assert!(html.contains(r#"<img src="https://track.example.com/open/abc-123""#));
        assert!(html.contains(r#"href="https://track.example.com/download/abc-123""#));
    }

    #[test]
    fn test_text_fallback() {
        let links = links();
        let text = render_text(&EmailBody {
            recipient_name: None,
            sender_name: "Ada",
            message: "I am applying.",
            links: &links,
        });
        assert!(text.starts_with("Hello,\n\nI am applying."));
        assert!(text.contains("https://track.example.com/download/abc-123"));
        assert!(text.ends_with("Ada\n"));
    }
}
