//! Preview pages

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use html_escape::encode_text;

use super::{attr, desk_url, layout, render_notices};
use crate::workspace::Notice;

/// Embed PDF bytes as a `data:` URI
pub fn pdf_data_uri(pdf: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(pdf))
}

fn header(session_id: &str, name: &str) -> String {
    format!(
        "<header>\n<h2>{}</h2>\n<a href=\"{}\">Back to files</a>\n</header>\n",
        encode_text(name),
        attr(&desk_url(session_id))
    )
}

/// Host-native PDF display through an iframe
pub fn render_pdf_preview(session_id: &str, name: &str, pdf: &[u8]) -> String {
    let body = format!(
        "{}<main>\n<iframe src=\"{}\" class=\"pdf-viewer\"></iframe>\n</main>\n",
        header(session_id, name),
        pdf_data_uri(pdf)
    );
    layout(name, &body)
}

/// Paragraph texts of a Word document separated by dividers
pub fn render_word_preview(
    session_id: &str,
    name: &str,
    paragraphs: &[String],
    notices: &[Notice],
) -> String {
    let content = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", encode_text(p)))
        .collect::<Vec<_>>()
        .join("\n<hr>\n");

    let body = format!(
        "{}<main>\n{}{}\n</main>\n",
        header(session_id, name),
        render_notices(notices),
        content
    );
    layout(name, &body)
}

/// Extracted text of a PDF, shown verbatim
pub fn render_text_preview(session_id: &str, name: &str, text: &str, notices: &[Notice]) -> String {
    let body = format!(
        "{}<main>\n{}<pre>{}</pre>\n</main>\n",
        header(session_id, name),
        render_notices(notices),
        encode_text(text)
    );
    layout(name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::NoticeLevel;

    #[test]
    fn test_data_uri() {
        assert_eq!(pdf_data_uri(b"%PDF"), "data:application/pdf;base64,JVBERg==");
    }

    #[test]
    fn test_word_preview_dividers() {
        let paragraphs = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        let html = render_word_preview("s", "a.docx", &paragraphs, &[]);
        assert_eq!(html.matches("<hr>").count(), 2);
        assert!(html.contains("<p>Two</p>"));
    }

    #[test]
    fn test_text_preview_with_error() {
        let notices = vec![Notice {
            level: NoticeLevel::Error,
            message: "Could not extract text".to_string(),
        }];
        let html = render_text_preview("s", "a.pdf", "", &notices);
        assert!(html.contains("<pre></pre>"));
        assert!(html.contains("Could not extract text"));
    }
}
