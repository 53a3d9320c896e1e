//! Server-rendered HTML for the desk
//!
//! Pages are assembled with `format!`; every piece of user-provided text goes
//! through `html_escape` and every file name in a URL through `urlencoding`.

mod desk;
mod preview;

pub use desk::{render_desk, DeskView};
pub use preview::{pdf_data_uri, render_pdf_preview, render_text_preview, render_word_preview};

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::workspace::{Notice, NoticeLevel};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { padding: 1.5rem 2rem 0.5rem; }
h1, h2, h3 { color: #1E88E5; }
.layout { display: flex; gap: 2rem; padding: 0 2rem 2rem; }
aside { width: 20rem; flex-shrink: 0; }
main { flex-grow: 1; }
button, .button { display: block; width: 100%; padding: 0.5rem; margin: 0.25rem 0; cursor: pointer; }
.button { text-align: center; text-decoration: none; border: 1px solid #888; color: inherit; box-sizing: border-box; }
.notice { padding: 10px; border-radius: 5px; margin: 10px 0; }
.notice-success { color: #2E7D32; background-color: #E8F5E9; }
.notice-info { background-color: #f0f7ff; border-left: 5px solid #1E88E5; }
.notice-warning { color: #E65100; background-color: #fff3e0; }
.notice-error { color: #B71C1C; background-color: #FFEBEE; }
.filters a { margin-right: 1rem; }
.filters a.active { font-weight: bold; }
details { background-color: #f5f5f5; padding: 10px; margin: 5px 0; border-radius: 4px; }
details .actions { display: flex; gap: 1rem; }
details .actions form { flex: 1; }
.pdf-viewer { width: 100%; height: 800px; border: none; }
.footer { margin-top: 50px; text-align: center; color: #888; }
"#;

/// Wrap a body in the shared page chrome
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
{body}
<div class="footer">DocDesk v{version}</div>
</body>
</html>
"#,
        title = encode_text(title),
        style = STYLE,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Warning => "notice notice-warning",
        NoticeLevel::Error => "notice notice-error",
    }
}

fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            format!(
                "<div class=\"{}\">{}</div>\n",
                notice_class(n.level),
                encode_text(&n.message)
            )
        })
        .collect()
}

/// Base URL of one session's desk
fn desk_url(session_id: &str) -> String {
    format!("/w/{}", urlencoding::encode(session_id))
}

/// Base URL of one entry's actions
fn file_url(session_id: &str, name: &str) -> String {
    format!("{}/files/{}", desk_url(session_id), urlencoding::encode(name))
}

fn attr(value: &str) -> std::borrow::Cow<'_, str> {
    encode_double_quoted_attribute(value)
}
