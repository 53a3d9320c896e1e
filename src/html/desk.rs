//! The desk page: upload panel, filtered listing and batch download

use std::fmt::Write;

use html_escape::encode_text;

use super::{attr, desk_url, file_url, layout, render_notices};
use crate::workspace::{DocumentKind, EntryView, FileFilter, Notice};

const FILTERS: [FileFilter; 3] = [FileFilter::All, FileFilter::Word, FileFilter::Pdf];

/// Everything the desk page shows for one render
#[derive(Debug)]
pub struct DeskView {
    pub session_id: String,
    pub filter: FileFilter,
    pub entries: Vec<EntryView>,
    pub notices: Vec<Notice>,
    /// Size of the unfiltered workspace
    pub total: usize,
    pub has_pdf: bool,
    pub has_word: bool,
}

pub fn render_desk(view: &DeskView) -> String {
    let mut body = String::new();

    body.push_str(
        "<header>\n<h1>PDF and Word Converter</h1>\n\
         <p>Upload, convert and download multiple documents.</p>\n</header>\n",
    );
    body.push_str("<div class=\"layout\">\n");
    body.push_str(&render_sidebar(view));
    body.push_str("<main>\n");
    body.push_str(&render_notices(&view.notices));

    if view.total == 0 {
        body.push_str(
            "<div class=\"notice notice-info\">Upload one or more documents from the side \
             panel to start.</div>\n",
        );
    } else {
        body.push_str(&render_listing(view));
        body.push_str(&render_batch_download(view));
    }

    body.push_str("</main>\n</div>\n");
    layout("PDF and Word Converter", &body)
}

fn render_sidebar(view: &DeskView) -> String {
    let base = desk_url(&view.session_id);
    let mut html = String::from("<aside>\n");

    let _ = write!(
        html,
        r#"<h3>Upload files</h3>
<form method="post" action="{base}/upload" enctype="multipart/form-data">
<input type="file" name="files" accept=".pdf,.docx" multiple>
<button type="submit">Upload PDF or Word files</button>
</form>
"#,
        base = attr(&base),
    );

    if view.has_pdf {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"{}/convert?kind=pdf\">\
             <button type=\"submit\">Convert PDFs to Word</button></form>\n",
            attr(&base)
        );
    }
    if view.has_word {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"{}/convert?kind=word\">\
             <button type=\"submit\">Convert Word documents to PDF</button></form>\n",
            attr(&base)
        );
    }

    html.push_str(
        r#"<h3>About</h3>
<div class="notice notice-info">
<ul>
<li>Convert multiple PDFs to Word documents and back</li>
<li>Preview the content of your files</li>
<li>Download converted files one by one or as a batch</li>
</ul>
</div>
</aside>
"#,
    );
    html
}

fn render_listing(view: &DeskView) -> String {
    let base = desk_url(&view.session_id);
    let mut html = String::from("<h2>Files</h2>\n<div class=\"filters\">Filter by type: ");

    for filter in FILTERS {
        let _ = write!(
            html,
            "<a href=\"{}?filter={}\"{}>{}</a>",
            attr(&base),
            filter.as_param(),
            if filter == view.filter { " class=\"active\"" } else { "" },
            encode_text(filter.label()),
        );
    }
    html.push_str("</div>\n");

    if view.entries.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"notice notice-info\">No {} files available.</div>",
            encode_text(&view.filter.label().to_lowercase())
        );
        return html;
    }

    for entry in &view.entries {
        html.push_str(&render_entry(&view.session_id, entry));
    }
    html
}

fn render_entry(session_id: &str, entry: &EntryView) -> String {
    let url = file_url(session_id, &entry.name);
    let (convert_label, download_label) = match entry.kind {
        DocumentKind::Pdf => ("Convert to Word", "Download PDF"),
        DocumentKind::Word => ("Convert to PDF", "Download WORD"),
    };

    let mut html = format!(
        r#"<details>
<summary>{name} - {kind} - {size} - {created}</summary>
<div class="actions">
<form method="post" action="{url}/convert"><button type="submit">{convert_label}</button></form>
<form method="post" action="{url}/delete"><button type="submit">Delete file</button></form>
</div>
<form method="get" action="{url}/download">
<label>Download as: <input type="text" name="as" value="{name_attr}"></label>
<button type="submit">{download_label}</button>
</form>
<a class="button" href="{url}/preview">Preview</a>
"#,
        name = encode_text(&entry.name),
        kind = entry.kind.label(),
        size = encode_text(&entry.size_label),
        created = encode_text(&entry.created_at),
        url = attr(&url),
        name_attr = attr(&entry.name),
        convert_label = convert_label,
        download_label = download_label,
    );

    if entry.kind == DocumentKind::Pdf {
        let _ = writeln!(
            html,
            "<a class=\"button\" href=\"{}/text\">Text preview</a>",
            attr(&url)
        );
    }
    html.push_str("</details>\n");
    html
}

fn render_batch_download(view: &DeskView) -> String {
    let mut html = String::from("<hr>\n<h3>Batch download</h3>\n");

    if view.entries.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"notice notice-info\">No {} files to download.</div>",
            encode_text(&view.filter.label().to_lowercase())
        );
    } else {
        let _ = writeln!(
            html,
            "<a class=\"button\" href=\"{}/archive\">Download {} file(s) as {}</a>",
            attr(&desk_url(&view.session_id)),
            view.entries.len(),
            view.filter.archive_name(),
        );
    }
    html
}
