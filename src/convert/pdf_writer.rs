//! PDF builder
//!
//! Lays out plain paragraphs as flowing text on fixed-size pages using the
//! standard Helvetica font, and serializes the result with lopdf.
//!
//! Layout is deliberately simple: one style (Helvetica 10pt on 12pt leading),
//! 1-inch margins, greedy word wrapping, a small gap between paragraphs.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use serde::Deserialize;

use super::error::{ConversionError, Result};

const MARGIN: i64 = 72;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 12;
const PARAGRAPH_SPACING: i64 = 6;

/// Helvetica advance widths (1/1000 em) for WinAnsi codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const DEFAULT_WIDTH: u16 = 556;

/// Fixed page sizes, in PDF points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    Letter,
    A4,
}

impl PageSize {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "letter" => Some(PageSize::Letter),
            "a4" => Some(PageSize::A4),
            _ => None,
        }
    }

    /// (width, height) in points
    pub fn dimensions(self) -> (i64, i64) {
        match self {
            PageSize::Letter => (612, 792),
            PageSize::A4 => (595, 842),
        }
    }
}

/// One laid-out line: baseline position and encoded text
struct PlacedLine {
    y: i64,
    text: Vec<u8>,
}

/// Build a PDF with each paragraph laid out as flowing text.
///
/// An empty paragraph list still yields a valid single-page document.
pub fn build_pdf(page_size: PageSize, paragraphs: &[String]) -> Result<Vec<u8>> {
    let (width, height) = page_size.dimensions();
    let pages = layout(paragraphs, (width - 2 * MARGIN) as f32, height);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = page_content(lines);
        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0i64.into(), 0i64.into(), width.into(), height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ConversionError::DocxToPdf(e.to_string()))?;

    tracing::debug!(
        pages = page_count,
        paragraphs = paragraphs.len(),
        size = buffer.len(),
        "Built PDF"
    );

    Ok(buffer)
}

fn page_content(lines: &[PlacedLine]) -> Content {
    let mut operations = Vec::new();
    if !lines.is_empty() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
        for line in lines {
            operations.push(Operation::new(
                "Tm",
                vec![
                    1i64.into(),
                    0i64.into(),
                    0i64.into(),
                    1i64.into(),
                    MARGIN.into(),
                    line.y.into(),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(line.text.clone(), StringFormat::Literal)],
            ));
        }
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Flow paragraphs onto pages. Always returns at least one page.
fn layout(paragraphs: &[String], max_width: f32, page_height: i64) -> Vec<Vec<PlacedLine>> {
    let top = page_height - MARGIN;
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = top;

    for paragraph in paragraphs {
        let lines = wrap_text(paragraph, max_width);
        if lines.is_empty() {
            continue;
        }
        for line in lines {
            y -= LEADING;
            if y < MARGIN {
                pages.push(Vec::new());
                y = top - LEADING;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    y,
                    text: encode_win_ansi(&line),
                });
            }
        }
        y -= PARAGRAPH_SPACING;
    }

    pages
}

/// Greedy word wrap; words wider than a line are split by character
pub(crate) fn wrap_text(text: &str, max_width: f32) -> Vec<String> {
    let space = text_width(" ");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for ch in word.chars() {
                let ch_width = char_width(ch);
                if current_width + ch_width > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rendered width of `text` in points at the body font size
pub(crate) fn text_width(text: &str) -> f32 {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> f32 {
    let code = win_ansi_byte(ch);
    let units = match code {
        32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => DEFAULT_WIDTH,
    };
    units as f32 * FONT_SIZE as f32 / 1000.0
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '\t' => b' ',
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

fn pdf_error(err: lopdf::Error) -> ConversionError {
    ConversionError::DocxToPdf(err.to_string())
}
