//! Paginated PDF rendering of the audit log ("checkpoint" report)

use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, Stream,
};

use crate::{
    error::{AppError, AppResult},
    models::audit_log::AuditLogEntry,
};

pub const CONTENT_TYPE: &str = "application/pdf";
pub const FILE_NAME: &str = "audit_checkpoint.pdf";

/// A4 portrait, in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

const LEFT_MARGIN: i64 = 50;
const TOP: i64 = 800;
const BOTTOM_MARGIN: i64 = 50;
const TITLE_GAP: i64 = 40;
const LINE_STEP: i64 = 20;

const TITLE_FONT_SIZE: i64 = 16;
const BODY_FONT_SIZE: i64 = 12;

/// A line of text placed at a vertical position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub y: i64,
    pub text: String,
}

/// One laid-out page. Only the first page carries the title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub title: Option<PlacedLine>,
    pub lines: Vec<PlacedLine>,
}

/// Report line for one entry: `- 02 Jan 2024 10:00 | asset | action | description`
pub fn format_line(entry: &AuditLogEntry) -> String {
    format!(
        "- {} | {} | {} | {}",
        entry.timestamp.format("%d %b %Y %H:%M"),
        entry.asset_name.as_deref().unwrap_or("-"),
        entry.action_label(),
        entry.description
    )
}

/// Place the title and one line per entry. The cursor moves down by a fixed
/// step after each line; once it falls below the bottom margin the next line
/// starts a fresh page at the top.
pub fn layout(title: &str, lines: &[String]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page {
        title: Some(PlacedLine {
            y: TOP,
            text: title.to_string(),
        }),
        lines: Vec::new(),
    };
    let mut y = TOP - TITLE_GAP;

    for text in lines {
        current.lines.push(PlacedLine { y, text: text.clone() });
        y -= LINE_STEP;

        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut current));
            y = TOP;
        }
    }

    if current.title.is_some() || !current.lines.is_empty() {
        pages.push(current);
    }
    pages
}

/// Render entries, in the given order, as a PDF document
pub fn render(title: &str, entries: &[AuditLogEntry]) -> AppResult<Vec<u8>> {
    let lines: Vec<String> = entries.iter().map(format_line).collect();
    let pages = layout(title, &lines);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => body_font_id,
            "F2" => title_font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let mut operations = Vec::new();
        if let Some(title) = &page.title {
            push_text(&mut operations, "F2", TITLE_FONT_SIZE, title);
        }
        for line in &page.lines {
            push_text(&mut operations, "F1", BODY_FONT_SIZE, line);
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Render(format!("PDF content encoding failed: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Render(format!("PDF write failed: {}", e)))?;
    Ok(buffer)
}

fn push_text(operations: &mut Vec<Operation>, font: &str, size: i64, line: &PlacedLine) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
    operations.push(Operation::new("Td", vec![LEFT_MARGIN.into(), line.y.into()]));
    operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(&line.text))]));
    operations.push(Operation::new("ET", vec![]));
}

/// Latin-1 bytes for the standard fonts; characters outside it become `?`
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}
