//! Single-page contract PDF: Helvetica 12pt, one text line per input line,
//! starting at (50, 800) on an A4 page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const ORIGIN_X: i64 = 50;
const ORIGIN_Y: i64 = 800;
const FONT_SIZE: i64 = 12;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Renders on the blocking pool.
pub async fn render_contract_pdf(text: String) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || render_pdf(&text))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

/// Helvetica is a standard Type1 font with single-byte encoding; characters
/// outside ASCII are replaced.
fn pdf_line(line: &str) -> Vec<u8> {
    line.trim()
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

pub fn render_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![Object::Real(14.4)]),
        Operation::new("Td", vec![ORIGIN_X.into(), ORIGIN_Y.into()]),
    ];
    for line in text.trim().split('\n') {
        operations.push(Operation::new("Tj", vec![Object::string_literal(pdf_line(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}
