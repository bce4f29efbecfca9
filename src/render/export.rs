//! PDF export backend.
//!
//! Serializes a [`PaginatedDoc`] into real selectable-text PDF pages. Text
//! is set in the base-14 faces with WinAnsi encoding, so the output embeds
//! no font programs and needs no network or filesystem access. The backend
//! draws exactly what pagination placed; all layout decisions were made
//! upstream.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::errors::ExportError;
use crate::layout::font_metrics::FontFamily;
use crate::layout::paginate::{PaginatedDoc, Rect, Span};

/// Fraction of the line height from the top edge down to the baseline.
const BASELINE: f32 = 0.78;

fn font_resource_name(font: FontFamily, bold: bool, italic: bool) -> &'static str {
    match (font, bold, italic) {
        (FontFamily::Helvetica, false, false) => "F1",
        (FontFamily::Helvetica, true, _) => "F2",
        (FontFamily::Helvetica, false, true) => "F3",
        (FontFamily::TimesRoman, false, false) => "F4",
        (FontFamily::TimesRoman, true, _) => "F5",
        (FontFamily::TimesRoman, false, true) => "F6",
    }
}

/// Maps a char to its WinAnsi byte. The handful of typographic characters
/// the layout produces have dedicated code points; anything unmappable
/// degrades to `?` rather than corrupting the string.
fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{2019}' => 0x92,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{b7}' => 0xB7,
        '\u{bb}' => 0xBB,
        _ => {
            let code = c as u32;
            if (0x20..0x7F).contains(&code) || (0xA0..0x100).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        }
    }
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn push_fill_color(ops: &mut Vec<Operation>, color: crate::layout::color::Rgb) {
    let (r, g, b) = color.unit();
    ops.push(Operation::new(
        "rg",
        vec![r.into(), g.into(), b.into()],
    ));
}

fn push_rect(ops: &mut Vec<Operation>, rect: &Rect, page_h: f32) {
    push_fill_color(ops, rect.color);
    // Top-down y to PDF's bottom-up space.
    let y = page_h - rect.y - rect.h;
    ops.push(Operation::new(
        "re",
        vec![rect.x.into(), y.into(), rect.w.into(), rect.h.into()],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn push_span(ops: &mut Vec<Operation>, span: &Span, baseline_pdf_y: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            Object::Name(font_resource_name(span.font, span.bold, span.italic).into()),
            span.size.into(),
        ],
    ));
    push_fill_color(ops, span.color);
    ops.push(Operation::new(
        "Td",
        vec![span.x.into(), baseline_pdf_y.into()],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(&span.text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn page_content(doc: &PaginatedDoc, page_idx: usize) -> Content {
    let page = &doc.pages[page_idx];
    let h = doc.page_height;
    let mut ops = Vec::new();
    for fill in &page.fills {
        push_rect(&mut ops, fill, h);
    }
    for region in &page.regions {
        for line in &region.lines {
            if let Some(marker) = &line.marker {
                push_rect(&mut ops, marker, h);
            }
            if let Some(rule) = &line.rule {
                push_rect(&mut ops, rule, h);
            }
            let baseline = h - (line.y + line.height * BASELINE);
            for span in &line.spans {
                push_span(&mut ops, span, baseline);
            }
        }
    }
    Content { operations: ops }
}

fn add_base_font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Serializes the placed pages into PDF bytes.
pub fn render_pdf(layout: &PaginatedDoc) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = dictionary! {
        "F1" => add_base_font(&mut doc, "Helvetica"),
        "F2" => add_base_font(&mut doc, "Helvetica-Bold"),
        "F3" => add_base_font(&mut doc, "Helvetica-Oblique"),
        "F4" => add_base_font(&mut doc, "Times-Roman"),
        "F5" => add_base_font(&mut doc, "Times-Bold"),
        "F6" => add_base_font(&mut doc, "Times-Italic"),
    };
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page_idx in 0..layout.pages.len() {
        let content = page_content(layout, page_idx);
        let stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                layout.page_width.into(),
                layout.page_height.into(),
            ],
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}
