//! Print backend: writes laid-out pages as a PDF file.
//!
//! Pages are emitted in order, one content stream per page, using the
//! standard Helvetica faces with WinAnsi encoding so no font data needs to be
//! embedded.

use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat};
use unicode_normalization::UnicodeNormalization;

use super::options::DocumentInfo;
use crate::error::Result;
use crate::layout::{PageSize, PT_TO_MM};
use crate::model::{LayoutPage, PositionedFragment};

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

/// Baseline offset from the top of a line box, as a fraction of font size.
const ASCENT: f32 = 0.8;

/// Write pages to PDF bytes.
pub fn to_pdf(pages: &[LayoutPage], page_size: PageSize, info: &DocumentInfo) -> Result<Vec<u8>> {
    let (width_pt, height_pt) = page_size.points();
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, height_pt);
        let stream = Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        );
        let content_id = doc.add_object(stream);
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
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = info_dictionary(&mut doc, info);

    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    log::debug!("Writing PDF with {} pages", pages.len());

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_content(page: &LayoutPage, height_pt: f32) -> Content {
    let mut operations = Vec::with_capacity(page.fragments.len() * 4);
    for fragment in page.fragments.iter().filter(|f| !f.text.is_empty()) {
        operations.extend(text_operations(fragment, height_pt));
    }
    Content { operations }
}

fn text_operations(fragment: &PositionedFragment, height_pt: f32) -> [Operation; 5] {
    let font = if fragment.bold { BOLD_FONT } else { REGULAR_FONT };
    let x = fragment.x / PT_TO_MM;
    let y = height_pt - fragment.y / PT_TO_MM - fragment.font_size * ASCENT;

    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(font.to_vec()), Object::Real(fragment.font_size)],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&fragment.text),
                StringFormat::Hexadecimal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn info_dictionary(doc: &mut PdfDocument, info: &DocumentInfo) -> ObjectId {
    let mut dict = dictionary! {
        "Producer" => text_string(&info.producer),
    };
    if let Some(title) = &info.title {
        dict.set("Title", text_string(title));
    }
    if let Some(created) = info.created {
        dict.set("CreationDate", Object::string_literal(pdf_date(created)));
    }
    doc.add_object(dict)
}

fn pdf_date(date: DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Encode a PDF text string: ASCII as a literal, anything else as UTF-16BE.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Encode text for a WinAnsi simple font.
///
/// Text is NFC-normalized first. Characters outside the encoding are
/// replaced with `?`, except the sub-bullet glyph which falls back to `o`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc().filter_map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\t' => b' ',
        c if c.is_control() => return None,
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '◦' => b'o',
        _ => b'?',
    };
    Some(byte)
}
