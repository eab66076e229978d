//! Word-processor backend: writes structured paragraphs as a DOCX package.
//!
//! The package is assembled by hand: a handful of fixed parts plus
//! `word/document.xml`, built paragraph by paragraph. Headings map to the
//! built-in `Heading1`..`Heading6` styles and bullets to a two-level list
//! definition, so the result reflows in any word processor.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::options::{DocumentInfo, DocxOptions};
use crate::error::Result;
use crate::layout::{BULLET_GLYPH, SUB_BULLET_GLYPH};
use crate::model::{ParagraphRole, Run, StructuredParagraph};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Numbering definition id shared by every bullet paragraph.
const BULLET_NUM_ID: u32 = 1;

/// Half-point font sizes for heading levels 1..=6.
const HEADING_SIZES: [u32; 6] = [28, 24, 22, 20, 20, 20];

const BODY_SIZE: u32 = 24;

/// Twentieths of a point per millimetre.
const TWIPS_PER_MM: f32 = 1440.0 / 25.4;

/// Write paragraphs to DOCX bytes.
pub fn to_docx(
    paragraphs: &[StructuredParagraph],
    options: &DocxOptions,
    info: &DocumentInfo,
) -> Result<Vec<u8>> {
    let parts: [(&str, String); 8] = [
        ("[Content_Types].xml", content_types()),
        ("_rels/.rels", package_relationships()),
        ("word/document.xml", document_xml(paragraphs, options)),
        ("word/styles.xml", styles_xml()),
        ("word/numbering.xml", numbering_xml()),
        ("word/_rels/document.xml.rels", document_relationships()),
        ("docProps/core.xml", core_properties(info)),
        ("docProps/app.xml", app_properties(info)),
    ];

    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in &parts {
        writer.start_file(*name, file_options)?;
        writer.write_all(content.as_bytes())?;
    }

    log::debug!("Writing DOCX with {} paragraphs", paragraphs.len());

    Ok(writer.finish()?.into_inner())
}

fn document_xml(paragraphs: &[StructuredParagraph], options: &DocxOptions) -> String {
    let mut xml = String::with_capacity(1024 + paragraphs.len() * 128);
    xml.push_str(XML_HEADER);
    xml.push_str(&format!(r#"<w:document xmlns:w="{}"><w:body>"#, W_NS));

    for paragraph in paragraphs {
        write_paragraph(&mut xml, paragraph, options);
    }

    let width = twips(options.page_size.width());
    let height = twips(options.page_size.height());
    let margin = twips(options.margin);
    xml.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
        width,
        height,
        m = margin
    ));
    xml.push_str("</w:body></w:document>");
    xml
}

fn write_paragraph(xml: &mut String, paragraph: &StructuredParagraph, options: &DocxOptions) {
    xml.push_str("<w:p><w:pPr>");
    let spacing = match paragraph.role {
        ParagraphRole::Heading => {
            xml.push_str(&format!(r#"<w:pStyle w:val="Heading{}"/>"#, paragraph.level));
            options.heading_spacing_after
        }
        ParagraphRole::Bullet => {
            xml.push_str(&format!(
                r#"<w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                paragraph.level.min(1),
                BULLET_NUM_ID
            ));
            options.bullet_spacing_after
        }
        ParagraphRole::Body => options.body_spacing_after,
        ParagraphRole::Spacer => options.spacer_spacing_after,
    };
    xml.push_str(&format!(r#"<w:spacing w:after="{}"/></w:pPr>"#, spacing));

    for run in paragraph.runs.iter().filter(|r| !r.is_empty()) {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    if run.bold {
        xml.push_str("<w:rPr><w:b/></w:rPr>");
    }
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&escape_xml(&run.text));
    xml.push_str("</w:t></w:r>");
}

fn styles_xml() -> String {
    let mut xml = String::new();
    xml.push_str(XML_HEADER);
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, W_NS));
    xml.push_str(&format!(
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Helvetica" w:hAnsi="Helvetica" w:cs="Helvetica"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:rPrDefault></w:docDefaults>"#,
        s = BODY_SIZE
    ));
    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);
    for (index, size) in HEADING_SIZES.iter().enumerate() {
        let level = index + 1;
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:outlineLvl w:val="{o}"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
            l = level,
            o = index,
            s = size
        ));
    }
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/></w:style>"#);
    xml.push_str("</w:styles>");
    xml
}

fn numbering_xml() -> String {
    let mut xml = String::new();
    xml.push_str(XML_HEADER);
    xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, W_NS));
    xml.push_str(r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="hybridMultilevel"/>"#);
    for (level, glyph) in [BULLET_GLYPH, SUB_BULLET_GLYPH].iter().enumerate() {
        xml.push_str(&format!(
            r#"<w:lvl w:ilvl="{l}"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{g}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{i}" w:hanging="360"/></w:pPr></w:lvl>"#,
            l = level,
            g = glyph,
            i = 720 * (level + 1)
        ));
    }
    xml.push_str("</w:abstractNum>");
    xml.push_str(&format!(
        r#"<w:num w:numId="{}"><w:abstractNumId w:val="0"/></w:num>"#,
        BULLET_NUM_ID
    ));
    xml.push_str("</w:numbering>");
    xml
}

fn content_types() -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(concat!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        "</Types>"
    ));
    xml
}

fn package_relationships() -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(concat!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
        "</Relationships>"
    ));
    xml
}

fn document_relationships() -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(concat!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
        "</Relationships>"
    ));
    xml
}

fn core_properties(info: &DocumentInfo) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = &info.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str(&format!(
        "<dc:creator>{}</dc:creator>",
        escape_xml(&info.producer)
    ));
    if let Some(created) = info.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            w3c_date(created)
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_properties(info: &DocumentInfo) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(&format!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{}</Application></Properties>"#,
        escape_xml(&info.producer)
    ));
    xml
}

fn w3c_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn twips(mm: f32) -> u32 {
    (mm * TWIPS_PER_MM).round() as u32
}

/// Escape text for XML content and attribute values.
///
/// Characters not allowed in XML 1.0 are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}
