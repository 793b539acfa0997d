//! DOCX export.
//!
//! The same block list the page-flow engine lays out can be written as a minimal
//! WordprocessingML package instead. Word does its own pagination, so blocks map onto
//! styled paragraphs and nothing here knows about pages.

use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::block::{ContentBlock, HeadingLevel};
use crate::colour::{colours, Colour};
use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::units::Mm;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Write `blocks` as a DOCX package titled `title` on pages sized and margined like
/// `geometry`, returning the flushed writer once the archive is finished
pub fn write_docx<W: Write + Seek>(
    blocks: &[ContentBlock],
    title: &str,
    geometry: &PageGeometry,
    writer: W,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", styles_xml()),
        ("word/document.xml", document_xml(blocks, title, geometry)),
        ("docProps/core.xml", core_xml(title)),
    ];
    for (path, contents) in parts {
        zip.start_file(path, options)?;
        zip.write_all(contents.as_bytes())?;
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    log::debug!("wrote {} blocks to a DOCX package", blocks.len());
    Ok(writer)
}

/// The body of `word/document.xml`
pub fn document_xml(blocks: &[ContentBlock], title: &str, geometry: &PageGeometry) -> String {
    let mut body = String::new();
    body.push_str(&paragraph(Some("Title"), title));

    for block in blocks {
        match block {
            ContentBlock::Heading { level, text } => {
                let style = match level {
                    HeadingLevel::H2 => "Heading1",
                    HeadingLevel::H3 => "Heading2",
                    HeadingLevel::H4 => "Heading3",
                };
                body.push_str(&paragraph(Some(style), text));
            }
            ContentBlock::Paragraph { text } => {
                for line in text.trim().lines() {
                    body.push_str(&paragraph(None, line.trim_end()));
                }
            }
            ContentBlock::BulletList { items } => {
                for item in items {
                    body.push_str(&paragraph(Some("ListBullet"), &format!("\u{2022}\t{item}")));
                }
            }
            ContentBlock::Banner { text, fill } => body.push_str(&banner(text, *fill)),
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body}{}</w:body></w:document>"#,
        section(geometry)
    )
}

/// Page size and margins. The top and bottom margins are the distances from the page
/// edges to `top_start_y` and `bottom_limit_y`
fn section(geometry: &PageGeometry) -> String {
    format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="567" w:footer="567" w:gutter="0"/></w:sectPr>"#,
        twips(geometry.page_width),
        twips(geometry.page_height),
        twips(geometry.top_start_y),
        twips(geometry.margin_right),
        twips(geometry.page_height - geometry.bottom_limit_y),
        twips(geometry.margin_left),
    )
}

/// Twentieths of a point
fn twips(length: Mm) -> u32 {
    (length.0 * 1440.0 / 25.4).round() as u32
}

fn paragraph(style: Option<&str>, text: &str) -> String {
    let properties = style
        .map(|style| format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#))
        .unwrap_or_default();
    if text.is_empty() {
        return format!("<w:p>{properties}</w:p>");
    }
    format!(
        r#"<w:p>{properties}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

fn banner(text: &str, fill: Colour) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Banner"/><w:shd w:val="clear" w:color="auto" w:fill="{}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        fill.to_hex(),
        escape(text)
    )
}

fn styles_xml() -> String {
    let heading = |id: &str, name: &str, size_half_points: u32, colour: Colour| {
        format!(
            r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/></w:pPr><w:rPr><w:b/><w:color w:val="{}"/><w:sz w:val="{size_half_points}"/></w:rPr></w:style>"#,
            colour.to_hex()
        )
    };
    let mut styles = String::new();
    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="80"/></w:pPr><w:rPr><w:rFonts w:ascii="Helvetica" w:hAnsi="Helvetica"/><w:color w:val="{}"/><w:sz w:val="22"/></w:rPr></w:style>"#,
        colours::INK.to_hex()
    ));
    styles.push_str(&heading("Title", "Title", 36, colours::VIOLET));
    styles.push_str(&heading("Heading1", "heading 1", 30, colours::VIOLET));
    styles.push_str(&heading("Heading2", "heading 2", 26, colours::VIOLET));
    styles.push_str(&heading("Heading3", "heading 3", 23, colours::INK));
    styles.push_str(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:tabs><w:tab w:val="left" w:pos="340"/></w:tabs><w:ind w:left="340" w:hanging="340"/></w:pPr></w:style>"#,
    );
    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="Banner"><w:name w:val="Banner"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="240" w:after="120"/></w:pPr><w:rPr><w:b/><w:color w:val="{}"/><w:sz w:val="25"/></w:rPr></w:style>"#,
        colours::WHITE.to_hex()
    ));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WORD_NS}">{styles}</w:styles>"#
    )
}

fn core_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>{}</dc:creator></cp:coreProperties>"#,
        escape(title),
        concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
    )
}
