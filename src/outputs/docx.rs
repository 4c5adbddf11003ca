//! Minimal WordprocessingML (`.docx`) writer.
//!
//! A `.docx` file is a ZIP archive of XML parts. This module emits only the
//! parts a shop log needs:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! word/document.xml
//! word/styles.xml          # Normal + ListBullet
//! word/numbering.xml       # one bullet list definition
//! word/_rels/document.xml.rels
//! ```
//!
//! Documents are described with [`Paragraph`] values and serialized with
//! `quick-xml`, so all text is escaped on the way out.

use crate::error::GenerateError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

/// Bullet list instance referenced by [`ParagraphKind::Bullet`].
const BULLET_NUM_ID: &str = "1";

/// Character formatting for a paragraph's single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font: Option<String>,
    pub size_pt: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphKind {
    Normal,
    /// A `ListBullet` paragraph indented by the given number of twips.
    Bullet { indent_twips: u32 },
}

/// One paragraph holding at most one run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub text: String,
    pub style: RunStyle,
    /// Line spacing in 240ths of a line (`360` is 1.5 lines).
    pub line_spacing: Option<u32>,
}

impl Paragraph {
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            kind: ParagraphKind::Normal,
            text: text.into(),
            style,
            line_spacing: None,
        }
    }

    pub fn bullet(indent_twips: u32, style: RunStyle) -> Self {
        Self {
            kind: ParagraphKind::Bullet { indent_twips },
            text: String::new(),
            style,
            line_spacing: None,
        }
    }

    pub fn blank() -> Self {
        Self::styled("", RunStyle::default())
    }

    pub fn with_line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = Some(line_spacing);
        self
    }
}

/// An ordered list of paragraphs ready to be packaged.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Serialize the document into the bytes of a `.docx` archive.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>, GenerateError> {
        let parts = [
            ("[Content_Types].xml", content_types_xml()?),
            ("_rels/.rels", package_rels_xml()?),
            ("word/document.xml", self.document_xml()?),
            ("word/styles.xml", styles_xml()?),
            ("word/numbering.xml", numbering_xml()?),
            ("word/_rels/document.xml.rels", document_rels_xml()?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, xml) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&xml)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    fn document_xml(&self) -> Result<Vec<u8>, GenerateError> {
        let mut writer = xml_writer()?;
        start(
            &mut writer,
            BytesStart::new("w:document").with_attributes([("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)]),
        )?;
        start(&mut writer, BytesStart::new("w:body"))?;
        for paragraph in &self.paragraphs {
            write_paragraph(&mut writer, paragraph)?;
        }
        // US Letter, one inch margins.
        start(&mut writer, BytesStart::new("w:sectPr"))?;
        empty(
            &mut writer,
            BytesStart::new("w:pgSz").with_attributes([("w:w", "12240"), ("w:h", "15840")]),
        )?;
        empty(
            &mut writer,
            BytesStart::new("w:pgMar").with_attributes([
                ("w:top", "1440"),
                ("w:right", "1440"),
                ("w:bottom", "1440"),
                ("w:left", "1440"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ]),
        )?;
        end(&mut writer, "w:sectPr")?;
        end(&mut writer, "w:body")?;
        end(&mut writer, "w:document")?;
        Ok(writer.into_inner().into_inner())
    }
}

fn write_paragraph(writer: &mut Writer<Cursor<Vec<u8>>>, paragraph: &Paragraph) -> Result<(), GenerateError> {
    start(writer, BytesStart::new("w:p"))?;

    let has_properties =
        paragraph.line_spacing.is_some() || matches!(paragraph.kind, ParagraphKind::Bullet { .. });
    if has_properties {
        start(writer, BytesStart::new("w:pPr"))?;
        if let ParagraphKind::Bullet { .. } = paragraph.kind {
            empty(writer, BytesStart::new("w:pStyle").with_attributes([("w:val", "ListBullet")]))?;
            start(writer, BytesStart::new("w:numPr"))?;
            empty(writer, BytesStart::new("w:ilvl").with_attributes([("w:val", "0")]))?;
            empty(writer, BytesStart::new("w:numId").with_attributes([("w:val", BULLET_NUM_ID)]))?;
            end(writer, "w:numPr")?;
        }
        if let Some(line) = paragraph.line_spacing {
            let line = line.to_string();
            empty(
                writer,
                BytesStart::new("w:spacing")
                    .with_attributes([("w:line", line.as_str()), ("w:lineRule", "auto")]),
            )?;
        }
        if let ParagraphKind::Bullet { indent_twips } = paragraph.kind {
            let left = indent_twips.to_string();
            empty(
                writer,
                BytesStart::new("w:ind")
                    .with_attributes([("w:left", left.as_str()), ("w:hanging", "360")]),
            )?;
        }
        end(writer, "w:pPr")?;
    }

    let style = &paragraph.style;
    let has_run = !paragraph.text.is_empty() || style.font.is_some();
    if has_run {
        start(writer, BytesStart::new("w:r"))?;
        write_run_properties(writer, style)?;
        start(
            writer,
            BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
        )?;
        emit(writer, Event::Text(BytesText::new(&paragraph.text)))?;
        end(writer, "w:t")?;
        end(writer, "w:r")?;
    }

    end(writer, "w:p")
}

fn write_run_properties(writer: &mut Writer<Cursor<Vec<u8>>>, style: &RunStyle) -> Result<(), GenerateError> {
    if *style == RunStyle::default() {
        return Ok(());
    }
    start(writer, BytesStart::new("w:rPr"))?;
    if let Some(font) = &style.font {
        empty(
            writer,
            BytesStart::new("w:rFonts").with_attributes([
                ("w:ascii", font.as_str()),
                ("w:hAnsi", font.as_str()),
                ("w:cs", font.as_str()),
            ]),
        )?;
    }
    if style.bold {
        empty(writer, BytesStart::new("w:b"))?;
    }
    if style.italic {
        empty(writer, BytesStart::new("w:i"))?;
    }
    if style.underline {
        empty(writer, BytesStart::new("w:u").with_attributes([("w:val", "single")]))?;
    }
    if let Some(size) = style.size_pt {
        // Half-points.
        let half_points = (size * 2).to_string();
        empty(writer, BytesStart::new("w:sz").with_attributes([("w:val", half_points.as_str())]))?;
        empty(writer, BytesStart::new("w:szCs").with_attributes([("w:val", half_points.as_str())]))?;
    }
    end(writer, "w:rPr")
}

fn content_types_xml() -> Result<Vec<u8>, GenerateError> {
    let mut writer = xml_writer()?;
    start(
        &mut writer,
        BytesStart::new("Types").with_attributes([("xmlns", NS_CONTENT_TYPES)]),
    )?;
    empty(
        &mut writer,
        BytesStart::new("Default").with_attributes([
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ]),
    )?;
    empty(
        &mut writer,
        BytesStart::new("Default")
            .with_attributes([("Extension", "xml"), ("ContentType", "application/xml")]),
    )?;
    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
    ];
    for (part, content_type) in overrides {
        empty(
            &mut writer,
            BytesStart::new("Override")
                .with_attributes([("PartName", part), ("ContentType", content_type)]),
        )?;
    }
    end(&mut writer, "Types")?;
    Ok(writer.into_inner().into_inner())
}

fn package_rels_xml() -> Result<Vec<u8>, GenerateError> {
    relationships_xml(&[("rId1", REL_OFFICE_DOCUMENT, "word/document.xml")])
}

fn document_rels_xml() -> Result<Vec<u8>, GenerateError> {
    relationships_xml(&[
        ("rId1", REL_STYLES, "styles.xml"),
        ("rId2", REL_NUMBERING, "numbering.xml"),
    ])
}

fn relationships_xml(relationships: &[(&str, &str, &str)]) -> Result<Vec<u8>, GenerateError> {
    let mut writer = xml_writer()?;
    start(
        &mut writer,
        BytesStart::new("Relationships").with_attributes([("xmlns", NS_PKG_REL)]),
    )?;
    for &(id, kind, target) in relationships {
        empty(
            &mut writer,
            BytesStart::new("Relationship")
                .with_attributes([("Id", id), ("Type", kind), ("Target", target)]),
        )?;
    }
    end(&mut writer, "Relationships")?;
    Ok(writer.into_inner().into_inner())
}

fn styles_xml() -> Result<Vec<u8>, GenerateError> {
    let mut writer = xml_writer()?;
    start(
        &mut writer,
        BytesStart::new("w:styles").with_attributes([("xmlns:w", NS_MAIN)]),
    )?;

    start(
        &mut writer,
        BytesStart::new("w:style").with_attributes([
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ]),
    )?;
    empty(&mut writer, BytesStart::new("w:name").with_attributes([("w:val", "Normal")]))?;
    empty(&mut writer, BytesStart::new("w:qFormat"))?;
    end(&mut writer, "w:style")?;

    start(
        &mut writer,
        BytesStart::new("w:style")
            .with_attributes([("w:type", "paragraph"), ("w:styleId", "ListBullet")]),
    )?;
    empty(&mut writer, BytesStart::new("w:name").with_attributes([("w:val", "List Bullet")]))?;
    empty(&mut writer, BytesStart::new("w:basedOn").with_attributes([("w:val", "Normal")]))?;
    start(&mut writer, BytesStart::new("w:pPr"))?;
    start(&mut writer, BytesStart::new("w:numPr"))?;
    empty(&mut writer, BytesStart::new("w:numId").with_attributes([("w:val", BULLET_NUM_ID)]))?;
    end(&mut writer, "w:numPr")?;
    end(&mut writer, "w:pPr")?;
    end(&mut writer, "w:style")?;

    end(&mut writer, "w:styles")?;
    Ok(writer.into_inner().into_inner())
}

fn numbering_xml() -> Result<Vec<u8>, GenerateError> {
    let mut writer = xml_writer()?;
    start(
        &mut writer,
        BytesStart::new("w:numbering").with_attributes([("xmlns:w", NS_MAIN)]),
    )?;

    start(
        &mut writer,
        BytesStart::new("w:abstractNum").with_attributes([("w:abstractNumId", "0")]),
    )?;
    start(&mut writer, BytesStart::new("w:lvl").with_attributes([("w:ilvl", "0")]))?;
    empty(&mut writer, BytesStart::new("w:start").with_attributes([("w:val", "1")]))?;
    empty(&mut writer, BytesStart::new("w:numFmt").with_attributes([("w:val", "bullet")]))?;
    empty(&mut writer, BytesStart::new("w:lvlText").with_attributes([("w:val", "\u{2022}")]))?;
    empty(&mut writer, BytesStart::new("w:lvlJc").with_attributes([("w:val", "left")]))?;
    start(&mut writer, BytesStart::new("w:pPr"))?;
    empty(
        &mut writer,
        BytesStart::new("w:ind").with_attributes([("w:left", "720"), ("w:hanging", "360")]),
    )?;
    end(&mut writer, "w:pPr")?;
    end(&mut writer, "w:lvl")?;
    end(&mut writer, "w:abstractNum")?;

    start(
        &mut writer,
        BytesStart::new("w:num").with_attributes([("w:numId", BULLET_NUM_ID)]),
    )?;
    empty(
        &mut writer,
        BytesStart::new("w:abstractNumId").with_attributes([("w:val", "0")]),
    )?;
    end(&mut writer, "w:num")?;

    end(&mut writer, "w:numbering")?;
    Ok(writer.into_inner().into_inner())
}

fn xml_writer() -> Result<Writer<Cursor<Vec<u8>>>, GenerateError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;
    Ok(writer)
}

fn emit(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), GenerateError> {
    writer
        .write_event(event)
        .map_err(|e| GenerateError::Xml(e.to_string()))
}

fn start(writer: &mut Writer<Cursor<Vec<u8>>>, element: BytesStart<'_>) -> Result<(), GenerateError> {
    emit(writer, Event::Start(element))
}

fn empty(writer: &mut Writer<Cursor<Vec<u8>>>, element: BytesStart<'_>) -> Result<(), GenerateError> {
    emit(writer, Event::Empty(element))
}

fn end(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str) -> Result<(), GenerateError> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Read;

    /// Read one part of a `.docx` archive back as a string.
    pub(crate) fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = Document::new().to_docx_bytes().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/numbering.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_styled_run_properties() {
        let mut doc = Document::new();
        doc.push(
            Paragraph::styled(
                "Title",
                RunStyle {
                    bold: true,
                    italic: true,
                    underline: true,
                    font: Some("Arial".to_string()),
                    size_pt: Some(14),
                },
            )
            .with_line_spacing(360),
        );
        let xml = read_part(&doc.to_docx_bytes().unwrap(), "word/document.xml");

        assert!(xml.contains(r#"<w:spacing w:line="360" w:lineRule="auto"/>"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/>"#));
        assert!(xml.contains("<w:b/><w:i/>"));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="28"/>"#));
        assert!(xml.contains(">Title</w:t>"));
    }

    #[test]
    fn test_bullet_paragraph_uses_numbering() {
        let mut doc = Document::new();
        doc.push(Paragraph::bullet(720, RunStyle::default()));
        let xml = read_part(&doc.to_docx_bytes().unwrap(), "word/document.xml");

        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="720" w:hanging="360"/>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new();
        doc.push(Paragraph::styled("Tools & <Parts>", RunStyle::default()));
        let xml = read_part(&doc.to_docx_bytes().unwrap(), "word/document.xml");
        assert!(xml.contains("Tools &amp; &lt;Parts&gt;"));
    }

    #[test]
    fn test_blank_paragraph_has_no_run() {
        let mut doc = Document::new();
        doc.push(Paragraph::blank());
        let xml = read_part(&doc.to_docx_bytes().unwrap(), "word/document.xml");
        assert!(xml.contains("<w:p></w:p>"));
        assert!(!xml.contains("<w:r>"));
    }
}
