/*!
 * WordprocessingML serialization for the document container.
 *
 * Rebuilds a complete .docx package from the paragraph model: content
 * types, package relationships, the main document part, a minimal style
 * part, and (when page numbers are stamped) a header part carrying the
 * dynamic PAGE field.
 */

use std::fs::File;
use std::io::Write;
use std::path::Path;

use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{Alignment, Paragraph, ScriptDocument};
use crate::errors::DocumentError;

/// Twips (twentieths of a point) per inch
const TWIPS_PER_INCH: f64 = 1440.0;

fn twips_from_inches(inches: f64) -> i64 {
    (inches * TWIPS_PER_INCH).round() as i64
}

fn twentieths_from_points(points: f32) -> i64 {
    (points as f64 * 20.0).round() as i64
}

fn half_points(points: f32) -> i64 {
    (points as f64 * 2.0).round() as i64
}

/// Write the document out as a .docx package
pub(crate) fn write_package(doc: &ScriptDocument, path: &Path) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(doc.has_page_numbers()).as_bytes())?;

    zip.add_directory("_rels/", options)?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.add_directory("word/", options)?;
    zip.add_directory("word/_rels/", options)?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(build_document_xml(doc).as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(word_rels_xml(doc.has_page_numbers()).as_bytes())?;

    zip.start_file("word/styles.xml", options)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    if doc.has_page_numbers() {
        zip.start_file("word/header1.xml", options)?;
        zip.write_all(HEADER_XML.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

/// Serialize the paragraph model into the main document part
pub(crate) fn build_document_xml(doc: &ScriptDocument) -> String {
    let mut body = String::new();
    for paragraph in doc.paragraphs() {
        write_paragraph(&mut body, paragraph);
    }

    let margins = doc.margins();
    let header_refs = if doc.has_page_numbers() {
        // Default header only; with titlePg set and no first-page header,
        // the first page stays unnumbered.
        r#"<w:headerReference w:type="default" r:id="rId2"/><w:titlePg/>"#
    } else {
        ""
    };
    let section = format!(
        r#"<w:sectPr>{refs}<w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{top}" w:right="{right}" w:bottom="{bottom}" w:left="{left}" w:header="720" w:footer="708" w:gutter="0"/><w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>"#,
        refs = header_refs,
        top = twips_from_inches(margins.top_in),
        right = twips_from_inches(margins.right_in),
        bottom = twips_from_inches(margins.bottom_in),
        left = twips_from_inches(margins.left_in),
    );

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"
 xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
 xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordprocessingml"
 xmlns:w15="http://schemas.microsoft.com/office/word/2012/wordprocessingml"
 mc:Ignorable="w14 w15">
  <w:body>
    {body}{section}
  </w:body>
</w:document>"#
    )
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) {
    out.push_str("<w:p>");
    write_paragraph_properties(out, paragraph);
    for run in paragraph.runs() {
        write_run(out, run);
    }
    out.push_str("</w:p>");
}

fn write_paragraph_properties(out: &mut String, paragraph: &Paragraph) {
    let format = paragraph.format();
    let mut props = String::new();

    let has_spacing = format.space_before_pt.is_some()
        || format.space_after_pt.is_some()
        || format.line_spacing_pt.is_some();
    if has_spacing {
        props.push_str("<w:spacing");
        if let Some(before) = format.space_before_pt {
            props.push_str(&format!(r#" w:before="{}""#, twentieths_from_points(before)));
        }
        if let Some(after) = format.space_after_pt {
            props.push_str(&format!(r#" w:after="{}""#, twentieths_from_points(after)));
        }
        if let Some(line) = format.line_spacing_pt {
            props.push_str(&format!(
                r#" w:line="{}" w:lineRule="exact""#,
                twentieths_from_points(line)
            ));
        }
        props.push_str("/>");
    }

    let has_indent = format.left_indent_in.is_some()
        || format.right_indent_in.is_some()
        || format.first_line_indent_in.is_some();
    if has_indent {
        props.push_str("<w:ind");
        if let Some(left) = format.left_indent_in {
            props.push_str(&format!(r#" w:left="{}""#, twips_from_inches(left)));
        }
        if let Some(right) = format.right_indent_in {
            props.push_str(&format!(r#" w:right="{}""#, twips_from_inches(right)));
        }
        if let Some(first_line) = format.first_line_indent_in {
            if first_line >= 0.0 {
                props.push_str(&format!(r#" w:firstLine="{}""#, twips_from_inches(first_line)));
            } else {
                props.push_str(&format!(r#" w:hanging="{}""#, twips_from_inches(-first_line)));
            }
        }
        props.push_str("/>");
    }

    if let Some(alignment) = format.alignment {
        let value = match alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justified => "both",
        };
        props.push_str(&format!(r#"<w:jc w:val="{}"/>"#, value));
    }

    if !props.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(&props);
        out.push_str("</w:pPr>");
    }
}

fn write_run(out: &mut String, run: &super::Run) {
    if run.text.is_empty() {
        return;
    }

    out.push_str("<w:r>");

    let has_props =
        run.font_name.is_some() || run.font_size_pt.is_some() || run.bold || run.italic;
    if has_props {
        out.push_str("<w:rPr>");
        if let Some(name) = &run.font_name {
            let escaped = escape(name.as_str());
            out.push_str(&format!(
                r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
                escaped
            ));
        }
        if run.bold {
            out.push_str("<w:b/>");
        }
        if run.italic {
            out.push_str("<w:i/>");
        }
        if let Some(size) = run.font_size_pt {
            let value = half_points(size);
            out.push_str(&format!(r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, value));
        }
        out.push_str("</w:rPr>");
    }

    // Embedded newlines become explicit breaks.
    let mut first = true;
    for line in run.text.split('\n') {
        if !first {
            out.push_str("<w:br/>");
        }
        first = false;
        if !line.is_empty() {
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape(line));
            out.push_str("</w:t>");
        }
    }

    out.push_str("</w:r>");
}

fn content_types_xml(with_header: bool) -> String {
    let header_override = if with_header {
        r#"
  <Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#
    } else {
        ""
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>{header_override}
</Types>"#
    )
}

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

fn word_rels_xml(with_header: bool) -> String {
    let header_rel = if with_header {
        r#"
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#
    } else {
        ""
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>{header_rel}
</Relationships>"#
    )
}

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#;

/// Page-number header: a right-aligned paragraph holding the dynamic PAGE
/// field followed by a literal period.
const HEADER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:p>
    <w:pPr><w:jc w:val="right"/><w:spacing w:after="0"/></w:pPr>
    <w:r><w:fldChar w:fldCharType="begin"/></w:r>
    <w:r><w:instrText xml:space="preserve">PAGE</w:instrText></w:r>
    <w:r><w:fldChar w:fldCharType="separate"/></w:r>
    <w:r><w:fldChar w:fldCharType="end"/></w:r>
    <w:r><w:t>.</w:t></w:r>
  </w:p>
</w:hdr>"#;
