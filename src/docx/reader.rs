/*!
 * WordprocessingML parsing for the document container.
 *
 * Pulls `word/document.xml` through quick-xml and builds the paragraph
 * model. Only the fields the model represents are read; everything else in
 * the part is skipped. Element and attribute names are matched by local
 * name so the usual `w:` prefix is not assumed.
 */

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Alignment, Paragraph, Run};
use crate::errors::DocumentError;

/// Twips (twentieths of a point) per inch
const TWIPS_PER_INCH: f64 = 1440.0;

/// Parse the main document part into the paragraph model
pub(crate) fn parse_document_xml(xml: &[u8]) -> Result<Vec<Paragraph>, DocumentError> {
    let mut reader = Reader::from_reader(xml);

    let mut paragraphs: Vec<Paragraph> = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut current_run: Option<Run> = None;
    let mut in_paragraph_props = false;
    let mut in_run_props = false;
    let mut in_text = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    // A paragraph already in progress means this <w:p> is
                    // nested (a table cell); flatten it into the sequence.
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                    current = Some(Paragraph::new());
                }
                b"pPr" => in_paragraph_props = current.is_some(),
                b"r" => {
                    if current.is_some() && !in_paragraph_props {
                        current_run = Some(Run::default());
                    }
                }
                b"rPr" => in_run_props = current_run.is_some(),
                b"t" => in_text = current_run.is_some(),
                _ => {
                    apply_property(&e, &mut current, &mut current_run, in_paragraph_props, in_run_props)?;
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(Paragraph::new()),
                b"br" => {
                    if let Some(run) = current_run.as_mut() {
                        run.text.push('\n');
                    }
                }
                b"tab" => {
                    if let Some(run) = current_run.as_mut() {
                        run.text.push('\t');
                    }
                }
                _ => {
                    apply_property(&e, &mut current, &mut current_run, in_paragraph_props, in_run_props)?;
                }
            },
            Event::Text(e) => {
                if in_text {
                    if let Some(run) = current_run.as_mut() {
                        run.text.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"rPr" => in_run_props = false,
                b"r" => {
                    if let (Some(paragraph), Some(run)) = (current.as_mut(), current_run.take()) {
                        paragraph.runs.push(run);
                    }
                }
                b"pPr" => in_paragraph_props = false,
                b"p" => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Route a property element to the paragraph or run being built
fn apply_property(
    element: &BytesStart,
    current: &mut Option<Paragraph>,
    current_run: &mut Option<Run>,
    in_paragraph_props: bool,
    in_run_props: bool,
) -> Result<(), DocumentError> {
    if in_run_props {
        if let Some(run) = current_run.as_mut() {
            apply_run_property(element, run)?;
        }
    } else if in_paragraph_props {
        if let Some(paragraph) = current.as_mut() {
            apply_paragraph_property(element, paragraph)?;
        }
    }
    Ok(())
}

fn apply_paragraph_property(
    element: &BytesStart,
    paragraph: &mut Paragraph,
) -> Result<(), DocumentError> {
    let format = paragraph.format_mut();
    match element.local_name().as_ref() {
        b"ind" => {
            // Both the strict (start/end) and transitional (left/right)
            // attribute names appear in the wild.
            if let Some(twips) = twips_attr(element, &[b"left", b"start"])? {
                format.left_indent_in = Some(twips / TWIPS_PER_INCH);
            }
            if let Some(twips) = twips_attr(element, &[b"right", b"end"])? {
                format.right_indent_in = Some(twips / TWIPS_PER_INCH);
            }
            if let Some(twips) = twips_attr(element, &[b"firstLine"])? {
                format.first_line_indent_in = Some(twips / TWIPS_PER_INCH);
            }
            if let Some(twips) = twips_attr(element, &[b"hanging"])? {
                format.first_line_indent_in = Some(-twips / TWIPS_PER_INCH);
            }
        }
        b"spacing" => {
            if let Some(twips) = twips_attr(element, &[b"before"])? {
                format.space_before_pt = Some((twips / 20.0) as f32);
            }
            if let Some(twips) = twips_attr(element, &[b"after"])? {
                format.space_after_pt = Some((twips / 20.0) as f32);
            }
            // Line spacing is only meaningful to the model when exact;
            // "auto" values are relative and are left to the default.
            let exact = matches!(
                attr_value(element, &[b"lineRule"])?.as_deref(),
                Some("exact") | Some("atLeast")
            );
            if exact {
                if let Some(twips) = twips_attr(element, &[b"line"])? {
                    format.line_spacing_pt = Some((twips / 20.0) as f32);
                }
            }
        }
        b"jc" => {
            format.alignment = match attr_value(element, &[b"val"])?.as_deref() {
                Some("center") => Some(Alignment::Center),
                Some("right") | Some("end") => Some(Alignment::Right),
                Some("both") | Some("justify") => Some(Alignment::Justified),
                Some("left") | Some("start") => Some(Alignment::Left),
                _ => None,
            };
        }
        _ => {}
    }
    Ok(())
}

fn apply_run_property(element: &BytesStart, run: &mut Run) -> Result<(), DocumentError> {
    match element.local_name().as_ref() {
        b"rFonts" => {
            if let Some(name) = attr_value(element, &[b"ascii", b"hAnsi"])? {
                run.font_name = Some(name);
            }
        }
        b"sz" => {
            if let Some(half_points) = twips_attr(element, &[b"val"])? {
                run.font_size_pt = Some((half_points / 2.0) as f32);
            }
        }
        b"b" => run.bold = toggle_value(element)?,
        b"i" => run.italic = toggle_value(element)?,
        _ => {}
    }
    Ok(())
}

/// First matching attribute by local name, unescaped
fn attr_value(element: &BytesStart, names: &[&[u8]]) -> Result<Option<String>, DocumentError> {
    for name in names {
        for attr in element.attributes() {
            let attr = attr?;
            if attr.key.local_name().as_ref() == *name {
                return Ok(Some(attr.unescape_value()?.into_owned()));
            }
        }
    }
    Ok(None)
}

/// Numeric attribute by local name; unparsable values read as absent
fn twips_attr(element: &BytesStart, names: &[&[u8]]) -> Result<Option<f64>, DocumentError> {
    Ok(attr_value(element, names)?.and_then(|raw| raw.parse::<f64>().ok()))
}

/// On/off property: present means on unless w:val says otherwise
fn toggle_value(element: &BytesStart) -> Result<bool, DocumentError> {
    Ok(!matches!(
        attr_value(element, &[b"val"])?.as_deref(),
        Some("0") | Some("false") | Some("none") | Some("off")
    ))
}
