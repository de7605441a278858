/*!
 * Document container for .docx screenplay files.
 *
 * A .docx file is a ZIP package whose main part, `word/document.xml`,
 * carries WordprocessingML. This module loads that part into an ordered,
 * mutable paragraph model (paragraphs of styled runs plus paragraph-level
 * formatting), and writes the model back out as a fresh package.
 *
 * The model keeps what the formatter needs: run text with font settings and
 * the paragraph format fields it styles. Content the model does not
 * represent (tables are flattened to their paragraphs, images and
 * mid-document section properties are dropped) does not survive a
 * round-trip; the rebuild emits a single section at the end of the body.
 */

mod reader;
mod writer;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::DocumentError;

// @module: .docx package model and I/O

/// A contiguous run of text sharing one set of character properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// Visible text of the run
    pub text: String,

    /// Font name, when set explicitly on the run
    pub font_name: Option<String>,

    /// Font size in points, when set explicitly on the run
    pub font_size_pt: Option<f32>,

    /// Bold flag
    pub bold: bool,

    /// Italic flag
    pub italic: bool,
}

impl Run {
    /// Create a plain run with no explicit character properties
    pub fn new<S: Into<String>>(text: S) -> Self {
        Run {
            text: text.into(),
            ..Run::default()
        }
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Paragraph-level formatting fields.
///
/// `None` means "not set here": the field is simply absent from the
/// paragraph properties and the document default applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphFormat {
    /// Left indent in inches
    pub left_indent_in: Option<f64>,

    /// Right indent in inches
    pub right_indent_in: Option<f64>,

    /// First-line indent in inches; negative values hang
    pub first_line_indent_in: Option<f64>,

    /// Exact line spacing in points
    pub line_spacing_pt: Option<f32>,

    /// Space before the paragraph in points
    pub space_before_pt: Option<f32>,

    /// Space after the paragraph in points
    pub space_after_pt: Option<f32>,

    /// Alignment
    pub alignment: Option<Alignment>,
}

/// One paragraph: an ordered list of runs plus formatting
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    runs: Vec<Run>,
    format: ParagraphFormat,
}

impl Paragraph {
    /// Create an empty paragraph
    pub fn new() -> Self {
        Paragraph::default()
    }

    /// Create a paragraph holding a single plain run
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let runs = if text.is_empty() { Vec::new() } else { vec![Run::new(text)] };
        Paragraph {
            runs,
            format: ParagraphFormat::default(),
        }
    }

    /// Full visible text: the concatenation of all run texts
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Replace the full text with a single plain run. Existing runs and
    /// their character properties are discarded; paragraph-level formatting
    /// is kept.
    pub fn set_text(&mut self, text: &str) {
        self.runs.clear();
        if !text.is_empty() {
            self.runs.push(Run::new(text));
        }
    }

    /// Runs of the paragraph
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Set font name and size on every run
    pub fn apply_font(&mut self, font_name: &str, font_size_pt: f32) {
        for run in &mut self.runs {
            run.font_name = Some(font_name.to_string());
            run.font_size_pt = Some(font_size_pt);
        }
    }

    /// Upper-case the visible text of every run in place
    pub fn to_upper_case(&mut self) {
        for run in &mut self.runs {
            run.text = run.text.to_uppercase();
        }
    }

    /// Paragraph-level formatting
    pub fn format(&self) -> &ParagraphFormat {
        &self.format
    }

    /// Mutable paragraph-level formatting
    pub fn format_mut(&mut self) -> &mut ParagraphFormat {
        &mut self.format
    }
}

/// Section page margins in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left_in: f64,
    pub right_in: f64,
    pub top_in: f64,
    pub bottom_in: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        PageMargins {
            left_in: crate::app_config::PAGE_MARGIN_LEFT_IN,
            right_in: crate::app_config::PAGE_MARGIN_RIGHT_IN,
            top_in: crate::app_config::PAGE_MARGIN_TOP_IN,
            bottom_in: crate::app_config::PAGE_MARGIN_BOTTOM_IN,
        }
    }
}

/// An opened screenplay document: the ordered, mutable paragraph sequence
/// plus section-level settings applied on save.
#[derive(Debug, Default)]
pub struct ScriptDocument {
    paragraphs: Vec<Paragraph>,
    margins: Option<PageMargins>,
    page_numbers: bool,
}

impl ScriptDocument {
    /// Create an empty document
    pub fn new() -> Self {
        ScriptDocument::default()
    }

    /// Build a document from plain paragraph texts - used by tests and
    /// external consumers
    pub fn from_paragraph_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ScriptDocument {
            paragraphs: texts
                .into_iter()
                .map(|text| Paragraph::from_text(text.as_ref()))
                .collect(),
            margins: None,
            page_numbers: false,
        }
    }

    /// Open a .docx package and parse its main document part
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let file = File::open(path.as_ref())?;
        let mut archive = zip::ZipArchive::new(file)?;

        let mut xml = Vec::new();
        match archive.by_name("word/document.xml") {
            Ok(mut part) => {
                part.read_to_end(&mut xml)?;
            }
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(DocumentError::MissingDocumentPart);
            }
            Err(e) => return Err(e.into()),
        }

        let paragraphs = reader::parse_document_xml(&xml)?;
        Ok(ScriptDocument {
            paragraphs,
            margins: None,
            page_numbers: false,
        })
    }

    /// Write the document out as a complete .docx package
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        writer::write_package(self, path.as_ref())
    }

    /// Number of paragraphs
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether the document has no paragraphs
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// All paragraphs in document order
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraph at `index`; panics when out of bounds
    pub fn paragraph(&self, index: usize) -> &Paragraph {
        &self.paragraphs[index]
    }

    /// Mutable paragraph at `index`; panics when out of bounds
    pub fn paragraph_mut(&mut self, index: usize) -> &mut Paragraph {
        &mut self.paragraphs[index]
    }

    /// Insert a new plain paragraph immediately after `index`
    pub fn insert_after(&mut self, index: usize, text: &str) {
        self.paragraphs.insert(index + 1, Paragraph::from_text(text));
    }

    /// Remove the paragraphs at the given indices. Indices refer to the
    /// current sequence and are removed highest-first so the earlier ones
    /// stay valid.
    pub fn remove_paragraphs(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            if index < self.paragraphs.len() {
                self.paragraphs.remove(index);
            }
        }
    }

    /// Index of the first paragraph whose text contains `keyword`
    pub fn find_start_paragraph(&self, keyword: &str) -> Option<usize> {
        self.paragraphs
            .iter()
            .position(|paragraph| paragraph.text().contains(keyword))
    }

    /// Set the section page margins written on save
    pub fn set_margins(&mut self, margins: PageMargins) {
        self.margins = Some(margins);
    }

    /// Section page margins (defaults apply when not set explicitly)
    pub fn margins(&self) -> PageMargins {
        self.margins.unwrap_or_default()
    }

    /// Stamp page numbers: a right-aligned dynamic PAGE field in the page
    /// header, skipping the first page
    pub fn add_page_numbers(&mut self) {
        self.page_numbers = true;
    }

    /// Whether the page-number header is enabled
    pub fn has_page_numbers(&self) -> bool {
        self.page_numbers
    }
}
