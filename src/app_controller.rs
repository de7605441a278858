use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::StyleParameters;
use crate::docx::{PageMargins, ScriptDocument};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::formatter;

// @module: Application controller for screenplay formatting

/// Main application controller for document formatting
pub struct Controller {
    // @field: Resolved style parameters
    params: StyleParameters,
}

impl Controller {
    /// Create a new controller for test purposes with default parameters
    pub fn new_for_test() -> Self {
        Self::with_params(StyleParameters::default())
    }

    // @method: Create a new controller with the given parameters
    pub fn with_params(params: StyleParameters) -> Self {
        Controller { params }
    }

    /// The parameters this controller formats with
    pub fn params(&self) -> &StyleParameters {
        &self.params
    }

    /// Format a single document and save the result.
    ///
    /// The missing-input case is reported before the container is touched.
    /// Everything after that either succeeds or propagates the underlying
    /// container error; the formatting pass itself cannot fail.
    pub fn run(&self, input_file: &Path, output_file: &Path) -> Result<(), AppError> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::FileNotFound(input_file.to_path_buf()));
        }

        info!("Formatting: {}", input_file.display());

        let mut doc = ScriptDocument::open(input_file)?;

        let start_index = match doc.find_start_paragraph(&self.params.start_keyword) {
            Some(index) => index,
            None => {
                warn!(
                    "Start keyword '{}' not found, formatting the entire document",
                    self.params.start_keyword
                );
                0
            }
        };

        doc.set_margins(PageMargins::default());
        formatter::reformat(&mut doc, start_index, &self.params);
        doc.add_page_numbers();
        doc.save(output_file)?;

        info!("Formatted file saved as: {}", output_file.display());
        Ok(())
    }

    /// Format every .docx under a directory, writing each result beside its
    /// input. A file that fails is logged and counted but does not stop the
    /// batch. Returns the number of successfully formatted documents.
    pub fn run_folder(&self, input_dir: &Path) -> Result<usize, AppError> {
        let files = FileManager::find_docx_files(input_dir)
            .map_err(|e| AppError::File(e.to_string()))?;

        if files.is_empty() {
            warn!("No .docx files found in {}", input_dir.display());
            return Ok(0);
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut formatted = 0usize;
        let mut failed = 0usize;
        for input_file in &files {
            progress.set_message(
                input_file
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let output_file: PathBuf = FileManager::default_output_path(input_file);
            match self.run(input_file, &output_file) {
                Ok(()) => formatted += 1,
                Err(e) => {
                    failed += 1;
                    error!("Failed to format {}: {}", input_file.display(), e);
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Finished processing {} files ({} failed)", formatted + failed, failed);
        Ok(formatted)
    }
}
