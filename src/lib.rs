/*!
 * # ScreenRight - screenplay formatter for Word documents
 *
 * A Rust library for reformatting .docx screenplays into an
 * industry-standard layout.
 *
 * ## Features
 *
 * - Classify every paragraph's dramatic role from its text and context:
 *   scene heading, character cue, parenthetical, dialogue, action, blank
 * - Apply role-specific indentation, casing, font and spacing rules
 * - Split character cues carrying inline dialogue into two paragraphs
 * - Collapse redundant blank paragraphs
 * - Stamp page numbers in the header, skipping the first page
 * - Layered `Key: Value` parameter files with per-key fallbacks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `classifier`: Paragraph role classification (pure, context-sensitive)
 * - `formatter`: The stateful reformatting pass over the paragraph sequence
 * - `docx`: The .docx document container (paragraph model, reader, writer)
 * - `app_config`: Style parameter loading, layering and persistence
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod docx;
pub mod errors;
pub mod file_utils;
pub mod formatter;

// Re-export main types for easier usage
pub use app_config::{IndentPair, StyleParameters};
pub use app_controller::Controller;
pub use classifier::{Classifier, ParagraphRole};
pub use docx::{PageMargins, Paragraph, Run, ScriptDocument};
pub use errors::{AppError, DocumentError};
pub use formatter::{normalize_whitespace, reformat};
